//! Exercise style definitions.
//!
//! Listed equity options are overwhelmingly American-style, while the
//! de-Americanisation procedure needs European prices on the same lattice.
//! [`ExerciseStyle`] selects the behaviour at each lattice step.

use std::fmt;

/// Option exercise style.
///
/// # Variants
/// - `European`: exercisable only at expiry
/// - `American`: exercisable at any time up to and including expiry
///
/// # Examples
/// ```
/// use devol_models::instruments::ExerciseStyle;
///
/// let style = ExerciseStyle::American;
/// assert!(style.is_american());
/// assert!(!style.is_european());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any time up to and including expiry.
    American,
}

impl ExerciseStyle {
    /// Returns true for European exercise.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns true for American exercise.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ExerciseStyle::European.is_european());
        assert!(!ExerciseStyle::European.is_american());
        assert!(ExerciseStyle::American.is_american());
        assert!(!ExerciseStyle::American.is_european());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExerciseStyle::European.to_string(), "European");
        assert_eq!(ExerciseStyle::American.to_string(), "American");
    }
}
