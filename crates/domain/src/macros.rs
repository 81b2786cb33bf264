//! Display/FromStr for the wire-level enums
//!
//! Room statuses and storage backends travel as lowercase strings (JSON
//! bodies, CLI arguments, config files). The macro keeps `Display` and
//! `FromStr` in one table so the two directions cannot drift.
//!
//! ```rust
//! use partnerdesk_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DoorState {
//!     Open,
//!     Closed,
//! }
//!
//! impl_domain_status_conversions!(DoorState {
//!     Open => "open",
//!     Closed => "closed",
//! });
//!
//! assert_eq!("OPEN".parse::<DoorState>().unwrap(), DoorState::Open);
//! ```

/// Implements `Display` (canonical lowercase) and case-insensitive `FromStr`
/// for a fieldless enum.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shift {
        Day,
        Night,
    }

    impl_domain_status_conversions!(Shift {
        Day => "day",
        Night => "night",
    });

    #[test]
    fn displays_canonical_form() {
        assert_eq!(Shift::Night.to_string(), "night");
    }

    #[test]
    fn parses_ignoring_case_and_padding() {
        assert_eq!(Shift::from_str(" DAY ").unwrap(), Shift::Day);
        assert_eq!(Shift::from_str("NiGhT").unwrap(), Shift::Night);
    }

    #[test]
    fn rejects_unknown_values() {
        let err = Shift::from_str("evening").unwrap_err();
        assert_eq!(err, "Invalid Shift: evening");
        assert!(Shift::from_str("").is_err());
    }
}
