//! Macro for implementing Display and FromStr for plain domain enums
//!
//! Used by enums that travel as lowercase strings (severities, resource
//! kinds, storage backends) in config files, environment variables and
//! logs.
//!
//! # Example
//!
//! ```rust
//! use gradebook_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Stable,
//!     Beta,
//! }
//!
//! impl_domain_enum_conversions!(Channel {
//!     Stable => "stable",
//!     Beta => "beta",
//! });
//!
//! assert_eq!(Channel::Beta.to_string(), "beta");
//! assert_eq!("STABLE".parse::<Channel>(), Ok(Channel::Stable));
//! ```

/// Implements `Display` and case-insensitive `FromStr` for a fieldless enum.
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
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
