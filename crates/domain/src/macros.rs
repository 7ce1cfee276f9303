//! Macro for implementing label conversions on domain enums
//!
//! Domain enums are persisted and exchanged as their upper-case labels
//! (`EN_ATTENTE`, `TECHNICIEN`, ...). This macro generates `as_str`,
//! `Display`, a case-insensitive `FromStr`, and serde impls that go through
//! the same label mapping, so JSON bodies and query strings accept
//! `en_cours` as well as `EN_COURS`.
//!
//! # Example
//!
//! ```rust
//! use hotelix_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shift {
//!     Morning,
//!     Night,
//! }
//!
//! impl_domain_status_conversions!(Shift {
//!     Morning => "MORNING",
//!     Night => "NIGHT",
//! });
//!
//! assert_eq!("night".parse::<Shift>().unwrap(), Shift::Night);
//! assert_eq!(Shift::Morning.to_string(), "MORNING");
//! assert_eq!(serde_json::from_str::<Shift>("\"morning\"").unwrap(), Shift::Morning);
//! ```

/// Implements `as_str`, `Display`, `FromStr`, `Serialize` and `Deserialize`
/// for label enums
///
/// Labels must be written in upper case; parsing upper-cases the input
/// before matching.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical upper-case label.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        impl $crate::__serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let label =
                    <std::borrow::Cow<'de, str> as $crate::__serde::Deserialize>::deserialize(
                        deserializer,
                    )?;
                label.parse().map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }
    };
}
