/// Define a closed string enum.
///
/// Serializes as the given lowercase names. Parsing an unknown name fails
/// with `ValidationError::InvalidEnumValue`, both through `FromStr` and
/// when deserializing a document.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $s),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::cattlecare_core::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok($name::$variant),)+
                    _ => Err(::cattlecare_core::ValidationError::InvalidEnumValue {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ::cattlecare_core::ValidationError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(v: $name) -> Self {
                v.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod breeding;
mod cow;
mod farm;
mod feed;
mod health_report;
mod milking_event;
mod user;
mod video_analysis;

pub use breeding::*;
pub use cow::*;
pub use farm::*;
pub use feed::*;
pub use health_report::*;
pub use milking_event::*;
pub use user::*;
pub use video_analysis::*;
