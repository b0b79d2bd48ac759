use itertools::Itertools;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The failure a caller-supplied validator reports for its token group.
///
/// Boxed so validators can fail with anything `?`-convertible; the table
/// wraps it in [`Error::Validation`], preserving it as the source.
pub type ValidationFailure = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("There must be at least one prefix.")]
    NoPrefixes,

    #[error("There must be at least one alias.")]
    NoAliases,

    #[error("Argument already exists: `{}`", .0)]
    DuplicateAlias(String),

    #[error("Argument not recognized: `{}`", .0)]
    UnknownArgument(String),

    #[error("Argument encountered twice: `{}`", .aliases.iter().join(", "))]
    DuplicateArgument { aliases: Vec<String> },

    #[error("Failed to validate `{}`: {}", .aliases.iter().join(", "), .source)]
    Validation {
        aliases: Vec<String>,
        source: ValidationFailure,
    },
}

impl Error {
    /// The offending parameter attribution, joined across aliases where the
    /// error concerns a whole alias group.
    ///
    /// Configuration errors have no parameter to attribute and return `None`.
    pub fn parameter(&self) -> Option<String> {
        match self {
            Self::NoPrefixes | Self::NoAliases => None,
            Self::DuplicateAlias(alias) => Some(alias.clone()),
            Self::UnknownArgument(token) => Some(token.clone()),
            Self::DuplicateArgument { aliases } | Self::Validation { aliases, .. } => {
                Some(aliases.iter().join(", "))
            }
        }
    }
}
