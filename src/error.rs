//! Error types surfaced by configuration, protocol parsing and the cutscene.
//!
//! Per-frame host glue never fails: rejected moves, suppressed speech and
//! missing world objects are silent no-ops. Errors only exist at the edges
//! where input comes from outside the frame loop.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or validating [`crate::settings::ClientSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for the settings schema.
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure when starting the launch cutscene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CutsceneError {
    /// Animation length must be finite and strictly positive.
    #[error("launch duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
}

/// Failure when parsing a wire-protocol action line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The line was empty.
    #[error("empty action message")]
    Empty,
    /// The first token is not a known verb.
    #[error("unknown verb `{0}`")]
    UnknownVerb(String),
    /// The verb was followed by the wrong number of arguments.
    #[error("`{verb}` expects {expected} arguments, got {found}")]
    Arity {
        /// Verb being parsed.
        verb: &'static str,
        /// Arguments the verb takes.
        expected: usize,
        /// Arguments present in the line.
        found: usize,
    },
    /// An argument was not an integer.
    #[error("argument `{0}` is not an integer")]
    BadInteger(String),
    /// The `#` terminator was missing, or present on a verb that has none.
    #[error("`{verb}` terminator mismatch")]
    Terminator {
        /// Verb being parsed.
        verb: &'static str,
    },
}
