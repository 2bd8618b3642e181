//! Error types for loading, resolving and rendering FactoryMod configs

use std::path::PathBuf;

/// Fatal errors. Recoverable problems (unknown recipe names, upgrade recipes
/// without a target) are reported through [`crate::resolve::Diagnostics`]
/// instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source data cannot satisfy a declared field's type.
    #[error("{record}.{field}: cannot read {value} as {expected}")]
    SchemaViolation {
        record: &'static str,
        field: &'static str,
        expected: String,
        value: String,
    },

    /// A field's raw text was rejected by its type's parser.
    #[error("{record}.{field}: {source}")]
    InvalidField {
        record: &'static str,
        field: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("unimplemented duration identifier '{unit}' (from {text:?})")]
    InvalidDurationUnit { unit: char, text: String },

    #[error("duration {text:?} does not fit in a second counter")]
    DurationOverflow { text: String },

    /// More than one factory carries the name an upgrade recipe points at.
    #[error("upgrade recipe '{recipe}' targets '{target}', which names {count} factories")]
    AmbiguousUpgradeTarget {
        recipe: String,
        target: String,
        count: usize,
    },

    #[error("rendering assumption violated: {0}")]
    RenderingAssumptionViolation(String),

    #[error("invalid server {label:?}. Expected one of {known:?}")]
    UnknownServer { label: String, known: Vec<String> },

    #[error("document root is not a mapping")]
    NotAMapping,

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
