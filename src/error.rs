//! Error types for the few fallible edges of the editor.
//!
//! The geometry core itself is total: commands on unknown rooms are no-ops
//! and undersized results are clamped. Errors only arise when loading
//! configuration or serializing the scene for the host.

/// Error returned by [`crate::config::EditorConfig::from_json`] and
/// [`crate::config::EditorConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not valid JSON for an [`crate::config::EditorConfig`].
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value outside its allowed range.
    #[error("invalid editor config field `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}

/// Error returned by engine operations that cross into host formats.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A resize handle name was not recognised.
    #[error(transparent)]
    Handle(#[from] crate::hit::ParseHandleError),
    /// Actions or the scene projection could not be serialized.
    #[error("failed to serialize engine output: {0}")]
    Serialize(#[source] serde_json::Error),
}
