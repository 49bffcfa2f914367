//! Error kinds for bundlescope operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell a fatal run apart from a chunk that
/// simply has nothing to visualize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// An entry module produced no graph root (missing record or ignored)
    MissingGraphRoot,

    /// The input carried no graph data at all
    MissingGraphData,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed
    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether a run can continue past this error with the remaining input.
    ///
    /// A chunk without a root is skipped; everything else aborts.
    pub fn is_skippable(&self) -> bool {
        matches!(self, ErrorKind::MissingGraphRoot)
    }
}
