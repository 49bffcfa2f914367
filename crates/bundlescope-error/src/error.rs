//! The bundlescope error value.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::ErrorKind;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Error raised anywhere between reading a stats dump and writing the report.
///
/// Carries the failing `operation` (earlier operations are kept as `called`
/// context entries), key/value context such as the entry or file path, and
/// the wrapped foreign error when there is one.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<BoxedSource>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Record the operation that failed; a previously set one becomes `called` context.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            let called = std::mem::replace(&mut self.operation, operation);
            self.context.push(("called", called.to_string()));
        } else {
            self.operation = operation;
        }
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Wrap the foreign error that caused this one. Set at most once.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }

    pub fn is_skippable(&self) -> bool {
        self.kind.is_skippable()
    }

    /// An entry chunk whose facade module yields no tree.
    pub fn missing_graph_root(entry: impl Into<String>) -> Self {
        let entry = entry.into();
        Self::new(
            ErrorKind::MissingGraphRoot,
            format!("entry '{entry}' produced no graph root"),
        )
        .with_context("entry", entry)
    }

    /// Nothing in the input could be graphed.
    pub fn missing_graph_data(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingGraphData, message)
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub fn deserialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializationFailed, message)
    }

    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }
}

impl fmt::Display for Error {
    /// `Kind at op, context { k: v, .. } => message`, omitting empty parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect();
            write!(f, ", context {{ {} }}", pairs.join(", "))?;
        }
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // printed by `main` on failure
        fmt::Display::fmt(self, f)?;
        if let Some(source) = &self.source {
            write!(f, "\n\nCaused by:\n    {source}")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}
