use std::error::Error as StdError;
use std::fmt;

/// Boxed error type used at the binding-context seam.
///
/// Hosting frameworks report lookup failures with whatever error type they
/// have; the resolver keeps it as the `source()` of a [`TagError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error returned when a form tag cannot be rendered.
///
/// Every failure aborts the render of the single tag it occurred in. The
/// `kind` says which stage failed; the underlying cause, when there is one,
/// is preserved for diagnostics through [`std::error::Error::source`].
///
/// # Examples
///
/// ```
/// use formtags_core::{TagError, TagErrorKind};
///
/// let error = TagError::new(TagErrorKind::Configuration, "no name attribute supplied");
/// assert_eq!(error.kind(), TagErrorKind::Configuration);
/// assert_eq!(error.message(), "no name attribute supplied");
/// ```
#[derive(Debug)]
pub struct TagError {
    kind: TagErrorKind,
    message: String,
    source: Option<BoxError>,
}

impl TagError {
    /// Creates a new tag error.
    pub fn new(kind: TagErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new tag error wrapping the cause that triggered it.
    pub fn with_source(
        kind: TagErrorKind,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub(crate) fn invalid_path(path: &str) -> Self {
        Self::new(
            TagErrorKind::InvalidPath,
            format!("invalid name for a property: {}", path),
        )
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::new(TagErrorKind::Configuration, message)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> TagErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag error ({}): {}", self.kind, self.message)
    }
}

impl StdError for TagError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Kind of tag error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagErrorKind {
    /// A property path failed the allow-list grammar.
    InvalidPath,
    /// The binding context could not produce a value or the field errors.
    PropertyAccess,
    /// A required attribute is missing or the tag is used in the wrong place.
    Configuration,
    /// The output sink failed while the tag was written.
    Output,
}

impl fmt::Display for TagErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath => write!(f, "invalid path"),
            Self::PropertyAccess => write!(f, "property access"),
            Self::Configuration => write!(f, "configuration"),
            Self::Output => write!(f, "output"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn tag_error_creation() {
        let error = TagError::new(TagErrorKind::Output, "sink closed");

        assert_eq!(error.kind(), TagErrorKind::Output);
        assert_eq!(error.message(), "sink closed");
        assert!(error.source().is_none());
    }

    #[test]
    fn tag_error_display() {
        let error = TagError::invalid_path("user; drop");

        let output = format!("{}", error);
        assert!(output.contains("tag error"));
        assert!(output.contains("invalid path"));
        assert!(output.contains("user; drop"));
    }

    #[test]
    fn tag_error_preserves_source() {
        let cause = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let error = TagError::with_source(TagErrorKind::Output, "write failed", cause);

        let source = error.source().expect("source should be kept");
        assert_eq!(source.to_string(), "pipe closed");
    }

    #[test]
    fn configuration_helper_sets_kind() {
        let error = TagError::configuration("no type attribute supplied");

        assert_eq!(error.kind(), TagErrorKind::Configuration);
    }

    #[test]
    fn error_kinds_display() {
        assert_eq!(format!("{}", TagErrorKind::InvalidPath), "invalid path");
        assert_eq!(
            format!("{}", TagErrorKind::PropertyAccess),
            "property access"
        );
        assert_eq!(format!("{}", TagErrorKind::Configuration), "configuration");
        assert_eq!(format!("{}", TagErrorKind::Output), "output");
    }
}
