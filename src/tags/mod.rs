//! Form control renderers.
//!
//! Each tag is a builder mirroring the attributes a template author declares.
//! Rendering is a pure function of the builder and the binding context; the
//! element is assembled in full before anything reaches the output sink, so
//! a failing render writes nothing.

mod input;
mod option;
mod textarea;

pub use input::InputTag;
pub use option::{OptionTag, SelectTag};
pub use textarea::TextareaTag;

use std::io;

use crate::context::BindingContext;
use crate::error::{TagError, TagErrorKind};

/// A form control that renders one HTML element.
pub trait FormTag {
    /// Element name, used in diagnostics.
    const ELEMENT: &'static str;

    /// Renders the element against `ctx`.
    ///
    /// # Errors
    ///
    /// Configuration, path and property-access errors; see [`TagErrorKind`].
    fn render(&self, ctx: &dyn BindingContext) -> Result<String, TagError>;

    /// Renders the element and writes it to `out` in one call.
    ///
    /// # Errors
    ///
    /// As [`render`](Self::render), plus [`TagErrorKind::Output`] if `out`
    /// fails.
    fn write_to<W: io::Write + ?Sized>(
        &self,
        ctx: &dyn BindingContext,
        out: &mut W,
    ) -> Result<(), TagError> {
        let markup = self.render(ctx)?;
        out.write_all(markup.as_bytes()).map_err(|e| {
            tracing::debug!(tag = Self::ELEMENT, error = %e, "writing tag failed");
            TagError::with_source(
                TagErrorKind::Output,
                format!("unable to write <{}> tag", Self::ELEMENT),
                e,
            )
        })?;
        tracing::trace!(tag = Self::ELEMENT, len = markup.len(), "tag written");
        Ok(())
    }
}

/// Fails with a configuration error when a required attribute is missing.
pub(crate) fn required<'a>(value: Option<&'a str>, attribute: &str) -> Result<&'a str, TagError> {
    value.ok_or_else(|| TagError::configuration(format!("no {} attribute supplied", attribute)))
}
