//! Server-side HTML form tags bound to a per-request value stack.
//!
//! The tags render `<input>`, `<option>` and `<textarea>` elements whose
//! values, checked/selected state and error styling come from the request's
//! [`BindingContext`]. Field names double as property paths into that
//! context, so every name passes an allow-list grammar before it is
//! evaluated:
//!
//! - **Expression guard**: [`PropertyPath`] can only be built by parsing, and
//!   [`BindingContext::find_value`] only accepts a `PropertyPath`
//! - **Value resolution**: [`resolve`], [`resolve_string`], [`is_selected`]
//!   and [`field_errors`] turn context lookups into tagged [`Value`]s
//! - **Escaping**: [`escape_entities`] for names and bound values
//! - **Rendering**: [`InputTag`], [`OptionTag`] and [`TextareaTag`] via the
//!   [`FormTag`] trait
//!
//! [`JsonValueStack`] is a ready-made context over `serde_json` documents.
//!
//! # Examples
//!
//! ```
//! use formtags_core::{FieldErrors, FormTag, InputTag, JsonValueStack, TagErrorKind};
//! use serde_json::json;
//!
//! let mut stack = JsonValueStack::new();
//! stack.push_validated(
//!     json!({ "user": { "email": "not-an-address" } }),
//!     FieldErrors::new().with("user.email", "must contain @"),
//! );
//!
//! let email = InputTag::new()
//!     .input_type("email")
//!     .name("user.email")
//!     .class("field")
//!     .error_class("field error");
//!
//! let mut out = Vec::new();
//! email.write_to(&stack, &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     r#"<input type="email" name="user.email" value="not-an-address" class="field error" />"#
//! );
//!
//! // Names outside the path grammar never reach the context.
//! let hostile = InputTag::new().input_type("text").name("@java.lang.Runtime@getRuntime()");
//! assert_eq!(hostile.render(&stack).unwrap_err().kind(), TagErrorKind::InvalidPath);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attrs;
mod context;
mod error;
mod escape;
mod path;
mod resolve;
mod stack;
mod tags;
mod value;

#[cfg(test)]
mod test_utils;

pub use attrs::DynamicAttributes;
pub use context::{BindingContext, FieldErrors, ValidationAware};
pub use error::{BoxError, TagError, TagErrorKind};
pub use escape::escape_entities;
pub use path::{Delimiter, PropertyPath, Segment};
pub use resolve::{field_errors, is_selected, resolve, resolve_string};
pub use stack::{JsonValueStack, LookupError};
pub use tags::{FormTag, InputTag, OptionTag, SelectTag, TextareaTag};
pub use value::{Scalar, Value};
