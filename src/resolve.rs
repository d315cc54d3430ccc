//! Guarded lookups against a [`BindingContext`].
//!
//! Every function here runs the name through [`PropertyPath::parse`] before
//! the context sees it.

use crate::context::{BindingContext, FieldErrors};
use crate::error::{TagError, TagErrorKind};
use crate::path::PropertyPath;
use crate::value::Value;

fn guard(name: &str) -> Result<PropertyPath, TagError> {
    PropertyPath::parse(name).map_err(|e| {
        tracing::warn!(path = %name, "rejected property path");
        e
    })
}

/// Resolves `name` to its current value.
///
/// # Errors
///
/// - [`TagErrorKind::InvalidPath`] if `name` fails the path grammar; the
///   context is not consulted.
/// - [`TagErrorKind::PropertyAccess`] if the context lookup fails. The
///   context's error is available through `source()`.
///
/// # Examples
///
/// ```
/// use formtags_core::{resolve, JsonValueStack, TagErrorKind, Value};
/// use serde_json::json;
///
/// let mut stack = JsonValueStack::new();
/// stack.push(json!({ "tags": ["a", "b"] }));
///
/// assert_eq!(resolve(&stack, "tags").unwrap(), Value::from(vec!["a", "b"]));
/// assert_eq!(resolve(&stack, "tags; x").unwrap_err().kind(), TagErrorKind::InvalidPath);
/// ```
pub fn resolve(ctx: &dyn BindingContext, name: &str) -> Result<Value, TagError> {
    let path = guard(name)?;

    ctx.find_value(&path).map_err(|e| {
        tracing::debug!(path = %name, error = %e, "property lookup failed");
        TagError::with_source(
            TagErrorKind::PropertyAccess,
            format!("unable to access the specified property: {}", name),
            e,
        )
    })
}

/// Resolves `name` and returns its string form, or `""` when nothing is bound.
///
/// # Errors
///
/// As [`resolve`].
pub fn resolve_string(ctx: &dyn BindingContext, name: &str) -> Result<String, TagError> {
    Ok(match resolve(ctx, name)? {
        Value::Absent => String::new(),
        value => value.to_string(),
    })
}

/// Decides whether `candidate` is currently selected for the field `name`.
///
/// - absent: never selected
/// - sequence: selected if any bound element prints as `candidate`
/// - mapping: as for a sequence, over the mapping's values (not its keys)
/// - scalar: selected if it prints exactly as `candidate`
///
/// Absent elements inside a collection never match.
///
/// # Errors
///
/// As [`resolve`].
///
/// # Examples
///
/// ```
/// use formtags_core::{is_selected, JsonValueStack};
/// use serde_json::json;
///
/// let mut stack = JsonValueStack::new();
/// stack.push(json!({ "colours": ["a", "b", "c"] }));
///
/// assert!(is_selected(&stack, "colours", "b").unwrap());
/// assert!(!is_selected(&stack, "colours", "z").unwrap());
/// ```
pub fn is_selected(ctx: &dyn BindingContext, name: &str, candidate: &str) -> Result<bool, TagError> {
    let prints_as_candidate = |item: &Value| !item.is_absent() && item.to_string() == candidate;

    Ok(match resolve(ctx, name)? {
        Value::Absent => false,
        Value::Sequence(items) => items.iter().any(prints_as_candidate),
        Value::Mapping(entries) => entries.iter().any(|(_, v)| prints_as_candidate(v)),
        Value::Scalar(s) => s.to_string() == candidate,
    })
}

/// Returns the field errors of the object at the top of the context.
///
/// `Ok(None)` means the top object does not take part in validation, which
/// is different from `Ok(Some(errors))` with no entries.
///
/// # Errors
///
/// [`TagErrorKind::PropertyAccess`] if the object fails to report its errors.
pub fn field_errors(ctx: &dyn BindingContext) -> Result<Option<FieldErrors>, TagError> {
    let Some(target) = ctx.top_object() else {
        return Ok(None);
    };

    target.field_errors().map(Some).map_err(|e| {
        tracing::debug!(error = %e, "field error lookup failed");
        TagError::with_source(
            TagErrorKind::PropertyAccess,
            "unable to retrieve field errors from the bound object",
            e,
        )
    })
}
