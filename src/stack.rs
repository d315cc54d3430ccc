//! A binding context backed by JSON documents.
//!
//! [`JsonValueStack`] holds a stack of `serde_json::Value` frames and resolves
//! property paths against them the way a framework value stack does: the head
//! identifier is looked up in the topmost frame that defines it, the rest of
//! the path walks down from there.

use std::fmt;

use serde_json::{Map, Value as Json};

use crate::context::{BindingContext, FieldErrors, ValidationAware};
use crate::error::BoxError;
use crate::path::{PropertyPath, Segment};
use crate::value::Value;

/// Error produced when a path cannot be walked through the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    path: String,
    reason: String,
}

impl LookupError {
    fn new(path: &PropertyPath, reason: impl Into<String>) -> Self {
        Self {
            path: path.as_str().to_string(),
            reason: reason.into(),
        }
    }

    /// Returns why the lookup failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot evaluate '{}': {}", self.path, self.reason)
    }
}

impl std::error::Error for LookupError {}

static NULL: Json = Json::Null;

#[derive(Debug, Clone)]
struct Frame {
    root: Json,
    errors: Option<FieldErrors>,
}

impl ValidationAware for Frame {
    fn field_errors(&self) -> Result<FieldErrors, BoxError> {
        Ok(self.errors.clone().unwrap_or_default())
    }
}

/// A value stack of JSON frames, searched from the top down.
///
/// # Examples
///
/// ```
/// use formtags_core::{BindingContext, FieldErrors, JsonValueStack, PropertyPath, Value};
/// use serde_json::json;
///
/// let mut stack = JsonValueStack::new();
/// stack.push(json!({ "site": "example" }));
/// stack.push_validated(
///     json!({ "user": { "name": "Ann", "tags": ["a", "b"] } }),
///     FieldErrors::new().with("user.email", "required"),
/// );
///
/// let name = PropertyPath::parse("user.name").unwrap();
/// assert_eq!(stack.find_value(&name).unwrap(), Value::from("Ann"));
///
/// // Heads not defined by the top frame fall through to lower frames.
/// let site = PropertyPath::parse("site").unwrap();
/// assert_eq!(stack.find_value(&site).unwrap(), Value::from("example"));
///
/// assert!(stack.top_object().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonValueStack {
    frames: Vec<Frame>,
}

impl JsonValueStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a frame that does not report validation errors.
    pub fn push(&mut self, root: Json) {
        self.frames.push(Frame { root, errors: None });
    }

    /// Pushes a frame that reports the given field errors.
    pub fn push_validated(&mut self, root: Json, errors: FieldErrors) {
        self.frames.push(Frame {
            root,
            errors: Some(errors),
        });
    }

    /// Removes the top frame, returning its document.
    pub fn pop(&mut self) -> Option<Json> {
        self.frames.pop().map(|frame| frame.root)
    }

    /// Returns the number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the stack has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn lookup(&self, path: &PropertyPath) -> Result<&Json, LookupError> {
        let mut current = self
            .frames
            .iter()
            .rev()
            .find_map(|frame| frame.root.as_object()?.get(path.head()))
            .ok_or_else(|| LookupError::new(path, format!("no such property '{}'", path.head())))?;

        for segment in path.segments() {
            current = match step(current, segment) {
                Step::Found(next) => next,
                Step::Missing => &NULL,
                Step::Failed(reason) => return Err(LookupError::new(path, reason)),
            };
        }

        Ok(current)
    }
}

enum Step<'a> {
    Found(&'a Json),
    Missing,
    Failed(String),
}

fn step<'a>(current: &'a Json, segment: &Segment) -> Step<'a> {
    match (current, segment) {
        (Json::Null, _) => Step::Failed("source is null".to_string()),
        (Json::Object(map), Segment::Property(name)) => match map.get(name) {
            Some(next) => Step::Found(next),
            None => Step::Failed(format!("no such property '{}'", name)),
        },
        (Json::Object(map), Segment::Key { key, .. }) => key_lookup(map, key),
        (Json::Object(map), Segment::Index { digits, .. }) => key_lookup(map, digits),
        (Json::Array(items), Segment::Index { digits, .. }) => match digits.parse::<usize>() {
            Ok(i) if i < items.len() => Step::Found(&items[i]),
            _ => Step::Failed(format!(
                "index {} out of bounds for length {}",
                digits,
                items.len()
            )),
        },
        (_, Segment::Property(name)) => {
            Step::Failed(format!("cannot read property '{}' of a non-object", name))
        }
        (_, _) => Step::Failed("cannot index a non-container".to_string()),
    }
}

fn key_lookup<'a>(map: &'a Map<String, Json>, key: &str) -> Step<'a> {
    map.get(key).map_or(Step::Missing, Step::Found)
}

impl BindingContext for JsonValueStack {
    fn find_value(&self, path: &PropertyPath) -> Result<Value, BoxError> {
        let found = self.lookup(path)?;
        Ok(found.clone().into())
    }

    fn top_object(&self) -> Option<&dyn ValidationAware> {
        self.frames
            .last()
            .filter(|frame| frame.errors.is_some())
            .map(|frame| frame as &dyn ValidationAware)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> PropertyPath {
        PropertyPath::parse(s).expect("valid path")
    }

    fn stack() -> JsonValueStack {
        let mut stack = JsonValueStack::new();
        stack.push(json!({
            "order": {
                "lines": [ { "sku": "A-1" }, { "sku": "B-2" } ],
                "attrs": { "size": "XL", "7": "seven" },
                "note": null
            },
            "colours": ["red", "blue"]
        }));
        stack
    }

    #[test]
    fn resolves_nested_properties() {
        let stack = stack();

        assert_eq!(
            stack.find_value(&path("order.lines[1].sku")).unwrap(),
            Value::from("B-2")
        );
        assert_eq!(
            stack.find_value(&path("order.lines(0).sku")).unwrap(),
            Value::from("A-1")
        );
    }

    #[test]
    fn resolves_key_segments() {
        let stack = stack();

        assert_eq!(
            stack.find_value(&path("order.attrs['size']")).unwrap(),
            Value::from("XL")
        );
        assert_eq!(
            stack.find_value(&path("order.attrs[7]")).unwrap(),
            Value::from("seven")
        );
    }

    #[test]
    fn missing_key_is_absent() {
        let stack = stack();

        assert_eq!(
            stack.find_value(&path("order.attrs['colour']")).unwrap(),
            Value::Absent
        );
    }

    #[test]
    fn null_leaf_is_absent() {
        let stack = stack();

        assert_eq!(stack.find_value(&path("order.note")).unwrap(), Value::Absent);
    }

    #[test]
    fn missing_property_fails() {
        let stack = stack();

        let err = stack.find_value(&path("order.missing")).unwrap_err();
        assert!(err.to_string().contains("no such property 'missing'"));

        let lookup = err.downcast_ref::<LookupError>().unwrap();
        assert_eq!(lookup.reason(), "no such property 'missing'");
    }

    #[test]
    fn unknown_head_fails() {
        let stack = stack();

        assert!(stack.find_value(&path("nobody")).is_err());
    }

    #[test]
    fn walking_through_null_fails() {
        let stack = stack();

        let err = stack.find_value(&path("order.note.text")).unwrap_err();
        let lookup = err.downcast_ref::<LookupError>().unwrap();
        assert!(lookup.reason().contains("source is null"));
    }

    #[test]
    fn index_out_of_bounds_fails() {
        let stack = stack();

        assert!(stack.find_value(&path("colours[5]")).is_err());
        assert!(stack
            .find_value(&path("colours[99999999999999999999999]"))
            .is_err());
    }

    #[test]
    fn indexing_a_scalar_fails() {
        let stack = stack();

        assert!(stack.find_value(&path("order.lines[0].sku[0]")).is_err());
        assert!(stack.find_value(&path("order.lines[0].sku.len")).is_err());
    }

    #[test]
    fn top_frame_shadows_lower_frames() {
        let mut stack = stack();
        stack.push(json!({ "colours": "green" }));

        assert_eq!(stack.find_value(&path("colours")).unwrap(), Value::from("green"));

        stack.pop();
        assert_eq!(
            stack.find_value(&path("colours")).unwrap(),
            Value::from(vec!["red", "blue"])
        );
    }

    #[test]
    fn non_object_frames_are_skipped() {
        let mut stack = stack();
        stack.push(json!(["not", "an", "object"]));

        assert_eq!(stack.len(), 2);
        assert!(stack.find_value(&path("colours")).is_ok());
    }

    #[test]
    fn top_object_requires_validated_frame() {
        let mut stack = stack();
        assert!(stack.top_object().is_none());

        stack.push_validated(json!({}), FieldErrors::new().with("name", "required"));
        let errors = stack
            .top_object()
            .expect("validated frame")
            .field_errors()
            .expect("errors");
        assert!(errors.has_errors("name"));

        stack.push(json!({}));
        assert!(stack.top_object().is_none());
    }

    #[test]
    fn empty_stack_fails_lookups() {
        let stack = JsonValueStack::new();

        assert!(stack.is_empty());
        assert!(stack.find_value(&path("anything")).is_err());
    }
}
