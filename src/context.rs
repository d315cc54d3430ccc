use std::collections::HashMap;

use crate::error::BoxError;
use crate::path::PropertyPath;
use crate::value::Value;

/// The per-request evaluation scope supplied by the hosting framework.
///
/// This trait is the whole seam between the tags and the framework. It is
/// borrowed for the duration of one render and never stored.
///
/// # Invariants
///
/// `find_value` takes a [`PropertyPath`], not a string. Paths can only be
/// built by the allow-list parser, so implementations never see an expression
/// that has not been checked.
///
/// # Examples
///
/// ```
/// use formtags_core::{BindingContext, BoxError, PropertyPath, Value};
///
/// struct Fixed;
///
/// impl BindingContext for Fixed {
///     fn find_value(&self, path: &PropertyPath) -> Result<Value, BoxError> {
///         match path.as_str() {
///             "colour" => Ok("red".into()),
///             other => Err(format!("no property {}", other).into()),
///         }
///     }
/// }
///
/// let path = PropertyPath::parse("colour").unwrap();
/// assert_eq!(Fixed.find_value(&path).unwrap(), Value::from("red"));
/// assert!(Fixed.top_object().is_none());
/// ```
pub trait BindingContext {
    /// Evaluates `path` against the bound object graph.
    ///
    /// # Errors
    ///
    /// Any lookup failure (missing property, evaluation error). The resolver
    /// reports all of them as one error kind and keeps this error as the cause.
    fn find_value(&self, path: &PropertyPath) -> Result<Value, BoxError>;

    /// Returns the object at the top of the context if it reports validation
    /// errors, `None` otherwise.
    fn top_object(&self) -> Option<&dyn ValidationAware> {
        None
    }
}

impl<C: BindingContext + ?Sized> BindingContext for &C {
    fn find_value(&self, path: &PropertyPath) -> Result<Value, BoxError> {
        (**self).find_value(path)
    }

    fn top_object(&self) -> Option<&dyn ValidationAware> {
        (**self).top_object()
    }
}

/// Capability implemented by bound objects that take part in validation.
pub trait ValidationAware {
    /// Returns a snapshot of the current field errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the errors cannot be read.
    fn field_errors(&self) -> Result<FieldErrors, BoxError>;
}

/// Validation messages keyed by field name.
///
/// # Examples
///
/// ```
/// use formtags_core::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.add("email", "must not be blank");
/// errors.add("email", "must contain @");
///
/// assert!(errors.has_errors("email"));
/// assert_eq!(errors.messages("email").len(), 2);
/// assert!(!errors.has_errors("name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: HashMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Returns `true` if `field` is present in the map, even with no messages.
    pub fn has_errors(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the messages recorded for `field`, in the order added.
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if no field has errors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl From<HashMap<String, Vec<String>>> for FieldErrors {
    fn from(fields: HashMap<String, Vec<String>>) -> Self {
        Self { fields }
    }
}

impl ValidationAware for FieldErrors {
    fn field_errors(&self) -> Result<FieldErrors, BoxError> {
        Ok(self.clone())
    }
}
