use crate::attrs::{effective_class, flag_set, DynamicAttributes, Markup};
use crate::context::BindingContext;
use crate::error::TagError;
use crate::escape::escape_entities;
use crate::resolve::{field_errors, is_selected, resolve_string};

use super::{required, FormTag};

/// Renders an `<input>` element populated from the binding context.
///
/// - checkbox and radio: checked state comes from an explicit `checked`
///   attribute if given, otherwise from whether the literal value (default
///   `"true"`) is selected for the field
/// - file: no value is rendered
/// - every other type: the literal value if given, otherwise the escaped
///   bound value
///
/// # Examples
///
/// ```
/// use formtags_core::{FormTag, InputTag, JsonValueStack};
/// use serde_json::json;
///
/// let mut stack = JsonValueStack::new();
/// stack.push(json!({ "email": "ann@example.com", "subscribe": true }));
///
/// let text = InputTag::new().input_type("email").name("email").required("true");
/// assert_eq!(
///     text.render(&stack).unwrap(),
///     r#"<input type="email" name="email" value="ann@example.com" required="required" />"#
/// );
///
/// let checkbox = InputTag::new().input_type("checkbox").name("subscribe");
/// assert_eq!(
///     checkbox.render(&stack).unwrap(),
///     r#"<input type="checkbox" name="subscribe" checked="checked" value="true" />"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputTag {
    input_type: Option<String>,
    name: Option<String>,
    value: Option<String>,
    checked: Option<String>,
    disabled: Option<String>,
    required: Option<String>,
    class: Option<String>,
    error_class: Option<String>,
    attributes: DynamicAttributes,
}

impl InputTag {
    /// Creates an input tag with no attributes set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `type` attribute (required).
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Sets the field name (required); also the property path to bind.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a literal value, rendered as given.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the checked flag for checkbox and radio inputs.
    pub fn checked(mut self, checked: impl Into<String>) -> Self {
        self.checked = Some(checked.into());
        self
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: impl Into<String>) -> Self {
        self.disabled = Some(disabled.into());
        self
    }

    /// Sets the required flag.
    pub fn required(mut self, required: impl Into<String>) -> Self {
        self.required = Some(required.into());
        self
    }

    /// Sets the class used when the field has no errors.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets the class used instead when the field has errors.
    pub fn error_class(mut self, error_class: impl Into<String>) -> Self {
        self.error_class = Some(error_class.into());
        self
    }

    /// Adds a pass-through attribute; `class` goes to the class slot.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if name == "class" {
            self.class = Some(value.into());
        } else {
            self.attributes.set(name, value);
        }
        self
    }

    /// Merges a caller-built attribute set; a `class` entry goes to the class
    /// slot.
    pub fn attributes(self, attributes: DynamicAttributes) -> Self {
        attributes
            .into_iter()
            .fold(self, |tag, (name, value)| tag.attribute(name, value))
    }
}

impl FormTag for InputTag {
    const ELEMENT: &'static str = "input";

    fn render(&self, ctx: &dyn BindingContext) -> Result<String, TagError> {
        let input_type = required(self.input_type.as_deref(), "type")?;
        let name = required(self.name.as_deref(), "name")?;

        let mut markup = Markup::open("input");
        markup
            .attr("type", input_type)
            .attr("name", &escape_entities(name));

        match input_type {
            "checkbox" | "radio" => {
                let value = self.value.as_deref().unwrap_or("true");
                let checked = match self.checked.as_deref() {
                    Some(checked) => flag_set(Some(checked), "checked"),
                    None => is_selected(ctx, name, value)?,
                };
                markup.flag("checked", checked).attr("value", value);
            }
            "file" => {}
            _ => match self.value.as_deref() {
                Some(value) => {
                    markup.attr("value", value);
                }
                None => {
                    let bound = resolve_string(ctx, name)?;
                    markup.attr("value", &escape_entities(&bound));
                }
            },
        }

        let errors = field_errors(ctx)?;
        markup
            .flag("required", flag_set(self.required.as_deref(), "required"))
            .flag("disabled", flag_set(self.disabled.as_deref(), "disabled"))
            .class(effective_class(
                self.class.as_deref(),
                self.error_class.as_deref(),
                errors.as_ref(),
                name,
            ))
            .dynamic(&self.attributes)
            .raw(" />");

        tracing::trace!(tag = "input", name, input_type, "rendered");
        Ok(markup.finish())
    }
}
