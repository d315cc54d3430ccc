use crate::attrs::{flag_set, DynamicAttributes, Markup};
use crate::context::BindingContext;
use crate::error::TagError;
use crate::escape::escape_entities;
use crate::resolve::is_selected;

use super::{required, FormTag};

/// The enclosing `<select>` of an option.
///
/// Only carries the field name the options are matched against; rendering
/// the select element itself is left to the template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectTag {
    name: Option<String>,
}

impl SelectTag {
    /// Creates a select scope with no name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the field name, if set.
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Renders an `<option>` element, selected when its value is bound to the
/// enclosing select's field.
///
/// The option's value is the literal `value` attribute if given, otherwise
/// its body text.
///
/// # Examples
///
/// ```
/// use formtags_core::{FormTag, JsonValueStack, OptionTag, SelectTag};
/// use serde_json::json;
///
/// let mut stack = JsonValueStack::new();
/// stack.push(json!({ "size": "M" }));
///
/// let select = SelectTag::new().name("size");
/// let html = OptionTag::new().within(&select).value("M").body("Medium").render(&stack).unwrap();
/// assert_eq!(html, r#"<option value="M" selected="selected">Medium</option>"#);
///
/// let orphan = OptionTag::new().body("Medium").render(&stack);
/// assert!(orphan.is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionTag {
    select: Option<SelectTag>,
    value: Option<String>,
    disabled: Option<String>,
    body: String,
    attributes: DynamicAttributes,
}

impl OptionTag {
    /// Creates an option with no attributes and an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the option inside `select`.
    pub fn within(mut self, select: &SelectTag) -> Self {
        self.select = Some(select.clone());
        self
    }

    /// Sets a literal value; it is escaped when rendered.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: impl Into<String>) -> Self {
        self.disabled = Some(disabled.into());
        self
    }

    /// Sets the body text, emitted verbatim between the tags.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a pass-through attribute.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Merges a caller-built attribute set.
    pub fn attributes(mut self, attributes: DynamicAttributes) -> Self {
        for (name, value) in attributes {
            self.attributes.set(name, value);
        }
        self
    }
}

impl FormTag for OptionTag {
    const ELEMENT: &'static str = "option";

    fn render(&self, ctx: &dyn BindingContext) -> Result<String, TagError> {
        let select = self
            .select
            .as_ref()
            .ok_or_else(|| TagError::configuration("can only be used inside select tag"))?;
        let name = required(select.field_name(), "select name")?;

        let mut markup = Markup::open("option");
        if let Some(value) = self.value.as_deref() {
            markup.attr("value", &escape_entities(value));
        }

        let candidate = self.value.as_deref().unwrap_or(&self.body);
        markup
            .flag("selected", is_selected(ctx, name, candidate)?)
            .flag("disabled", flag_set(self.disabled.as_deref(), "disabled"))
            .dynamic(&self.attributes)
            .raw(">")
            .raw(&self.body)
            .raw("</option>");

        tracing::trace!(tag = "option", name, "rendered");
        Ok(markup.finish())
    }
}
