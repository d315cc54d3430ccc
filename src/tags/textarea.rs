use crate::attrs::{effective_class, flag_set, DynamicAttributes, Markup};
use crate::context::BindingContext;
use crate::error::TagError;
use crate::escape::escape_entities;
use crate::resolve::{field_errors, resolve_string};

use super::{required, FormTag};

/// Renders a `<textarea>` whose content is the literal value if given,
/// otherwise the escaped bound value.
///
/// # Examples
///
/// ```
/// use formtags_core::{FormTag, JsonValueStack, TextareaTag};
/// use serde_json::json;
///
/// let mut stack = JsonValueStack::new();
/// stack.push(json!({ "bio": "<b>hi</b>" }));
///
/// let html = TextareaTag::new().name("bio").render(&stack).unwrap();
/// assert_eq!(html, r#"<textarea name="bio">&lt;b&gt;hi&lt;/b&gt;</textarea>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextareaTag {
    name: Option<String>,
    value: Option<String>,
    disabled: Option<String>,
    required: Option<String>,
    class: Option<String>,
    error_class: Option<String>,
    attributes: DynamicAttributes,
}

impl TextareaTag {
    /// Creates a textarea with no attributes set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets literal content, rendered as given.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
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

impl FormTag for TextareaTag {
    const ELEMENT: &'static str = "textarea";

    fn render(&self, ctx: &dyn BindingContext) -> Result<String, TagError> {
        let name = required(self.name.as_deref(), "name")?;
        let errors = field_errors(ctx)?;

        let mut markup = Markup::open("textarea");
        markup
            .attr("name", &escape_entities(name))
            .flag("required", flag_set(self.required.as_deref(), "required"))
            .flag("disabled", flag_set(self.disabled.as_deref(), "disabled"))
            .class(effective_class(
                self.class.as_deref(),
                self.error_class.as_deref(),
                errors.as_ref(),
                name,
            ))
            .dynamic(&self.attributes)
            .raw(">");

        match self.value.as_deref() {
            Some(value) => markup.raw(value),
            None => markup.raw(&escape_entities(&resolve_string(ctx, name)?)),
        };
        markup.raw("</textarea>");

        tracing::trace!(tag = "textarea", name, "rendered");
        Ok(markup.finish())
    }
}
