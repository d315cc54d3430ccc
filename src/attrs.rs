//! Attribute plumbing shared by the tag renderers.

use crate::context::FieldErrors;

/// Caller-supplied attributes copied onto the rendered element.
///
/// Attributes keep the order in which they were first set; setting a name
/// again replaces its value in place. Values are written exactly as given,
/// without entity escaping.
///
/// # Examples
///
/// ```
/// use formtags_core::DynamicAttributes;
///
/// let mut attrs = DynamicAttributes::new();
/// attrs.set("placeholder", "Your name");
/// attrs.set("maxlength", "40");
/// attrs.set("placeholder", "Full name");
///
/// let names: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["placeholder", "maxlength"]);
/// assert_eq!(attrs.get("placeholder"), Some("Full name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicAttributes {
    entries: Vec<(String, String)>,
}

impl DynamicAttributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value set for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for DynamicAttributes {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for DynamicAttributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

/// Interprets a boolean-like attribute.
///
/// `"true"` or the attribute's own name (case-insensitive) mean present;
/// anything else, including no value, means absent.
pub(crate) fn flag_set(value: Option<&str>, attribute: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case(attribute))
}

/// Picks the class to render: the error class wins when the field has errors.
pub(crate) fn effective_class<'a>(
    class: Option<&'a str>,
    error_class: Option<&'a str>,
    errors: Option<&FieldErrors>,
    field: &str,
) -> Option<&'a str> {
    match (error_class, errors) {
        (Some(error_class), Some(errors)) if errors.has_errors(field) => Some(error_class),
        _ => class,
    }
}

/// Accumulates the markup for one element.
///
/// Nothing is written to the caller's sink until the whole element is built.
#[derive(Debug)]
pub(crate) struct Markup {
    buf: String,
}

impl Markup {
    pub(crate) fn open(tag: &str) -> Self {
        let mut buf = String::with_capacity(128);
        buf.push('<');
        buf.push_str(tag);
        Self { buf }
    }

    /// Appends ` name="value"`; `value` must already be escaped if it needs to be.
    pub(crate) fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(value);
        self.buf.push('"');
        self
    }

    /// Appends `name="name"` when `on` is set.
    pub(crate) fn flag(&mut self, name: &str, on: bool) -> &mut Self {
        if on {
            self.attr(name, name);
        }
        self
    }

    pub(crate) fn class(&mut self, class: Option<&str>) -> &mut Self {
        if let Some(class) = class {
            self.attr("class", class);
        }
        self
    }

    pub(crate) fn dynamic(&mut self, attrs: &DynamicAttributes) -> &mut Self {
        for (name, value) in attrs.iter() {
            self.attr(name, value);
        }
        self
    }

    pub(crate) fn raw(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut attrs = DynamicAttributes::new();
        attrs.set("a", "1");
        attrs.set("b", "2");
        attrs.set("a", "3");

        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, [("a", "3"), ("b", "2")]);
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn collect_from_pairs() {
        let attrs: DynamicAttributes = [("id", "x"), ("tabindex", "2")].into_iter().collect();

        assert_eq!(attrs.get("tabindex"), Some("2"));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn flag_accepts_true_or_own_name() {
        assert!(flag_set(Some("true"), "required"));
        assert!(flag_set(Some("TRUE"), "required"));
        assert!(flag_set(Some("Required"), "required"));
        assert!(flag_set(Some("disabled"), "disabled"));
    }

    #[test]
    fn flag_rejects_everything_else() {
        assert!(!flag_set(None, "required"));
        assert!(!flag_set(Some(""), "required"));
        assert!(!flag_set(Some("false"), "required"));
        assert!(!flag_set(Some("yes"), "required"));
        assert!(!flag_set(Some("disabled"), "required"));
    }

    #[test]
    fn error_class_needs_errors_for_field() {
        let errors = FieldErrors::new().with("email", "invalid");

        assert_eq!(
            effective_class(Some("field"), Some("bad"), Some(&errors), "email"),
            Some("bad")
        );
        assert_eq!(
            effective_class(Some("field"), Some("bad"), Some(&errors), "name"),
            Some("field")
        );
        assert_eq!(
            effective_class(Some("field"), Some("bad"), None, "email"),
            Some("field")
        );
        assert_eq!(effective_class(None, None, Some(&errors), "email"), None);
        assert_eq!(
            effective_class(None, Some("bad"), Some(&errors), "email"),
            Some("bad")
        );
    }

    #[test]
    fn markup_builds_in_order() {
        let attrs: DynamicAttributes = [("data-x", "1")].into_iter().collect();
        let mut markup = Markup::open("input");
        markup
            .attr("name", "a")
            .flag("required", true)
            .flag("disabled", false)
            .class(Some("c"))
            .dynamic(&attrs)
            .raw(" />");

        assert_eq!(
            markup.finish(),
            r#"<input name="a" required="required" class="c" data-x="1" />"#
        );
    }
}
