use std::borrow::Cow;

/// Escapes the characters that need entities in markup: `<`, `>`, `&` and `"`.
///
/// All other characters are copied unchanged. When the input contains none of
/// the four characters the input itself is returned without allocating.
///
/// Escaping is applied once, at render time. Running it over text that is
/// already escaped escapes the `&` of each entity again.
///
/// # Examples
///
/// ```
/// use formtags_core::escape_entities;
///
/// assert_eq!(escape_entities("<a>&\"b\""), "&lt;a&gt;&amp;&quot;b&quot;");
/// assert_eq!(escape_entities("plain"), "plain");
/// ```
pub fn escape_entities(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(|c: char| matches!(c, '<' | '>' | '&' | '"')) else {
        return Cow::Borrowed(input);
    };

    let mut buffer = String::with_capacity(input.len() + 20);
    buffer.push_str(&input[..first]);

    for c in input[first..].chars() {
        match c {
            '<' => buffer.push_str("&lt;"),
            '>' => buffer.push_str("&gt;"),
            '&' => buffer.push_str("&amp;"),
            '"' => buffer.push_str("&quot;"),
            _ => buffer.push(c),
        }
    }

    Cow::Owned(buffer)
}
