//! Shared proptest strategies for unit tests.

use proptest::prelude::*;

/// A non-empty run of ASCII word characters.
pub(crate) fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9_]{1,8}").unwrap()
}

/// A key as accepted inside `['...']`, including CJK ideographs and single hyphens.
pub(crate) fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("([A-Za-z0-9_\u{4e00}-\u{9fa5}]-?){1,6}").unwrap()
}

fn arb_suffix() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_word().prop_map(|w| format!(".{}", w)),
        (0u32..1000).prop_map(|n| format!("[{}]", n)),
        (0u32..1000).prop_map(|n| format!("({})", n)),
        arb_key().prop_map(|k| format!("['{}']", k)),
        arb_key().prop_map(|k| format!("('{}')", k)),
    ]
}

/// A property path built from the allow-listed grammar.
pub(crate) fn arb_valid_path() -> impl Strategy<Value = String> {
    (arb_word(), prop::collection::vec(arb_suffix(), 0..5))
        .prop_map(|(head, suffixes)| format!("{}{}", head, suffixes.concat()))
}

/// A character that appears nowhere in the path grammar.
pub(crate) fn arb_forbidden_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        ' ', ';', '"', '=', '@', '#', '+', '*', '/', '\\', '!', '$', '{', '}', '<', '>', ',',
        '\n', '\t', '%', '?', ':',
    ])
}

/// A short printable string used as a field value.
pub(crate) fn arb_field_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 <>&\"'_-]{0,16}").unwrap()
}
