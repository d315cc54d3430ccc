use std::fmt;

/// A scalar bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Text.
    Str(String),
    /// Integral number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write_float(f, *x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Writes a float the way JVM-hosted templates print doubles: plain decimal
/// with at least one fractional digit inside `[1e-3, 1e7)`, otherwise
/// `d.dddE<exp>` (`1.0E21`, `1.0E-4`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = x.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // Debug keeps the fractional part of whole numbers ("1.0", not "1")
        return write!(f, "{:?}", x);
    }

    let sci = format!("{:e}", x);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
    if mantissa.contains('.') {
        write!(f, "{}E{}", mantissa, exponent)
    } else {
        write!(f, "{}.0E{}", mantissa, exponent)
    }
}

/// The result of evaluating a property path against a binding context.
///
/// Consumers match on the variant instead of inspecting the runtime type of
/// the bound object.
///
/// # String Form
///
/// `Display` gives the text a value is compared against and rendered as:
/// scalars print naturally, sequences as `[a, b]`, mappings as `{k=v, ...}`.
/// An absent value prints as `null` when nested in a collection; at the top
/// level the resolver turns it into an empty string instead.
///
/// # Examples
///
/// ```
/// use formtags_core::Value;
///
/// let colours = Value::from(vec!["red", "blue"]);
/// assert_eq!(colours.to_string(), "[red, blue]");
/// assert!(Value::Absent.is_absent());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value is bound.
    #[default]
    Absent,
    /// A single value.
    Scalar(Scalar),
    /// An ordered list or array.
    Sequence(Vec<Value>),
    /// Key/value pairs in insertion order.
    Mapping(Vec<(String, Value)>),
}

impl Value {
    /// Returns `true` for [`Value::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Builds a mapping from key/value pairs, keeping their order.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("null"),
            Self::Scalar(s) => write!(f, "{}", s),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Int(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Scalar(Scalar::Int(n.into()))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Absent, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Absent,
            Json::Bool(b) => b.into(),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.into()
                } else if n.is_u64() {
                    // above i64::MAX, kept exact as text
                    n.to_string().into()
                } else {
                    n.as_f64().map_or_else(|| n.to_string().into(), Into::into)
                }
            }
            Json::String(s) => s.into(),
            Json::Array(items) => Self::Sequence(items.into_iter().map(Into::into).collect()),
            Json::Object(map) => Self::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-7i64).to_string(), "-7");
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn float_display_keeps_fraction() {
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(-0.0).to_string(), "-0.0");
    }

    #[test]
    fn float_display_switches_to_exponent_outside_plain_range() {
        assert_eq!(Value::from(0.001).to_string(), "0.001");
        assert_eq!(Value::from(9_999_999.5).to_string(), "9999999.5");
        assert_eq!(Value::from(1e7).to_string(), "1.0E7");
        assert_eq!(Value::from(1e21).to_string(), "1.0E21");
        assert_eq!(Value::from(0.0001).to_string(), "1.0E-4");
        assert_eq!(Value::from(-2.5e-8).to_string(), "-2.5E-8");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn sequence_display() {
        let value = Value::Sequence(vec!["a".into(), Value::Absent, 3.into()]);

        assert_eq!(value.to_string(), "[a, null, 3]");
    }

    #[test]
    fn mapping_display_keeps_order() {
        let value = Value::mapping([("z", "last"), ("a", "first")]);

        assert_eq!(value.to_string(), "{z=last, a=first}");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(None::<String>), Value::Absent);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn default_is_absent() {
        assert!(Value::default().is_absent());
    }

    #[test]
    fn json_conversion() {
        let value = Value::from(json!({
            "name": "Ann",
            "age": 31,
            "score": 9.5,
            "admin": false,
            "nick": null,
            "tags": ["a", "b"]
        }));

        assert_eq!(
            value,
            Value::Mapping(vec![
                ("name".to_string(), "Ann".into()),
                ("age".to_string(), 31.into()),
                ("score".to_string(), 9.5.into()),
                ("admin".to_string(), false.into()),
                ("nick".to_string(), Value::Absent),
                ("tags".to_string(), vec!["a", "b"].into()),
            ])
        );
    }

    #[test]
    fn json_large_unsigned_becomes_text() {
        let value = Value::from(json!(u64::MAX));

        assert_eq!(value.to_string(), u64::MAX.to_string());
    }
}
