//! Parameter values.
//!
//! Parameters are a small dynamic value model: scalars, sequences, ordered
//! mappings, and lazy values produced on demand. Path segments render a
//! value as text; the query string flattens sequences and mappings into
//! bracketed keys.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

/// Ordered parameter map passed to [`generate`](crate::UrlGenerator::generate).
///
/// Insertion order is the order of the query string.
pub type Params = IndexMap<String, ParamValue>;

/// Producer behind a [`ParamValue::Lazy`].
pub type LazyFn = Arc<dyn Fn() -> ParamValue + Send + Sync>;

/// A parameter, default or requirement value.
#[derive(Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub enum ParamValue {
    /// Absent value; renders empty.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// An ordered list.
    Sequence(Vec<ParamValue>),
    /// An ordered mapping.
    Mapping(IndexMap<String, ParamValue>),
    /// A value computed when it is used.
    Lazy(LazyFn),
}

impl ParamValue {
    /// Wraps a producer evaluated each time the value is used.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(producer))
    }

    /// Evaluates lazy values, borrowing everything else.
    #[must_use]
    pub fn resolve(&self) -> Cow<'_, Self> {
        match self {
            Self::Lazy(producer) => {
                let mut value = producer();
                while let Self::Lazy(next) = value {
                    value = next();
                }
                Cow::Owned(value)
            }
            other => Cow::Borrowed(other),
        }
    }

    /// Returns `true` for null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(*self.resolve(), Self::Null)
    }

    /// Returns `true` for values a trailing optional segment may drop:
    /// booleans and the empty string.
    #[must_use]
    pub fn is_empty_segment(&self) -> bool {
        match &*self.resolve() {
            Self::Bool(_) => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Renders the value as text.
    ///
    /// Null renders as `null`, sequences and mappings join their elements
    /// with `,` and null elements render empty.
    #[must_use]
    pub fn to_text(&self) -> String {
        match &*self.resolve() {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(n),
            Self::String(s) => s.clone(),
            Self::Sequence(items) => join_elements(items.iter()),
            Self::Mapping(map) => join_elements(map.values()),
            Self::Lazy(_) => unreachable!("resolve() never returns a lazy value"),
        }
    }

    /// Compares two values with coercing equality.
    ///
    /// Null only equals null; booleans compare as `1`/`0`; a number and a
    /// string compare numerically; two sequences or mappings never compare
    /// equal; a sequence or mapping compares against a scalar through its
    /// text.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        let left = self.resolve();
        let right = other.resolve();

        match (&*left, &*right) {
            (Self::Null, Self::Null) => true,
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bool(b), other) | (other, Self::Bool(b)) => {
                Self::from(u8::from(*b)).loosely_equals(other)
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => number_value(a) == number_value(b),
            (Self::Number(n), Self::String(s)) | (Self::String(s), Self::Number(n)) => {
                string_to_number(s).is_some_and(|parsed| parsed == number_value(n))
            }
            (
                Self::Sequence(_) | Self::Mapping(_),
                Self::Sequence(_) | Self::Mapping(_),
            ) => false,
            (compound @ (Self::Sequence(_) | Self::Mapping(_)), scalar)
            | (scalar, compound @ (Self::Sequence(_) | Self::Mapping(_))) => {
                Self::String(compound.to_text()).loosely_equals(scalar)
            }
            (Self::Lazy(_), _) | (_, Self::Lazy(_)) => {
                unreachable!("resolve() never returns a lazy value")
            }
        }
    }
}

fn join_elements<'a>(items: impl Iterator<Item = &'a ParamValue>) -> String {
    items
        .map(|item| match &*item.resolve() {
            ParamValue::Null => String::new(),
            other => other.to_text(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn number_value(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// Formats integral floats without a fractional part (`5.0` -> `5`).
///
/// Exponent notation is kept from `1e21` up.
fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

fn string_to_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|f| !f.is_nan())
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Self::Mapping(map) => f.debug_tuple("Mapping").field(map).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl PartialEq for ParamValue {
    /// Structural equality; lazy values compare by what they produce.
    fn eq(&self, other: &Self) -> bool {
        match (&*self.resolve(), &*other.resolve()) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &*self.resolve() {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => items.serialize(serializer),
            Self::Mapping(map) => map.serialize(serializer),
            Self::Lazy(_) => unreachable!("resolve() never returns a lazy value"),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<f64> for ParamValue {
    /// Non-finite floats become null.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<Self>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ParamValue {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Self>> FromIterator<(K, V)> for ParamValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Builds a [`Params`] map.
///
/// ```
/// use oxide_urlgen::params;
///
/// let params = params! { "id" => 5, "slug" => "hello-world" };
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert(::std::string::String::from($key), $crate::ParamValue::from($value));
        )+
        params
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_rendering() {
        assert_eq!(ParamValue::Null.to_text(), "null");
        assert_eq!(ParamValue::from(true).to_text(), "true");
        assert_eq!(ParamValue::from(42).to_text(), "42");
        assert_eq!(ParamValue::from(2.0).to_text(), "2");
        assert_eq!(ParamValue::from(1.5).to_text(), "1.5");
        assert_eq!(ParamValue::from(json!(["a", null, 3])).to_text(), "a,,3");
    }

    #[test]
    fn test_large_integral_floats() {
        assert_eq!(ParamValue::from(1e15).to_text(), "1000000000000000");
        assert_eq!(ParamValue::from(1e16).to_text(), "10000000000000000");
        assert_eq!(ParamValue::from(1e20).to_text(), "100000000000000000000");
        assert_eq!(ParamValue::from(-1e16).to_text(), "-10000000000000000");
        assert!(ParamValue::from(1e21).to_text().contains('e'));
        assert_eq!(ParamValue::from(-0.0).to_text(), "0");
    }

    #[test]
    fn test_empty_segment() {
        assert!(ParamValue::from(false).is_empty_segment());
        assert!(ParamValue::from(true).is_empty_segment());
        assert!(ParamValue::from("").is_empty_segment());
        assert!(!ParamValue::from(0).is_empty_segment());
        assert!(!ParamValue::Null.is_empty_segment());
    }

    #[test]
    fn test_loose_equality_scalars() {
        assert!(ParamValue::from("5").loosely_equals(&ParamValue::from(5)));
        assert!(ParamValue::from(5).loosely_equals(&ParamValue::from("5")));
        assert!(ParamValue::from(" 5 ").loosely_equals(&ParamValue::from(5)));
        assert!(ParamValue::from("").loosely_equals(&ParamValue::from(0)));
        assert!(ParamValue::from(true).loosely_equals(&ParamValue::from(1)));
        assert!(ParamValue::from(false).loosely_equals(&ParamValue::from("0")));
        assert!(ParamValue::Null.loosely_equals(&ParamValue::Null));
        assert!(!ParamValue::Null.loosely_equals(&ParamValue::from(0)));
        assert!(!ParamValue::from("abc").loosely_equals(&ParamValue::from(0)));
        assert!(!ParamValue::from("en").loosely_equals(&ParamValue::from("fr")));
    }

    #[test]
    fn test_loose_equality_compound() {
        let list = ParamValue::from(vec!["a", "b"]);
        assert!(list.loosely_equals(&ParamValue::from("a,b")));
        assert!(!list.loosely_equals(&list.clone()));
        assert!(ParamValue::from(vec![1]).loosely_equals(&ParamValue::from(1)));
    }

    #[test]
    fn test_lazy_resolution() {
        let value = ParamValue::lazy(|| ParamValue::from("computed"));
        assert_eq!(value.to_text(), "computed");
        assert!(value.loosely_equals(&ParamValue::from("computed")));
        assert_eq!(value, ParamValue::from("computed"));
        assert_eq!(format!("{value:?}"), "Lazy(..)");
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let value: ParamValue = serde_json::from_value(json!({"b": 1, "a": [true, null]})).unwrap();
        let ParamValue::Mapping(map) = &value else {
            panic!("expected mapping, got {value:?}");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"b": 1, "a": [true, null]}));
    }

    #[test]
    fn test_params_macro() {
        let params = params! { "id" => 5, "tags" => vec!["x", "y"], "draft" => false };
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["id", "tags", "draft"]);
        assert_eq!(params["id"], ParamValue::from(5));
        assert!(params!().is_empty());
    }
}
