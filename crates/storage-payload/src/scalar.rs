//! Scalar values carried by conditions and column maps.

use crate::error::PayloadError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single value in a payload.
///
/// Serializes as the natural JSON value (`"text"`, `3`, `1.5`, `true`, `null`,
/// `[..]`). `List` is only meaningful as the right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Scalar>),
}

impl Scalar {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
            Scalar::List(_) => "list",
        }
    }

    /// Returns the value as a whole number, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Text used when the value is sent as a URL query parameter.
    ///
    /// Null renders empty and lists are comma-joined. Bools render as
    /// `true`/`false` and a list as `1,2,3`, not the Python-style `True` or
    /// `[1, 2, 3]` a form-encoded dict would carry.
    pub fn to_param_string(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::List(items) => items
                .iter()
                .map(Scalar::to_param_string)
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Int(n) => serde_json::Value::from(*n),
            // Non-finite floats have no JSON form.
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Scalar::Text(s) => serde_json::Value::String(s.clone()),
            Scalar::List(items) => {
                serde_json::Value::Array(items.iter().map(Scalar::to_json).collect())
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
            Scalar::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(n) => serializer.serialize_i64(*n),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::List(items) => items.serialize(serializer),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Text(value.clone())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Scalar::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Scalar {
                type Error = PayloadError;

                /// Fails with [`PayloadError::TypeMismatch`] outside the `i64` range.
                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    i64::try_from(value)
                        .map(Scalar::Int)
                        .map_err(|_| PayloadError::TypeMismatch {
                            expected: "integer",
                            found: "out-of-range integer",
                        })
                }
            }
        )*
    };
}

impl_try_from_int!(u64, usize, isize, i128, u128);

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Scalar {
    fn from(values: Vec<T>) -> Self {
        Scalar::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Scalar {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Scalar::Null,
            serde_json::Value::Bool(b) => Scalar::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Scalar::Text(s),
            serde_json::Value::Array(items) => {
                Scalar::List(items.into_iter().map(Scalar::from).collect())
            }
            obj @ serde_json::Value::Object(_) => Scalar::Text(obj.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_numbers_keep_integer_kind() {
        assert_eq!(Scalar::from(serde_json::json!(3)), Scalar::Int(3));
        assert_eq!(Scalar::from(serde_json::json!(2.5)), Scalar::Float(2.5));
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Scalar::from(None::<i32>), Scalar::Null);
        assert_eq!(Scalar::from(Some("x")), Scalar::Text("x".into()));
    }

    #[test]
    fn param_string_forms() {
        assert_eq!(Scalar::from("COAP_CONF").to_param_string(), "COAP_CONF");
        assert_eq!(Scalar::from(45677).to_param_string(), "45677");
        assert_eq!(Scalar::Null.to_param_string(), "");
        assert_eq!(Scalar::from(vec![1, 2, 3]).to_param_string(), "1,2,3");
        assert_eq!(Scalar::from(true).to_param_string(), "true");
        assert_eq!(Scalar::from(false).to_param_string(), "false");
    }

    #[test]
    fn wide_integers_convert_checked() {
        assert_eq!(Scalar::try_from(7_u64).unwrap(), Scalar::Int(7));
        assert_eq!(Scalar::try_from(3_usize).unwrap(), Scalar::Int(3));
        assert_eq!(Scalar::try_from(-4_i128).unwrap(), Scalar::Int(-4));

        let err = Scalar::try_from(u64::MAX).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(Scalar::try_from(i128::MIN).is_err());
        assert!(Scalar::try_from(u128::MAX).is_err());
    }

    #[test]
    fn serializes_untagged() {
        let value = serde_json::to_value(Scalar::from(vec!["a", "b"])).unwrap();
        assert_eq!(value, serde_json::json!(["a", "b"]));
        assert_eq!(Scalar::from(1.5).to_json(), serde_json::json!(1.5));
    }

    #[test]
    fn non_finite_float_renders_null() {
        assert_eq!(Scalar::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }
}
