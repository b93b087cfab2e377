//! Runtime value model.
//!
//! A [`Value`] is a payload ([`ValueData`], one variant per kind) plus a
//! constness flag. The discriminant always matches the payload, so kind
//! and representation can never disagree.
//!
//! Equality is full structural equality over constness, kind, and payload:
//! two values with equal payloads but different constness compare unequal.
//! Literals evaluate to const values; computed results are non-const.

use std::collections::BTreeMap;
use std::fmt;

use yail_ir::DataKind;

/// A runtime value: payload plus constness.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    pub data: ValueData,
    pub is_const: bool,
}

/// The payload of a value, one variant per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueData {
    Null,
    Void,
    Int(i32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Array(Vec<Value>),
    Dict(BTreeMap<String, Value>),
    Struct(StructValue),
    Reference(Box<RefValue>),
}

/// A live struct instance: qualified type name plus field values.
#[derive(Clone, Debug, PartialEq)]
pub struct StructValue {
    /// Qualified name of the defining struct (`package::Name`).
    pub type_name: String,
    pub fields: BTreeMap<String, Value>,
}

impl StructValue {
    /// The bare struct name without its package prefix.
    pub fn bare_name(&self) -> &str {
        self.type_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.type_name)
    }
}

/// An alias observing a container element.
///
/// Stores the backing container's variable name and the index it was read
/// with; the evaluator re-reads the element after the container mutates.
#[derive(Clone, Debug, PartialEq)]
pub struct RefValue {
    /// Variable name of the backing container in the local scope.
    pub container: String,
    /// Index value the element was read with (Int for arrays, Str for
    /// dictionaries).
    pub index: Value,
    /// The element value as of the last resynchronization.
    pub observed: Value,
}

impl Value {
    /// A non-const value.
    pub fn new(data: ValueData) -> Self {
        Value {
            data,
            is_const: false,
        }
    }

    /// Mark this value const (literals, comparison results).
    #[must_use]
    pub fn as_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn int(v: i32) -> Self {
        Value::new(ValueData::Int(v))
    }

    pub fn double(v: f64) -> Self {
        Value::new(ValueData::Double(v))
    }

    pub fn boolean(v: bool) -> Self {
        Value::new(ValueData::Bool(v))
    }

    pub fn character(v: char) -> Self {
        Value::new(ValueData::Char(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        Value::new(ValueData::Str(v.into()))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::new(ValueData::Array(items))
    }

    pub fn dict(entries: BTreeMap<String, Value>) -> Self {
        Value::new(ValueData::Dict(entries))
    }

    pub fn null() -> Self {
        Value::new(ValueData::Null)
    }

    /// The canonical void value (const, no payload).
    pub fn void() -> Self {
        Value::new(ValueData::Void).as_const()
    }

    /// The zero value for a declared kind (uninitialized struct fields).
    ///
    /// Every kind with a payload representation gets a real zero so the
    /// discriminant matches the declared kind from the start; kinds
    /// without one fall back to null.
    pub fn zero(kind: DataKind) -> Self {
        match kind {
            DataKind::Int32 => Value::int(0),
            DataKind::Boolean => Value::boolean(false),
            DataKind::String => Value::string(""),
            DataKind::Double => Value::double(0.0),
            DataKind::Char => Value::character('\0'),
            DataKind::Array => Value::array(Vec::new()),
            DataKind::Dictionary => Value::dict(BTreeMap::new()),
            _ => Value::null(),
        }
    }

    /// The kind of this value.
    pub fn kind(&self) -> DataKind {
        match &self.data {
            ValueData::Null => DataKind::Null,
            ValueData::Void => DataKind::Void,
            ValueData::Int(_) => DataKind::Int32,
            ValueData::Double(_) => DataKind::Double,
            ValueData::Bool(_) => DataKind::Boolean,
            ValueData::Char(_) => DataKind::Char,
            ValueData::Str(_) => DataKind::String,
            ValueData::Array(_) => DataKind::Array,
            ValueData::Dict(_) => DataKind::Dictionary,
            ValueData::Struct(_) => DataKind::Struct,
            ValueData::Reference(_) => DataKind::Reference,
        }
    }

    /// Whether the payload is `Void`.
    pub fn is_void(&self) -> bool {
        matches!(self.data, ValueData::Void)
    }
}

impl fmt::Display for Value {
    /// The display form used by `print`, `to_string`, and string
    /// concatenation.
    ///
    /// Booleans display `True`/`False`; null and void display as empty;
    /// array elements are quoted when the first element is a string or
    /// char; dictionaries display `{"key" = value, ...}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            ValueData::Null | ValueData::Void => Ok(()),
            ValueData::Int(v) => write!(f, "{v}"),
            ValueData::Double(v) => write!(f, "{v}"),
            ValueData::Bool(v) => f.write_str(if *v { "True" } else { "False" }),
            ValueData::Char(v) => write!(f, "{v}"),
            ValueData::Str(v) => f.write_str(v),
            ValueData::Array(items) => {
                // Element quoting follows the first element's kind.
                let quote = match items.first().map(|v| &v.data) {
                    Some(ValueData::Str(_)) => Some('"'),
                    Some(ValueData::Char(_)) => Some('\''),
                    _ => None,
                };
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match quote {
                        Some(q) => write!(f, "{q}{item}{q}")?,
                        None => write!(f, "{item}")?,
                    }
                }
                f.write_str("]")
            }
            ValueData::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{key}\" = {value}")?;
                }
                f.write_str("}")
            }
            ValueData::Struct(instance) => {
                write!(f, "{} {{", instance.bare_name())?;
                for (i, (name, value)) in instance.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {name} = {value}")?;
                }
                f.write_str(" }")
            }
            ValueData::Reference(reference) => write!(f, "{}", reference.observed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equality_includes_constness() {
        assert_eq!(Value::int(4), Value::int(4));
        assert_ne!(Value::int(4), Value::int(4).as_const());
        assert_ne!(Value::int(4), Value::int(5));
    }

    #[test]
    fn equality_never_crosses_kinds() {
        assert_ne!(Value::int(1), Value::double(1.0));
        assert_ne!(Value::string("1"), Value::int(1));
        assert_ne!(Value::boolean(true), Value::int(1));
    }

    #[test]
    fn zero_values_match_declared_kinds() {
        assert_eq!(Value::zero(DataKind::Int32), Value::int(0));
        assert_eq!(Value::zero(DataKind::Boolean), Value::boolean(false));
        assert_eq!(Value::zero(DataKind::String), Value::string(""));
        assert_eq!(Value::zero(DataKind::Double), Value::double(0.0));
        assert_eq!(Value::zero(DataKind::Char), Value::character('\0'));
        assert_eq!(Value::zero(DataKind::Any), Value::null());
    }

    #[test]
    fn display_booleans_capitalized() {
        assert_eq!(Value::boolean(true).to_string(), "True");
        assert_eq!(Value::boolean(false).to_string(), "False");
    }

    #[test]
    fn display_double_uses_default_formatting() {
        assert_eq!(Value::double(5.0).to_string(), "5");
        assert_eq!(Value::double(2.5).to_string(), "2.5");
    }

    #[test]
    fn display_int_array_unquoted() {
        let arr = Value::array(vec![Value::int(2), Value::int(3), Value::int(4)]);
        assert_eq!(arr.to_string(), "[2, 3, 4]");
    }

    #[test]
    fn display_string_array_quoted() {
        let arr = Value::array(vec![Value::string("foofoo"), Value::string("foobar")]);
        assert_eq!(arr.to_string(), r#"["foofoo", "foobar"]"#);
    }

    #[test]
    fn display_char_array_quoted() {
        let arr = Value::array(vec![Value::character('a'), Value::character('b')]);
        assert_eq!(arr.to_string(), "['a', 'b']");
    }

    #[test]
    fn display_dict_quotes_keys() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::int(1));
        entries.insert("b".to_string(), Value::int(2));
        assert_eq!(Value::dict(entries).to_string(), r#"{"a" = 1, "b" = 2}"#);
    }

    #[test]
    fn display_null_is_empty() {
        assert_eq!(Value::null().to_string(), "");
    }

    #[test]
    fn reference_displays_observed_value() {
        let value = Value::new(ValueData::Reference(Box::new(RefValue {
            container: "a".into(),
            index: Value::int(0).as_const(),
            observed: Value::int(42),
        })));
        assert_eq!(value.to_string(), "42");
    }

    #[test]
    fn struct_bare_name_strips_package() {
        let instance = StructValue {
            type_name: "main::Point".into(),
            fields: BTreeMap::new(),
        };
        assert_eq!(instance.bare_name(), "Point");
    }
}
