//! Explicit casts (`value as target`).
//!
//! The cast table is closed: supported pairs convert, everything else
//! yields null rather than failing the script. The `i16`, `i64`, and
//! `void` targets are permanently unsupported.

use yail_ir::CastTarget;

use crate::value::{Value, ValueData};

/// Cast a value to a target kind.
///
/// A successful cast yields a const value; an unsupported pair yields
/// null.
pub fn cast_value(value: &Value, target: CastTarget) -> Value {
    match target {
        CastTarget::I16 | CastTarget::I64 | CastTarget::Void => Value::null(),
        CastTarget::I32 => match &value.data {
            ValueData::Int(v) => Value::int(*v).as_const(),
            // double narrows by truncation
            ValueData::Double(v) => Value::int(*v as i32).as_const(),
            // char casts to its code point
            ValueData::Char(c) => Value::int(*c as i32).as_const(),
            _ => Value::null(),
        },
        CastTarget::Double => match &value.data {
            ValueData::Int(v) => Value::double(f64::from(*v)).as_const(),
            ValueData::Double(v) => Value::double(*v).as_const(),
            _ => Value::null(),
        },
        CastTarget::String => match &value.data {
            ValueData::Str(v) => Value::string(v.clone()).as_const(),
            // any other kind stringifies through its display form
            _ => Value::string(value.to_string()).as_const(),
        },
        CastTarget::Bool => match &value.data {
            ValueData::Bool(v) => Value::boolean(*v).as_const(),
            _ => Value::null(),
        },
        CastTarget::Char => match &value.data {
            ValueData::Str(v) => {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::character(c).as_const(),
                    _ => Value::null(),
                }
            }
            _ => Value::null(),
        },
        CastTarget::Any => value.clone(),
    }
}
