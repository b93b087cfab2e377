//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch over a fixed kind set; pattern matching is
//! preferred over trait objects so an unhandled pairing is visible in one
//! place.
//!
//! Numeric promotion ladder: `i32 op i32` stays `i32` except division,
//! which always promotes to `double` (there is no separate integer
//! division operator). `double op i32` promotes the int. Char arithmetic
//! wraps modulo 16 bits.

use yail_ir::BinaryOp;

use crate::errors::{
    division_by_zero, invalid_binary_op, unsupported_operation, EvalError, EvalResult,
};
use crate::value::{Value, ValueData};

/// Evaluate a binary operation.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Sub => subtract(&left, &right),
        BinaryOp::Mul => multiply(&left, &right),
        BinaryOp::Div => divide(&left, &right),
        BinaryOp::Mod => modulo(&left, &right),
        // Equality is full structural equality (constness, kind, payload)
        // and is defined for any pairing; incomparable kinds are unequal.
        BinaryOp::Eq => Ok(Value::boolean(left == right).as_const()),
        BinaryOp::NotEq => Ok(Value::boolean(left != right).as_const()),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            compare(&left, &right, op)
        }
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => logic(&left, &right, op),
    }
}

/// Addition, including array concatenation, scalar broadcast, and string
/// concatenation.
fn add(left: &Value, right: &Value) -> EvalResult {
    // array + array concatenates, left operand first
    if let (ValueData::Array(a), ValueData::Array(b)) = (&left.data, &right.data) {
        let mut items = a.clone();
        items.extend(b.iter().cloned());
        return Ok(Value::array(items));
    }
    // scalar + array / array + scalar broadcasts element-wise
    if let ValueData::Array(items) = &right.data {
        return broadcast_add(left, items, Side::Prefix);
    }
    if let ValueData::Array(items) = &left.data {
        return broadcast_add(right, items, Side::Suffix);
    }
    // booleans first: string concatenation must not absorb them
    if matches!(left.data, ValueData::Bool(_)) || matches!(right.data, ValueData::Bool(_)) {
        return Err(unsupported_operation(
            "addition is not supported for boolean types",
        ));
    }
    // either side a string concatenates display forms (chars included)
    if matches!(left.data, ValueData::Str(_)) || matches!(right.data, ValueData::Str(_)) {
        return Ok(Value::string(format!("{left}{right}")));
    }
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => Ok(Value::int(a.wrapping_add(*b))),
        (ValueData::Char(a), ValueData::Char(b)) => {
            char_arith(*a, *b, u16::wrapping_add)
        }
        _ => both_f64(left, right)
            .map(|(a, b)| Value::double(a + b))
            .ok_or_else(|| invalid_binary_op(BinaryOp::Add, kind_of(left), kind_of(right))),
    }
}

/// Which side of the element the scalar's text lands on when broadcasting
/// over a string array.
#[derive(Copy, Clone)]
enum Side {
    /// Scalar came first (`scalar + array`).
    Prefix,
    /// Array came first (`array + scalar`).
    Suffix,
}

/// Broadcast a scalar across an array's elements.
///
/// The array's element kind (taken from the first element) selects the
/// rule: i32 elements take an i32 scalar added element-wise; string
/// elements take a string scalar concatenated onto every element, operand
/// order deciding prefix vs. suffix. Other element kinds do not broadcast.
fn broadcast_add(scalar: &Value, items: &[Value], side: Side) -> EvalResult {
    match items.first().map(|item| &item.data) {
        None => Ok(Value::array(Vec::new())),
        Some(ValueData::Int(_)) => {
            let ValueData::Int(n) = scalar.data else {
                return Err(unsupported_operation(format!(
                    "cannot add {} to an i32 array",
                    kind_of(scalar)
                )));
            };
            let items = items
                .iter()
                .map(|item| match item.data {
                    ValueData::Int(v) => Ok(Value::int(v.wrapping_add(n))),
                    _ => Err(unsupported_operation(
                        "scalar addition requires a homogeneous i32 array",
                    )),
                })
                .collect::<Result<Vec<_>, EvalError>>()?;
            Ok(Value::array(items))
        }
        Some(ValueData::Str(_)) => {
            let ValueData::Str(text) = &scalar.data else {
                return Err(unsupported_operation(format!(
                    "cannot add {} to a string array",
                    kind_of(scalar)
                )));
            };
            let items = items
                .iter()
                .map(|item| match &item.data {
                    ValueData::Str(elem) => Ok(Value::string(match side {
                        Side::Prefix => format!("{text}{elem}"),
                        Side::Suffix => format!("{elem}{text}"),
                    })),
                    _ => Err(unsupported_operation(
                        "scalar addition requires a homogeneous string array",
                    )),
                })
                .collect::<Result<Vec<_>, EvalError>>()?;
            Ok(Value::array(items))
        }
        Some(_) => Err(unsupported_operation(
            "scalar addition is only supported for i32 and string arrays",
        )),
    }
}

fn subtract(left: &Value, right: &Value) -> EvalResult {
    if matches!(
        left.data,
        ValueData::Bool(_) | ValueData::Str(_)
    ) || matches!(right.data, ValueData::Bool(_) | ValueData::Str(_))
    {
        return Err(unsupported_operation(
            "subtraction is not supported for these types",
        ));
    }
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => Ok(Value::int(a.wrapping_sub(*b))),
        (ValueData::Char(a), ValueData::Char(b)) => {
            char_arith(*a, *b, u16::wrapping_sub)
        }
        _ => both_f64(left, right)
            .map(|(a, b)| Value::double(a - b))
            .ok_or_else(|| invalid_binary_op(BinaryOp::Sub, kind_of(left), kind_of(right))),
    }
}

fn multiply(left: &Value, right: &Value) -> EvalResult {
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => Ok(Value::int(a.wrapping_mul(*b))),
        _ => both_f64(left, right)
            .map(|(a, b)| Value::double(a * b))
            .ok_or_else(|| {
                unsupported_operation("multiplication is not supported for these data types")
            }),
    }
}

/// Division always yields a double, even for two i32 operands.
fn divide(left: &Value, right: &Value) -> EvalResult {
    check_zero_divisor(right)?;
    both_f64(left, right)
        .map(|(a, b)| Value::double(a / b))
        .ok_or_else(|| unsupported_operation("division is not supported for these data types"))
}

fn modulo(left: &Value, right: &Value) -> EvalResult {
    check_zero_divisor(right)?;
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => Ok(Value::int(a.wrapping_rem(*b))),
        _ => Err(unsupported_operation(
            "modulo is only supported for integer types",
        )),
    }
}

/// Power, defined over i32/double; i32 only when both operands are i32.
pub fn power(left: &Value, right: &Value) -> EvalResult {
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => {
            Ok(Value::int(f64::from(*a).powf(f64::from(*b)) as i32))
        }
        _ => both_f64(left, right)
            .map(|(a, b)| Value::double(a.powf(b)))
            .ok_or_else(|| unsupported_operation("power is not supported for these data types")),
    }
}

/// Floor division, defined over i32/double; i32 only when both operands
/// are i32.
pub fn floor_divide(left: &Value, right: &Value) -> EvalResult {
    check_zero_divisor(right)?;
    match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => {
            Ok(Value::int((f64::from(*a) / f64::from(*b)).floor() as i32))
        }
        _ => both_f64(left, right)
            .map(|(a, b)| Value::double((a / b).floor()))
            .ok_or_else(|| {
                unsupported_operation("floor division is not supported for these data types")
            }),
    }
}

/// Ordering comparison, defined only for same-kind i32, double, and
/// string pairs.
fn compare(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let ordering = match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => a.cmp(b),
        (ValueData::Double(a), ValueData::Double(b)) => {
            a.partial_cmp(b).ok_or_else(|| {
                unsupported_operation("cannot order NaN doubles")
            })?
        }
        (ValueData::Str(a), ValueData::Str(b)) => a.cmp(b),
        _ => {
            return Err(unsupported_operation(format!(
                "cannot compare {} and {}",
                kind_of(left),
                kind_of(right)
            )))
        }
    };
    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::GtEq => ordering.is_ge(),
        _ => unreachable!("compare only handles ordering operators"),
    };
    Ok(Value::boolean(result).as_const())
}

/// Textual `and` / `or` / `xor`.
///
/// For i32 pairs `and` and `or` are value-selecting (`and` yields the
/// right operand when the left is non-zero, else 0; `or` yields the left
/// operand when non-zero, else the right) and `xor` is bitwise. Boolean
/// pairs get the standard logical operators. Constness is the conjunction
/// of the operands' constness.
fn logic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let is_const = left.is_const && right.is_const;
    let data = match (&left.data, &right.data) {
        (ValueData::Int(a), ValueData::Int(b)) => ValueData::Int(match op {
            BinaryOp::And => {
                if *a != 0 {
                    *b
                } else {
                    0
                }
            }
            BinaryOp::Or => {
                if *a != 0 {
                    *a
                } else {
                    *b
                }
            }
            BinaryOp::Xor => a ^ b,
            _ => unreachable!("logic only handles and/or/xor"),
        }),
        (ValueData::Bool(a), ValueData::Bool(b)) => ValueData::Bool(match op {
            BinaryOp::And => *a && *b,
            BinaryOp::Or => *a || *b,
            BinaryOp::Xor => a ^ b,
            _ => unreachable!("logic only handles and/or/xor"),
        }),
        _ => return Err(invalid_binary_op(op, kind_of(left), kind_of(right))),
    };
    Ok(Value { data, is_const })
}

/// Char arithmetic over 16-bit code units, wrapping like the original
/// host's character type.
fn char_arith(a: char, b: char, op: fn(u16, u16) -> u16) -> EvalResult {
    let result = op(a as u16, b as u16);
    char::from_u32(u32::from(result))
        .map(Value::character)
        .ok_or_else(|| {
            unsupported_operation("char arithmetic produced an invalid code point")
        })
}

/// Both operands as f64, when both are numeric (i32 or double) and at
/// least one is a double.
fn both_f64(left: &Value, right: &Value) -> Option<(f64, f64)> {
    let promote = |data: &ValueData| match data {
        ValueData::Int(v) => Some(f64::from(*v)),
        ValueData::Double(v) => Some(*v),
        _ => None,
    };
    match (&left.data, &right.data) {
        (ValueData::Double(_), _) | (_, ValueData::Double(_)) | (ValueData::Int(_), ValueData::Int(_)) => {
            Some((promote(&left.data)?, promote(&right.data)?))
        }
        _ => None,
    }
}

/// Zero-divisor guard for division, modulo, and floor division.
fn check_zero_divisor(right: &Value) -> Result<(), EvalError> {
    match right.data {
        ValueData::Int(0) => Err(division_by_zero()),
        ValueData::Double(v) if v == 0.0 => Err(division_by_zero()),
        _ => Ok(()),
    }
}

/// Keyword name of a value's kind, for error messages.
fn kind_of(value: &Value) -> &'static str {
    value.kind().keyword()
}
