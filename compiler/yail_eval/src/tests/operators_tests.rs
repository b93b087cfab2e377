//! Tests for the binary operation engine.

use pretty_assertions::assert_eq;
use yail_ir::BinaryOp;

use crate::errors::EvalErrorKind;
use crate::{evaluate_binary, floor_divide, power, Value};

#[test]
fn int_arithmetic_stays_int() {
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Add).unwrap(),
        Value::int(5)
    );
    assert_eq!(
        evaluate_binary(Value::int(5), Value::int(3), BinaryOp::Sub).unwrap(),
        Value::int(2)
    );
    assert_eq!(
        evaluate_binary(Value::int(5), Value::int(3), BinaryOp::Mul).unwrap(),
        Value::int(15)
    );
    assert_eq!(
        evaluate_binary(Value::int(20), Value::int(2), BinaryOp::Mod).unwrap(),
        Value::int(0)
    );
}

#[test]
fn int_division_always_promotes_to_double() {
    assert_eq!(
        evaluate_binary(Value::int(20), Value::int(4), BinaryOp::Div).unwrap(),
        Value::double(5.0)
    );
    assert_eq!(
        evaluate_binary(Value::int(7), Value::int(2), BinaryOp::Div).unwrap(),
        Value::double(3.5)
    );
}

#[test]
fn division_and_modulo_by_zero_fail() {
    for (right, op) in [
        (Value::int(0), BinaryOp::Div),
        (Value::int(0), BinaryOp::Mod),
        (Value::double(0.0), BinaryOp::Div),
    ] {
        let err = evaluate_binary(Value::int(1), right, op).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    }
}

#[test]
fn double_promotion_on_mixed_operands() {
    assert_eq!(
        evaluate_binary(Value::int(1), Value::double(2.5), BinaryOp::Add).unwrap(),
        Value::double(3.5)
    );
    assert_eq!(
        evaluate_binary(Value::double(1.5), Value::int(2), BinaryOp::Mul).unwrap(),
        Value::double(3.0)
    );
}

#[test]
fn int_broadcast_is_commutative() {
    let array = || Value::array(vec![Value::int(1), Value::int(2), Value::int(3)]);
    let expected = Value::array(vec![Value::int(2), Value::int(3), Value::int(4)]);
    assert_eq!(
        evaluate_binary(Value::int(1), array(), BinaryOp::Add).unwrap(),
        expected
    );
    assert_eq!(
        evaluate_binary(array(), Value::int(1), BinaryOp::Add).unwrap(),
        expected
    );
}

#[test]
fn string_broadcast_prefixes_and_suffixes() {
    let array = || Value::array(vec![Value::string("foo"), Value::string("bar")]);
    assert_eq!(
        evaluate_binary(Value::string("x"), array(), BinaryOp::Add).unwrap(),
        Value::array(vec![Value::string("xfoo"), Value::string("xbar")])
    );
    assert_eq!(
        evaluate_binary(array(), Value::string("x"), BinaryOp::Add).unwrap(),
        Value::array(vec![Value::string("foox"), Value::string("barx")])
    );
}

#[test]
fn broadcast_rejects_mismatched_scalars() {
    let strings = Value::array(vec![Value::string("foo")]);
    assert!(evaluate_binary(Value::int(1), strings, BinaryOp::Add).is_err());
    let ints = Value::array(vec![Value::int(1)]);
    assert!(evaluate_binary(Value::string("x"), ints, BinaryOp::Add).is_err());
    let bools = Value::array(vec![Value::boolean(true)]);
    assert!(evaluate_binary(Value::int(1), bools, BinaryOp::Add).is_err());
}

#[test]
fn broadcast_over_empty_array_is_empty() {
    let empty = Value::array(Vec::new());
    assert_eq!(
        evaluate_binary(Value::int(1), empty, BinaryOp::Add).unwrap(),
        Value::array(Vec::new())
    );
}

#[test]
fn array_concatenation_preserves_order() {
    let left = Value::array(vec![Value::int(1), Value::int(2)]);
    let right = Value::array(vec![Value::int(3)]);
    assert_eq!(
        evaluate_binary(left, right, BinaryOp::Add).unwrap(),
        Value::array(vec![Value::int(1), Value::int(2), Value::int(3)])
    );
}

#[test]
fn string_concatenation_uses_display_forms() {
    assert_eq!(
        evaluate_binary(Value::string("n="), Value::int(4), BinaryOp::Add).unwrap(),
        Value::string("n=4")
    );
    assert_eq!(
        evaluate_binary(Value::character('a'), Value::string("bc"), BinaryOp::Add).unwrap(),
        Value::string("abc")
    );
    assert_eq!(
        evaluate_binary(Value::string("x="), Value::double(2.5), BinaryOp::Add).unwrap(),
        Value::string("x=2.5")
    );
}

#[test]
fn boolean_addition_fails() {
    let err =
        evaluate_binary(Value::boolean(true), Value::int(1), BinaryOp::Add).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::UnsupportedOperation { .. }
    ));
}

#[test]
fn char_arithmetic_sums_code_points() {
    let sum = evaluate_binary(Value::character('a'), Value::character('b'), BinaryOp::Add)
        .unwrap();
    assert_eq!(sum, Value::character(char::from_u32(97 + 98).unwrap()));
    let diff = evaluate_binary(Value::character('b'), Value::character('a'), BinaryOp::Sub)
        .unwrap();
    assert_eq!(diff, Value::character('\u{1}'));
}

#[test]
fn multiply_rejects_strings_and_chars() {
    assert!(evaluate_binary(Value::string("a"), Value::int(2), BinaryOp::Mul).is_err());
    assert!(
        evaluate_binary(Value::character('a'), Value::character('b'), BinaryOp::Mul)
            .is_err()
    );
}

#[test]
fn modulo_rejects_doubles() {
    assert!(
        evaluate_binary(Value::double(5.0), Value::double(2.0), BinaryOp::Mod).is_err()
    );
}

#[test]
fn ordering_requires_same_kind() {
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(3), BinaryOp::Lt).unwrap(),
        Value::boolean(true).as_const()
    );
    assert_eq!(
        evaluate_binary(Value::double(2.0), Value::double(3.0), BinaryOp::GtEq).unwrap(),
        Value::boolean(false).as_const()
    );
    assert_eq!(
        evaluate_binary(Value::string("abc"), Value::string("abd"), BinaryOp::Lt).unwrap(),
        Value::boolean(true).as_const()
    );
    // mixed numeric ordering is not defined
    assert!(evaluate_binary(Value::int(1), Value::double(2.0), BinaryOp::Lt).is_err());
    assert!(evaluate_binary(Value::boolean(true), Value::boolean(false), BinaryOp::Lt)
        .is_err());
}

#[test]
fn equality_never_fails_across_kinds() {
    assert_eq!(
        evaluate_binary(Value::int(1), Value::string("1"), BinaryOp::Eq).unwrap(),
        Value::boolean(false).as_const()
    );
    assert_eq!(
        evaluate_binary(Value::int(1), Value::string("1"), BinaryOp::NotEq).unwrap(),
        Value::boolean(true).as_const()
    );
}

#[test]
fn equality_includes_constness() {
    assert_eq!(
        evaluate_binary(Value::int(2).as_const(), Value::int(2).as_const(), BinaryOp::Eq)
            .unwrap(),
        Value::boolean(true).as_const()
    );
    assert_eq!(
        evaluate_binary(Value::int(2), Value::int(2).as_const(), BinaryOp::Eq).unwrap(),
        Value::boolean(false).as_const()
    );
}

#[test]
fn int_logic_selects_operands() {
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(3), BinaryOp::And).unwrap(),
        Value::int(3)
    );
    assert_eq!(
        evaluate_binary(Value::int(0), Value::int(3), BinaryOp::And).unwrap(),
        Value::int(0)
    );
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(3), BinaryOp::Or).unwrap(),
        Value::int(6)
    );
    assert_eq!(
        evaluate_binary(Value::int(0), Value::int(3), BinaryOp::Or).unwrap(),
        Value::int(3)
    );
    // xor is true bitwise
    assert_eq!(
        evaluate_binary(Value::int(6), Value::int(3), BinaryOp::Xor).unwrap(),
        Value::int(5)
    );
}

#[test]
fn bool_logic_is_standard() {
    assert_eq!(
        evaluate_binary(Value::boolean(true), Value::boolean(false), BinaryOp::And)
            .unwrap(),
        Value::boolean(false)
    );
    assert_eq!(
        evaluate_binary(Value::boolean(true), Value::boolean(false), BinaryOp::Or).unwrap(),
        Value::boolean(true)
    );
    assert_eq!(
        evaluate_binary(Value::boolean(true), Value::boolean(true), BinaryOp::Xor).unwrap(),
        Value::boolean(false)
    );
}

#[test]
fn logic_constness_is_conjunction() {
    let result = evaluate_binary(
        Value::int(1).as_const(),
        Value::int(2).as_const(),
        BinaryOp::And,
    )
    .unwrap();
    assert!(result.is_const);
    let result =
        evaluate_binary(Value::int(1), Value::int(2).as_const(), BinaryOp::And).unwrap();
    assert!(!result.is_const);
}

#[test]
fn logic_rejects_mixed_kinds() {
    assert!(
        evaluate_binary(Value::int(1), Value::boolean(true), BinaryOp::And).is_err()
    );
    assert!(
        evaluate_binary(Value::string("a"), Value::string("b"), BinaryOp::Xor).is_err()
    );
}

#[test]
fn power_kind_follows_operands() {
    assert_eq!(
        power(&Value::int(3), &Value::int(2)).unwrap(),
        Value::int(9)
    );
    assert_eq!(
        power(&Value::double(2.0), &Value::int(3)).unwrap(),
        Value::double(8.0)
    );
    assert!(power(&Value::string("a"), &Value::int(2)).is_err());
}

#[test]
fn floor_divide_kind_follows_operands() {
    assert_eq!(
        floor_divide(&Value::int(25), &Value::int(2)).unwrap(),
        Value::int(12)
    );
    assert_eq!(
        floor_divide(&Value::double(7.0), &Value::int(2)).unwrap(),
        Value::double(3.0)
    );
    assert_eq!(
        floor_divide(&Value::int(1), &Value::int(0)).unwrap_err().kind,
        EvalErrorKind::DivisionByZero
    );
}
