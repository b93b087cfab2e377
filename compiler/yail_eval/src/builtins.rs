//! Built-in functions.
//!
//! Resolved by name before user functions; a user function that shadows a
//! built-in name is unreachable. Built-ins never push a call-stack frame.

use crate::errors::{arity_mismatch, EvalError, EvalResult};
use crate::print_handler::{InputSource, PrintHandlerImpl};
use crate::value::{Value, ValueData};

/// Dispatch a built-in function call.
///
/// Returns `None` when `name` is not a built-in, handing resolution over
/// to the user function table.
pub fn dispatch_builtin(
    name: &str,
    args: &[Value],
    print: &PrintHandlerImpl,
    input: &InputSource,
) -> Option<EvalResult> {
    Some(match name {
        "print" => {
            for arg in args {
                print.print(&arg.to_string());
            }
            Ok(Value::void())
        }
        "println" => {
            for arg in args {
                print.println(&arg.to_string());
            }
            Ok(Value::void())
        }
        "input" => require_args("input", 0, args).map(|()| Value::string(input.read_line())),
        "parseInt" => require_args("parseInt", 1, args).and_then(|()| parse_int(&args[0])),
        "parseDouble" => {
            require_args("parseDouble", 1, args).and_then(|()| parse_double(&args[0]))
        }
        "parseBool" => require_args("parseBool", 1, args).and_then(|()| parse_bool(&args[0])),
        "to_string" => require_args("to_string", 1, args)
            .map(|()| Value::string(args[0].to_string())),
        "to_char_array" => require_args("to_char_array", 1, args).map(|()| {
            let chars = args[0]
                .to_string()
                .chars()
                .map(Value::character)
                .collect();
            Value::array(chars)
        }),
        "typeof" => require_args("typeof", 1, args)
            .map(|()| Value::string(args[0].kind().keyword())),
        _ => return None,
    })
}

fn require_args(name: &str, expected: usize, args: &[Value]) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_mismatch(name, expected, args.len()))
    }
}

fn require_str(name: &str, value: &Value) -> Result<String, EvalError> {
    match &value.data {
        ValueData::Str(s) => Ok(s.clone()),
        _ => Err(EvalError::new(format!(
            "{name} expects a string, got {}",
            value.kind().keyword()
        ))),
    }
}

/// `parseInt`: integer strings parse directly; double-formatted strings
/// truncate. Anything else is fatal.
fn parse_int(value: &Value) -> EvalResult {
    let text = require_str("parseInt", value)?;
    if let Ok(v) = text.trim().parse::<i32>() {
        return Ok(Value::int(v));
    }
    if let Ok(v) = text.trim().parse::<f64>() {
        return Ok(Value::int(v as i32));
    }
    Err(EvalError::new(format!(
        "parseInt: cannot parse '{text}' as i32"
    )))
}

fn parse_double(value: &Value) -> EvalResult {
    let text = require_str("parseDouble", value)?;
    text.trim()
        .parse::<f64>()
        .map(Value::double)
        .map_err(|_| EvalError::new(format!("parseDouble: cannot parse '{text}' as double")))
}

fn parse_bool(value: &Value) -> EvalResult {
    let text = require_str("parseBool", value)?;
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(Value::boolean(true)),
        "false" => Ok(Value::boolean(false)),
        _ => Err(EvalError::new(format!(
            "parseBool: cannot parse '{text}' as bool"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print_handler::{buffer_handler, scripted_input};
    use pretty_assertions::assert_eq;

    fn call(name: &str, args: &[Value]) -> Option<EvalResult> {
        dispatch_builtin(name, args, &buffer_handler(), &scripted_input(Vec::new()))
    }

    #[test]
    fn unknown_name_is_not_a_builtin() {
        assert!(call("frobnicate", &[]).is_none());
    }

    #[test]
    fn print_writes_display_forms() {
        let print = buffer_handler();
        let input = scripted_input(Vec::new());
        dispatch_builtin(
            "print",
            &[Value::int(1), Value::string("x")],
            &print,
            &input,
        )
        .unwrap()
        .unwrap();
        assert_eq!(print.output(), "1x");
    }

    #[test]
    fn println_appends_newline_per_argument() {
        let print = buffer_handler();
        let input = scripted_input(Vec::new());
        dispatch_builtin(
            "println",
            &[Value::boolean(true), Value::boolean(false)],
            &print,
            &input,
        )
        .unwrap()
        .unwrap();
        assert_eq!(print.output(), "True\nFalse\n");
    }

    #[test]
    fn input_returns_scripted_line() {
        let print = buffer_handler();
        let input = scripted_input(vec!["Bob".into()]);
        let value = dispatch_builtin("input", &[], &print, &input)
            .unwrap()
            .unwrap();
        assert_eq!(value, Value::string("Bob"));
    }

    #[test]
    fn parse_int_handles_int_and_double_strings() {
        assert_eq!(
            call("parseInt", &[Value::string("42")]).unwrap().unwrap(),
            Value::int(42)
        );
        assert_eq!(
            call("parseInt", &[Value::string("3.9")]).unwrap().unwrap(),
            Value::int(3)
        );
        assert!(call("parseInt", &[Value::string("abc")]).unwrap().is_err());
        assert!(call("parseInt", &[Value::int(1)]).unwrap().is_err());
    }

    #[test]
    fn parse_double_and_bool() {
        assert_eq!(
            call("parseDouble", &[Value::string("2.5")])
                .unwrap()
                .unwrap(),
            Value::double(2.5)
        );
        assert_eq!(
            call("parseBool", &[Value::string("True")]).unwrap().unwrap(),
            Value::boolean(true)
        );
        assert!(call("parseBool", &[Value::string("yes")]).unwrap().is_err());
    }

    #[test]
    fn to_char_array_explodes_display_form() {
        let value = call("to_char_array", &[Value::string("ab")])
            .unwrap()
            .unwrap();
        assert_eq!(
            value,
            Value::array(vec![Value::character('a'), Value::character('b')])
        );
    }

    #[test]
    fn typeof_names_the_kind() {
        assert_eq!(
            call("typeof", &[Value::int(1)]).unwrap().unwrap(),
            Value::string("i32")
        );
        assert_eq!(
            call("typeof", &[Value::array(Vec::new())]).unwrap().unwrap(),
            Value::string("array")
        );
    }

    #[test]
    fn builtin_arity_is_checked() {
        assert!(call("typeof", &[]).unwrap().is_err());
        assert!(call("input", &[Value::int(1)]).unwrap().is_err());
    }
}
