//! Struct definition and instance tests.

use pretty_assertions::assert_eq;

use super::{run_code, run_code_err};
use crate::errors::EvalErrorKind;

#[test]
fn create_struct_and_update_fields() {
    let code = "
        package main

        pub struct Point {
            var x i32;
            var y i32;
        }

        var p = new Point();
        p.x = 2;
        p.y = 2;

        println(p.x);
        println(p.y);
    ";
    assert_eq!(run_code(code), "2\n2\n");
}

#[test]
fn create_struct_with_explicit_package() {
    let code = "
        package main

        pub struct Point {
            var x i32;
            var y i32;
        }

        var p = new main::Point();
        p.x = 2;

        println(p.x);
    ";
    assert_eq!(run_code(code), "2\n");
}

#[test]
fn unresolved_qualified_name_is_fatal() {
    // a qualified name never falls back to the current package
    let code = "
        package main

        pub struct Point {
            var x i32;
        }

        var p = new test::Point();
    ";
    let err = run_code_err(code);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedStruct {
            name: "test::Point".into()
        }
    );
}

#[test]
fn same_name_in_two_packages_stays_distinct() {
    let code = "
        package test

        pub struct Point {
            var x i32;
        }

        package main

        pub struct Point {
            var x i32;
        }

        var p = new test::Point();
        p.x = 2;

        println(p.x);
    ";
    assert_eq!(run_code(code), "2\n");
}

#[test]
fn duplicate_definition_in_same_package_is_fatal() {
    let code = "
        package main

        pub struct Point {
            var x i32;
        }

        pub struct Point {
            var x i32;
        }
    ";
    let err = run_code_err(code);
    assert!(matches!(
        err.kind,
        EvalErrorKind::DuplicateDefinition { .. }
    ));
}

#[test]
fn update_of_missing_field_is_fatal() {
    let code = "
        package main

        pub struct Point {
            var x i32;
            var y i32;
        }

        var p = new Point();
        p.z = 2;
    ";
    let err = run_code_err(code);
    assert_eq!(err.kind, EvalErrorKind::KeyNotFound { key: "z".into() });
}

#[test]
fn field_update_with_wrong_kind_is_fatal() {
    let code = "
        package main

        pub struct Point {
            var x i32;
        }

        var p = new Point();
        p.x = \"two\";
    ";
    let err = run_code_err(code);
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}

#[test]
fn constructor_body_initializes_fields() {
    let code = "
        package main

        pub struct Point {
            var x i32;
            var z i32;
            var y i32;
        }

        var p = new Point() {
            y = 2;
        };
        print(p.y);
    ";
    assert_eq!(run_code(code), "2");
}

#[test]
fn field_reassignment_after_constructor() {
    let code = "
        package main

        pub struct Point {
            var x i32;
            var y i32;
        }

        var p = new Point() {
            y = 2;
        };
        println(p.y);
        p.y = 3;
        print(p.y);
    ";
    assert_eq!(run_code(code), "2\n3");
}

#[test]
fn declared_defaults_apply_without_constructor() {
    let code = "
        package main

        pub struct Point {
            var x i32;
            var z i32;
            var y i32 = 3;
        }

        var p = new Point();

        print(p.y);
    ";
    assert_eq!(run_code(code), "3");
}

#[test]
fn constructor_overrides_declared_default() {
    let code = "
        package main

        pub struct Point {
            var y i32 = 3;
        }

        var p = new Point() {
            y = 5;
        };

        print(p.y);
    ";
    assert_eq!(run_code(code), "5");
}

#[test]
fn uninitialized_fields_take_kind_zero_values() {
    let code = "
        package main

        pub struct Record {
            var count i32;
            var label string;
            var ready bool;
            var ratio double;
        }

        var r = new Record();
        println(r.count);
        println(r.label);
        println(r.ready);
        println(r.ratio);
    ";
    assert_eq!(run_code(code), "0\n\nFalse\n0\n");
}

#[test]
fn constructor_with_unknown_field_is_fatal() {
    let code = "
        package main

        pub struct Point {
            var x i32;
        }

        var p = new Point() {
            q = 1;
        };
    ";
    let err = run_code_err(code);
    assert_eq!(err.kind, EvalErrorKind::KeyNotFound { key: "q".into() });
}

#[test]
fn instances_do_not_share_state() {
    let code = "
        package main

        pub struct Point {
            var x i32;
        }

        var a = new Point();
        var b = new Point();
        a.x = 7;
        println(a.x);
        println(b.x);
    ";
    assert_eq!(run_code(code), "7\n0\n");
}

#[test]
fn rebinding_instance_variable_name_is_fatal() {
    let code = "
        package main

        pub struct Point {
            var x i32;
        }

        var p = new Point();
        var p = new Point();
    ";
    let err = run_code_err(code);
    assert!(matches!(
        err.kind,
        EvalErrorKind::RedeclaredVariable { .. }
    ));
}

#[test]
fn struct_registration_uses_the_declaring_package() {
    // the bare name resolves against the caller's active package, which
    // no longer matches the declaring one
    let code = "
        package lib

        pub struct Point {
            var x i32;
        }

        package main

        var p = new Point();
    ";
    let err = run_code_err(code);
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedStruct {
            name: "main::Point".into()
        }
    );
}
