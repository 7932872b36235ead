//! End-to-end tests through the public engine surface.

use pretty_assertions::assert_eq;
use reckon_core::api::Engine;
use reckon_core::errors::{EvalError, error_message};
use reckon_core::evaluator::EvalContext;
use reckon_core::function::{Arity, Callable, FunctionError};

#[test]
fn test_default_env_end_to_end() {
    let mut engine = Engine::with_default_env();
    engine.set_variable("r", 3.0).unwrap();

    let area = engine.evaluate("atan(1) * 4 * r ^ 2").unwrap();
    assert!((area - std::f64::consts::PI * 9.0).abs() < 1e-9);

    assert_eq!(engine.evaluate("max(1, 5, 3) - min(1, 5, 3)"), Ok(4.0));
    assert_eq!(engine.evaluate("sum(1, 2, 3) * 50%"), Ok(3.0));
}

#[test]
fn test_error_codes_match_messages() {
    let engine = Engine::with_default_env();
    let cases: &[(&str, i32, &str)] = &[
        ("1 2", 1, "Syntax Error"),
        ("1 / 0", 2, "Divide By Zero"),
        ("nope", 3, "Unknown Name"),
        ("", 8, "NULL Expression String"),
        ("asin(2)", 9, "Error in Function Evaluation"),
        ("sin(1, 2)", 10, "Invalid Argument Count"),
    ];
    for &(text, code, message) in cases {
        let err = engine.evaluate(text).unwrap_err();
        assert_eq!(err.code(), code, "{text}");
        assert_eq!(error_message(err.code()), message, "{text}");
    }
}

#[test]
fn test_bindings_shared_by_nested_evaluations() {
    struct Discounted;
    impl Callable for Discounted {
        fn call(&self, cx: &mut EvalContext<'_>, args: &mut [f64]) -> Result<f64, FunctionError> {
            let discount = cx.evaluate("base_discount")?;
            Ok(args[0] * (1.0 - discount))
        }
    }

    let mut engine = Engine::with_default_env();
    engine.set_variable("base_discount", 0.25).unwrap();
    engine
        .define_function("discounted", Arity::Exact(1), Discounted)
        .unwrap();
    assert_eq!(engine.evaluate("discounted(200)"), Ok(150.0));
}

#[test]
fn test_unknown_name_carries_the_name() {
    let engine = Engine::new();
    assert_eq!(
        engine.evaluate("widgets * 2"),
        Err(EvalError::UnknownName("widgets".to_string()))
    );
}
