use std::rc::Rc;

use super::env::EnvRef;
use super::value::{Lambda, Value};

/// Evaluate one value in the given environment.
///
/// Symbols resolve to a copy of their binding, S-expressions evaluate as
/// expressions, everything else is self-evaluating.
pub fn eval(env: &EnvRef, value: Value) -> Value {
    match value {
        Value::Symbol(name) => env.borrow().lookup(&name),
        Value::Sexpr(children) => eval_sexpr(env, children),
        other => other,
    }
}

fn eval_sexpr(env: &EnvRef, children: Vec<Value>) -> Value {
    let mut evaluated = Vec::with_capacity(children.len());
    for child in children {
        evaluated.push(eval(env, child));
    }

    // The first error among the children is the result; the rest of the
    // partially evaluated expression is discarded.
    if let Some(index) = evaluated.iter().position(|v| matches!(v, Value::Error(_))) {
        return evaluated.swap_remove(index);
    }

    // Empty expression
    if evaluated.is_empty() {
        return Value::Sexpr(evaluated);
    }

    // Parenthesizing a single value is a no-op
    if evaluated.len() == 1 {
        return evaluated.remove(0);
    }

    let callee = evaluated.remove(0);
    call(env, callee, evaluated)
}

/// Apply a function to an argument list.
///
/// Builtins consume the argument list directly. Lambdas bind arguments to
/// formals one at a time: a call that binds every formal evaluates the body
/// in the lambda's environment, re-parented to `env`; a call with fewer
/// arguments returns the partially applied lambda as a new function.
pub fn call(env: &EnvRef, callee: Value, args: Vec<Value>) -> Value {
    match callee {
        Value::Builtin(builtin) => builtin.dispatch(env, args),
        Value::Lambda(lambda) => call_lambda(env, *lambda, args),
        other => Value::Error(format!(
            "S-Expression starts with incorrect type. Got {}, Expected Function.",
            other.type_name()
        )),
    }
}

fn call_lambda(env: &EnvRef, mut lambda: Lambda, args: Vec<Value>) -> Value {
    let given = args.len();
    let total = lambda.formals.len();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if lambda.formals.is_empty() {
            return Value::Error(format!(
                "too many arguments: got {given}, expected {total}"
            ));
        }

        let formal = lambda.formals.remove(0);

        // The variadic marker binds every remaining argument to the
        // following formal at once.
        if formal == "&" {
            if lambda.formals.len() != 1 {
                return Value::Error(
                    "Function format invalid. Symbol '&' not followed by single symbol."
                        .to_string(),
                );
            }
            let rest_name = lambda.formals.remove(0);
            let mut rest = vec![arg];
            rest.extend(args.by_ref());
            lambda.env.bind_local(&rest_name, Value::Qexpr(rest));
            break;
        }

        lambda.env.bind_local(&formal, arg);
    }

    // A dangling variadic tail defaults to the empty list.
    if lambda.formals.first().map(String::as_str) == Some("&") {
        if lambda.formals.len() != 2 {
            return Value::Error(
                "Function format invalid. Symbol '&' not followed by single symbol.".to_string(),
            );
        }
        lambda.formals.remove(0);
        let rest_name = lambda.formals.remove(0);
        lambda.env.bind_local(&rest_name, Value::Qexpr(Vec::new()));
    }

    if lambda.formals.is_empty() {
        // Saturated: re-parent the lambda's environment to the calling
        // environment, then evaluate the body in it.
        let Lambda {
            env: mut call_env,
            body,
            ..
        } = lambda;
        call_env.set_parent(Rc::clone(env));
        let call_env = call_env.into_ref();
        let body = match body {
            Value::Qexpr(children) | Value::Sexpr(children) => Value::Sexpr(children),
            other => other,
        };
        eval(&call_env, body)
    } else {
        // Partial application: the shrunk lambda is a new curried function.
        Value::Lambda(Box::new(lambda))
    }
}
