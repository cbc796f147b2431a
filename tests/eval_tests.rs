use rusp::interpreter::{EnvRef, Value, eval, root_env};

fn num(value: i64) -> Value {
    Value::Number(value)
}

fn sym(name: &str) -> Value {
    Value::Symbol(name.to_string())
}

fn sexpr(children: Vec<Value>) -> Value {
    Value::Sexpr(children)
}

fn qexpr(children: Vec<Value>) -> Value {
    Value::Qexpr(children)
}

/// `(\ {x y} {+ x y})` evaluated to a lambda value
fn make_add(env: &EnvRef) -> Value {
    let lambda = eval(
        env,
        sexpr(vec![
            sym("\\"),
            qexpr(vec![sym("x"), sym("y")]),
            qexpr(vec![sym("+"), sym("x"), sym("y")]),
        ]),
    );
    assert!(matches!(lambda, Value::Lambda(_)));
    lambda
}

#[test]
fn numbers_are_self_evaluating() {
    let root = root_env();
    assert_eq!(eval(&root, num(42)), num(42));
}

#[test]
fn qexprs_are_self_evaluating() {
    let root = root_env();
    let list = qexpr(vec![sym("not"), sym("evaluated")]);
    assert_eq!(eval(&root, list.clone()), list);
}

#[test]
fn symbols_resolve_to_their_binding() {
    let root = root_env();
    eval(
        &root,
        sexpr(vec![sym("def"), qexpr(vec![sym("x")]), num(5)]),
    );
    assert_eq!(eval(&root, sym("x")), num(5));
}

#[test]
fn unbound_symbol_is_an_error() {
    let root = root_env();
    assert_eq!(
        eval(&root, sym("nope")),
        Value::Error("Unbound symbol 'nope'".to_string())
    );
}

#[test]
fn empty_sexpr_evaluates_to_itself() {
    let root = root_env();
    assert_eq!(eval(&root, sexpr(vec![])), sexpr(vec![]));
}

#[test]
fn single_child_unwraps() {
    let root = root_env();
    assert_eq!(eval(&root, sexpr(vec![num(7)])), num(7));
}

#[test]
fn addition() {
    let root = root_env();
    assert_eq!(eval(&root, sexpr(vec![sym("+"), num(1), num(2)])), num(3));
}

#[test]
fn nested_arithmetic() {
    let root = root_env();
    // (* (+ 1 2) (- 10 4)) = 18
    let expr = sexpr(vec![
        sym("*"),
        sexpr(vec![sym("+"), num(1), num(2)]),
        sexpr(vec![sym("-"), num(10), num(4)]),
    ]);
    assert_eq!(eval(&root, expr), num(18));
}

#[test]
fn variadic_arithmetic() {
    let root = root_env();
    let expr = sexpr(vec![sym("+"), num(1), num(2), num(3), num(4)]);
    assert_eq!(eval(&root, expr), num(10));
}

#[test]
fn unary_minus_negates() {
    let root = root_env();
    assert_eq!(eval(&root, sexpr(vec![sym("-"), num(5)])), num(-5));
}

#[test]
fn division_by_zero_is_an_error() {
    let root = root_env();
    assert_eq!(
        eval(&root, sexpr(vec![sym("/"), num(1), num(0)])),
        Value::Error("Division By Zero!".to_string())
    );
}

#[test]
fn modulo_by_zero_is_an_error() {
    let root = root_env();
    assert_eq!(
        eval(&root, sexpr(vec![sym("%"), num(1), num(0)])),
        Value::Error("Division By Zero!".to_string())
    );
}

#[test]
fn arithmetic_rejects_non_numbers() {
    let root = root_env();
    assert_eq!(
        eval(&root, sexpr(vec![sym("+"), num(1), qexpr(vec![])])),
        Value::Error("Cannot operate on a non-number! Got a Q-Expression.".to_string())
    );
}

#[test]
fn first_error_among_children_wins() {
    let root = root_env();
    // Both the division and the unbound symbol fail; the earlier error is
    // the one that propagates.
    let expr = sexpr(vec![
        sym("+"),
        sexpr(vec![sym("/"), num(1), num(0)]),
        sym("undefined"),
    ]);
    assert_eq!(
        eval(&root, expr),
        Value::Error("Division By Zero!".to_string())
    );
}

#[test]
fn non_function_head_is_an_error() {
    let root = root_env();
    assert_eq!(
        eval(&root, sexpr(vec![num(1), num(2)])),
        Value::Error(
            "S-Expression starts with incorrect type. Got Number, Expected Function.".to_string()
        )
    );
}

#[test]
fn full_application() {
    let root = root_env();
    let add = make_add(&root);
    assert_eq!(eval(&root, sexpr(vec![add, num(1), num(2)])), num(3));
}

#[test]
fn partial_application_returns_a_function() {
    let root = root_env();
    let add = make_add(&root);
    let partial = eval(&root, sexpr(vec![add, num(1)]));
    assert!(matches!(partial, Value::Lambda(_)));
}

#[test]
fn curried_call_equals_full_call() {
    let root = root_env();
    let add = make_add(&root);

    let full = eval(&root, sexpr(vec![add.clone(), num(1), num(2)]));
    let curried = eval(
        &root,
        sexpr(vec![sexpr(vec![add, num(1)]), num(2)]),
    );
    assert_eq!(full, num(3));
    assert_eq!(curried, num(3));
}

#[test]
fn partial_application_can_be_reused() {
    let root = root_env();
    let add = make_add(&root);
    let add_one = eval(&root, sexpr(vec![add, num(1)]));

    assert_eq!(eval(&root, sexpr(vec![add_one.clone(), num(2)])), num(3));
    assert_eq!(eval(&root, sexpr(vec![add_one, num(10)])), num(11));
}

#[test]
fn too_many_arguments_is_an_error() {
    let root = root_env();
    let add = make_add(&root);
    assert_eq!(
        eval(&root, sexpr(vec![add, num(1), num(2), num(3)])),
        Value::Error("too many arguments: got 3, expected 2".to_string())
    );
}

#[test]
fn variadic_binds_remaining_arguments() {
    let root = root_env();
    // (\ {x & xs} {xs})
    let rest = eval(
        &root,
        sexpr(vec![
            sym("\\"),
            qexpr(vec![sym("x"), sym("&"), sym("xs")]),
            qexpr(vec![sym("xs")]),
        ]),
    );

    let result = eval(&root, sexpr(vec![rest, num(1), num(2), num(3)]));
    assert_eq!(result, qexpr(vec![num(2), num(3)]));
}

#[test]
fn variadic_tail_defaults_to_empty_list() {
    let root = root_env();
    let rest = eval(
        &root,
        sexpr(vec![
            sym("\\"),
            qexpr(vec![sym("x"), sym("&"), sym("xs")]),
            qexpr(vec![sym("xs")]),
        ]),
    );

    let result = eval(&root, sexpr(vec![rest, num(1)]));
    assert_eq!(result, qexpr(vec![]));
}

#[test]
fn malformed_variadic_is_an_error() {
    let root = root_env();
    // (\ {x & y z} {x}) - '&' must be followed by exactly one symbol
    let bad = eval(
        &root,
        sexpr(vec![
            sym("\\"),
            qexpr(vec![sym("x"), sym("&"), sym("y"), sym("z")]),
            qexpr(vec![sym("x")]),
        ]),
    );
    assert_eq!(
        eval(&root, sexpr(vec![bad, num(1), num(2)])),
        Value::Error(
            "Function format invalid. Symbol '&' not followed by single symbol.".to_string()
        )
    );
}

#[test]
fn named_functions_can_recurse() {
    let root = root_env();
    // def {count} (\ {n} {if (== n 0) {0} {count (- n 1)}})
    eval(
        &root,
        sexpr(vec![
            sym("def"),
            qexpr(vec![sym("count")]),
            sexpr(vec![
                sym("\\"),
                qexpr(vec![sym("n")]),
                qexpr(vec![
                    sym("if"),
                    sexpr(vec![sym("=="), sym("n"), num(0)]),
                    qexpr(vec![num(0)]),
                    qexpr(vec![sym("count"), sexpr(vec![sym("-"), sym("n"), num(1)])]),
                ]),
            ]),
        ]),
    );

    assert_eq!(eval(&root, sexpr(vec![sym("count"), num(4)])), num(0));
}

#[test]
fn local_assignment_does_not_escape_the_closure() {
    let root = root_env();
    eval(
        &root,
        sexpr(vec![sym("def"), qexpr(vec![sym("x")]), num(1)]),
    );
    // def {shadow} (\ {y} {= {x} y})
    eval(
        &root,
        sexpr(vec![
            sym("def"),
            qexpr(vec![sym("shadow")]),
            sexpr(vec![
                sym("\\"),
                qexpr(vec![sym("y")]),
                qexpr(vec![sym("="), qexpr(vec![sym("x")]), sym("y")]),
            ]),
        ]),
    );

    eval(&root, sexpr(vec![sym("shadow"), num(2)]));
    assert_eq!(eval(&root, sym("x")), num(1));
}

#[test]
fn def_inside_a_closure_escapes_to_the_root() {
    let root = root_env();
    // def {publish} (\ {v} {def {y} v})
    eval(
        &root,
        sexpr(vec![
            sym("def"),
            qexpr(vec![sym("publish")]),
            sexpr(vec![
                sym("\\"),
                qexpr(vec![sym("v")]),
                qexpr(vec![sym("def"), qexpr(vec![sym("y")]), sym("v")]),
            ]),
        ]),
    );

    eval(&root, sexpr(vec![sym("publish"), num(9)]));
    assert_eq!(eval(&root, sym("y")), num(9));
}

#[test]
fn def_binds_multiple_symbols_at_once() {
    let root = root_env();
    let result = eval(
        &root,
        sexpr(vec![
            sym("def"),
            qexpr(vec![sym("a"), sym("b")]),
            num(1),
            num(2),
        ]),
    );
    assert_eq!(result, Value::Sexpr(vec![]));
    assert_eq!(eval(&root, sym("a")), num(1));
    assert_eq!(eval(&root, sym("b")), num(2));
}

#[test]
fn def_rejects_mismatched_counts() {
    let root = root_env();
    let result = eval(
        &root,
        sexpr(vec![sym("def"), qexpr(vec![sym("a"), sym("b")]), num(1)]),
    );
    assert_eq!(
        result,
        Value::Error(
            "Function 'def' passed too many arguments for symbols. Got 2, Expected 1.".to_string()
        )
    );
}

#[test]
fn lambda_formals_must_be_symbols() {
    let root = root_env();
    let result = eval(
        &root,
        sexpr(vec![
            sym("\\"),
            qexpr(vec![num(1)]),
            qexpr(vec![sym("x")]),
        ]),
    );
    assert_eq!(
        result,
        Value::Error("Cannot define non-symbol. Got Number, Expected Symbol.".to_string())
    );
}
