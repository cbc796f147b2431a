//! The fixed catalogue of native operations.
//!
//! Every builtin validates its argument list before acting; a violated
//! precondition consumes the arguments and produces a descriptive error
//! value instead of performing any side effect.

use std::fs;
use std::process;

use crate::lexer::Token;
use crate::parser::{self, ParseState};
use crate::reader;

use super::env::{EnvRef, bind_global};
use super::eval::eval;
use super::value::{Lambda, Value};

/// Precondition guard: evaluates to an error value when the condition does
/// not hold.
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            return Value::Error(format!($($arg)+));
        }
    };
}

/// Builtin function identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    List,
    Head,
    Tail,
    Init,
    Len,
    Join,
    Cons,
    Eval,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Not,
    If,
    Def,
    Put,
    Lambda,
    Load,
    Print,
    Error,
    Env,
    Exit,
}

/// Builtin table: name to native operation, installed into the root
/// environment at startup.
pub const BUILTINS: &[(&str, Builtin)] = &[
    // String functions
    ("load", Builtin::Load),
    ("print", Builtin::Print),
    ("error", Builtin::Error),
    // List functions
    ("list", Builtin::List),
    ("head", Builtin::Head),
    ("tail", Builtin::Tail),
    ("eval", Builtin::Eval),
    ("join", Builtin::Join),
    ("len", Builtin::Len),
    ("cons", Builtin::Cons),
    ("init", Builtin::Init),
    // Control flow functions
    ("<", Builtin::Lt),
    ("<=", Builtin::Le),
    (">", Builtin::Gt),
    (">=", Builtin::Ge),
    ("==", Builtin::Eq),
    ("!=", Builtin::Ne),
    ("if", Builtin::If),
    ("||", Builtin::Or),
    ("&&", Builtin::And),
    ("!", Builtin::Not),
    // Mathematical functions
    ("+", Builtin::Add),
    ("-", Builtin::Sub),
    ("*", Builtin::Mul),
    ("/", Builtin::Div),
    ("%", Builtin::Mod),
    // Variable functions
    ("def", Builtin::Def),
    ("=", Builtin::Put),
    ("\\", Builtin::Lambda),
    // Environment functions
    ("env", Builtin::Env),
    ("exit", Builtin::Exit),
];

/// Install the whole catalogue into an environment.
pub fn register(env: &mut super::env::Env) {
    for (name, builtin) in BUILTINS {
        env.bind_local(name, Value::Builtin(*builtin));
    }
}

impl Builtin {
    /// The name this builtin is registered under.
    pub fn name(self) -> &'static str {
        BUILTINS
            .iter()
            .find(|(_, builtin)| *builtin == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }

    /// Invoke the native operation. The builtin owns `args` and is fully
    /// responsible for validating and consuming it.
    pub fn dispatch(self, env: &EnvRef, args: Vec<Value>) -> Value {
        match self {
            Builtin::List => builtin_list(args),
            Builtin::Head => builtin_head(args),
            Builtin::Tail => builtin_tail(args),
            Builtin::Init => builtin_init(args),
            Builtin::Len => builtin_len(args),
            Builtin::Join => builtin_join(args),
            Builtin::Cons => builtin_cons(args),
            Builtin::Eval => builtin_eval(env, args),
            Builtin::Add => builtin_op(args, "+"),
            Builtin::Sub => builtin_op(args, "-"),
            Builtin::Mul => builtin_op(args, "*"),
            Builtin::Div => builtin_op(args, "/"),
            Builtin::Mod => builtin_op(args, "%"),
            Builtin::Lt => builtin_ord(args, "<"),
            Builtin::Le => builtin_ord(args, "<="),
            Builtin::Gt => builtin_ord(args, ">"),
            Builtin::Ge => builtin_ord(args, ">="),
            Builtin::Eq => builtin_cmp(args, "=="),
            Builtin::Ne => builtin_cmp(args, "!="),
            Builtin::And => builtin_and(args),
            Builtin::Or => builtin_or(args),
            Builtin::Not => builtin_not(args),
            Builtin::If => builtin_if(env, args),
            Builtin::Def => builtin_var(env, args, "def"),
            Builtin::Put => builtin_var(env, args, "="),
            Builtin::Lambda => builtin_lambda(args),
            Builtin::Load => builtin_load(env, args),
            Builtin::Print => builtin_print(args),
            Builtin::Error => builtin_error(args),
            Builtin::Env => builtin_env(env, args),
            Builtin::Exit => process::exit(0),
        }
    }
}

fn type_error(func: &str, index: usize, got: &str, want: &str) -> Value {
    Value::Error(format!(
        "Function '{func}' passed incorrect type for argument {index}. Got {got}, Expected {want}."
    ))
}

// === List functions ===

fn builtin_list(args: Vec<Value>) -> Value {
    Value::Qexpr(args)
}

fn builtin_head(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'head' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match args.remove(0) {
        Value::Qexpr(mut children) => {
            ensure!(!children.is_empty(), "Function 'head' passed {{}} for argument 0.");
            children.truncate(1);
            Value::Qexpr(children)
        }
        other => type_error("head", 0, other.type_name(), "Q-Expression"),
    }
}

fn builtin_tail(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'tail' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match args.remove(0) {
        Value::Qexpr(mut children) => {
            ensure!(!children.is_empty(), "Function 'tail' passed {{}} for argument 0.");
            children.remove(0);
            Value::Qexpr(children)
        }
        other => type_error("tail", 0, other.type_name(), "Q-Expression"),
    }
}

fn builtin_init(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'init' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match args.remove(0) {
        Value::Qexpr(mut children) => {
            ensure!(!children.is_empty(), "Function 'init' passed {{}} for argument 0.");
            children.pop();
            Value::Qexpr(children)
        }
        other => type_error("init", 0, other.type_name(), "Q-Expression"),
    }
}

fn builtin_len(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'len' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match args.remove(0) {
        Value::Qexpr(children) => Value::Number(children.len() as i64),
        other => type_error("len", 0, other.type_name(), "Q-Expression"),
    }
}

fn builtin_join(mut args: Vec<Value>) -> Value {
    ensure!(
        !args.is_empty(),
        "Function 'join' passed incorrect number of arguments. Got 0, Expected 1."
    );

    // All arguments must be strings or Q-expressions, and all the same type.
    let first_type = args[0].type_name();
    for arg in &args {
        match arg {
            Value::Qexpr(_) | Value::String(_) => {}
            other => {
                return Value::Error(format!(
                    "'join' needs a string or a Q-expression. Got {}.",
                    other.type_name()
                ));
            }
        }
        ensure!(
            arg.type_name() == first_type,
            "'join' needs all args to be the same type. Got {} and {}.",
            first_type,
            arg.type_name()
        );
    }

    match args.remove(0) {
        Value::String(mut joined) => {
            for arg in args {
                if let Value::String(text) = arg {
                    joined.push_str(&text);
                }
            }
            Value::String(joined)
        }
        Value::Qexpr(mut joined) => {
            for arg in args {
                if let Value::Qexpr(children) = arg {
                    joined.extend(children);
                }
            }
            Value::Qexpr(joined)
        }
        other => Value::Error(format!(
            "'join' needs a string or a Q-expression. Got {}.",
            other.type_name()
        )),
    }
}

fn builtin_cons(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 2,
        "Function 'cons' passed incorrect number of arguments. Got {}, Expected 2.",
        args.len()
    );
    let front = match args.remove(0) {
        front @ Value::Number(_) => front,
        other => return type_error("cons", 0, other.type_name(), "Number"),
    };
    match args.remove(0) {
        Value::Qexpr(mut children) => {
            children.insert(0, front);
            Value::Qexpr(children)
        }
        other => type_error("cons", 1, other.type_name(), "Q-Expression"),
    }
}

fn builtin_eval(env: &EnvRef, mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'eval' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match args.remove(0) {
        Value::Qexpr(children) => eval(env, Value::Sexpr(children)),
        other => type_error("eval", 0, other.type_name(), "Q-Expression"),
    }
}

// === Arithmetic ===

fn builtin_op(args: Vec<Value>, op: &str) -> Value {
    for arg in &args {
        ensure!(
            matches!(arg, Value::Number(_)),
            "Cannot operate on a non-number! Got a {}.",
            arg.type_name()
        );
    }
    ensure!(
        !args.is_empty(),
        "Function '{op}' passed incorrect number of arguments. Got 0, Expected 1."
    );

    let mut numbers = args.into_iter().filter_map(|arg| match arg {
        Value::Number(number) => Some(number),
        _ => None,
    });
    let mut acc = match numbers.next() {
        Some(first) => first,
        None => return Value::empty(),
    };

    // Unary negation
    let mut rest = numbers.peekable();
    if op == "-" && rest.peek().is_none() {
        return Value::Number(acc.wrapping_neg());
    }

    for number in rest {
        acc = match op {
            "+" => acc.wrapping_add(number),
            "-" => acc.wrapping_sub(number),
            "*" => acc.wrapping_mul(number),
            "/" => {
                if number == 0 {
                    return Value::Error("Division By Zero!".to_string());
                }
                acc.wrapping_div(number)
            }
            "%" => {
                if number == 0 {
                    return Value::Error("Division By Zero!".to_string());
                }
                acc.wrapping_rem(number)
            }
            _ => acc,
        };
    }

    Value::Number(acc)
}

// === Ordering and equality ===

fn builtin_ord(args: Vec<Value>, op: &str) -> Value {
    ensure!(
        args.len() == 2,
        "Function '{op}' passed incorrect number of arguments. Got {}, Expected 2.",
        args.len()
    );
    let left = match &args[0] {
        Value::Number(number) => *number,
        other => return type_error(op, 0, other.type_name(), "Number"),
    };
    let right = match &args[1] {
        Value::Number(number) => *number,
        other => return type_error(op, 1, other.type_name(), "Number"),
    };

    let truth = match op {
        "<" => left < right,
        "<=" => left <= right,
        ">" => left > right,
        ">=" => left >= right,
        _ => false,
    };
    Value::Boolean(truth)
}

fn builtin_cmp(args: Vec<Value>, op: &str) -> Value {
    ensure!(
        args.len() == 2,
        "Function '{op}' passed incorrect number of arguments. Got {}, Expected 2.",
        args.len()
    );
    let equal = args[0] == args[1];
    Value::Boolean(if op == "!=" { !equal } else { equal })
}

// === Logic ===
//
// These operate on Numbers with a 0/1 encoding rather than on Booleans;
// `if` below takes a real Boolean condition.

fn builtin_and(args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 2,
        "Function '&&' passed incorrect number of arguments. Got {}, Expected 2.",
        args.len()
    );
    let left = match &args[0] {
        Value::Number(number) => *number,
        other => return type_error("&&", 0, other.type_name(), "Number"),
    };
    let right = match &args[1] {
        Value::Number(number) => *number,
        other => return type_error("&&", 1, other.type_name(), "Number"),
    };
    Value::Boolean(left == 1 && right == 1)
}

fn builtin_or(args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 2,
        "Function '||' passed incorrect number of arguments. Got {}, Expected 2.",
        args.len()
    );
    let left = match &args[0] {
        Value::Number(number) => *number,
        other => return type_error("||", 0, other.type_name(), "Number"),
    };
    let right = match &args[1] {
        Value::Number(number) => *number,
        other => return type_error("||", 1, other.type_name(), "Number"),
    };
    Value::Boolean(left == 1 || right == 1)
}

fn builtin_not(args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function '!' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match &args[0] {
        Value::Number(number) => Value::Boolean(*number == 0),
        other => type_error("!", 0, other.type_name(), "Number"),
    }
}

// === Control flow ===

fn builtin_if(env: &EnvRef, args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 3,
        "Function 'if' passed incorrect number of arguments. Got {}, Expected 3.",
        args.len()
    );
    let mut args = args.into_iter();
    let truth = match args.next() {
        Some(Value::Boolean(truth)) => truth,
        Some(other) => return type_error("if", 0, other.type_name(), "Boolean"),
        None => return Value::empty(),
    };
    let consequent = match args.next() {
        Some(Value::Qexpr(children)) => children,
        Some(other) => return type_error("if", 1, other.type_name(), "Q-Expression"),
        None => return Value::empty(),
    };
    let alternative = match args.next() {
        Some(Value::Qexpr(children)) => children,
        Some(other) => return type_error("if", 2, other.type_name(), "Q-Expression"),
        None => return Value::empty(),
    };

    // Only the taken branch is ever evaluated.
    let branch = if truth { consequent } else { alternative };
    eval(env, Value::Sexpr(branch))
}

// === Variable functions ===

fn builtin_var(env: &EnvRef, mut args: Vec<Value>, func: &str) -> Value {
    ensure!(
        !args.is_empty(),
        "Function '{func}' passed incorrect number of arguments. Got 0, Expected 1."
    );
    let symbols = match args.remove(0) {
        Value::Qexpr(children) => children,
        other => return type_error(func, 0, other.type_name(), "Q-Expression"),
    };

    let mut names = Vec::with_capacity(symbols.len());
    for symbol in &symbols {
        match symbol {
            Value::Symbol(name) => names.push(name.clone()),
            other => {
                return Value::Error(format!(
                    "Function '{func}' cannot define non-symbol. Got {}, Expected Symbol.",
                    other.type_name()
                ));
            }
        }
    }

    ensure!(
        names.len() == args.len(),
        "Function '{func}' passed too many arguments for symbols. Got {}, Expected {}.",
        names.len(),
        args.len()
    );

    for (name, value) in names.into_iter().zip(args) {
        // 'def' defines globally, '=' in the current environment.
        if func == "def" {
            bind_global(env, &name, value);
        } else {
            env.borrow_mut().bind_local(&name, value);
        }
    }

    Value::empty()
}

fn builtin_lambda(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 2,
        "Function '\\' passed incorrect number of arguments. Got {}, Expected 2.",
        args.len()
    );
    let formals = match args.remove(0) {
        Value::Qexpr(children) => children,
        other => return type_error("\\", 0, other.type_name(), "Q-Expression"),
    };
    let body = match args.remove(0) {
        Value::Qexpr(children) => children,
        other => return type_error("\\", 1, other.type_name(), "Q-Expression"),
    };

    let mut names = Vec::with_capacity(formals.len());
    for formal in &formals {
        match formal {
            Value::Symbol(name) => names.push(name.clone()),
            other => {
                return Value::Error(format!(
                    "Cannot define non-symbol. Got {}, Expected Symbol.",
                    other.type_name()
                ));
            }
        }
    }

    Value::Lambda(Box::new(Lambda::new(names, Value::Qexpr(body))))
}

// === I/O and module loading ===

fn builtin_load(env: &EnvRef, mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'load' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    let filename = match args.remove(0) {
        Value::String(filename) => filename,
        other => return type_error("load", 0, other.type_name(), "String"),
    };

    let source = match fs::read_to_string(&filename) {
        Ok(source) => source,
        Err(error) => {
            return Value::Error(format!("Could not load Library {filename}. {error}"));
        }
    };
    let tokens = match Token::lex(&source) {
        Ok(tokens) => tokens,
        Err(error) => {
            return Value::Error(format!("Could not load Library {filename}. {error}"));
        }
    };
    let mut state = ParseState::new(tokens);
    let nodes = match parser::parse(&mut state) {
        Ok(nodes) => nodes,
        Err(error) => {
            return Value::Error(format!("Could not load Library {filename}. {error}"));
        }
    };

    // Evaluate every top-level expression in the caller's environment; an
    // error in one expression is printed, not propagated, and the rest
    // still run.
    for value in reader::read_program(nodes) {
        let result = eval(env, value);
        if matches!(result, Value::Error(_)) {
            println!("{result}");
        }
    }

    Value::empty()
}

fn builtin_print(args: Vec<Value>) -> Value {
    let rendered: Vec<String> = args.iter().map(Value::to_string).collect();
    println!("{}", rendered.join(" "));
    Value::empty()
}

fn builtin_error(mut args: Vec<Value>) -> Value {
    ensure!(
        args.len() == 1,
        "Function 'error' passed incorrect number of arguments. Got {}, Expected 1.",
        args.len()
    );
    match args.remove(0) {
        Value::String(message) => Value::Error(message),
        other => type_error("error", 0, other.type_name(), "String"),
    }
}

fn builtin_env(env: &EnvRef, _args: Vec<Value>) -> Value {
    let names = env.borrow().list_names();
    for name in names {
        println!("{name}");
    }
    Value::empty()
}
