mod builtins;
mod env;
mod eval;
mod value;

pub use builtins::{BUILTINS, Builtin};
pub use env::{Env, EnvRef, bind_global};
pub use eval::{call, eval};
pub use value::{Lambda, Value, escape, unescape};

/// Create the root environment with the builtin catalogue installed.
///
/// The root lives for the whole process; every closure environment ends up
/// chained to it when a saturated call executes.
pub fn root_env() -> EnvRef {
    let mut env = Env::new();
    builtins::register(&mut env);
    env.into_ref()
}
