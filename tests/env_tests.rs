use rusp::interpreter::{Env, Value, bind_global};

fn num(value: i64) -> Value {
    Value::Number(value)
}

#[test]
fn bind_and_lookup() {
    let mut env = Env::new();
    env.bind_local("x", num(1));
    assert_eq!(env.lookup("x"), num(1));
}

#[test]
fn lookup_miss_is_an_error_value() {
    let env = Env::new();
    assert_eq!(
        env.lookup("missing"),
        Value::Error("Unbound symbol 'missing'".to_string())
    );
}

#[test]
fn rebinding_overwrites_in_place() {
    let mut env = Env::new();
    env.bind_local("a", num(1));
    env.bind_local("b", num(2));
    env.bind_local("a", num(3));

    assert_eq!(env.lookup("a"), num(3));
    // The overwritten entry keeps its original position
    assert_eq!(env.list_names(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn list_names_preserves_insertion_order() {
    let mut env = Env::new();
    env.bind_local("first", num(1));
    env.bind_local("second", num(2));
    env.bind_local("third", num(3));

    assert_eq!(
        env.list_names(),
        vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string()
        ]
    );
}

#[test]
fn lookup_falls_back_to_parent() {
    let mut parent = Env::new();
    parent.bind_local("x", num(1));
    let parent = parent.into_ref();

    let mut child = Env::new();
    child.set_parent(parent);
    assert_eq!(child.lookup("x"), num(1));
}

#[test]
fn local_binding_shadows_parent() {
    let mut parent = Env::new();
    parent.bind_local("x", num(1));
    let parent = parent.into_ref();

    let mut child = Env::new();
    child.set_parent(parent);
    child.bind_local("x", num(2));
    assert_eq!(child.lookup("x"), num(2));
}

#[test]
fn bind_global_walks_to_the_root() {
    let root = Env::new().into_ref();

    let mut middle = Env::new();
    middle.set_parent(root.clone());
    let middle = middle.into_ref();

    let mut leaf = Env::new();
    leaf.set_parent(middle.clone());
    let leaf = leaf.into_ref();

    bind_global(&leaf, "x", num(7));

    assert_eq!(root.borrow().lookup("x"), num(7));
    // Only the root table holds the entry
    assert!(middle.borrow().list_names().is_empty());
    assert!(leaf.borrow().list_names().is_empty());
    // But the whole chain can see it
    assert_eq!(leaf.borrow().lookup("x"), num(7));
}

#[test]
fn clone_copies_entries_but_shares_the_parent() {
    let mut parent = Env::new();
    parent.bind_local("shared", num(1));
    let parent = parent.into_ref();

    let mut original = Env::new();
    original.set_parent(parent.clone());
    original.bind_local("x", num(1));

    let mut copy = original.clone();
    copy.bind_local("x", num(2));

    // The copy's entries are independent
    assert_eq!(original.lookup("x"), num(1));
    assert_eq!(copy.lookup("x"), num(2));

    // The parent is the same environment, not a duplicate
    parent.borrow_mut().bind_local("shared", num(9));
    assert_eq!(original.lookup("shared"), num(9));
    assert_eq!(copy.lookup("shared"), num(9));
}

#[test]
fn lookup_returns_a_copy() {
    let mut env = Env::new();
    env.bind_local("xs", Value::Qexpr(vec![num(1)]));

    let first = env.lookup("xs");
    env.bind_local("xs", Value::Qexpr(vec![num(2)]));

    // The earlier copy is unaffected by the rebinding
    assert_eq!(first, Value::Qexpr(vec![num(1)]));
}
