// Tests for primitive registration and the context
use crate::lib_registry::{LibraryModule, create_standard_registry};
use crate::*;

fn answer(_ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    Ok(Value::integer(args.len() as i64))
}

#[test]
fn test_standard_globals() {
    let ctx = SchemeContext::new();
    let names = ctx.global_names();
    for name in [
        "regexp?",
        "regexp",
        "regexp-compile",
        "regexp-match?",
        "regexp-match",
        "regexp-replace",
        "regexp-replace*",
        "regexp-replace-n",
        "regexp-replace-range",
        "posix-popen",
        "posix-pclose",
        "read-line",
        "write-string",
    ] {
        assert!(names.contains(&name), "missing {}", name);
    }
    assert_eq!(names.len(), 13);
}

#[test]
fn test_registry_modules() {
    let registry = create_standard_registry();
    assert_eq!(registry.get_module("regexp").unwrap().entries.len(), 9);
    assert_eq!(registry.get_module("posix").unwrap().entries.len(), 4);
    assert!(registry.get_module("string").is_none());
}

#[test]
fn test_bare_context_then_load() {
    let mut ctx = SchemeContext::bare(ReOption::default());
    assert!(ctx.global_names().is_empty());
    assert!(ctx.call("regexp?", &[Value::integer(1)]).is_err());

    let mut registry = LibraryRegistry::new();
    registry.register(LibraryModule::new("extra").with_function("answer", answer));
    ctx.load(&registry);
    assert_eq!(
        ctx.call("answer", &[Value::Unspecified, Value::Unspecified]).unwrap(),
        Value::integer(2)
    );
}

#[test]
fn test_type_tags_are_distinct() {
    let mut ctx = SchemeContext::new();
    let custom = ctx.make_type("<custom>");
    assert_ne!(&custom, ctx.regexp_type());
    assert_ne!(ctx.input_port_type(), ctx.output_port_type());
    assert_eq!(custom.name(), "<custom>");

    // Built-in tags and later ones come from the same counter
    let ids = [
        ctx.regexp_type().id(),
        ctx.input_port_type().id(),
        ctx.output_port_type().id(),
        custom.id(),
    ];
    assert_eq!(ids, [0, 1, 2, 3]);

    let re = ctx.call("regexp", &[Value::string("x")]).unwrap();
    assert!(re.has_tag(ctx.regexp_type()));
    assert_eq!(re.to_string(), "#<regexp>");
}

#[test]
fn test_call_unknown_global() {
    let mut ctx = SchemeContext::new();
    let err = ctx.call("no-such-thing", &[]).unwrap_err();
    assert_eq!(
        err,
        ReError::Argument("no-such-thing: not a primitive".to_string())
    );
}
