// Tests for the pipe port primitives
#![cfg(unix)]

use crate::*;

#[test]
fn test_popen_read() {
    let mut ctx = SchemeContext::new();
    let port = ctx
        .call(
            "posix-popen",
            &[Value::string("printf 'hi\\nthere\\n'"), Value::string("r")],
        )
        .unwrap();
    assert!(port.has_tag(ctx.input_port_type()));
    assert_eq!(
        ctx.call("read-line", &[port.clone()]).unwrap(),
        Value::string("hi")
    );
    assert_eq!(
        ctx.call("read-line", &[port.clone()]).unwrap(),
        Value::string("there")
    );
    assert_eq!(
        ctx.call("read-line", &[port.clone()]).unwrap(),
        Value::boolean(false)
    );
    assert_eq!(
        ctx.call("posix-pclose", &[port]).unwrap(),
        Value::integer(0)
    );
}

#[test]
fn test_popen_feeds_replace() {
    let mut ctx = SchemeContext::new();
    let port = ctx
        .call("posix-popen", &[Value::string("echo a-b-c"), Value::string("r")])
        .unwrap();
    let line = ctx.call("read-line", &[port.clone()]).unwrap();
    let out = ctx
        .call(
            "regexp-replace*",
            &[Value::string("-"), line, Value::string("+")],
        )
        .unwrap();
    assert_eq!(out, Value::string("a+b+c"));
    ctx.call("posix-pclose", &[port]).unwrap();
}

#[test]
fn test_popen_write_and_exit_status() {
    let mut ctx = SchemeContext::new();
    let port = ctx
        .call(
            "posix-popen",
            &[Value::string("grep -q needle; exit $?"), Value::string("w")],
        )
        .unwrap();
    assert!(port.has_tag(ctx.output_port_type()));
    ctx.call(
        "write-string",
        &[Value::string("hay\nneedle\n"), port.clone()],
    )
    .unwrap();
    assert_eq!(
        ctx.call("posix-pclose", &[port]).unwrap(),
        Value::integer(0)
    );

    let port = ctx
        .call("posix-popen", &[Value::string("exit 3"), Value::string("r")])
        .unwrap();
    assert_eq!(
        ctx.call("posix-pclose", &[port]).unwrap(),
        Value::integer(3)
    );
}

#[test]
fn test_pclose_twice() {
    let mut ctx = SchemeContext::new();
    let port = ctx
        .call("posix-popen", &[Value::string("true"), Value::string("r")])
        .unwrap();
    ctx.call("posix-pclose", &[port.clone()]).unwrap();
    let err = ctx.call("posix-pclose", &[port]).unwrap_err();
    assert!(matches!(err, ReError::Io(_)));
}

#[test]
fn test_popen_bad_arguments() {
    let mut ctx = SchemeContext::new();
    let err = ctx
        .call("posix-popen", &[Value::string("true"), Value::string("x")])
        .unwrap_err();
    assert_eq!(
        err,
        ReError::Argument("posix-popen: wrong type".to_string())
    );

    let err = ctx
        .call("posix-popen", &[Value::string("true")])
        .unwrap_err();
    assert_eq!(
        err,
        ReError::Argument("posix-popen: wrong number of arguments".to_string())
    );

    let err = ctx
        .call("posix-pclose", &[Value::string("not a port")])
        .unwrap_err();
    assert_eq!(
        err,
        ReError::Argument("posix-pclose: first arg must be a port".to_string())
    );
}

#[test]
fn test_read_from_output_port_rejected() {
    let mut ctx = SchemeContext::new();
    let port = ctx
        .call("posix-popen", &[Value::string("cat >/dev/null"), Value::string("w")])
        .unwrap();
    let err = ctx.call("read-line", &[port.clone()]).unwrap_err();
    assert_eq!(
        err,
        ReError::Argument("read-line: first arg must be an input port".to_string())
    );
    ctx.call("posix-pclose", &[port]).unwrap();
}
