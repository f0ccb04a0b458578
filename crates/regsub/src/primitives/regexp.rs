// Regexp primitives
//
// Every pattern argument accepts either a handle made by `regexp` or a raw
// pattern string, which is compiled for the one call and dropped after it.

use std::rc::Rc;

use crate::lib_registry::{LibraryModule, check_arity, integer_arg, string_arg, type_error};
use crate::re_error::{ReError, ReResult};
use crate::regexp::{Matcher, Regexp};
use crate::scheme_context::SchemeContext;
use crate::scheme_value::Value;
use crate::substitute::{ReplaceCount, ReplacementPolicy, replace_with};

pub fn create_regexp_lib() -> LibraryModule {
    crate::lib_module!("regexp", {
        "regexp?" => regexp_p,
        "regexp" => regexp,
        "regexp-compile" => regexp_compile,
        "regexp-match?" => regexp_match_p,
        "regexp-match" => regexp_match,
        "regexp-replace" => regexp_replace,
        "regexp-replace*" => regexp_replace_star,
        "regexp-replace-n" => regexp_replace_n,
        "regexp-replace-range" => regexp_replace_range,
    })
}

/// Resolve argument `index` to a compiled pattern.
fn pattern_arg(
    ctx: &SchemeContext,
    func_name: &str,
    args: &[Value],
    index: usize,
) -> ReResult<Rc<Regexp>> {
    match args.get(index) {
        Some(Value::String(source)) => Ok(Rc::new(Regexp::from_bytes(source)?)),
        Some(Value::Object(obj)) => obj
            .downcast::<Regexp>(ctx.regexp_type())
            .ok_or_else(|| type_error(func_name, index, "string or regexp")),
        _ => Err(type_error(func_name, index, "string or regexp")),
    }
}

/// (regexp? obj) => boolean
fn regexp_p(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    check_arity("regexp?", args, 1, 1)?;
    Ok(Value::boolean(args[0].has_tag(ctx.regexp_type())))
}

/// (regexp source) => regexp
fn regexp(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    compile_primitive(ctx, "regexp", args)
}

/// (regexp-compile source) => regexp
fn regexp_compile(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    compile_primitive(ctx, "regexp-compile", args)
}

fn compile_primitive(ctx: &SchemeContext, func_name: &str, args: &[Value]) -> ReResult<Value> {
    check_arity(func_name, args, 1, 1)?;
    let source = string_arg(func_name, args, 0)?;
    let re = Regexp::from_bytes(source)?;
    Ok(Value::object(ctx.regexp_type().clone(), re))
}

/// (regexp-match? re target) => boolean
fn regexp_match_p(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    check_arity("regexp-match?", args, 2, 2)?;
    let re = pattern_arg(ctx, "regexp-match?", args, 0)?;
    let target = string_arg("regexp-match?", args, 1)?;
    Ok(Value::boolean(re.is_match(target)))
}

/// (regexp-match re target) => byte offset of the match, or #f
fn regexp_match(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    check_arity("regexp-match", args, 2, 2)?;
    let re = pattern_arg(ctx, "regexp-match", args, 0)?;
    let target = string_arg("regexp-match", args, 1)?;
    match re.try_match(target).and_then(|m| m.whole()) {
        Some(span) => Ok(Value::integer(span.start as i64)),
        None => Ok(Value::boolean(false)),
    }
}

/// Shared tail of the replace primitives: read re/target/template, run the driver.
fn replace_primitive(
    ctx: &SchemeContext,
    func_name: &str,
    args: &[Value],
    policy: ReplacementPolicy,
) -> ReResult<Value> {
    let re = pattern_arg(ctx, func_name, args, 0)?;
    let target = string_arg(func_name, args, 1)?;
    let template = string_arg(func_name, args, 2)?;
    let replaced = replace_with(&*re, target, template, policy, ctx.option())
        .map_err(|e| match e {
            ReError::Argument(msg) => ReError::argument(func_name, msg),
            other => other,
        })?;
    Ok(Value::string(replaced.output))
}

/// (regexp-replace re target template [count-or-all]) => string
///
/// Without the fourth argument only the first match is replaced. An integer
/// replaces that many leading matches; `#t` replaces all, `#f` only the first.
fn regexp_replace(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "regexp-replace";
    check_arity(NAME, args, 3, 4)?;
    let policy: ReplacementPolicy = match args.get(3) {
        None => ReplacementPolicy::First,
        Some(Value::Boolean(all)) => ReplaceCount::from(*all).into(),
        Some(Value::Integer(n)) => ReplaceCount::Count(non_negative(NAME, 3, *n)?).into(),
        Some(_) => return Err(type_error(NAME, 3, "integer or boolean")),
    };
    replace_primitive(ctx, NAME, args, policy)
}

/// (regexp-replace* re target template) => string
fn regexp_replace_star(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    check_arity("regexp-replace*", args, 3, 3)?;
    replace_primitive(ctx, "regexp-replace*", args, ReplacementPolicy::All)
}

/// (regexp-replace-n re target template n) => string
fn regexp_replace_n(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "regexp-replace-n";
    check_arity(NAME, args, 4, 4)?;
    let n = non_negative(NAME, 3, integer_arg(NAME, args, 3)?)?;
    replace_primitive(ctx, NAME, args, ReplacementPolicy::FirstN(n))
}

/// (regexp-replace-range re target template m n) => string
///
/// Replaces matches m through n, counting from 1. A negative n runs to the
/// last match.
fn regexp_replace_range(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "regexp-replace-range";
    check_arity(NAME, args, 5, 5)?;
    let m = integer_arg(NAME, args, 3)?;
    let n = integer_arg(NAME, args, 4)?;
    let policy = range_policy(m, n).ok_or_else(|| ReError::argument(NAME, "range invalid"))?;
    replace_primitive(ctx, NAME, args, policy)
}

fn range_policy(m: i64, n: i64) -> Option<ReplacementPolicy> {
    let start = usize::try_from(m).ok().filter(|&m| m >= 1)?;
    let end = if n < 0 {
        None
    } else {
        let end = usize::try_from(n).ok().filter(|&n| n >= 1 && start <= n)?;
        Some(end)
    };
    Some(ReplacementPolicy::Range { start, end })
}

fn non_negative(func_name: &str, index: usize, n: i64) -> ReResult<usize> {
    usize::try_from(n).map_err(|_| type_error(func_name, index, "non-negative integer"))
}
