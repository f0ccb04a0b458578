use log::debug;
use regsub::re_limits::OPEN_RANGE_SENTINEL;
use regsub::{ReError, SchemeContext, Value};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process;

const VERSION: &str = "regsub 0.3.0";

fn print_usage() {
    eprintln!("usage: regsub [options] PATTERN TEMPLATE [FILE...]");
    eprintln!("Available options are:");
    eprintln!("  -a        replace all matches");
    eprintln!("  -n N      replace the first N matches");
    eprintln!("  -r M N    replace matches M through N ('$' for the last match)");
    eprintln!("  -w        treat each input as one subject instead of line by line");
    eprintln!("  -v        show version information");
    eprintln!("  --        stop handling options");
    eprintln!("TEMPLATE may use & for the whole match, \\1..\\9 for groups, \\\\ and \\&.");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    First,
    All,
    FirstN(i64),
    Range(i64, i64),
}

#[derive(Debug)]
struct Options {
    mode: Mode,
    whole_input: bool,
    show_version: bool,
    pattern: Option<String>,
    template: Option<String>,
    files: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            mode: Mode::First,
            whole_input: false,
            show_version: false,
            pattern: None,
            template: None,
            files: Vec::new(),
        }
    }
}

fn parse_count(arg: Option<&String>, option: &str) -> Result<i64, String> {
    let Some(arg) = arg else {
        return Err(format!("'{}' needs argument", option));
    };
    arg.parse::<i64>()
        .map_err(|_| format!("'{}' expects an integer, got '{}'", option, arg))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut positional = Vec::new();
    let mut i = 1;
    let mut stop_options = false;

    while i < args.len() {
        let arg = &args[i];

        if !stop_options && arg.starts_with('-') && arg.len() > 1 {
            match arg.as_str() {
                "-a" => {
                    opts.mode = Mode::All;
                }
                "-n" => {
                    i += 1;
                    opts.mode = Mode::FirstN(parse_count(args.get(i), "-n")?);
                }
                "-r" => {
                    let m = parse_count(args.get(i + 1), "-r")?;
                    let n = match args.get(i + 2).map(String::as_str) {
                        Some("$") => OPEN_RANGE_SENTINEL,
                        _ => parse_count(args.get(i + 2), "-r")?,
                    };
                    opts.mode = Mode::Range(m, n);
                    i += 2;
                }
                "-w" => {
                    opts.whole_input = true;
                }
                "-v" => {
                    opts.show_version = true;
                }
                "--" => {
                    stop_options = true;
                }
                _ => {
                    return Err(format!("unrecognized option '{}'", arg));
                }
            }
        } else {
            positional.push(arg.clone());
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    opts.pattern = positional.next();
    opts.template = positional.next();
    opts.files = positional.collect();
    Ok(opts)
}

/// Run one subject through the primitive matching `mode`.
fn substitute(
    ctx: &mut SchemeContext,
    mode: Mode,
    re: &Value,
    subject: &[u8],
    template: &Value,
) -> Result<Vec<u8>, ReError> {
    let mut args = vec![re.clone(), Value::string(subject), template.clone()];
    let name = match mode {
        Mode::First => "regexp-replace",
        Mode::All => "regexp-replace*",
        Mode::FirstN(n) => {
            args.push(Value::integer(n));
            "regexp-replace-n"
        }
        Mode::Range(m, n) => {
            args.push(Value::integer(m));
            args.push(Value::integer(n));
            "regexp-replace-range"
        }
    };
    let result = ctx.call(name, &args)?;
    match result.as_bytes() {
        Some(bytes) => Ok(bytes.to_vec()),
        None => Err(ReError::Argument(format!(
            "{}: expected a string result, got {}",
            name, result
        ))),
    }
}

fn read_input(path: &str) -> Result<Vec<u8>, String> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        Ok(buf)
    } else {
        fs::read(path).map_err(|e| format!("cannot open {}: {}", path, e))
    }
}

fn process_input(
    ctx: &mut SchemeContext,
    opts: &Options,
    re: &Value,
    template: &Value,
    input: &[u8],
    out: &mut impl Write,
) -> Result<(), String> {
    let write_err = |e: io::Error| format!("cannot write output: {}", e);
    if opts.whole_input {
        let replaced = substitute(ctx, opts.mode, re, input, template).map_err(|e| e.to_string())?;
        out.write_all(&replaced).map_err(write_err)?;
        return Ok(());
    }
    for line in input.split_inclusive(|&b| b == b'\n') {
        let (body, newline) = match line.strip_suffix(b"\n") {
            Some(body) => (body, true),
            None => (line, false),
        };
        let replaced = substitute(ctx, opts.mode, re, body, template).map_err(|e| e.to_string())?;
        out.write_all(&replaced).map_err(write_err)?;
        if newline {
            out.write_all(b"\n").map_err(write_err)?;
        }
    }
    Ok(())
}

fn run(opts: &Options) -> Result<(), String> {
    let (Some(pattern), Some(template)) = (&opts.pattern, &opts.template) else {
        print_usage();
        return Err("PATTERN and TEMPLATE are required".to_string());
    };

    let mut ctx = SchemeContext::new();
    let re = ctx
        .call("regexp", &[Value::string(pattern)])
        .map_err(|e| e.to_string())?;
    let template = Value::string(template);
    debug!("mode {:?}, {} input file(s)", opts.mode, opts.files.len());

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if opts.files.is_empty() {
        let input = read_input("-")?;
        process_input(&mut ctx, opts, &re, &template, &input, &mut out)?;
    } else {
        for path in &opts.files {
            let input = read_input(path)?;
            process_input(&mut ctx, opts, &re, &template, &input, &mut out)?;
        }
    }
    out.flush().map_err(|e| format!("cannot write output: {}", e))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("regsub: {}", e);
            print_usage();
            process::exit(1);
        }
    };

    if opts.show_version {
        println!("{}", VERSION);
        if opts.pattern.is_none() {
            return;
        }
    }

    if let Err(e) = run(&opts) {
        eprintln!("regsub: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("regsub")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_modes() {
        let opts = parse_args(&args(&["-a", "x", "y"])).unwrap();
        assert_eq!(opts.mode, Mode::All);
        assert_eq!(opts.pattern.as_deref(), Some("x"));
        assert_eq!(opts.template.as_deref(), Some("y"));

        let opts = parse_args(&args(&["-n", "3", "x", "y", "a.txt"])).unwrap();
        assert_eq!(opts.mode, Mode::FirstN(3));
        assert_eq!(opts.files, vec!["a.txt".to_string()]);

        let opts = parse_args(&args(&["-r", "2", "$", "x", "y"])).unwrap();
        assert_eq!(opts.mode, Mode::Range(2, OPEN_RANGE_SENTINEL));

        let opts = parse_args(&args(&["--", "-a", "y"])).unwrap();
        assert_eq!(opts.mode, Mode::First);
        assert_eq!(opts.pattern.as_deref(), Some("-a"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["-n"])).is_err());
        assert!(parse_args(&args(&["-n", "many", "x", "y"])).is_err());
        assert!(parse_args(&args(&["-q"])).is_err());
    }

    #[test]
    fn test_process_lines() {
        let mut ctx = SchemeContext::new();
        let opts = Options {
            mode: Mode::All,
            ..Options::default()
        };
        let re = ctx.call("regexp", &[Value::string("o")]).unwrap();
        let template = Value::string("0");
        let mut out = Vec::new();
        process_input(&mut ctx, &opts, &re, &template, b"foo\nbar\nboo", &mut out).unwrap();
        assert_eq!(out, b"f00\nbar\nb00");
    }

    #[test]
    fn test_process_first_per_line_vs_whole() {
        let mut ctx = SchemeContext::new();
        let re = ctx.call("regexp", &[Value::string("o")]).unwrap();
        let template = Value::string("0");

        let mut out = Vec::new();
        let per_line = Options::default();
        process_input(&mut ctx, &per_line, &re, &template, b"foo\nboo\n", &mut out).unwrap();
        assert_eq!(out, b"f0o\nb0o\n");

        let mut out = Vec::new();
        let whole = Options {
            whole_input: true,
            ..Options::default()
        };
        process_input(&mut ctx, &whole, &re, &template, b"foo\nboo\n", &mut out).unwrap();
        assert_eq!(out, b"f0o\nboo\n");
    }

    #[test]
    fn test_invalid_range_reported() {
        let mut ctx = SchemeContext::new();
        let re = ctx.call("regexp", &[Value::string("o")]).unwrap();
        let err = substitute(
            &mut ctx,
            Mode::Range(3, 1),
            &re,
            b"ooo",
            &Value::string("0"),
        )
        .unwrap_err();
        assert!(matches!(err, ReError::Argument(_)));
    }

    #[test]
    fn test_non_string_result_is_error() {
        fn always_seven(_ctx: &mut SchemeContext, _args: &[Value]) -> regsub::ReResult<Value> {
            Ok(Value::integer(7))
        }
        let mut ctx = SchemeContext::new();
        ctx.add_global("regexp-replace*", Value::Primitive(always_seven));
        let err = substitute(
            &mut ctx,
            Mode::All,
            &Value::string("o"),
            b"foo",
            &Value::string("0"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReError::Argument("regexp-replace*: expected a string result, got 7".to_string())
        );
    }
}
