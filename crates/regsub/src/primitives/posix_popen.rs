// Pipe ports
//
// (posix-popen command mode) runs `command` through `/bin/sh -c` and returns
// an input port reading its stdout (mode "r") or an output port writing its
// stdin (mode "w"). (posix-pclose port) closes the pipe, waits for the child
// and returns its exit status.

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::rc::Rc;

use log::debug;
use smol_str::SmolStr;

use crate::lib_registry::{LibraryModule, check_arity, string_arg, type_error};
use crate::re_error::{ReError, ReResult};
use crate::scheme_context::SchemeContext;
use crate::scheme_value::Value;

pub fn create_posix_lib() -> LibraryModule {
    crate::lib_module!("posix", {
        "posix-popen" => posix_popen,
        "posix-pclose" => posix_pclose,
        "read-line" => read_line,
        "write-string" => write_string,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeDirection {
    Read,
    Write,
}

impl PipeDirection {
    /// Mode strings follow popen(3): only the first byte matters.
    pub fn from_mode(mode: &[u8]) -> Option<Self> {
        match mode.first() {
            Some(b'r') => Some(PipeDirection::Read),
            Some(b'w') => Some(PipeDirection::Write),
            _ => None,
        }
    }
}

enum PipeInner {
    Read(BufReader<ChildStdout>),
    Write(ChildStdin),
    Closed,
}

/// One end of a pipe to a child process.
pub struct PipePort {
    command: SmolStr,
    child: Option<Child>,
    inner: PipeInner,
}

impl PipePort {
    pub fn open(command: &str, direction: PipeDirection) -> io::Result<Self> {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(command);
        match direction {
            PipeDirection::Read => cmd.stdout(Stdio::piped()),
            PipeDirection::Write => cmd.stdin(Stdio::piped()),
        };
        let mut child = cmd.spawn()?;
        let inner = match direction {
            PipeDirection::Read => child.stdout.take().map(|s| PipeInner::Read(BufReader::new(s))),
            PipeDirection::Write => child.stdin.take().map(PipeInner::Write),
        }
        .ok_or_else(|| io::Error::other("child pipe was not captured"))?;
        debug!("opened pipe {:?} ({:?})", command, direction);
        Ok(Self {
            command: SmolStr::new(command),
            child: Some(child),
            inner,
        })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.inner, PipeInner::Closed)
    }

    /// Next line without its terminator, or `None` at end of stream.
    pub fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let PipeInner::Read(reader) = &mut self.inner else {
            return Err(io::Error::other("port is not open for reading"));
        };
        let mut line = Vec::new();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        Ok(Some(line))
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let PipeInner::Write(stdin) = &mut self.inner else {
            return Err(io::Error::other("port is not open for writing"));
        };
        stdin.write_all(bytes)?;
        stdin.flush()
    }

    /// Close our end and wait for the child. Returns its exit code, or -1
    /// when it was terminated by a signal.
    pub fn close(&mut self) -> io::Result<i64> {
        if self.is_closed() {
            return Err(io::Error::other("port already closed"));
        }
        // Dropping stdin delivers EOF to a writer child
        self.inner = PipeInner::Closed;
        let Some(mut child) = self.child.take() else {
            return Err(io::Error::other("port already closed"));
        };
        let status = child.wait()?;
        debug!("closed pipe {:?} ({})", self.command, status);
        Ok(status.code().map_or(-1, i64::from))
    }
}

impl Drop for PipePort {
    fn drop(&mut self) {
        if !self.is_closed() {
            let _ = self.close();
        }
    }
}

type PortCell = RefCell<PipePort>;

fn port_arg(
    ctx: &SchemeContext,
    func_name: &str,
    args: &[Value],
    index: usize,
    direction: Option<PipeDirection>,
) -> ReResult<Rc<PortCell>> {
    let obj = args.get(index).and_then(Value::as_object);
    let port = match direction {
        Some(PipeDirection::Read) => {
            obj.and_then(|o| o.downcast::<PortCell>(ctx.input_port_type()))
        }
        Some(PipeDirection::Write) => {
            obj.and_then(|o| o.downcast::<PortCell>(ctx.output_port_type()))
        }
        None => obj.and_then(|o| {
            o.downcast::<PortCell>(ctx.input_port_type())
                .or_else(|| o.downcast::<PortCell>(ctx.output_port_type()))
        }),
    };
    let expected = match direction {
        Some(PipeDirection::Read) => "input port",
        Some(PipeDirection::Write) => "output port",
        None => "port",
    };
    port.ok_or_else(|| type_error(func_name, index, expected))
}

fn io_error(func_name: &str, e: io::Error) -> ReError {
    ReError::Io(format!("{}: {}", func_name, e))
}

/// (posix-popen command mode) => port
fn posix_popen(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "posix-popen";
    check_arity(NAME, args, 2, 2)?;
    let command = string_arg(NAME, args, 0)?;
    let mode = string_arg(NAME, args, 1)?;
    let direction =
        PipeDirection::from_mode(mode).ok_or_else(|| ReError::argument(NAME, "wrong type"))?;
    let command = String::from_utf8_lossy(command);
    let port = PipePort::open(&command, direction).map_err(|e| io_error(NAME, e))?;
    let tag = match direction {
        PipeDirection::Read => ctx.input_port_type().clone(),
        PipeDirection::Write => ctx.output_port_type().clone(),
    };
    Ok(Value::object(tag, RefCell::new(port)))
}

/// (posix-pclose port) => exit status
fn posix_pclose(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "posix-pclose";
    check_arity(NAME, args, 1, 1)?;
    let port = port_arg(ctx, NAME, args, 0, None)?;
    let status = port
        .borrow_mut()
        .close()
        .map_err(|e| io_error(NAME, e))?;
    Ok(Value::integer(status))
}

/// (read-line port) => string, or #f at end of stream
fn read_line(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "read-line";
    check_arity(NAME, args, 1, 1)?;
    let port = port_arg(ctx, NAME, args, 0, Some(PipeDirection::Read))?;
    let line = port
        .borrow_mut()
        .read_line()
        .map_err(|e| io_error(NAME, e))?;
    Ok(match line {
        Some(line) => Value::string(line),
        None => Value::boolean(false),
    })
}

/// (write-string string port)
fn write_string(ctx: &mut SchemeContext, args: &[Value]) -> ReResult<Value> {
    const NAME: &str = "write-string";
    check_arity(NAME, args, 2, 2)?;
    let text = string_arg(NAME, args, 0)?;
    let port = port_arg(ctx, NAME, args, 1, Some(PipeDirection::Write))?;
    port.borrow_mut()
        .write_all(text)
        .map_err(|e| io_error(NAME, e))?;
    Ok(Value::Unspecified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(PipeDirection::from_mode(b"r"), Some(PipeDirection::Read));
        assert_eq!(PipeDirection::from_mode(b"we"), Some(PipeDirection::Write));
        assert_eq!(PipeDirection::from_mode(b"x"), None);
        assert_eq!(PipeDirection::from_mode(b""), None);
    }
}
