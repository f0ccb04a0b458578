/// Errors raised by the substitution engine and the primitives around it.
///
/// A no-match outcome is never an error; it yields the subject unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReError {
    /// Wrong arity, wrong type or out-of-range argument at a primitive boundary
    Argument(String),
    /// Pattern source could not be compiled
    PatternCompile(String),
    /// Matcher reported capture offsets that cannot describe the subject
    MalformedMatch(String),
    /// Output buffer could not grow to the requested size
    OutOfMemory { requested: usize },
    /// Pipe spawn, read, write or close failure
    Io(String),
}

impl ReError {
    pub fn argument(func_name: &str, msg: impl std::fmt::Display) -> Self {
        ReError::Argument(format!("{}: {}", func_name, msg))
    }

    pub fn arity(func_name: &str) -> Self {
        Self::argument(func_name, "wrong number of arguments")
    }
}

impl std::fmt::Display for ReError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReError::Argument(msg) => write!(f, "{}", msg),
            ReError::PatternCompile(msg) => write!(f, "invalid pattern: {}", msg),
            ReError::MalformedMatch(msg) => write!(f, "damaged match: {}", msg),
            ReError::OutOfMemory { requested } => {
                write!(f, "not enough memory (requested {} bytes)", requested)
            }
            ReError::Io(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ReError {}

pub type ReResult<T> = Result<T, ReError>;
