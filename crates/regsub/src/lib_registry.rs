// Primitive registration
// Groups primitives into named modules and installs them into a SchemeContext

use log::debug;

use crate::primitives;
use crate::re_error::{ReError, ReResult};
use crate::scheme_context::SchemeContext;
use crate::scheme_value::Value;

/// Signature of every primitive: the context plus the evaluated arguments.
pub type Primitive = fn(&mut SchemeContext, &[Value]) -> ReResult<Value>;

/// Entry in a library module
pub enum LibraryEntry {
    Function(Primitive),
}

/// A named group of primitives
pub struct LibraryModule {
    pub name: &'static str,
    pub entries: Vec<(&'static str, LibraryEntry)>,
}

impl LibraryModule {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub fn with_function(mut self, name: &'static str, func: Primitive) -> Self {
        self.entries.push((name, LibraryEntry::Function(func)));
        self
    }
}

/// Builder for creating library modules from primitive tables
#[macro_export]
macro_rules! lib_module {
    ($name:expr, {
        $($item_name:expr => $item:expr),* $(,)?
    }) => {{
        let mut module = $crate::lib_registry::LibraryModule::new($name);
        $(
            module.entries.push(($item_name, $crate::lib_registry::LibraryEntry::Function($item)));
        )*
        module
    }};
}

/// Registry of primitive modules, kept in registration order
pub struct LibraryRegistry {
    modules: Vec<LibraryModule>,
}

impl LibraryRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    pub fn register(&mut self, module: LibraryModule) {
        self.modules.push(module);
    }

    /// Install every registered module into `ctx`.
    pub fn load_all(&self, ctx: &mut SchemeContext) {
        for module in &self.modules {
            self.load_module(ctx, module);
        }
    }

    /// Bind each entry of `module` as a global of `ctx`.
    pub fn load_module(&self, ctx: &mut SchemeContext, module: &LibraryModule) {
        for (name, entry) in &module.entries {
            let LibraryEntry::Function(func) = entry;
            ctx.add_global(name, Value::Primitive(*func));
        }
        debug!(
            "loaded module '{}' ({} entries)",
            module.name,
            module.entries.len()
        );
    }

    pub fn get_module(&self, name: &str) -> Option<&LibraryModule> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl Default for LibraryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with the regexp primitives and the posix pipe primitives.
pub fn create_standard_registry() -> LibraryRegistry {
    let mut registry = LibraryRegistry::new();
    registry.register(primitives::regexp::create_regexp_lib());
    registry.register(primitives::posix_popen::create_posix_lib());
    registry
}

const ORDINALS: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

/// Ordinal word for a 0-based argument index, as used in argument errors.
pub fn ordinal(index: usize) -> String {
    match ORDINALS.get(index) {
        Some(word) => (*word).to_string(),
        None => format!("#{}", index + 1),
    }
}

/// Fail unless `args.len()` lies in `min..=max`.
#[inline]
pub fn check_arity(func_name: &str, args: &[Value], min: usize, max: usize) -> ReResult<()> {
    if args.len() < min || args.len() > max {
        return Err(ReError::arity(func_name));
    }
    Ok(())
}

/// Argument `index` (0-based) as a byte string.
#[inline]
pub fn string_arg<'a>(func_name: &str, args: &'a [Value], index: usize) -> ReResult<&'a [u8]> {
    args.get(index)
        .and_then(Value::as_bytes)
        .ok_or_else(|| type_error(func_name, index, "string"))
}

/// Argument `index` (0-based) as an integer.
#[inline]
pub fn integer_arg(func_name: &str, args: &[Value], index: usize) -> ReResult<i64> {
    args.get(index)
        .and_then(Value::as_integer)
        .ok_or_else(|| type_error(func_name, index, "integer"))
}

pub fn type_error(func_name: &str, index: usize, expected: &str) -> ReError {
    let article = if expected.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    ReError::argument(
        func_name,
        format!("{} arg must be {} {}", ordinal(index), article, expected),
    )
}
