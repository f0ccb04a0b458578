use ahash::AHashMap;
use log::debug;
use smol_str::SmolStr;

use crate::lib_registry::{LibraryRegistry, create_standard_registry};
use crate::re_error::{ReError, ReResult};
use crate::re_option::ReOption;
use crate::scheme_value::{TypeTag, Value};

/// Process-wide state of the regexp extension, built once at startup.
///
/// Holds the opaque type tags the primitives hand out and the global table the
/// primitives are registered into.
pub struct SchemeContext {
    option: ReOption,
    next_type_id: u32,
    regexp_type: TypeTag,
    input_port_type: TypeTag,
    output_port_type: TypeTag,
    globals: AHashMap<SmolStr, Value>,
}

impl SchemeContext {
    /// A context with default options and every standard primitive loaded.
    pub fn new() -> Self {
        Self::with_option(ReOption::default())
    }

    pub fn with_option(option: ReOption) -> Self {
        let mut ctx = Self::bare(option);
        create_standard_registry().load_all(&mut ctx);
        ctx
    }

    /// A context with the type tags created but no primitives loaded.
    pub fn bare(option: ReOption) -> Self {
        let mut next_type_id = 0;
        let regexp_type = allocate_type(&mut next_type_id, "<regexp>");
        let input_port_type = allocate_type(&mut next_type_id, "<input-port>");
        let output_port_type = allocate_type(&mut next_type_id, "<output-port>");
        Self {
            option,
            next_type_id,
            regexp_type,
            input_port_type,
            output_port_type,
            globals: AHashMap::new(),
        }
    }

    pub fn load(&mut self, registry: &LibraryRegistry) {
        registry.load_all(self);
    }

    /// Allocate a fresh opaque type.
    pub fn make_type(&mut self, name: &str) -> TypeTag {
        allocate_type(&mut self.next_type_id, name)
    }

    #[inline(always)]
    pub fn option(&self) -> &ReOption {
        &self.option
    }

    #[inline(always)]
    pub fn regexp_type(&self) -> &TypeTag {
        &self.regexp_type
    }

    #[inline(always)]
    pub fn input_port_type(&self) -> &TypeTag {
        &self.input_port_type
    }

    #[inline(always)]
    pub fn output_port_type(&self) -> &TypeTag {
        &self.output_port_type
    }

    pub fn add_global(&mut self, name: &str, value: Value) {
        self.globals.insert(SmolStr::new(name), value);
    }

    pub fn get_global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Names of all globals, sorted.
    pub fn global_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.globals.keys().map(SmolStr::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up the global `name` and apply it to `args`.
    pub fn call(&mut self, name: &str, args: &[Value]) -> ReResult<Value> {
        let func = self
            .get_global(name)
            .and_then(Value::as_primitive)
            .ok_or_else(|| ReError::Argument(format!("{}: not a primitive", name)))?;
        func(self, args)
    }
}

fn allocate_type(next_type_id: &mut u32, name: &str) -> TypeTag {
    let tag = TypeTag::new(*next_type_id, name);
    *next_type_id += 1;
    debug!("registered type {:?}", tag);
    tag
}

impl Default for SchemeContext {
    fn default() -> Self {
        Self::new()
    }
}
