// Regexp substitution runtime
// Template-driven match replacement plus the scheme-facing primitives around it

#[cfg(test)]
mod test;

pub mod lib_registry;
pub mod primitives;
pub mod re_error;
pub mod re_limits;
pub mod re_option;
pub mod regexp;
pub mod scheme_context;
pub mod scheme_value;
pub mod substitute;

pub use lib_registry::{LibraryModule, LibraryRegistry, Primitive};
pub use re_error::{ReError, ReResult};
pub use re_option::ReOption;
pub use regexp::{MatchResult, Matcher, Regexp, Span};
pub use scheme_context::SchemeContext;
pub use scheme_value::{TypeTag, Value};
pub use substitute::{
    OutputBuffer, Replacement, ReplacementPolicy, replace, replace_all, replace_first,
    replace_first_n, replace_range, replace_with,
};
