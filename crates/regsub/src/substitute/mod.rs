// Template-driven match replacement
//
// Layers, leaves first:
// 1. OutputBuffer : growable append-only byte accumulator
// 2. template : expands `&`, `\1`..`\9`, `\\`, `\&` against one match
// 3. iterator : walks successive matches, guaranteeing forward progress
// 4. driver : the single substitution loop, parameterized by policy
// 5. policy : ReplacementPolicy and the first/all/n/range adapters

mod buffer;
mod driver;
mod iterator;
mod policy;
mod template;

pub use buffer::OutputBuffer;
pub use driver::{Replacement, replace_with};
pub use iterator::{Matches, next_match};
pub use policy::{
    ReplaceCount, ReplacementPolicy, replace, replace_all, replace_first, replace_first_n,
    replace_range,
};
pub use template::{expand, expand_into, is_literal_template};
