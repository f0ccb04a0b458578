use std::fmt;

use smol_str::SmolStr;

/// Identity of an opaque host type, such as `<regexp>`.
///
/// Two tags are the same type when their ids match; the name is only for
/// printing.
#[derive(Clone)]
pub struct TypeTag {
    id: u32,
    name: SmolStr,
}

impl TypeTag {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: SmolStr::new(name),
        }
    }

    #[inline(always)]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
