// Host value model
//
// The primitives exchange these values with the embedding interpreter.
// Strings are byte strings. Opaque handles (compiled patterns, pipe ports)
// carry the type tag handed out by `SchemeContext::make_type`, so "is this a
// regexp" is a tag comparison rather than a downcast attempt.

mod type_tag;

pub use type_tag::TypeTag;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::lib_registry::Primitive;

/// A typed opaque handle.
#[derive(Clone)]
pub struct Object {
    tag: TypeTag,
    data: Rc<dyn Any>,
}

impl Object {
    #[inline(always)]
    pub fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Payload as `T` when the tag is `tag` and the payload really is a `T`.
    pub fn downcast<T: Any>(&self, tag: &TypeTag) -> Option<Rc<T>> {
        if &self.tag != tag {
            return None;
        }
        Rc::clone(&self.data).downcast::<T>().ok()
    }
}

#[derive(Clone)]
pub enum Value {
    Unspecified,
    Boolean(bool),
    Integer(i64),
    String(Rc<[u8]>),
    Object(Object),
    Primitive(Primitive),
}

impl Value {
    #[inline(always)]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(b)
    }

    #[inline(always)]
    pub fn integer(i: i64) -> Self {
        Value::Integer(i)
    }

    pub fn string(s: impl AsRef<[u8]>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    pub fn object<T: Any>(tag: TypeTag, data: T) -> Self {
        Value::Object(Object {
            tag,
            data: Rc::new(data),
        })
    }

    /// True when this is an opaque handle carrying `tag`.
    #[inline]
    pub fn has_tag(&self, tag: &TypeTag) -> bool {
        matches!(self, Value::Object(o) if o.tag() == tag)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Value::Primitive(f) => Some(*f),
            _ => None,
        }
    }

    /// Everything except `#f` counts as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unspecified, Value::Unspecified) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(&a.data, &b.data),
            (Value::Primitive(a), Value::Primitive(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unspecified => Ok(()),
            Value::Boolean(true) => f.write_str("#t"),
            Value::Boolean(false) => f.write_str("#f"),
            Value::Integer(i) => f.write_str(itoa::Buffer::new().format(*i)),
            Value::String(s) => f.write_str(&String::from_utf8_lossy(s)),
            Value::Object(o) => write!(f, "#{}", o.tag().name()),
            Value::Primitive(_) => f.write_str("#<primitive>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::boolean(true).to_string(), "#t");
        assert_eq!(Value::integer(-42).to_string(), "-42");
        assert_eq!(Value::string("abc").to_string(), "abc");
        let tag = TypeTag::new(0, "<regexp>");
        assert_eq!(Value::object(tag, 1u8).to_string(), "#<regexp>");
    }

    #[test]
    fn test_object_downcast_checks_tag() {
        let regexp = TypeTag::new(0, "<regexp>");
        let port = TypeTag::new(1, "<input-port>");
        let v = Value::object(regexp.clone(), String::from("payload"));
        let obj = v.as_object().unwrap();
        assert_eq!(obj.downcast::<String>(&regexp).unwrap().as_str(), "payload");
        assert!(obj.downcast::<String>(&port).is_none());
        assert!(obj.downcast::<u32>(&regexp).is_none());
        assert!(v.has_tag(&regexp));
        assert!(!v.has_tag(&port));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Value::string("a"), Value::string("a"));
        assert_ne!(Value::string("a"), Value::integer(1));
        let tag = TypeTag::new(0, "<x>");
        let a = Value::object(tag.clone(), 1u8);
        let b = Value::object(tag, 1u8);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::boolean(false).is_truthy());
        assert!(Value::integer(0).is_truthy());
        assert!(Value::Unspecified.is_truthy());
    }
}
