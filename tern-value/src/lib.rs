pub mod object;

use object::{Object, Symbol};
use std::fmt;
use std::rc::Rc;

/// A runtime value.
///
/// `Undefined`, `Null` and the booleans are plain variants, which makes every
/// instance of them the same value. Strings, symbols and objects are shared
/// and compared by reference (see [`Value::same`]).
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    String(Rc<str>),
    Number(f64),
    Symbol(Rc<Symbol>),
    Object(Rc<Object>),
}

/// The kind of a [`Value`], as named in runtime error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    String,
    Number,
    Symbol,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Symbol => "symbol",
            ValueKind::Object => "object",
        })
    }
}

impl Value {
    /// Builds an error value: an object whose `message` property is `message`.
    pub fn error(message: impl AsRef<str>) -> Self {
        let object = Object::new().with_property("message", Value::from(message.as_ref()));
        Value::Object(Rc::new(object))
    }

    pub fn symbol(description: Option<String>) -> Self {
        Value::Symbol(Rc::new(Symbol { description }))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// `null`, `false`, `0` and `""` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(val) => *val,
            Value::Number(val) => *val != 0.0,
            Value::String(val) => !val.is_empty(),
            _ => true,
        }
    }

    /// Returns `true` for an object carrying a string `message` property.
    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Value::Object(object) => object.get("message")?.cast_to_str(),
            _ => None,
        }
    }

    /// Identity comparison. Numbers compare by value, as do the unit variants
    /// and booleans. Strings, symbols and objects must be the same instance.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(l), Value::Boolean(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::String(l), Value::String(r)) => Rc::ptr_eq(l, r),
            (Value::Symbol(l), Value::Symbol(r)) => Rc::ptr_eq(l, r),
            (Value::Object(l), Value::Object(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }

    /// Attempts to cast the `Value` into a `&str` or `None` if wrong type.
    pub fn cast_to_str(&self) -> Option<&str> {
        match self {
            Value::String(val) => Some(val.as_ref()),
            _ => None,
        }
    }

    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Value::Number(val) => Some(*val),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Number(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Boolean(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.into())
    }
}

fn print_number(f: &mut fmt::Formatter<'_>, val: f64) -> fmt::Result {
    if val.is_nan() {
        f.write_str("NaN")
    } else if val.is_infinite() {
        f.write_str(if val > 0.0 { "Infinity" } else { "-Infinity" })
    } else if val == 0.0 {
        f.write_str("0") // also -0
    } else {
        write!(f, "{}", val)
    }
}

/// The inspection string printed by the REPL.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(val) => write!(f, "{}", val),
            Value::String(val) => f.write_str(val),
            Value::Number(val) => print_number(f, *val),
            Value::Symbol(symbol) => write!(f, "{}", symbol),
            Value::Object(object) => write!(f, "{}", object),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(val) => write!(f, "{:?}", val),
            _ => fmt::Display::fmt(self, f),
        }
    }
}
