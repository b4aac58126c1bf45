use std::collections::BTreeMap;
use std::fmt;

use super::Value;

/// A property bag. Keys render in sorted order.
#[derive(Clone, Default)]
pub struct Object {
    pub properties: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        for (i, (key, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str(" }")
    }
}

/// A unique value with an optional description.
#[derive(Clone, PartialEq, Eq)]
pub struct Symbol {
    pub description: Option<String>,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "Symbol({})", description),
            None => f.write_str("Symbol()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_display() {
        assert_eq!(Object::new().to_string(), "{}");

        let object = Object::new()
            .with_property("b", Value::Boolean(true))
            .with_property("a", Value::from(1.5));
        assert_eq!(object.to_string(), "{ a: 1.5, b: true }");
    }

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol { description: None }.to_string(), "Symbol()");
        let symbol = Symbol {
            description: Some("tag".to_string()),
        };
        assert_eq!(symbol.to_string(), "Symbol(tag)");
    }
}
