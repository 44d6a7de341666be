use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::{Error, Result};
use crate::core::value_path::{PathSegment, ValuePath};

pub type ObjectMap = IndexMap<String, Value>;

type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A function-valued leaf. Shown as `f()` and never serialized.
#[derive(Clone)]
pub struct Callable {
    func: Arc<CallableFn>,
}

impl Callable {
    pub fn new(func: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self {
            func: Arc::new(func),
        }
    }

    pub fn noop() -> Self {
        Self::new(|_| Value::None)
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(f())")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Record,
    Sequence,
}

impl ContainerKind {
    pub fn open_brace(self) -> &'static str {
        match self {
            Self::Record => "{",
            Self::Sequence => "[",
        }
    }

    pub fn close_brace(self) -> &'static str {
        match self {
            Self::Record => "}",
            Self::Sequence => "]",
        }
    }

    /// Name shown on the toggle of an expanded node.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Record => "Object",
            Self::Sequence => "Array",
        }
    }

    pub fn class_suffix(self) -> &'static str {
        match self {
            Self::Record => "object",
            Self::Sequence => "array",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Callable,
    Number,
    Boolean,
    String,
    Null,
    Container(ContainerKind),
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::None => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::Text(_) => Self::String,
            Value::Callable(_) => Self::Callable,
            Value::List(_) => Self::Container(ContainerKind::Sequence),
            Value::Object(_) => Self::Container(ContainerKind::Record),
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Self::Container(_))
    }

    pub fn class_suffix(self) -> &'static str {
        match self {
            Self::Callable => "function",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Null => "null",
            Self::Container(kind) => kind.class_suffix(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(ObjectMap),
    Callable(Callable),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self)
    }

    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self.kind() {
            ValueKind::Container(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Number of direct entries; zero for leaves.
    pub fn entry_count(&self) -> usize {
        match self {
            Self::Object(map) => map.len(),
            Self::List(items) => items.len(),
            _ => 0,
        }
    }

    /// Direct entries in display order, keyed by the segment that addresses them.
    pub fn entries(&self) -> Vec<(PathSegment, &Value)> {
        match self {
            Self::Object(map) => map
                .iter()
                .map(|(key, value)| (PathSegment::Key(key.clone()), value))
                .collect(),
            Self::List(items) => items
                .iter()
                .enumerate()
                .map(|(idx, value)| (PathSegment::Index(idx), value))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn entry(&self, segment: &PathSegment) -> Option<&Value> {
        match (self, segment) {
            (Self::Object(map), PathSegment::Key(key)) => map.get(key.as_str()),
            (Self::Object(map), PathSegment::Index(index)) => map.get(index.to_string().as_str()),
            (Self::List(items), PathSegment::Index(index)) => items.get(*index),
            (Self::List(items), PathSegment::Key(key)) => {
                key.parse::<usize>().ok().and_then(|index| items.get(index))
            }
            _ => None,
        }
    }

    pub fn entry_mut(&mut self, segment: &PathSegment) -> Option<&mut Value> {
        match (self, segment) {
            (Self::Object(map), PathSegment::Key(key)) => map.get_mut(key.as_str()),
            (Self::Object(map), PathSegment::Index(index)) => {
                map.get_mut(index.to_string().as_str())
            }
            (Self::List(items), PathSegment::Index(index)) => items.get_mut(*index),
            (Self::List(items), PathSegment::Key(key)) => key
                .parse::<usize>()
                .ok()
                .and_then(move |index| items.get_mut(index)),
            _ => None,
        }
    }

    pub fn get_path(&self, path: &ValuePath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.entry(segment))
    }

    pub fn get_path_mut(&mut self, path: &ValuePath) -> Option<&mut Value> {
        let mut current = self;
        for segment in path.segments() {
            current = current.entry_mut(segment)?;
        }
        Some(current)
    }

    /// Replaces one field of this container. Record keys are inserted in place
    /// (existing keys keep their position); sequence slots must exist.
    pub fn set_entry(&mut self, segment: &PathSegment, value: Value) -> Result<()> {
        match self {
            Self::Object(map) => {
                map.insert(segment.to_string(), value);
                Ok(())
            }
            Self::List(items) => {
                let index = match segment {
                    PathSegment::Index(index) => Some(*index),
                    PathSegment::Key(key) => key.parse::<usize>().ok(),
                };
                let slot = index
                    .and_then(|index| items.get_mut(index))
                    .ok_or_else(|| Error::MissingPath {
                        path: segment.to_string(),
                    })?;
                *slot = value;
                Ok(())
            }
            other => Err(Error::NotAContainer { kind: other.kind() }),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::None | Self::Callable(_) => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Self::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Integral numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::None),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}
