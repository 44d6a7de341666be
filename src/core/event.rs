use serde::Serialize;

use crate::core::value::Value;
use crate::core::value_path::{PathSegment, ValuePath};

/// Emitted once per committed leaf edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// Container owning the edited field, after the edit.
    pub object: Value,
    pub obj_path: ValuePath,
    pub prop_path: ValuePath,
    pub prop_name: PathSegment,
    pub new_value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Notify listeners even when the value did not change.
    pub force_emit: bool,
    /// The write is final rather than part of an ongoing gesture.
    pub last: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            force_emit: false,
            last: true,
        }
    }
}

impl SetOptions {
    pub fn forced() -> Self {
        Self {
            force_emit: true,
            last: true,
        }
    }
}

/// Delivered to bound-value listeners after every emitted write.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueNotification {
    pub value: Value,
    pub options: SetOptions,
    /// Set when the write came from the editor's own commit path.
    pub caused_by_self: bool,
}
