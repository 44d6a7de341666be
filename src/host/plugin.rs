//! Plugin glue: which bindings the editor takes and how values flow in and out.

use serde::Deserialize;
use tracing::debug;

use crate::core::event::SetOptions;
use crate::core::value::{ObjectMap, Value};
use crate::host::bound_value::BoundValue;
use crate::host::view_props::ViewProps;
use crate::logging::targets;
use crate::widgets::object_editor::ObjectEditorController;

pub const PLUGIN_ID: &str = "object-editor";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginParams {
    pub view: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub initial_value: Value,
    pub params: PluginParams,
}

/// Claims a binding when the value is object-like and `params.view` names
/// this plugin.
pub fn accept(ex_value: &Value, params: &serde_json::Value) -> Option<Accepted> {
    if !matches!(ex_value, Value::Object(_) | Value::List(_) | Value::None) {
        return None;
    }
    let params: PluginParams = match serde_json::from_value(params.clone()) {
        Ok(params) => params,
        Err(err) => {
            debug!(target: targets::HOST, %err, "params rejected");
            return None;
        }
    };
    if params.view != PLUGIN_ID {
        return None;
    }
    Some(Accepted {
        initial_value: ex_value.clone(),
        params,
    })
}

/// Anything that is not a container reads as an empty record.
pub fn read_value(value: Value) -> Value {
    if value.is_container() {
        value
    } else {
        Value::Object(ObjectMap::new())
    }
}

/// Where edited values end up.
pub trait BindingTarget {
    fn read(&self) -> Value;
    fn write(&mut self, value: Value);
}

impl BindingTarget for Value {
    fn read(&self) -> Value {
        self.clone()
    }

    fn write(&mut self, value: Value) {
        *self = value;
    }
}

impl BindingTarget for BoundValue {
    fn read(&self) -> Value {
        self.raw_value()
    }

    fn write(&mut self, value: Value) {
        self.set_raw_value(value, SetOptions::default());
    }
}

pub fn write_value<T: BindingTarget + ?Sized>(target: &mut T, value: Value) {
    target.write(value);
}

pub fn create_controller(value: BoundValue, props: ViewProps) -> ObjectEditorController {
    ObjectEditorController::new(value, props)
}
