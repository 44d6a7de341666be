use crate::host::{BoundValue, ViewProps};
use crate::widgets::object_editor::ObjectEditor;

/// Owns the view for one binding and ties its teardown to the view props.
pub struct ObjectEditorController {
    value: BoundValue,
    view_props: ViewProps,
    view: ObjectEditor,
}

impl ObjectEditorController {
    pub fn new(value: BoundValue, view_props: ViewProps) -> Self {
        let view = ObjectEditor::new(value.clone(), view_props.clone());
        Self {
            value,
            view_props,
            view,
        }
    }

    pub fn value(&self) -> &BoundValue {
        &self.value
    }

    pub fn view_props(&self) -> &ViewProps {
        &self.view_props
    }

    pub fn view(&self) -> &ObjectEditor {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ObjectEditor {
        &mut self.view
    }

    pub fn dispose(&mut self) {
        self.view_props.dispose();
        self.view.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectEditorController;
    use crate::core::value::Value;
    use crate::host::{BoundValue, ViewProps, create_controller};
    use serde_json::json;

    #[test]
    fn dispose_tears_down_view_and_props() {
        let bound = BoundValue::new(Value::from(json!({"a": 1})));
        let mut controller: ObjectEditorController = create_controller(bound.clone(), ViewProps::new());
        assert!(controller.view_mut().tick().expect("paint"));
        assert_eq!(bound.listener_count(), 1);

        controller.dispose();
        controller.dispose();
        assert!(controller.view_props().is_disposed());
        assert!(controller.view().is_disposed());
        assert_eq!(controller.value().listener_count(), 0);
    }
}
