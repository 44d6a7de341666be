pub mod core;
pub mod host;
pub mod logging;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use core::event::{ChangeEvent, SetOptions, ValueNotification};
pub use core::value::Value;
pub use core::value_path::{PathSegment, ValuePath};
pub use core::{Error, Result};
pub use host::{BoundValue, ViewProps};
pub use widgets::object_editor::{ObjectEditor, ObjectEditorController};
