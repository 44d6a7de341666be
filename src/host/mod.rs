pub mod bound_value;
pub mod plugin;
pub mod view_props;

pub use bound_value::{BoundValue, ListenerId};
pub use plugin::{Accepted, BindingTarget, PLUGIN_ID, PluginParams, accept, create_controller, read_value};
pub use view_props::ViewProps;
