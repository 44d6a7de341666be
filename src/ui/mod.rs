pub mod class_name;
pub mod element;
pub mod layout;
pub mod span;
pub mod style;
