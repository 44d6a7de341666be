pub mod leaf_editor;
pub mod object_editor;
pub mod traits;
pub mod tree;
