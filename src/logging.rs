//! Tracing targets used across the editor.
//!
//! The library only emits `tracing` events; installing a subscriber is up to
//! the host (the demo binary writes them to a file).

/// Target names for log filtering.
pub mod targets {
    /// Node rendering and toggles.
    pub const TREE: &str = "object_editor::tree";
    /// Leaf edits and commits.
    pub const LEAF: &str = "object_editor::leaf";
    /// Root refreshes, notifications and disposal.
    pub const VIEW: &str = "object_editor::view";
    /// Bound value and view props.
    pub const HOST: &str = "object_editor::host";
}
