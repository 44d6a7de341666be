/// Generates tweakpane-style class names for one view:
/// `tp-{view}v`, `tp-{view}v_{element}`, `tp-{view}v-{modifier}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassName {
    view: &'static str,
}

impl ClassName {
    pub const fn new(view: &'static str) -> Self {
        Self { view }
    }

    pub fn root(&self) -> String {
        format!("tp-{}v", self.view)
    }

    pub fn elem(&self, element: &str) -> String {
        format!("tp-{}v_{}", self.view, element)
    }

    pub fn modifier(&self, modifier: &str) -> String {
        format!("tp-{}v-{}", self.view, modifier)
    }
}

/// Class names used by the object editor view.
pub const OBJECT_EDITOR: ClassName = ClassName::new("object-editor");
