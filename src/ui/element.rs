//! Retained element tree the editor renders into.
//!
//! Elements mirror the small slice of a DOM the editor needs: tagged nodes
//! with class lists, text, an editable flag and an optional action that
//! gestures resolve to. Ids are unique for the lifetime of one
//! [`ElementIds`] allocator, so a rebuilt subtree never reuses the id of an
//! element it replaced.

use std::fmt;

use crate::core::value_path::ValuePath;
use crate::widgets::leaf_editor::LeafBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct ElementIds {
    next: u64,
}

impl ElementIds {
    pub fn next_id(&mut self) -> ElementId {
        self.next += 1;
        ElementId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
    Button,
    Br,
}

/// What a gesture on an element resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementAction {
    /// Expand/collapse the node mounted at this path.
    Toggle(ValuePath),
    /// Primitive token that can enter edit mode.
    Leaf(LeafBinding),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    tag: Tag,
    classes: Vec<String>,
    text: String,
    editable: bool,
    action: Option<ElementAction>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(id: ElementId, tag: Tag) -> Self {
        Self {
            id,
            tag,
            classes: Vec::new(),
            text: String::new(),
            editable: false,
            action: None,
            children: Vec::new(),
        }
    }

    pub fn line_break(id: ElementId) -> Self {
        Self::new(id, Tag::Br).with_text("\n")
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_action(mut self, action: ElementAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn set_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn action(&self) -> Option<&ElementAction> {
        self.action.as_ref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Swaps the descendant `id` for `replacement`. The root itself cannot be replaced.
    pub fn replace(&mut self, id: ElementId, replacement: Element) -> Option<Element> {
        let mut replacement = Some(replacement);
        self.replace_inner(id, &mut replacement)
    }

    fn replace_inner(&mut self, id: ElementId, replacement: &mut Option<Element>) -> Option<Element> {
        for child in self.children.iter_mut() {
            if child.id == id {
                let next = replacement.take()?;
                return Some(std::mem::replace(child, next));
            }
            if let Some(old) = child.replace_inner(id, replacement) {
                return Some(old);
            }
        }
        None
    }

    /// Ids from this element down to `id`, inclusive on both ends.
    pub fn path_to(&self, id: ElementId) -> Option<Vec<ElementId>> {
        if self.id == id {
            return Some(vec![self.id]);
        }
        for child in &self.children {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, self.id);
                return Some(path);
            }
        }
        None
    }

    /// Pre-order walk (document order), including `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in &self.children {
            child.collect_descendants(out);
        }
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }
}
