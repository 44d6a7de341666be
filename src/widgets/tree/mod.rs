//! Tree renderer.
//!
//! Each container in the bound value is rendered as a node: a toggle button
//! followed by either a one-line collapsed summary or a multi-line expanded
//! view whose container entries are nested, initially collapsed nodes.
//! Expansion flags live here, keyed by path, and only for nodes that are
//! currently mounted. Re-rendering a node drops the state of everything
//! below it, and a root mount drops all of it.

mod render;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::event::ChangeEvent;
use crate::core::value::{ContainerKind, Value};
use crate::core::value_path::ValuePath;
use crate::core::{Error, Result};
use crate::logging::targets;
use crate::ui::class_name::OBJECT_EDITOR;
use crate::ui::element::{Element, ElementAction, ElementId, ElementIds, Tag};
use crate::widgets::leaf_editor::{self, ActiveEdit, LeafBinding, parse_edit_text, render_token};
use render::{RenderCx, render_node};

/// Entries shown by a collapsed node before the ellipsis.
pub const COLLAPSED_ENTRY_CAP: usize = 4;
pub const COLLAPSED_GLYPH: &str = "▼";
pub const ELLIPSIS: &str = "...";
pub const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub expanded: bool,
    pub mount: ElementId,
    pub kind: ContainerKind,
}

pub struct TreeRenderer {
    ids: ElementIds,
    root_value: Value,
    element: Element,
    nodes: HashMap<ValuePath, NodeState>,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRenderer {
    pub fn new() -> Self {
        let mut ids = ElementIds::default();
        let element = Element::new(ids.next_id(), Tag::Div).with_class(OBJECT_EDITOR.root());
        Self {
            ids,
            root_value: Value::Object(Default::default()),
            element,
            nodes: HashMap::new(),
        }
    }

    /// Root mount element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    /// The tree's working copy of the bound value.
    pub fn root_value(&self) -> &Value {
        &self.root_value
    }

    pub fn node(&self, path: &ValuePath) -> Option<NodeState> {
        self.nodes.get(path).copied()
    }

    /// Clears the root mount and renders `value` with every node collapsed.
    pub fn mount_root(&mut self, value: Value) -> Result<()> {
        if !value.is_container() {
            return Err(Error::NotAContainer { kind: value.kind() });
        }
        self.nodes.clear();
        self.root_value = value;
        let mut cx = RenderCx {
            ids: &mut self.ids,
            nodes: &mut self.nodes,
        };
        render_node(
            &mut cx,
            &self.root_value,
            false,
            &mut self.element,
            &ValuePath::empty(),
        )?;
        debug!(target: targets::TREE, entries = self.root_value.entry_count(), "mounted root");
        Ok(())
    }

    /// Flips the node at `path` and rebuilds it in place. Returns the new flag.
    pub fn toggle(&mut self, path: &ValuePath) -> Result<bool> {
        let state = self.node(path).ok_or_else(|| Error::missing_path(path))?;
        let expanded = !state.expanded;
        self.render_at(path, expanded)?;
        debug!(target: targets::TREE, path = %path, expanded, "toggled node");
        Ok(expanded)
    }

    fn render_at(&mut self, path: &ValuePath, expanded: bool) -> Result<()> {
        let state = self.node(path).ok_or_else(|| Error::missing_path(path))?;
        let container = self
            .root_value
            .get_path(path)
            .ok_or_else(|| Error::missing_path(path))?;
        let mount = self
            .element
            .find_mut(state.mount)
            .ok_or(Error::UnknownElement(state.mount))?;
        self.nodes.retain(|node_path, _| !node_path.is_descendant_of(path));
        let mut cx = RenderCx {
            ids: &mut self.ids,
            nodes: &mut self.nodes,
        };
        render_node(&mut cx, container, expanded, mount, path)
    }

    /// Makes the token behind `edit` editable.
    pub fn begin_edit(&mut self, edit: &ActiveEdit) -> Result<()> {
        let token = self
            .element
            .find_mut(edit.element)
            .ok_or(Error::UnknownElement(edit.element))?;
        leaf_editor::begin_edit(token, edit.text());
        Ok(())
    }

    /// Mirrors the edit buffer into the editable token.
    pub fn sync_edit(&mut self, edit: &ActiveEdit) -> Result<()> {
        let token = self
            .element
            .find_mut(edit.element)
            .ok_or(Error::UnknownElement(edit.element))?;
        token.set_text(edit.text());
        Ok(())
    }

    /// Parses the edit text, writes it into the owning container and swaps
    /// the editable token for a fresh one bound to the new value.
    ///
    /// When the new value is itself a container, the owning node is rebuilt
    /// instead so the entry renders as a node or summary.
    pub fn commit(&mut self, edit: &ActiveEdit) -> Result<ChangeEvent> {
        let new_value = parse_edit_text(edit.text()).inspect_err(|err| {
            warn!(target: targets::LEAF, path = %edit.binding.path(), %err, "rejected edit");
        })?;
        if self.element.find(edit.element).is_none() {
            return Err(Error::UnknownElement(edit.element));
        }

        let prop_path = edit.binding.path().clone();
        let prop_name = prop_path
            .last()
            .cloned()
            .ok_or_else(|| Error::missing_path(&prop_path))?;
        let obj_path = edit.binding.obj_path();
        let object = self
            .root_value
            .get_path_mut(&obj_path)
            .ok_or_else(|| Error::missing_path(&obj_path))?;
        object.set_entry(&prop_name, new_value.clone())?;
        let object = object.clone();

        if new_value.is_container() {
            let expanded = self.node(&obj_path).is_some_and(|node| node.expanded);
            self.render_at(&obj_path, expanded)?;
        } else {
            let token = render_token(
                &mut self.ids,
                LeafBinding::new(prop_path.clone(), new_value.clone()),
            );
            self.element
                .replace(edit.element, token)
                .ok_or(Error::UnknownElement(edit.element))?;
        }
        debug!(target: targets::LEAF, path = %prop_path, "committed edit");

        Ok(ChangeEvent {
            object,
            obj_path,
            prop_path,
            prop_name,
            new_value,
        })
    }

    pub fn find_toggle(&self, path: &ValuePath) -> Option<ElementId> {
        self.element.descendants().into_iter().find_map(|el| match el.action() {
            Some(ElementAction::Toggle(p)) if p == path => Some(el.id()),
            _ => None,
        })
    }

    pub fn find_leaf(&self, path: &ValuePath) -> Option<ElementId> {
        self.element.descendants().into_iter().find_map(|el| match el.action() {
            Some(ElementAction::Leaf(binding)) if binding.path() == path => Some(el.id()),
            _ => None,
        })
    }

    /// The text of the inner block of the node at `path`.
    pub fn node_text(&self, path: &ValuePath) -> Option<String> {
        let state = self.node(path)?;
        let mount = self.element.find(state.mount)?;
        mount
            .children()
            .iter()
            .find(|child| child.has_class(&OBJECT_EDITOR.elem("inner")))
            .map(Element::text_content)
    }
}
