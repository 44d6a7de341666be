//! The object editor view.
//!
//! Binds a [`TreeRenderer`] and an [`EditSession`] to a host [`BoundValue`].
//! Value notifications are queued by the subscription and drained on
//! [`ObjectEditor::tick`] and after every gesture, so the tree is never
//! rebuilt from inside a host callback. Notifications caused by the
//! editor's own commits are skipped; anything else rebuilds the tree from
//! the root with every node collapsed.

mod controller;
mod interaction;

pub use controller::ObjectEditorController;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::core::event::{ChangeEvent, SetOptions, ValueNotification};
use crate::core::value::Value;
use crate::core::value_path::ValuePath;
use crate::core::{Error, Result};
use crate::host::{BoundValue, ListenerId, ViewProps};
use crate::logging::targets;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::element::{Element, ElementAction, ElementId};
use crate::ui::layout::{CursorPos, LayoutOptions, interactive, layout, truncate_line};
use crate::widgets::leaf_editor::{ActiveEdit, EditBuffer, EditSession};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use crate::widgets::tree::TreeRenderer;

type Inbox = Rc<RefCell<VecDeque<ValueNotification>>>;
type ChangeListener = Box<dyn FnMut(&ChangeEvent)>;

/// Keyboard focus, keyed by what the element addresses so it survives a
/// rebuild that hands out fresh element ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Toggle(ValuePath),
    Leaf(ValuePath),
}

impl FocusTarget {
    fn of(action: &ElementAction) -> Self {
        match action {
            ElementAction::Toggle(path) => Self::Toggle(path.clone()),
            ElementAction::Leaf(binding) => Self::Leaf(binding.path().clone()),
        }
    }

    pub fn path(&self) -> &ValuePath {
        match self {
            Self::Toggle(path) | Self::Leaf(path) => path,
        }
    }
}

pub struct ObjectEditor {
    value: BoundValue,
    props: ViewProps,
    inbox: Inbox,
    listener: Option<ListenerId>,
    tree: TreeRenderer,
    session: EditSession,
    painted: bool,
    focus: Option<FocusTarget>,
    change_listeners: Vec<ChangeListener>,
}

impl ObjectEditor {
    /// Subscribes to `value` and registers the unsubscribe with `props`.
    /// Nothing is rendered until the first [`tick`](Self::tick).
    pub fn new(value: BoundValue, props: ViewProps) -> Self {
        let inbox: Inbox = Rc::default();
        let sink = Rc::clone(&inbox);
        let listener = value.on_change(move |notification| {
            sink.borrow_mut().push_back(notification.clone());
        });
        let unsubscribe = value.clone();
        props.handle_dispose(move || {
            unsubscribe.off_change(listener);
        });

        let mut tree = TreeRenderer::new();
        props.bind_class_modifiers(tree.element_mut());
        Self {
            value,
            props,
            inbox,
            listener: Some(listener),
            tree,
            session: EditSession::default(),
            painted: false,
            focus: None,
            change_listeners: Vec::new(),
        }
    }

    /// Root mount element.
    pub fn element(&self) -> &Element {
        self.tree.element()
    }

    /// The editor's working copy of the bound value.
    pub fn root_value(&self) -> &Value {
        self.tree.root_value()
    }

    pub fn bound_value(&self) -> &BoundValue {
        &self.value
    }

    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    pub fn is_painted(&self) -> bool {
        self.painted
    }

    pub fn is_disposed(&self) -> bool {
        self.listener.is_none() || self.props.is_disposed()
    }

    pub fn active_edit(&self) -> Option<&ActiveEdit> {
        self.session.active()
    }

    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    pub fn node_expanded(&self, path: &ValuePath) -> Option<bool> {
        self.tree.node(path).map(|node| node.expanded)
    }

    pub fn node_text(&self, path: &ValuePath) -> Option<String> {
        self.tree.node_text(path)
    }

    pub fn find_toggle(&self, path: &ValuePath) -> Option<ElementId> {
        self.tree.find_toggle(path)
    }

    pub fn find_leaf(&self, path: &ValuePath) -> Option<ElementId> {
        self.tree.find_leaf(path)
    }

    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.change_listeners.push(Box::new(listener));
    }

    /// Performs the deferred first paint, then applies queued notifications.
    /// Returns whether the view changed.
    pub fn tick(&mut self) -> Result<bool> {
        if self.is_disposed() {
            return Ok(false);
        }
        if !self.painted {
            self.inbox.borrow_mut().clear();
            self.refresh()?;
            self.painted = true;
            debug!(target: targets::VIEW, "initial paint");
            return Ok(true);
        }
        let result = self.drain_notifications()?;
        self.props.bind_class_modifiers(self.tree.element_mut());
        Ok(result.request_render)
    }

    /// Unsubscribes from the bound value. Safe to call more than once.
    pub fn dispose(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        self.value.off_change(listener);
        self.inbox.borrow_mut().clear();
        self.session.clear();
        debug!(target: targets::VIEW, "disposed");
    }

    /// Opens every node from the root down to the container at `path`.
    pub fn expand(&mut self, path: &str) -> Result<()> {
        let path = ValuePath::parse(path)?;
        // Toggling rebuilds nodes, so the pending edit goes in first.
        self.blur()?;
        let mut current = ValuePath::empty();
        let mut pending = path.segments().iter();
        loop {
            let node = self
                .tree
                .node(&current)
                .ok_or_else(|| Error::missing_path(&current))?;
            if !node.expanded {
                self.tree.toggle(&current)?;
            }
            let Some(segment) = pending.next() else {
                return Ok(());
            };
            current = current.child(segment.clone());
        }
    }

    fn accepts_gestures(&self) -> bool {
        self.painted && !self.is_disposed() && !self.props.disabled()
    }

    /// Single activation. Commits a pending edit elsewhere first, then runs
    /// the nearest toggle among the target and its ancestors.
    pub fn click(&mut self, target: ElementId) -> Result<InteractionResult> {
        if !self.accepts_gestures() {
            return Ok(InteractionResult::ignored());
        }
        if self.tree.element().find(target).is_none() {
            return Err(Error::UnknownElement(target));
        }

        let mut result = InteractionResult::ignored();
        if self
            .session
            .active()
            .is_some_and(|active| active.element != target)
        {
            result.merge(self.blur()?);
        }

        // The commit may have rebuilt the node that held the target.
        let Some(chain) = self.tree.element().path_to(target) else {
            return Ok(result);
        };
        let action = chain.iter().rev().find_map(|id| {
            self.tree
                .element()
                .find(*id)
                .and_then(Element::action)
                .cloned()
        });
        if let Some(ElementAction::Toggle(path)) = action {
            self.tree.toggle(&path)?;
            self.focus = Some(FocusTarget::Toggle(path));
            result.merge(InteractionResult::handled());
        }
        result.merge(self.drain_notifications()?);
        Ok(result)
    }

    /// Double activation. Puts a leaf token into edit mode, committing the
    /// previously active leaf first.
    pub fn double_click(&mut self, target: ElementId) -> Result<InteractionResult> {
        if !self.accepts_gestures() {
            return Ok(InteractionResult::ignored());
        }
        let element = self
            .tree
            .element()
            .find(target)
            .ok_or(Error::UnknownElement(target))?;
        let Some(ElementAction::Leaf(binding)) = element.action() else {
            return Ok(InteractionResult::ignored());
        };
        if self.session.is_active(target) {
            return Ok(InteractionResult::consumed());
        }
        let binding = binding.clone();
        let path = binding.path().clone();

        let mut committed = None;
        let tree = &mut self.tree;
        self.session
            .try_activate(ActiveEdit::new(target, binding), |previous| {
                committed = Some(tree.commit(previous)?);
                Ok(())
            })?;

        let mut result = InteractionResult::ignored();
        if let Some(event) = committed {
            result.merge(self.publish(event));
        }
        if self.tree.element().find(target).is_none() {
            // Committing the previous leaf rebuilt this one's node; the
            // leaf lives on under a fresh id.
            self.session.clear();
            if let Some(rebuilt) = self.leaf_edit(&path) {
                self.session.try_activate(rebuilt, |_| Ok(()))?;
            }
        }
        if let Some(active) = self.session.active() {
            self.tree.begin_edit(active)?;
            debug!(target: targets::LEAF, path = %path, "editing leaf");
            self.focus = Some(FocusTarget::Leaf(path));
            result.merge(InteractionResult::handled());
        } else {
            // No editor opened; the commit still needs a repaint.
            result.handled = false;
        }
        result.merge(self.drain_notifications()?);
        Ok(result)
    }

    /// A fresh edit for the leaf currently rendered at `path`.
    fn leaf_edit(&self, path: &ValuePath) -> Option<ActiveEdit> {
        let id = self.tree.find_leaf(path)?;
        match self.tree.element().find(id)?.action() {
            Some(ElementAction::Leaf(binding)) => Some(ActiveEdit::new(id, binding.clone())),
            _ => None,
        }
    }

    /// Replaces the text of the active editor.
    pub fn input(&mut self, text: &str) -> Result<InteractionResult> {
        self.edit_buffer(|buffer| {
            buffer.set_text(text);
            true
        })
    }

    /// Focus loss: commits the active editor, if any.
    ///
    /// On a malformed edit the error is returned and the leaf stays active
    /// and editable with its text intact.
    pub fn blur(&mut self) -> Result<InteractionResult> {
        let tree = &mut self.tree;
        let Some(event) = self.session.commit_active(|edit| tree.commit(edit))? else {
            return Ok(InteractionResult::ignored());
        };
        let mut result = self.publish(event);
        result.merge(self.drain_notifications()?);
        Ok(result)
    }

    fn edit_buffer(&mut self, edit: impl FnOnce(&mut EditBuffer) -> bool) -> Result<InteractionResult> {
        let Some(active) = self.session.active_mut() else {
            return Ok(InteractionResult::ignored());
        };
        if !edit(&mut active.buffer) {
            return Ok(InteractionResult::consumed());
        }
        self.tree.sync_edit(active)?;
        Ok(InteractionResult::handled())
    }

    fn publish(&mut self, event: ChangeEvent) -> InteractionResult {
        self.value
            .set_raw_value_from_view(self.tree.root_value().clone(), SetOptions::forced());
        for listener in &mut self.change_listeners {
            listener(&event);
        }
        InteractionResult::with_change(event)
    }

    fn drain_notifications(&mut self) -> Result<InteractionResult> {
        let pending: Vec<ValueNotification> = self.inbox.borrow_mut().drain(..).collect();
        if !self.painted {
            return Ok(InteractionResult::ignored());
        }
        let mut external = 0usize;
        for notification in &pending {
            if notification.caused_by_self {
                trace!(target: targets::VIEW, "skipped self-caused notification");
            } else {
                external += 1;
            }
        }
        if external == 0 {
            return Ok(InteractionResult::ignored());
        }
        self.refresh()?;
        Ok(InteractionResult::handled())
    }

    /// Rebuilds everything from the bound value with all nodes collapsed.
    fn refresh(&mut self) -> Result<()> {
        if let Some(dropped) = self.session.clear() {
            debug!(target: targets::VIEW, path = %dropped.binding.path(), "discarded pending edit");
        }
        self.tree.mount_root(self.value.raw_value())?;
        self.props.bind_class_modifiers(self.tree.element_mut());
        self.focus = self
            .focus
            .take()
            .filter(|focus| self.resolve_focus(focus).is_some());
        debug!(target: targets::VIEW, "refreshed root");
        Ok(())
    }

    /// Actionable elements in document order.
    fn focus_order(&self) -> Vec<(FocusTarget, ElementId)> {
        interactive(self.tree.element())
            .into_iter()
            .filter_map(|el| el.action().map(|action| (FocusTarget::of(action), el.id())))
            .collect()
    }

    fn resolve_focus(&self, focus: &FocusTarget) -> Option<ElementId> {
        match focus {
            FocusTarget::Toggle(path) => self.tree.find_toggle(path),
            FocusTarget::Leaf(path) => self.tree.find_leaf(path),
        }
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            focused: self.focus.as_ref().and_then(|focus| self.resolve_focus(focus)),
            editing: self
                .session
                .active()
                .map(|active| (active.element, active.buffer.cursor())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectEditor;
    use crate::core::Error;
    use crate::core::event::{ChangeEvent, SetOptions};
    use crate::core::value::Value;
    use crate::core::value_path::{PathSegment, ValuePath};
    use crate::host::{BoundValue, ViewProps};
    use crate::ui::element::Tag;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn painted(value: serde_json::Value) -> (BoundValue, ObjectEditor) {
        let bound = BoundValue::new(Value::from(value));
        let mut editor = ObjectEditor::new(bound.clone(), ViewProps::new());
        assert!(editor.tick().expect("paint"));
        (bound, editor)
    }

    fn path(text: &str) -> ValuePath {
        ValuePath::parse(text).expect("path")
    }

    fn toggle(editor: &mut ObjectEditor, at: &str) {
        let id = editor.find_toggle(&path(at)).expect("toggle");
        editor.click(id).expect("click");
    }

    fn edit(editor: &mut ObjectEditor, leaf: &str, text: &str) -> crate::core::Result<Vec<ChangeEvent>> {
        let id = editor.find_leaf(&path(leaf)).expect("leaf");
        let mut changes = editor.double_click(id)?.changes;
        editor.input(text)?;
        changes.extend(editor.blur()?.changes);
        Ok(changes)
    }

    fn editable_count(editor: &ObjectEditor) -> usize {
        editor
            .element()
            .descendants()
            .into_iter()
            .filter(|el| el.is_editable())
            .count()
    }

    #[test]
    fn first_tick_paints() {
        let bound = BoundValue::new(Value::from(json!({"a": 1})));
        let mut editor = ObjectEditor::new(bound, ViewProps::new());
        assert!(!editor.is_painted());
        assert!(editor.element().children().is_empty());

        assert!(editor.tick().expect("paint"));
        assert_eq!(editor.node_text(&ValuePath::empty()).as_deref(), Some("{ a: 1 }"));
        assert!(!editor.tick().expect("idle"));
    }

    #[test]
    fn number_edit_round_trips_as_number() {
        let (bound, mut editor) = painted(json!({"count": 42}));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        editor.on_change(move |event| sink.borrow_mut().push(event.new_value.clone()));

        let changes = edit(&mut editor, "count", "43").expect("commit");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].new_value, Value::Number(43.0));
        assert_eq!(*seen.borrow(), vec![Value::Number(43.0)]);
        assert_eq!(bound.raw_value(), Value::from(json!({"count": 43})));
        assert_eq!(editor.node_text(&ValuePath::empty()).as_deref(), Some("{ count: 43 }"));
    }

    #[test]
    fn strings_render_quoted_and_parse_back() {
        let (bound, mut editor) = painted(json!({"s": "hello"}));
        let id = editor.find_leaf(&path("s")).expect("leaf");
        assert_eq!(editor.element().find(id).map(|el| el.text()), Some("\"hello\""));

        let changes = edit(&mut editor, "s", "\"world\"").expect("commit");
        assert_eq!(changes[0].new_value, Value::Text("world".to_string()));
        assert_eq!(bound.raw_value(), Value::from(json!({"s": "world"})));
    }

    #[test]
    fn second_editor_commits_first() {
        let (bound, mut editor) = painted(json!({"a": 1, "b": 2}));
        let a = editor.find_leaf(&path("a")).expect("a");
        editor.double_click(a).expect("edit a");
        editor.input("10").expect("input");
        assert_eq!(editable_count(&editor), 1);

        let b = editor.find_leaf(&path("b")).expect("b");
        let result = editor.double_click(b).expect("edit b");
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].prop_path, path("a"));
        assert_eq!(bound.raw_value(), Value::from(json!({"a": 10, "b": 2})));

        assert_eq!(editable_count(&editor), 1);
        assert!(editor.element().find(b).is_some_and(|el| el.is_editable()));
        assert_eq!(editor.active_edit().map(|active| active.element), Some(b));
    }

    #[test]
    fn clicking_elsewhere_commits() {
        let (_bound, mut editor) = painted(json!({"a": 1}));
        let a = editor.find_leaf(&path("a")).expect("a");
        editor.double_click(a).expect("edit");
        editor.input("2").expect("input");

        let root_toggle = editor.find_toggle(&ValuePath::empty()).expect("toggle");
        let result = editor.click(root_toggle).expect("click");
        assert_eq!(result.changes.len(), 1);
        assert!(editor.active_edit().is_none());
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(true));
    }

    #[test]
    fn repeated_toggles_leave_one_control_per_node() {
        let (bound, mut editor) = painted(json!({"a": {"b": 1}}));
        for _ in 0..4 {
            toggle(&mut editor, "");
        }
        toggle(&mut editor, "");
        let buttons = editor
            .element()
            .descendants()
            .into_iter()
            .filter(|el| el.tag() == Tag::Button)
            .count();
        assert_eq!(buttons, 2);
        assert_eq!(bound.listener_count(), 1);

        toggle(&mut editor, "a");
        let fired = Rc::new(RefCell::new(0));
        let count = Rc::clone(&fired);
        editor.on_change(move |_| *count.borrow_mut() += 1);
        edit(&mut editor, "a.b", "2").expect("commit");
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn nested_edit_reports_paths() {
        let (bound, mut editor) = painted(json!({"a": {"b": 5}}));
        toggle(&mut editor, "");
        toggle(&mut editor, "a");

        let changes = edit(&mut editor, "a.b", "6").expect("commit");
        let event = &changes[0];
        assert_eq!(event.prop_path.to_string(), "a.b");
        assert_eq!(event.obj_path.to_string(), "a");
        assert_eq!(event.prop_name, PathSegment::Key("b".to_string()));
        assert_eq!(event.object, Value::from(json!({"b": 6})));
        assert_eq!(bound.raw_value(), Value::from(json!({"a": {"b": 6}})));
    }

    #[test]
    fn external_change_collapses_everything() {
        let (bound, mut editor) = painted(json!({"a": {"b": 1}}));
        toggle(&mut editor, "");
        toggle(&mut editor, "a");
        assert_eq!(editor.node_expanded(&path("a")), Some(true));

        bound.set_raw_value(Value::from(json!({"a": {"b": 2}})), SetOptions::default());
        assert!(editor.tick().expect("refresh"));
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(false));
        assert_eq!(editor.node_expanded(&path("a")), None);
        assert_eq!(editor.root_value(), &Value::from(json!({"a": {"b": 2}})));
    }

    #[test]
    fn own_commit_keeps_expansion() {
        let (_bound, mut editor) = painted(json!({"a": {"b": 1}}));
        toggle(&mut editor, "");
        toggle(&mut editor, "a");
        edit(&mut editor, "a.b", "3").expect("commit");

        assert!(!editor.tick().expect("tick"));
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(true));
        assert_eq!(editor.node_expanded(&path("a")), Some(true));
    }

    #[test]
    fn refresh_drops_pending_edit() {
        let (bound, mut editor) = painted(json!({"a": 1}));
        let a = editor.find_leaf(&path("a")).expect("a");
        editor.double_click(a).expect("edit");
        editor.input("5").expect("input");

        bound.set_raw_value(Value::from(json!({"a": 9})), SetOptions::default());
        editor.tick().expect("refresh");
        assert!(editor.active_edit().is_none());
        assert_eq!(editable_count(&editor), 0);
        assert_eq!(bound.raw_value(), Value::from(json!({"a": 9})));
    }

    #[test]
    fn malformed_edit_stays_active() {
        let (bound, mut editor) = painted(json!({"a": "x", "b": 1}));
        let a = editor.find_leaf(&path("a")).expect("a");
        editor.double_click(a).expect("edit");
        editor.input("world").expect("input");

        let err = editor.blur().expect_err("bare word");
        assert!(matches!(err, Error::MalformedEdit { .. }));
        assert_eq!(editor.active_edit().map(|active| active.element), Some(a));
        let token = editor.element().find(a).expect("token");
        assert!(token.is_editable());
        assert_eq!(token.text(), "world");
        assert_eq!(bound.raw_value(), Value::from(json!({"a": "x", "b": 1})));

        let b = editor.find_leaf(&path("b")).expect("b");
        assert!(editor.double_click(b).is_err());
        assert_eq!(editable_count(&editor), 1);

        editor.input("\"world\"").expect("input");
        let result = editor.blur().expect("commit");
        assert_eq!(result.changes[0].new_value, Value::Text("world".to_string()));
    }

    #[test]
    fn container_text_rebuilds_owner() {
        let (bound, mut editor) = painted(json!({"a": 1}));
        edit(&mut editor, "a", "[1, 2]").expect("commit");
        assert_eq!(editor.node_text(&ValuePath::empty()).as_deref(), Some("{ a: Array(2) }"));
        assert_eq!(bound.raw_value(), Value::from(json!({"a": [1, 2]})));
    }

    #[test]
    fn sibling_survives_owner_rebuild() {
        let (bound, mut editor) = painted(json!({"a": 1, "b": 2}));
        let a = editor.find_leaf(&path("a")).expect("leaf a");
        let stale_b = editor.find_leaf(&path("b")).expect("leaf b");
        editor.double_click(a).expect("edit a");
        editor.input("[1]").expect("input");

        let result = editor.double_click(stale_b).expect("edit b");
        assert!(result.handled);
        assert_eq!(result.changes.len(), 1);
        let active = editor.active_edit().expect("b is active");
        assert_eq!(active.binding.path(), &path("b"));
        assert_ne!(active.element, stale_b);

        editor.input("3").expect("input");
        editor.blur().expect("commit b");
        assert_eq!(bound.raw_value(), Value::from(json!({"a": [1], "b": 3})));
    }

    #[test]
    fn dispose_is_idempotent() {
        let (bound, mut editor) = painted(json!({"a": 1}));
        editor.dispose();
        editor.dispose();
        assert_eq!(bound.listener_count(), 0);
        assert!(editor.is_disposed());

        bound.set_raw_value(Value::from(json!({"a": 2})), SetOptions::default());
        assert!(!editor.tick().expect("tick"));
        assert_eq!(editor.root_value(), &Value::from(json!({"a": 1})));
    }

    #[test]
    fn props_dispose_unsubscribes() {
        let bound = BoundValue::new(Value::from(json!({})));
        let props = ViewProps::new();
        let mut editor = ObjectEditor::new(bound.clone(), props.clone());
        assert_eq!(bound.listener_count(), 1);

        props.dispose();
        assert_eq!(bound.listener_count(), 0);
        assert!(!editor.tick().expect("tick"));
    }

    #[test]
    fn disabled_view_ignores_gestures() {
        let bound = BoundValue::new(Value::from(json!({"a": 1})));
        let props = ViewProps::new();
        let mut editor = ObjectEditor::new(bound, props.clone());
        editor.tick().expect("paint");

        props.set_disabled(true);
        editor.tick().expect("tick");
        assert!(editor.element().has_class("tp-v-disabled"));

        let toggle = editor.find_toggle(&ValuePath::empty()).expect("toggle");
        assert!(!editor.click(toggle).expect("click").handled);
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(false));
    }

    #[test]
    fn expand_opens_ancestors() {
        let (_bound, mut editor) = painted(json!({"a": {"b": {"c": 1}}}));
        editor.expand("a.b").expect("expand");
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(true));
        assert_eq!(editor.node_expanded(&path("a")), Some(true));
        assert_eq!(editor.node_expanded(&path("a.b")), Some(true));
        assert!(editor.find_leaf(&path("a.b.c")).is_some());

        assert!(matches!(editor.expand("a.x"), Err(Error::MissingPath { .. })));
        assert!(matches!(editor.expand("a..b"), Err(Error::InvalidPath(_))));
    }

    #[test]
    fn expand_commits_pending_edit() {
        let (bound, mut editor) = painted(json!({"a": {"b": 1}, "c": 2}));
        let c = editor.find_leaf(&path("c")).expect("leaf");
        editor.double_click(c).expect("edit");
        editor.input("3").expect("input");

        editor.expand("a").expect("expand");
        assert!(editor.active_edit().is_none());
        assert_eq!(bound.raw_value(), Value::from(json!({"a": {"b": 1}, "c": 3})));
        assert_eq!(editor.node_expanded(&path("a")), Some(true));

        edit(&mut editor, "a.b", "5").expect("editor still usable");
        assert_eq!(bound.raw_value(), Value::from(json!({"a": {"b": 5}, "c": 3})));
    }

    #[test]
    fn expand_keeps_malformed_edit_pending() {
        let (bound, mut editor) = painted(json!({"a": {"b": 1}, "c": 2}));
        let c = editor.find_leaf(&path("c")).expect("leaf");
        editor.double_click(c).expect("edit");
        editor.input("{").expect("input");

        assert!(editor.expand("a").is_err());
        assert_eq!(editor.active_edit().map(|edit| edit.element), Some(c));
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(false));
        assert_eq!(bound.raw_value(), Value::from(json!({"a": {"b": 1}, "c": 2})));
    }

    #[test]
    fn nested_toggle_leaves_ancestor_alone() {
        let (_bound, mut editor) = painted(json!({"a": {"b": {"c": 1}}}));
        toggle(&mut editor, "");
        toggle(&mut editor, "a");

        toggle(&mut editor, "a.b");
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(true));
        assert_eq!(editor.node_expanded(&path("a")), Some(true));
        assert_eq!(editor.node_expanded(&path("a.b")), Some(true));

        toggle(&mut editor, "a.b");
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(true));
        assert_eq!(editor.node_expanded(&path("a")), Some(true));
        assert_eq!(editor.node_expanded(&path("a.b")), Some(false));
    }

    #[test]
    fn non_container_root_is_reported() {
        let bound = BoundValue::new(Value::Number(1.0));
        let mut editor = ObjectEditor::new(bound, ViewProps::new());
        assert!(matches!(editor.tick(), Err(Error::NotAContainer { .. })));
    }
}
