use super::*;

impl Interactive for ObjectEditor {
    fn on_key(&mut self, key: KeyEvent) -> Result<InteractionResult> {
        if !self.accepts_gestures() {
            return Ok(InteractionResult::ignored());
        }
        if self.session.active().is_some() {
            return self.handle_edit_key(key);
        }
        self.handle_normal(key)
    }

    fn on_tick(&mut self) -> Result<InteractionResult> {
        if self.tick()? {
            return Ok(InteractionResult::handled());
        }
        Ok(InteractionResult::ignored())
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.session.active()?;
        layout(self.tree.element(), &self.layout_options()).cursor
    }
}

impl Drawable for ObjectEditor {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        if self.props.hidden() {
            return DrawOutput::default();
        }
        let out = layout(self.tree.element(), &self.layout_options());
        let width = ctx.terminal_size.width as usize;
        DrawOutput {
            lines: out
                .lines
                .iter()
                .map(|line| truncate_line(line, width))
                .collect(),
            cursor: out.cursor,
        }
    }
}

impl ObjectEditor {
    fn handle_normal(&mut self, key: KeyEvent) -> Result<InteractionResult> {
        match key.code {
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => Ok(self.move_focus(1)),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => Ok(self.move_focus(-1)),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_focused(),
            KeyCode::Right | KeyCode::Char('l') => self.set_focused_expanded(true),
            KeyCode::Left | KeyCode::Char('h') => self.set_focused_expanded(false),
            _ => Ok(InteractionResult::ignored()),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<InteractionResult> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => self.blur(),
            KeyCode::Char('w') if ctrl => self.edit_buffer(EditBuffer::delete_word_left),
            KeyCode::Char(ch) if !ctrl => self.edit_buffer(|buffer| {
                buffer.insert_char(ch);
                true
            }),
            KeyCode::Backspace => self.edit_buffer(EditBuffer::backspace),
            KeyCode::Delete => self.edit_buffer(EditBuffer::delete),
            KeyCode::Left => self.edit_buffer(EditBuffer::move_left),
            KeyCode::Right => self.edit_buffer(EditBuffer::move_right),
            KeyCode::Home => self.edit_buffer(|buffer| {
                buffer.move_home();
                true
            }),
            KeyCode::End => self.edit_buffer(|buffer| {
                buffer.move_end();
                true
            }),
            _ => Ok(InteractionResult::ignored()),
        }
    }

    fn move_focus(&mut self, delta: isize) -> InteractionResult {
        let order = self.focus_order();
        if order.is_empty() {
            return InteractionResult::ignored();
        }
        let len = order.len() as isize;
        let current = self
            .focus
            .as_ref()
            .and_then(|focus| order.iter().position(|(target, _)| target == focus));
        let next = match current {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            None if delta > 0 => 0,
            None => len - 1,
        };
        self.focus = Some(order[next as usize].0.clone());
        InteractionResult::handled()
    }

    fn activate_focused(&mut self) -> Result<InteractionResult> {
        let Some(focus) = self.focus.clone() else {
            return Ok(InteractionResult::ignored());
        };
        let Some(id) = self.resolve_focus(&focus) else {
            return Ok(InteractionResult::ignored());
        };
        match focus {
            FocusTarget::Toggle(_) => self.click(id),
            FocusTarget::Leaf(_) => self.double_click(id),
        }
    }

    /// Right opens the focused node. Left closes it, or moves focus up to
    /// the enclosing node when there is nothing to close.
    fn set_focused_expanded(&mut self, expanded: bool) -> Result<InteractionResult> {
        let Some(focus) = self.focus.clone() else {
            return Ok(InteractionResult::ignored());
        };
        if let FocusTarget::Toggle(path) = &focus
            && self.node_expanded(path) == Some(!expanded)
            && let Some(id) = self.resolve_focus(&focus)
        {
            return self.click(id);
        }
        if expanded || focus.path().is_empty() {
            return Ok(InteractionResult::ignored());
        }
        let parent = FocusTarget::Toggle(focus.path().parent());
        if self.resolve_focus(&parent).is_none() {
            return Ok(InteractionResult::ignored());
        }
        self.focus = Some(parent);
        Ok(InteractionResult::handled())
    }
}

#[cfg(test)]
mod tests {
    use crate::widgets::object_editor::{FocusTarget, ObjectEditor};
    use crate::core::value::Value;
    use crate::core::value_path::ValuePath;
    use crate::host::{BoundValue, ViewProps};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, TerminalSize};
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctx(width: u16) -> RenderContext {
        RenderContext {
            terminal_size: TerminalSize { width, height: 24 },
        }
    }

    fn painted(value: serde_json::Value) -> (BoundValue, ObjectEditor) {
        let bound = BoundValue::new(Value::from(value));
        let mut editor = ObjectEditor::new(bound.clone(), ViewProps::new());
        editor.on_tick().expect("paint");
        (bound, editor)
    }

    fn plain(editor: &ObjectEditor, width: u16) -> Vec<String> {
        editor
            .draw(&ctx(width))
            .lines
            .iter()
            .map(|line| line.iter().map(|span| span.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn keyboard_expand_edit_commit() {
        let (bound, mut editor) = painted(json!({"a": 1}));

        editor.on_key(key(KeyCode::Down)).expect("focus");
        assert_eq!(editor.focus(), Some(&FocusTarget::Toggle(ValuePath::empty())));
        editor.on_key(key(KeyCode::Enter)).expect("expand");
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(true));

        editor.on_key(key(KeyCode::Down)).expect("focus leaf");
        editor.on_key(key(KeyCode::Enter)).expect("edit");
        assert!(editor.active_edit().is_some());

        editor.on_key(key(KeyCode::Backspace)).expect("backspace");
        editor.on_key(key(KeyCode::Char('7'))).expect("type");
        let result = editor.on_key(key(KeyCode::Enter)).expect("commit");
        assert_eq!(result.changes.len(), 1);
        assert_eq!(bound.raw_value(), Value::from(json!({"a": 7})));
        assert!(editor.active_edit().is_none());
    }

    #[test]
    fn focus_wraps_around() {
        let (_bound, mut editor) = painted(json!({"a": 1, "b": 2}));
        editor.on_key(key(KeyCode::Up)).expect("last");
        assert!(matches!(editor.focus(), Some(FocusTarget::Leaf(path)) if path.to_string() == "b"));
        editor.on_key(key(KeyCode::Down)).expect("wrap");
        assert_eq!(editor.focus(), Some(&FocusTarget::Toggle(ValuePath::empty())));
    }

    #[test]
    fn left_closes_then_climbs() {
        let (_bound, mut editor) = painted(json!({"a": {"b": 1}}));
        editor.on_key(key(KeyCode::Down)).expect("focus root");
        editor.on_key(key(KeyCode::Right)).expect("open root");
        editor.on_key(key(KeyCode::Down)).expect("focus a");
        assert!(matches!(editor.focus(), Some(FocusTarget::Toggle(path)) if path.to_string() == "a"));

        editor.on_key(key(KeyCode::Left)).expect("climb");
        assert_eq!(editor.focus(), Some(&FocusTarget::Toggle(ValuePath::empty())));
        editor.on_key(key(KeyCode::Left)).expect("close");
        assert_eq!(editor.node_expanded(&ValuePath::empty()), Some(false));
    }

    #[test]
    fn draw_lays_out_and_places_cursor() {
        let (_bound, mut editor) = painted(json!({"a": 12}));
        assert_eq!(plain(&editor, 80), vec!["▼ { a: 12 }"]);
        assert!(editor.cursor_pos().is_none());

        let leaf = editor.find_leaf(&ValuePath::parse("a").expect("path")).expect("leaf");
        editor.double_click(leaf).expect("edit");
        let out = editor.draw(&ctx(80));
        let cursor = out.cursor.expect("cursor");
        assert_eq!(cursor.row, 0);
        assert_eq!(cursor.col, 2 + 2 + 3 + 2);
        assert_eq!(editor.cursor_pos(), Some(cursor));

        assert_eq!(plain(&editor, 6), vec!["▼ { a…"]);
    }

    #[test]
    fn hidden_view_draws_nothing() {
        let bound = BoundValue::new(Value::from(json!({})));
        let props = ViewProps::new();
        let mut editor = ObjectEditor::new(bound, props.clone());
        editor.on_tick().expect("paint");
        props.set_hidden(true);
        assert!(editor.draw(&ctx(80)).lines.is_empty());
    }
}
