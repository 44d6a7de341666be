use crate::core::Result;
use crate::ui::element::ElementId;
use crate::widgets::leaf_editor::text_edit::EditBuffer;
use crate::widgets::leaf_editor::{LeafBinding, token_text};

/// The leaf currently accepting text input.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEdit {
    pub element: ElementId,
    pub binding: LeafBinding,
    pub buffer: EditBuffer,
}

impl ActiveEdit {
    /// Starts editing with the token text of the bound value.
    pub fn new(element: ElementId, binding: LeafBinding) -> Self {
        let buffer = EditBuffer::new(token_text(binding.value()));
        Self {
            element,
            binding,
            buffer,
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }
}

/// Holds at most one active editor for a whole tree.
///
/// Switching editors commits the previous one first; when that commit fails
/// the previous editor stays active and the switch is refused.
#[derive(Debug, Default)]
pub struct EditSession {
    active: Option<ActiveEdit>,
}

impl EditSession {
    pub fn active(&self) -> Option<&ActiveEdit> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveEdit> {
        self.active.as_mut()
    }

    pub fn is_active(&self, element: ElementId) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.element == element)
    }

    /// Drops the pending edit without committing it.
    pub fn clear(&mut self) -> Option<ActiveEdit> {
        self.active.take()
    }

    pub fn try_activate<F>(&mut self, next: ActiveEdit, commit: F) -> Result<()>
    where
        F: FnOnce(&ActiveEdit) -> Result<()>,
    {
        if let Some(previous) = self.active.take() {
            if previous.element == next.element {
                self.active = Some(previous);
                return Ok(());
            }
            if let Err(err) = commit(&previous) {
                self.active = Some(previous);
                return Err(err);
            }
        }
        self.active = Some(next);
        Ok(())
    }

    /// Commits and clears the active editor, if any.
    pub fn commit_active<F, R>(&mut self, commit: F) -> Result<Option<R>>
    where
        F: FnOnce(&ActiveEdit) -> Result<R>,
    {
        let Some(active) = self.active.take() else {
            return Ok(None);
        };
        match commit(&active) {
            Ok(out) => Ok(Some(out)),
            Err(err) => {
                self.active = Some(active);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveEdit, EditSession};
    use crate::core::value::Value;
    use crate::core::value_path::ValuePath;
    use crate::core::{Error, Result};
    use crate::ui::element::ElementIds;
    use crate::widgets::leaf_editor::{LeafBinding, parse_edit_text};

    fn edit(ids: &mut ElementIds, key: &str, value: Value) -> ActiveEdit {
        let path = ValuePath::parse(key).expect("path");
        ActiveEdit::new(ids.next_id(), LeafBinding::new(path, value))
    }

    #[test]
    fn activating_second_leaf_commits_first() {
        let mut ids = ElementIds::default();
        let mut session = EditSession::default();
        let a = edit(&mut ids, "a", Value::Number(1.0));
        let b = edit(&mut ids, "b", Value::Number(2.0));
        let b_id = b.element;

        session.try_activate(a, |_| panic!("nothing to commit")).expect("a");
        let mut committed = Vec::new();
        session
            .try_activate(b, |prev| {
                committed.push(prev.text().to_string());
                Ok(())
            })
            .expect("b");

        assert_eq!(committed, vec!["1".to_string()]);
        assert!(session.is_active(b_id));
    }

    #[test]
    fn failed_commit_keeps_previous_active() {
        let mut ids = ElementIds::default();
        let mut session = EditSession::default();
        let a = edit(&mut ids, "a", Value::Number(1.0));
        let a_id = a.element;
        session.try_activate(a, |_| Ok(())).expect("a");
        if let Some(active) = session.active_mut() {
            active.buffer.set_text("{oops");
        }

        let b = edit(&mut ids, "b", Value::Number(2.0));
        let result = session.try_activate(b, |prev| parse_edit_text(prev.text()).map(|_| ()));

        assert!(matches!(result, Err(Error::MalformedEdit { .. })));
        assert!(session.is_active(a_id));
    }

    #[test]
    fn commit_active_clears_slot() {
        let mut ids = ElementIds::default();
        let mut session = EditSession::default();
        session
            .try_activate(edit(&mut ids, "a", Value::Bool(true)), |_| Ok(()))
            .expect("a");
        let out: Result<Option<Value>> = session.commit_active(|edit| parse_edit_text(edit.text()));
        assert_eq!(out.expect("commit"), Some(Value::Bool(true)));
        assert!(session.active().is_none());
        assert_eq!(session.commit_active(|_| Ok(())).expect("noop"), None);
    }
}
