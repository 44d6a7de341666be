//! View properties shared between the host and the editor view.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::logging::targets;
use crate::ui::class_name::ClassName;
use crate::ui::element::Element;

const VIEW: ClassName = ClassName::new("");

type DisposeHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct Inner {
    disabled: bool,
    hidden: bool,
    disposed: bool,
    dispose_hooks: Vec<DisposeHook>,
}

#[derive(Clone, Default)]
pub struct ViewProps {
    inner: Rc<RefCell<Inner>>,
}

impl ViewProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled(&self) -> bool {
        self.inner.borrow().disabled
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.borrow_mut().disabled = disabled;
    }

    pub fn hidden(&self) -> bool {
        self.inner.borrow().hidden
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.inner.borrow_mut().hidden = hidden;
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Registers teardown work. Runs immediately when already disposed.
    pub fn handle_dispose(&self, hook: impl FnOnce() + 'static) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            drop(inner);
            hook();
            return;
        }
        inner.dispose_hooks.push(Box::new(hook));
    }

    /// Runs every registered hook once; later calls do nothing.
    pub fn dispose(&self) {
        let hooks = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            std::mem::take(&mut inner.dispose_hooks)
        };
        debug!(target: targets::HOST, hooks = hooks.len(), "disposing view");
        for hook in hooks {
            hook();
        }
    }

    pub fn class_modifiers(&self) -> Vec<String> {
        let inner = self.inner.borrow();
        let mut out = Vec::new();
        if inner.disabled {
            out.push(VIEW.modifier("disabled"));
        }
        if inner.hidden {
            out.push(VIEW.modifier("hidden"));
        }
        out
    }

    /// Applies the current modifiers to `element`, clearing stale ones.
    pub fn bind_class_modifiers(&self, element: &mut Element) {
        let active = self.class_modifiers();
        for modifier in ["disabled", "hidden"] {
            let class = VIEW.modifier(modifier);
            element.set_class(&class, active.contains(&class));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewProps;
    use crate::ui::element::{Element, ElementIds, Tag};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dispose_runs_hooks_once() {
        let props = ViewProps::new();
        let count = Rc::new(Cell::new(0));
        let hook_count = Rc::clone(&count);
        props.handle_dispose(move || hook_count.set(hook_count.get() + 1));

        props.dispose();
        props.dispose();
        assert_eq!(count.get(), 1);

        let late = Rc::clone(&count);
        props.handle_dispose(move || late.set(late.get() + 10));
        assert_eq!(count.get(), 11);
    }

    #[test]
    fn modifiers_track_flags() {
        let props = ViewProps::new();
        let mut ids = ElementIds::default();
        let mut el = Element::new(ids.next_id(), Tag::Div);

        props.set_disabled(true);
        props.bind_class_modifiers(&mut el);
        assert!(el.has_class("tp-v-disabled"));

        props.set_disabled(false);
        props.set_hidden(true);
        props.bind_class_modifiers(&mut el);
        assert!(!el.has_class("tp-v-disabled"));
        assert!(el.has_class("tp-v-hidden"));
    }
}
