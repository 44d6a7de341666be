//! Shared value cell the editor is bound to.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::core::event::{SetOptions, ValueNotification};
use crate::core::value::Value;
use crate::logging::targets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&ValueNotification)>;

struct Inner {
    raw: Value,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

/// Single-threaded value cell with change notification.
///
/// Clones share the same cell. Listeners run after the internal borrow is
/// released, so a listener may read or write the cell again.
#[derive(Clone)]
pub struct BoundValue {
    inner: Rc<RefCell<Inner>>,
}

impl BoundValue {
    pub fn new(value: Value) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                raw: value,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    pub fn raw_value(&self) -> Value {
        self.inner.borrow().raw.clone()
    }

    pub fn with_raw_value<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.inner.borrow().raw)
    }

    /// Host-side write. Returns whether listeners were notified.
    pub fn set_raw_value(&self, value: Value, options: SetOptions) -> bool {
        self.write(value, options, false)
    }

    /// Write coming from the editor's own commit path.
    pub fn set_raw_value_from_view(&self, value: Value, options: SetOptions) -> bool {
        self.write(value, options, true)
    }

    fn write(&self, value: Value, options: SetOptions, caused_by_self: bool) -> bool {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if !options.force_emit && inner.raw == value {
                return false;
            }
            inner.raw = value.clone();
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect::<Vec<_>>()
        };
        trace!(target: targets::HOST, caused_by_self, listeners = listeners.len(), "value changed");
        let notification = ValueNotification {
            value,
            options,
            caused_by_self,
        };
        for listener in listeners {
            listener(&notification);
        }
        true
    }

    pub fn on_change(&self, listener: impl Fn(&ValueNotification) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Returns false when `id` was not registered (already removed).
    pub fn off_change(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}
