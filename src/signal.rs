//! Browser signals (resize, pointer, scroll, keyboard) behind a small trait so
//! effects can be mounted against the real window or a recording fake.
//!
//! A [`Subscription`] is an RAII guard: dropping it unsubscribes. Effects keep
//! their guards in fields, so tearing an effect down is just dropping it.

use std::cell::Cell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Resize,
    PointerMove,
    PointerEnter,
    PointerLeave,
    Scroll,
    KeyDown,
}

impl SignalKind {
    /// DOM event name the browser adapter listens for.
    pub fn event_name(self) -> &'static str {
        match self {
            SignalKind::Resize => "resize",
            SignalKind::PointerMove => "mousemove",
            SignalKind::PointerEnter => "mouseenter",
            SignalKind::PointerLeave => "mouseleave",
            SignalKind::Scroll => "scroll",
            SignalKind::KeyDown => "keydown",
        }
    }
}

#[derive(Debug)]
pub struct KeyPress {
    pub key: String,
    pub shift: bool,
    prevented: Cell<bool>,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
            prevented: Cell::new(false),
        }
    }

    /// Ask the adapter to cancel the browser's default action for this key.
    pub fn prevent_default(&self) {
        self.prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

#[derive(Debug)]
pub enum SignalEvent {
    Resize { width: f64, height: f64 },
    PointerMove { x: f64, y: f64 },
    PointerEnter,
    PointerLeave,
    Scroll,
    KeyDown(KeyPress),
}

impl SignalEvent {
    pub fn kind(&self) -> SignalKind {
        match self {
            SignalEvent::Resize { .. } => SignalKind::Resize,
            SignalEvent::PointerMove { .. } => SignalKind::PointerMove,
            SignalEvent::PointerEnter => SignalKind::PointerEnter,
            SignalEvent::PointerLeave => SignalKind::PointerLeave,
            SignalEvent::Scroll => SignalKind::Scroll,
            SignalEvent::KeyDown(_) => SignalKind::KeyDown,
        }
    }
}

pub type Handler = Box<dyn FnMut(&SignalEvent)>;

pub trait SignalSource {
    fn subscribe(&self, kind: SignalKind, handler: Handler) -> Subscription;
}

/// Unsubscribes exactly once, on [`Subscription::cancel`] or drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    type SharedHandler = Rc<RefCell<Handler>>;

    #[derive(Default)]
    struct Registry {
        next_id: u64,
        handlers: Vec<(u64, SignalKind, SharedHandler)>,
        subscribe_calls: usize,
        unsubscribe_calls: usize,
    }

    /// In-memory signal source that records every subscribe and unsubscribe.
    #[derive(Clone, Default)]
    pub struct RecordingSignals {
        registry: Rc<RefCell<Registry>>,
    }

    impl RecordingSignals {
        pub fn new() -> Self {
            Self::default()
        }

        /// Deliver `event` to every matching handler and hand it back so
        /// tests can inspect what the handlers did to it.
        pub fn emit(&self, event: SignalEvent) -> SignalEvent {
            let kind = event.kind();
            let targets: Vec<SharedHandler> = self
                .registry
                .borrow()
                .handlers
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .map(|(_, _, h)| Rc::clone(h))
                .collect();
            for handler in targets {
                (handler.borrow_mut())(&event);
            }
            event
        }

        pub fn active(&self, kind: SignalKind) -> usize {
            self.registry
                .borrow()
                .handlers
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .count()
        }

        pub fn active_total(&self) -> usize {
            self.registry.borrow().handlers.len()
        }

        pub fn subscribe_calls(&self) -> usize {
            self.registry.borrow().subscribe_calls
        }

        pub fn unsubscribe_calls(&self) -> usize {
            self.registry.borrow().unsubscribe_calls
        }
    }

    impl SignalSource for RecordingSignals {
        fn subscribe(&self, kind: SignalKind, handler: Handler) -> Subscription {
            let id = {
                let mut registry = self.registry.borrow_mut();
                let id = registry.next_id;
                registry.next_id += 1;
                registry.subscribe_calls += 1;
                registry
                    .handlers
                    .push((id, kind, Rc::new(RefCell::new(handler))));
                id
            };
            let registry = Rc::downgrade(&self.registry);
            Subscription::new(move || {
                if let Some(registry) = registry.upgrade() {
                    let mut registry = registry.borrow_mut();
                    registry.handlers.retain(|(i, _, _)| *i != id);
                    registry.unsubscribe_calls += 1;
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::testing::RecordingSignals;
    use super::*;

    #[test]
    fn drop_unsubscribes_once() {
        let signals = RecordingSignals::new();
        let sub = signals.subscribe(SignalKind::Scroll, Box::new(|_| {}));
        assert_eq!(signals.active(SignalKind::Scroll), 1);
        drop(sub);
        assert_eq!(signals.active_total(), 0);
        assert_eq!(signals.unsubscribe_calls(), 1);
    }

    #[test]
    fn cancel_does_not_run_twice() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let sub = Subscription::new(move || seen.set(seen.get() + 1));
        sub.cancel();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn emit_reaches_only_matching_kind() {
        let signals = RecordingSignals::new();
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let _sub = signals.subscribe(
            SignalKind::PointerMove,
            Box::new(move |_| seen.set(seen.get() + 1)),
        );
        signals.emit(SignalEvent::Scroll);
        signals.emit(SignalEvent::PointerMove { x: 1.0, y: 2.0 });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn key_press_records_prevent_default() {
        let press = KeyPress::new("Tab", true);
        assert!(!press.default_prevented());
        press.prevent_default();
        assert!(press.default_prevented());
    }
}
