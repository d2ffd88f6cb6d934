//! Project detail dialog: Escape closes it and Tab focus wraps inside it.

use std::rc::Rc;

use crate::signal::{SignalEvent, SignalKind, SignalSource, Subscription};

/// Focusable elements inside the dialog, in tab order.
pub trait FocusScope {
    fn focusable_count(&self) -> usize;
    /// Index of the focused element, if focus is inside the scope.
    fn focused_index(&self) -> Option<usize>;
    fn focus(&self, index: usize);
}

/// Where focus should jump when Tab is pressed at `current`, or `None` to
/// let the browser move it normally.
pub fn wrap_focus(current: Option<usize>, count: usize, shift: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (current, shift) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

/// Keyboard handling for one open dialog. Dropping it removes both keydown
/// handlers.
pub struct ModalKeys {
    _escape: Subscription,
    _trap: Subscription,
}

impl ModalKeys {
    pub fn attach(
        source: &dyn SignalSource,
        scope: Rc<dyn FocusScope>,
        on_close: impl Fn() + 'static,
    ) -> Self {
        let escape = source.subscribe(
            SignalKind::KeyDown,
            Box::new(move |event| {
                if let SignalEvent::KeyDown(press) = event {
                    if press.key == "Escape" {
                        on_close();
                    }
                }
            }),
        );
        let trap = source.subscribe(
            SignalKind::KeyDown,
            Box::new(move |event| {
                let SignalEvent::KeyDown(press) = event else {
                    return;
                };
                if press.key != "Tab" {
                    return;
                }
                if let Some(next) =
                    wrap_focus(scope.focused_index(), scope.focusable_count(), press.shift)
                {
                    press.prevent_default();
                    scope.focus(next);
                }
            }),
        );
        Self {
            _escape: escape,
            _trap: trap,
        }
    }
}

/// Which project, if any, is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    selected: Option<String>,
}

impl ModalState {
    pub fn open(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn close(&mut self) -> Option<String> {
        self.selected.take()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::signal::testing::RecordingSignals;
    use crate::signal::KeyPress;

    struct FakeScope {
        count: usize,
        focused: Cell<Option<usize>>,
    }

    impl FocusScope for FakeScope {
        fn focusable_count(&self) -> usize {
            self.count
        }
        fn focused_index(&self) -> Option<usize> {
            self.focused.get()
        }
        fn focus(&self, index: usize) {
            self.focused.set(Some(index));
        }
    }

    #[test]
    fn wrap_only_at_the_edges() {
        assert_eq!(wrap_focus(Some(2), 3, false), Some(0));
        assert_eq!(wrap_focus(Some(0), 3, true), Some(2));
        assert_eq!(wrap_focus(Some(1), 3, false), None);
        assert_eq!(wrap_focus(Some(1), 3, true), None);
        assert_eq!(wrap_focus(None, 3, false), None);
        assert_eq!(wrap_focus(Some(0), 0, true), None);
        assert_eq!(wrap_focus(Some(0), 1, false), Some(0));
    }

    #[test]
    fn tab_from_last_wraps_and_prevents_default() {
        let signals = RecordingSignals::new();
        let scope = Rc::new(FakeScope { count: 3, focused: Cell::new(Some(2)) });
        let _keys = ModalKeys::attach(&signals, scope.clone(), || {});

        let event = signals.emit(SignalEvent::KeyDown(KeyPress::new("Tab", false)));
        assert_eq!(scope.focused.get(), Some(0));
        assert!(matches!(event, SignalEvent::KeyDown(ref p) if p.default_prevented()));

        signals.emit(SignalEvent::KeyDown(KeyPress::new("Tab", true)));
        assert_eq!(scope.focused.get(), Some(2));

        // mid-list Tab is left to the browser
        scope.focused.set(Some(1));
        let event = signals.emit(SignalEvent::KeyDown(KeyPress::new("Tab", false)));
        assert_eq!(scope.focused.get(), Some(1));
        assert!(matches!(event, SignalEvent::KeyDown(ref p) if !p.default_prevented()));
    }

    #[test]
    fn escape_closes() {
        let signals = RecordingSignals::new();
        let closed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&closed);
        let scope = Rc::new(FakeScope { count: 1, focused: Cell::new(None) });
        let _keys = ModalKeys::attach(&signals, scope, move || flag.set(true));
        signals.emit(SignalEvent::KeyDown(KeyPress::new("Enter", false)));
        assert!(!closed.get());
        signals.emit(SignalEvent::KeyDown(KeyPress::new("Escape", false)));
        assert!(closed.get());
    }

    #[test]
    fn closing_removes_both_key_handlers() {
        let signals = RecordingSignals::new();
        let scope = Rc::new(FakeScope { count: 2, focused: Cell::new(None) });
        let keys = ModalKeys::attach(&signals, scope, || {});
        assert_eq!(signals.active(SignalKind::KeyDown), 2);
        drop(keys);
        assert_eq!(signals.active_total(), 0);
        assert_eq!(signals.unsubscribe_calls(), 2);
    }

    #[test]
    fn state_tracks_selection() {
        let mut state = ModalState::default();
        assert!(!state.is_open());
        state.open("floatchat");
        assert_eq!(state.selected(), Some("floatchat"));
        assert_eq!(state.close().as_deref(), Some("floatchat"));
        assert!(!state.is_open());
    }
}
