use std::cell::Cell;
use std::rc::Rc;

use crate::signal::{SignalEvent, SignalKind, SignalSource, Subscription};
use crate::viewport::ViewportClass;

/// Pointer coordinates in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Latest pointer position, tracked only while the viewport is not mobile.
///
/// On mobile no pointer-move handler is ever registered. Intermediate moves are
/// not queued: each event overwrites the previous position.
pub struct PointerTracker {
    latest: Rc<Cell<Option<PointerPosition>>>,
    on_move: Rc<dyn Fn(PointerPosition)>,
    subscription: Option<Subscription>,
}

impl PointerTracker {
    pub fn new(on_move: impl Fn(PointerPosition) + 'static) -> Self {
        Self {
            latest: Rc::new(Cell::new(None)),
            on_move: Rc::new(on_move),
            subscription: None,
        }
    }

    /// Subscribe or unsubscribe to match `class`.
    pub fn sync(&mut self, class: ViewportClass, source: &dyn SignalSource) {
        if class.is_mobile() {
            if self.subscription.take().is_some() {
                self.latest.set(None);
            }
            return;
        }
        if self.subscription.is_some() {
            return;
        }
        let latest = Rc::clone(&self.latest);
        let on_move = Rc::clone(&self.on_move);
        self.subscription = Some(source.subscribe(
            SignalKind::PointerMove,
            Box::new(move |event| {
                if let SignalEvent::PointerMove { x, y } = *event {
                    let position = PointerPosition { x, y };
                    latest.set(Some(position));
                    on_move(position);
                }
            }),
        ));
    }

    #[inline]
    pub fn latest(&self) -> Option<PointerPosition> {
        self.latest.get()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }
}
