use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

use super::dom;
use crate::error::Result;
use crate::signal::{Handler, KeyPress, SignalEvent, SignalKind, SignalSource, Subscription};

/// [`SignalSource`] over a DOM event target. Each subscription owns a gloo
/// listener, so cancelling it calls `removeEventListener`.
#[derive(Clone)]
pub struct DomSignals {
    target: EventTarget,
}

impl DomSignals {
    pub fn window() -> Result<Self> {
        Ok(Self {
            target: dom::window()?.into(),
        })
    }

    pub fn document() -> Result<Self> {
        Ok(Self {
            target: dom::document()?.into(),
        })
    }

    pub fn element(element: &web_sys::Element) -> Self {
        Self {
            target: element.clone().into(),
        }
    }
}

impl SignalSource for DomSignals {
    fn subscribe(&self, kind: SignalKind, mut handler: Handler) -> Subscription {
        let callback = move |event: &Event| {
            let Some(signal) = translate(kind, event) else {
                return;
            };
            handler(&signal);
            if let SignalEvent::KeyDown(press) = &signal {
                if press.default_prevented() {
                    event.prevent_default();
                }
            }
        };
        let listener = if kind == SignalKind::KeyDown {
            EventListener::new_with_options(
                &self.target,
                kind.event_name(),
                EventListenerOptions::enable_prevent_default(),
                callback,
            )
        } else {
            EventListener::new(&self.target, kind.event_name(), callback)
        };
        Subscription::new(move || drop(listener))
    }
}

fn translate(kind: SignalKind, event: &Event) -> Option<SignalEvent> {
    match kind {
        SignalKind::Resize => {
            let (width, height) = dom::viewport_size(&web_sys::window()?);
            Some(SignalEvent::Resize { width, height })
        }
        SignalKind::PointerMove => event.dyn_ref::<MouseEvent>().map(|m| SignalEvent::PointerMove {
            x: m.client_x() as f64,
            y: m.client_y() as f64,
        }),
        SignalKind::PointerEnter => Some(SignalEvent::PointerEnter),
        SignalKind::PointerLeave => Some(SignalEvent::PointerLeave),
        SignalKind::Scroll => Some(SignalEvent::Scroll),
        SignalKind::KeyDown => event
            .dyn_ref::<KeyboardEvent>()
            .map(|k| SignalEvent::KeyDown(KeyPress::new(k.key(), k.shift_key()))),
    }
}
