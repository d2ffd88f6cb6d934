use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::signal::{SignalEvent, SignalKind, SignalSource, Subscription};

/// Width thresholds in CSS pixels. `tablet` is the first tablet width and
/// `desktop` the first desktop width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    #[serde(default = "default_tablet")]
    pub tablet: f64,
    #[serde(default = "default_desktop")]
    pub desktop: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet: default_tablet(),
            desktop: default_desktop(),
        }
    }
}

fn default_tablet() -> f64 {
    768.0
}

fn default_desktop() -> f64 {
    1024.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportClass {
    /// Total over every input: widths that are not a number classify as mobile.
    pub fn classify(width: f64, breakpoints: &Breakpoints) -> Self {
        if !(width >= breakpoints.tablet) {
            ViewportClass::Mobile
        } else if width < breakpoints.desktop {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }

    #[inline]
    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Tablet => "tablet",
            ViewportClass::Desktop => "desktop",
        }
    }
}

type Watcher = Rc<RefCell<Box<dyn FnMut(ViewportClass)>>>;

struct Shared {
    current: Cell<ViewportClass>,
    breakpoints: Breakpoints,
    next_id: Cell<u64>,
    watchers: RefCell<Vec<(u64, Watcher)>>,
}

impl Shared {
    fn observe(&self, width: f64) {
        let class = ViewportClass::classify(width, &self.breakpoints);
        if class == self.current.replace(class) {
            return;
        }
        log::debug!("viewport class -> {}", class.as_str());
        let watchers: Vec<Watcher> = self
            .watchers
            .borrow()
            .iter()
            .map(|(_, w)| Rc::clone(w))
            .collect();
        for watcher in watchers {
            (watcher.borrow_mut())(class);
        }
    }
}

/// Tracks the viewport class and notifies watchers when a resize crosses a
/// breakpoint. Dropping the classifier removes its resize handler.
pub struct ViewportClassifier {
    shared: Rc<Shared>,
    _resize: Subscription,
}

impl ViewportClassifier {
    pub fn mount(source: &dyn SignalSource, width: f64, breakpoints: Breakpoints) -> Self {
        let shared = Rc::new(Shared {
            current: Cell::new(ViewportClass::classify(width, &breakpoints)),
            breakpoints,
            next_id: Cell::new(0),
            watchers: RefCell::new(Vec::new()),
        });
        let weak: Weak<Shared> = Rc::downgrade(&shared);
        let resize = source.subscribe(
            SignalKind::Resize,
            Box::new(move |event| {
                if let (SignalEvent::Resize { width, .. }, Some(shared)) = (event, weak.upgrade()) {
                    shared.observe(*width);
                }
            }),
        );
        Self {
            shared,
            _resize: resize,
        }
    }

    #[inline]
    pub fn current(&self) -> ViewportClass {
        self.shared.current.get()
    }

    pub fn breakpoints(&self) -> &Breakpoints {
        &self.shared.breakpoints
    }

    /// Call `handler` with the new class every time it changes.
    pub fn watch(&self, handler: impl FnMut(ViewportClass) + 'static) -> Subscription {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        self.shared
            .watchers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(Box::new(handler)))));
        let weak = Rc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.watchers.borrow_mut().retain(|(i, _)| *i != id);
            }
        })
    }

    pub fn watcher_count(&self) -> usize {
        self.shared.watchers.borrow().len()
    }
}
