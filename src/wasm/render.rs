use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::{closure::Closure, JsCast};

use super::dom;
use crate::error::Result;
use crate::motion::FrameMonitor;

/// Longest step handed to effects; a hidden tab resumes without a jump.
const MAX_STEP: Duration = Duration::from_millis(100);

type FrameClosure = Closure<dyn FnMut(f64)>;

/// requestAnimationFrame loop shared by every time-driven effect.
/// Dropping it cancels the pending frame and frees the closure.
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    frame: Rc<RefCell<Option<FrameClosure>>>,
}

/// Start the loop; `tick` receives the elapsed time since the previous frame.
pub fn start(mut tick: impl FnMut(Duration) + 'static, mut monitor: FrameMonitor) -> Result<FrameLoop> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let pending = Rc::new(Cell::new(None));
    let running = Rc::new(Cell::new(true));

    let next_pending = pending.clone();
    let still_running = running.clone();
    let mut last: Option<f64> = None;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        if !still_running.get() {
            return;
        }
        if let Some(prev) = last {
            let frame_ms = now - prev;
            monitor.record(frame_ms);
            let step = Duration::from_secs_f64((frame_ms.max(0.0)) / 1000.0).min(MAX_STEP);
            tick(step);
        }
        last = Some(now);

        // schedule next
        let handle = web_sys::window().and_then(|w| {
            let frame = f.borrow();
            let callback = frame.as_ref()?;
            w.request_animation_frame(callback.as_ref().unchecked_ref()).ok()
        });
        next_pending.set(handle);
    }) as Box<dyn FnMut(f64)>));

    let handle = {
        let frame = g.borrow();
        let callback = frame.as_ref().map(|c| c.as_ref().unchecked_ref::<js_sys::Function>().clone());
        match callback {
            Some(callback) => dom::window()?.request_animation_frame(&callback)?,
            None => 0,
        }
    };
    pending.set(Some(handle));

    Ok(FrameLoop {
        pending,
        running,
        frame: g,
    })
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.running.set(false);
        if let (Some(handle), Some(window)) = (self.pending.take(), web_sys::window()) {
            window.cancel_animation_frame(handle).ok();
        }
        // breaks the closure's reference back to itself
        self.frame.borrow_mut().take();
    }
}
