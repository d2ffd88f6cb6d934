use std::cell::Cell;
use std::rc::Rc;

use super::{PINK, VIOLET};
use crate::motion::interpolate;
use crate::signal::{SignalKind, SignalSource, Subscription};

/// Gradient stops from the top of the line to the bottom.
pub const BEAM_STOPS: [(f64, &str, f64); 3] = [(0.0, VIOLET, 0.0), (50.0, VIOLET, 1.0), (100.0, PINK, 1.0)];

/// Container position relative to the viewport, as reported by
/// `getBoundingClientRect` plus the window height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

impl ContainerMetrics {
    /// 0 when the container's top reaches the viewport centre, 1 when its
    /// bottom does, clamped in between.
    pub fn scroll_progress(&self) -> f64 {
        let center = self.viewport_height / 2.0;
        if self.height <= 0.0 {
            return if self.top <= center { 1.0 } else { 0.0 };
        }
        // progress grows as `top` moves from `center` up to `center - height`
        interpolate(center - self.top, (0.0, self.height), (0.0, 1.0))
    }
}

/// Share of the line that is drawn for a given scroll progress.
pub fn reveal_fraction(progress: f64) -> f64 {
    interpolate(progress, (0.0, 1.0), (0.0, 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamFrame {
    pub progress: f64,
    pub revealed: f64,
}

impl BeamFrame {
    pub fn from_progress(progress: f64) -> Self {
        Self {
            progress,
            revealed: reveal_fraction(progress),
        }
    }

    /// `stroke-dasharray` for a line whose `pathLength` is 1.
    pub fn dash_array(&self) -> String {
        format!("{} 1", self.revealed)
    }

    /// Round caps still paint a dot at zero length.
    pub fn visible(&self) -> bool {
        self.revealed > 0.0
    }
}

/// Vertical line beside a timeline whose drawn length follows scrolling.
///
/// Recomputed on every scroll and resize, no debouncing, so scrolling back up
/// retracts the line along the same mapping.
pub struct TracingBeam {
    progress: Rc<Cell<f64>>,
    _subs: [Subscription; 2],
}

impl TracingBeam {
    pub fn mount(
        source: &dyn SignalSource,
        measure: impl Fn() -> Option<ContainerMetrics> + 'static,
        paint: impl Fn(BeamFrame) + 'static,
    ) -> Self {
        let progress = Rc::new(Cell::new(0.0));
        let update: Rc<dyn Fn()> = {
            let progress = Rc::clone(&progress);
            Rc::new(move || {
                if let Some(metrics) = measure() {
                    let frame = BeamFrame::from_progress(metrics.scroll_progress());
                    progress.set(frame.progress);
                    paint(frame);
                }
            })
        };
        update();
        let on_scroll = Rc::clone(&update);
        let on_resize = update;
        Self {
            progress,
            _subs: [
                source.subscribe(SignalKind::Scroll, Box::new(move |_| on_scroll())),
                source.subscribe(SignalKind::Resize, Box::new(move |_| on_resize())),
            ],
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    pub fn frame(&self) -> BeamFrame {
        BeamFrame::from_progress(self.progress())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::signal::testing::RecordingSignals;
    use crate::signal::SignalEvent;

    fn at(top: f64) -> ContainerMetrics {
        ContainerMetrics {
            top,
            height: 1000.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn range_starts_and_ends_at_viewport_centre() {
        assert_eq!(at(900.0).scroll_progress(), 0.0);
        assert_eq!(at(400.0).scroll_progress(), 0.0);
        assert_eq!(at(-100.0).scroll_progress(), 0.5);
        assert_eq!(at(-600.0).scroll_progress(), 1.0);
        assert_eq!(at(-2000.0).scroll_progress(), 1.0);
    }

    #[test]
    fn zero_height_container_snaps() {
        let flat = ContainerMetrics { top: 100.0, height: 0.0, viewport_height: 800.0 };
        assert_eq!(flat.scroll_progress(), 1.0);
        let below = ContainerMetrics { top: 500.0, ..flat };
        assert_eq!(below.scroll_progress(), 0.0);
    }

    #[test]
    fn reveal_is_identity_on_unit_range() {
        assert_eq!(reveal_fraction(0.0), 0.0);
        assert_eq!(reveal_fraction(1.0), 1.0);
        let mut last = -1.0;
        for i in 0..=100 {
            let r = reveal_fraction(i as f64 / 100.0);
            assert!(r >= last);
            last = r;
        }
        assert!(reveal_fraction(0.3) < reveal_fraction(0.6));
    }

    #[test]
    fn gradient_is_fixed() {
        assert_eq!(BEAM_STOPS[0].2, 0.0);
        assert_eq!(BEAM_STOPS[1].1, VIOLET);
        assert_eq!(BEAM_STOPS[2].1, PINK);
    }

    #[test]
    fn scrolling_back_up_retracts_the_line() {
        let signals = RecordingSignals::new();
        let top = Rc::new(Cell::new(400.0));
        let frames = Rc::new(RefCell::new(Vec::new()));
        let reader = Rc::clone(&top);
        let sink = Rc::clone(&frames);
        let beam = TracingBeam::mount(
            &signals,
            move || Some(at(reader.get())),
            move |f| sink.borrow_mut().push(f.revealed),
        );
        assert_eq!(beam.progress(), 0.0);
        assert!(!beam.frame().visible());

        top.set(-200.0);
        signals.emit(SignalEvent::Scroll);
        let deep = beam.frame().revealed;
        top.set(100.0);
        signals.emit(SignalEvent::Scroll);
        let shallow = beam.frame().revealed;

        assert!((deep - 0.6).abs() < 1e-9);
        assert!((shallow - 0.3).abs() < 1e-9);
        assert_eq!(frames.borrow().len(), 3);
        assert_eq!(beam.frame().dash_array(), format!("{} 1", shallow));
    }

    #[test]
    fn unmount_removes_scroll_and_resize_handlers() {
        let signals = RecordingSignals::new();
        let beam = TracingBeam::mount(&signals, || None, |_| {});
        assert_eq!(signals.active(SignalKind::Scroll), 1);
        assert_eq!(signals.active(SignalKind::Resize), 1);
        drop(beam);
        assert_eq!(signals.active_total(), 0);
        assert_eq!(signals.unsubscribe_calls(), 2);
    }
}
