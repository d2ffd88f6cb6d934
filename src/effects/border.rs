use std::f64::consts::PI;
use std::time::Duration;

use super::{PINK, VIOLET};
use crate::motion::{advance_phase, Animate, MotionConfig};

pub const DEFAULT_BORDER_SECS: f64 = 4.0;
/// Corner radius of the outline, in pixels.
pub const BORDER_RADIUS: f64 = 12.0;
/// The outline is drawn this far inside the content box.
pub const BORDER_INSET: f64 = 1.0;
pub const BORDER_STOPS: [(f64, &str); 3] = [(0.0, VIOLET), (50.0, PINK), (100.0, VIOLET)];

/// Perimeter of a `width` x `height` rectangle with corner radius `radius`.
/// The radius is limited to half the shorter side, as SVG does.
pub fn rounded_rect_perimeter(width: f64, height: f64, radius: f64) -> f64 {
    if !(width > 0.0 && height > 0.0) {
        return 0.0;
    }
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    2.0 * (width + height) - 8.0 * r + 2.0 * PI * r
}

/// Outline geometry for a content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Outline {
    pub fn for_box(width: f64, height: f64) -> Self {
        Self {
            x: BORDER_INSET,
            y: BORDER_INSET,
            width: (width - 2.0 * BORDER_INSET).max(0.0),
            height: (height - 2.0 * BORDER_INSET).max(0.0),
            radius: BORDER_RADIUS,
        }
    }

    pub fn path_length(&self) -> f64 {
        rounded_rect_perimeter(self.width, self.height, self.radius)
    }
}

/// Coloured dash travelling around a rounded outline.
///
/// The path length is 0 until the wrapped content has been measured; while
/// unmeasured the stroke is hidden instead of drawing a solid outline.
#[derive(Debug, Clone)]
pub struct MovingBorder {
    duration: Duration,
    motion: MotionConfig,
    outline: Option<Outline>,
    phase: f64,
}

impl MovingBorder {
    pub fn new(duration_secs: f64, motion: MotionConfig) -> Self {
        let secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            duration_secs
        } else {
            DEFAULT_BORDER_SECS
        };
        Self {
            duration: Duration::from_secs_f64(secs),
            motion,
            outline: None,
            phase: 0.0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Record the content box size. Returns true when the outline changed.
    pub fn measure(&mut self, width: f64, height: f64) -> bool {
        let outline = Outline::for_box(width, height);
        if self.outline == Some(outline) {
            return false;
        }
        self.outline = Some(outline);
        true
    }

    pub fn outline(&self) -> Option<Outline> {
        self.outline
    }

    pub fn path_length(&self) -> f64 {
        self.outline.map_or(0.0, |o| o.path_length())
    }

    pub fn is_measured(&self) -> bool {
        self.path_length() > 0.0
    }

    /// `stroke-dasharray`: one dash exactly as long as the path.
    pub fn dash_array(&self) -> f64 {
        self.path_length()
    }

    /// Runs from the full path length down to 0 once per cycle.
    pub fn dash_offset(&self) -> f64 {
        if self.motion.reduced {
            return 0.0;
        }
        self.path_length() * (1.0 - self.phase)
    }

    pub fn dash_offset_at(&self, elapsed: Duration) -> f64 {
        let mut probe = self.clone();
        probe.phase = 0.0;
        probe.advance(elapsed);
        probe.dash_offset()
    }
}

impl Animate for MovingBorder {
    fn advance(&mut self, dt: Duration) {
        if self.motion.reduced {
            return;
        }
        self.phase = advance_phase(self.phase, dt, self.duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(secs: f64) -> MovingBorder {
        let mut border = MovingBorder::new(secs, MotionConfig::FULL);
        border.measure(402.0, 202.0);
        border
    }

    #[test]
    fn perimeter_of_rounded_rectangle() {
        let expected = 2.0 * 600.0 - 96.0 + 24.0 * PI;
        assert!((rounded_rect_perimeter(400.0, 200.0, 12.0) - expected).abs() < 1e-9);
        assert_eq!(rounded_rect_perimeter(10.0, 10.0, 0.0), 40.0);
        // radius larger than the box becomes a circle-ish capsule
        assert!((rounded_rect_perimeter(20.0, 20.0, 50.0) - 20.0 * PI).abs() < 1e-9);
        assert_eq!(rounded_rect_perimeter(0.0, 100.0, 12.0), 0.0);
    }

    #[test]
    fn unmeasured_border_is_hidden_and_still() {
        let border = MovingBorder::new(4.0, MotionConfig::FULL);
        assert!(!border.is_measured());
        assert_eq!(border.dash_array(), 0.0);
        assert_eq!(border.dash_offset(), 0.0);
    }

    #[test]
    fn dash_array_equals_path_length_for_sane_durations() {
        for secs in 1..=10 {
            let border = measured(secs as f64);
            assert_eq!(border.dash_array(), border.path_length());
            assert!(border.path_length() > 0.0);
        }
    }

    #[test]
    fn offset_runs_from_length_to_zero() {
        for secs in 1..=10 {
            let border = measured(secs as f64);
            let len = border.path_length();
            assert_eq!(border.dash_offset_at(Duration::ZERO), len);
            let half = border.dash_offset_at(Duration::from_secs_f64(secs as f64 / 2.0));
            assert!((half - len / 2.0).abs() < 1e-6);
            let near_end = border.dash_offset_at(Duration::from_secs_f64(secs as f64 * 0.999));
            assert!(near_end < len * 0.01);
        }
    }

    #[test]
    fn animation_repeats() {
        let mut border = measured(4.0);
        let len = border.path_length();
        border.advance(Duration::from_secs(4));
        assert!((border.dash_offset() - len).abs() < 1e-6);
        border.advance(Duration::from_secs(1));
        assert!((border.dash_offset() - len * 0.75).abs() < 1e-6);
    }

    #[test]
    fn bad_durations_fall_back_to_default() {
        for secs in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let border = MovingBorder::new(secs, MotionConfig::FULL);
            assert_eq!(border.duration(), Duration::from_secs(4));
        }
    }

    #[test]
    fn remeasure_reports_changes_only() {
        let mut border = MovingBorder::new(4.0, MotionConfig::FULL);
        assert!(border.measure(100.0, 50.0));
        assert!(!border.measure(100.0, 50.0));
        assert!(border.measure(120.0, 50.0));
        assert_eq!(border.outline().unwrap().width, 118.0);
    }

    #[test]
    fn reduced_motion_draws_the_full_outline() {
        let mut border = MovingBorder::new(4.0, MotionConfig::REDUCED);
        border.measure(100.0, 100.0);
        border.advance(Duration::from_secs(1));
        assert_eq!(border.dash_offset(), 0.0);
        assert!(border.is_measured());
    }
}
