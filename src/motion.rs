//! Motion preferences and frame timing shared by every animated effect.

use std::collections::VecDeque;
use std::time::Duration;

/// Resolved once at startup and handed to each effect when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionConfig {
    pub reduced: bool,
}

impl MotionConfig {
    pub const FULL: MotionConfig = MotionConfig { reduced: false };
    pub const REDUCED: MotionConfig = MotionConfig { reduced: true };

    /// A config override wins over the browser preference.
    pub fn resolve(forced: Option<bool>, prefers_reduced: bool) -> Self {
        Self {
            reduced: forced.unwrap_or(prefers_reduced),
        }
    }

    #[inline]
    pub fn animates(self) -> bool {
        !self.reduced
    }

    /// Fade-up entrance starting after `delay`, or `None` when motion is reduced.
    pub fn entrance(self, delay: Duration) -> Option<Entrance> {
        self.animates().then_some(Entrance {
            delay,
            duration: ENTRANCE_DURATION,
        })
    }
}

const ENTRANCE_DURATION: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrance {
    pub delay: Duration,
    pub duration: Duration,
}

impl Entrance {
    /// Inline CSS `animation` value for the `fade-up` keyframes.
    pub fn css(&self) -> String {
        format!(
            "fade-up {}s ease-out {}s both",
            self.duration.as_secs_f64(),
            self.delay.as_secs_f64()
        )
    }
}

/// Time-driven effect advanced once per animation frame.
pub trait Animate {
    fn advance(&mut self, dt: Duration);
}

/// Advance a repeating phase in `[0, 1)` by `dt` of a `period` long cycle.
pub fn advance_phase(phase: f64, dt: Duration, period: Duration) -> f64 {
    let period = period.as_secs_f64();
    if period <= 0.0 || !period.is_finite() {
        return 0.0;
    }
    (phase + dt.as_secs_f64() / period).rem_euclid(1.0)
}

/// Linear map of `value` from `from` onto `to`, clamped to the output range.
pub fn interpolate(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    let t = if span == 0.0 { 0.0 } else { (value - from.0) / span };
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    to.0 + (to.1 - to.0) * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub fps: f64,
    pub avg_frame_ms: f64,
    pub is_low_performance: bool,
}

/// Rolling frame-time window reporting every `window` frames.
#[derive(Debug, Clone)]
pub struct FrameMonitor {
    threshold: f64,
    window: usize,
    samples: VecDeque<f64>,
    since_report: usize,
    last: Option<FrameMetrics>,
}

impl FrameMonitor {
    pub const WINDOW: usize = 60;

    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            window: Self::WINDOW,
            samples: VecDeque::with_capacity(Self::WINDOW),
            since_report: 0,
            last: None,
        }
    }

    /// Record one frame; returns fresh metrics at the end of each window.
    pub fn record(&mut self, frame_ms: f64) -> Option<FrameMetrics> {
        if !frame_ms.is_finite() || frame_ms <= 0.0 {
            return None;
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_ms);
        self.since_report += 1;
        if self.since_report < self.window {
            return None;
        }
        self.since_report = 0;

        let avg = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
        let fps = 1000.0 / avg;
        let metrics = FrameMetrics {
            fps: fps.round(),
            avg_frame_ms: (avg * 100.0).round() / 100.0,
            is_low_performance: fps < self.threshold,
        };
        if cfg!(debug_assertions) && metrics.is_low_performance {
            log::warn!("Low performance detected: {} FPS", metrics.fps);
        }
        self.last = Some(metrics);
        Some(metrics)
    }

    pub fn last(&self) -> Option<FrameMetrics> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_preference_overrides_browser() {
        assert!(MotionConfig::resolve(Some(true), false).reduced);
        assert!(!MotionConfig::resolve(Some(false), true).reduced);
        assert!(MotionConfig::resolve(None, true).reduced);
    }

    #[test]
    fn reduced_motion_has_no_entrance() {
        assert!(MotionConfig::REDUCED.entrance(Duration::from_millis(200)).is_none());
        let entrance = MotionConfig::FULL
            .entrance(Duration::from_millis(400))
            .unwrap();
        assert_eq!(entrance.css(), "fade-up 0.8s ease-out 0.4s both");
    }

    #[test]
    fn phase_wraps_and_ignores_bad_periods() {
        let p = advance_phase(0.9, Duration::from_secs(2), Duration::from_secs(10));
        assert!((p - 0.1).abs() < 1e-9);
        assert_eq!(advance_phase(0.5, Duration::from_secs(1), Duration::ZERO), 0.0);
    }

    #[test]
    fn interpolate_clamps_and_handles_empty_ranges() {
        assert_eq!(interpolate(0.5, (0.0, 1.0), (0.0, 10.0)), 5.0);
        assert_eq!(interpolate(2.0, (0.0, 1.0), (0.0, 10.0)), 10.0);
        assert_eq!(interpolate(-1.0, (0.0, 1.0), (0.0, 10.0)), 0.0);
        assert_eq!(interpolate(3.0, (1.0, 1.0), (0.0, 10.0)), 0.0);
    }

    #[test]
    fn monitor_reports_every_window() {
        let mut monitor = FrameMonitor::new(45.0);
        for _ in 0..59 {
            assert!(monitor.record(16.0).is_none());
        }
        let metrics = monitor.record(16.0).unwrap();
        assert_eq!(metrics.fps, 63.0);
        assert!(!metrics.is_low_performance);
    }

    #[test]
    fn monitor_flags_slow_frames() {
        let mut monitor = FrameMonitor::new(45.0);
        let mut report = None;
        for _ in 0..60 {
            report = monitor.record(33.3);
        }
        let metrics = report.unwrap();
        assert_eq!(metrics.fps, 30.0);
        assert!(metrics.is_low_performance);
        assert_eq!(monitor.last(), Some(metrics));
    }
}
