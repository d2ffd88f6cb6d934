use std::rc::Rc;

use crate::pointer::{PointerPosition, PointerTracker};
use crate::signal::SignalSource;
use crate::viewport::ViewportClass;

pub const DEFAULT_SPOTLIGHT_FILL: &str = "rgba(139, 92, 246, 0.3)";
pub const MIN_SPOTLIGHT_DIAMETER: f64 = 600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpotlightConfig {
    pub fill: String,
    pub size: f64,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            fill: DEFAULT_SPOTLIGHT_FILL.to_string(),
            size: MIN_SPOTLIGHT_DIAMETER,
        }
    }
}

impl SpotlightConfig {
    /// Configured diameter, never below [`MIN_SPOTLIGHT_DIAMETER`].
    pub fn effective_size(&self) -> f64 {
        if self.size.is_nan() {
            MIN_SPOTLIGHT_DIAMETER
        } else {
            self.size.max(MIN_SPOTLIGHT_DIAMETER)
        }
    }

    /// CSS `background` for a gradient centred on `at`, or on the middle of
    /// the container when there is no pointer position.
    pub fn background(&self, at: Option<PointerPosition>) -> String {
        let center = match at {
            Some(p) => format!("{}px {}px", p.x, p.y),
            None => "50% 50%".to_string(),
        };
        format!(
            "radial-gradient({}px at {}, {}, transparent 80%)",
            self.effective_size(),
            center,
            self.fill
        )
    }
}

/// Radial glow that follows the pointer on tablet and desktop and sits in the
/// centre on mobile. Only the background value changes between paints.
pub struct Spotlight {
    config: Rc<SpotlightConfig>,
    tracker: PointerTracker,
    class: ViewportClass,
    paint: Rc<dyn Fn(&str)>,
}

impl Spotlight {
    pub fn mount(
        config: SpotlightConfig,
        class: ViewportClass,
        source: &dyn SignalSource,
        paint: impl Fn(&str) + 'static,
    ) -> Self {
        let config = Rc::new(config);
        let paint: Rc<dyn Fn(&str)> = Rc::new(paint);
        let tracker = {
            let config = Rc::clone(&config);
            let paint = Rc::clone(&paint);
            PointerTracker::new(move |p| paint(&config.background(Some(p))))
        };
        let mut spotlight = Self {
            config,
            tracker,
            class,
            paint,
        };
        spotlight.tracker.sync(class, source);
        spotlight.repaint();
        spotlight
    }

    pub fn set_viewport(&mut self, class: ViewportClass, source: &dyn SignalSource) {
        if class == self.class {
            return;
        }
        self.class = class;
        self.tracker.sync(class, source);
        self.repaint();
    }

    pub fn background(&self) -> String {
        self.config.background(self.tracker.latest())
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_active()
    }

    fn repaint(&self) {
        (self.paint)(&self.background());
    }
}
