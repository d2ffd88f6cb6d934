use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::motion::{advance_phase, Animate, MotionConfig};
use crate::signal::{SignalKind, SignalSource, Subscription};
use crate::viewport::ViewportClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarqueeDirection {
    #[default]
    Left,
    Right,
}

impl MarqueeDirection {
    /// Start and end translation as a percentage of the doubled track width.
    pub fn keyframes(self) -> (f64, f64) {
        match self {
            MarqueeDirection::Left => (0.0, -50.0),
            MarqueeDirection::Right => (-50.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarqueeSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl MarqueeSpeed {
    /// One full loop. Mobile runs slower to ease GPU load.
    pub fn duration(self, class: ViewportClass) -> Duration {
        let secs = match (self, class.is_mobile()) {
            (MarqueeSpeed::Slow, false) => 40,
            (MarqueeSpeed::Normal, false) => 20,
            (MarqueeSpeed::Fast, false) => 10,
            (MarqueeSpeed::Slow, true) => 60,
            (MarqueeSpeed::Normal, true) => 30,
            (MarqueeSpeed::Fast, true) => 15,
        };
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarqueeConfig {
    pub direction: MarqueeDirection,
    pub speed: MarqueeSpeed,
    pub pause_on_hover: bool,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            direction: MarqueeDirection::Left,
            speed: MarqueeSpeed::Normal,
            pause_on_hover: true,
        }
    }
}

/// Horizontally scrolling strip that renders its items twice so the jump
/// from -50% back to 0% lands on identical content.
pub struct Marquee<T> {
    items: Vec<T>,
    config: MarqueeConfig,
    class: ViewportClass,
    motion: MotionConfig,
    phase: f64,
    hovered: Rc<Cell<bool>>,
    hover_subs: Vec<Subscription>,
}

impl<T> Marquee<T> {
    pub fn new(items: Vec<T>, config: MarqueeConfig, class: ViewportClass, motion: MotionConfig) -> Self {
        Self {
            items,
            config,
            class,
            motion,
            phase: 0.0,
            hovered: Rc::new(Cell::new(false)),
            hover_subs: Vec::new(),
        }
    }

    /// The rendered sequence: every item, then every item again.
    pub fn track(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().chain(self.items.iter())
    }

    pub fn track_len(&self) -> usize {
        self.items.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn duration(&self) -> Duration {
        self.config.speed.duration(self.class)
    }

    fn hover_pauses(&self) -> bool {
        self.config.pause_on_hover && !self.class.is_mobile()
    }

    /// Listen for enter/leave on the strip when hovering may pause it.
    pub fn attach_hover(&mut self, source: &dyn SignalSource) {
        if !self.hover_pauses() || !self.hover_subs.is_empty() || self.is_empty() {
            return;
        }
        let enter = Rc::clone(&self.hovered);
        let leave = Rc::clone(&self.hovered);
        self.hover_subs = vec![
            source.subscribe(SignalKind::PointerEnter, Box::new(move |_| enter.set(true))),
            source.subscribe(SignalKind::PointerLeave, Box::new(move |_| leave.set(false))),
        ];
    }

    pub fn set_viewport(&mut self, class: ViewportClass, source: &dyn SignalSource) {
        self.class = class;
        if self.hover_pauses() {
            self.attach_hover(source);
        } else {
            self.hover_subs.clear();
            self.hovered.set(false);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.motion.reduced || self.is_empty() || (self.hovered.get() && self.hover_pauses())
    }

    pub fn hover_listeners(&self) -> usize {
        self.hover_subs.len()
    }

    /// Current translation in percent of the doubled track width.
    pub fn offset_percent(&self) -> f64 {
        let (from, to) = self.config.direction.keyframes();
        from + (to - from) * self.phase
    }

    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.offset_percent())
    }
}

impl<T> Animate for Marquee<T> {
    fn advance(&mut self, dt: Duration) {
        if self.is_paused() {
            return;
        }
        self.phase = advance_phase(self.phase, dt, self.duration());
    }
}
