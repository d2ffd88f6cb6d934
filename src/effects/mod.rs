//! Decorative effects. Each one owns its own transient state and
//! subscriptions; none of them share state with another.

pub mod beam;
pub mod bento;
pub mod border;
pub mod marquee;
pub mod spotlight;

pub use beam::TracingBeam;
pub use bento::{BentoLayout, GridSpan, Placement};
pub use border::MovingBorder;
pub use marquee::{Marquee, MarqueeDirection, MarqueeSpeed};
pub use spotlight::Spotlight;

/// Three fixed stops shared by the beam and the moving border.
pub const VIOLET: &str = "#8b5cf6";
pub const PINK: &str = "#ec4899";
