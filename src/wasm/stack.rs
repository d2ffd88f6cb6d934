use std::time::Duration;

use web_sys::{Element, HtmlElement};

use super::dom::{self, el, text};
use super::signals::DomSignals;
use crate::content::TechStackItem;
use crate::effects::marquee::{Marquee, MarqueeConfig};
use crate::error::Result;
use crate::motion::{Animate, MotionConfig};
use crate::viewport::ViewportClass;

/// Tech stack marquee section.
pub struct StackView {
    marquee: Marquee<TechStackItem>,
    track: HtmlElement,
    strip: DomSignals,
}

impl StackView {
    pub fn mount(
        parent: &Element,
        items: Vec<TechStackItem>,
        config: MarqueeConfig,
        class: ViewportClass,
        motion: MotionConfig,
    ) -> Result<Self> {
        let doc = dom::document()?;
        let section = el(&doc, "section", "stack")?;
        section.append_child(&text(&doc, "h2", "section-title", "Tech Stack")?)?;

        let viewport = el(&doc, "div", "marquee")?;
        let track = el(&doc, "div", "marquee-track")?;
        let mut marquee = Marquee::new(items, config, class, motion);
        for (i, item) in marquee.track().enumerate() {
            let card = el(&doc, "div", "marquee-card")?;
            card.set_attribute("data-key", &format!("{}-{}", item.name, i))?;
            card.append_child(&dom::icon(&doc, item.icon, "icon-lg")?)?;
            card.append_child(&text(&doc, "span", "marquee-name", &item.name)?)?;
            track.append_child(&card)?;
        }
        viewport.append_child(&track)?;
        section.append_child(&viewport)?;

        let strip = DomSignals::element(&viewport);
        marquee.attach_hover(&strip);
        let view = Self { marquee, track, strip };
        view.paint()?;
        parent.append_child(&section)?;
        Ok(view)
    }

    pub fn set_viewport(&mut self, class: ViewportClass) {
        self.marquee.set_viewport(class, &self.strip);
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.marquee.is_paused() {
            return;
        }
        self.marquee.advance(dt);
        self.paint().ok();
    }

    fn paint(&self) -> Result<()> {
        self.track
            .style()
            .set_property("transform", &self.marquee.transform())?;
        Ok(())
    }
}
