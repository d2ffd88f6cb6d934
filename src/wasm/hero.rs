use std::time::Duration;

use gloo::events::EventListener;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions};

use super::dom::{self, el, text};
use super::signals::DomSignals;
use crate::content::Icon;
use crate::effects::spotlight::{Spotlight, SpotlightConfig};
use crate::error::Result;
use crate::motion::MotionConfig;
use crate::viewport::ViewportClass;

const NAME: &str = "Manvik Talwar";
const ROLE: &str = "AI/ML Engineer & Full-Stack Developer";
const TAGLINE: &str =
    "Building intelligent systems with deep learning, RAG architectures, and modern web technologies";
const RESUME_HREF: &str = "/assets/Manvik_Talwar_Resume.pdf";
const RESUME_FILE: &str = "Manvik_Talwar_Resume.pdf";

pub struct HeroView {
    spotlight: Spotlight,
    signals: DomSignals,
    _scroll_click: EventListener,
}

impl HeroView {
    pub fn mount(
        parent: &Element,
        config: SpotlightConfig,
        class: ViewportClass,
        motion: MotionConfig,
    ) -> Result<Self> {
        let doc = dom::document()?;
        let section = el(&doc, "section", "hero")?;
        section.set_attribute("aria-label", "Hero section")?;

        let grid = el(&doc, "div", "hero-grid")?;
        grid.set_attribute("aria-hidden", "true")?;

        let glow = el(&doc, "div", "spotlight")?;
        glow.set_attribute("aria-hidden", "true")?;

        let content = el(&doc, "div", "hero-content")?;
        let title = text(&doc, "h1", "hero-title", NAME)?;
        let role = text(&doc, "h2", "hero-role", ROLE)?;
        let tagline = text(&doc, "p", "hero-tagline", TAGLINE)?;
        let (actions, button) = actions(&doc)?;

        for (i, node) in [&title, &role, &tagline, &actions].into_iter().enumerate() {
            if let Some(entrance) = motion.entrance(Duration::from_millis(200 * (i as u64 + 1))) {
                node.style().set_property("animation", &entrance.css())?;
            }
            content.append_child(node)?;
        }
        dom::append_all(&section, &[&grid, &glow, &content])?;

        let signals = DomSignals::window()?;
        parent.append_child(&section)?;
        let paint_target = glow.clone();
        let spotlight = Spotlight::mount(config, class, &signals, move |background| {
            paint_target.style().set_property("background", background).ok();
        });

        let scroll_click = EventListener::new(&button, "click", |_| {
            let target = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("projects"));
            if let Some(target) = target {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });

        Ok(Self {
            spotlight,
            signals,
            _scroll_click: scroll_click,
        })
    }

    pub fn set_viewport(&mut self, class: ViewportClass) {
        self.spotlight.set_viewport(class, &self.signals);
    }
}

fn actions(doc: &Document) -> Result<(HtmlElement, HtmlElement)> {
    let row = el(doc, "div", "hero-actions")?;

    let view_work = el(doc, "button", "btn btn-primary")?;
    view_work.set_attribute("aria-label", "View my work - scroll to projects section")?;
    view_work.append_child(&text(doc, "span", "", "View My Work")?)?;
    view_work.append_child(&dom::icon(doc, Icon::ArrowRight, "icon-md nudge-x")?)?;

    let resume = el(doc, "a", "btn btn-outline")?;
    dom::set_attrs(
        &resume,
        &[
            ("href", RESUME_HREF),
            ("download", RESUME_FILE),
            ("aria-label", "Download resume"),
        ],
    )?;
    resume.append_child(&text(doc, "span", "", "Download Resume")?)?;
    resume.append_child(&dom::icon(doc, Icon::Download, "icon-md nudge-y")?)?;

    dom::append_all(&row, &[&view_work, &resume])?;
    Ok((row, view_work))
}
