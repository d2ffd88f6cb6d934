use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::boundary::contain;
use crate::config::SiteConfig;
use crate::content::{ContentError, SiteContent};
use crate::effects::marquee::MarqueeConfig;
use crate::effects::spotlight::SpotlightConfig;
use crate::error::{Result, SiteError};
use crate::motion::{FrameMonitor, MotionConfig};
use crate::signal::Subscription;
use crate::viewport::{ViewportClass, ViewportClassifier};

mod contact;
mod dom;
mod hero;
mod projects;
mod render;
mod signals;
mod stack;
mod timeline;

use contact::ContactView;
use hero::HeroView;
use projects::ProjectsView;
use signals::DomSignals;
use stack::StackView;
use timeline::TimelineView;

const ROOT_ID: &str = "app";

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let config = SiteConfig::bundled()?;
    // a second init (tests, hot reload) keeps the first logger
    console_log::init_with_level(config.general.level()).ok();

    if dom::document()?.get_element_by_id(ROOT_ID).is_none() {
        log::warn!("no #{ROOT_ID} element, nothing mounted");
        return Ok(());
    }
    install(ROOT_ID, config)?;
    Ok(())
}

/// Build the page inside the element with id `root_id`, replacing any page
/// that is already mounted.
#[wasm_bindgen]
pub fn mount(root_id: &str) -> std::result::Result<(), JsValue> {
    install(root_id, SiteConfig::bundled()?)?;
    Ok(())
}

/// Tear the page down: stops the frame loop, removes every listener and
/// empties the root element.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    drop(page);
}

fn install(root_id: &str, config: SiteConfig) -> Result<()> {
    unmount();
    let page = Page::mount(root_id, &config)?;
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

#[derive(Default)]
struct Views {
    hero: Option<HeroView>,
    stack: Option<StackView>,
    projects: Option<ProjectsView>,
    timeline: Option<TimelineView>,
    contact: Option<ContactView>,
}

impl Views {
    fn set_viewport(&mut self, class: ViewportClass) {
        if let Some(hero) = &mut self.hero {
            hero.set_viewport(class);
        }
        if let Some(stack) = &mut self.stack {
            stack.set_viewport(class);
        }
        if let Some(projects) = &self.projects {
            projects.set_viewport(class);
        }
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(stack) = &mut self.stack {
            stack.tick(dt);
        }
        if let Some(contact) = &mut self.contact {
            contact.tick(dt);
        }
    }
}

/// Everything one mounted page owns.
struct Page {
    _frames: Option<render::FrameLoop>,
    _watch: Subscription,
    _classifier: ViewportClassifier,
    views: Rc<RefCell<Views>>,
    root: Element,
}

impl Page {
    fn mount(root_id: &str, config: &SiteConfig) -> Result<Self> {
        let window = dom::window()?;
        let doc = dom::document()?;
        let root = doc
            .get_element_by_id(root_id)
            .ok_or_else(|| SiteError::MissingElement(root_id.to_string()))?;

        let motion = MotionConfig::resolve(config.general.reduced_motion, prefers_reduced_motion(&window));
        let (width, _) = dom::viewport_size(&window);
        let classifier = ViewportClassifier::mount(&DomSignals::window()?, width, config.viewport);
        let class = classifier.current();
        log::info!(
            "mounting into #{root_id}: {} viewport, reduced motion {}",
            class.as_str(),
            motion.reduced
        );

        let content = SiteContent::bundled();
        for err in content.errors() {
            log::error!("bundled content rejected: {err}");
        }

        let hero = section(&root, "hero", || {
            let spotlight = SpotlightConfig {
                fill: config.spotlight.fill.clone(),
                size: config.spotlight.size,
            };
            HeroView::mount(&root, spotlight, class, motion)
        })?;
        let stack = section(&root, "tech stack", || {
            let items = content.tech_stack.as_ref().map_err(unavailable)?.clone();
            let marquee = MarqueeConfig {
                direction: config.marquee.direction,
                speed: config.marquee.speed,
                pause_on_hover: config.marquee.pause_on_hover,
            };
            StackView::mount(&root, items, marquee, class, motion)
        })?;
        let projects = section(&root, "projects", || {
            let projects = content.projects.as_ref().map_err(unavailable)?.clone();
            ProjectsView::mount(&root, projects, class, motion)
        })?;
        let timeline = section(&root, "timeline", || {
            let entries = content.timeline().map_err(unavailable)?;
            TimelineView::mount(&root, &entries)
        })?;
        let contact = section(&root, "contact", || {
            ContactView::mount(&root, &config.contact.endpoint, config.border.duration_secs, motion)
        })?;

        let views = Rc::new(RefCell::new(Views {
            hero,
            stack,
            projects,
            timeline,
            contact,
        }));
        let watched = Rc::downgrade(&views);
        let watch = classifier.watch(move |class| {
            if let Some(views) = watched.upgrade() {
                views.borrow_mut().set_viewport(class);
            }
        });

        let driven = Rc::downgrade(&views);
        let frames = render::start(
            move |dt| {
                if let Some(views) = driven.upgrade() {
                    views.borrow_mut().tick(dt);
                }
            },
            FrameMonitor::new(config.monitor.fps_threshold),
        );
        let frames = match frames {
            Ok(frames) => Some(frames),
            Err(err) => {
                log::error!("animation loop unavailable: {err}");
                None
            }
        };

        Ok(Self {
            _frames: frames,
            _watch: watch,
            _classifier: classifier,
            views,
            root,
        })
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        // views hold the listeners; release them before clearing the markup
        *self.views.borrow_mut() = Views::default();
        self.root.set_inner_html("");
        log::debug!("page unmounted");
    }
}

fn unavailable(err: &ContentError) -> SiteError {
    SiteError::Other(format!("content unavailable: {err}"))
}

/// Render one section, leaving the neutral fallback in its place on failure.
fn section<T>(root: &Element, name: &str, render: impl FnOnce() -> Result<T>) -> Result<Option<T>> {
    let view = contain(name, render).rendered();
    if view.is_none() {
        root.append_child(&dom::fallback(&dom::document()?)?)?;
    }
    Ok(view)
}
