use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent, Node};

use super::dom::{self, el, text};
use super::signals::DomSignals;
use crate::content::{company_icon, Icon, Project};
use crate::effects::bento::{hover_transform, BentoLayout};
use crate::error::{Result, SiteError};
use crate::modal::{FocusScope, ModalKeys, ModalState};
use crate::motion::MotionConfig;
use crate::viewport::ViewportClass;

const FOCUSABLE: &str = "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

/// Bento grid of project cards plus the detail dialog.
pub struct ProjectsView {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    projects: Vec<Project>,
    grid: HtmlElement,
    cards: Vec<HtmlElement>,
    motion: MotionConfig,
    state: ModalState,
    modal: Option<ModalView>,
    listeners: Vec<EventListener>,
}

impl ProjectsView {
    pub fn mount(
        parent: &Element,
        projects: Vec<Project>,
        class: ViewportClass,
        motion: MotionConfig,
    ) -> Result<Self> {
        let doc = dom::document()?;
        let section = el(&doc, "section", "projects")?;
        dom::set_attrs(&section, &[("id", "projects"), ("aria-labelledby", "projects-heading")])?;
        let heading = text(&doc, "h2", "section-title", "Featured Projects")?;
        heading.set_id("projects-heading");
        let grid = el(&doc, "div", "bento")?;

        let mut cards = Vec::with_capacity(projects.len());
        for project in &projects {
            let card = card(&doc, project)?;
            grid.append_child(&card)?;
            cards.push(card);
        }
        dom::append_all(&section, &[&heading, &grid])?;

        let inner = Rc::new(RefCell::new(Inner {
            projects,
            grid,
            cards,
            motion,
            state: ModalState::default(),
            modal: None,
            listeners: Vec::new(),
        }));

        let listeners = {
            let borrowed = inner.borrow();
            let mut listeners = Vec::with_capacity(borrowed.cards.len() * 2);
            for (card, project) in borrowed.cards.iter().zip(&borrowed.projects) {
                listeners.extend(card_listeners(card, &project.id, Rc::downgrade(&inner)));
            }
            listeners
        };
        inner.borrow_mut().listeners = listeners;
        inner.borrow().layout(class)?;
        // only a fully wired section reaches the page
        parent.append_child(&section)?;
        Ok(Self { inner })
    }

    pub fn set_viewport(&self, class: ViewportClass) {
        if let Err(err) = self.inner.borrow().layout(class) {
            log::warn!("projects: relayout failed: {err}");
        }
    }
}

impl Inner {
    fn layout(&self, class: ViewportClass) -> Result<()> {
        let layout = BentoLayout::for_class(class);
        let grid_style = self.grid.style();
        grid_style.set_property("grid-template-columns", &layout.template_columns())?;
        grid_style.set_property("gap", &layout.gap())?;

        let spans: Vec<_> = self.projects.iter().map(|p| p.grid_span).collect();
        let hover = hover_transform(class, self.motion);
        for (card, placement) in self.cards.iter().zip(layout.place(&spans)) {
            let style = card.style();
            style.set_property("grid-column", &placement.grid_column())?;
            style.set_property("grid-row", &placement.grid_row())?;
            match &hover {
                Some(transform) => {
                    card.set_attribute("data-hover", "")?;
                    style.set_property("--hover-transform", transform)?;
                }
                None => card.remove_attribute("data-hover")?,
            }
        }
        Ok(())
    }
}

fn open(inner: &Rc<RefCell<Inner>>, id: &str) {
    let mut this = inner.borrow_mut();
    if this.state.is_open() {
        return;
    }
    let Some(project) = this.projects.iter().find(|p| p.id == id).cloned() else {
        log::warn!("projects: no project with id {id}");
        return;
    };
    match ModalView::mount(&project, deferred_close(Rc::downgrade(inner))) {
        Ok(view) => {
            this.state.open(id);
            this.modal = Some(view);
        }
        Err(err) => log::error!("projects: could not open {id}: {err}"),
    }
}

fn close(inner: &Rc<RefCell<Inner>>) {
    let mut this = inner.borrow_mut();
    let Some(id) = this.state.close() else {
        return;
    };
    this.modal.take();
    let card = this
        .projects
        .iter()
        .position(|p| p.id == id)
        .and_then(|i| this.cards.get(i));
    if let Some(card) = card {
        card.focus().ok();
    }
}

/// Closing tears down the listener that requested it, so it runs after the
/// current event has finished dispatching.
fn deferred_close(inner: Weak<RefCell<Inner>>) -> Rc<dyn Fn()> {
    Rc::new(move || {
        let inner = inner.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(inner) = inner.upgrade() {
                close(&inner);
            }
        });
    })
}

fn card_listeners(card: &HtmlElement, id: &str, inner: Weak<RefCell<Inner>>) -> [EventListener; 2] {
    let click_id = id.to_string();
    let click_inner = inner.clone();
    let click = EventListener::new(card, "click", move |_| {
        if let Some(inner) = click_inner.upgrade() {
            open(&inner, &click_id);
        }
    });
    let key_id = id.to_string();
    let keydown = EventListener::new_with_options(
        card,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.key() == "Enter" || key.key() == " " {
                event.prevent_default();
                if let Some(inner) = inner.upgrade() {
                    open(&inner, &key_id);
                }
            }
        },
    );
    [click, keydown]
}

fn card(doc: &Document, project: &Project) -> Result<HtmlElement> {
    let card = el(doc, "div", "bento-card")?;
    dom::set_attrs(
        &card,
        &[
            ("role", "button"),
            ("tabindex", "0"),
            ("aria-label", format!("View details for {}", project.title).as_str()),
        ],
    )?;
    card.append_child(&el(doc, "div", "noise")?)?;

    let chips = el(doc, "div", "chips")?;
    dom::set_attrs(&chips, &[("role", "list"), ("aria-label", "Technologies used")])?;
    for tech in &project.technologies {
        let chip = text(doc, "span", "chip", tech)?;
        chip.set_attribute("role", "listitem")?;
        chips.append_child(&chip)?;
    }
    card.append_child(&chips)?;

    let body = el(doc, "div", "card-body")?;
    let heading = el(doc, "div", "card-heading")?;
    if let Some(icon) = company_icon(&project.company) {
        heading.append_child(&dom::icon(doc, icon, "icon-md")?)?;
    }
    heading.append_child(&text(doc, "h3", "card-title", &project.title)?)?;
    body.append_child(&heading)?;
    body.append_child(&text(doc, "p", "card-description", &project.description)?)?;
    if !project.metrics.is_empty() {
        body.append_child(&metrics(doc, project, "card-metrics")?)?;
    }
    card.append_child(&body)?;
    Ok(card)
}

fn metrics(doc: &Document, project: &Project, class: &str) -> Result<HtmlElement> {
    let grid = el(doc, "div", class)?;
    dom::set_attrs(&grid, &[("role", "list"), ("aria-label", "Project metrics")])?;
    for metric in &project.metrics {
        let cell = el(doc, "div", "metric")?;
        cell.set_attribute("role", "listitem")?;
        cell.append_child(&text(doc, "div", "metric-value", &metric.value)?)?;
        cell.append_child(&text(doc, "div", "metric-label", &metric.label)?)?;
        grid.append_child(&cell)?;
    }
    Ok(grid)
}

/// Open dialog. Dropping it removes the overlay, its key handlers and the
/// scroll lock.
struct ModalView {
    backdrop: HtmlElement,
    _keys: ModalKeys,
    _clicks: [EventListener; 2],
}

impl ModalView {
    fn mount(project: &Project, on_close: Rc<dyn Fn()>) -> Result<Self> {
        let doc = dom::document()?;
        let body = doc
            .body()
            .ok_or_else(|| SiteError::Dom("document has no body".into()))?;

        let backdrop = el(&doc, "div", "modal-backdrop")?;
        dom::set_attrs(
            &backdrop,
            &[("role", "dialog"), ("aria-modal", "true"), ("aria-labelledby", "modal-title")],
        )?;
        let dialog = el(&doc, "div", "modal")?;
        dialog.set_id("project-modal");

        let close_button = el(&doc, "button", "modal-close")?;
        close_button.set_attribute("aria-label", "Close modal")?;
        close_button.append_child(&dom::icon(&doc, Icon::Close, "icon-md")?)?;
        dialog.append_child(&close_button)?;
        dialog.append_child(&details(&doc, project)?)?;
        backdrop.append_child(&dialog)?;
        body.append_child(&backdrop)?;
        body.style().set_property("overflow", "hidden")?;

        let backdrop_node: Node = backdrop.clone().into();
        let close_outside = on_close.clone();
        let outside = EventListener::new(&backdrop, "click", move |event| {
            // clicks inside the dialog bubble up here too
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|t| t.is_same_node(Some(&backdrop_node)));
            if on_backdrop {
                close_outside();
            }
        });
        let close_press = on_close.clone();
        let button = EventListener::new(&close_button, "click", move |_| close_press());

        let scope = Rc::new(DomFocusScope { root: dialog.into() });
        let keys = ModalKeys::attach(&DomSignals::document()?, scope, move || on_close());
        close_button.focus()?;

        Ok(Self {
            backdrop,
            _keys: keys,
            _clicks: [outside, button],
        })
    }
}

impl Drop for ModalView {
    fn drop(&mut self) {
        self.backdrop.remove();
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            body.style().remove_property("overflow").ok();
        }
    }
}

fn details(doc: &Document, project: &Project) -> Result<HtmlElement> {
    let content = el(doc, "div", "modal-body")?;
    let title = text(doc, "h2", "modal-title", &project.title)?;
    title.set_id("modal-title");
    content.append_child(&title)?;
    content.append_child(&text(doc, "p", "modal-company", &project.company)?)?;
    content.append_child(&text(doc, "p", "modal-detail", project.detail())?)?;

    content.append_child(&text(doc, "h3", "modal-heading", "Technologies")?)?;
    let chips = el(doc, "div", "chips")?;
    for tech in &project.technologies {
        chips.append_child(&text(doc, "span", "chip", tech)?)?;
    }
    content.append_child(&chips)?;

    if !project.metrics.is_empty() {
        content.append_child(&text(doc, "h3", "modal-heading", "Key Metrics")?)?;
        content.append_child(&metrics(doc, project, "modal-metrics")?)?;
    }

    let links = el(doc, "div", "modal-actions")?;
    let targets = [
        (project.repo_url.as_deref(), Icon::Github, "View Code", "btn btn-primary"),
        (project.demo_url.as_deref(), Icon::Play, "Watch Demo", "btn btn-muted"),
    ];
    for (href, icon, label, class) in targets {
        let Some(href) = href else { continue };
        let link = el(doc, "a", class)?;
        dom::set_attrs(&link, &[("href", href), ("target", "_blank"), ("rel", "noopener noreferrer")])?;
        link.append_child(&dom::icon(doc, icon, "icon-md")?)?;
        link.append_child(&text(doc, "span", "", label)?)?;
        links.append_child(&link)?;
    }
    content.append_child(&links)?;
    Ok(content)
}

struct DomFocusScope {
    root: Element,
}

impl DomFocusScope {
    fn focusable(&self) -> Vec<HtmlElement> {
        let Ok(nodes) = self.root.query_selector_all(FOCUSABLE) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
            .collect()
    }
}

impl FocusScope for DomFocusScope {
    fn focusable_count(&self) -> usize {
        self.focusable().len()
    }

    fn focused_index(&self) -> Option<usize> {
        let active: Node = web_sys::window()?.document()?.active_element()?.into();
        self.focusable()
            .iter()
            .position(|el| el.is_same_node(Some(&active)))
    }

    fn focus(&self, index: usize) {
        if let Some(el) = self.focusable().get(index) {
            el.focus().ok();
        }
    }
}
