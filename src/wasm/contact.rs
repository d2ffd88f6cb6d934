use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    Request, RequestInit, RequestMode, Response,
};

use super::dom::{self, el, svg, text};
use crate::contact::{ContactController, ContactError, Field, FormStatus, SENT_TITLE};
use crate::content::Icon;
use crate::effects::border::{MovingBorder, BORDER_STOPS};
use crate::error::{Result, SiteError};
use crate::motion::{Animate, MotionConfig};

const EMAIL: &str = "manvik.talwar@gmail.com";
const GITHUB: &str = "https://github.com/CodexManvik";
const LINKEDIN: &str = "https://linkedin.com/in/manvik-talwar";
const BORDER_GRADIENT_ID: &str = "border-gradient";

/// Contact section: the form card inside a moving border, plus direct links.
pub struct ContactView {
    _inner: Rc<RefCell<Inner>>,
    border: BorderView,
}

struct Inner {
    controller: ContactController,
    endpoint: String,
    form: HtmlElement,
    success: HtmlElement,
    fields: Vec<(Field, FieldInput)>,
    submit: HtmlButtonElement,
    error: HtmlElement,
    listeners: Vec<EventListener>,
}

enum FieldInput {
    Line(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl FieldInput {
    fn set_value(&self, value: &str) {
        match self {
            FieldInput::Line(input) => input.set_value(value),
            FieldInput::Area(area) => area.set_value(value),
        }
    }

    fn set_disabled(&self, disabled: bool) {
        match self {
            FieldInput::Line(input) => input.set_disabled(disabled),
            FieldInput::Area(area) => area.set_disabled(disabled),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            FieldInput::Line(input) => input,
            FieldInput::Area(area) => area,
        }
    }
}

impl ContactView {
    pub fn mount(parent: &Element, endpoint: &str, border_secs: f64, motion: MotionConfig) -> Result<Self> {
        let doc = dom::document()?;
        let section = el(&doc, "section", "contact")?;
        dom::set_attrs(&section, &[("id", "contact"), ("aria-labelledby", "contact-heading")])?;
        let heading = text(&doc, "h2", "section-title", "Get In Touch")?;
        heading.set_id("contact-heading");
        let intro = text(
            &doc,
            "p",
            "section-intro",
            "Have a project in mind? Let's work together to build something amazing.",
        )?;

        let border = BorderView::mount(&doc, border_secs, motion)?;
        let card = el(&doc, "div", "contact-card")?;
        let (success, send_another) = success_panel(&doc)?;
        let (form, fields, error, submit) = form(&doc)?;
        card.append_child(&success)?;
        card.append_child(&form)?;
        card.append_child(&direct_links(&doc)?)?;
        border.content.append_child(&card)?;

        dom::append_all(&section, &[&heading, &intro, &border.root])?;

        let inner = Rc::new(RefCell::new(Inner {
            controller: ContactController::new(),
            endpoint: endpoint.to_string(),
            form,
            success,
            fields,
            submit,
            error,
            listeners: Vec::new(),
        }));
        let listeners = listeners(&inner, &send_another);
        inner.borrow_mut().listeners = listeners;
        inner.borrow().render()?;
        parent.append_child(&section)?;
        Ok(Self { _inner: inner, border })
    }

    pub fn tick(&mut self, dt: Duration) {
        self.border.tick(dt);
    }
}

impl Inner {
    /// Push controller state into the DOM.
    fn render(&self) -> Result<()> {
        let status = self.controller.status();
        let sent = *status == FormStatus::Succeeded;
        self.form.set_hidden(sent);
        self.success.set_hidden(!sent);

        let disabled = self.controller.inputs_disabled();
        for (field, input) in &self.fields {
            input.set_value(self.controller.form().get(*field));
            input.set_disabled(disabled);
        }
        self.submit.set_disabled(disabled);
        self.submit.set_inner_html("");
        let doc = dom::document()?;
        if disabled {
            self.submit.append_child(&el(&doc, "span", "spinner")?)?;
            self.submit.append_child(&text(&doc, "span", "", "Sending...")?)?;
        } else {
            self.submit.append_child(&text(&doc, "span", "", "Send Message")?)?;
            self.submit.append_child(&dom::icon(&doc, Icon::Send, "icon-md nudge-x")?)?;
        }

        match self.controller.error_message() {
            Some(message) => {
                self.error.set_text_content(Some(&message));
                self.error.set_hidden(false);
            }
            None => self.error.set_hidden(true),
        }
        Ok(())
    }
}

fn rerender(inner: &Rc<RefCell<Inner>>) {
    if let Err(err) = inner.borrow().render() {
        log::error!("contact: render failed: {err}");
    }
}

fn listeners(inner: &Rc<RefCell<Inner>>, send_another: &HtmlElement) -> Vec<EventListener> {
    let this = inner.borrow();
    let mut listeners = Vec::with_capacity(this.fields.len() + 2);

    for (field, input) in &this.fields {
        let field = *field;
        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new(input.element(), "input", move |event| {
            let Some(inner) = weak.upgrade() else { return };
            let value = event.target().and_then(|t| {
                t.dyn_ref::<HtmlInputElement>()
                    .map(|i| i.value())
                    .or_else(|| t.dyn_ref::<HtmlTextAreaElement>().map(|a| a.value()))
            });
            if let Some(value) = value {
                inner.borrow_mut().controller.set_field(field, value);
            }
        }));
    }

    let weak = Rc::downgrade(inner);
    listeners.push(EventListener::new_with_options(
        &this.form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            if let Some(inner) = weak.upgrade() {
                submit(&inner);
            }
        },
    ));

    let weak = Rc::downgrade(inner);
    listeners.push(EventListener::new(send_another, "click", move |_| {
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().controller.reset();
            rerender(&inner);
        }
    }));
    listeners
}

fn submit(inner: &Rc<RefCell<Inner>>) {
    let begun = inner.borrow_mut().controller.begin_submit();
    rerender(inner);
    let Ok(body) = begun else {
        return;
    };
    let endpoint = inner.borrow().endpoint.clone();
    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = post_json(&endpoint, &body).await;
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().controller.finish(outcome);
            rerender(&inner);
        }
    });
}

async fn post_json(endpoint: &str, body: &str) -> std::result::Result<(), ContactError> {
    let network = |err: JsValue| ContactError::Network(SiteError::from(err).to_string());

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(body));
    let request = Request::new_with_str_and_init(endpoint, &init).map_err(network)?;
    request.headers().set("Content-Type", "application/json").map_err(network)?;
    request.headers().set("Accept", "application/json").map_err(network)?;

    let window = web_sys::window().ok_or_else(|| ContactError::Network("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    if response.ok() {
        Ok(())
    } else {
        Err(ContactError::Rejected(response.status()))
    }
}

fn form(doc: &Document) -> Result<(HtmlElement, Vec<(Field, FieldInput)>, HtmlElement, HtmlButtonElement)> {
    let form = el(doc, "form", "contact-form")?;
    form.set_attribute("novalidate", "")?;

    let specs = [
        (Field::Name, "Name", "text", "Your name"),
        (Field::Email, "Email", "email", "your.email@example.com"),
        (Field::Message, "Message", "", "Tell me about your project..."),
    ];
    let mut fields = Vec::with_capacity(specs.len());
    for (field, label, kind, placeholder) in specs {
        let row = el(doc, "div", "field")?;
        let caption = text(doc, "label", "field-label", label)?;
        caption.set_attribute("for", field.id())?;
        let tag = if kind.is_empty() { "textarea" } else { "input" };
        let control = el(doc, tag, "field-input")?;
        dom::set_attrs(
            &control,
            &[("id", field.id()), ("name", field.id()), ("placeholder", placeholder), ("required", "")],
        )?;
        let input = if kind.is_empty() {
            control.set_attribute("rows", "6")?;
            FieldInput::Area(control.unchecked_into())
        } else {
            control.set_attribute("type", kind)?;
            FieldInput::Line(control.unchecked_into())
        };
        row.append_child(&caption)?;
        row.append_child(input.element())?;
        form.append_child(&row)?;
        fields.push((field, input));
    }

    let error = el(doc, "div", "form-error")?;
    dom::set_attrs(&error, &[("role", "alert"), ("hidden", "")])?;
    form.append_child(&error)?;

    let submit: HtmlButtonElement = el(doc, "button", "btn btn-primary btn-block")?.unchecked_into();
    submit.set_type("submit");
    form.append_child(&submit)?;
    Ok((form, fields, error, submit))
}

fn success_panel(doc: &Document) -> Result<(HtmlElement, HtmlElement)> {
    let panel = el(doc, "div", "contact-success")?;
    panel.set_hidden(true);
    panel.append_child(&dom::icon(doc, Icon::CheckCircle, "icon-xl success-icon")?)?;
    panel.append_child(&text(doc, "h3", "success-title", SENT_TITLE)?)?;
    panel.append_child(&text(
        doc,
        "p",
        "success-text",
        "Thanks for reaching out! I'll get back to you as soon as possible.",
    )?)?;
    let again = text(doc, "button", "btn btn-primary", "Send Another Message")?;
    again.set_attribute("type", "button")?;
    panel.append_child(&again)?;
    Ok((panel, again))
}

fn direct_links(doc: &Document) -> Result<HtmlElement> {
    let footer = el(doc, "div", "contact-direct")?;
    footer.append_child(&text(doc, "p", "contact-direct-lead", "Or reach out directly:")?)?;
    let row = el(doc, "div", "contact-links")?;
    let mailto = format!("mailto:{EMAIL}");
    let links = [
        (mailto.as_str(), Icon::Mail, "Email", "Email Manvik Talwar", false),
        (GITHUB, Icon::Github, "GitHub", "GitHub Profile", true),
        (LINKEDIN, Icon::Linkedin, "LinkedIn", "LinkedIn Profile", true),
    ];
    for (href, icon, label, aria, external) in links {
        let link = el(doc, "a", "contact-link")?;
        dom::set_attrs(&link, &[("href", href), ("aria-label", aria)])?;
        if external {
            dom::set_attrs(&link, &[("target", "_blank"), ("rel", "noopener noreferrer")])?;
        }
        link.append_child(&dom::icon(doc, icon, "icon-md")?)?;
        link.append_child(&text(doc, "span", "", label)?)?;
        row.append_child(&link)?;
    }
    footer.append_child(&row)?;
    Ok(footer)
}

/// SVG outline around `content` carrying the travelling dash.
struct BorderView {
    root: HtmlElement,
    content: HtmlElement,
    rect: Element,
    border: MovingBorder,
}

impl BorderView {
    fn mount(doc: &Document, secs: f64, motion: MotionConfig) -> Result<Self> {
        let root = el(doc, "div", "moving-border")?;
        let overlay = svg(doc, "svg")?;
        dom::set_attrs(&overlay, &[("class", "moving-border-svg"), ("aria-hidden", "true")])?;

        let defs = svg(doc, "defs")?;
        let gradient = svg(doc, "linearGradient")?;
        dom::set_attrs(
            &gradient,
            &[("id", BORDER_GRADIENT_ID), ("x1", "0%"), ("y1", "0%"), ("x2", "100%"), ("y2", "100%")],
        )?;
        for (offset, color) in BORDER_STOPS {
            let stop = svg(doc, "stop")?;
            let offset = format!("{offset}%");
            dom::set_attrs(&stop, &[("offset", offset.as_str()), ("stop-color", color)])?;
            gradient.append_child(&stop)?;
        }
        defs.append_child(&gradient)?;
        overlay.append_child(&defs)?;

        let rect = svg(doc, "rect")?;
        let stroke = format!("url(#{BORDER_GRADIENT_ID})");
        dom::set_attrs(
            &rect,
            &[
                ("fill", "none"),
                ("stroke", stroke.as_str()),
                ("stroke-width", "2"),
                ("visibility", "hidden"),
            ],
        )?;
        overlay.append_child(&rect)?;

        let content = el(doc, "div", "moving-border-content")?;
        root.append_child(&overlay)?;
        root.append_child(&content)?;
        Ok(Self {
            root,
            content,
            rect,
            border: MovingBorder::new(secs, motion),
        })
    }

    fn tick(&mut self, dt: Duration) {
        let rect = self.content.get_bounding_client_rect();
        if self.border.measure(rect.width(), rect.height()) {
            self.paint_outline().ok();
        }
        if !self.border.is_measured() {
            return;
        }
        self.border.advance(dt);
        self.rect
            .set_attribute("stroke-dashoffset", &self.border.dash_offset().to_string())
            .ok();
    }

    fn paint_outline(&self) -> Result<()> {
        let Some(outline) = self.border.outline() else {
            return Ok(());
        };
        let attrs = [
            ("x", outline.x),
            ("y", outline.y),
            ("width", outline.width),
            ("height", outline.height),
            ("rx", outline.radius),
            ("stroke-dasharray", self.border.dash_array()),
        ];
        for (name, value) in attrs {
            self.rect.set_attribute(name, &value.to_string())?;
        }
        let visibility = if self.border.is_measured() { "visible" } else { "hidden" };
        self.rect.set_attribute("visibility", visibility)?;
        Ok(())
    }
}
