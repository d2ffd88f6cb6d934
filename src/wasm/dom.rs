use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::boundary::FALLBACK_TEXT;
use crate::content::Icon;
use crate::error::{Result, SiteError};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| SiteError::Dom("no window".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| SiteError::Dom("no document".into()))
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// `<tag class="...">`
pub fn el(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    let element = doc.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::Dom(format!("<{tag}> is not an HTML element")))
}

/// `<tag class="...">text</tag>`
pub fn text(doc: &Document, tag: &str, class: &str, content: &str) -> Result<HtmlElement> {
    let element = el(doc, tag, class)?;
    element.set_text_content(Some(content));
    Ok(element)
}

pub fn svg(doc: &Document, tag: &str) -> Result<Element> {
    Ok(doc.create_element_ns(Some(SVG_NS), tag)?)
}

pub fn set_attrs(element: &Element, attrs: &[(&str, &str)]) -> Result<()> {
    for (name, value) in attrs {
        element.set_attribute(name, value)?;
    }
    Ok(())
}

pub fn icon(doc: &Document, icon: Icon, class: &str) -> Result<HtmlElement> {
    let holder = el(doc, "span", "icon")?;
    holder.set_inner_html(&icon.svg(class));
    Ok(holder)
}

pub fn append_all<T: AsRef<Node>>(parent: &Node, children: &[T]) -> Result<()> {
    for child in children {
        parent.append_child(child.as_ref())?;
    }
    Ok(())
}

/// Neutral stand-in for a section that failed to render.
pub fn fallback(doc: &Document) -> Result<HtmlElement> {
    let outer = el(doc, "div", "fallback")?;
    outer.append_child(&text(doc, "div", "fallback-text", FALLBACK_TEXT)?)?;
    Ok(outer)
}
