use web_sys::{Document, Element, HtmlElement};

use super::dom::{self, el, svg, text};
use super::signals::DomSignals;
use crate::content::ExperienceEntry;
use crate::effects::beam::{BeamFrame, ContainerMetrics, TracingBeam, BEAM_STOPS};
use crate::error::Result;

const GRADIENT_ID: &str = "beam-gradient";

/// Experience and education timeline with the scroll-driven beam.
pub struct TimelineView {
    _beam: TracingBeam,
}

impl TimelineView {
    pub fn mount(parent: &Element, entries: &[&ExperienceEntry]) -> Result<Self> {
        let doc = dom::document()?;
        let section = el(&doc, "section", "timeline")?;
        section.set_attribute("aria-labelledby", "timeline-heading")?;
        let heading = text(&doc, "h2", "section-title", "Experience & Education")?;
        heading.set_id("timeline-heading");

        let container = el(&doc, "div", "beam-container")?;
        let (rail, line) = rail(&doc)?;
        container.append_child(&rail)?;

        let list = el(&doc, "ol", "timeline-list")?;
        for entry in entries {
            list.append_child(&entry_card(&doc, entry)?)?;
        }
        container.append_child(&list)?;
        dom::append_all(&section, &[&heading, &container])?;
        let signals = DomSignals::window()?;
        // the beam measures on mount, so the section must already be laid out
        parent.append_child(&section)?;

        let measured = container.clone();
        let beam = TracingBeam::mount(
            &signals,
            move || {
                let window = web_sys::window()?;
                let rect = measured.get_bounding_client_rect();
                Some(ContainerMetrics {
                    top: rect.top(),
                    height: rect.height(),
                    viewport_height: dom::viewport_size(&window).1,
                })
            },
            move |frame| paint(&line, frame),
        );
        Ok(Self { _beam: beam })
    }
}

fn paint(line: &Element, frame: BeamFrame) {
    line.set_attribute("stroke-dasharray", &frame.dash_array()).ok();
    line.set_attribute("visibility", if frame.visible() { "visible" } else { "hidden" })
        .ok();
}

/// The faint track plus the gradient line drawn over it.
fn rail(doc: &Document) -> Result<(Element, Element)> {
    let root = svg(doc, "svg")?;
    dom::set_attrs(
        &root,
        &[
            ("class", "beam"),
            ("aria-hidden", "true"),
            ("viewBox", "0 0 2 100"),
            ("preserveAspectRatio", "none"),
        ],
    )?;

    let defs = svg(doc, "defs")?;
    let gradient = svg(doc, "linearGradient")?;
    dom::set_attrs(
        &gradient,
        &[("id", GRADIENT_ID), ("x1", "0"), ("y1", "0"), ("x2", "0"), ("y2", "1")],
    )?;
    for (offset, color, opacity) in BEAM_STOPS {
        let stop = svg(doc, "stop")?;
        let offset = format!("{offset}%");
        let opacity = opacity.to_string();
        dom::set_attrs(
            &stop,
            &[
                ("offset", offset.as_str()),
                ("stop-color", color),
                ("stop-opacity", opacity.as_str()),
            ],
        )?;
        gradient.append_child(&stop)?;
    }
    defs.append_child(&gradient)?;
    root.append_child(&defs)?;

    let track = line(doc, "beam-track", "rgba(255, 255, 255, 0.1)")?;
    let beam = line(doc, "beam-line", &format!("url(#{GRADIENT_ID})"))?;
    dom::set_attrs(
        &beam,
        &[("pathLength", "1"), ("stroke-linecap", "round"), ("visibility", "hidden")],
    )?;
    root.append_child(&track)?;
    root.append_child(&beam)?;
    Ok((root, beam))
}

fn line(doc: &Document, class: &str, stroke: &str) -> Result<Element> {
    let line = svg(doc, "line")?;
    dom::set_attrs(
        &line,
        &[
            ("class", class),
            ("x1", "1"),
            ("y1", "0"),
            ("x2", "1"),
            ("y2", "100"),
            ("stroke", stroke),
            ("stroke-width", "2"),
            ("vector-effect", "non-scaling-stroke"),
        ],
    )?;
    Ok(line)
}

fn entry_card(doc: &Document, entry: &ExperienceEntry) -> Result<HtmlElement> {
    let item = el(doc, "li", "timeline-entry")?;
    let marker = el(doc, "div", "timeline-marker")?;
    marker.append_child(&dom::icon(doc, entry.kind.icon(), "icon-md")?)?;
    item.append_child(&marker)?;

    let card = el(doc, "article", "timeline-card")?;
    let meta = el(doc, "div", "timeline-meta")?;
    meta.append_child(&text(doc, "span", "badge", entry.kind.label())?)?;
    meta.append_child(&text(doc, "span", "timeline-duration", &entry.duration)?)?;
    card.append_child(&meta)?;
    card.append_child(&text(doc, "h3", "timeline-title", &entry.title)?)?;
    card.append_child(&text(doc, "p", "timeline-org", &entry.organization)?)?;

    let points = el(doc, "ul", "timeline-points")?;
    for point in &entry.description {
        points.append_child(&text(doc, "li", "", point)?)?;
    }
    card.append_child(&points)?;

    if !entry.achievements.is_empty() {
        card.append_child(&text(doc, "h4", "timeline-subhead", "Key Achievements")?)?;
        let wins = el(doc, "ul", "timeline-achievements")?;
        for win in &entry.achievements {
            wins.append_child(&text(doc, "li", "", win)?)?;
        }
        card.append_child(&wins)?;
    }
    item.append_child(&card)?;
    Ok(item)
}
