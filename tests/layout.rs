use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use folio_wasm::contact::{ContactController, ContactError, Field, FormStatus, FAILURE_MESSAGE};
use folio_wasm::content::SiteContent;
use folio_wasm::effects::beam::{ContainerMetrics, TracingBeam};
use folio_wasm::effects::bento::BentoLayout;
use folio_wasm::effects::marquee::{Marquee, MarqueeConfig};
use folio_wasm::effects::spotlight::{Spotlight, SpotlightConfig};
use folio_wasm::motion::{Animate, MotionConfig};
use folio_wasm::signal::Handler;
use folio_wasm::{
    Breakpoints, SignalEvent, SignalKind, SignalSource, SiteConfig, Subscription, ViewportClass,
    ViewportClassifier,
};

type Slot = Rc<RefCell<Handler>>;

/// In-process stand-in for the window's event target.
#[derive(Default)]
struct Bus {
    next: Cell<u64>,
    handlers: Rc<RefCell<HashMap<u64, (SignalKind, Slot)>>>,
}

impl Bus {
    fn emit(&self, event: SignalEvent) {
        let kind = event.kind();
        let targets: Vec<Slot> = self
            .handlers
            .borrow()
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in targets {
            (handler.borrow_mut())(&event);
        }
    }

    fn count(&self, kind: SignalKind) -> usize {
        self.handlers.borrow().values().filter(|(k, _)| *k == kind).count()
    }
}

impl SignalSource for Bus {
    fn subscribe(&self, kind: SignalKind, handler: Handler) -> Subscription {
        let id = self.next.get();
        self.next.set(id + 1);
        self.handlers
            .borrow_mut()
            .insert(id, (kind, Rc::new(RefCell::new(handler))));
        let handlers = Rc::clone(&self.handlers);
        Subscription::new(move || {
            handlers.borrow_mut().remove(&id);
        })
    }
}

#[test]
fn bundled_projects_fill_a_wide_grid() {
    let content = SiteContent::bundled();
    let projects = content.projects.expect("bundled projects are valid");
    assert_eq!(projects.len(), 4);

    let class = ViewportClass::classify(1280.0, &Breakpoints::default());
    let layout = BentoLayout::for_class(class);
    let spans: Vec<_> = projects.iter().map(|p| p.grid_span).collect();
    let placed = layout.place(&spans);

    assert_eq!((layout.columns, layout.gap_px), (3, 24));
    let cells: Vec<_> = placed.iter().map(|p| (p.row, p.column, p.span.cols)).collect();
    assert_eq!(cells, vec![(1, 1, 2), (1, 3, 1), (2, 1, 1), (2, 2, 2)]);
}

#[test]
fn bundled_timeline_lists_work_first() {
    let content = SiteContent::bundled();
    let timeline = content.timeline().expect("bundled experience is valid");
    assert_eq!(timeline.len(), content.experience.as_ref().map_or(0, Vec::len));
    let first_education = timeline
        .iter()
        .position(|e| e.kind.label() == "Education")
        .unwrap_or(timeline.len());
    assert!(timeline[first_education..]
        .iter()
        .all(|e| e.kind.label() == "Education"));
}

#[test]
fn rejected_tech_stack_spares_projects_and_timeline() {
    let projects = include_str!("../content/projects.json");
    let experience = include_str!("../content/experience.json");
    let content = SiteContent::from_json(projects, experience, r#"[{"name": "Rust", "icon": "Rocket"}]"#);

    assert!(content.tech_stack.is_err());
    assert_eq!(content.errors().count(), 1);
    assert_eq!(content.projects.as_ref().map(Vec::len).ok(), Some(4));
    assert!(content.timeline().is_ok_and(|entries| !entries.is_empty()));
}

#[test]
fn spotlight_follows_resizes_across_the_mobile_breakpoint() {
    let bus = Bus::default();
    let classifier = ViewportClassifier::mount(&bus, 1280.0, Breakpoints::default());
    let painted = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&painted);
    let spotlight = Rc::new(RefCell::new(Spotlight::mount(
        SpotlightConfig::default(),
        classifier.current(),
        &bus,
        move |bg| sink.borrow_mut().push(bg.to_string()),
    )));

    let bus = Rc::new(bus);
    let watched = Rc::clone(&spotlight);
    let source = Rc::clone(&bus);
    let _watch = classifier.watch(move |class| watched.borrow_mut().set_viewport(class, &*source));

    bus.emit(SignalEvent::PointerMove { x: 120.0, y: 80.0 });
    assert_eq!(
        painted.borrow().last().map(String::as_str),
        Some("radial-gradient(600px at 120px 80px, rgba(139, 92, 246, 0.3), transparent 80%)")
    );

    bus.emit(SignalEvent::Resize { width: 500.0, height: 800.0 });
    assert_eq!(classifier.current(), ViewportClass::Mobile);
    assert!(!spotlight.borrow().is_tracking());
    assert_eq!(bus.count(SignalKind::PointerMove), 0);
    assert!(painted.borrow().last().is_some_and(|bg| bg.contains("at 50% 50%")));

    bus.emit(SignalEvent::Resize { width: 900.0, height: 800.0 });
    assert_eq!(classifier.current(), ViewportClass::Tablet);
    assert_eq!(bus.count(SignalKind::PointerMove), 1);
}

#[test]
fn beam_tracks_scrolling_both_ways() {
    let bus = Bus::default();
    let top = Rc::new(Cell::new(600.0));
    let measured = Rc::clone(&top);
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    let beam = TracingBeam::mount(
        &bus,
        move || {
            Some(ContainerMetrics {
                top: measured.get(),
                height: 1000.0,
                viewport_height: 800.0,
            })
        },
        move |frame| sink.borrow_mut().push(frame),
    );
    assert_eq!(beam.progress(), 0.0);
    assert!(!beam.frame().visible());

    for next in [400.0, -100.0, -600.0, -900.0] {
        top.set(next);
        bus.emit(SignalEvent::Scroll);
    }
    let seen: Vec<f64> = frames.borrow().iter().map(|f| f.progress).collect();
    assert_eq!(seen, vec![0.0, 0.0, 0.5, 1.0, 1.0]);

    top.set(150.0);
    bus.emit(SignalEvent::Scroll);
    assert!((beam.progress() - 0.25).abs() < 1e-9);
    assert_eq!(beam.frame().dash_array(), "0.25 1");
}

#[test]
fn marquee_loops_seamlessly() {
    let config = MarqueeConfig::default();
    let mut strip = Marquee::new(vec!["a", "b", "c"], config, ViewportClass::Desktop, MotionConfig::FULL);
    assert_eq!(strip.track().copied().collect::<Vec<_>>(), ["a", "b", "c", "a", "b", "c"]);

    strip.advance(Duration::from_secs(5));
    assert!((strip.offset_percent() + 12.5).abs() < 1e-9);
    strip.advance(Duration::from_secs(15));
    assert!(strip.offset_percent().abs() < 1e-9);

    let mut still = Marquee::new(vec!["a"], config, ViewportClass::Desktop, MotionConfig::REDUCED);
    still.advance(Duration::from_secs(3));
    assert_eq!(still.transform(), "translateX(0%)");
}

#[test]
fn contact_form_survives_a_failed_send() {
    let mut form = ContactController::new();
    form.set_field(Field::Name, "Ada Lovelace");
    form.set_field(Field::Email, "ada@example.com");
    form.set_field(Field::Message, "Let's build an engine.");

    let body = form.begin_submit().expect("valid form");
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["email"], "ada@example.com");
    assert!(form.inputs_disabled());
    assert_eq!(form.begin_submit(), Err(ContactError::Busy));

    form.finish(Err(ContactError::Rejected(500)));
    assert_eq!(form.error_message().as_deref(), Some(FAILURE_MESSAGE));
    assert_eq!(form.form().get(Field::Name), "Ada Lovelace");

    form.begin_submit().expect("resubmit");
    form.finish(Ok(()));
    assert_eq!(*form.status(), FormStatus::Succeeded);
    assert!(form.form().get(Field::Message).is_empty());

    form.reset();
    assert_eq!(*form.status(), FormStatus::Idle);
}

#[test]
fn partial_config_keeps_defaults() {
    let config = SiteConfig::from_toml_str(
        r#"
        [viewport]
        tablet = 700
        desktop = 1100

        [marquee]
        speed = "fast"
        "#,
    )
    .unwrap();
    assert_eq!(ViewportClass::classify(720.0, &config.viewport), ViewportClass::Tablet);
    assert_eq!(config.marquee.speed.duration(ViewportClass::Desktop), Duration::from_secs(10));
    assert!(config.marquee.pause_on_hover);
    assert_eq!(config.border.duration_secs, 4.0);
    assert_eq!(config.general.level(), log::Level::Info);
}
