use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::actions::BINDINGS;
use crate::error::SubscriptionKind;
use crate::options::Capability;
use crate::testing::{ExecutedCommand, ManualScheduler, MemoryHost, NodeId};

type TestSession = EditorSession<MemoryHost, ManualScheduler>;

struct Fixture {
    host: Rc<MemoryHost>,
    scheduler: Rc<ManualScheduler>,
    session: TestSession,
    container: NodeId,
}

fn fixture() -> Fixture {
    let host = Rc::new(MemoryHost::new());
    let scheduler = Rc::new(ManualScheduler::new());
    let container = host.add_container("editor");
    let session = EditorSession::new(host.clone(), scheduler.clone());
    Fixture {
        host,
        scheduler,
        session,
        container,
    }
}

fn counter() -> (Rc<Cell<u32>>, ChangeHandler) {
    let count = Rc::new(Cell::new(0));
    let handler_count = count.clone();
    (count, Rc::new(move || handler_count.set(handler_count.get() + 1)))
}

fn toolbar_ids(f: &Fixture) -> Vec<Option<String>> {
    let toolbar = f.session.toolbar().unwrap();
    f.host
        .children(toolbar)
        .into_iter()
        .map(|child| f.host.attribute(child, "id"))
        .collect()
}

fn command(name: &str, value: Option<&str>) -> ExecutedCommand {
    ExecutedCommand {
        name: name.to_string(),
        value: value.map(str::to_string),
    }
}

// === Attach ===

#[test]
fn attach_builds_toolbar_then_surface() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();

    let children = f.host.children(f.container);
    assert_eq!(children.len(), 2);
    assert_eq!(f.host.attribute(children[0], "id").as_deref(), Some(TOOLBAR_ID));
    assert_eq!(f.host.attribute(children[1], "id").as_deref(), Some(SURFACE_ID));
    assert_eq!(f.host.attribute(children[1], "contenteditable").as_deref(), Some("true"));
    assert_eq!(f.host.attribute(children[1], "autofocus").as_deref(), Some("autofocus"));
    assert_eq!(f.host.classes(f.container), [CONTAINER_CLASS]);
    assert!(f.session.is_attached());
    assert_eq!(f.session.options(), Some(ToolbarOptions::default()));
}

#[test]
fn container_keeps_existing_classes() {
    let f = fixture();
    f.host.set_attribute(&f.container, "class", "page-box").unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    assert_eq!(f.host.classes(f.container), ["page-box", CONTAINER_CLASS]);
}

#[test]
fn buttons_carry_title_label_and_class() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();

    let bold = f.host.element_by_id("simple-editor-b").unwrap();
    assert_eq!(f.host.tag(bold), "button");
    assert_eq!(f.host.attribute(bold, "title").as_deref(), Some("Bold"));
    assert_eq!(f.host.attribute(bold, "alt").as_deref(), Some("Bold"));
    assert_eq!(f.host.inner_html(&bold), "<strong>B</strong>");
    assert!(f.host.classes(bold).is_empty());

    let quote = f.host.element_by_id("simple-editor-bq").unwrap();
    assert_eq!(f.host.classes(quote), ["simple-editor-large"]);
}

#[test]
fn dropdowns_start_on_an_empty_placeholder() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();

    let sizes = f.host.element_by_id("simple-editor-font-size").unwrap();
    assert_eq!(f.host.tag(sizes), "select");
    assert_eq!(f.host.value(&sizes), "");

    let options = f.host.children(sizes);
    assert_eq!(options.len(), 8);
    assert_eq!(f.host.text(options[0]), "Size");
    assert_eq!(f.host.attribute(options[0], "value").as_deref(), Some(""));
    assert_eq!(f.host.text(options[7]), "7");
    assert_eq!(f.host.attribute(options[7], "value").as_deref(), Some("7"));

    let fonts = f.host.element_by_id("simple-editor-font-name").unwrap();
    let options = f.host.children(fonts);
    assert_eq!(f.host.text(options[0]), "Font");
    assert_eq!(f.host.text(options[1]), "Andale Mono");
}

#[test]
fn separators_close_each_group() {
    let f = fixture();
    let options = ToolbarOptions::none()
        .with(Capability::Lines, true)
        .with(Capability::Undo, true);
    f.session.attach("editor", options).unwrap();

    let toolbar = f.session.toolbar().unwrap();
    let children = f.host.children(toolbar);
    assert_eq!(children.len(), 4);
    assert_eq!(f.host.classes(children[1]), [SEPARATOR_CLASS]);
    assert_eq!(f.host.classes(children[3]), [SEPARATOR_CLASS]);
}

#[test]
fn attaching_twice_fails_and_leaves_toolbar_alone() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let before = toolbar_ids(&f);

    let err = f
        .session
        .attach("editor", ToolbarOptions::none())
        .unwrap_err();
    assert!(matches!(err, AttachmentError::AlreadyAttached));
    assert_eq!(toolbar_ids(&f), before);
    assert_eq!(f.host.children(f.container).len(), 2);
}

#[test]
fn missing_container_fails_without_attaching() {
    let f = fixture();
    let err = f
        .session
        .attach("nowhere", ToolbarOptions::default())
        .unwrap_err();
    assert!(matches!(err, AttachmentError::ContainerNotFound(id) if id == "nowhere"));
    assert!(!f.session.is_attached());

    // Registration is still open and a later attach succeeds.
    let (_, handler) = counter();
    f.session.on_change(handler).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
}

#[test]
fn host_failure_leaves_the_container_untouched() {
    // Reject each append in turn, from the first control onwards, until the
    // whole editor fits.
    for allowed in 0.. {
        let f = fixture();
        f.host.fail_appends_after(allowed);
        match f.session.attach("editor", ToolbarOptions::default()) {
            Ok(()) => break,
            Err(err) => {
                assert!(matches!(err, AttachmentError::Host(_)), "{allowed}: {err}");
            }
        }
        assert!(!f.session.is_attached());
        assert!(f.host.children(f.container).is_empty(), "{allowed}");
        assert!(f.host.classes(f.container).is_empty(), "{allowed}");

        f.host.allow_appends();
        f.session.attach("editor", ToolbarOptions::default()).unwrap();
        assert_eq!(f.host.children(f.container).len(), 2);
    }
}

#[test]
fn sessions_on_one_page_bind_their_own_controls() {
    let host = Rc::new(MemoryHost::new());
    let scheduler = Rc::new(ManualScheduler::new());
    host.add_container("one");
    host.add_container("two");
    let first = EditorSession::new(host.clone(), scheduler.clone());
    let second = EditorSession::new(host.clone(), scheduler.clone());
    first.attach("one", ToolbarOptions::default()).unwrap();
    second.attach("two", ToolbarOptions::default()).unwrap();

    let bold_of = |session: &TestSession| {
        let toolbar = session.toolbar().unwrap();
        host.children(toolbar)
            .into_iter()
            .find(|child| host.attribute(*child, "id").as_deref() == Some("simple-editor-b"))
            .unwrap()
    };
    let (first_bold, second_bold) = (bold_of(&first), bold_of(&second));
    assert_ne!(first_bold, second_bold);
    assert_eq!(host.listener_count(first_bold, "click"), 1);
    assert_eq!(host.listener_count(second_bold, "click"), 1);

    for (session, bold) in [(&second, second_bold), (&first, first_bold)] {
        host.clear_commands();
        host.dispatch(bold, "click");
        assert_eq!(host.commands(), [command("bold", None)]);
        assert_eq!(host.focused(), session.surface());
    }
}

#[test]
fn disabling_any_capability_removes_its_controls_and_binds_cleanly() {
    let groups: &[(Capability, &[&str])] = &[
        (Capability::Styling, &["b", "i", "u"]),
        (Capability::Strikethrough, &["sk"]),
        (
            Capability::Colors,
            &[
                "color-default",
                "color-red",
                "color-green",
                "color-blue",
                "color-orange",
                "color-purple",
            ],
        ),
        (Capability::Clear, &["clear"]),
        (Capability::Alignment, &["left", "center", "right"]),
        (Capability::Lines, &["hr"]),
        (Capability::Heading1, &["h1"]),
        (Capability::Blockquotes, &["bq"]),
        (Capability::UnorderedLists, &["ul"]),
        (Capability::OrderedLists, &["ol"]),
        (Capability::Fonts, &["font-name"]),
        (Capability::FontSizes, &["font-size"]),
        (Capability::Undo, &["undo"]),
    ];

    for (capability, ids) in groups {
        let f = fixture();
        f.session
            .attach("editor", ToolbarOptions::all().with(*capability, false))
            .unwrap();
        for id in *ids {
            assert!(
                f.host.element_by_id(&control_id(id)).is_none(),
                "{id} present with {capability:?} disabled"
            );
        }
        for binding in BINDINGS.iter().filter(|b| !ids.contains(&b.id)) {
            let control = f.host.element_by_id(&control_id(binding.id)).unwrap();
            assert_eq!(
                f.host.listener_count(control, binding.trigger.event_name()),
                1,
                "{} not bound with {capability:?} disabled",
                binding.id
            );
        }
    }
}

#[test]
fn subheadings_alone_keep_the_block_group() {
    let f = fixture();
    let options = ToolbarOptions::all()
        .with(Capability::Heading1, false)
        .with(Capability::Blockquotes, false);
    f.session.attach("editor", options).unwrap();
    for id in ["p", "h2", "h3"] {
        assert!(f.host.element_by_id(&control_id(id)).is_some(), "{id}");
    }
    assert!(f.host.element_by_id("simple-editor-h1").is_none());
    assert!(f.host.element_by_id("simple-editor-bq").is_none());
}

#[test]
fn empty_toolbar_still_attaches() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::none()).unwrap();
    let toolbar = f.session.toolbar().unwrap();
    assert!(f.host.children(toolbar).is_empty());
    assert!(f.session.surface().is_some());
}

// === Formatting ===

#[test]
fn buttons_focus_the_surface_and_run_their_command() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let surface = f.session.surface().unwrap();

    for (id, expected) in [
        ("b", command("bold", None)),
        ("color-blue", command("foreColor", Some("#3d6ee9"))),
        ("bq", command("formatBlock", Some("BLOCKQUOTE"))),
        ("hr", command("insertHorizontalRule", None)),
        ("undo", command("undo", None)),
    ] {
        f.host.clear_commands();
        let button = f.host.element_by_id(&control_id(id)).unwrap();
        f.host.dispatch(button, "click");
        assert_eq!(f.host.commands(), [expected], "{id}");
        assert_eq!(f.host.focused(), Some(surface));
    }
}

#[test]
fn dropdowns_apply_selection_and_reset() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();

    let fonts = f.host.element_by_id("simple-editor-font-name").unwrap();
    f.host.choose(fonts, "Georgia");
    assert_eq!(f.host.value(&fonts), "");

    // Same entry again fires again.
    f.host.choose(fonts, "Georgia");

    let sizes = f.host.element_by_id("simple-editor-font-size").unwrap();
    f.host.choose(sizes, "5");

    assert_eq!(
        f.host.commands(),
        [
            command("fontName", Some("Georgia")),
            command("fontName", Some("Georgia")),
            command("fontSize", Some("5")),
        ]
    );
}

#[test]
fn dropdowns_ignore_clicks() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let fonts = f.host.element_by_id("simple-editor-font-name").unwrap();
    f.host.dispatch(fonts, "click");
    assert!(f.host.commands().is_empty());
}

// === Registration ===

#[test]
fn registering_after_attach_fails() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let (_, handler) = counter();

    assert_eq!(
        f.session.on_change(handler.clone()),
        Err(RegistrationError::AfterAttach(SubscriptionKind::Immediate))
    );
    assert_eq!(
        f.session.on_change_interval(handler.clone(), 100),
        Err(RegistrationError::AfterAttach(SubscriptionKind::Interval))
    );
    assert_eq!(
        f.session.on_change_idle(handler, 100),
        Err(RegistrationError::AfterAttach(SubscriptionKind::Idle))
    );
}

#[test]
fn no_subscribers_means_no_edit_listener() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let surface = f.session.surface().unwrap();
    assert_eq!(f.host.listener_count(surface, "input"), 0);
}

// === Content ===

#[test]
fn content_access_requires_attach() {
    let f = fixture();
    assert_eq!(
        f.session.get_content(true),
        Err(StateError::NotAttached("get content"))
    );
    assert_eq!(
        f.session.set_content("x"),
        Err(StateError::NotAttached("set content"))
    );
    assert!(f.session.ensure_attached("set content").is_err());
}

#[test]
fn line_feeds_become_breaks() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    f.session.set_content("a\nb").unwrap();
    assert_eq!(f.session.get_content(true).unwrap(), "a<br>b");
}

#[test]
fn content_is_escaped_unless_raw_is_requested() {
    let f = fixture();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    f.session.set_content("<b>salt & pepper</b>").unwrap();

    assert_eq!(
        f.session.get_content(false).unwrap(),
        "&lt;b&gt;salt &amp; pepper&lt;/b&gt;"
    );
    assert_eq!(f.session.get_content(true).unwrap(), "<b>salt & pepper</b>");
}

#[test]
fn set_content_notifies_immediate_handlers_only() {
    let f = fixture();
    let (immediate, handler) = counter();
    f.session.on_change(handler).unwrap();
    let (interval, handler) = counter();
    f.session.on_change_interval(handler, 100).unwrap();
    let (idle, handler) = counter();
    f.session.on_change_idle(handler, 300).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();

    f.session.set_content("hello").unwrap();
    assert_eq!(immediate.get(), 1);

    f.scheduler.advance(1_000);
    assert_eq!(interval.get(), 0);
    assert_eq!(idle.get(), 0);
}

#[test]
fn handlers_can_read_content_while_being_notified() {
    let f = fixture();
    let session = Rc::new(EditorSession::new(f.host.clone(), f.scheduler.clone()));
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));

    let observer = Rc::downgrade(&session);
    let log = seen.clone();
    session
        .on_change(Rc::new(move || {
            if let Some(session) = observer.upgrade() {
                log.borrow_mut().push(session.get_content(true).unwrap());
            }
        }))
        .unwrap();
    session.attach("editor", ToolbarOptions::default()).unwrap();

    session.set_content("first").unwrap();
    let surface = session.surface().unwrap();
    f.host.type_into(surface, "second");

    assert_eq!(*seen.borrow(), ["first", "second"]);
}

// === Edit delivery ===

#[test]
fn immediate_fires_at_once_and_interval_waits_for_its_tick() {
    let f = fixture();
    let (immediate, handler) = counter();
    f.session.on_change(handler).unwrap();
    let (interval, handler) = counter();
    f.session.on_change_interval(handler, 100).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let surface = f.session.surface().unwrap();

    f.host.type_into(surface, "x");
    assert_eq!(immediate.get(), 1);
    assert_eq!(interval.get(), 0);

    f.scheduler.advance(100);
    assert_eq!(interval.get(), 1);

    // A tick with no edit in between delivers nothing.
    f.scheduler.advance(100);
    assert_eq!(interval.get(), 1);

    // Many edits in one period: one delivery.
    for text in ["a", "ab", "abc"] {
        f.host.type_into(surface, text);
        f.scheduler.advance(20);
    }
    assert_eq!(immediate.get(), 4);
    f.scheduler.advance(40);
    assert_eq!(interval.get(), 2);
}

#[test]
fn interval_works_without_immediate_handlers() {
    let f = fixture();
    let (interval, handler) = counter();
    f.session.on_change_interval(handler, 50).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let surface = f.session.surface().unwrap();

    f.host.type_into(surface, "x");
    f.scheduler.advance(50);
    assert_eq!(interval.get(), 1);
}

#[test]
fn edits_before_attach_tick_do_not_count() {
    let f = fixture();
    let (interval, handler) = counter();
    f.session.on_change_interval(handler, 100).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    f.scheduler.advance(500);
    assert_eq!(interval.get(), 0);
}

#[test]
fn idle_coalesces_a_burst_into_one_delivery() {
    let f = fixture();
    let (idle, handler) = counter();
    f.session.on_change_idle(handler, 300).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let surface = f.session.surface().unwrap();

    let start = f.scheduler.now();
    let fired_at = Rc::new(Cell::new(None));
    for (i, text) in ["a", "ab", "abc"].into_iter().enumerate() {
        if i > 0 {
            f.scheduler.advance(50);
        }
        f.host.type_into(surface, text);
    }
    let last_edit = f.scheduler.now();
    assert_eq!(last_edit - start, 100);

    while idle.get() == 0 && f.scheduler.now() < last_edit + 1_000 {
        f.scheduler.advance(10);
        if idle.get() == 1 && fired_at.get().is_none() {
            fired_at.set(Some(f.scheduler.now()));
        }
    }
    f.scheduler.advance(1_000);

    assert_eq!(idle.get(), 1);
    assert!(fired_at.get().unwrap() >= last_edit + 300);
}

#[test]
fn idle_subscriptions_run_independently() {
    let f = fixture();
    let (short, handler) = counter();
    f.session.on_change_idle(handler, 100).unwrap();
    let (long, handler) = counter();
    f.session.on_change_idle(handler, 400).unwrap();
    f.session.attach("editor", ToolbarOptions::default()).unwrap();
    let surface = f.session.surface().unwrap();
    assert_eq!(f.host.listener_count(surface, "input"), 2);

    f.host.type_into(surface, "x");
    f.scheduler.advance(150);
    assert_eq!((short.get(), long.get()), (1, 0));

    f.host.type_into(surface, "xy");
    f.scheduler.advance(400);
    assert_eq!((short.get(), long.get()), (2, 1));
}
