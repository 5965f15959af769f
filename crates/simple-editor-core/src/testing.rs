//! In-memory host and virtual-clock scheduler.
//!
//! Used by this crate's tests and available to downstream crates through the
//! `testing` feature. `MemoryHost` models just enough of a document for the
//! session: an element tree, attributes, class lists, inner markup, form
//! values, listeners, and a log of executed commands.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::HostError;
use crate::platform::{Callback, EditorHost, Scheduler};

// === Scheduler ===

enum Task {
    Once(Option<Box<dyn FnOnce()>>),
    Repeat(Rc<RefCell<Callback>>),
}

struct Timer {
    seq: u64,
    due: u64,
    period: Option<u64>,
    task: Task,
    cancelled: Rc<Cell<bool>>,
}

/// Cancels its timer on drop.
pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

/// Scheduler driven by explicit calls to [`advance`](Self::advance).
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<u64>,
    seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now.get()
    }

    /// Number of live (uncancelled) timers.
    pub fn pending(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }

    /// Move the clock forward, running every timer that falls due, in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        while let Some(run) = self.next_due(target) {
            run();
        }
        self.now.set(target);
    }

    fn push(&self, due: u64, period: Option<u64>, task: Task) -> ManualTimer {
        let seq = self.seq.get();
        self.seq.set(seq + 1);
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(Timer {
            seq,
            due,
            period,
            task,
            cancelled: cancelled.clone(),
        });
        ManualTimer { cancelled }
    }

    /// Pop the earliest due timer and return its work, with no borrow held.
    fn next_due(&self, target: u64) -> Option<Box<dyn FnOnce()>> {
        let mut timers = self.timers.borrow_mut();
        timers.retain(|timer| !timer.cancelled.get());
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= target)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(index, _)| index)?;

        let due = timers[index].due;
        self.now.set(due);
        match timers[index].period {
            Some(period) => {
                let timer = &mut timers[index];
                timer.due = due + period;
                let Task::Repeat(tick) = &timer.task else {
                    return None;
                };
                let tick = tick.clone();
                Some(Box::new(move || (*tick.borrow_mut())()))
            }
            None => {
                let mut timer = timers.remove(index);
                match &mut timer.task {
                    Task::Once(fire) => fire.take(),
                    Task::Repeat(_) => None,
                }
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Interval = ManualTimer;
    type Timeout = ManualTimer;

    fn interval(&self, period_ms: u32, tick: Callback) -> ManualTimer {
        let period = u64::from(period_ms.max(1));
        self.push(
            self.now.get() + period,
            Some(period),
            Task::Repeat(Rc::new(RefCell::new(tick))),
        )
    }

    fn timeout(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> ManualTimer {
        self.push(
            self.now.get() + u64::from(delay_ms),
            None,
            Task::Once(Some(fire)),
        )
    }
}

// === Host ===

/// Handle to a node in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<usize>,
    children: Vec<usize>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    inner_html: String,
    text: String,
    value: String,
}

struct Listener {
    node: usize,
    event: &'static str,
    callback: Rc<RefCell<Callback>>,
    active: Rc<Cell<bool>>,
}

/// Detaches its listener on drop.
pub struct MemoryListener {
    active: Rc<Cell<bool>>,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// A command the host was asked to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub name: String,
    pub value: Option<String>,
}

/// In-memory document. Node 0 is the document body.
pub struct MemoryHost {
    nodes: RefCell<Vec<Node>>,
    listeners: RefCell<Vec<Listener>>,
    commands: RefCell<Vec<ExecutedCommand>>,
    focused: Cell<Option<usize>>,
    append_budget: Cell<Option<usize>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![Node {
                tag: "body".into(),
                ..Node::default()
            }]),
            listeners: RefCell::new(Vec::new()),
            commands: RefCell::new(Vec::new()),
            focused: Cell::new(None),
            append_budget: Cell::new(None),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a `<div id=..>` to the body, like a page would before attaching.
    pub fn add_container(&self, id: &str) -> NodeId {
        let node = self.push_node("div");
        self.nodes.borrow_mut()[node].attributes.insert("id".into(), id.into());
        self.attach_node(0, node);
        NodeId(node)
    }

    pub fn tag(&self, element: NodeId) -> String {
        self.nodes.borrow()[element.0].tag.clone()
    }

    pub fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attributes.get(name).cloned()
    }

    pub fn classes(&self, element: NodeId) -> Vec<String> {
        self.nodes.borrow()[element.0].classes.clone()
    }

    pub fn children(&self, element: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[element.0]
            .children
            .iter()
            .copied()
            .map(NodeId)
            .collect()
    }

    pub fn text(&self, element: NodeId) -> String {
        self.nodes.borrow()[element.0].text.clone()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get().map(NodeId)
    }

    /// Commands executed so far, oldest first.
    pub fn commands(&self) -> Vec<ExecutedCommand> {
        self.commands.borrow().clone()
    }

    /// Let the next `count` appends succeed and reject every one after.
    pub fn fail_appends_after(&self, count: usize) {
        self.append_budget.set(Some(count));
    }

    /// Stop rejecting appends.
    pub fn allow_appends(&self) {
        self.append_budget.set(None);
    }

    pub fn clear_commands(&self) {
        self.commands.borrow_mut().clear();
    }

    /// Number of attached listeners for `event` on `element`.
    pub fn listener_count(&self, element: NodeId, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.node == element.0 && l.event == event && l.active.get())
            .count()
    }

    /// Fire `event` on `element`, running listeners in attach order.
    pub fn dispatch(&self, element: NodeId, event: &str) {
        let callbacks: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.node == element.0 && l.event == event)
            .map(|l| (l.callback.clone(), l.active.clone()))
            .collect();
        for (callback, active) in callbacks {
            if active.get() {
                (*callback.borrow_mut())();
            }
        }
    }

    /// Simulate the user typing into an element: replace its markup and fire
    /// `input`.
    pub fn type_into(&self, element: NodeId, html: &str) {
        self.nodes.borrow_mut()[element.0].inner_html = html.to_string();
        self.dispatch(element, "input");
    }

    /// Simulate picking a dropdown entry: set its value and fire `change`.
    pub fn choose(&self, element: NodeId, value: &str) {
        self.nodes.borrow_mut()[element.0].value = value.to_string();
        self.dispatch(element, "change");
    }

    fn push_node(&self, tag: &str) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        nodes.len() - 1
    }

    fn attach_node(&self, parent: usize, child: usize) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(old) = nodes[child].parent.take() {
            nodes[old].children.retain(|c| *c != child);
        }
        nodes[child].parent = Some(parent);
        nodes[parent].children.push(child);
    }

    fn is_connected(nodes: &[Node], mut node: usize) -> bool {
        loop {
            if node == 0 {
                return true;
            }
            match nodes[node].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

impl EditorHost for MemoryHost {
    type Element = NodeId;
    type Listener = MemoryListener;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        nodes
            .iter()
            .enumerate()
            .find(|(index, node)| {
                node.attributes.get("id").map(String::as_str) == Some(id)
                    && Self::is_connected(&nodes, *index)
            })
            .map(|(index, _)| NodeId(index))
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, HostError> {
        if tag.is_empty() {
            return Err("empty tag name".into());
        }
        Ok(NodeId(self.push_node(tag)))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), HostError> {
        if parent == child {
            return Err("cannot append a node to itself".into());
        }
        match self.append_budget.get() {
            Some(0) => return Err("append rejected".into()),
            Some(left) => self.append_budget.set(Some(left - 1)),
            None => {}
        }
        self.attach_node(parent.0, child.0);
        Ok(())
    }

    fn remove(&self, element: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[element.0].parent.take() {
            nodes[parent].children.retain(|c| *c != element.0);
        }
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), HostError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_string).collect();
        } else {
            node.attributes.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    fn add_class(&self, element: &NodeId, class: &str) -> Result<(), HostError> {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn inner_html(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].inner_html.clone()
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.nodes.borrow_mut()[element.0].inner_html = html.to_string();
    }

    fn set_text_content(&self, element: &NodeId, text: &str) {
        self.nodes.borrow_mut()[element.0].text = text.to_string();
    }

    fn value(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].value.clone()
    }

    fn set_value(&self, element: &NodeId, value: &str) {
        self.nodes.borrow_mut()[element.0].value = value.to_string();
    }

    fn focus(&self, element: &NodeId) {
        self.focused.set(Some(element.0));
    }

    fn exec_command(&self, command: &str, value: Option<&str>) -> bool {
        self.commands.borrow_mut().push(ExecutedCommand {
            name: command.to_string(),
            value: value.map(str::to_string),
        });
        true
    }

    fn listen(&self, element: &NodeId, event: &'static str, callback: Callback) -> MemoryListener {
        let active = Rc::new(Cell::new(true));
        self.listeners.borrow_mut().push(Listener {
            node: element.0,
            event,
            callback: Rc::new(RefCell::new(callback)),
            active: active.clone(),
        });
        MemoryListener { active }
    }
}
