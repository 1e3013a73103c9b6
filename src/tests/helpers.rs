//! Shared test utilities: in-memory elements and controls that record what the filter did to them.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    group::{FilterControl, QueryGroup},
    node::{NodeElement, NodeKey},
};

#[derive(Debug)]
struct ElementState {
    attrs: BTreeMap<String, String>,
    visible: bool,
    show_calls: usize,
    hide_calls: usize,
}

impl Default for ElementState {
    fn default() -> Self {
        ElementState {
            attrs: BTreeMap::new(),
            visible: true,
            show_calls: 0,
            hide_calls: 0,
        }
    }
}

/// Clones share state, so a test can keep a handle after moving one into a node.
#[derive(Debug, Clone, Default)]
pub struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    pub fn new(statement: &str, location: &str, related: u64, duplicate: bool) -> Self {
        FakeElement::default()
            .with_attr("data-sql-id", statement)
            .with_attr("data-traceback-id", location)
            .with_attr("data-related", &related.to_string())
            .with_attr("data-duplicate", if duplicate { "True" } else { "False" })
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    pub fn show_calls(&self) -> usize {
        self.0.borrow().show_calls
    }

    pub fn hide_calls(&self) -> usize {
        self.0.borrow().hide_calls
    }
}

impl NodeElement for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    fn set_visible(&self, visible: bool) {
        let mut state = self.0.borrow_mut();
        state.visible = visible;
        if visible {
            state.show_calls += 1;
        } else {
            state.hide_calls += 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeControl {
    kind: Option<String>,
    value: String,
    checked: Rc<RefCell<bool>>,
}

impl FakeControl {
    pub fn new(kind: &str, value: &str) -> Self {
        FakeControl {
            kind: Some(kind.to_string()),
            value: value.to_string(),
            checked: Rc::new(RefCell::new(false)),
        }
    }

    /// A control rendered without a selection kind attribute.
    pub fn without_kind(value: &str) -> Self {
        FakeControl {
            kind: None,
            ..FakeControl::new("", value)
        }
    }

    pub fn checked(self) -> Self {
        *self.checked.borrow_mut() = true;
        self
    }
}

impl FilterControl for FakeControl {
    fn select_kind(&self) -> Option<String> {
        self.kind.clone()
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn is_checked(&self) -> bool {
        *self.checked.borrow()
    }

    fn set_checked(&self, checked: bool) {
        *self.checked.borrow_mut() = checked;
    }
}

/// Assert `shown` and `hidden` are disjoint and together cover the whole universe.
pub fn assert_partition<E>(group: &QueryGroup<E>) {
    assert!(group.shown().is_disjoint(group.hidden()));
    let union: Vec<NodeKey> = group.shown().union(group.hidden()).copied().collect();
    let universe: Vec<NodeKey> = group.nodes().map(|(key, _)| key).collect();
    assert_eq!(union, universe);
}
