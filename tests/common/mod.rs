//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use query_group::{group::FilterControl, node::NodeElement};

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// A rendered report row. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct Row {
    attrs: Rc<RefCell<BTreeMap<String, String>>>,
    display: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl Row {
    pub fn new(attrs: &[(&str, &str)]) -> Self {
        let row = Row::default();
        row.attrs.borrow_mut().extend(
            attrs
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        row
    }

    pub fn is_visible(&self) -> bool {
        self.display.borrow().last().copied().unwrap_or(true)
    }

    /// Every visibility change applied to this row, in order.
    pub fn history(&self) -> Vec<bool> {
        self.display.borrow().clone()
    }
}

impl NodeElement for Row {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.borrow().get(name).cloned()
    }

    fn set_visible(&self, visible: bool) {
        self.display.borrow_mut().push(visible);
    }
}

#[derive(Debug, Clone)]
pub struct Radio {
    kind: Option<String>,
    value: String,
    checked: Rc<RefCell<bool>>,
}

#[allow(dead_code)]
impl Radio {
    pub fn new(kind: &str, value: &str, checked: bool) -> Self {
        Radio {
            kind: Some(kind.to_string()),
            value: value.to_string(),
            checked: Rc::new(RefCell::new(checked)),
        }
    }

    /// A browser click on a radio checks it before handlers run.
    pub fn click(&self) {
        *self.checked.borrow_mut() = true;
    }
}

impl FilterControl for Radio {
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
