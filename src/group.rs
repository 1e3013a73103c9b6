//! The filter state machine.
//!
//! A [`QueryGroup`] owns a fixed universe of [`QueryNode`]s and splits it into two disjoint key
//! sets, `shown` and `hidden`. At most one filter is engaged at a time. Switching filters is
//! incremental: nodes that fail the new predicate leave `shown`, and nodes hidden by the previous
//! filter that satisfy the new one come back. Predicates only read immutable metadata, so the two
//! scans can run in either order and classify every node the same way.
//!
//! ```text
//!               toggle(v)                 toggle(v')
//!  Unfiltered ────────────► Filtered(v) ────────────► Filtered(v')
//!      ▲                        │
//!      └── reveal_all() / toggle(v) again
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    node::{NodeElement, NodeKey, QueryNode},
    predicate::{ActiveFilter, FilterBinding},
};

/// The environment side of a radio-style filter control.
///
/// Implemented by `wasm::DomControl` behind the `wasm` feature.
pub trait FilterControl {
    /// The declared selection kind tag, `None` when the control has none.
    fn select_kind(&self) -> Option<String>;
    fn value(&self) -> String;
    fn is_checked(&self) -> bool;
    fn set_checked(&self, checked: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterState {
    Unfiltered,
    Filtered(ActiveFilter),
}

/// Which nodes moved during a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    /// A filter was engaged. `hidden` left the shown set, `revealed` rejoined it.
    Filtered {
        hidden: Vec<NodeKey>,
        revealed: Vec<NodeKey>,
    },
    /// The engaged control was pressed again and every hidden node was revealed.
    Cleared { revealed: Vec<NodeKey> },
}

impl ToggleOutcome {
    pub fn revealed(&self) -> &[NodeKey] {
        match self {
            ToggleOutcome::Filtered { revealed, .. } | ToggleOutcome::Cleared { revealed } => {
                revealed
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSnapshot {
    pub active: Option<ActiveFilter>,
    pub shown: Vec<NodeKey>,
    pub hidden: Vec<NodeKey>,
}

impl PartitionSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug)]
pub struct QueryGroup<E> {
    nodes: Vec<QueryNode<E>>,
    shown: BTreeSet<NodeKey>,
    hidden: BTreeSet<NodeKey>,
    active: Option<ActiveFilter>,
}

impl<E: NodeElement> QueryGroup<E> {
    /// Fix the universe. Every node starts shown and no filter is engaged.
    pub fn new(nodes: Vec<QueryNode<E>>) -> QueryGroup<E> {
        let shown = (0..nodes.len()).map(NodeKey).collect();
        tracing::debug!("QueryGroup initialized with {} nodes", nodes.len());
        QueryGroup {
            nodes,
            shown,
            hidden: BTreeSet::new(),
            active: None,
        }
    }

    /// Handle an activation of `control`, bound to `binding`.
    ///
    /// Pressing the engaged control again unchecks it and reveals everything; any other control
    /// replaces the current filter.
    pub fn toggle<C: FilterControl>(
        &mut self,
        control: &C,
        binding: &FilterBinding,
    ) -> ToggleOutcome {
        let filter = binding.active_filter();
        if self.active.as_ref() == Some(&filter) {
            tracing::debug!("Re-press of active filter {filter}, clearing");
            control.set_checked(false);
            let revealed = self.reveal_all();
            return ToggleOutcome::Cleared { revealed };
        }
        self.apply(binding)
    }

    /// Engage `binding` unconditionally.
    pub fn apply(&mut self, binding: &FilterBinding) -> ToggleOutcome {
        let predicate = &binding.predicate;
        let nodes = &self.nodes;

        let hidden: Vec<NodeKey> = self
            .shown
            .iter()
            .copied()
            .filter(|key| !predicate.matches(nodes[key.0].metadata()))
            .collect();
        let revealed: Vec<NodeKey> = self
            .hidden
            .iter()
            .copied()
            .filter(|key| predicate.matches(nodes[key.0].metadata()))
            .collect();

        for key in &hidden {
            self.shown.remove(key);
            self.nodes[key.0].hide();
        }
        for key in &revealed {
            self.hidden.remove(key);
            self.nodes[key.0].show();
            self.shown.insert(*key);
        }
        self.hidden.extend(hidden.iter().copied());

        let filter = binding.active_filter();
        tracing::debug!(
            "Applied filter {filter}: {} hidden, {} revealed, {} shown",
            hidden.len(),
            revealed.len(),
            self.shown.len()
        );
        self.active = Some(filter);
        ToggleOutcome::Filtered { hidden, revealed }
    }

    /// Show every hidden node and disengage the active filter. Returns the revealed keys.
    pub fn reveal_all(&mut self) -> Vec<NodeKey> {
        let revealed: Vec<NodeKey> = std::mem::take(&mut self.hidden).into_iter().collect();
        for key in &revealed {
            self.nodes[key.0].show();
            self.shown.insert(*key);
        }
        self.active = None;
        tracing::debug!("Revealed {} nodes", revealed.len());
        revealed
    }
}

impl<E> QueryGroup<E> {
    pub fn state(&self) -> FilterState {
        match &self.active {
            Some(filter) => FilterState::Filtered(filter.clone()),
            None => FilterState::Unfiltered,
        }
    }

    pub fn active(&self) -> Option<&ActiveFilter> {
        self.active.as_ref()
    }

    pub fn shown(&self) -> &BTreeSet<NodeKey> {
        &self.shown
    }

    pub fn hidden(&self) -> &BTreeSet<NodeKey> {
        &self.hidden
    }

    pub fn is_shown(&self, key: NodeKey) -> bool {
        self.shown.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, key: NodeKey) -> Option<&QueryNode<E>> {
        self.nodes.get(key.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &QueryNode<E>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeKey(idx), node))
    }

    pub fn snapshot(&self) -> PartitionSnapshot {
        PartitionSnapshot {
            active: self.active.clone(),
            shown: self.shown.iter().copied().collect(),
            hidden: self.hidden.iter().copied().collect(),
        }
    }
}
