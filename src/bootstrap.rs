//! Explicit entry point wiring a report snapshot into a [`QueryGroup`].
//!
//! [`FilterGroup::bootstrap`] validates everything before touching visibility: every node and
//! every control must parse, otherwise no group is returned and the page stays as rendered. Only
//! then is the control checked at load time applied, so the first render matches control state.

use crate::{
    config::FilterConfig,
    error::{QueryGroupError, Result},
    group::{FilterControl, QueryGroup, ToggleOutcome},
    node::{NodeElement, QueryNode},
    predicate::FilterBinding,
};

/// A control paired with the predicate it was resolved to.
#[derive(Debug, Clone)]
pub struct BoundControl<C> {
    pub control: C,
    pub binding: FilterBinding,
}

impl<C: FilterControl> BoundControl<C> {
    pub fn bind(control: C) -> Result<BoundControl<C>> {
        let value = control.value();
        let kind = control.select_kind().unwrap_or_default();
        let binding = FilterBinding::resolve(&kind, &value).inspect_err(|e| {
            tracing::error!("Cannot bind filter control with value {value:?}: {e}");
        })?;
        Ok(BoundControl { control, binding })
    }
}

#[derive(Debug)]
pub struct FilterGroup<E, C> {
    group: QueryGroup<E>,
    controls: Vec<BoundControl<C>>,
}

impl<E: NodeElement, C: FilterControl> FilterGroup<E, C> {
    pub fn bootstrap<I, J>(
        entries: I,
        controls: J,
        config: &FilterConfig,
    ) -> Result<FilterGroup<E, C>>
    where
        I: IntoIterator<Item = E>,
        J: IntoIterator<Item = C>,
    {
        let nodes = entries
            .into_iter()
            .map(|element| QueryNode::new(element, config))
            .collect::<Result<Vec<_>>>()?;
        let controls = controls
            .into_iter()
            .map(BoundControl::bind)
            .collect::<Result<Vec<_>>>()?;

        let mut group = QueryGroup::new(nodes);
        tracing::info!(
            "Query group bound: {} nodes, {} filter controls",
            group.len(),
            controls.len()
        );

        if let Some(selected) = controls.iter().find(|bound| bound.control.is_checked()) {
            tracing::debug!("Applying pre-selected filter {}", selected.binding.active_filter());
            group.apply(&selected.binding);
        }

        Ok(FilterGroup { group, controls })
    }

    /// Activation handler for the control at `index`.
    pub fn activate(&mut self, index: usize) -> Result<ToggleOutcome> {
        let bound = self
            .controls
            .get(index)
            .ok_or(QueryGroupError::ControlNotFound(index))?;
        Ok(self.group.toggle(&bound.control, &bound.binding))
    }

    /// Reveal every node and uncheck every control.
    pub fn reveal_all(&mut self) {
        for bound in self.controls.iter().filter(|b| b.control.is_checked()) {
            bound.control.set_checked(false);
        }
        self.group.reveal_all();
    }
}

impl<E, C> FilterGroup<E, C> {
    pub fn group(&self) -> &QueryGroup<E> {
        &self.group
    }

    pub fn controls(&self) -> &[BoundControl<C>] {
        &self.controls
    }
}
