//! WASM bindings for query-group
//!
//! Binds the filter controls of a rendered query-group report page to a [`FilterGroup`].
//!
//! ## Usage
//!
//! ```javascript,ignore
//! import init, { QueryGroupWasm, initLogging } from './query_group.js';
//!
//! window.addEventListener('load', async () => {
//!     await init();
//!     initLogging();
//!     // Default attribute names; pass an object to override any FilterConfig field.
//!     window.queryGroup = new QueryGroupWasm();
//! });
//! ```
//!
//! Construction reads the whole page before wiring anything. If a report entry or a control is
//! malformed the constructor throws and no control gets a click handler.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{console, Document, HtmlElement, HtmlFormElement, HtmlInputElement, NodeList};

use crate::{
    bootstrap::FilterGroup,
    config::FilterConfig,
    error::{QueryGroupError, Result},
    group::{FilterControl, ToggleOutcome},
    node::NodeElement,
};

/// A depth-zero report entry.
#[derive(Debug, Clone)]
pub struct DomEntry {
    element: HtmlElement,
    hidden_display: Rc<str>,
}

impl NodeElement for DomEntry {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_visible(&self, visible: bool) {
        let style = self.element.style();
        let result = if visible {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", &self.hidden_display)
        };
        if let Err(e) = result {
            console::warn_1(&format!("⚠️ Could not update entry visibility: {:?}", e).into());
        }
    }
}

/// A radio input of the filter form.
#[derive(Debug, Clone)]
pub struct DomControl {
    input: HtmlInputElement,
    kind: Option<String>,
}

impl FilterControl for DomControl {
    fn select_kind(&self) -> Option<String> {
        self.kind.clone()
    }

    fn value(&self) -> String {
        self.input.value()
    }

    fn is_checked(&self) -> bool {
        self.input.checked()
    }

    fn set_checked(&self, checked: bool) {
        self.input.set_checked(checked);
    }
}

fn to_js(error: QueryGroupError) -> JsValue {
    let msg = error.console_message();
    console::error_1(&msg.clone().into());
    JsValue::from_str(&msg)
}

fn dom_error(context: &str, value: JsValue) -> QueryGroupError {
    QueryGroupError::Dom(format!("{context}: {value:?}"))
}

fn collect<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| QueryGroupError::Dom("no document available".to_string()))
}

fn read_entries(document: &Document, config: &FilterConfig) -> Result<Vec<DomEntry>> {
    let hidden_display: Rc<str> = Rc::from(config.hidden_display.as_str());
    let list = document
        .query_selector_all(&config.root_selector)
        .map_err(|e| dom_error("invalid root selector", e))?;
    Ok(collect::<HtmlElement>(list)
        .into_iter()
        .map(|element| DomEntry {
            element,
            hidden_display: Rc::clone(&hidden_display),
        })
        .collect())
}

fn read_controls(document: &Document, config: &FilterConfig) -> Result<Vec<DomControl>> {
    let form = document
        .forms()
        .item(config.form_index)
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        .ok_or_else(|| QueryGroupError::Dom(format!("form {} not found", config.form_index)))?;
    let list = form
        .query_selector_all(&config.control_selector())
        .map_err(|e| dom_error("invalid control selector", e))?;
    Ok(collect::<HtmlInputElement>(list)
        .into_iter()
        .map(|input| DomControl {
            kind: input.get_attribute(&config.select_kind_attr),
            input,
        })
        .collect())
}

type SharedGroup = Rc<RefCell<FilterGroup<DomEntry, DomControl>>>;

fn on_activate(group: &SharedGroup, index: usize) {
    let Ok(mut group) = group.try_borrow_mut() else {
        tracing::warn!("Filter control {index} activated while a toggle was running");
        return;
    };
    match group.activate(index) {
        Ok(ToggleOutcome::Filtered { hidden, revealed }) => {
            tracing::debug!(
                "Control {index}: {} hidden, {} revealed",
                hidden.len(),
                revealed.len()
            );
        }
        Ok(ToggleOutcome::Cleared { revealed }) => {
            tracing::debug!("Control {index} cleared, {} revealed", revealed.len());
        }
        Err(e) => {
            to_js(e);
        }
    }
}

/// Route `tracing` output to the browser console. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    tracing_wasm::try_set_as_global_default().ok();
}

/// Handle to the filter group of the current page.
#[wasm_bindgen]
pub struct QueryGroupWasm {
    inner: SharedGroup,
}

#[wasm_bindgen]
impl QueryGroupWasm {
    /// Read the page and wire every filter control.
    ///
    /// # JavaScript Example
    /// ```javascript,ignore
    /// const group = new QueryGroupWasm({ root_selector: ".query[data-depth='0']" });
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<QueryGroupWasm, JsValue> {
        let config: FilterConfig = if config.is_undefined() || config.is_null() {
            FilterConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(QueryGroupError::from)
                .map_err(to_js)?
        };

        let document = document().map_err(to_js)?;
        let entries = read_entries(&document, &config).map_err(to_js)?;
        let controls = read_controls(&document, &config).map_err(to_js)?;
        let group = FilterGroup::bootstrap(entries, controls, &config).map_err(to_js)?;

        console::log_1(
            &format!(
                "✅ Query group ready: {} entries, {} filters",
                group.group().len(),
                group.controls().len()
            )
            .into(),
        );

        let inner: SharedGroup = Rc::new(RefCell::new(group));
        let inputs: Vec<HtmlInputElement> = inner
            .borrow()
            .controls()
            .iter()
            .map(|bound| bound.control.input.clone())
            .collect();
        for (index, input) in inputs.into_iter().enumerate() {
            let shared = Rc::clone(&inner);
            let handler = Closure::<dyn FnMut()>::new(move || on_activate(&shared, index));
            input.set_onclick(Some(handler.as_ref().unchecked_ref()));
            // Handlers live as long as the page
            handler.forget();
        }

        Ok(QueryGroupWasm { inner })
    }

    #[wasm_bindgen(js_name = revealAll)]
    pub fn reveal_all(&self) {
        self.inner.borrow_mut().reveal_all();
    }

    /// Value of the engaged control, `undefined` when unfiltered.
    #[wasm_bindgen(js_name = activeValue)]
    pub fn active_value(&self) -> Option<String> {
        self.inner
            .borrow()
            .group()
            .active()
            .map(|filter| filter.value.clone())
    }

    #[wasm_bindgen(js_name = shownCount)]
    pub fn shown_count(&self) -> usize {
        self.inner.borrow().group().shown().len()
    }

    #[wasm_bindgen(js_name = hiddenCount)]
    pub fn hidden_count(&self) -> usize {
        self.inner.borrow().group().hidden().len()
    }

    /// Returns `{ active: { kind, value } | undefined, shown: number[], hidden: number[] }`
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        let snapshot = self.inner.borrow().group().snapshot();
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(QueryGroupError::from)
            .map_err(to_js)
    }

    /// The same snapshot as a JSON string.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> std::result::Result<String, JsValue> {
        self.inner.borrow().group().snapshot().to_json().map_err(to_js)
    }
}
