//! Names of the attributes, selectors and style values the adapters read from the report page.
//!
//! The defaults match the markup rendered by the query-group report template, so most callers
//! never need anything but [`FilterConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_ROOT_SELECTOR: &str = "[data-depth='0']";
pub const DEFAULT_CONTROL_NAME: &str = "select";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// CSS selector for the depth-zero entries forming the node universe.
    pub root_selector: String,
    /// Index into `document.forms` of the form holding the filter controls.
    pub form_index: u32,
    /// `name` shared by the radio controls of the group.
    pub control_name: String,
    pub statement_attr: String,
    pub location_attr: String,
    pub related_attr: String,
    pub duplicate_attr: String,
    /// Attribute on each control declaring its selection kind.
    pub select_kind_attr: String,
    /// `display` value applied to hidden nodes. Shown nodes get the property removed.
    pub hidden_display: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            root_selector: DEFAULT_ROOT_SELECTOR.to_string(),
            form_index: 0,
            control_name: DEFAULT_CONTROL_NAME.to_string(),
            statement_attr: "data-sql-id".to_string(),
            location_attr: "data-traceback-id".to_string(),
            related_attr: "data-related".to_string(),
            duplicate_attr: "data-duplicate".to_string(),
            select_kind_attr: "data-select-type".to_string(),
            hidden_display: "none".to_string(),
        }
    }
}

impl FilterConfig {
    /// Parse a config from TOML. Missing keys fall back to their defaults.
    pub fn from_toml(content: &str) -> Result<FilterConfig> {
        tracing::debug!("Parsing filter config ({} bytes)", content.len());
        Ok(toml::from_str(content)?)
    }

    /// Selector matching every filter control of the group.
    pub fn control_selector(&self) -> String {
        format!("input[name='{}']", self.control_name)
    }
}
