use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "wasm")]
use serde_wasm_bindgen::Error as WasmError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum QueryGroupError {
    #[error("Malformed node metadata: attribute '{attribute}' has invalid value {value:?}")]
    MalformedMetadata {
        attribute: String,
        value: Option<String>,
    },
    #[error("Unknown select type: {0}")]
    UnknownSelectKind(String),
    #[error("No filter control bound at index {0}")]
    ControlNotFound(usize),
    #[error("Document error: {0}")]
    Dom(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl QueryGroupError {
    pub(crate) fn malformed(attribute: &str, value: Option<&str>) -> Self {
        QueryGroupError::MalformedMetadata {
            attribute: attribute.to_string(),
            value: value.map(str::to_string),
        }
    }

    /// True for errors raised while reading the report tree or its controls, i.e. the filter UI
    /// must stay non-interactive.
    pub fn is_setup_failure(&self) -> bool {
        matches!(
            self,
            QueryGroupError::MalformedMetadata { .. }
                | QueryGroupError::UnknownSelectKind(_)
                | QueryGroupError::Dom(_)
        )
    }

    /// Line written to the browser console when an error reaches JavaScript.
    pub fn console_message(&self) -> String {
        if self.is_setup_failure() {
            format!("❌ Query filters disabled: {self}")
        } else {
            format!("❌ {self}")
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryGroupError>;

impl From<toml::de::Error> for QueryGroupError {
    fn from(src: toml::de::Error) -> QueryGroupError {
        QueryGroupError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<serde_json::Error> for QueryGroupError {
    fn from(src: serde_json::Error) -> QueryGroupError {
        QueryGroupError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

#[cfg(feature = "wasm")]
impl From<WasmError> for QueryGroupError {
    fn from(wasm_error: WasmError) -> Self {
        QueryGroupError::Serialization(format!("Serde-wasm-bindgen error: {wasm_error}"))
    }
}
