use thiserror::Error;

use crate::contact::ContactError;
use crate::content::ContentError;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    #[error("Missing element: #{0}")]
    MissingElement(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        SiteError::Dom(message)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
