use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element `{0}` not found")]
    MissingElement(String),
    #[error("WebGL2 unavailable: {0}")]
    WebGl(String),
    #[error("shader {stage} failed: {log}")]
    Shader { stage: &'static str, log: String },
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
