/// Application errors. Rendering never fails on data problems, only on host API failures.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NetworkError(String),
    RenderingError(String),
    DataError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            AppError::DataError(msg) => write!(f, "Data Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        AppError::RenderingError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(error: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

pub type NetworkResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
