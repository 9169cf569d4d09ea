use thiserror::Error;

/// Shown when the proxy reports a failure without saying why.
pub const PROXY_FALLBACK_MESSAGE: &str = "代理請求失敗，但未回傳具體錯誤訊息。";

/// Why a single proxy round trip failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyFailure {
    /// The proxy answered with a non-success status or an `error` object.
    #[error("{0}")]
    Rejected(String),

    /// The request never produced a readable answer.
    #[error("{0}")]
    Transport(String),

    /// The answer arrived but did not have the expected shape.
    #[error("回應格式無效：{0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProxyFailure {
    fn from(e: reqwest::Error) -> Self {
        ProxyFailure::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for ProxyFailure {
    fn from(e: serde_json::Error) -> Self {
        ProxyFailure::InvalidResponse(e.to_string())
    }
}

/// Failure of one generation-service operation, worded for the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("無法獲取餐廳列表：{0}")]
    Restaurants(#[source] ProxyFailure),

    #[error("無法獲取菜單：{0}")]
    Menu(#[source] ProxyFailure),

    #[error("訂單提交失敗：{0}")]
    Confirmation(#[source] ProxyFailure),
}

/// The order sink could not keep the record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("無法儲存訂單記錄。")]
pub struct SinkError {
    pub reason: String,
}

impl SinkError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
