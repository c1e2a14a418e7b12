use serde::Deserialize;

use super::CoinRecord;

pub const STATUS_SUCCESS: &str = "success";

/// Common envelope fields of the backend's JSON answers.
pub trait ApiStatus {
    fn status(&self) -> &str;
    fn message(&self) -> Option<&str>;

    fn is_success(&self) -> bool {
        self.status() == STATUS_SUCCESS
    }

    /// Human readable reason for a non-success answer.
    fn reason(&self) -> String {
        match self.message() {
            Some(message) if !message.is_empty() => message.to_owned(),
            _ => format!("status {}", self.status()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinsResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<Vec<CoinRecord>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cache_update_time: Option<String>,
}

impl ApiStatus for UpdateResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl ApiStatus for CoinsResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
