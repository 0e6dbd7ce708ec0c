use serde::Deserialize;

/// Body of a non-2xx backend response. Every field is optional; an empty or
/// non-JSON body decodes to the default.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// `message` if present, else the generic `HTTP Error: {status}` text.
    pub fn into_message(self, status: u16) -> String {
        self.message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP Error: {}", status))
    }
}
