use serde::Deserialize;

/// Status document the provider sends with a 200 instead of a series
/// (bad symbol, exhausted quota, premium-only endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderNotice {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
}

impl ProviderNotice {
    /// First message present, in order of severity
    pub fn message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.information.as_deref())
            .or(self.note.as_deref())
    }
}
