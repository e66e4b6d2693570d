use serde::{Deserialize, Serialize};

/// Event details presented on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub venue: String,
    #[serde(alias = "starts_at")]
    pub starts_at: String,
}

impl Default for EventDetails {
    fn default() -> Self {
        Self {
            title: "Moove Flow Experience".to_owned(),
            description: "An evening of movement, music and conversation.".to_owned(),
            venue: "To be announced".to_owned(),
            starts_at: "To be announced".to_owned(),
        }
    }
}
