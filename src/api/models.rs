use serde::{Deserialize, Serialize};

/// One record of the remote list. Owned by the service; the agent only reads
/// it, deletes it by id, or creates a fresh one.
#[derive(Debug, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct NewItem<'a> {
    pub content: &'a str,
    pub comment: &'a str,
}
