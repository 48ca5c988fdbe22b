// Session-scoped history of feedback results
//
// In-memory only: appended per successful request, cleared by the UI's
// clear button, gone on restart.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::chain::Feedback;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: String,
    pub original_prompt: String,
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_prompt: Option<String>,
}

impl HistoryEntry {
    pub fn new(prompt: &str, feedback: &Feedback) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            original_prompt: prompt.to_string(),
            score: feedback.score,
            strengths: feedback.strengths.clone(),
            weaknesses: feedback.weaknesses.clone(),
            suggestions: feedback.suggestions.clone(),
            improved_prompt: feedback.improved_prompt.clone(),
        }
    }
}

#[derive(Default)]
pub struct HistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, entry: HistoryEntry) {
        self.entries.write().await.push(entry);
    }

    /// Snapshot of all entries, newest first.
    pub async fn snapshot(&self) -> Vec<HistoryEntry> {
        let entries = self.entries.read().await;
        entries.iter().rev().cloned().collect()
    }

    /// Clear the list, returning how many entries were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
