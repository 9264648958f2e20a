use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::emotion::EmotionalContext;
use crate::model::ReplySource;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: Uuid,
    pub source: ReplySource,
    pub categories: EmotionalContext,
}

// Transcript entry, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub is_bot: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content.into(), false)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content.into(), true)
    }

    fn new(content: String, is_bot: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            is_bot,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub busy: bool,
    pub messages: Vec<Message>,
}
