use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::{info, warn};
use uuid::Uuid;

use crate::web::models::Message;

pub const WELCOME_MESSAGE: &str = "¡Hola! Soy Freuda, tu compañera de apoyo emocional. Estoy aquí para escucharte y ayudarte a explorar tus sentimientos en un espacio seguro. ¿Cómo te sientes hoy?";

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

pub type Sessions = Mutex<HashMap<Uuid, Conversation>>;

/// One chat session: an append-only transcript plus the flag that keeps a
/// second submission out while a reply is being produced.
#[derive(Debug)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub busy: bool,
    pub last_active: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let welcome = Message::bot(WELCOME_MESSAGE);
        Self {
            last_active: welcome.timestamp,
            messages: vec![welcome],
            busy: false,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.last_active = message.timestamp;
        self.messages.push(message);
    }
}

/// Looks up a conversation, creating it if needed. When the store is full,
/// the least recently active idle conversation makes room for the new one.
pub fn open_conversation(
    sessions: &mut HashMap<Uuid, Conversation>,
    session_id: Uuid,
    max_sessions: usize,
) -> &mut Conversation {
    if !sessions.contains_key(&session_id) && sessions.len() >= max_sessions {
        let oldest = sessions
            .iter()
            .filter(|(_, conversation)| !conversation.busy)
            .min_by_key(|(_, conversation)| conversation.last_active)
            .map(|(id, _)| *id);

        match oldest {
            Some(id) => {
                info!("Session limit of {} reached, dropping idle session {}", max_sessions, id);
                sessions.remove(&id);
            }
            None => warn!("Session limit of {} reached with every session busy", max_sessions),
        }
    }

    sessions.entry(session_id).or_insert_with(Conversation::new)
}

// Appends the bot reply, recovering the map from a poisoned lock
pub fn record_reply(sessions: &Sessions, session_id: Uuid, text: &str) {
    let mut sessions = sessions.lock().unwrap_or_else(|e| {
        warn!("Sessions mutex was poisoned, recovering to record reply");
        e.into_inner()
    });
    if let Some(conversation) = sessions.get_mut(&session_id) {
        conversation.push(Message::bot(text));
    }
}

// Clears the busy flag on every exit path, including a poisoned lock
pub struct BusyGuard<'a> {
    sessions: &'a Sessions,
    session_id: Uuid,
}

impl<'a> BusyGuard<'a> {
    pub fn new(sessions: &'a Sessions, session_id: Uuid) -> Self {
        Self { sessions, session_id }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(conversation) = sessions.get_mut(&self.session_id) {
            conversation.busy = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::Arc;

    fn idle_since(minutes_ago: i64) -> Conversation {
        let mut conversation = Conversation::new();
        conversation.last_active = Utc::now() - Duration::minutes(minutes_ago);
        conversation
    }

    #[test]
    fn new_conversation_starts_with_welcome() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages.len(), 1);
        assert!(conversation.messages[0].is_bot);
        assert_eq!(conversation.messages[0].content, WELCOME_MESSAGE);
        assert!(!conversation.busy);
    }

    #[test]
    fn push_updates_last_active() {
        let mut conversation = idle_since(30);
        let message = Message::user("hola");
        let sent_at = message.timestamp;
        conversation.push(message);
        assert_eq!(conversation.last_active, sent_at);
        assert_eq!(conversation.messages.len(), 2);
    }

    #[test]
    fn guard_clears_busy_flag_on_drop() {
        let sessions: Sessions = Mutex::new(HashMap::new());
        let id = Uuid::new_v4();
        let mut conversation = Conversation::new();
        conversation.busy = true;
        sessions.lock().unwrap().insert(id, conversation);

        {
            let _guard = BusyGuard::new(&sessions, id);
        }

        assert!(!sessions.lock().unwrap()[&id].busy);
    }

    #[test]
    fn full_store_drops_least_recently_active_idle_session() {
        let (old, recent, busy) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut sessions = HashMap::new();
        sessions.insert(old, idle_since(60));
        sessions.insert(recent, idle_since(1));
        let mut busy_conversation = idle_since(120);
        busy_conversation.busy = true;
        sessions.insert(busy, busy_conversation);

        let fresh = Uuid::new_v4();
        open_conversation(&mut sessions, fresh, 3);

        assert_eq!(sessions.len(), 3);
        assert!(!sessions.contains_key(&old));
        assert!(sessions.contains_key(&recent));
        assert!(sessions.contains_key(&busy));
        assert!(sessions.contains_key(&fresh));
    }

    #[test]
    fn existing_session_is_reused_when_store_is_full() {
        let id = Uuid::new_v4();
        let mut sessions = HashMap::new();
        sessions.insert(id, idle_since(5));

        open_conversation(&mut sessions, id, 1).push(Message::user("hola"));

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[&id].messages.len(), 2);
    }

    #[test]
    fn reply_is_recorded_through_a_poisoned_lock() {
        let sessions: Arc<Sessions> = Arc::new(Mutex::new(HashMap::new()));
        let id = Uuid::new_v4();
        sessions.lock().unwrap().insert(id, Conversation::new());

        let poisoner = Arc::clone(&sessions);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("lock holder failed");
        })
        .join();
        assert!(sessions.is_poisoned());

        record_reply(&sessions, id, "Estoy aquí contigo.");

        let sessions = sessions.lock().unwrap_or_else(|e| e.into_inner());
        let last = sessions[&id].messages.last().unwrap();
        assert!(last.is_bot);
        assert_eq!(last.content, "Estoy aquí contigo.");
    }
}
