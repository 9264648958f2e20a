use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use log::{info, error};

use crate::web::models::{ChatRequest, ChatResponse, Message, TranscriptResponse};
use crate::web::session::{open_conversation, record_reply, BusyGuard};
use crate::AppState;

pub const ERROR_NOTICE: &str = "No pude procesar tu mensaje. Por favor, intenta de nuevo.";

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({ "error": ERROR_NOTICE }))
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    let message = req.message.trim().to_string();
    if message.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "El mensaje no puede estar vacío."
        }));
    }

    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    info!("Chat request from session {}: {}", session_id, message);

    {
        let mut sessions = match data.sessions.lock() {
            Ok(guard) => guard,
            Err(e) => {
                error!("Failed to lock sessions mutex: {}", e);
                return internal_error();
            }
        };

        let conversation = open_conversation(&mut sessions, session_id, data.max_sessions);
        if conversation.busy {
            info!("Session {} is still waiting on a reply", session_id);
            return HttpResponse::Conflict().json(json!({
                "error": "Freuda todavía está respondiendo tu mensaje anterior."
            }));
        }

        conversation.busy = true;
        conversation.push(Message::user(message.as_str()));
    }

    // Detached so the reply is recorded even if the client goes away
    let task_data = data.clone();
    let task_message = message.clone();
    let generation = actix_web::rt::spawn(async move {
        let _busy = BusyGuard::new(&task_data.sessions, session_id);
        let reply = task_data.generator.generate_response(&task_message).await;
        info!("Reply for session {} from {:?}", session_id, reply.source);
        record_reply(&task_data.sessions, session_id, &reply.text);
        reply
    });

    let reply = match generation.await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Reply task for session {} failed: {}", session_id, e);
            return internal_error();
        }
    };

    HttpResponse::Ok().json(ChatResponse {
        response: reply.text,
        session_id,
        source: reply.source,
        categories: reply.context,
    })
}

// Transcript for one session, oldest first
pub async fn transcript(
    data: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let session_id = path.into_inner();
    let sessions = match data.sessions.lock() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Failed to lock sessions mutex: {}", e);
            return internal_error();
        }
    };

    match sessions.get(&session_id) {
        Some(conversation) => HttpResponse::Ok().json(TranscriptResponse {
            session_id,
            busy: conversation.busy,
            messages: conversation.messages.clone(),
        }),
        None => HttpResponse::NotFound().json(json!({ "error": "Sesión no encontrada" })),
    }
}
