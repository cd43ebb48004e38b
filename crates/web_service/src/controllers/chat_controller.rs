use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use agent_llm::ChatOptions;
use uuid::Uuid;

use crate::controllers::bearer_token;
use crate::dto::{ChatTurnResponse, ChatView, SendMessageRequest, SetModeRequest};
use crate::error::AppError;
use crate::server::AppState;
use crate::state::IdeSession;

async fn chat_view(session: &IdeSession) -> ChatView {
    let chat = session.chat.lock().await;
    ChatView {
        mode: chat.mode(),
        messages: chat.turns().to_vec(),
    }
}

#[post("/sessions/{id}/chat/open")]
pub async fn open_chat(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.chat.lock().await.open();
    Ok(HttpResponse::Ok().json(chat_view(&session).await))
}

#[put("/sessions/{id}/chat/mode")]
pub async fn set_mode(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<SetModeRequest>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.chat.lock().await.set_mode(payload.mode);
    Ok(HttpResponse::Ok().json(chat_view(&session).await))
}

#[get("/sessions/{id}/chat/messages")]
pub async fn get_messages(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(chat_view(&session).await))
}

/// Run one chat turn.
///
/// The turn is begun and completed under the session locks; the model call
/// in between runs unlocked, so other requests on the session proceed and
/// concurrent turns land in the order their replies arrive.
#[post("/sessions/{id}/chat/messages")]
pub async fn send_message(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.remember_token(bearer_token(&req).as_deref()).await;

    let context = session.editor.lock().await.context();
    let pending = session
        .chat
        .lock()
        .await
        .begin_turn(&payload.message, &context)?;

    tracing::info!(
        turn = pending.seq,
        mode = %pending.mode,
        provider = app_state.chat_provider.name(),
        "Sending chat turn"
    );
    let reply = app_state
        .chat_provider
        .chat(&pending.messages, &ChatOptions::default())
        .await;

    let mut editor = session.editor.lock().await;
    let turn = session
        .chat
        .lock()
        .await
        .complete_turn(pending, reply, &mut *editor);

    let code = if turn.applied {
        session.schedule_autosave(&editor).await;
        Some(editor.code.clone())
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(ChatTurnResponse { turn, code }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(open_chat)
        .service(set_mode)
        .service(get_messages)
        .service(send_message);
}
