use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::controllers::bearer_token;
use crate::dto::{ChatView, CreateSessionRequest, SessionView};
use crate::error::AppError;
use crate::server::AppState;

#[post("/sessions")]
pub async fn create_session(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    payload: Option<web::Json<CreateSessionRequest>>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.map(web::Json::into_inner).unwrap_or_default();
    let session = app_state
        .create_session(
            payload.language.unwrap_or_default(),
            payload.mode.unwrap_or_default(),
        )
        .await;
    session.remember_token(bearer_token(&req).as_deref()).await;

    let editor = session.editor.lock().await.clone();
    let chat = session.chat.lock().await;
    let view = SessionView {
        id: session.id,
        editor,
        chat: ChatView {
            mode: chat.mode(),
            messages: chat.turns().to_vec(),
        },
    };
    Ok(HttpResponse::Created().json(view))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_session);
}
