use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use code_history::{save_snapshot, HistoryError};
use ide_core::{Language, Notification};
use uuid::Uuid;

use crate::controllers::bearer_token;
use crate::dto::{DeletedResponse, EditorResponse, HistoryEntryResponse};
use crate::error::AppError;
use crate::server::AppState;

#[post("/sessions/{id}/history")]
pub async fn save_code(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let store = app_state.history_store()?;
    let session = app_state.sessions.get(path.into_inner()).await?;
    let token = bearer_token(&req);
    session.remember_token(token.as_deref()).await;

    let (language, code) = {
        let editor = session.editor.lock().await;
        (editor.language, editor.code.clone())
    };

    let entry = save_snapshot(&**store, token.as_deref(), language, &code).await?;
    session.mark_saved(&code).await;

    Ok(HttpResponse::Ok().json(HistoryEntryResponse {
        entry,
        notification: Notification::success("Saved!", "Code saved to your history."),
    }))
}

#[get("/history")]
pub async fn list_history(
    app_state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let store = app_state.history_store()?;
    let token = bearer_token(&req).ok_or(AppError::MissingToken)?;
    let user = store
        .current_user(&token)
        .await?
        .ok_or(HistoryError::NotSignedIn)?;

    let entries = store.list(&token, &user.id).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[delete("/history/{entry_id}")]
pub async fn delete_entry(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let store = app_state.history_store()?;
    let token = bearer_token(&req).ok_or(AppError::MissingToken)?;
    let id = path.into_inner();

    store.delete(&token, &id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse {
        id,
        notification: Notification::success("Deleted", "Code history item deleted"),
    }))
}

#[post("/sessions/{id}/history/{entry_id}/load")]
pub async fn load_entry(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let store = app_state.history_store()?;
    let (session_id, entry_id) = path.into_inner();
    let session = app_state.sessions.get(session_id).await?;
    let token = bearer_token(&req).ok_or(AppError::MissingToken)?;
    session.remember_token(Some(&token)).await;

    let entry = store
        .get(&token, &entry_id)
        .await?
        .ok_or(AppError::EntryNotFound(entry_id))?;
    let language: Language = entry.language.parse()?;

    let editor = session.load_code(language, entry.code.clone()).await;
    let notification = Notification::success(
        "Code Loaded",
        format!(
            "Loaded {} code from {}",
            entry.language,
            entry.created_at.format("%m/%d/%Y")
        ),
    );
    Ok(HttpResponse::Ok().json(EditorResponse {
        editor,
        notification: Some(notification),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(save_code)
        .service(list_history)
        .service(delete_entry)
        .service(load_entry);
}
