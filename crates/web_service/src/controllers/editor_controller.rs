use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use ide_core::{Language, Notification};
use uuid::Uuid;

use crate::controllers::bearer_token;
use crate::dto::{ChangeLanguageRequest, EditorResponse, UpdateCodeRequest, UpdateStdinRequest};
use crate::error::AppError;
use crate::server::AppState;

fn respond(editor: &crate::editor::EditorState, notification: Option<Notification>) -> HttpResponse {
    HttpResponse::Ok().json(EditorResponse {
        editor: editor.clone(),
        notification,
    })
}

#[get("/sessions/{id}/editor")]
pub async fn get_editor(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    let editor = session.editor.lock().await;
    Ok(respond(&editor, None))
}

#[put("/sessions/{id}/editor/code")]
pub async fn update_code(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateCodeRequest>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.remember_token(bearer_token(&req).as_deref()).await;

    let mut editor = session.editor.lock().await;
    editor.set_code(payload.into_inner().code);
    session.schedule_autosave(&editor).await;
    Ok(respond(&editor, None))
}

#[put("/sessions/{id}/editor/stdin")]
pub async fn update_stdin(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateStdinRequest>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    let mut editor = session.editor.lock().await;
    editor.set_stdin(payload.into_inner().stdin);
    Ok(respond(&editor, None))
}

#[put("/sessions/{id}/editor/language")]
pub async fn change_language(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    payload: web::Json<ChangeLanguageRequest>,
) -> Result<HttpResponse, AppError> {
    let language: Language = payload.language.parse()?;
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.remember_token(bearer_token(&req).as_deref()).await;

    let mut editor = session.editor.lock().await;
    editor.change_language(language);
    session.schedule_autosave(&editor).await;
    Ok(respond(&editor, None))
}

#[post("/sessions/{id}/editor/clear")]
pub async fn clear_editor(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    let mut editor = session.editor.lock().await;
    editor.clear();
    session.schedule_autosave(&editor).await;
    Ok(respond(
        &editor,
        Some(Notification::success(
            "Cleared",
            "Editor and console have been cleared.",
        )),
    ))
}

#[post("/sessions/{id}/editor/format")]
pub async fn format_editor(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    let mut editor = session.editor.lock().await;
    editor.format();
    session.schedule_autosave(&editor).await;
    let notification = Notification::success(
        "Code Formatted",
        format!(
            "{} code has been formatted successfully.",
            editor.language.display_name()
        ),
    );
    Ok(respond(&editor, Some(notification)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(get_editor)
        .service(update_code)
        .service(update_stdin)
        .service(change_language)
        .service(clear_editor)
        .service(format_editor);
}
