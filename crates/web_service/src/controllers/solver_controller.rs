use actix_web::{post, web, HttpRequest, HttpResponse};
use ide_core::Notification;
use uuid::Uuid;

use crate::controllers::bearer_token;
use crate::dto::{AnalysisResponse, EditorResponse};
use crate::error::AppError;
use crate::server::AppState;

#[post("/sessions/{id}/solver/analyze")]
pub async fn analyze_error(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    let context = session.editor.lock().await.context();

    let analysis = app_state
        .solver
        .analyze(&context)
        .await
        .map_err(|e| AppError::solver("Analysis Failed", e))?;

    Ok(HttpResponse::Ok().json(AnalysisResponse {
        analysis,
        notification: Notification::success(
            "Analysis Complete",
            "AI has analyzed your error and provided solutions.",
        ),
    }))
}

#[post("/sessions/{id}/solver/fix")]
pub async fn auto_fix(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.remember_token(bearer_token(&req).as_deref()).await;
    let context = session.editor.lock().await.context();

    let fixed = app_state
        .solver
        .auto_fix(&context)
        .await
        .map_err(|e| AppError::solver("Auto-fix Failed", e))?;

    let mut editor = session.editor.lock().await;
    editor.apply_fix(fixed, false);
    session.schedule_autosave(&editor).await;
    Ok(HttpResponse::Ok().json(EditorResponse {
        editor: editor.clone(),
        notification: Some(Notification::success(
            "Code Fixed!",
            "AI has automatically fixed your code.",
        )),
    }))
}

#[post("/sessions/{id}/solver/debug")]
pub async fn debug_code(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;
    session.remember_token(bearer_token(&req).as_deref()).await;
    let context = session.editor.lock().await.context();

    let fixed = app_state
        .solver
        .debug(&context)
        .await
        .map_err(|e| AppError::solver("Debug Failed", e))?;

    let mut editor = session.editor.lock().await;
    editor.apply_fix(fixed, true);
    session.schedule_autosave(&editor).await;
    Ok(HttpResponse::Ok().json(EditorResponse {
        editor: editor.clone(),
        notification: Some(Notification::success(
            "Code Fixed!",
            "AI has automatically debugged and fixed your code.",
        )),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze_error)
        .service(auto_fix)
        .service(debug_code);
}
