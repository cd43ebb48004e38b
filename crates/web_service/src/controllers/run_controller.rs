use actix_web::{post, web, HttpResponse};
use uuid::Uuid;

use crate::dto::RunResponse;
use crate::error::AppError;
use crate::server::AppState;

/// Execute the editor's code. The editor lock is released while Judge0 runs.
#[post("/sessions/{id}/run")]
pub async fn run_code(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = app_state.sessions.get(path.into_inner()).await?;

    let (language, code, stdin) = {
        let mut editor = session.editor.lock().await;
        editor.begin_run();
        (editor.language, editor.code.clone(), editor.stdin.clone())
    };

    match app_state.runner.run(language, &code, &stdin).await {
        Ok(report) => {
            session.editor.lock().await.record_execution(&report);
            let notification = report.outcome.notification();
            Ok(HttpResponse::Ok().json(RunResponse {
                report,
                notification,
            }))
        }
        Err(e) => {
            log::error!("Execution of {} code failed: {}", language.tag(), e);
            session.editor.lock().await.record_failure(e.user_message());
            Err(e.into())
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(run_code);
}
