use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use ide_core::Config;
use log::{error, info};

use crate::controllers::{
    chat_controller, editor_controller, history_controller, run_controller, session_controller,
    solver_controller, system_controller,
};
use crate::middleware::TracingMiddleware;

pub use crate::state::AppState;

const DEFAULT_WORKER_COUNT: usize = 10;

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .configure(system_controller::config)
            .configure(session_controller::config)
            .configure(editor_controller::config)
            .configure(run_controller::config)
            .configure(chat_controller::config)
            .configure(solver_controller::config)
            .configure(history_controller::config),
    );
}

fn build_state(config: &Config) -> Result<web::Data<AppState>, String> {
    let state = AppState::from_config(config)
        .map_err(|e| format!("Failed to initialize collaborators: {e}"))?;
    Ok(web::Data::new(state))
}

pub async fn run(config: Config) -> Result<(), String> {
    info!("Starting web service...");

    let port = config.port;
    let app_state = build_state(&config)?;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(TracingMiddleware)
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(format!("127.0.0.1:{port}"))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Starting web service on http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
