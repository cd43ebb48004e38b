pub mod chat_controller;
pub mod editor_controller;
pub mod history_controller;
pub mod run_controller;
pub mod session_controller;
pub mod solver_controller;
pub mod system_controller;

use actix_web::{http::header, HttpRequest};

/// Access token from `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer tok-1"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("tok-1"));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
