//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting handlers turn
//! domain failures into consistent status codes and rendered error pages.

use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::error::TRACE_ID_HEADER;
use crate::domain::ports::{
    LanguagePersistenceError, SnippetPersistenceError, UserPersistenceError,
};
use crate::domain::{Error, ErrorCode};

use super::pages;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &Error) -> &str {
    // Do not leak backend details to clients.
    match error.code() {
        ErrorCode::InternalError => "Internal server error",
        ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
        _ => error.message(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder
            .content_type(ContentType::html())
            .body(pages::error_page(status, public_message(self)))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// Map snippet persistence failures to domain errors.
pub(crate) fn map_snippet_error(error: SnippetPersistenceError) -> Error {
    match error {
        SnippetPersistenceError::Connection { message } => Error::service_unavailable(message),
        SnippetPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Map user persistence failures to domain errors.
pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Map language persistence failures to domain errors.
pub(crate) fn map_language_error(error: LanguagePersistenceError) -> Error {
    match error {
        LanguagePersistenceError::Connection { message } => Error::service_unavailable(message),
        LanguagePersistenceError::Query { message } => Error::internal(message),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
        assert_eq!(err.status_code(), status);
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("database password leaked").error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        assert!(!body.contains("database password leaked"));
        assert!(body.contains("Internal server error"));
    }

    #[actix_web::test]
    async fn not_found_pages_show_the_message() {
        let response = Error::not_found("no such snippet").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        assert!(body.contains("no such snippet"));
    }

    #[actix_web::test]
    async fn error_responses_carry_the_trace_id() {
        let response = Error::not_found("missing")
            .with_trace_id("abc")
            .error_response();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header");
        assert_eq!(header, "abc");
    }

    #[rstest]
    #[case(map_snippet_error(SnippetPersistenceError::connection("down")), ErrorCode::ServiceUnavailable)]
    #[case(map_snippet_error(SnippetPersistenceError::query("bad")), ErrorCode::InternalError)]
    #[case(map_user_error(UserPersistenceError::connection("down")), ErrorCode::ServiceUnavailable)]
    #[case(map_user_error(UserPersistenceError::query("bad")), ErrorCode::InternalError)]
    #[case(map_language_error(LanguagePersistenceError::connection("down")), ErrorCode::ServiceUnavailable)]
    #[case(map_language_error(LanguagePersistenceError::query("bad")), ErrorCode::InternalError)]
    fn persistence_failures_map_to_domain_codes(#[case] err: Error, #[case] code: ErrorCode) {
        assert_eq!(err.code(), code);
    }
}
