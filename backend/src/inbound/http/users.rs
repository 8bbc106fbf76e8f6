//! Session establishment and teardown handlers.

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::domain::{ErrorCode, LoginCredentials};

use super::forms::LoginForm;
use super::session::SessionContext;
use super::state::HttpState;
use super::{html_page, pages, redirect, ApiResult};

fn login_page(username: &str, error: Option<&str>) -> HttpResponse {
    html_page(pages::layout(
        "Log in",
        None,
        &pages::login_body(username, error),
    ))
}

/// `GET /login`: render the login form.
pub async fn login_form() -> HttpResponse {
    login_page("", None)
}

/// `POST /login`: authenticate and establish the session.
///
/// Bad credentials re-render the form without establishing a session.
pub async fn login_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();

    let credentials = match LoginCredentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => return Ok(login_page(&form.username, Some(&err.to_string()))),
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            info!(user = %user_id, "session established");
            Ok(redirect("/"))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            Ok(login_page(&form.username, Some("invalid username or password")))
        }
        Err(err) => Err(err),
    }
}

/// `GET /logout`: destroy the session and redirect home.
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user_id) = session.user_id()? {
        info!(user = %user_id, "session destroyed");
    }
    session.clear();
    Ok(redirect("/"))
}
