//! HTTP inbound adapter: handlers, session plumbing, and page rendering.

pub mod error;
pub mod forms;
pub mod listings;
pub mod pages;
pub mod session;
pub mod snippets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
mod views;

use actix_web::http::header;
use actix_web::{web, HttpResponse};

pub use error::ApiResult;

/// Explicit route table mapping (method, path) to handlers.
///
/// Static segments are registered before dynamic ones so `/snippets/add`
/// never matches as a snippet id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(listings::home)))
        .service(
            web::resource("/snippets/add")
                .route(web::get().to(snippets::add_form))
                .route(web::post().to(snippets::add_submit)),
        )
        .service(web::resource("/snippets/{id}").route(web::get().to(snippets::detail)))
        .service(
            web::resource("/snippets/{id}/edit")
                .route(web::get().to(snippets::edit_form))
                .route(web::post().to(snippets::edit_submit)),
        )
        .service(
            web::resource("/snippets/{id}/delete")
                .route(web::get().to(snippets::delete_form))
                .route(web::post().to(snippets::delete_submit)),
        )
        .service(web::resource("/users/{username}").route(web::get().to(listings::user_snippets)))
        .service(
            web::resource("/languages/{slug}").route(web::get().to(listings::language_snippets)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(users::login_form))
                .route(web::post().to(users::login_submit)),
        )
        .service(web::resource("/logout").route(web::get().to(users::logout)));
}

/// 303 redirect used after mutating actions and for login bounces.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// 200 response carrying a rendered HTML page.
pub(crate) fn html_page(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body)
}
