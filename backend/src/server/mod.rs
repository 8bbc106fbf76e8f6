//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer, ResponseError};
use tracing::warn;

use snipbin::domain::ports::{
    FixtureLoginService, MemoryLanguageRepository, MemorySnippetRepository, MemoryUserRepository,
};
use snipbin::domain::{Error, Language, LanguageId, Slug, User, UserId, Username};
use snipbin::inbound::http::{self, state::HttpState};
use snipbin::outbound::highlight::ClassedHighlighter;
use snipbin::outbound::persistence::{
    DieselLanguageRepository, DieselLoginService, DieselSnippetRepository, DieselUserRepository,
};
use snipbin::Trace;

/// Build the port bundle for HTTP handlers.
///
/// Uses the Diesel adapters when a pool is configured; otherwise falls back
/// to seeded in-memory fixtures so the app stays usable in development.
fn build_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.db_pool {
        Some(pool) => Ok(HttpState::new(
            Arc::new(DieselSnippetRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselLanguageRepository::new(pool.clone())),
            Arc::new(DieselLoginService::new(pool.clone())),
            Arc::new(ClassedHighlighter),
        )),
        None => {
            warn!("no database configured; serving in-memory fixture state (dev only)");
            fixture_state()
        }
    }
}

fn fixture_state() -> std::io::Result<HttpState> {
    let fixture_error = |err: &dyn std::fmt::Display| {
        std::io::Error::other(format!("invalid fixture data: {err}"))
    };

    let admin = User::new(
        UserId::random(),
        Username::new(FixtureLoginService::USERNAME).map_err(|e| fixture_error(&e))?,
    );

    let mut languages = Vec::new();
    for (name, slug) in [
        ("Rust", "rust"),
        ("Python", "python"),
        ("JavaScript", "javascript"),
        ("SQL", "sql"),
    ] {
        let slug = Slug::new(slug).map_err(|e| fixture_error(&e))?;
        languages
            .push(Language::new(LanguageId::random(), name, slug).map_err(|e| fixture_error(&e))?);
    }

    Ok(HttpState::new(
        Arc::new(MemorySnippetRepository::default()),
        Arc::new(MemoryUserRepository::with_users(vec![admin.clone()])),
        Arc::new(MemoryLanguageRepository::with_languages(languages)),
        Arc::new(FixtureLoginService::new(*admin.id())),
        Arc::new(ClassedHighlighter),
    ))
}

async fn not_found() -> actix_web::HttpResponse {
    Error::not_found("no such page").error_response()
}

/// Construct the HTTP server from its configuration.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_state(&config)?);
    let key = config.key;
    let cookie_secure = config.cookie_secure;
    let same_site = config.same_site;

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(same_site)
            .build();

        App::new()
            .app_data(state.clone())
            .wrap(session)
            .wrap(Trace)
            .configure(http::configure)
            .default_service(web::route().to(not_found))
    })
    .bind(config.bind_addr)?;

    Ok(server.run())
}
