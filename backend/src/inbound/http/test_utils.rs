//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App, HttpResponse};

use crate::domain::ports::{
    FixtureLoginService, MemoryLanguageRepository, MemorySnippetRepository, MemoryUserRepository,
};
use crate::domain::{
    Error, Language, LanguageId, Slug, Snippet, SnippetContent, User, UserId, Username,
};
use crate::outbound::highlight::ClassedHighlighter;

use super::session::SessionContext;
use super::state::HttpState;
use super::ApiResult;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Seeded ports plus the fixtures they were seeded with.
pub struct TestContext {
    pub state: HttpState,
    pub admin: User,
    pub ada: User,
    pub rust: Language,
    pub python: Language,
}

/// Memory-backed state with two users and two languages.
///
/// The fixture login service authenticates `admin` / `password` as the
/// `admin` user.
pub fn test_context() -> TestContext {
    let admin = User::new(
        UserId::random(),
        Username::new("admin").expect("valid username"),
    );
    let ada = User::new(
        UserId::random(),
        Username::new("ada").expect("valid username"),
    );
    let rust = Language::new(
        LanguageId::random(),
        "Rust",
        Slug::new("rust").expect("valid slug"),
    )
    .expect("valid language");
    let python = Language::new(
        LanguageId::random(),
        "Python",
        Slug::new("python").expect("valid slug"),
    )
    .expect("valid language");

    let state = HttpState::new(
        Arc::new(MemorySnippetRepository::default()),
        Arc::new(MemoryUserRepository::with_users(vec![
            admin.clone(),
            ada.clone(),
        ])),
        Arc::new(MemoryLanguageRepository::with_languages(vec![
            rust.clone(),
            python.clone(),
        ])),
        Arc::new(FixtureLoginService::new(*admin.id())),
        Arc::new(ClassedHighlighter),
    );

    TestContext {
        state,
        admin,
        ada,
        rust,
        python,
    }
}

/// Store a snippet directly through the port, bypassing the handlers.
pub async fn seed_snippet(
    state: &HttpState,
    owner: &UserId,
    language: &LanguageId,
    public: bool,
) -> Snippet {
    let snippet = Snippet::create(
        *owner,
        *language,
        SnippetContent::new("fn main() {}").expect("valid content"),
        public,
    );
    state
        .snippets
        .create(&snippet)
        .await
        .expect("seed snippet stored");
    snippet
}

/// Backdoor route establishing a session for an arbitrary user id.
async fn test_login(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let user_id: UserId = path
        .into_inner()
        .parse()
        .map_err(|_| Error::invalid_request("bad test user id"))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Application with the real route table plus the test login backdoor.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(test_session_middleware())
        .app_data(web::Data::new(state))
        .route("/test-login/{id}", web::get().to(test_login))
        .configure(super::configure)
}

/// Obtain a session cookie authenticating as `user_id`.
pub async fn login_as<S, B>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<B>,
        Error = actix_web::Error,
    >,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/test-login/{user_id}"))
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
