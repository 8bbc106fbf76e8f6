//! Listing handlers: home, per-user, and per-language views.
//!
//! Each handler fetches a candidate set from the snippet repository and lets
//! the visibility policy decide what the viewer may see.

use actix_web::{web, HttpResponse};

use crate::domain::{visibility, Error, Slug, Username};

use super::error::{map_language_error, map_snippet_error, map_user_error};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{resolve_views, viewer_name};
use super::{html_page, pages, ApiResult};

/// `GET /`: the union of the viewer's own snippets and all public ones.
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    let candidates = state
        .snippets
        .list_all()
        .await
        .map_err(map_snippet_error)?;
    let snippets = visibility::home_snippets(&viewer, candidates);

    let views = resolve_views(&state, &snippets).await?;
    let nav = viewer_name(&state, &viewer).await?;
    Ok(html_page(pages::layout(
        "All snippets",
        nav.as_deref(),
        &pages::listing_body("All snippets", &views),
    )))
}

/// `GET /users/{username}`: that user's snippets per the visibility policy.
pub async fn user_snippets(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    let username =
        Username::new(path.into_inner()).map_err(|_| Error::not_found("no such user"))?;
    let user = state
        .users
        .find_by_username(&username)
        .await
        .map_err(map_user_error)?
        .ok_or_else(|| Error::not_found("no such user"))?;

    let candidates = state
        .snippets
        .list_by_owner(user.id())
        .await
        .map_err(map_snippet_error)?;
    let snippets = visibility::visible_snippets(&viewer, candidates);

    let heading = format!("Snippets by {username}");
    let views = resolve_views(&state, &snippets).await?;
    let nav = viewer_name(&state, &viewer).await?;
    Ok(html_page(pages::layout(
        &heading,
        nav.as_deref(),
        &pages::listing_body(&heading, &views),
    )))
}

/// `GET /languages/{slug}`: snippets for a language per the visibility
/// policy: public ones plus the viewer's own.
pub async fn language_snippets(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    let slug = Slug::new(path.into_inner()).map_err(|_| Error::not_found("no such language"))?;
    let language = state
        .languages
        .find_by_slug(&slug)
        .await
        .map_err(map_language_error)?
        .ok_or_else(|| Error::not_found("no such language"))?;

    let candidates = state
        .snippets
        .list_by_language(language.id())
        .await
        .map_err(map_snippet_error)?;
    let snippets = visibility::visible_snippets(&viewer, candidates);

    let heading = format!("{} snippets", language.name());
    let views = resolve_views(&state, &snippets).await?;
    let nav = viewer_name(&state, &viewer).await?;
    Ok(html_page(pages::layout(
        &heading,
        nav.as_deref(),
        &pages::listing_body(&heading, &views),
    )))
}
