//! Snippet CRUD handlers.
//!
//! Every mutating flow requires a logged-in user (anonymous visitors bounce
//! to the login page) and applies the ownership guard before touching the
//! store; guard failures redirect home without mutating.

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::domain::{visibility, Error, Language, Snippet, SnippetId, UserId, Viewer};

use super::error::{map_language_error, map_snippet_error};
use super::forms::SnippetForm;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{resolve_view, viewer_name};
use super::{html_page, pages, redirect, ApiResult};

fn parse_id(raw: &str) -> ApiResult<SnippetId> {
    raw.parse()
        .map_err(|_| Error::not_found("no such snippet"))
}

async fn known_languages(state: &HttpState) -> ApiResult<Vec<Language>> {
    state
        .languages
        .list_all()
        .await
        .map_err(map_language_error)
}

async fn find_snippet(state: &HttpState, id: &SnippetId) -> ApiResult<Snippet> {
    state
        .snippets
        .find_by_id(id)
        .await
        .map_err(map_snippet_error)?
        .ok_or_else(|| Error::not_found("no such snippet"))
}

async fn render_snippet_form(
    state: &HttpState,
    user_id: UserId,
    heading: &str,
    action_path: &str,
    form: &SnippetForm,
    errors: &[super::forms::FieldError],
) -> ApiResult<HttpResponse> {
    let languages = known_languages(state).await?;
    let viewer = Viewer::Authenticated(user_id);
    let nav = viewer_name(state, &viewer).await?;
    Ok(html_page(pages::layout(
        heading,
        nav.as_deref(),
        &pages::form_body(heading, action_path, &languages, form, errors),
    )))
}

/// `GET /snippets/add`: render the empty creation form.
pub async fn add_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirect("/login"));
    };

    render_snippet_form(
        &state,
        user_id,
        "Add snippet",
        "/snippets/add",
        &SnippetForm::default(),
        &[],
    )
    .await
}

/// `POST /snippets/add`: create a snippet owned by the current user.
pub async fn add_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SnippetForm>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirect("/login"));
    };
    let form = form.into_inner();

    let languages = known_languages(&state).await?;
    match form.validate(&languages) {
        Err(errors) => {
            render_snippet_form(
                &state,
                user_id,
                "Add snippet",
                "/snippets/add",
                &form,
                &errors,
            )
            .await
        }
        Ok((language_id, content)) => {
            let snippet = Snippet::create(user_id, language_id, content, form.is_public());
            state
                .snippets
                .create(&snippet)
                .await
                .map_err(map_snippet_error)?;
            info!(snippet_id = %snippet.id(), owner = %user_id, "snippet created");
            Ok(redirect("/"))
        }
    }
}

/// `GET /snippets/{id}`: snippet detail with highlighted code.
///
/// The visibility predicate applies here too: a snippet the viewer may not
/// see renders as not found rather than leaking through a direct link.
pub async fn detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let viewer = session.viewer()?;
    let id = parse_id(&path.into_inner())?;
    let snippet = find_snippet(&state, &id).await?;
    if !visibility::is_visible_to(&viewer, &snippet) {
        return Err(Error::not_found("no such snippet"));
    }

    let view = resolve_view(&state, &snippet).await?;
    let code = state.highlighter.render(&view.content, &view.language);
    let can_modify = visibility::can_modify(&viewer, &snippet);
    let nav = viewer_name(&state, &viewer).await?;
    let title = format!("{} snippet", view.language);
    Ok(html_page(pages::layout(
        &title,
        nav.as_deref(),
        &pages::snippet_body(&view, &code, can_modify),
    )))
}

/// `GET /snippets/{id}/edit`: render the populated edit form.
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirect("/login"));
    };
    let id = parse_id(&path.into_inner())?;
    let snippet = find_snippet(&state, &id).await?;
    if !visibility::can_modify(&Viewer::Authenticated(user_id), &snippet) {
        return Ok(redirect("/"));
    }

    let language = state
        .languages
        .find_by_id(snippet.language())
        .await
        .map_err(map_language_error)?
        .ok_or_else(|| Error::internal("snippet language missing from store"))?;
    let form = SnippetForm::from_snippet(&snippet, &language);
    let action = format!("/snippets/{id}/edit");
    render_snippet_form(&state, user_id, "Edit snippet", &action, &form, &[]).await
}

/// `POST /snippets/{id}/edit`: update a snippet the current user owns.
pub async fn edit_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    form: web::Form<SnippetForm>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirect("/login"));
    };
    let id = parse_id(&path.into_inner())?;
    let mut snippet = find_snippet(&state, &id).await?;
    if !visibility::can_modify(&Viewer::Authenticated(user_id), &snippet) {
        return Ok(redirect("/"));
    }
    let form = form.into_inner();

    let languages = known_languages(&state).await?;
    match form.validate(&languages) {
        Err(errors) => {
            let action = format!("/snippets/{id}/edit");
            render_snippet_form(&state, user_id, "Edit snippet", &action, &form, &errors).await
        }
        Ok((language_id, content)) => {
            snippet.apply_edit(language_id, content, form.is_public());
            state
                .snippets
                .update(&snippet)
                .await
                .map_err(map_snippet_error)?;
            info!(snippet_id = %id, owner = %user_id, "snippet updated");
            Ok(redirect("/"))
        }
    }
}

/// `GET /snippets/{id}/delete`: render the deletion confirmation.
pub async fn delete_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirect("/login"));
    };
    let id = parse_id(&path.into_inner())?;
    let snippet = find_snippet(&state, &id).await?;
    if !visibility::can_modify(&Viewer::Authenticated(user_id), &snippet) {
        return Ok(redirect("/"));
    }

    let view = resolve_view(&state, &snippet).await?;
    let nav = viewer_name(&state, &Viewer::Authenticated(user_id)).await?;
    Ok(html_page(pages::layout(
        "Delete snippet",
        nav.as_deref(),
        &pages::delete_body(&view),
    )))
}

/// `POST /snippets/{id}/delete`: delete when the requester owns the
/// snippet; otherwise silently redirect home without mutating.
pub async fn delete_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirect("/login"));
    };
    let id = parse_id(&path.into_inner())?;
    let snippet = find_snippet(&state, &id).await?;
    if !visibility::can_modify(&Viewer::Authenticated(user_id), &snippet) {
        return Ok(redirect("/"));
    }

    state
        .snippets
        .delete(&id)
        .await
        .map_err(map_snippet_error)?;
    info!(snippet_id = %id, owner = %user_id, "snippet deleted");
    Ok(redirect("/"))
}
