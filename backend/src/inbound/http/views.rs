//! Presentation views resolved from domain entities.
//!
//! Listings and detail pages show owner usernames and language names, which
//! live behind their own ports; this module joins them onto snippets with
//! memoised lookups so handlers stay thin.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Error, LanguageId, Snippet, SnippetId, UserId, Viewer};

use super::error::{map_language_error, map_user_error};
use super::state::HttpState;
use super::ApiResult;

/// A snippet joined with the names a page needs to render it.
#[derive(Debug, Clone)]
pub(crate) struct SnippetView {
    pub id: SnippetId,
    pub owner: String,
    pub language: String,
    pub public: bool,
    pub created_at: DateTime<Utc>,
    pub content: String,
}

/// Resolve a single snippet into its view.
pub(crate) async fn resolve_view(state: &HttpState, snippet: &Snippet) -> ApiResult<SnippetView> {
    let mut views = resolve_views(state, std::slice::from_ref(snippet)).await?;
    views
        .pop()
        .ok_or_else(|| Error::internal("snippet view resolution produced no entry"))
}

/// Resolve snippets into views, preserving order.
pub(crate) async fn resolve_views(
    state: &HttpState,
    snippets: &[Snippet],
) -> ApiResult<Vec<SnippetView>> {
    let mut owners: HashMap<UserId, String> = HashMap::new();
    let mut languages: HashMap<LanguageId, String> = HashMap::new();
    let mut views = Vec::with_capacity(snippets.len());

    for snippet in snippets {
        if !owners.contains_key(snippet.owner()) {
            let user = state
                .users
                .find_by_id(snippet.owner())
                .await
                .map_err(map_user_error)?
                .ok_or_else(|| Error::internal("snippet owner missing from store"))?;
            owners.insert(*snippet.owner(), user.username().to_string());
        }
        if !languages.contains_key(snippet.language()) {
            let language = state
                .languages
                .find_by_id(snippet.language())
                .await
                .map_err(map_language_error)?
                .ok_or_else(|| Error::internal("snippet language missing from store"))?;
            languages.insert(*snippet.language(), language.name().to_owned());
        }

        let owner = owners
            .get(snippet.owner())
            .cloned()
            .unwrap_or_default();
        let language = languages
            .get(snippet.language())
            .cloned()
            .unwrap_or_default();
        views.push(SnippetView {
            id: *snippet.id(),
            owner,
            language,
            public: snippet.is_public(),
            created_at: snippet.created_at(),
            content: snippet.content().as_ref().to_owned(),
        });
    }

    Ok(views)
}

/// Username shown in the navigation for the current viewer, if any.
pub(crate) async fn viewer_name(state: &HttpState, viewer: &Viewer) -> ApiResult<Option<String>> {
    match viewer.user_id() {
        None => Ok(None),
        Some(id) => {
            let user = state.users.find_by_id(id).await.map_err(map_user_error)?;
            Ok(user.map(|u| u.username().to_string()))
        }
    }
}
