//! Visibility policy and ownership guard.
//!
//! The rule set determining which snippets a given viewer may see, and who
//! may mutate them. Handlers pass the viewer in explicitly as per-request
//! context; nothing here reads ambient state.

use std::collections::HashSet;

use super::snippet::Snippet;
use super::user::UserId;

/// The identity a request is made under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// No session established.
    Anonymous,
    /// A logged-in user.
    Authenticated(UserId),
}

impl Viewer {
    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }

    /// Whether this viewer is the given user.
    pub fn is(&self, user: &UserId) -> bool {
        self.user_id() == Some(user)
    }
}

/// Whether `viewer` may see `snippet`.
///
/// Public snippets are visible to everyone; private snippets only to their
/// owner. Every listing rule below reduces to this predicate.
pub fn is_visible_to(viewer: &Viewer, snippet: &Snippet) -> bool {
    snippet.is_public() || viewer.is(snippet.owner())
}

/// Order-preserving filter of `candidates` down to the subset `viewer` may
/// see.
///
/// Covers the owner listing (the owner passes the predicate for every own
/// snippet) and the language listing (public snippets plus the viewer's own
/// for that language).
pub fn visible_snippets(viewer: &Viewer, candidates: Vec<Snippet>) -> Vec<Snippet> {
    candidates
        .into_iter()
        .filter(|snippet| is_visible_to(viewer, snippet))
        .collect()
}

/// The home view: the viewer's own snippets (public or private) ordered
/// first, followed by every other public snippet, de-duplicated by snippet
/// identity. Relative order within each group follows `candidates`.
pub fn home_snippets(viewer: &Viewer, candidates: Vec<Snippet>) -> Vec<Snippet> {
    let mut own = Vec::new();
    let mut rest = Vec::new();
    let mut seen = HashSet::new();

    for snippet in candidates {
        if !seen.insert(*snippet.id()) {
            continue;
        }
        if viewer.is(snippet.owner()) {
            own.push(snippet);
        } else if snippet.is_public() {
            rest.push(snippet);
        }
    }

    own.extend(rest);
    own
}

/// Ownership guard applied by every mutating handler.
///
/// True iff `viewer` is authenticated and owns `snippet`.
pub fn can_modify(viewer: &Viewer, snippet: &Snippet) -> bool {
    viewer.is(snippet.owner())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the visibility rules.
    use super::*;
    use crate::domain::{LanguageId, SnippetContent};
    use rstest::rstest;

    fn snippet(owner: UserId, public: bool) -> Snippet {
        Snippet::create(
            owner,
            LanguageId::random(),
            SnippetContent::new("fn main() {}").expect("valid content"),
            public,
        )
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn anonymous_viewers_never_see_private_snippets(#[case] public: bool) {
        let owner = UserId::random();
        let candidates = vec![snippet(owner, public)];

        let visible = visible_snippets(&Viewer::Anonymous, candidates);

        assert_eq!(visible.len(), usize::from(public));
        assert!(visible.iter().all(Snippet::is_public));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn owners_always_see_their_own_snippets(#[case] public: bool) {
        let owner = UserId::random();
        let own = snippet(owner, public);
        let id = *own.id();

        let visible = visible_snippets(&Viewer::Authenticated(owner), vec![own]);

        assert!(visible.iter().any(|s| s.id() == &id));
    }

    #[test]
    fn other_users_see_only_public_snippets() {
        let owner = UserId::random();
        let other = UserId::random();
        let public = snippet(owner, true);
        let public_id = *public.id();
        let candidates = vec![public, snippet(owner, false)];

        let visible = visible_snippets(&Viewer::Authenticated(other), candidates);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().map(Snippet::id), Some(&public_id));
    }

    #[test]
    fn language_listing_includes_viewers_own_private_snippets() {
        let viewer = UserId::random();
        let other = UserId::random();
        let own_private = snippet(viewer, false);
        let own_id = *own_private.id();
        let candidates = vec![snippet(other, true), own_private, snippet(other, false)];

        let visible = visible_snippets(&Viewer::Authenticated(viewer), candidates);

        assert_eq!(visible.len(), 2);
        assert!(visible.iter().any(|s| s.id() == &own_id));
    }

    #[test]
    fn home_view_unions_own_and_public_without_duplicates() {
        let viewer = UserId::random();
        let other = UserId::random();

        // N = 2 private own, M = 3 public from another user.
        let own: Vec<Snippet> = (0..2).map(|_| snippet(viewer, false)).collect();
        let public: Vec<Snippet> = (0..3).map(|_| snippet(other, true)).collect();

        let mut candidates: Vec<Snippet> = public.clone();
        candidates.extend(own.clone());
        // A stray duplicate in the candidate set must not produce a
        // duplicate entry.
        if let Some(dup) = public.first() {
            candidates.push(dup.clone());
        }

        let home = home_snippets(&Viewer::Authenticated(viewer), candidates);

        assert_eq!(home.len(), own.len() + public.len());
        let ids: HashSet<_> = home.iter().map(Snippet::id).collect();
        assert_eq!(ids.len(), home.len());
    }

    #[test]
    fn home_view_orders_own_snippets_first() {
        let viewer = UserId::random();
        let other = UserId::random();
        let candidates = vec![
            snippet(other, true),
            snippet(viewer, false),
            snippet(other, true),
            snippet(viewer, true),
        ];

        let home = home_snippets(&Viewer::Authenticated(viewer), candidates);

        let own_count = home
            .iter()
            .take_while(|s| s.is_owned_by(&viewer))
            .count();
        assert_eq!(own_count, 2);
        assert!(home.iter().skip(own_count).all(|s| !s.is_owned_by(&viewer)));
    }

    #[test]
    fn home_view_for_anonymous_is_public_only() {
        let owner = UserId::random();
        let candidates = vec![snippet(owner, true), snippet(owner, false)];

        let home = home_snippets(&Viewer::Anonymous, candidates);

        assert_eq!(home.len(), 1);
        assert!(home.iter().all(Snippet::is_public));
    }

    #[rstest]
    #[case(Viewer::Anonymous, false)]
    fn anonymous_viewers_cannot_modify(#[case] viewer: Viewer, #[case] expected: bool) {
        let target = snippet(UserId::random(), true);
        assert_eq!(can_modify(&viewer, &target), expected);
    }

    #[test]
    fn only_the_owner_can_modify() {
        let owner = UserId::random();
        let target = snippet(owner, false);

        assert!(can_modify(&Viewer::Authenticated(owner), &target));
        assert!(!can_modify(
            &Viewer::Authenticated(UserId::random()),
            &target
        ));
    }
}
