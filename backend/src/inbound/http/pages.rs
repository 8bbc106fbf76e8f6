//! Server-rendered HTML pages.
//!
//! Hand-assembled markup kept deliberately small: a shared layout, listing
//! and detail fragments, the snippet/login forms, and the error page. All
//! user-supplied text is escaped on the way in; the only trusted fragment is
//! the highlighter output, which escapes its own content.

use std::fmt::Write as _;

use actix_web::http::StatusCode;

use crate::domain::Language;
use crate::html::escape;

use super::forms::{FieldError, SnippetForm};
use super::views::SnippetView;

const STYLE: &str = "\
body{font-family:sans-serif;max-width:52rem;margin:0 auto;padding:0 1rem}\
nav{display:flex;justify-content:space-between;padding:0.75rem 0;border-bottom:1px solid #ddd}\
ul.snippets{list-style:none;padding:0}\
ul.snippets li{padding:0.35rem 0}\
ul.errors{color:#b00020}\
span.private{color:#888;font-style:italic}\
form label{display:block;margin-top:0.75rem}\
textarea{width:100%;min-height:12rem;font-family:monospace}\
.highlight-monokai pre{background:#272822;color:#f8f8f2;padding:1rem;overflow-x:auto;border-radius:4px}\
";

/// Wrap a body fragment in the shared page chrome.
pub(crate) fn layout(title: &str, viewer_name: Option<&str>, body: &str) -> String {
    let nav_right = match viewer_name {
        Some(name) => {
            let name = escape(name);
            format!(
                "<a href=\"/users/{name}\">{name}</a> · <a href=\"/snippets/add\">add snippet</a> · <a href=\"/logout\">log out</a>"
            )
        }
        None => "<a href=\"/login\">log in</a>".to_owned(),
    };

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} — snipbin</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">snipbin</a><span>{nav_right}</span></nav>\n\
         <main>\n{body}\n</main>\n</body>\n</html>\n",
        escape(title)
    )
}

fn listing_item(view: &SnippetView) -> String {
    let mut item = String::new();
    let _ = write!(
        item,
        "<li><a href=\"/snippets/{}\">{} snippet</a> by <a href=\"/users/{}\">{}</a> on {}",
        view.id,
        escape(&view.language),
        escape(&view.owner),
        escape(&view.owner),
        view.created_at.format("%Y-%m-%d %H:%M"),
    );
    if !view.public {
        item.push_str(" <span class=\"private\">(private)</span>");
    }
    item.push_str("</li>");
    item
}

/// Listing fragment shared by the home, user, and language pages.
pub(crate) fn listing_body(heading: &str, views: &[SnippetView]) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(heading));
    if views.is_empty() {
        body.push_str("<p>No snippets here yet.</p>");
        return body;
    }

    body.push_str("<ul class=\"snippets\">\n");
    for view in views {
        body.push_str(&listing_item(view));
        body.push('\n');
    }
    body.push_str("</ul>");
    body
}

/// Detail fragment: metadata plus the highlighted code block.
///
/// `code_html` comes from the highlighter and is embedded as-is.
pub(crate) fn snippet_body(view: &SnippetView, code_html: &str, can_modify: bool) -> String {
    let mut body = format!(
        "<h1>{} snippet</h1>\n<p>by <a href=\"/users/{}\">{}</a> on {}",
        escape(&view.language),
        escape(&view.owner),
        escape(&view.owner),
        view.created_at.format("%Y-%m-%d %H:%M"),
    );
    if !view.public {
        body.push_str(" <span class=\"private\">(private)</span>");
    }
    body.push_str("</p>\n");
    body.push_str(code_html);
    if can_modify {
        let _ = write!(
            body,
            "\n<p><a href=\"/snippets/{id}/edit\">edit</a> · <a href=\"/snippets/{id}/delete\">delete</a></p>",
            id = view.id,
        );
    }
    body
}

fn language_options(languages: &[Language], selected_slug: &str) -> String {
    let mut options = String::new();
    for language in languages {
        let slug = escape(language.slug().as_ref());
        let selected = if language.slug().as_ref() == selected_slug {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            "<option value=\"{slug}\"{selected}>{}</option>",
            escape(language.name())
        );
    }
    options
}

/// Add/edit form fragment, re-rendered with field errors on invalid input.
pub(crate) fn form_body(
    heading: &str,
    action_path: &str,
    languages: &[Language],
    form: &SnippetForm,
    errors: &[FieldError],
) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(heading));

    if !errors.is_empty() {
        body.push_str("<ul class=\"errors\">\n");
        for error in errors {
            let _ = writeln!(body, "<li>{}: {}</li>", error.field, escape(&error.message));
        }
        body.push_str("</ul>\n");
    }

    let checked = if form.is_public() { " checked" } else { "" };
    let _ = write!(
        body,
        "<form method=\"post\" action=\"{}\">\n\
         <label>Language\n<select name=\"language\">{}</select></label>\n\
         <label>Content\n<textarea name=\"content\">{}</textarea></label>\n\
         <label><input type=\"checkbox\" name=\"public\"{checked}> Public</label>\n\
         <p><button type=\"submit\">Save</button></p>\n\
         </form>",
        escape(action_path),
        language_options(languages, &form.language),
        escape(&form.content),
    );
    body
}

/// Delete confirmation fragment.
pub(crate) fn delete_body(view: &SnippetView) -> String {
    format!(
        "<h1>Delete snippet</h1>\n\
         <p>Delete this {} snippet? This cannot be undone.</p>\n\
         <form method=\"post\" action=\"/snippets/{id}/delete\">\n\
         <p><button type=\"submit\">Delete</button> <a href=\"/snippets/{id}\">cancel</a></p>\n\
         </form>",
        escape(&view.language),
        id = view.id,
    )
}

/// Login form fragment, re-rendered with a message on failure.
pub(crate) fn login_body(username: &str, error: Option<&str>) -> String {
    let mut body = "<h1>Log in</h1>\n".to_owned();
    if let Some(message) = error {
        let _ = writeln!(body, "<ul class=\"errors\"><li>{}</li></ul>", escape(message));
    }
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/login\">\n\
         <label>Username\n<input name=\"username\" value=\"{}\"></label>\n\
         <label>Password\n<input name=\"password\" type=\"password\"></label>\n\
         <p><button type=\"submit\">Log in</button></p>\n\
         </form>",
        escape(username),
    );
    body
}

/// Full error page for the given status.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">back to all snippets</a></p>",
        escape(heading),
        escape(message)
    );
    layout(heading, None, &body)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{LanguageId, Slug, SnippetId};
    use chrono::Utc;

    fn view(public: bool) -> SnippetView {
        SnippetView {
            id: SnippetId::random(),
            owner: "ada".to_owned(),
            language: "Rust".to_owned(),
            public,
            created_at: Utc::now(),
            content: "fn main() {}".to_owned(),
        }
    }

    fn rust() -> Language {
        Language::new(
            LanguageId::random(),
            "Rust",
            Slug::new("rust").expect("valid slug"),
        )
        .expect("valid language")
    }

    #[test]
    fn layout_shows_login_link_for_anonymous_viewers() {
        let page = layout("All snippets", None, "<p>hi</p>");
        assert!(page.contains("href=\"/login\""));
        assert!(!page.contains("log out"));
    }

    #[test]
    fn layout_shows_account_links_for_signed_in_viewers() {
        let page = layout("All snippets", Some("ada"), "<p>hi</p>");
        assert!(page.contains("href=\"/users/ada\""));
        assert!(page.contains("href=\"/logout\""));
    }

    #[test]
    fn listing_marks_private_snippets() {
        let body = listing_body("All snippets", &[view(false)]);
        assert!(body.contains("(private)"));
    }

    #[test]
    fn empty_listing_has_a_placeholder() {
        let body = listing_body("All snippets", &[]);
        assert!(body.contains("No snippets here yet."));
    }

    #[test]
    fn form_selects_the_submitted_language_and_shows_errors() {
        let form = SnippetForm {
            language: "rust".to_owned(),
            content: "fn main() {}".to_owned(),
            public: None,
        };
        let errors = [FieldError {
            field: "content",
            message: "snippet content must not be empty".to_owned(),
        }];

        let body = form_body("Add snippet", "/snippets/add", &[rust()], &form, &errors);

        assert!(body.contains("<option value=\"rust\" selected>"));
        assert!(body.contains("content: snippet content must not be empty"));
    }

    #[test]
    fn form_escapes_submitted_content() {
        let form = SnippetForm {
            language: String::new(),
            content: "</textarea><script>".to_owned(),
            public: None,
        };

        let body = form_body("Add snippet", "/snippets/add", &[rust()], &form, &[]);

        assert!(!body.contains("</textarea><script>"));
        assert!(body.contains("&lt;/textarea&gt;&lt;script&gt;"));
    }

    #[test]
    fn snippet_page_links_edit_only_for_the_owner() {
        let owned = snippet_body(&view(true), "<div>code</div>", true);
        assert!(owned.contains("/edit"));

        let foreign = snippet_body(&view(true), "<div>code</div>", false);
        assert!(!foreign.contains("/edit"));
    }

    #[test]
    fn login_page_shows_the_failure_message() {
        let body = login_body("ada", Some("invalid username or password"));
        assert!(body.contains("invalid username or password"));
        assert!(body.contains("value=\"ada\""));
    }

    #[test]
    fn error_page_names_the_status() {
        let page = error_page(StatusCode::NOT_FOUND, "no such snippet");
        assert!(page.contains("Not Found"));
        assert!(page.contains("no such snippet"));
    }
}
