//! The registered-users modal.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use techstore_data::{FetchClient, FetchError};
use techstore_observability::StructuredLogger;

use crate::document::Document;
use crate::html::html_escape;

/// Shown in place of a join date that cannot be read.
pub const INVALID_DATE: &str = "Invalid Date";

/// A registered user as listed by the users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// What [`UserListViewer::show`] rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserListOutcome {
    /// One row per user.
    Loaded(usize),
    /// The endpoint returned no users.
    Empty,
    /// The request or its body failed.
    Failed,
}

/// Format a join timestamp as `M/D/YYYY`.
///
/// Accepts RFC 3339, a naive ISO-8601 date-time with `T` or a space as the
/// separator, or a bare `YYYY-MM-DD` date. Offset-bearing timestamps keep
/// the date as written.
pub fn format_join_date(created_at: &str) -> String {
    let raw = created_at.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// Render the modal rows for a non-empty list.
pub fn render_user_rows(users: &[User]) -> String {
    users.iter().map(render_user_row).collect()
}

fn render_user_row(user: &User) -> String {
    let joined = user
        .created_at
        .as_deref()
        .map(format_join_date)
        .unwrap_or_else(|| INVALID_DATE.to_string());

    format!(
        r#"
        <div class="user-item">
            <div class="row align-items-center">
                <div class="col-md-4">
                    <strong>{}</strong>
                </div>
                <div class="col-md-4">
                    <span class="text-muted">{}</span>
                </div>
                <div class="col-md-4 text-end">
                    <small class="text-muted">Joined: {}</small>
                </div>
            </div>
        </div>
    "#,
        html_escape(&user.name),
        html_escape(&user.email),
        joined
    )
}

/// Rendered when the endpoint returns an empty list.
pub fn render_empty() -> String {
    r#"<p class="text-muted text-center">No users found.</p>"#.to_string()
}

/// Rendered when the request or its body fails.
pub fn render_failure() -> String {
    r#"<div class="alert alert-danger">Failed to load users. Please try again.</div>"#
        .to_string()
}

/// Opens the modal and fills it from one `GET` of the users endpoint.
///
/// No retry, pagination or caching.
pub struct UserListViewer {
    document: Rc<dyn Document>,
    client: FetchClient,
    endpoint: String,
    modal_id: String,
    content_id: String,
    logger: StructuredLogger,
}

impl UserListViewer {
    pub fn new(
        document: Rc<dyn Document>,
        client: FetchClient,
        endpoint: impl Into<String>,
        modal_id: impl Into<String>,
        content_id: impl Into<String>,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            document,
            client,
            endpoint: endpoint.into(),
            modal_id: modal_id.into(),
            content_id: content_id.into(),
            logger,
        }
    }

    pub async fn show(&self) -> UserListOutcome {
        self.document.show_modal(&self.modal_id);

        let (html, outcome) = match self.fetch_users().await {
            Ok(users) if users.is_empty() => (render_empty(), UserListOutcome::Empty),
            Ok(users) => (render_user_rows(&users), UserListOutcome::Loaded(users.len())),
            Err(e) => {
                self.logger
                    .error("Error loading users")
                    .field("endpoint", self.endpoint.as_str())
                    .field("error", e.to_string())
                    .emit();
                (render_failure(), UserListOutcome::Failed)
            }
        };

        self.document.set_inner_html(&self.content_id, &html);
        outcome
    }

    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.client
            .get(self.endpoint.as_str())
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
    }
}

impl fmt::Debug for UserListViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserListViewer")
            .field("endpoint", &self.endpoint)
            .field("modal_id", &self.modal_id)
            .field("content_id", &self.content_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{MemoryDocument, MemoryElement};
    use futures::executor::block_on;
    use techstore_data::MockTransport;
    use techstore_observability::MemorySink;

    fn viewer(transport: MockTransport) -> (Rc<MemoryDocument>, Rc<MemorySink>, UserListViewer) {
        let doc = Rc::new(
            MemoryDocument::new()
                .with_element("userListModal", MemoryElement::new("div"))
                .with_element("userListContent", MemoryElement::new("div")),
        );
        let sink = Rc::new(MemorySink::new());
        let viewer = UserListViewer::new(
            doc.clone(),
            FetchClient::new(transport),
            "/api/users",
            "userListModal",
            "userListContent",
            StructuredLogger::new("users").with_sink(sink.clone()),
        );
        (doc, sink, viewer)
    }

    fn content(doc: &MemoryDocument) -> String {
        doc.element("userListContent").unwrap().inner_html
    }

    #[test]
    fn test_join_date_formats() {
        assert_eq!(format_join_date("2024-01-15T10:30:00.123456"), "1/15/2024");
        assert_eq!(format_join_date("2024-01-15 10:30:00"), "1/15/2024");
        assert_eq!(format_join_date("2023-12-03T23:59:59Z"), "12/3/2023");
        assert_eq!(format_join_date("2023-12-03T23:59:59+09:00"), "12/3/2023");
        assert_eq!(format_join_date("2024-02-29"), "2/29/2024");
        assert_eq!(format_join_date("yesterday"), INVALID_DATE);
        assert_eq!(format_join_date(""), INVALID_DATE);
    }

    #[test]
    fn test_rows_escape_user_fields() {
        let users = vec![User {
            name: "<script>alert(1)</script>".to_string(),
            email: "a&b@c.co".to_string(),
            created_at: None,
        }];

        let html = render_user_rows(&users);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b@c.co"));
        assert!(html.contains("Joined: Invalid Date"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_loaded_list_renders_one_row_per_user() {
        let (doc, _sink, viewer) = viewer(MockTransport::new().respond_with(
            200,
            r#"[{"name":"Ada","email":"ada@example.com","created_at":"2024-01-15T10:30:00"},
                {"name":"Linus","email":"linus@example.com","created_at":"2023-06-01T00:00:00"}]"#,
        ));

        let outcome = block_on(viewer.show());

        assert_eq!(outcome, UserListOutcome::Loaded(2));
        let html = content(&doc);
        assert_eq!(html.matches(r#"class="user-item""#).count(), 2);
        assert!(html.contains("<strong>Ada</strong>"));
        assert!(html.contains("Joined: 6/1/2023"));
        assert_eq!(doc.opened_modals(), vec!["userListModal"]);
    }

    #[test]
    fn test_server_error_renders_failure() {
        let (doc, sink, viewer) = viewer(MockTransport::new().respond_with(500, "boom"));

        assert_eq!(block_on(viewer.show()), UserListOutcome::Failed);

        let html = content(&doc);
        assert_eq!(html, render_failure());
        assert!(!html.contains("user-item"));
        assert_eq!(sink.messages(), vec!["Error loading users".to_string()]);
    }

    #[test]
    fn test_empty_list_renders_empty_state() {
        let (doc, _sink, viewer) = viewer(MockTransport::new().respond_with(200, "[]"));

        assert_eq!(block_on(viewer.show()), UserListOutcome::Empty);

        let html = content(&doc);
        assert_eq!(html, render_empty());
        assert_eq!(html.matches("user-item").count(), 0);
    }

    #[test]
    fn test_unparseable_body_is_failure() {
        let (doc, _sink, viewer) =
            viewer(MockTransport::new().respond_with(200, r#"{"users": []}"#));

        assert_eq!(block_on(viewer.show()), UserListOutcome::Failed);
        assert_eq!(content(&doc), render_failure());
    }

    #[test]
    fn test_transport_failure_is_failure() {
        let (doc, _sink, viewer) = viewer(
            MockTransport::new().fail_with(FetchError::RequestError("offline".to_string())),
        );

        assert_eq!(block_on(viewer.show()), UserListOutcome::Failed);
        assert_eq!(content(&doc), render_failure());
    }

    #[test]
    fn test_modal_opens_before_request() {
        let (doc, _sink, viewer) = viewer(MockTransport::new());

        block_on(viewer.show());
        assert_eq!(doc.opened_modals().len(), 1);
    }
}
