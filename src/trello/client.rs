//! reqwest-backed [`RemoteService`] for the Trello REST API.

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::{TrelloError, TrelloResult};
use super::models::{
    ActivityItem, Attachment, Board, Card, CardUpdate, Comment, Label, List, NewCard, Workspace,
};
use super::service::RemoteService;

/// Public Trello REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.trello.com/1";

/// Page size used by `get_recent_activity` when the caller gives none.
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

/// Name given to image attachments created without one.
pub const DEFAULT_ATTACHMENT_NAME: &str = "Image Attachment";

/// Query parameters collected for a single request.
pub(crate) type Params = Vec<(&'static str, String)>;

/// Trello API client authenticated with an API key and a member token.
pub struct TrelloClient {
    base_url: Url,
    api_key: String,
    token: String,
    client: Client,
}

#[derive(Deserialize)]
struct CardLabels {
    #[serde(default)]
    labels: Vec<Label>,
}

impl TrelloClient {
    /// Create a client against `base_url` (normally [`DEFAULT_API_URL`]).
    ///
    /// The process-wide rustls crypto provider must be installed first.
    pub fn new(base_url: Url, api_key: String, token: String) -> TrelloResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("trello-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| TrelloError::Http { source })?;

        Ok(Self {
            base_url,
            api_key,
            token,
            client,
        })
    }

    /// Root every endpoint path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    pub(crate) fn url(&self, segments: &[&str]) -> TrelloResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TrelloError::InvalidResponse {
                message: format!("API URL {} cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> TrelloResult<RequestBuilder> {
        let url = self.url(segments)?;
        debug!(%method, path = url.path(), "trello request");
        Ok(self
            .client
            .request(method, url)
            .query(&[("key", &self.api_key), ("token", &self.token)]))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        params: &Params,
    ) -> TrelloResult<T> {
        let response = self.request(method, segments)?.query(params).send().await?;
        Self::handle_response(response).await
    }

    /// Issue a request whose response body carries nothing the caller needs.
    async fn call_discard(
        &self,
        method: Method,
        segments: &[&str],
        params: &Params,
    ) -> TrelloResult<()> {
        let response = self.request(method, segments)?.query(params).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status.as_u16(), response).await)
        }
    }

    async fn api_error(status: u16, response: Response) -> TrelloError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        TrelloError::Api { status, message }
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized body on success. Any other status becomes
    /// `TrelloError::Api` carrying Trello's response text unchanged.
    pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> TrelloResult<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(status.as_u16(), response).await)
        }
    }
}

/// Append optional card fields in the shape Trello expects.
pub(crate) fn card_fields(
    params: &mut Params,
    name: Option<&str>,
    description: Option<&str>,
    due_date: Option<&str>,
    labels: Option<&[String]>,
) {
    if let Some(name) = name {
        params.push(("name", name.to_string()));
    }
    if let Some(desc) = description {
        params.push(("desc", desc.to_string()));
    }
    if let Some(due) = due_date {
        params.push(("due", due.to_string()));
    }
    if let Some(labels) = labels {
        params.push(("idLabels", labels.join(",")));
    }
}

impl RemoteService for TrelloClient {
    #[instrument(skip(self))]
    async fn list_boards(&self) -> TrelloResult<Vec<Board>> {
        self.call(Method::GET, &["members", "me", "boards"], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn get_board(&self, board_id: &str) -> TrelloResult<Board> {
        self.call(Method::GET, &["boards", board_id], &Params::new()).await
    }

    #[instrument(skip(self))]
    async fn list_workspaces(&self) -> TrelloResult<Vec<Workspace>> {
        self.call(Method::GET, &["members", "me", "organizations"], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn get_workspace(&self, workspace_id: &str) -> TrelloResult<Workspace> {
        self.call(Method::GET, &["organizations", workspace_id], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn list_boards_in_workspace(&self, workspace_id: &str) -> TrelloResult<Vec<Board>> {
        self.call(
            Method::GET,
            &["organizations", workspace_id, "boards"],
            &Params::new(),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_lists(&self, board_id: &str) -> TrelloResult<Vec<List>> {
        self.call(Method::GET, &["boards", board_id, "lists"], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn get_cards_by_list(&self, _board_id: &str, list_id: &str) -> TrelloResult<Vec<Card>> {
        self.call(Method::GET, &["lists", list_id, "cards"], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn get_recent_activity(
        &self,
        board_id: &str,
        limit: Option<u32>,
    ) -> TrelloResult<Vec<ActivityItem>> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        self.call(
            Method::GET,
            &["boards", board_id, "actions"],
            &vec![("limit", limit.to_string())],
        )
        .await
    }

    #[instrument(skip(self, card), fields(list_id = %card.list_id))]
    async fn add_card(&self, _board_id: &str, card: &NewCard) -> TrelloResult<Card> {
        let mut params: Params = vec![("idList", card.list_id.clone())];
        card_fields(
            &mut params,
            Some(&card.name),
            card.description.as_deref(),
            card.due_date.as_deref(),
            card.labels.as_deref(),
        );
        self.call(Method::POST, &["cards"], &params).await
    }

    #[instrument(skip(self, update), fields(card_id = %update.card_id))]
    async fn update_card(&self, _board_id: &str, update: &CardUpdate) -> TrelloResult<Card> {
        let mut params: Params = vec![];
        card_fields(
            &mut params,
            update.name.as_deref(),
            update.description.as_deref(),
            update.due_date.as_deref(),
            update.labels.as_deref(),
        );
        self.call(Method::PUT, &["cards", update.card_id.as_str()], &params)
            .await
    }

    #[instrument(skip(self))]
    async fn get_card(&self, card_id: &str) -> TrelloResult<Card> {
        self.call(Method::GET, &["cards", card_id], &Params::new()).await
    }

    #[instrument(skip(self, description))]
    async fn update_card_description(&self, card_id: &str, description: &str) -> TrelloResult<Card> {
        self.call(
            Method::PUT,
            &["cards", card_id],
            &vec![("desc", description.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn archive_card(&self, _board_id: &str, card_id: &str) -> TrelloResult<Card> {
        self.call(
            Method::PUT,
            &["cards", card_id],
            &vec![("closed", "true".to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn move_card(&self, board_id: &str, card_id: &str, list_id: &str) -> TrelloResult<Card> {
        self.call(
            Method::PUT,
            &["cards", card_id],
            &vec![
                ("idList", list_id.to_string()),
                ("idBoard", board_id.to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn add_list(&self, board_id: &str, name: &str) -> TrelloResult<List> {
        self.call(
            Method::POST,
            &["lists"],
            &vec![("name", name.to_string()), ("idBoard", board_id.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn archive_list(&self, _board_id: &str, list_id: &str) -> TrelloResult<List> {
        self.call(
            Method::PUT,
            &["lists", list_id, "closed"],
            &vec![("value", "true".to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_my_cards(&self) -> TrelloResult<Vec<Card>> {
        self.call(Method::GET, &["members", "me", "cards"], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn attach_image(
        &self,
        _board_id: &str,
        card_id: &str,
        image_url: &str,
        name: Option<&str>,
    ) -> TrelloResult<Attachment> {
        self.call(
            Method::POST,
            &["cards", card_id, "attachments"],
            &vec![
                ("url", image_url.to_string()),
                ("name", name.unwrap_or(DEFAULT_ATTACHMENT_NAME).to_string()),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_board_labels(&self, board_id: &str) -> TrelloResult<Vec<Label>> {
        self.call(Method::GET, &["boards", board_id, "labels"], &Params::new())
            .await
    }

    #[instrument(skip(self))]
    async fn get_card_labels(&self, card_id: &str) -> TrelloResult<Vec<Label>> {
        let card: CardLabels = self
            .call(
                Method::GET,
                &["cards", card_id],
                &vec![("fields", "labels".to_string())],
            )
            .await?;
        Ok(card.labels)
    }

    #[instrument(skip(self))]
    async fn add_labels_to_card(&self, card_id: &str, label_ids: &str) -> TrelloResult<Card> {
        // Trello answers with the resulting id list, so fetch the card afterwards.
        self.call_discard(
            Method::POST,
            &["cards", card_id, "idLabels"],
            &vec![("value", label_ids.to_string())],
        )
        .await?;
        self.get_card(card_id).await
    }

    #[instrument(skip(self))]
    async fn get_card_comments(&self, card_id: &str) -> TrelloResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .call(
                Method::GET,
                &["cards", card_id, "actions"],
                &vec![("filter", "commentCard".to_string())],
            )
            .await?;
        // Trello lists actions newest first.
        comments.reverse();
        Ok(comments)
    }

    #[instrument(skip(self, text))]
    async fn add_comment(&self, card_id: &str, text: &str) -> TrelloResult<Comment> {
        self.call(
            Method::POST,
            &["cards", card_id, "actions", "comments"],
            &vec![("text", text.to_string())],
        )
        .await
    }

    #[instrument(skip(self, text))]
    async fn edit_comment(&self, card_id: &str, comment_id: &str, text: &str) -> TrelloResult<Comment> {
        self.call(
            Method::PUT,
            &["cards", card_id, "actions", comment_id, "comments"],
            &vec![("text", text.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, card_id: &str, comment_id: &str) -> TrelloResult<()> {
        self.call_discard(
            Method::DELETE,
            &["cards", card_id, "actions", comment_id, "comments"],
            &Params::new(),
        )
        .await
    }
}
