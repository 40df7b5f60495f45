//! The remote-service seam.
//!
//! The dispatcher only ever talks to Trello through this trait. Production
//! uses [`TrelloClient`](super::TrelloClient); tests use an in-memory fake.

use std::future::Future;

use super::error::TrelloResult;
use super::models::{
    ActivityItem, Attachment, Board, Card, CardUpdate, Comment, Label, List, NewCard, Workspace,
};

/// Network operations against a Trello account.
///
/// Board-scoped methods receive the already-resolved board id.
/// `get_card_comments` returns comments oldest first.
pub trait RemoteService: Send + Sync {
    fn list_boards(&self) -> impl Future<Output = TrelloResult<Vec<Board>>> + Send;

    fn get_board(&self, board_id: &str) -> impl Future<Output = TrelloResult<Board>> + Send;

    fn list_workspaces(&self) -> impl Future<Output = TrelloResult<Vec<Workspace>>> + Send;

    fn get_workspace(
        &self,
        workspace_id: &str,
    ) -> impl Future<Output = TrelloResult<Workspace>> + Send;

    fn list_boards_in_workspace(
        &self,
        workspace_id: &str,
    ) -> impl Future<Output = TrelloResult<Vec<Board>>> + Send;

    fn get_lists(&self, board_id: &str) -> impl Future<Output = TrelloResult<Vec<List>>> + Send;

    fn get_cards_by_list(
        &self,
        board_id: &str,
        list_id: &str,
    ) -> impl Future<Output = TrelloResult<Vec<Card>>> + Send;

    /// `limit` of `None` lets the service pick its default page size.
    fn get_recent_activity(
        &self,
        board_id: &str,
        limit: Option<u32>,
    ) -> impl Future<Output = TrelloResult<Vec<ActivityItem>>> + Send;

    fn add_card(
        &self,
        board_id: &str,
        card: &NewCard,
    ) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn update_card(
        &self,
        board_id: &str,
        update: &CardUpdate,
    ) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn get_card(&self, card_id: &str) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn update_card_description(
        &self,
        card_id: &str,
        description: &str,
    ) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn archive_card(
        &self,
        board_id: &str,
        card_id: &str,
    ) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn move_card(
        &self,
        board_id: &str,
        card_id: &str,
        list_id: &str,
    ) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn add_list(
        &self,
        board_id: &str,
        name: &str,
    ) -> impl Future<Output = TrelloResult<List>> + Send;

    fn archive_list(
        &self,
        board_id: &str,
        list_id: &str,
    ) -> impl Future<Output = TrelloResult<List>> + Send;

    fn get_my_cards(&self) -> impl Future<Output = TrelloResult<Vec<Card>>> + Send;

    fn attach_image(
        &self,
        board_id: &str,
        card_id: &str,
        image_url: &str,
        name: Option<&str>,
    ) -> impl Future<Output = TrelloResult<Attachment>> + Send;

    fn get_board_labels(
        &self,
        board_id: &str,
    ) -> impl Future<Output = TrelloResult<Vec<Label>>> + Send;

    fn get_card_labels(&self, card_id: &str)
    -> impl Future<Output = TrelloResult<Vec<Label>>> + Send;

    /// `label_ids` is a comma-joined list, the form Trello's `idLabels` takes.
    fn add_labels_to_card(
        &self,
        card_id: &str,
        label_ids: &str,
    ) -> impl Future<Output = TrelloResult<Card>> + Send;

    fn get_card_comments(
        &self,
        card_id: &str,
    ) -> impl Future<Output = TrelloResult<Vec<Comment>>> + Send;

    fn add_comment(
        &self,
        card_id: &str,
        text: &str,
    ) -> impl Future<Output = TrelloResult<Comment>> + Send;

    fn edit_comment(
        &self,
        card_id: &str,
        comment_id: &str,
        text: &str,
    ) -> impl Future<Output = TrelloResult<Comment>> + Send;

    fn delete_comment(
        &self,
        card_id: &str,
        comment_id: &str,
    ) -> impl Future<Output = TrelloResult<()>> + Send;
}
