//! Tool-call dispatch.
//!
//! `received → validated → board resolved (board-scoped tools only) →
//! remote call → responded | failed`. Every failure along the way ends up
//! in the same error envelope; nothing is retried.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::context::{ActiveContextStore, ContextStorage};
use crate::trello::{Label, RemoteService};

use super::catalog;
use super::error::{ToolError, ToolResult};
use super::render::{CommentView, LabelView, append_description, pretty};
use super::validate::ValidatedParams;

/// Routes a named call to its validator, resolves the board and calls Trello.
///
/// Generic over `R: RemoteService` and `S: ContextStorage` so tests can plug
/// in fakes without dynamic dispatch.
pub struct Dispatcher<R: RemoteService, S: ContextStorage> {
    remote: Arc<R>,
    context: Arc<ActiveContextStore<S>>,
}

impl<R: RemoteService, S: ContextStorage> Dispatcher<R, S> {
    pub fn new(remote: Arc<R>, context: Arc<ActiveContextStore<S>>) -> Self {
        Self { remote, context }
    }

    pub fn context(&self) -> &ActiveContextStore<S> {
        &self.context
    }

    /// Handle one tool call and render the outcome.
    ///
    /// Always returns an envelope: `isError` is set for every failure.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(&self, name: &str, arguments: Option<&JsonObject>) -> CallToolResult {
        match self.try_dispatch(name, arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!(tool = %name, error = %e, "tool call failed");
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    async fn try_dispatch(&self, name: &str, arguments: Option<&JsonObject>) -> ToolResult<String> {
        let operation = catalog::lookup(name).ok_or_else(|| ToolError::MethodNotFound {
            name: name.to_string(),
        })?;
        let args = arguments.ok_or_else(|| ToolError::invalid("Missing arguments"))?;
        let params = (operation.validate)(args)?;
        debug!(?params, "validated");
        self.execute(params).await
    }

    async fn board(&self, explicit: Option<&str>) -> ToolResult<String> {
        let board_id = self.context.resolve_board_id(explicit).await?;
        debug!(%board_id, "board resolved");
        Ok(board_id)
    }

    async fn execute(&self, params: ValidatedParams) -> ToolResult<String> {
        let remote = self.remote.as_ref();

        match params {
            ValidatedParams::GetLists { board_id } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.get_lists(&board_id).await?)
            }
            ValidatedParams::GetCardsByList { board_id, list_id } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.get_cards_by_list(&board_id, &list_id).await?)
            }
            ValidatedParams::GetRecentActivity { board_id, limit } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.get_recent_activity(&board_id, limit).await?)
            }
            ValidatedParams::AddCard { board_id, card } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.add_card(&board_id, &card).await?)
            }
            ValidatedParams::UpdateCard { board_id, update } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.update_card(&board_id, &update).await?)
            }
            ValidatedParams::UpdateCardDescription {
                card_id,
                description,
            } => {
                let card = remote.update_card_description(&card_id, &description).await?;
                pretty(&json!({
                    "success": true,
                    "message": format!("Description for card {card_id} updated successfully."),
                    "card": card,
                }))
            }
            ValidatedParams::AppendToCardDescription { card_id, text } => {
                let current = remote.get_card(&card_id).await?;
                let description = append_description(&current.desc, &text);
                let card = remote.update_card_description(&card_id, &description).await?;
                pretty(&json!({
                    "success": true,
                    "message": format!("Text appended to card {card_id} successfully."),
                    "card": card,
                }))
            }
            ValidatedParams::ArchiveCard { board_id, card_id } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.archive_card(&board_id, &card_id).await?)
            }
            ValidatedParams::MoveCard {
                board_id,
                card_id,
                list_id,
            } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.move_card(&board_id, &card_id, &list_id).await?)
            }
            ValidatedParams::AddList { board_id, name } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.add_list(&board_id, &name).await?)
            }
            ValidatedParams::ArchiveList { board_id, list_id } => {
                let board_id = self.board(board_id.as_deref()).await?;
                pretty(&remote.archive_list(&board_id, &list_id).await?)
            }
            ValidatedParams::AttachImage {
                board_id,
                card_id,
                image_url,
                name,
            } => {
                let board_id = self.board(board_id.as_deref()).await?;
                let attachment = remote
                    .attach_image(&board_id, &card_id, &image_url, name.as_deref())
                    .await?;
                pretty(&attachment)
            }
            ValidatedParams::GetBoardLabels => {
                let board_id = self.board(None).await?;
                let labels = remote.get_board_labels(&board_id).await?;
                render_labels(labels)
            }
            ValidatedParams::GetCardLabels { card_id } => {
                render_labels(remote.get_card_labels(&card_id).await?)
            }
            ValidatedParams::AddLabelsToCard { card_id, label_ids } => {
                let card = remote
                    .add_labels_to_card(&card_id, &label_ids.join(","))
                    .await?;
                pretty(&json!({
                    "success": true,
                    "message": format!("Labels added to card {card_id} successfully."),
                    "card": card,
                }))
            }
            ValidatedParams::GetCardComments { card_id } => {
                let comments = remote.get_card_comments(&card_id).await?;
                if comments.is_empty() {
                    return Ok("No comments found on this card.".to_string());
                }
                let views: Vec<CommentView> = comments.into_iter().map(Into::into).collect();
                pretty(&views)
            }
            ValidatedParams::AddComment { card_id, text } => {
                let comment = remote.add_comment(&card_id, &text).await?;
                pretty(&json!({
                    "success": true,
                    "comment_id": comment.id,
                    "message": "Comment added successfully",
                }))
            }
            ValidatedParams::EditComment {
                card_id,
                comment_id,
                text,
            } => {
                let comment = remote.edit_comment(&card_id, &comment_id, &text).await?;
                pretty(&json!({
                    "success": true,
                    "comment_id": comment.id,
                    "message": "Comment edited successfully",
                }))
            }
            ValidatedParams::DeleteComment {
                card_id,
                comment_id,
            } => {
                remote.delete_comment(&card_id, &comment_id).await?;
                pretty(&json!({
                    "success": true,
                    "message": "Comment deleted successfully",
                }))
            }
            ValidatedParams::ListBoards => pretty(&remote.list_boards().await?),
            ValidatedParams::SetActiveBoard { board_id } => {
                let board = self.context.set_active_board(remote, &board_id).await?;
                Ok(format!(
                    "Successfully set active board to \"{}\" ({})",
                    board.name, board.id
                ))
            }
            ValidatedParams::ListWorkspaces => pretty(&remote.list_workspaces().await?),
            ValidatedParams::SetActiveWorkspace { workspace_id } => {
                let workspace = self
                    .context
                    .set_active_workspace(remote, &workspace_id)
                    .await?;
                Ok(format!(
                    "Successfully set active workspace to \"{}\" ({})",
                    workspace.display_name, workspace.id
                ))
            }
            ValidatedParams::ListBoardsInWorkspace { workspace_id } => {
                pretty(&remote.list_boards_in_workspace(&workspace_id).await?)
            }
            ValidatedParams::GetActiveBoardInfo => {
                let board_id = self.board(None).await?;
                let board = remote.get_board(&board_id).await?;
                let mut info = serde_json::to_value(&board)?;
                if let Value::Object(fields) = &mut info {
                    let workspace = self
                        .context
                        .active_workspace_id()
                        .await
                        .unwrap_or_else(|| "Not set".to_string());
                    fields.insert("isActive".to_string(), Value::Bool(true));
                    fields.insert("activeWorkspaceId".to_string(), Value::String(workspace));
                }
                pretty(&info)
            }
            ValidatedParams::GetMyCards => pretty(&remote.get_my_cards().await?),
        }
    }
}

fn render_labels(labels: Vec<Label>) -> ToolResult<String> {
    let labels: Vec<LabelView> = labels.into_iter().map(Into::into).collect();
    pretty(&json!({
        "success": true,
        "labels": labels,
    }))
}
