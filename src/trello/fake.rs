//! In-memory [`RemoteService`] for tests.
//!
//! Records every call so tests can assert that rejected requests never reach
//! the remote side.

use std::sync::Mutex;

use serde_json::json;

use super::error::{TrelloError, TrelloResult};
use super::models::*;
use super::service::RemoteService;

#[derive(Default)]
pub struct FakeTrello {
    boards: Mutex<Vec<Board>>,
    workspaces: Mutex<Vec<Workspace>>,
    cards: Mutex<Vec<Card>>,
    comments: Mutex<Vec<Comment>>,
    labels: Mutex<Vec<Label>>,
    calls: Mutex<Vec<String>>,
}

fn not_found(what: &str, id: &str) -> TrelloError {
    TrelloError::Api {
        status: 404,
        message: format!("{what} {id} not found"),
    }
}

impl FakeTrello {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(self, id: &str, name: &str) -> Self {
        self.boards.lock().unwrap().push(Board {
            id: id.to_string(),
            name: name.to_string(),
            extra: Default::default(),
        });
        self
    }

    pub fn with_workspace(self, id: &str, display_name: &str) -> Self {
        self.workspaces.lock().unwrap().push(Workspace {
            id: id.to_string(),
            display_name: display_name.to_string(),
            extra: Default::default(),
        });
        self
    }

    pub fn with_card(self, id: &str, desc: &str) -> Self {
        self.cards.lock().unwrap().push(Card {
            id: id.to_string(),
            name: format!("Card {id}"),
            desc: desc.to_string(),
            extra: Default::default(),
        });
        self
    }

    pub fn with_label(self, id: &str, name: &str, color: Option<&str>) -> Self {
        let mut extra = Extra::new();
        extra.insert("idBoard".to_string(), json!("b1"));
        self.labels.lock().unwrap().push(Label {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            extra,
        });
        self
    }

    /// Comments are returned in insertion order.
    pub fn with_comment(self, id: &str, author: &str, text: &str, date: &str) -> Self {
        self.comments.lock().unwrap().push(Comment {
            id: id.to_string(),
            date: date.to_string(),
            data: CommentData {
                text: text.to_string(),
            },
            member_creator: Member {
                full_name: author.to_string(),
            },
            extra: Default::default(),
        });
        self
    }

    /// Every remote call made so far, as `name:arg:arg`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn card_desc(&self, card_id: &str) -> Option<String> {
        self.cards
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.desc.clone())
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn find_card(&self, card_id: &str) -> TrelloResult<Card> {
        self.cards
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == card_id)
            .cloned()
            .ok_or_else(|| not_found("card", card_id))
    }

    fn simple_card(id: &str, name: &str) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            desc: String::new(),
            extra: Default::default(),
        }
    }

    fn simple_list(id: &str, name: &str) -> List {
        List {
            id: id.to_string(),
            name: name.to_string(),
            extra: Default::default(),
        }
    }
}

impl RemoteService for FakeTrello {
    async fn list_boards(&self) -> TrelloResult<Vec<Board>> {
        self.record("list_boards".to_string());
        Ok(self.boards.lock().unwrap().clone())
    }

    async fn get_board(&self, board_id: &str) -> TrelloResult<Board> {
        self.record(format!("get_board:{board_id}"));
        self.boards
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == board_id)
            .cloned()
            .ok_or_else(|| not_found("board", board_id))
    }

    async fn list_workspaces(&self) -> TrelloResult<Vec<Workspace>> {
        self.record("list_workspaces".to_string());
        Ok(self.workspaces.lock().unwrap().clone())
    }

    async fn get_workspace(&self, workspace_id: &str) -> TrelloResult<Workspace> {
        self.record(format!("get_workspace:{workspace_id}"));
        self.workspaces
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == workspace_id)
            .cloned()
            .ok_or_else(|| not_found("workspace", workspace_id))
    }

    async fn list_boards_in_workspace(&self, workspace_id: &str) -> TrelloResult<Vec<Board>> {
        self.record(format!("list_boards_in_workspace:{workspace_id}"));
        Ok(self.boards.lock().unwrap().clone())
    }

    async fn get_lists(&self, board_id: &str) -> TrelloResult<Vec<List>> {
        self.record(format!("get_lists:{board_id}"));
        Ok(vec![
            Self::simple_list("l-todo", "To Do"),
            Self::simple_list("l-done", "Done"),
        ])
    }

    async fn get_cards_by_list(&self, board_id: &str, list_id: &str) -> TrelloResult<Vec<Card>> {
        self.record(format!("get_cards_by_list:{board_id}:{list_id}"));
        Ok(self.cards.lock().unwrap().clone())
    }

    async fn get_recent_activity(
        &self,
        board_id: &str,
        limit: Option<u32>,
    ) -> TrelloResult<Vec<ActivityItem>> {
        self.record(format!("get_recent_activity:{board_id}:{limit:?}"));
        Ok(vec![])
    }

    async fn add_card(&self, board_id: &str, card: &NewCard) -> TrelloResult<Card> {
        self.record(format!(
            "add_card:{board_id}:{}:{}:{:?}:{:?}:{:?}",
            card.list_id, card.name, card.description, card.due_date, card.labels
        ));
        Ok(Self::simple_card("c-new", &card.name))
    }

    async fn update_card(&self, board_id: &str, update: &CardUpdate) -> TrelloResult<Card> {
        self.record(format!(
            "update_card:{board_id}:{}:{:?}:{:?}:{:?}:{:?}",
            update.card_id, update.name, update.description, update.due_date, update.labels
        ));
        self.find_card(&update.card_id)
    }

    async fn get_card(&self, card_id: &str) -> TrelloResult<Card> {
        self.record(format!("get_card:{card_id}"));
        self.find_card(card_id)
    }

    async fn update_card_description(&self, card_id: &str, description: &str) -> TrelloResult<Card> {
        self.record(format!("update_card_description:{card_id}"));
        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| not_found("card", card_id))?;
        card.desc = description.to_string();
        Ok(card.clone())
    }

    async fn archive_card(&self, board_id: &str, card_id: &str) -> TrelloResult<Card> {
        self.record(format!("archive_card:{board_id}:{card_id}"));
        self.find_card(card_id)
    }

    async fn move_card(&self, board_id: &str, card_id: &str, list_id: &str) -> TrelloResult<Card> {
        self.record(format!("move_card:{board_id}:{card_id}:{list_id}"));
        self.find_card(card_id)
    }

    async fn add_list(&self, board_id: &str, name: &str) -> TrelloResult<List> {
        self.record(format!("add_list:{board_id}:{name}"));
        Ok(Self::simple_list("l-new", name))
    }

    async fn archive_list(&self, board_id: &str, list_id: &str) -> TrelloResult<List> {
        self.record(format!("archive_list:{board_id}:{list_id}"));
        Ok(Self::simple_list(list_id, "Archived"))
    }

    async fn get_my_cards(&self) -> TrelloResult<Vec<Card>> {
        self.record("get_my_cards".to_string());
        Ok(self.cards.lock().unwrap().clone())
    }

    async fn attach_image(
        &self,
        board_id: &str,
        card_id: &str,
        image_url: &str,
        name: Option<&str>,
    ) -> TrelloResult<Attachment> {
        self.record(format!("attach_image:{board_id}:{card_id}:{image_url}:{name:?}"));
        let mut extra = Extra::new();
        extra.insert("url".to_string(), json!(image_url));
        Ok(Attachment {
            id: "att-1".to_string(),
            extra,
        })
    }

    async fn get_board_labels(&self, board_id: &str) -> TrelloResult<Vec<Label>> {
        self.record(format!("get_board_labels:{board_id}"));
        Ok(self.labels.lock().unwrap().clone())
    }

    async fn get_card_labels(&self, card_id: &str) -> TrelloResult<Vec<Label>> {
        self.record(format!("get_card_labels:{card_id}"));
        self.find_card(card_id)?;
        Ok(self.labels.lock().unwrap().clone())
    }

    async fn add_labels_to_card(&self, card_id: &str, label_ids: &str) -> TrelloResult<Card> {
        self.record(format!("add_labels_to_card:{card_id}:{label_ids}"));
        self.find_card(card_id)
    }

    async fn get_card_comments(&self, card_id: &str) -> TrelloResult<Vec<Comment>> {
        self.record(format!("get_card_comments:{card_id}"));
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn add_comment(&self, card_id: &str, text: &str) -> TrelloResult<Comment> {
        self.record(format!("add_comment:{card_id}:{text}"));
        Ok(Comment {
            id: "cm-new".to_string(),
            date: "2025-01-01T00:00:00.000Z".to_string(),
            data: CommentData {
                text: text.to_string(),
            },
            member_creator: Member::default(),
            extra: Default::default(),
        })
    }

    async fn edit_comment(&self, card_id: &str, comment_id: &str, text: &str) -> TrelloResult<Comment> {
        self.record(format!("edit_comment:{card_id}:{comment_id}:{text}"));
        Ok(Comment {
            id: comment_id.to_string(),
            date: "2025-01-01T00:00:00.000Z".to_string(),
            data: CommentData {
                text: text.to_string(),
            },
            member_creator: Member::default(),
            extra: Default::default(),
        })
    }

    async fn delete_comment(&self, card_id: &str, comment_id: &str) -> TrelloResult<()> {
        self.record(format!("delete_comment:{card_id}:{comment_id}"));
        Ok(())
    }
}
