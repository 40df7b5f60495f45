//! Trello domain entities.
//!
//! Only the fields the server reads are typed. Everything else Trello returns
//! is kept in a flattened map so it reaches the caller unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped remainder of an entity payload.
pub type Extra = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A Trello organization, shown to users as a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Card description. Trello sends `""` for cards without one.
    #[serde(default)]
    pub desc: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// `None` for colorless labels.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub text: String,
}

/// A `commentCard` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub data: CommentData,
    #[serde(default)]
    pub member_creator: Member,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Fields for a new card. `labels` holds label ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCard {
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// Partial card update. Absent fields are left untouched on Trello's side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardUpdate {
    pub card_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub labels: Option<Vec<String>>,
}
