//! Response shaping.

use serde::Serialize;

use crate::trello::{Comment, Label};

use super::error::ToolResult;

/// What callers see for each card comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub comment_id: String,
    pub author: String,
    pub text: String,
    pub date: String,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id,
            author: comment.member_creator.full_name,
            text: comment.data.text,
            date: comment.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelView {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

impl From<Label> for LabelView {
    fn from(label: Label) -> Self {
        Self {
            id: label.id,
            name: label.name,
            color: label.color,
        }
    }
}

/// Description after appending `addition`: the addition alone when
/// `existing` is empty, otherwise the two joined by a blank line.
pub fn append_description(existing: &str, addition: &str) -> String {
    if existing.is_empty() {
        addition.to_string()
    } else {
        format!("{existing}\n\n{addition}")
    }
}

pub fn pretty<T: Serialize + ?Sized>(value: &T) -> ToolResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
