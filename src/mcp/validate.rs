//! Argument validation.
//!
//! Each operation has one validator turning the caller's untyped argument
//! object into a [`ValidatedParams`] variant. Validators are pure: no remote
//! calls, no context lookups, and optional fields are never defaulted here.

use reqwest::Url;
use serde_json::{Map, Value};

use crate::trello::{CardUpdate, NewCard};

use super::error::{ToolError, ToolResult};

/// Raw tool arguments as they arrive from the client.
pub type Args = Map<String, Value>;

/// Fully checked parameters, one variant per operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedParams {
    GetLists {
        board_id: Option<String>,
    },
    GetCardsByList {
        board_id: Option<String>,
        list_id: String,
    },
    GetRecentActivity {
        board_id: Option<String>,
        limit: Option<u32>,
    },
    AddCard {
        board_id: Option<String>,
        card: NewCard,
    },
    UpdateCard {
        board_id: Option<String>,
        update: CardUpdate,
    },
    UpdateCardDescription {
        card_id: String,
        description: String,
    },
    AppendToCardDescription {
        card_id: String,
        text: String,
    },
    ArchiveCard {
        board_id: Option<String>,
        card_id: String,
    },
    MoveCard {
        board_id: Option<String>,
        card_id: String,
        list_id: String,
    },
    AddList {
        board_id: Option<String>,
        name: String,
    },
    ArchiveList {
        board_id: Option<String>,
        list_id: String,
    },
    AttachImage {
        board_id: Option<String>,
        card_id: String,
        image_url: String,
        name: Option<String>,
    },
    GetBoardLabels,
    GetCardLabels {
        card_id: String,
    },
    AddLabelsToCard {
        card_id: String,
        label_ids: Vec<String>,
    },
    GetCardComments {
        card_id: String,
    },
    AddComment {
        card_id: String,
        text: String,
    },
    EditComment {
        card_id: String,
        comment_id: String,
        text: String,
    },
    DeleteComment {
        card_id: String,
        comment_id: String,
    },
    ListBoards,
    SetActiveBoard {
        board_id: String,
    },
    ListWorkspaces,
    SetActiveWorkspace {
        workspace_id: String,
    },
    ListBoardsInWorkspace {
        workspace_id: String,
    },
    GetActiveBoardInfo,
    GetMyCards,
}

// =============================================================================
// Field checks
// =============================================================================

/// JSON `null` reads the same as a missing key.
fn present<'a>(args: &'a Args, field: &str) -> Option<&'a Value> {
    args.get(field).filter(|v| !v.is_null())
}

pub fn required_string(args: &Args, field: &str) -> ToolResult<String> {
    match present(args, field) {
        None => Err(ToolError::invalid(format!("{field} is required"))),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ToolError::invalid(format!("{field} must be a string"))),
    }
}

pub fn required_non_empty_string(args: &Args, field: &str) -> ToolResult<String> {
    let value = required_string(args, field)?;
    if value.is_empty() {
        return Err(ToolError::invalid(format!("{field} must not be empty")));
    }
    Ok(value)
}

pub fn optional_string(args: &Args, field: &str) -> ToolResult<Option<String>> {
    match present(args, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::invalid(format!("{field} must be a string"))),
    }
}

/// The optional `boardId` selector. An empty id selects nothing, so the
/// active or default board applies.
pub fn optional_board_id(args: &Args) -> ToolResult<Option<String>> {
    Ok(optional_string(args, "boardId")?.filter(|id| !id.is_empty()))
}

pub fn optional_count(args: &Args, field: &str) -> ToolResult<Option<u32>> {
    match present(args, field) {
        None => Ok(None),
        Some(Value::Number(n)) => whole_count(n)
            .map(Some)
            .ok_or_else(|| ToolError::invalid(format!("{field} must be a non-negative integer"))),
        Some(_) => Err(ToolError::invalid(format!("{field} must be a number"))),
    }
}

/// `10` and `10.0` both count; negative, fractional and out-of-range values do not.
fn whole_count(n: &serde_json::Number) -> Option<u32> {
    if let Some(n) = n.as_u64() {
        return u32::try_from(n).ok();
    }
    n.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

fn string_array(value: &Value, field: &str) -> ToolResult<Vec<String>> {
    let Value::Array(items) = value else {
        return Err(ToolError::invalid(format!(
            "{field} must be an array of strings"
        )));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(ToolError::invalid(format!(
                "{field}[{index}] must be a string"
            ))),
        })
        .collect()
}

pub fn optional_string_array(args: &Args, field: &str) -> ToolResult<Option<Vec<String>>> {
    present(args, field)
        .map(|value| string_array(value, field))
        .transpose()
}

pub fn required_non_empty_string_array(args: &Args, field: &str) -> ToolResult<Vec<String>> {
    let value =
        present(args, field).ok_or_else(|| ToolError::invalid(format!("{field} is required")))?;
    let items = string_array(value, field)?;
    if items.is_empty() {
        return Err(ToolError::invalid(format!(
            "{field} must contain at least one item"
        )));
    }
    Ok(items)
}

/// A string that also parses as an absolute URL.
pub fn required_url(args: &Args, field: &str) -> ToolResult<String> {
    let value = required_string(args, field)?;
    Url::parse(&value)
        .map_err(|e| ToolError::invalid(format!("{field} must be a valid URL ({e})")))?;
    Ok(value)
}

// =============================================================================
// Per-operation validators
// =============================================================================

pub fn get_lists(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetLists {
        board_id: optional_board_id(args)?,
    })
}

pub fn get_cards_by_list_id(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetCardsByList {
        board_id: optional_board_id(args)?,
        list_id: required_string(args, "listId")?,
    })
}

pub fn get_recent_activity(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetRecentActivity {
        board_id: optional_board_id(args)?,
        limit: optional_count(args, "limit")?,
    })
}

pub fn add_card_to_list(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::AddCard {
        board_id: optional_board_id(args)?,
        card: NewCard {
            list_id: required_string(args, "listId")?,
            name: required_string(args, "name")?,
            description: optional_string(args, "description")?,
            due_date: optional_string(args, "dueDate")?,
            labels: optional_string_array(args, "labels")?,
        },
    })
}

pub fn update_card_details(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::UpdateCard {
        board_id: optional_board_id(args)?,
        update: CardUpdate {
            card_id: required_string(args, "cardId")?,
            name: optional_string(args, "name")?,
            description: optional_string(args, "description")?,
            due_date: optional_string(args, "dueDate")?,
            labels: optional_string_array(args, "labels")?,
        },
    })
}

/// An empty description is valid: it clears the card's description.
pub fn update_card_description(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::UpdateCardDescription {
        card_id: required_string(args, "card_id")?,
        description: required_string(args, "description")?,
    })
}

pub fn append_to_card_description(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::AppendToCardDescription {
        card_id: required_string(args, "card_id")?,
        text: required_non_empty_string(args, "text_to_append")?,
    })
}

pub fn archive_card(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::ArchiveCard {
        board_id: optional_board_id(args)?,
        card_id: required_string(args, "cardId")?,
    })
}

pub fn move_card(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::MoveCard {
        board_id: optional_board_id(args)?,
        card_id: required_string(args, "cardId")?,
        list_id: required_string(args, "listId")?,
    })
}

pub fn add_list_to_board(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::AddList {
        board_id: optional_board_id(args)?,
        name: required_string(args, "name")?,
    })
}

pub fn archive_list(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::ArchiveList {
        board_id: optional_board_id(args)?,
        list_id: required_string(args, "listId")?,
    })
}

pub fn attach_image_to_card(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::AttachImage {
        board_id: optional_board_id(args)?,
        card_id: required_string(args, "cardId")?,
        image_url: required_url(args, "imageUrl")?,
        name: optional_string(args, "name")?,
    })
}

pub fn get_board_labels(_args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetBoardLabels)
}

pub fn get_card_labels(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetCardLabels {
        card_id: required_string(args, "card_id")?,
    })
}

pub fn add_labels_to_card(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::AddLabelsToCard {
        card_id: required_string(args, "card_id")?,
        label_ids: required_non_empty_string_array(args, "label_ids")?,
    })
}

pub fn get_card_comments(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetCardComments {
        card_id: required_string(args, "card_id")?,
    })
}

pub fn add_comment_to_card(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::AddComment {
        card_id: required_string(args, "card_id")?,
        text: required_non_empty_string(args, "comment_text")?,
    })
}

pub fn edit_card_comment(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::EditComment {
        card_id: required_string(args, "card_id")?,
        comment_id: required_string(args, "comment_id")?,
        text: required_non_empty_string(args, "comment_text")?,
    })
}

pub fn delete_card_comment(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::DeleteComment {
        card_id: required_string(args, "card_id")?,
        comment_id: required_string(args, "comment_id")?,
    })
}

pub fn list_boards(_args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::ListBoards)
}

pub fn set_active_board(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::SetActiveBoard {
        board_id: required_string(args, "boardId")?,
    })
}

pub fn list_workspaces(_args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::ListWorkspaces)
}

pub fn set_active_workspace(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::SetActiveWorkspace {
        workspace_id: required_string(args, "workspaceId")?,
    })
}

pub fn list_boards_in_workspace(args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::ListBoardsInWorkspace {
        workspace_id: required_string(args, "workspaceId")?,
    })
}

pub fn get_active_board_info(_args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetActiveBoardInfo)
}

pub fn get_my_cards(_args: &Args) -> ToolResult<ValidatedParams> {
    Ok(ValidatedParams::GetMyCards)
}
