//! The operation catalog.
//!
//! One table entry per tool: its stable name, the argument schema published
//! in `tools/list`, and the validator that turns raw arguments into
//! [`ValidatedParams`]. Adding a tool means adding an entry here, a variant
//! to `ValidatedParams` and an arm in the dispatcher.

use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use super::error::ToolResult;
use super::validate::{self, Args, ValidatedParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Number,
    StringArray,
    Url,
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

pub type Validator = fn(&Args) -> ToolResult<ValidatedParams>;

pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [Param],
    pub validate: Validator,
}

impl Param {
    const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }

    fn schema(&self) -> Value {
        match self.kind {
            ParamKind::String => json!({"type": "string", "description": self.description}),
            ParamKind::Number => json!({"type": "number", "description": self.description}),
            ParamKind::Url => json!({
                "type": "string",
                "format": "uri",
                "description": self.description,
            }),
            ParamKind::StringArray => json!({
                "type": "array",
                "items": {"type": "string"},
                "description": self.description,
            }),
        }
    }
}

impl Operation {
    /// JSON Schema for the tool's arguments.
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.schema()))
            .collect();
        let required: Vec<Value> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| Value::from(p.name))
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), Value::from("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), Value::Array(required));
        schema
    }

    pub fn tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::new(self.input_schema()))
    }
}

const BOARD_ID: Param = Param::optional(
    "boardId",
    ParamKind::String,
    "ID of the Trello board (uses the active or default board if not provided)",
);

const CARD_ID_SNAKE: Param = Param::required("card_id", ParamKind::String, "The ID of the card");

/// Every tool the server exposes, in `tools/list` order.
pub static CATALOG: &[Operation] = &[
    Operation {
        name: "get_cards_by_list_id",
        description: "Fetch cards from a specific Trello list on a specific board",
        params: &[
            BOARD_ID,
            Param::required("listId", ParamKind::String, "ID of the Trello list"),
        ],
        validate: validate::get_cards_by_list_id,
    },
    Operation {
        name: "get_lists",
        description: "Retrieve all lists from the specified board",
        params: &[BOARD_ID],
        validate: validate::get_lists,
    },
    Operation {
        name: "get_recent_activity",
        description: "Fetch recent activity on the Trello board",
        params: &[
            BOARD_ID,
            Param::optional(
                "limit",
                ParamKind::Number,
                "Number of activities to fetch (default: 10)",
            ),
        ],
        validate: validate::get_recent_activity,
    },
    Operation {
        name: "add_card_to_list",
        description: "Add a new card to a specified list on a specific board",
        params: &[
            BOARD_ID,
            Param::required("listId", ParamKind::String, "ID of the list to add the card to"),
            Param::required("name", ParamKind::String, "Name of the card"),
            Param::optional("description", ParamKind::String, "Description of the card"),
            Param::optional(
                "dueDate",
                ParamKind::String,
                "Due date for the card (ISO 8601 format)",
            ),
            Param::optional(
                "labels",
                ParamKind::StringArray,
                "Array of label IDs to apply to the card",
            ),
        ],
        validate: validate::add_card_to_list,
    },
    Operation {
        name: "update_card_details",
        description: "Update an existing card's details on a specific board",
        params: &[
            BOARD_ID,
            Param::required("cardId", ParamKind::String, "ID of the card to update"),
            Param::optional("name", ParamKind::String, "New name for the card"),
            Param::optional("description", ParamKind::String, "New description for the card"),
            Param::optional(
                "dueDate",
                ParamKind::String,
                "New due date for the card (ISO 8601 format)",
            ),
            Param::optional(
                "labels",
                ParamKind::StringArray,
                "New array of label IDs for the card",
            ),
        ],
        validate: validate::update_card_details,
    },
    Operation {
        name: "update_card_description",
        description: "Update the entire description of a specific card",
        params: &[
            CARD_ID_SNAKE,
            Param::required(
                "description",
                ParamKind::String,
                "The new, complete description for the card (empty string clears it)",
            ),
        ],
        validate: validate::update_card_description,
    },
    Operation {
        name: "append_to_card_description",
        description: "Append text to the existing description of a specific card",
        params: &[
            CARD_ID_SNAKE,
            Param::required(
                "text_to_append",
                ParamKind::String,
                "The text to append to the card description",
            ),
        ],
        validate: validate::append_to_card_description,
    },
    Operation {
        name: "archive_card",
        description: "Send a card to the archive on a specific board",
        params: &[
            BOARD_ID,
            Param::required("cardId", ParamKind::String, "ID of the card to archive"),
        ],
        validate: validate::archive_card,
    },
    Operation {
        name: "move_card",
        description: "Move a card to a different list, potentially on a different board",
        params: &[
            Param::optional(
                "boardId",
                ParamKind::String,
                "ID of the target Trello board (where the listId resides, uses the active or default board if not provided)",
            ),
            Param::required("cardId", ParamKind::String, "ID of the card to move"),
            Param::required("listId", ParamKind::String, "ID of the target list"),
        ],
        validate: validate::move_card,
    },
    Operation {
        name: "add_list_to_board",
        description: "Add a new list to the specified board",
        params: &[
            BOARD_ID,
            Param::required("name", ParamKind::String, "Name of the new list"),
        ],
        validate: validate::add_list_to_board,
    },
    Operation {
        name: "archive_list",
        description: "Send a list to the archive on a specific board",
        params: &[
            BOARD_ID,
            Param::required("listId", ParamKind::String, "ID of the list to archive"),
        ],
        validate: validate::archive_list,
    },
    Operation {
        name: "get_my_cards",
        description: "Fetch all cards assigned to the current user",
        params: &[],
        validate: validate::get_my_cards,
    },
    Operation {
        name: "attach_image_to_card",
        description: "Attach an image to a card from a URL on a specific board",
        params: &[
            BOARD_ID,
            Param::required(
                "cardId",
                ParamKind::String,
                "ID of the card to attach the image to",
            ),
            Param::required("imageUrl", ParamKind::Url, "URL of the image to attach"),
            Param::optional(
                "name",
                ParamKind::String,
                "Optional name for the attachment (defaults to \"Image Attachment\")",
            ),
        ],
        validate: validate::attach_image_to_card,
    },
    Operation {
        name: "list_boards",
        description: "List all boards the user has access to",
        params: &[],
        validate: validate::list_boards,
    },
    Operation {
        name: "set_active_board",
        description: "Set the active board for future operations",
        params: &[Param::required(
            "boardId",
            ParamKind::String,
            "ID of the board to set as active",
        )],
        validate: validate::set_active_board,
    },
    Operation {
        name: "list_workspaces",
        description: "List all workspaces the user has access to",
        params: &[],
        validate: validate::list_workspaces,
    },
    Operation {
        name: "set_active_workspace",
        description: "Set the active workspace for future operations",
        params: &[Param::required(
            "workspaceId",
            ParamKind::String,
            "ID of the workspace to set as active",
        )],
        validate: validate::set_active_workspace,
    },
    Operation {
        name: "list_boards_in_workspace",
        description: "List all boards in a specific workspace",
        params: &[Param::required(
            "workspaceId",
            ParamKind::String,
            "ID of the workspace to list boards from",
        )],
        validate: validate::list_boards_in_workspace,
    },
    Operation {
        name: "get_active_board_info",
        description: "Get information about the currently active board",
        params: &[],
        validate: validate::get_active_board_info,
    },
    Operation {
        name: "get_board_labels",
        description: "Get all available labels for the currently active board",
        params: &[],
        validate: validate::get_board_labels,
    },
    Operation {
        name: "get_card_labels",
        description: "Get all labels currently applied to a specific card",
        params: &[CARD_ID_SNAKE],
        validate: validate::get_card_labels,
    },
    Operation {
        name: "add_labels_to_card",
        description: "Add one or more existing labels to a specific card",
        params: &[
            CARD_ID_SNAKE,
            Param::required(
                "label_ids",
                ParamKind::StringArray,
                "An array of label IDs to add to the card (at least one)",
            ),
        ],
        validate: validate::add_labels_to_card,
    },
    Operation {
        name: "get_card_comments",
        description: "Get all comments for a Trello card, in chronological order",
        params: &[CARD_ID_SNAKE],
        validate: validate::get_card_comments,
    },
    Operation {
        name: "add_comment_to_card",
        description: "Add a new comment to a Trello card",
        params: &[
            CARD_ID_SNAKE,
            Param::required(
                "comment_text",
                ParamKind::String,
                "The text of the comment to add",
            ),
        ],
        validate: validate::add_comment_to_card,
    },
    Operation {
        name: "edit_card_comment",
        description: "Edit an existing comment on a Trello card (only your own comments)",
        params: &[
            CARD_ID_SNAKE,
            Param::required("comment_id", ParamKind::String, "The ID of the comment to edit"),
            Param::required("comment_text", ParamKind::String, "The new text for the comment"),
        ],
        validate: validate::edit_card_comment,
    },
    Operation {
        name: "delete_card_comment",
        description: "Delete an existing comment on a Trello card (only your own comments)",
        params: &[
            CARD_ID_SNAKE,
            Param::required(
                "comment_id",
                ParamKind::String,
                "The ID of the comment to delete",
            ),
        ],
        validate: validate::delete_card_comment,
    },
];

pub fn lookup(name: &str) -> Option<&'static Operation> {
    CATALOG.iter().find(|op| op.name == name)
}

/// The `tools/list` payload.
pub fn tools() -> Vec<Tool> {
    CATALOG.iter().map(Operation::tool).collect()
}
