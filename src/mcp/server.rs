//! MCP server implementation
//!
//! Publishes the operation catalog over `tools/list` and forwards every
//! `tools/call` to the [`Dispatcher`].

use std::sync::Arc;

use rmcp::{
    ErrorData, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, JsonObject, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};

use crate::context::{ActiveContextStore, ContextStorage};
use crate::trello::RemoteService;

use super::catalog;
use super::dispatch::Dispatcher;

/// Main MCP server
///
/// Generic over `R: RemoteService` and `S: ContextStorage` (no dynamic
/// dispatch). Cloning is cheap: clones share one dispatcher and so one
/// active context.
pub struct TrelloMcpServer<R: RemoteService, S: ContextStorage> {
    dispatcher: Arc<Dispatcher<R, S>>,
}

impl<R: RemoteService, S: ContextStorage> Clone for TrelloMcpServer<R, S> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<R: RemoteService, S: ContextStorage> TrelloMcpServer<R, S> {
    pub fn new(remote: R, context: ActiveContextStore<S>) -> Self {
        Self {
            dispatcher: Arc::new(Dispatcher::new(Arc::new(remote), Arc::new(context))),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<R, S> {
        &self.dispatcher
    }

    /// Handle a `tools/call` by name.
    pub async fn call(&self, name: &str, arguments: Option<&JsonObject>) -> CallToolResult {
        self.dispatcher.dispatch(name, arguments).await
    }
}

impl<R, S> ServerHandler for TrelloMcpServer<R, S>
where
    R: RemoteService + 'static,
    S: ContextStorage + 'static,
{
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Trello MCP Server - Manage boards, lists, cards, labels and comments. \
             Board-scoped tools use the active board (set_active_board) or the \
             configured default when boardId is omitted.",
        )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(catalog::tools()))
    }

    /// Tool failures travel inside the result envelope, never as protocol
    /// errors.
    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(self.call(&request.name, request.arguments.as_ref()).await)
    }
}
