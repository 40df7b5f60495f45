//! Active board/workspace selection.
//!
//! - `store`: [`ActiveContextStore`], resolution and set-active operations
//! - `storage`: the [`ContextStorage`] seam and its file/memory backends
//! - `error`: storage and resolution failures

mod error;
mod storage;
mod store;


pub use error::{ContextError, ContextResult};
#[cfg(test)]
pub use storage::MockContextStorage;
pub use storage::{
    ActiveContext, AnyContextStorage, ContextStorage, FileContextStorage, MemoryContextStorage,
};
pub use store::ActiveContextStore;
