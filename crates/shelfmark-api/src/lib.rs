//! # shelfmark-api
//!
//! HTTP API server for shelfmark: the save/list/tag/delete surface plus
//! the dedup/merge service that sits between the resolver and the item
//! store.

use std::sync::Arc;

use shelfmark_core::UserRepository;

pub mod handlers;
pub mod services;

use services::ItemService;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// The save/merge/tag service.
    pub items: Arc<ItemService>,
    /// User glue (registration and listing).
    pub users: Arc<dyn UserRepository>,
}
