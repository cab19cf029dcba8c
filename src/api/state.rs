//! API server state

use std::sync::Arc;

use crate::menu::MenuService;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Menu lookups, shared read-only across handlers
    pub menu: Arc<MenuService>,
}

impl AppState {
    pub fn new(menu: MenuService) -> Self {
        Self {
            menu: Arc::new(menu),
        }
    }
}
