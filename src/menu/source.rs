//! Menu data sources

use std::sync::Arc;

use async_trait::async_trait;

use crate::menu::{MenuEntry, MenuTable, WeekdayCode};
use crate::Result;

/// Where menu entries come from
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the entry for `day`, `None` if the source has nothing for it
    async fn fetch(&self, day: WeekdayCode) -> Result<Option<MenuEntry>>;

    /// Short name used in logs and health output
    fn name(&self) -> &'static str;
}

/// Source backed by an in-memory table
#[derive(Debug, Clone)]
pub struct StaticMenuSource {
    table: Arc<MenuTable>,
}

impl StaticMenuSource {
    pub fn new(table: MenuTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

#[async_trait]
impl MenuSource for StaticMenuSource {
    async fn fetch(&self, day: WeekdayCode) -> Result<Option<MenuEntry>> {
        Ok(self.table.get(day).cloned())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
