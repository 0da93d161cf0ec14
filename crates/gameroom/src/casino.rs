use super::table::Table;
use agp_core::ID;
use agp_core::Unique;
use agp_gameplay::Config;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Registry of live tables.
///
/// Tables run fully independently; this map is the only mutable structure
/// they share, so it gets its own lock and nothing else does.
#[derive(Default)]
pub struct Casino {
    tables: RwLock<HashMap<ID<Table>, Table>>,
}

impl Casino {
    pub fn new() -> Self {
        Self::default()
    }
    /// Opens a table with default timers and collaborators.
    pub async fn open(&self, config: Config) -> Table {
        let table = Table::with_defaults(config);
        self.tables.write().await.insert(table.id(), table.clone());
        log::info!("[casino] opened table {}", table.id());
        table
    }
    /// Registers an externally configured table.
    pub async fn admit(&self, table: Table) {
        self.tables.write().await.insert(table.id(), table);
    }
    pub async fn table(&self, id: ID<Table>) -> Option<Table> {
        self.tables.read().await.get(&id).cloned()
    }
    /// Closes and forgets a table.
    pub async fn shutter(&self, id: ID<Table>) -> bool {
        match self.tables.write().await.remove(&id) {
            Some(table) => {
                table.close().await;
                log::info!("[casino] shuttered table {}", id);
                true
            }
            None => false,
        }
    }
    pub async fn len(&self) -> usize {
        self.tables.read().await.len()
    }
}
