use crate::{domain::BoardLayout, error::Result};
use async_trait::async_trait;

pub mod file_storage;

pub use file_storage::FileLayoutStorage;

/// Storage trait for persisting board layouts
///
/// Only column configuration and board options are stored. Cards belong to
/// the application's own data layer and never pass through here.
#[async_trait]
pub trait LayoutStorage: Send + Sync {
    /// Initializes the storage backend, writing the default layout if absent
    async fn initialize(&self) -> Result<()>;

    /// Saves a layout under its own name, replacing any previous version
    async fn save_layout(&self, layout: &BoardLayout) -> Result<()>;

    /// Loads a layout by name
    async fn load_layout(&self, name: &str) -> Result<BoardLayout>;

    /// Lists the names of all stored layouts, sorted
    async fn list_layouts(&self) -> Result<Vec<String>>;

    /// Deletes a layout
    async fn delete_layout(&self, name: &str) -> Result<()>;

    /// Checks if the storage is initialized
    async fn is_initialized(&self) -> bool;
}
