use crate::{
    domain::BoardLayout,
    error::{KanbanError, Result},
    storage::LayoutStorage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-based layout storage, one pretty-printed JSON file per layout
pub struct FileLayoutStorage {
    root_path: PathBuf,
}

impl FileLayoutStorage {
    const STORAGE_DIR: &'static str = ".crm-kanban";
    const LAYOUTS_DIR: &'static str = "layouts";

    /// Creates a new FileLayoutStorage for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::STORAGE_DIR),
        }
    }

    fn layouts_dir(&self) -> PathBuf {
        self.root_path.join(Self::LAYOUTS_DIR)
    }

    fn layout_file(&self, name: &str) -> Result<PathBuf> {
        validate_layout_name(name)?;
        Ok(self.layouts_dir().join(format!("{}.json", name)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

/// Layout names become file names, so only `[a-z0-9_-]` is accepted
fn validate_layout_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(KanbanError::InvalidLayoutName(name.to_string()))
    }
}

#[async_trait]
impl LayoutStorage for FileLayoutStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.layouts_dir()).await?;

        let default_layout = BoardLayout::default();
        if !self.layout_file(&default_layout.name)?.exists() {
            self.save_layout(&default_layout).await?;
        }

        Ok(())
    }

    async fn save_layout(&self, layout: &BoardLayout) -> Result<()> {
        let file_path = self.layout_file(&layout.name)?;
        self.ensure_directory_exists(&self.layouts_dir()).await?;

        let json = serde_json::to_string_pretty(layout)?;
        fs::write(&file_path, json).await?;

        debug!(layout = %layout.name, path = %file_path.display(), "layout saved");
        Ok(())
    }

    async fn load_layout(&self, name: &str) -> Result<BoardLayout> {
        let file_path = self.layout_file(name)?;

        if !self.layouts_dir().exists() {
            return Err(KanbanError::StorageNotInitialized);
        }
        if !file_path.exists() {
            return Err(KanbanError::LayoutNotFound(name.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let layout: BoardLayout = serde_json::from_str(&contents)?;

        Ok(layout)
    }

    async fn list_layouts(&self) -> Result<Vec<String>> {
        let layouts_dir = self.layouts_dir();

        if !layouts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&layouts_dir).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if validate_layout_name(stem).is_ok() {
                        names.push(stem.to_string());
                    }
                }
            }
        }

        names.sort();
        Ok(names)
    }

    async fn delete_layout(&self, name: &str) -> Result<()> {
        let file_path = self.layout_file(name)?;

        if !file_path.exists() {
            return Err(KanbanError::LayoutNotFound(name.to_string()));
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.layouts_dir().exists()
    }
}
