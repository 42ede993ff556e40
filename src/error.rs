use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Invalid card ID: {0:?}")]
    InvalidCardId(String),

    #[error("Invalid column ID: {0:?}")]
    InvalidColumnId(String),

    #[error("Invalid priority '{0}'. Valid priorities: low, medium, high, urgent")]
    InvalidPriority(String),

    #[error("Invalid sort field '{0}'. Valid fields: title, priority, due, assignee, tags")]
    InvalidSortField(String),

    #[error("Invalid sort order '{0}'. Valid orders: asc, desc")]
    InvalidSortOrder(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Card {card} not found in column {column}")]
    CardNotFound { card: String, column: String },

    #[error("Column {0} is defined more than once")]
    DuplicateColumn(String),

    #[error("Card {card} appears in both {first} and {second}")]
    DuplicateCard {
        card: String,
        first: String,
        second: String,
    },

    #[error("Layout not found: {0}")]
    LayoutNotFound(String),

    #[error("Invalid layout name: {0:?}")]
    InvalidLayoutName(String),

    #[error("Layout storage not initialized")]
    StorageNotInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
