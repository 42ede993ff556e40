pub mod card;
pub mod column;
pub mod filter;
pub mod layout;
pub mod sorting;

pub use card::{Card, CardId, Priority};
pub use column::{apply_move, column_of, find_column, validate_columns, Column, ColumnId};
pub use filter::{filter_cards, CardFilter};
pub use layout::{BoardLayout, BoardOptions, ColumnConfig};
pub use sorting::{sort_cards, SortField, SortOrder};
