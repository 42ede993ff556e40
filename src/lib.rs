//! # CRM Kanban
//!
//! Drag-and-drop kanban board core for the school CRM dashboard.
//!
//! The crate owns the board's drag state machine and the pure view models
//! that a UI toolkit draws. Cards and their persistence stay with the
//! caller: an accepted drop is reported through [`BoardHandler`] and the
//! caller updates its own leads or tickets.

pub mod board;
pub mod domain;
pub mod drag;
pub mod error;
pub mod render;
pub mod storage;

// Re-export commonly used types
pub use board::{BoardHandler, BoardView, KanbanBoard};
pub use domain::{
    card::{Card, CardId, Priority},
    column::{Column, ColumnId},
    layout::{BoardLayout, BoardOptions, ColumnConfig},
};
pub use drag::{BoardController, DragState, DropOutcome, DropRejection, IgnoreReason, MoveRequest};
pub use error::{KanbanError, Result};
pub use render::{CardRenderer, CardView, ColumnView, DefaultCardRenderer};
pub use storage::LayoutStorage;
