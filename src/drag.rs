//! Drag-and-drop state machine for the board.
//!
//! [`BoardController`] tracks at most one in-flight drag gesture and decides
//! whether a drop is legal. It never touches the cards themselves: an
//! accepted drop is handed to the caller as a [`MoveRequest`] and the caller
//! mutates its own data store.

use crate::domain::card::CardId;
use crate::domain::column::{find_column, Column, ColumnId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Transient record of the drag gesture in progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        card: CardId,
        source: ColumnId,
        candidate: Option<ColumnId>,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

/// A move the caller is asked to apply to its own data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub card: CardId,
    pub source: ColumnId,
    pub target: ColumnId,
}

/// Why a drop ended without a move and without a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No drag was in progress
    NotDragging,
    /// The card was dropped back onto its own column
    SameColumn,
    /// Drag and drop is switched off for the board
    Disabled,
}

/// Why a drop was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRejection {
    ColumnFull { column: ColumnId, max_cards: usize },
    UnknownColumn(ColumnId),
}

impl std::fmt::Display for DropRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnFull { column, max_cards } => {
                write!(f, "column {} is full ({} cards max)", column, max_cards)
            }
            Self::UnknownColumn(column) => write!(f, "column {} does not exist", column),
        }
    }
}

/// Result of a drop gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved(MoveRequest),
    Ignored(IgnoreReason),
    Rejected(DropRejection),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved(_))
    }
}

/// Owns the board's drag state and mediates between columns
#[derive(Debug, Clone, Default)]
pub struct BoardController {
    state: DragState,
}

impl BoardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        !self.state.is_idle()
    }

    pub fn dragged_card(&self) -> Option<&CardId> {
        match &self.state {
            DragState::Dragging { card, .. } => Some(card),
            DragState::Idle => None,
        }
    }

    pub fn source_column(&self) -> Option<&ColumnId> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    pub fn drop_candidate(&self) -> Option<&ColumnId> {
        match &self.state {
            DragState::Dragging { candidate, .. } => candidate.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn is_card_dragged(&self, card: &CardId) -> bool {
        self.dragged_card() == Some(card)
    }

    pub fn is_drop_candidate(&self, column: &ColumnId) -> bool {
        self.drop_candidate() == Some(column)
    }

    /// Begins a drag, replacing any gesture still recorded
    pub fn start_drag(&mut self, card: CardId, source: ColumnId) {
        debug!(card = %card, source = %source, "drag started");
        self.state = DragState::Dragging {
            card,
            source,
            candidate: None,
        };
    }

    /// Marks the column under the pointer. Capacity is not checked here.
    pub fn set_drop_candidate(&mut self, column: ColumnId) {
        if let DragState::Dragging { candidate, .. } = &mut self.state {
            if candidate.as_ref() != Some(&column) {
                trace!(column = %column, "drop candidate changed");
                *candidate = Some(column);
            }
        }
    }

    /// Pointer left a column without entering another
    pub fn clear_drop_candidate(&mut self) {
        if let DragState::Dragging { candidate, .. } = &mut self.state {
            *candidate = None;
        }
    }

    /// Cancels the gesture
    pub fn end_drag(&mut self) {
        if let DragState::Dragging { card, .. } = &self.state {
            debug!(card = %card, "drag ended without drop");
        }
        self.state = DragState::Idle;
    }

    /// Completes the gesture over `target`
    ///
    /// `on_move` runs exactly once when the drop is accepted and never
    /// otherwise. The drag state is cleared in every case.
    pub fn drop_card<P, F>(
        &mut self,
        columns: &[Column<P>],
        target: &ColumnId,
        on_move: F,
    ) -> DropOutcome
    where
        F: FnOnce(&MoveRequest),
    {
        let (card, source) = match std::mem::take(&mut self.state) {
            DragState::Dragging { card, source, .. } => (card, source),
            DragState::Idle => return DropOutcome::Ignored(IgnoreReason::NotDragging),
        };

        if &source == target {
            debug!(card = %card, column = %source, "card dropped on its own column");
            return DropOutcome::Ignored(IgnoreReason::SameColumn);
        }

        let Some(column) = find_column(columns, target) else {
            let rejection = DropRejection::UnknownColumn(target.clone());
            warn!(card = %card, "drop rejected: {}", rejection);
            return DropOutcome::Rejected(rejection);
        };

        if let Some(max_cards) = column.max_cards.filter(|_| column.is_full()) {
            let rejection = DropRejection::ColumnFull {
                column: target.clone(),
                max_cards,
            };
            warn!(card = %card, "drop rejected: {}", rejection);
            return DropOutcome::Rejected(rejection);
        }

        let request = MoveRequest {
            card,
            source,
            target: target.clone(),
        };
        debug!(
            card = %request.card,
            source = %request.source,
            target = %request.target,
            "card moved"
        );
        on_move(&request);
        DropOutcome::Moved(request)
    }
}
