use crate::domain::card::{Card, CardId};
use crate::domain::column::{find_column, Column, ColumnId};
use crate::domain::layout::BoardOptions;
use crate::drag::{BoardController, DropOutcome, IgnoreReason, MoveRequest};
use crate::render::{
    render_column, CardRenderer, ColumnRenderContext, ColumnView, DEFAULT_EMPTY_MESSAGE,
};
use serde::Serialize;
use tracing::debug;

/// Callbacks the board invokes on the surrounding application
///
/// Only moves are mandatory. Persisting a move, and rolling it back if the
/// backend refuses it, is entirely the implementor's job.
pub trait BoardHandler<P> {
    /// Called exactly once per accepted drop
    fn on_card_move(&mut self, request: &MoveRequest);

    /// Called on a click that was not part of a drag
    fn on_card_click(&mut self, _card: &Card<P>) {}

    /// Called when a column's "add card" affordance is used
    fn on_add_card(&mut self, _column: &ColumnId) {}
}

/// Rendered board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView<O> {
    pub columns: Vec<ColumnView<O>>,
    pub is_dragging: bool,
}

/// Kanban board: options plus the drag controller, fed with the caller's
/// columns on every call
#[derive(Debug, Clone, Default)]
pub struct KanbanBoard {
    options: BoardOptions,
    controller: BoardController,
}

impl KanbanBoard {
    pub fn new(options: BoardOptions) -> Self {
        Self {
            options,
            controller: BoardController::new(),
        }
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn controller(&self) -> &BoardController {
        &self.controller
    }

    /// Replaces the options; disabling drag and drop cancels any gesture
    pub fn set_options(&mut self, options: BoardOptions) {
        if !options.allow_drag_and_drop {
            self.controller.end_drag();
        }
        self.options = options;
    }

    /// Pointer picked up `card` in `source` (the `dragstart` event)
    pub fn drag_start(&mut self, card: CardId, source: ColumnId) {
        if self.options.allow_drag_and_drop {
            self.controller.start_drag(card, source);
        }
    }

    /// Pointer moved over `column` during a drag (the `dragover` event)
    pub fn drag_over(&mut self, column: ColumnId) {
        if self.options.allow_drag_and_drop {
            self.controller.set_drop_candidate(column);
        }
    }

    /// Pointer left a column without entering another (the `dragleave` event)
    pub fn drag_leave(&mut self) {
        self.controller.clear_drop_candidate();
    }

    /// Gesture cancelled or released outside any column (the `dragend` event)
    pub fn drag_end(&mut self) {
        self.controller.end_drag();
    }

    /// Completes a drag over `target`, forwarding an accepted move to `handler`
    pub fn drop<P, H>(
        &mut self,
        columns: &[Column<P>],
        target: &ColumnId,
        handler: &mut H,
    ) -> DropOutcome
    where
        H: BoardHandler<P> + ?Sized,
    {
        if !self.options.allow_drag_and_drop {
            self.controller.end_drag();
            return DropOutcome::Ignored(IgnoreReason::Disabled);
        }
        self.controller
            .drop_card(columns, target, |request| handler.on_card_move(request))
    }

    pub fn click_card<P, H>(&mut self, card: &Card<P>, handler: &mut H)
    where
        H: BoardHandler<P> + ?Sized,
    {
        if self.controller.is_dragging() {
            debug!(card = %card.id, "click ignored during drag");
            return;
        }
        handler.on_card_click(card);
    }

    /// Uses a column's add affordance; returns whether the handler was called
    pub fn add_card<P, H>(
        &mut self,
        columns: &[Column<P>],
        column: &ColumnId,
        handler: &mut H,
    ) -> bool
    where
        H: BoardHandler<P> + ?Sized,
    {
        if !self.options.show_add_card {
            return false;
        }
        match find_column(columns, column) {
            Some(col) if !col.is_full() => {
                handler.on_add_card(column);
                true
            }
            Some(_) => {
                debug!(column = %column, "add card suppressed on full column");
                false
            }
            None => false,
        }
    }

    pub fn render<P, R>(&self, columns: &[Column<P>], renderer: &R) -> BoardView<R::Output>
    where
        R: CardRenderer<P>,
    {
        let ctx = ColumnRenderContext {
            controller: &self.controller,
            allow_drag_and_drop: self.options.allow_drag_and_drop,
            show_add_card: self.options.show_add_card,
            empty_message: self
                .options
                .empty_column_message
                .as_deref()
                .unwrap_or(DEFAULT_EMPTY_MESSAGE),
        };

        BoardView {
            columns: columns
                .iter()
                .map(|column| render_column(column, renderer, &ctx))
                .collect(),
            is_dragging: self.controller.is_dragging(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::column::apply_move;
    use crate::drag::{DragState, DropRejection};
    use crate::render::DefaultCardRenderer;

    #[derive(Default)]
    struct Recorder {
        moves: Vec<MoveRequest>,
        clicks: Vec<CardId>,
        adds: Vec<ColumnId>,
    }

    impl<P> BoardHandler<P> for Recorder {
        fn on_card_move(&mut self, request: &MoveRequest) {
            self.moves.push(request.clone());
        }

        fn on_card_click(&mut self, card: &Card<P>) {
            self.clicks.push(card.id.clone());
        }

        fn on_add_card(&mut self, column: &ColumnId) {
            self.adds.push(column.clone());
        }
    }

    fn col(id: &str) -> ColumnId {
        ColumnId::new(id)
    }

    fn columns(b_cards: Vec<Card>) -> Vec<Column> {
        vec![
            Column::new(col("a"), "A").with_cards(vec![Card::new(CardId::from(1), "Lead 1")]),
            Column::new(col("b"), "B")
                .with_max_cards(1)
                .with_cards(b_cards),
        ]
    }

    #[test]
    fn test_drag_into_column_with_room() {
        let columns = columns(vec![]);
        let mut board = KanbanBoard::default();
        let mut handler = Recorder::default();

        board.drag_start(CardId::from(1), col("a"));
        board.drag_over(col("b"));
        let outcome = board.drop(&columns, &col("b"), &mut handler);

        assert!(outcome.is_moved());
        assert_eq!(
            handler.moves,
            vec![MoveRequest {
                card: CardId::from(1),
                source: col("a"),
                target: col("b"),
            }]
        );
        assert_eq!(board.controller().state(), &DragState::Idle);
    }

    #[test]
    fn test_drag_into_full_column() {
        let columns = columns(vec![Card::new(CardId::from(2), "Lead 2")]);
        let mut board = KanbanBoard::default();
        let mut handler = Recorder::default();

        board.drag_start(CardId::from(1), col("a"));
        board.drag_over(col("b"));
        let outcome = board.drop(&columns, &col("b"), &mut handler);

        assert!(matches!(
            outcome,
            DropOutcome::Rejected(DropRejection::ColumnFull { .. })
        ));
        assert!(handler.moves.is_empty());
        assert_eq!(board.controller().state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_back_on_source() {
        let columns = columns(vec![]);
        let mut board = KanbanBoard::default();
        let mut handler = Recorder::default();

        board.drag_start(CardId::from(1), col("a"));
        board.drop(&columns, &col("a"), &mut handler);

        assert!(handler.moves.is_empty());
        assert_eq!(board.controller().state(), &DragState::Idle);
    }

    #[test]
    fn test_cancelled_drag() {
        let mut board = KanbanBoard::default();

        board.drag_start(CardId::from(1), col("a"));
        board.drag_over(col("b"));
        board.drag_leave();
        assert!(board.controller().is_dragging());
        assert!(board.controller().drop_candidate().is_none());

        board.drag_end();
        assert_eq!(board.controller().state(), &DragState::Idle);
    }

    #[test]
    fn test_disabled_drag_and_drop_ignores_gestures_but_allows_clicks() {
        let columns = columns(vec![]);
        let mut board = KanbanBoard::new(BoardOptions {
            allow_drag_and_drop: false,
            ..BoardOptions::default()
        });
        let mut handler = Recorder::default();

        board.drag_start(CardId::from(1), col("a"));
        assert!(!board.controller().is_dragging());

        let outcome = board.drop(&columns, &col("b"), &mut handler);
        assert_eq!(outcome, DropOutcome::Ignored(IgnoreReason::Disabled));
        assert!(handler.moves.is_empty());

        board.click_card(&columns[0].cards[0], &mut handler);
        assert_eq!(handler.clicks, vec![CardId::from(1)]);

        let view = board.render(&columns, &DefaultCardRenderer::new());
        assert!(!view.columns[0].cards[0].draggable);
    }

    #[test]
    fn test_hover_ignored_while_disabled() {
        let mut board = KanbanBoard::default();
        board.drag_start(CardId::from(1), col("a"));

        board.set_options(BoardOptions {
            allow_drag_and_drop: false,
            ..BoardOptions::default()
        });
        board.drag_over(col("b"));

        assert_eq!(board.controller().state(), &DragState::Idle);
        assert!(board.controller().drop_candidate().is_none());

        let view = board.render(&columns(vec![]), &DefaultCardRenderer::new());
        assert!(!view.columns[1].is_drop_candidate);
    }

    #[test]
    fn test_disabling_mid_drag_cancels_gesture() {
        let mut board = KanbanBoard::default();
        board.drag_start(CardId::from(1), col("a"));

        board.set_options(BoardOptions {
            allow_drag_and_drop: false,
            ..BoardOptions::default()
        });

        assert!(!board.controller().is_dragging());
    }

    #[test]
    fn test_click_during_drag_is_ignored() {
        let columns = columns(vec![]);
        let mut board = KanbanBoard::default();
        let mut handler = Recorder::default();

        board.drag_start(CardId::from(1), col("a"));
        board.click_card(&columns[0].cards[0], &mut handler);

        assert!(handler.clicks.is_empty());
    }

    #[test]
    fn test_add_card_respects_capacity_and_options() {
        let columns = columns(vec![Card::new(CardId::from(2), "Lead 2")]);
        let mut handler = Recorder::default();

        let mut board = KanbanBoard::default();
        assert!(!board.add_card(&columns, &col("a"), &mut handler));

        board.set_options(BoardOptions {
            show_add_card: true,
            ..BoardOptions::default()
        });
        assert!(board.add_card(&columns, &col("a"), &mut handler));
        assert!(!board.add_card(&columns, &col("b"), &mut handler));
        assert!(!board.add_card(&columns, &col("missing"), &mut handler));

        assert_eq!(handler.adds, vec![col("a")]);
    }

    #[test]
    fn test_render_uses_custom_empty_message() {
        let columns = columns(vec![]);
        let board = KanbanBoard::new(BoardOptions {
            empty_column_message: Some("No leads in this stage".to_string()),
            ..BoardOptions::default()
        });

        let view = board.render(&columns, &DefaultCardRenderer::new());

        assert!(view.columns[0].empty_message.is_none());
        assert_eq!(
            view.columns[1].empty_message.as_deref(),
            Some("No leads in this stage")
        );
        assert!(!view.is_dragging);
    }

    #[test]
    fn test_caller_applies_move_and_rerenders() {
        let mut columns = columns(vec![]);
        let mut board = KanbanBoard::default();
        let mut handler = Recorder::default();

        board.drag_start(CardId::from(1), col("a"));
        board.drop(&columns, &col("b"), &mut handler);
        for request in &handler.moves {
            apply_move(&mut columns, request).unwrap();
        }

        let view = board.render(&columns, &DefaultCardRenderer::new());
        assert_eq!(view.columns[0].card_count, 0);
        assert_eq!(view.columns[1].count_label(), "1/1");
        assert!(view.columns[1].is_full);

        board.drag_start(CardId::from(1), col("b"));
        let outcome = board.drop(&columns, &col("a"), &mut handler);
        assert!(outcome.is_moved());
        assert_eq!(handler.moves.len(), 2);
    }
}
