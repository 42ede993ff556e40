//! Pure projections of columns and cards into view models.
//!
//! A host UI toolkit draws these; nothing here holds state or reacts to
//! events.

use crate::domain::card::{Card, CardId, Priority};
use crate::domain::column::{Column, ColumnId};
use crate::drag::BoardController;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Tags shown on a card before the rest collapse into an overflow count
pub const VISIBLE_TAGS: usize = 2;

/// Placeholder for columns without cards when the host supplies none
pub const DEFAULT_EMPTY_MESSAGE: &str = "No items";

const DUE_DATE_FORMAT: &str = "%b %-d, %Y";

/// Capability to present one card
pub trait CardRenderer<P> {
    type Output;

    fn render_card(&self, card: &Card<P>) -> Self::Output;
}

/// Badge describing a card's priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityBadge {
    pub priority: Priority,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl From<Priority> for PriorityBadge {
    fn from(priority: Priority) -> Self {
        Self {
            priority,
            label: priority.label(),
            icon: priority.icon(),
            color: priority.color(),
        }
    }
}

/// Output of [`DefaultCardRenderer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<PriorityBadge>,
    pub tags: Vec<String>,
    pub hidden_tags: usize,
    pub assignee_initial: Option<char>,
    pub due_label: Option<String>,
    pub overdue: bool,
}

/// Title, description, priority badge, tags, assignee initial and due date
#[derive(Debug, Clone, Copy)]
pub struct DefaultCardRenderer {
    now: DateTime<Utc>,
}

impl DefaultCardRenderer {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Renderer that judges overdue cards against a fixed instant
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for DefaultCardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CardRenderer<P> for DefaultCardRenderer {
    type Output = CardView;

    fn render_card(&self, card: &Card<P>) -> CardView {
        CardView {
            title: card.title.clone(),
            description: card.description.clone(),
            priority: card.priority.map(PriorityBadge::from),
            tags: card.tags.iter().take(VISIBLE_TAGS).cloned().collect(),
            hidden_tags: card.tags.len().saturating_sub(VISIBLE_TAGS),
            assignee_initial: card.assignee_initial(),
            due_label: card
                .due_date
                .map(|due| due.format(DUE_DATE_FORMAT).to_string()),
            overdue: card.is_overdue(self.now),
        }
    }
}

/// Caller-supplied presentation for cards
#[derive(Debug, Clone, Copy)]
pub struct FnCardRenderer<F>(pub F);

impl<P, O, F> CardRenderer<P> for FnCardRenderer<F>
where
    F: Fn(&Card<P>) -> O,
{
    type Output = O;

    fn render_card(&self, card: &Card<P>) -> O {
        (self.0)(card)
    }
}

/// Wraps a closure as a [`CardRenderer`]
pub fn render_with<P, O, F>(f: F) -> FnCardRenderer<F>
where
    F: Fn(&Card<P>) -> O,
{
    FnCardRenderer(f)
}

/// One rendered card plus the drag metadata the board attaches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSlot<O> {
    pub card_id: CardId,
    pub draggable: bool,
    /// Visual feedback only; the card keeps its position
    pub is_dragging: bool,
    pub content: O,
}

/// Rendered column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView<O> {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
    pub card_count: usize,
    pub max_cards: Option<usize>,
    pub is_full: bool,
    pub de_emphasized: bool,
    pub is_drop_candidate: bool,
    pub show_add_card: bool,
    pub empty_message: Option<String>,
    pub cards: Vec<CardSlot<O>>,
}

impl<O> ColumnView<O> {
    /// Header counter, "3" or "3/5" when capped
    pub fn count_label(&self) -> String {
        match self.max_cards {
            Some(max) => format!("{}/{}", self.card_count, max),
            None => self.card_count.to_string(),
        }
    }
}

/// Settings for one column render pass
#[derive(Debug, Clone, Copy)]
pub struct ColumnRenderContext<'a> {
    pub controller: &'a BoardController,
    pub allow_drag_and_drop: bool,
    pub show_add_card: bool,
    pub empty_message: &'a str,
}

pub fn render_column<P, R>(
    column: &Column<P>,
    renderer: &R,
    ctx: &ColumnRenderContext<'_>,
) -> ColumnView<R::Output>
where
    R: CardRenderer<P>,
{
    let is_full = column.is_full();

    let cards = column
        .cards
        .iter()
        .map(|card| CardSlot {
            card_id: card.id.clone(),
            draggable: ctx.allow_drag_and_drop,
            is_dragging: ctx.controller.is_card_dragged(&card.id),
            content: renderer.render_card(card),
        })
        .collect();

    ColumnView {
        id: column.id.clone(),
        title: column.title.clone(),
        color: column.color.clone(),
        card_count: column.card_count(),
        max_cards: column.max_cards,
        is_full,
        de_emphasized: is_full,
        is_drop_candidate: ctx.controller.is_drop_candidate(&column.id),
        show_add_card: ctx.show_add_card && !is_full,
        empty_message: column.is_empty().then(|| ctx.empty_message.to_string()),
        cards,
    }
}
