use crate::domain::card::{Card, CardId};
use crate::domain::filter::CardFilter;
use crate::domain::layout::ColumnConfig;
use crate::drag::MoveRequest;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::{fmt, str::FromStr};

/// Identifier of a column (a workflow stage such as "contacted")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ColumnId {
    type Err = KanbanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return Err(KanbanError::InvalidColumnId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, optionally capacity-limited bucket of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column<P = ()> {
    pub id: ColumnId,
    pub title: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cards: Option<usize>,
    pub cards: Vec<Card<P>>,
}

impl<P> Column<P> {
    const DEFAULT_COLOR: &'static str = "gray";

    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            color: Self::DEFAULT_COLOR.to_string(),
            max_cards: None,
            cards: Vec::new(),
        }
    }

    /// Builds a column from its stored configuration
    pub fn from_config(config: &ColumnConfig, cards: Vec<Card<P>>) -> Self {
        Self {
            id: config.id.clone(),
            title: config.title.clone(),
            color: config.color.clone(),
            max_cards: config.max_cards,
            cards,
        }
    }

    /// Configuration of this column without its cards
    pub fn config(&self) -> ColumnConfig {
        ColumnConfig {
            id: self.id.clone(),
            title: self.title.clone(),
            color: self.color.clone(),
            max_cards: self.max_cards,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = Some(max_cards);
        self
    }

    pub fn with_cards(mut self, cards: Vec<Card<P>>) -> Self {
        self.cards = cards;
        self
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// A column is full once it holds at least its configured maximum
    pub fn is_full(&self) -> bool {
        self.max_cards
            .map(|max| self.card_count() >= max)
            .unwrap_or(false)
    }

    /// Remaining capacity, `None` when unlimited
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.max_cards
            .map(|max| max.saturating_sub(self.card_count()))
    }

    pub fn contains(&self, card: &CardId) -> bool {
        self.cards.iter().any(|c| &c.id == card)
    }

    pub fn get_card(&self, card: &CardId) -> Option<&Card<P>> {
        self.cards.iter().find(|c| &c.id == card)
    }

    /// Cards matching `filter`, in column order
    pub fn filtered<'a>(&'a self, filter: &'a CardFilter) -> impl Iterator<Item = &'a Card<P>> {
        self.cards.iter().filter(move |card| filter.matches(*card))
    }
}

/// Finds a column by ID
pub fn find_column<'a, P>(columns: &'a [Column<P>], id: &ColumnId) -> Option<&'a Column<P>> {
    columns.iter().find(|col| &col.id == id)
}

/// Finds the column currently holding `card`
pub fn column_of<'a, P>(columns: &'a [Column<P>], card: &CardId) -> Option<&'a Column<P>> {
    columns.iter().find(|col| col.contains(card))
}

/// Checks that column IDs are unique and that no card sits in two columns
///
/// The board assumes both; this is for callers that assemble columns from
/// untrusted data and want to catch mistakes before rendering.
pub fn validate_columns<P>(columns: &[Column<P>]) -> Result<()> {
    let mut column_ids = HashSet::new();
    let mut placement: HashMap<&CardId, &ColumnId> = HashMap::new();

    for column in columns {
        if !column_ids.insert(&column.id) {
            return Err(KanbanError::DuplicateColumn(column.id.to_string()));
        }

        for card in &column.cards {
            if let Some(first) = placement.insert(&card.id, &column.id) {
                return Err(KanbanError::DuplicateCard {
                    card: card.id.to_string(),
                    first: first.to_string(),
                    second: column.id.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Applies an accepted move to a caller-owned set of columns
///
/// The card is removed from the source column and appended to the target.
/// Nothing is changed when either column or the card is missing.
pub fn apply_move<P>(columns: &mut [Column<P>], request: &MoveRequest) -> Result<()> {
    let source_idx = columns
        .iter()
        .position(|col| col.id == request.source)
        .ok_or_else(|| KanbanError::ColumnNotFound(request.source.to_string()))?;
    let target_idx = columns
        .iter()
        .position(|col| col.id == request.target)
        .ok_or_else(|| KanbanError::ColumnNotFound(request.target.to_string()))?;

    let card_idx = columns[source_idx]
        .cards
        .iter()
        .position(|card| card.id == request.card)
        .ok_or_else(|| KanbanError::CardNotFound {
            card: request.card.to_string(),
            column: request.source.to_string(),
        })?;

    if source_idx == target_idx {
        return Ok(());
    }

    let card = columns[source_idx].cards.remove(card_idx);
    columns[target_idx].cards.push(card);
    Ok(())
}
