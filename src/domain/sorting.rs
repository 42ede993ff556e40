use crate::domain::card::{Card, Priority};
use crate::error::KanbanError;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Priority,
    Due,
    Assignee,
    Tags,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Flips the direction, as a table header click does
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl FromStr for SortField {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortField::Title),
            "priority" => Ok(SortField::Priority),
            "due" | "due-date" => Ok(SortField::Due),
            "assignee" => Ok(SortField::Assignee),
            "tags" => Ok(SortField::Tags),
            _ => Err(KanbanError::InvalidSortField(s.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(KanbanError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Sorts cards in place by `field` in the given `order`
///
/// The sort is stable, so cards that compare equal keep their column order.
/// Cards missing the sorted value (no due date, no assignee, no priority)
/// always go last, whichever direction is requested.
///
/// # Examples
/// ```
/// use crm_kanban::domain::sorting::{sort_cards, SortField, SortOrder};
/// use crm_kanban::domain::card::{Card, CardId};
///
/// let mut cards = vec![
///     Card::new(CardId::from(1), "Charlie"),
///     Card::new(CardId::from(2), "alpha"),
/// ];
///
/// sort_cards(&mut cards, SortField::Title, SortOrder::Ascending);
/// assert_eq!(cards[0].title, "alpha");
/// ```
pub fn sort_cards<P>(cards: &mut [Card<P>], field: SortField, order: SortOrder) {
    cards.sort_by(|a, b| match field {
        SortField::Title => directed(a.title.to_lowercase().cmp(&b.title.to_lowercase()), order),
        SortField::Priority => compare_option(a.priority, b.priority, order, compare_priority),
        SortField::Due => compare_option(a.due_date, b.due_date, order, compare_dates),
        SortField::Assignee => compare_option(
            a.assignee.as_deref().map(str::to_lowercase),
            b.assignee.as_deref().map(str::to_lowercase),
            order,
            |x, y| x.cmp(&y),
        ),
        SortField::Tags => directed(a.tags.len().cmp(&b.tags.len()), order),
    });
}

fn directed(cmp: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => cmp,
        SortOrder::Descending => cmp.reverse(),
    }
}

fn compare_priority(a: Priority, b: Priority) -> Ordering {
    a.cmp(&b)
}

fn compare_dates(a: DateTime<Utc>, b: DateTime<Utc>) -> Ordering {
    a.cmp(&b)
}

/// Compare optional values with None always sorting to the end
fn compare_option<T>(
    a: Option<T>,
    b: Option<T>,
    order: SortOrder,
    cmp: impl Fn(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(cmp(a, b), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
