use crate::domain::card::{Card, Priority};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Composable card filter used by board and table views
///
/// Every criterion that is set must match; an empty filter matches every
/// card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    query: Option<String>,
    priorities: BTreeSet<Priority>,
    tag: Option<String>,
    assignee: Option<String>,
    due_before: Option<DateTime<Utc>>,
}

impl CardFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free text matched case-insensitively against title, description and tags
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into().trim().to_lowercase();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Adds an accepted priority; cards without a priority never match once set
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priorities.insert(priority);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn due_before(mut self, due: DateTime<Utc>) -> Self {
        self.due_before = Some(due);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches<P>(&self, card: &Card<P>) -> bool {
        self.matches_query(card)
            && self.matches_priority(card)
            && self.matches_tag(card)
            && self.matches_assignee(card)
            && self.matches_due(card)
    }

    fn matches_query<P>(&self, card: &Card<P>) -> bool {
        let Some(query) = &self.query else {
            return true;
        };

        let title_matches = card.title.to_lowercase().contains(query);
        let description_matches = card
            .description
            .as_ref()
            .map(|d| d.to_lowercase().contains(query))
            .unwrap_or(false);
        let tag_matches = card
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(query));

        title_matches || description_matches || tag_matches
    }

    fn matches_priority<P>(&self, card: &Card<P>) -> bool {
        self.priorities.is_empty()
            || card
                .priority
                .map(|p| self.priorities.contains(&p))
                .unwrap_or(false)
    }

    fn matches_tag<P>(&self, card: &Card<P>) -> bool {
        self.tag.as_deref().map(|t| card.has_tag(t)).unwrap_or(true)
    }

    fn matches_assignee<P>(&self, card: &Card<P>) -> bool {
        match (&self.assignee, &card.assignee) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted.to_lowercase() == actual.to_lowercase(),
            (Some(_), None) => false,
        }
    }

    fn matches_due<P>(&self, card: &Card<P>) -> bool {
        match (self.due_before, card.due_date) {
            (None, _) => true,
            (Some(limit), Some(due)) => due < limit,
            (Some(_), None) => false,
        }
    }
}

/// Returns the cards matching `filter`, preserving their order
pub fn filter_cards<'a, P>(cards: &'a [Card<P>], filter: &CardFilter) -> Vec<&'a Card<P>> {
    cards.iter().filter(|card| filter.matches(*card)).collect()
}
