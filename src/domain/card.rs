use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::KanbanError;

/// Identifier of a card, unique within one board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Wraps an identifier issued by the caller's data store
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random identifier for a card that has no backend ID yet
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for CardId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for CardId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KanbanError::InvalidCardId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a card, ranked from least to most pressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Human readable badge label
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// Icon token shown next to the label
    pub fn icon(self) -> &'static str {
        match self {
            Self::Low => "arrow-down",
            Self::Medium => "minus",
            Self::High => "arrow-up",
            Self::Urgent => "alert-triangle",
        }
    }

    /// Colour token for the badge
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "yellow",
            Self::High => "orange",
            Self::Urgent => "red",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(KanbanError::InvalidPriority(s.to_string())),
        }
    }
}

/// A single draggable work item (a lead, a ticket, ...)
///
/// `P` is the domain object the caller attaches to the card, such as the
/// lead record the card stands for. The board never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card<P = ()> {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub payload: P,
}

impl Card {
    /// Creates a card without a payload
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Card::with_payload(id, title, ())
    }
}

impl<P> Card<P> {
    /// Creates a card carrying a caller payload
    pub fn with_payload(id: CardId, title: impl Into<String>, payload: P) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: None,
            tags: Vec::new(),
            assignee: None,
            due_date: None,
            payload,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn due(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the payload, keeping every display field
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Card<Q> {
        Card {
            id: self.id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            tags: self.tags,
            assignee: self.assignee,
            due_date: self.due_date,
            payload: f(self.payload),
        }
    }

    /// Uppercased first letter of the assignee label
    pub fn assignee_initial(&self) -> Option<char> {
        self.assignee
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .and_then(|c| c.to_uppercase().next())
    }

    /// Whether the due date lies strictly before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.map(|due| due < now).unwrap_or(false)
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_card_id_parsing() {
        let id = CardId::from_str("  lead-42 ").unwrap();
        assert_eq!(id.as_str(), "lead-42");

        assert!(CardId::from_str("").is_err());
        assert!(CardId::from_str("   ").is_err());
    }

    #[test]
    fn test_card_id_from_number() {
        assert_eq!(CardId::from(7).as_str(), "7");
        assert_eq!(CardId::from(7), CardId::new("7"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(CardId::generate(), CardId::generate());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Urgent);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_str("URGENT").unwrap(), Priority::Urgent);
        assert_eq!(Priority::from_str(" low").unwrap(), Priority::Low);
        assert!(Priority::from_str("critical").is_err());
    }

    #[test]
    fn test_priority_badges_are_distinct() {
        let icons: std::collections::HashSet<_> =
            Priority::ALL.iter().map(|p| p.icon()).collect();
        assert_eq!(icons.len(), 4);
        assert_eq!(Priority::Urgent.to_string(), "Urgent");
    }

    #[test]
    fn test_assignee_initial() {
        let card = Card::new(CardId::from(1), "Call parent").assignee("  maria lopez");
        assert_eq!(card.assignee_initial(), Some('M'));

        let card = Card::new(CardId::from(2), "Unassigned");
        assert_eq!(card.assignee_initial(), None);
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let card = Card::new(CardId::from(1), "Follow up").due(now - Duration::days(1));
        assert!(card.is_overdue(now));

        let card = Card::new(CardId::from(2), "Follow up").due(now + Duration::days(1));
        assert!(!card.is_overdue(now));

        let card = Card::new(CardId::from(3), "No due date");
        assert!(!card.is_overdue(now));
    }

    #[test]
    fn test_has_tag_folds_unicode_case() {
        let card = Card::new(CardId::from(1), "Visit").tags(["Élève", "open-day"]);

        assert!(card.has_tag("élève"));
        assert!(card.has_tag("ÉLÈVE"));
        assert!(card.has_tag("OPEN-DAY"));
        assert!(!card.has_tag("eleve"));
    }

    #[test]
    fn test_map_payload_keeps_fields() {
        let card = Card::with_payload(CardId::from(1), "Lead", 10_u32)
            .priority(Priority::High)
            .tags(["open-day"]);
        let mapped = card.map_payload(|n| n * 2);

        assert_eq!(mapped.payload, 20);
        assert_eq!(mapped.priority, Some(Priority::High));
        assert!(mapped.has_tag("Open-Day"));
    }

    #[test]
    fn test_card_serialization_skips_empty_fields() {
        let card = Card::new(CardId::from(1), "Minimal");
        let json = serde_json::to_string(&card).unwrap();

        assert!(!json.contains("description"));
        assert!(!json.contains("tags"));
        assert!(!json.contains("due_date"));

        let restored: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, card);
    }
}
