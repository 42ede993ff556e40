use crate::domain::card::Card;
use crate::domain::column::{Column, ColumnId};
use serde::{Deserialize, Serialize};

/// Configuration for a kanban board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: ColumnId,
    pub title: String,
    #[serde(default = "ColumnConfig::default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cards: Option<usize>,
}

impl ColumnConfig {
    pub fn new(id: &str, title: &str, color: &str) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.to_string(),
            color: color.to_string(),
            max_cards: None,
        }
    }

    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = Some(max_cards);
        self
    }

    fn default_color() -> String {
        "gray".to_string()
    }
}

/// Behaviour switches the host passes to the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    /// When false every drag entry point is ignored; clicks still work
    pub allow_drag_and_drop: bool,
    /// Whether columns offer an "add card" affordance
    pub show_add_card: bool,
    /// Placeholder shown in columns without cards
    pub empty_column_message: Option<String>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            allow_drag_and_drop: true,
            show_add_card: false,
            empty_column_message: None,
        }
    }
}

/// Persistable board configuration: its columns and options, no cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub name: String,
    pub columns: Vec<ColumnConfig>,
    #[serde(default)]
    pub options: BoardOptions,
}

impl BoardLayout {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnConfig>) -> Self {
        Self {
            name: name.into(),
            columns,
            options: BoardOptions::default(),
        }
    }

    /// Stages of the admissions lead pipeline
    pub fn lead_pipeline() -> Self {
        Self::new(
            "leads",
            vec![
                ColumnConfig::new("new", "New", "blue"),
                ColumnConfig::new("contacted", "Contacted", "indigo"),
                ColumnConfig::new("qualified", "Qualified", "purple"),
                ColumnConfig::new("application", "Application", "amber"),
                ColumnConfig::new("enrolled", "Enrolled", "green"),
                ColumnConfig::new("lost", "Lost", "red"),
            ],
        )
    }

    /// Support ticket queue with a capped in-progress stage
    pub fn ticket_queue() -> Self {
        Self::new(
            "tickets",
            vec![
                ColumnConfig::new("open", "Open", "blue"),
                ColumnConfig::new("in_progress", "In Progress", "amber").with_max_cards(5),
                ColumnConfig::new("waiting", "Waiting on Contact", "purple"),
                ColumnConfig::new("resolved", "Resolved", "green"),
            ],
        )
    }

    pub fn get_column(&self, id: &ColumnId) -> Option<&ColumnConfig> {
        self.columns.iter().find(|col| &col.id == id)
    }

    /// Distributes a flat card list over the layout's columns
    ///
    /// `column_of` names the column each card belongs to. Cards whose column
    /// is unknown to the layout are returned separately, in input order.
    pub fn assemble<P, I, F>(&self, cards: I, column_of: F) -> (Vec<Column<P>>, Vec<Card<P>>)
    where
        I: IntoIterator<Item = Card<P>>,
        F: Fn(&Card<P>) -> Option<ColumnId>,
    {
        let mut columns: Vec<Column<P>> = self
            .columns
            .iter()
            .map(|config| Column::from_config(config, Vec::new()))
            .collect();
        let mut unplaced = Vec::new();

        for card in cards {
            let slot = column_of(&card)
                .and_then(|id| columns.iter().position(|col| col.id == id));
            match slot {
                Some(idx) => columns[idx].cards.push(card),
                None => unplaced.push(card),
            }
        }

        (columns, unplaced)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::lead_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardId;

    #[test]
    fn test_default_layout_is_lead_pipeline() {
        let layout = BoardLayout::default();
        assert_eq!(layout.name, "leads");
        assert_eq!(layout.columns.len(), 6);
        assert!(layout.options.allow_drag_and_drop);
    }

    #[test]
    fn test_ticket_queue_caps_in_progress() {
        let layout = BoardLayout::ticket_queue();
        let column = layout.get_column(&ColumnId::new("in_progress")).unwrap();
        assert_eq!(column.max_cards, Some(5));
    }

    #[test]
    fn test_assemble_places_cards_by_stage() {
        let layout = BoardLayout::lead_pipeline();
        let cards = vec![
            Card::with_payload(CardId::from(1), "Ana", "new"),
            Card::with_payload(CardId::from(2), "Ben", "enrolled"),
            Card::with_payload(CardId::from(3), "Cy", "new"),
            Card::with_payload(CardId::from(4), "Dee", "archived"),
        ];

        let (columns, unplaced) = layout.assemble(cards, |card| Some(ColumnId::new(card.payload)));

        assert_eq!(columns.len(), 6);
        assert_eq!(columns[0].card_count(), 2);
        assert_eq!(columns[0].cards[0].title, "Ana");
        assert_eq!(columns[0].cards[1].title, "Cy");
        assert_eq!(columns[4].card_count(), 1);
        assert_eq!(unplaced.len(), 1);
        assert_eq!(unplaced[0].title, "Dee");
    }

    #[test]
    fn test_layout_deserializes_without_options() {
        let json = r#"{
            "name": "minimal",
            "columns": [{ "id": "todo", "title": "To Do" }]
        }"#;

        let layout: BoardLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.options, BoardOptions::default());
        assert_eq!(layout.columns[0].color, "gray");
        assert_eq!(layout.columns[0].max_cards, None);
    }
}
