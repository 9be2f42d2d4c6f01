//! Response shapes handed to transport layers. Field names match the JSON
//! the web front end consumes.

use serde::Deserialize;
use serde::Serialize;

/// First round of a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartView {
    pub items: Vec<String>,
}

/// Answer to a selection. `items` is empty once the space is used up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionsView {
    pub items: Vec<String>,
    pub excluded: Vec<String>,
}

impl SuggestionsView {
    pub fn is_exhausted(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoView {
    /// Empty when no selection is left.
    pub current_item: String,
    pub items: Vec<String>,
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoneView {
    pub start_items: Vec<String>,
    pub iterations: usize,
    pub sequence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn undo_view_uses_camel_case() {
        let view = UndoView {
            current_item: "fever".into(),
            items: vec!["cough".into()],
            excluded: vec!["cough".into(), "fever".into()],
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"currentItem": "fever", "items": ["cough"], "excluded": ["cough", "fever"]})
        );
    }

    #[test]
    fn done_view_keeps_snake_case() {
        let view = DoneView {
            start_items: vec!["a".into()],
            iterations: 1,
            sequence: vec!["b".into()],
        };
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({"start_items": ["a"], "iterations": 1, "sequence": ["b"]})
        );
    }
}
