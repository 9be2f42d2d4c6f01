//! Snapshot of a finished game in the shape written to disk.

use chrono::DateTime;
use chrono::FixedOffset;
use lexapprox_core::RandomSource;
use lexapprox_core::Session;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;

use crate::error::ExportError;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub timestamp: DateTime<FixedOffset>,
    pub target: String,
    /// Last item the player picked before revealing.
    pub selected_item: String,
    pub iterations: usize,
    pub start_items: Vec<String>,
    pub selection_history: Vec<String>,
    pub most_similar_history: Vec<String>,
    pub suggestion_history: Vec<Vec<String>>,
    pub y_vals_selection: Vec<f32>,
    pub y_vals_suggestions_avg: Vec<f32>,
    pub y_vals_closest: Vec<f32>,
}

impl ResultsReport {
    /// Fails with [`ExportError::NotRevealed`] unless the session's target
    /// was revealed.
    pub fn from_session<R: RandomSource>(session: &Session<R>, timestamp: DateTime<FixedOffset>) -> Result<Self> {
        let analytics = session.analytics().ok_or(ExportError::NotRevealed)?;
        let selected_item = session
            .selected_item()
            .unwrap_or(analytics.target.as_str())
            .to_string();
        Ok(Self {
            timestamp,
            target: analytics.target.clone(),
            selected_item,
            iterations: session.iterations(),
            start_items: session.starting_set().map(<[String]>::to_vec).unwrap_or_default(),
            selection_history: session.selection_sequence().to_vec(),
            most_similar_history: analytics.most_similar_of_suggested_sequence.clone(),
            suggestion_history: session.suggestions_sequence().to_vec(),
            y_vals_selection: analytics.y_vals_selection.clone(),
            y_vals_suggestions_avg: analytics.y_vals_suggestions_avg.clone(),
            y_vals_closest: analytics.y_vals_closest.clone(),
        })
    }

    /// `results_YYYY-MM-DD-HH-MM-SS_<selected item>`, with path separators
    /// in the item replaced.
    pub fn directory_name(&self) -> String {
        let item: String = self
            .selected_item
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        format!("results_{}_{item}", self.timestamp.format("%Y-%m-%d-%H-%M-%S"))
    }

    /// Human-readable report, one section per history.
    pub fn to_text(&self) -> String {
        let rounds = self
            .suggestion_history
            .iter()
            .map(|round| quoted_list(round))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "Timestamp: {} h\n\
             Iterations needed: {}\n\
             \n\n\
             ---- Selection history: ----\n\
             {}\n\
             \n\n\
             ---- Most similar of suggested history: ----\n\
             {}\n\
             \n\n\
             ---- Suggestion history: ----\n\
             {}\n\
             \n\n\
             ---- Plot Cosine similarity values: ----\n\
             selected item:\n\
             {}\n\
             \n\
             average of suggested:\n\
             {}\n\
             \n\
             most similar of suggested:\n\
             {}\n",
            self.timestamp.format("%Y-%m-%d, %H:%M:%S"),
            self.iterations,
            quoted_list(&self.selection_history),
            quoted_list(&self.most_similar_history),
            rounds,
            plain_list(&self.y_vals_selection),
            plain_list(&self.y_vals_suggestions_avg),
            plain_list(&self.y_vals_closest),
        )
    }
}

fn quoted_list(items: &[String]) -> String {
    let inner = items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

fn plain_list<T: Display>(values: &[T]) -> String {
    let inner = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}
