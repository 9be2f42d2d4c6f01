//! Similarity trajectories computed once the player reveals their target.

use serde::Deserialize;
use serde::Serialize;

use crate::error::EngineError;
use crate::error::Result;
use crate::space::EmbeddingSpace;

/// Per-iteration cosine similarities to the revealed target. All four
/// sequences have one entry per completed iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealAnalytics {
    pub target: String,
    /// Similarity of each selected item.
    pub y_vals_selection: Vec<f32>,
    /// Mean similarity over each offered round.
    pub y_vals_suggestions_avg: Vec<f32>,
    /// Best similarity within each offered round.
    pub y_vals_closest: Vec<f32>,
    /// Item achieving `y_vals_closest` in each round.
    pub most_similar_of_suggested_sequence: Vec<String>,
}

impl RevealAnalytics {
    /// `selections[i]` must be the answer to `rounds[i]`.
    pub fn compute(
        space: &EmbeddingSpace,
        target: &str,
        selections: &[String],
        rounds: &[Vec<String>],
    ) -> Result<Self> {
        if selections.is_empty() {
            return Err(EngineError::precondition(
                "reveal needs at least one completed iteration",
            ));
        }
        if selections.len() != rounds.len() {
            return Err(EngineError::precondition(format!(
                "{} selections do not line up with {} rounds",
                selections.len(),
                rounds.len()
            )));
        }

        let target_index = space.index_of(target)?;
        let similarity_to_target =
            |item: &str| -> Result<f32> { Ok(space.cosine_at(space.index_of(item)?, target_index)) };

        let y_vals_selection = selections
            .iter()
            .map(|item| similarity_to_target(item))
            .collect::<Result<Vec<_>>>()?;

        let mut y_vals_suggestions_avg = Vec::with_capacity(rounds.len());
        let mut y_vals_closest = Vec::with_capacity(rounds.len());
        let mut most_similar = Vec::with_capacity(rounds.len());
        for round in rounds {
            let scores = round
                .iter()
                .map(|item| similarity_to_target(item))
                .collect::<Result<Vec<_>>>()?;
            // First maximum wins on ties.
            let Some((best, best_score)) = scores
                .iter()
                .copied()
                .enumerate()
                .reduce(|best, next| if next.1 > best.1 { next } else { best })
            else {
                return Err(EngineError::precondition("cannot analyse an empty round"));
            };
            y_vals_suggestions_avg.push(scores.iter().sum::<f32>() / scores.len() as f32);
            y_vals_closest.push(best_score);
            most_similar.push(round[best].clone());
        }

        Ok(Self {
            target: target.to_string(),
            y_vals_selection,
            y_vals_suggestions_avg,
            y_vals_closest,
            most_similar_of_suggested_sequence: most_similar,
        })
    }

    pub fn iterations(&self) -> usize {
        self.y_vals_selection.len()
    }

    /// Smallest value across the three series.
    pub fn min_value(&self) -> f32 {
        self.y_vals_selection
            .iter()
            .chain(&self.y_vals_suggestions_avg)
            .chain(&self.y_vals_closest)
            .copied()
            .fold(f32::INFINITY, f32::min)
    }
}
