//! One game: starting set, rounds of suggestions, undo and reveal.
//!
//! The session is an explicit state machine:
//!
//! ```text
//!  Uninitialized ──start_items──▶ AwaitingSelection ◀──suggest──┐
//!                                   │    ▲                      │
//!                              select    undo                   │
//!                                   ▼    │                      │
//!                                 AwaitingSuggestion ───────────┘
//!
//!  AwaitingSelection | AwaitingSuggestion ──reveal──▶ Revealed
//! ```
//!
//! `suggestions_sequence` is one round ahead of `selection_sequence` while
//! awaiting a selection and level with it while awaiting a suggestion.
//! Every item ever offered stays excluded until its round is undone.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::debug;

use crate::analytics::RevealAnalytics;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::error::Result;
use crate::random::RandomSource;
use crate::ranking::rank_by_similarity;
use crate::space::EmbeddingSpace;
use crate::views::DoneView;
use crate::views::SuggestionsView;
use crate::views::UndoView;

/// Smallest space the starting-set slicing works on.
pub const MIN_SPACE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionPhase {
    /// No round has been offered yet.
    Uninitialized,
    /// A round is on screen and waits for the player's pick.
    AwaitingSelection,
    /// A pick was recorded; the next round has not been generated.
    AwaitingSuggestion,
    /// The target was revealed and analytics are final.
    Revealed,
}

impl SessionPhase {
    pub const fn name(&self) -> &'static str {
        match self {
            SessionPhase::Uninitialized => "Uninitialized",
            SessionPhase::AwaitingSelection => "AwaitingSelection",
            SessionPhase::AwaitingSuggestion => "AwaitingSuggestion",
            SessionPhase::Revealed => "Revealed",
        }
    }
}

#[derive(Debug)]
pub struct Session<R = StdRng> {
    space: Arc<EmbeddingSpace>,
    config: EngineConfig,
    rng: R,
    phase: SessionPhase,
    starting_set: Vec<String>,
    selected_item: Option<String>,
    selection_sequence: Vec<String>,
    suggestions_sequence: Vec<Vec<String>>,
    analytics: Option<RevealAnalytics>,
}

impl Session<StdRng> {
    /// Session drawing from an OS-seeded generator.
    pub fn from_os_rng(space: Arc<EmbeddingSpace>, config: EngineConfig) -> Self {
        Self::with_config(space, StdRng::from_os_rng(), config)
    }

    /// Reproducible session.
    pub fn seeded(space: Arc<EmbeddingSpace>, config: EngineConfig, seed: u64) -> Self {
        Self::with_config(space, StdRng::seed_from_u64(seed), config)
    }
}

impl<R: RandomSource> Session<R> {
    pub fn new(space: Arc<EmbeddingSpace>, rng: R) -> Self {
        Self::with_config(space, rng, EngineConfig::default())
    }

    pub fn with_config(space: Arc<EmbeddingSpace>, rng: R, config: EngineConfig) -> Self {
        Self {
            space,
            config,
            rng,
            phase: SessionPhase::Uninitialized,
            starting_set: Vec::new(),
            selected_item: None,
            selection_sequence: Vec::new(),
            suggestions_sequence: Vec::new(),
            analytics: None,
        }
    }

    /// The opening round. Computed on the first call, returned unchanged
    /// afterwards.
    pub fn start_items(&mut self) -> Result<&[String]> {
        if self.phase == SessionPhase::Uninitialized {
            self.config.validate()?;
            let round = starting_round(&self.space, &self.config, &mut self.rng)?;
            debug!(items = ?round, "starting set computed");
            self.suggestions_sequence.push(round.clone());
            self.starting_set = round;
            self.phase = SessionPhase::AwaitingSelection;
        }
        Ok(&self.starting_set)
    }

    /// Record the player's pick for the current round. The item is not
    /// checked against the space here; an unknown item surfaces as
    /// `NotFound` from the following [`Session::suggest`].
    pub fn select(&mut self, item: impl Into<String>) -> Result<()> {
        match self.phase {
            SessionPhase::AwaitingSelection => {
                let item = item.into();
                debug!(item = %item, iteration = self.selection_sequence.len() + 1, "item selected");
                self.selection_sequence.push(item.clone());
                self.selected_item = Some(item);
                self.phase = SessionPhase::AwaitingSuggestion;
                Ok(())
            }
            SessionPhase::Uninitialized => Err(EngineError::precondition(
                "no round has been offered yet; request the start items first",
            )),
            SessionPhase::AwaitingSuggestion => Err(EngineError::precondition(
                "a selection is already pending; request suggestions or undo first",
            )),
            SessionPhase::Revealed => Err(closed()),
        }
    }

    /// Offer the next round for the pending selection.
    ///
    /// Returns `Ok(None)` when no selection is pending. When fewer than a
    /// round's worth of items remain the error is
    /// [`EngineError::InsufficientCandidates`] and the session is unchanged.
    pub fn suggest(&mut self) -> Result<Option<&[String]>> {
        match self.phase {
            SessionPhase::AwaitingSuggestion => {}
            SessionPhase::Uninitialized | SessionPhase::AwaitingSelection => return Ok(None),
            SessionPhase::Revealed => return Err(closed()),
        }
        let Some(selected) = self.selected_item.as_deref() else {
            return Ok(None);
        };

        let round = {
            let excluded = excluded_set(&self.suggestions_sequence);
            next_round(&self.space, &self.config, &mut self.rng, selected, &excluded)?
        };
        debug!(selected, items = ?round, "round suggested");
        self.suggestions_sequence.push(round);
        self.phase = SessionPhase::AwaitingSelection;
        Ok(self.suggestions_sequence.last().map(Vec::as_slice))
    }

    /// Select `item` and suggest the next round in one step. Running out of
    /// items yields an empty `items` list rather than an error.
    pub fn select_and_suggest(&mut self, item: impl Into<String>) -> Result<SuggestionsView> {
        self.select(item)?;
        let items = match self.suggest() {
            Ok(round) => round.map(<[String]>::to_vec).unwrap_or_default(),
            Err(err) if err.is_end_of_content() => {
                debug!(error = %err, "space exhausted");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        Ok(SuggestionsView {
            items,
            excluded: self.excluded_list(),
        })
    }

    /// Take back the most recent selection.
    ///
    /// If the selection was already answered with a round, that round is
    /// discarded too and the previous round is current again. If it was not
    /// answered (the space ran out, or suggest failed) only the selection
    /// goes and its round is current again.
    pub fn undo(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Revealed => return Err(closed()),
            SessionPhase::Uninitialized => return Err(EngineError::EmptyHistory),
            SessionPhase::AwaitingSelection | SessionPhase::AwaitingSuggestion => {}
        }
        if self.selection_sequence.is_empty() {
            return Err(EngineError::EmptyHistory);
        }

        if self.phase == SessionPhase::AwaitingSelection {
            self.suggestions_sequence.pop();
        }
        let undone = self.selection_sequence.pop();
        self.selected_item = self.selection_sequence.last().cloned();
        self.phase = SessionPhase::AwaitingSelection;
        debug!(undone = ?undone, current = ?self.selected_item, "undo");
        Ok(())
    }

    pub fn undo_view(&mut self) -> Result<UndoView> {
        self.undo()?;
        Ok(UndoView {
            current_item: self.selected_item.clone().unwrap_or_default(),
            items: self.current_round().map(<[String]>::to_vec).unwrap_or_default(),
            excluded: self.excluded_list(),
        })
    }

    /// Close the game with the player's true target and compute the
    /// similarity trajectories. A trailing round that was never answered is
    /// dropped first.
    pub fn reveal(&mut self, target: &str) -> Result<&RevealAnalytics> {
        match self.phase {
            SessionPhase::Revealed => {
                return Err(EngineError::precondition("the target was already revealed"));
            }
            SessionPhase::Uninitialized => {
                return Err(EngineError::precondition(
                    "reveal needs at least one completed iteration",
                ));
            }
            SessionPhase::AwaitingSelection | SessionPhase::AwaitingSuggestion => {}
        }

        let answered = self.selection_sequence.len();
        let analytics = RevealAnalytics::compute(
            &self.space,
            target,
            &self.selection_sequence,
            &self.suggestions_sequence[..answered.min(self.suggestions_sequence.len())],
        )?;

        self.suggestions_sequence.truncate(answered);
        self.phase = SessionPhase::Revealed;
        debug!(target, iterations = answered, "target revealed");
        Ok(self.analytics.insert(analytics))
    }

    pub fn done_view(&self) -> DoneView {
        DoneView {
            start_items: self.starting_set.clone(),
            iterations: self.iterations(),
            sequence: self.selection_sequence.clone(),
        }
    }

    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn space(&self) -> &Arc<EmbeddingSpace> {
        &self.space
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `None` until the start items were requested.
    pub fn starting_set(&self) -> Option<&[String]> {
        match self.phase {
            SessionPhase::Uninitialized => None,
            _ => Some(&self.starting_set),
        }
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.selected_item.as_deref()
    }

    pub fn selection_sequence(&self) -> &[String] {
        &self.selection_sequence
    }

    pub fn suggestions_sequence(&self) -> &[Vec<String>] {
        &self.suggestions_sequence
    }

    /// Most recently offered round.
    pub fn current_round(&self) -> Option<&[String]> {
        self.suggestions_sequence.last().map(Vec::as_slice)
    }

    /// Number of selections made.
    pub fn iterations(&self) -> usize {
        self.selection_sequence.len()
    }

    /// Every item offered in a round that is still part of the history.
    pub fn excluded_items(&self) -> BTreeSet<&str> {
        self.suggestions_sequence
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn analytics(&self) -> Option<&RevealAnalytics> {
        self.analytics.as_ref()
    }

    fn excluded_list(&self) -> Vec<String> {
        self.excluded_items()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn closed() -> EngineError {
    EngineError::precondition("the game is over; the target was already revealed")
}

fn excluded_set(rounds: &[Vec<String>]) -> HashSet<&str> {
    rounds.iter().flatten().map(String::as_str).collect()
}

/// Chain from a random item through the `start_percentile` slice of each
/// ranking: every next item is moderately related to the previous one.
fn starting_round(
    space: &EmbeddingSpace,
    config: &EngineConfig,
    rng: &mut impl RandomSource,
) -> Result<Vec<String>> {
    let size = space.len();
    if size < MIN_SPACE_SIZE {
        return Err(EngineError::precondition(format!(
            "starting set needs at least {MIN_SPACE_SIZE} items, space has {size}"
        )));
    }

    let width = size / 100;
    // width·p − width/2, truncated.
    let offset = width * (2 * config.start_percentile - 1) / 2;

    let first = rng.pick(size);
    let mut round = vec![space.items()[first].clone()];
    while round.len() < config.round_size() {
        let picked = {
            let excluded: HashSet<&str> = round.iter().map(String::as_str).collect();
            let last = round[round.len() - 1].as_str();
            let ranked = rank_by_similarity(space, last, &excluded)?;
            let slice = ranked
                .get(offset..offset + width)
                .filter(|slice| !slice.is_empty())
                .ok_or_else(|| {
                    EngineError::precondition(format!(
                        "space of {size} items is too small for a starting set of {}",
                        config.round_size()
                    ))
                })?;
            slice[rng.pick(slice.len())].to_string()
        };
        round.push(picked);
    }
    Ok(round)
}

/// Top `n_similar` neighbours of `selected` followed by `n_dissimilar`
/// decoys drawn from the middle of the ranking.
fn next_round(
    space: &EmbeddingSpace,
    config: &EngineConfig,
    rng: &mut impl RandomSource,
    selected: &str,
    excluded: &HashSet<&str>,
) -> Result<Vec<String>> {
    let ranked = rank_by_similarity(space, selected, excluded)?;
    let required = config.round_size();
    if ranked.len() < required {
        return Err(EngineError::InsufficientCandidates {
            remaining: ranked.len(),
            required,
        });
    }

    let (similar, rest_start) = (&ranked[..config.n_similar], config.n_similar);

    let middle = (ranked.len() / 2).saturating_sub(config.dissimilar_pool / 2);
    // A short ranking would centre the pool on the neighbours; keep the two
    // parts disjoint so a round never repeats an item.
    let pool_start = middle.max(rest_start);
    if pool_start != middle {
        debug!(
            remaining = ranked.len(),
            middle, pool_start, "dissimilar pool shifted past the similar items"
        );
    }
    let pool_end = (pool_start + config.dissimilar_pool).min(ranked.len());
    let pool = &ranked[pool_start..pool_end];
    if pool.len() < config.n_dissimilar {
        return Err(EngineError::InsufficientCandidates {
            remaining: ranked.len(),
            required,
        });
    }

    let mut round: Vec<String> = similar.iter().map(|s| s.to_string()).collect();
    round.extend(
        rng.pick_distinct(pool.len(), config.n_dissimilar)
            .into_iter()
            .map(|i| pool[i].to_string()),
    );
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Items spread over the upper half circle, with a few named anchors.
    fn arc_space(n: usize) -> Arc<EmbeddingSpace> {
        let mut entries = vec![
            ("a".to_string(), vec![1.0, 0.0]),
            ("b".to_string(), vec![0.99, 0.14]),
            ("c".to_string(), vec![0.0, 1.0]),
        ];
        for i in 0..n - 3 {
            let angle = std::f32::consts::PI * (i as f32 + 0.5) / (n - 3) as f32;
            entries.push((format!("item_{i:03}"), vec![angle.cos(), angle.sin()]));
        }
        Arc::new(EmbeddingSpace::from_entries(entries).unwrap())
    }

    fn session(n: usize, seed: u64) -> Session {
        Session::seeded(arc_space(n), EngineConfig::default(), seed)
    }

    #[test]
    fn starts_uninitialized() {
        let s = session(100, 1);
        assert_eq!(s.phase(), SessionPhase::Uninitialized);
        assert_eq!(s.starting_set(), None);
        assert!(s.current_round().is_none());
        assert!(s.excluded_items().is_empty());
    }

    #[test]
    fn starting_set_is_computed_once() {
        let mut s = session(150, 3);
        let first = s.start_items().unwrap().to_vec();
        let second = s.start_items().unwrap().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_eq!(s.suggestions_sequence().len(), 1);
        assert_eq!(s.phase(), SessionPhase::AwaitingSelection);
        assert_eq!(first.iter().collect::<HashSet<_>>().len(), 12);
    }

    #[test]
    fn starting_set_rejects_small_spaces() {
        let mut s = session(99, 1);
        assert!(matches!(s.start_items(), Err(EngineError::Precondition(_))));
        assert_eq!(s.phase(), SessionPhase::Uninitialized);
    }

    #[test]
    fn select_requires_an_offered_round() {
        let mut s = session(100, 1);
        assert!(matches!(s.select("a"), Err(EngineError::Precondition(_))));

        s.start_items().unwrap();
        s.select("a").unwrap();
        assert!(matches!(s.select("b"), Err(EngineError::Precondition(_))));
    }

    #[test]
    fn suggest_without_selection_is_a_no_op() {
        let mut s = session(100, 1);
        assert_eq!(s.suggest().unwrap(), None);
        s.start_items().unwrap();
        assert_eq!(s.suggest().unwrap(), None);
        assert_eq!(s.suggestions_sequence().len(), 1);
    }

    #[test]
    fn round_has_similar_items_first() {
        let mut s = session(100, 5);
        s.start_items().unwrap();
        s.select("a").unwrap();
        let excluded_before: HashSet<String> =
            s.excluded_items().into_iter().map(str::to_string).collect();
        let round = s.suggest().unwrap().unwrap().to_vec();

        assert_eq!(round.len(), 12);
        assert!(!round.contains(&"a".to_string()));
        assert_eq!(round.iter().collect::<HashSet<_>>().len(), 12);
        assert!(round.iter().all(|item| !excluded_before.contains(item)));

        let expected_top: Vec<String> = {
            let excluded: HashSet<&str> = excluded_before.iter().map(String::as_str).collect();
            rank_by_similarity(s.space(), "a", &excluded).unwrap()[..10]
                .iter()
                .map(|x| x.to_string())
                .collect()
        };
        assert_eq!(round[..10].to_vec(), expected_top);
    }

    /// Select "a", suggest, and return the ranking the round was built from
    /// together with the round.
    fn round_and_ranking(s: &mut Session) -> (Vec<String>, Vec<String>) {
        s.start_items().unwrap();
        s.select("a").unwrap();
        let excluded_before: HashSet<String> =
            s.excluded_items().into_iter().map(str::to_string).collect();
        let round = s.suggest().unwrap().unwrap().to_vec();
        let excluded: HashSet<&str> = excluded_before.iter().map(String::as_str).collect();
        let ranked = rank_by_similarity(s.space(), "a", &excluded)
            .unwrap()
            .into_iter()
            .map(str::to_string)
            .collect();
        (round, ranked)
    }

    #[test]
    fn decoys_come_from_the_middle_of_the_ranking() {
        for seed in 0..10 {
            let mut s = session(400, seed);
            let (round, ranked) = round_and_ranking(&mut s);
            assert_eq!(round.len(), 12);

            let middle = ranked.len() / 2;
            let pool: HashSet<&String> = ranked[middle - 50..middle + 50].iter().collect();
            assert!(
                round[10..].iter().all(|item| pool.contains(item)),
                "seed {seed}: decoys {:?} outside the middle slice",
                &round[10..]
            );
        }
    }

    #[test]
    fn short_ranking_keeps_decoys_out_of_the_top() {
        for seed in 0..10 {
            // 122 items leave a ranking of 109 or 110 after the start round.
            let mut s = session(122, seed);
            let (round, ranked) = round_and_ranking(&mut s);
            assert!((100..120).contains(&ranked.len()));

            assert_eq!(round.len(), 12);
            assert_eq!(round.iter().collect::<HashSet<_>>().len(), 12);
            assert_eq!(round[..10], ranked[..10]);
            let pool: HashSet<&String> = ranked[10..110.min(ranked.len())].iter().collect();
            assert!(round[10..].iter().all(|item| pool.contains(item)));
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_starting() {
        let config = EngineConfig {
            start_percentile: 0,
            ..EngineConfig::default()
        };
        let mut s = Session::seeded(arc_space(100), config, 1);
        assert!(matches!(s.start_items(), Err(EngineError::Config(_))));
        assert_eq!(s.phase(), SessionPhase::Uninitialized);
    }

    #[test]
    fn start_percentile_limit_on_smallest_space() {
        let with_percentile = |start_percentile| EngineConfig {
            start_percentile,
            ..EngineConfig::default()
        };

        let mut s = Session::seeded(arc_space(100), with_percentile(89), 4);
        assert_eq!(s.start_items().unwrap().len(), 12);

        let mut s = Session::seeded(arc_space(100), with_percentile(90), 4);
        assert!(matches!(s.start_items(), Err(EngineError::Precondition(_))));
    }

    #[test]
    fn unknown_selection_surfaces_not_found_and_can_be_undone() {
        let mut s = session(100, 5);
        s.start_items().unwrap();
        s.select("nonexistent").unwrap();
        assert!(matches!(s.suggest(), Err(EngineError::NotFound(_))));
        assert_eq!(s.phase(), SessionPhase::AwaitingSuggestion);

        s.undo().unwrap();
        assert_eq!(s.phase(), SessionPhase::AwaitingSelection);
        assert_eq!(s.selected_item(), None);
        assert_eq!(s.suggestions_sequence().len(), 1);
    }

    #[test]
    fn undo_restores_previous_state() {
        let mut s = session(120, 9);
        s.start_items().unwrap();
        s.select("a").unwrap();
        s.suggest().unwrap();
        let first_answer = s.current_round().unwrap()[0].clone();

        let selected_before = s.selected_item().map(str::to_string);
        let selections_before = s.selection_sequence().to_vec();
        let rounds_before = s.suggestions_sequence().to_vec();
        let phase_before = s.phase();

        s.select(first_answer).unwrap();
        s.suggest().unwrap();
        s.undo().unwrap();

        assert_eq!(s.selected_item().map(str::to_string), selected_before);
        assert_eq!(s.selection_sequence(), selections_before.as_slice());
        assert_eq!(s.suggestions_sequence(), rounds_before.as_slice());
        assert_eq!(s.phase(), phase_before);
    }

    #[test]
    fn undo_back_to_start_clears_selection() {
        let mut s = session(100, 2);
        let start = s.start_items().unwrap().to_vec();
        s.select(start[0].clone()).unwrap();
        s.suggest().unwrap();

        let view = s.undo_view().unwrap();
        assert_eq!(view.current_item, "");
        assert_eq!(view.items, start);
        assert_eq!(view.excluded.len(), 12);
        assert!(matches!(s.undo(), Err(EngineError::EmptyHistory)));
    }

    #[test]
    fn undo_without_history_is_an_error() {
        let mut s = session(100, 2);
        assert!(matches!(s.undo(), Err(EngineError::EmptyHistory)));
        s.start_items().unwrap();
        assert!(matches!(s.undo(), Err(EngineError::EmptyHistory)));
    }

    #[test]
    fn exhaustion_is_reported_not_fatal() {
        let mut s = session(100, 4);
        s.start_items().unwrap();
        let mut exhausted = false;
        for _ in 0..20 {
            let pick = s.current_round().unwrap()[0].clone();
            let view = s.select_and_suggest(pick).unwrap();
            if view.is_exhausted() {
                exhausted = true;
                break;
            }
        }
        assert!(exhausted);
        assert_eq!(s.phase(), SessionPhase::AwaitingSuggestion);
        // 100 items minus the selected one leave fewer than 12 after 8 rounds.
        assert!(s.excluded_items().len() > 100 - 12);

        let err = s.suggest().unwrap_err();
        assert!(err.is_end_of_content());

        // Undo takes back the unanswered pick; its round is current again.
        let rounds = s.suggestions_sequence().len();
        s.undo().unwrap();
        assert_eq!(s.suggestions_sequence().len(), rounds);
        assert_eq!(s.phase(), SessionPhase::AwaitingSelection);
    }

    #[test]
    fn reveal_drops_trailing_round_and_closes() {
        let mut s = session(100, 8);
        s.start_items().unwrap();
        for _ in 0..3 {
            let pick = s.current_round().unwrap()[1].clone();
            s.select_and_suggest(pick).unwrap();
        }
        assert_eq!(s.suggestions_sequence().len(), 4);

        let analytics = s.reveal("b").unwrap().clone();
        assert_eq!(analytics.iterations(), 3);
        assert_eq!(s.suggestions_sequence().len(), 3);
        assert_eq!(s.phase(), SessionPhase::Revealed);
        for (i, item) in s.selection_sequence().iter().enumerate() {
            assert_eq!(
                analytics.y_vals_selection[i],
                s.space().similarity(item, "b").unwrap()
            );
        }

        assert!(matches!(s.select("a"), Err(EngineError::Precondition(_))));
        assert!(matches!(s.undo(), Err(EngineError::Precondition(_))));
        assert!(matches!(s.reveal("b"), Err(EngineError::Precondition(_))));
        assert_eq!(s.analytics(), Some(&analytics));
    }

    #[test]
    fn reveal_without_iterations_is_rejected() {
        let mut s = session(100, 8);
        assert!(matches!(s.reveal("a"), Err(EngineError::Precondition(_))));
        s.start_items().unwrap();
        assert!(matches!(s.reveal("a"), Err(EngineError::Precondition(_))));
        assert_eq!(s.phase(), SessionPhase::AwaitingSelection);
    }

    #[test]
    fn reveal_with_unknown_target_leaves_session_open() {
        let mut s = session(100, 8);
        s.start_items().unwrap();
        s.select_and_suggest("a").unwrap();
        assert!(matches!(s.reveal("zzz"), Err(EngineError::NotFound(_))));
        assert_eq!(s.phase(), SessionPhase::AwaitingSelection);
        assert_eq!(s.suggestions_sequence().len(), 2);
    }
}
