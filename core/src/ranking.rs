//! Similarity ranking, the one primitive every suggestion step is built on.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::error::Result;
use crate::space::EmbeddingSpace;

/// Items of `space` in descending cosine similarity to `query`.
///
/// `query` itself and every member of `excluded` are left out. Equal scores
/// keep the space's iteration order.
pub fn rank_by_similarity<'s>(
    space: &'s EmbeddingSpace,
    query: &str,
    excluded: &HashSet<&str>,
) -> Result<Vec<&'s str>> {
    let query_index = space.index_of(query)?;

    let mut scored: Vec<(usize, f32)> = (0..space.len())
        .into_par_iter()
        .filter(|&i| i != query_index)
        .map(|i| (i, space.cosine_at(query_index, i)))
        .collect();
    scored.retain(|&(i, _)| !excluded.contains(space.items()[i].as_str()));

    // `sort_by` is stable, which keeps ties in iteration order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored
        .into_iter()
        .map(|(i, _)| space.items()[i].as_str())
        .collect())
}
