//! Two-component PCA of an embedding space.

use std::collections::HashMap;

use lexapprox_core::EmbeddingSpace;
use tracing::debug;

use crate::error::PlotError;
use crate::error::Result;

const MAX_ITERATIONS: usize = 200;
const TOLERANCE: f64 = 1e-9;

/// Every item of a space placed on the plane spanned by its first two
/// principal components.
#[derive(Debug, Clone)]
pub struct SpaceProjection {
    items: Vec<String>,
    points: Vec<(f32, f32)>,
    index: HashMap<String, usize>,
}

impl SpaceProjection {
    pub fn fit(space: &EmbeddingSpace) -> Result<Self> {
        if space.is_empty() {
            return Err(PlotError::Empty("cannot project an empty space".into()));
        }
        let dimension = space.dimension();
        let rows: Vec<&[f32]> = space.entries().map(|(_, v)| v).collect();

        let mut mean = vec![0f64; dimension];
        for row in &rows {
            for (m, x) in mean.iter_mut().zip(row.iter()) {
                *m += f64::from(*x);
            }
        }
        let n = rows.len() as f64;
        mean.iter_mut().for_each(|m| *m /= n);

        let first = principal_axis(&rows, &mean, &[]);
        let second = principal_axis(&rows, &mean, std::slice::from_ref(&first));

        let points: Vec<(f32, f32)> = rows
            .iter()
            .map(|row| {
                (
                    centred_dot(row, &mean, &first) as f32,
                    centred_dot(row, &mean, &second) as f32,
                )
            })
            .collect();
        let items = space.items().to_vec();
        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.clone(), i))
            .collect();
        debug!(items = items.len(), dimension, "fitted space projection");
        Ok(Self {
            items,
            points,
            index,
        })
    }

    pub fn point(&self, item: &str) -> Option<(f32, f32)> {
        self.index.get(item).map(|&i| self.points[i])
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, (f32, f32))> + '_ {
        self.items.iter().map(String::as_str).zip(self.points.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min_x, max_x, min_y, max_y)` over all points.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        self.points.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, f32::INFINITY, f32::NEG_INFINITY),
            |(x0, x1, y0, y1), &(x, y)| (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        )
    }
}

fn centred_dot(row: &[f32], mean: &[f64], axis: &[f64]) -> f64 {
    row.iter()
        .zip(mean)
        .zip(axis)
        .map(|((x, m), a)| (f64::from(*x) - m) * a)
        .sum()
}

fn orthogonalize(v: &mut [f64], against: &[Vec<f64>]) {
    for axis in against {
        let dot: f64 = v.iter().zip(axis).map(|(a, b)| a * b).sum();
        v.iter_mut().zip(axis).for_each(|(x, a)| *x -= dot * a);
    }
}

fn normalize(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    norm
}

/// Leading eigenvector of the covariance matrix restricted to the
/// complement of `found`. Uses `Xᵀ(Xv)` so the D×D matrix is never built.
fn principal_axis(rows: &[&[f32]], mean: &[f64], found: &[Vec<f64>]) -> Vec<f64> {
    let dimension = mean.len();
    let mut v: Vec<f64> = (0..dimension)
        .map(|i| 1.0 + ((i * 7 + found.len() * 3) % 11) as f64 / 10.0)
        .collect();
    orthogonalize(&mut v, found);
    if normalize(&mut v) == 0.0 {
        return v;
    }

    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![0f64; dimension];
        for row in rows {
            let score = centred_dot(row, mean, &v);
            for ((acc, x), m) in next.iter_mut().zip(row.iter()).zip(mean) {
                *acc += score * (f64::from(*x) - m);
            }
        }
        orthogonalize(&mut next, found);
        if normalize(&mut next) == 0.0 {
            // No variance left in this subspace.
            return v;
        }
        let delta: f64 = next.iter().zip(&v).map(|(a, b)| (a - b).abs()).sum();
        v = next;
        if delta < TOLERANCE {
            break;
        }
    }
    v
}
