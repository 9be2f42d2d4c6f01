//! Read-only embedding space.
//!
//! # Memory Layout
//!
//! ```text
//! EmbeddingSpace
//! ├── items: Vec<String>          (iteration order of the source file)
//! ├── index: HashMap<String, usize>
//! ├── data:  Vec<f32>             (len × dimension, row-major)
//! └── norms: Vec<f32>             (L2 norm per row, computed once)
//! ```
//!
//! A space is built once, wrapped in an `Arc` and shared by every session
//! that plays on it. Nothing mutates it after construction, so readers never
//! need a lock.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::error::EngineError;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct EmbeddingSpace {
    items: Vec<String>,
    index: HashMap<String, usize>,
    dimension: usize,
    data: Vec<f32>,
    norms: Vec<f32>,
}

impl EmbeddingSpace {
    /// Build a space from `(identifier, vector)` pairs, keeping their order.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let mut items = Vec::new();
        let mut index = HashMap::new();
        let mut data = Vec::new();
        let mut dimension = None;

        for (item, vector) in entries {
            let expected = *dimension.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(EngineError::InvalidSpace(format!(
                    "vector for '{item}' has dimension {}, expected {expected}",
                    vector.len()
                )));
            }
            if vector.iter().any(|v| !v.is_finite()) {
                return Err(EngineError::InvalidSpace(format!(
                    "vector for '{item}' contains non-finite values"
                )));
            }
            if index.insert(item.clone(), items.len()).is_some() {
                return Err(EngineError::InvalidSpace(format!(
                    "duplicate item identifier '{item}'"
                )));
            }
            items.push(item);
            data.extend_from_slice(&vector);
        }

        let dimension = match dimension {
            None => return Err(EngineError::InvalidSpace("space is empty".into())),
            Some(0) => {
                return Err(EngineError::InvalidSpace(
                    "vectors must have at least one dimension".into(),
                ));
            }
            Some(d) => d,
        };

        let norms = data
            .chunks_exact(dimension)
            .map(|row| row.iter().map(|x| x * x).sum::<f32>().sqrt())
            .collect();

        Ok(Self {
            items,
            index,
            dimension,
            data,
            norms,
        })
    }

    /// Load a word2vec text file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let space = Self::parse(BufReader::new(file))?;
        info!(
            path = %path.display(),
            items = space.len(),
            dimension = space.dimension(),
            "loaded embedding space"
        );
        Ok(space)
    }

    /// Parse the word2vec text format: a `<count> <dimension>` header followed
    /// by one `<identifier> <values...>` line per item.
    pub fn parse(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let (count, dimension) = loop {
            match lines.next() {
                None => return Err(EngineError::Parse {
                    line: 1,
                    message: "missing header line".into(),
                }),
                Some((_, line)) if line.as_ref().is_ok_and(|l| l.trim().is_empty()) => {}
                Some((n, line)) => break parse_header(n + 1, &line?)?,
            }
        };

        // The header count is only checked once every line was read.
        let mut entries = Vec::new();
        for (n, line) in lines {
            let line = line?;
            let line_no = n + 1;
            let mut fields = line.split_whitespace();
            let Some(item) = fields.next() else {
                continue;
            };
            let vector = fields
                .map(|field| {
                    field.parse::<f32>().map_err(|e| EngineError::Parse {
                        line: line_no,
                        message: format!("invalid value '{field}': {e}"),
                    })
                })
                .collect::<Result<Vec<f32>>>()?;
            if vector.len() != dimension {
                return Err(EngineError::Parse {
                    line: line_no,
                    message: format!(
                        "expected {dimension} values for '{item}', found {}",
                        vector.len()
                    ),
                });
            }
            entries.push((item.to_string(), vector));
        }

        if entries.len() != count {
            return Err(EngineError::Parse {
                line: 1,
                message: format!("header declares {count} items, file contains {}", entries.len()),
            });
        }

        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Identifiers in iteration order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.index.contains_key(item)
    }

    pub fn index_of(&self, item: &str) -> Result<usize> {
        self.index
            .get(item)
            .copied()
            .ok_or_else(|| EngineError::NotFound(item.to_string()))
    }

    pub fn vector(&self, item: &str) -> Result<&[f32]> {
        self.index_of(item).map(|i| self.row(i))
    }

    /// `(identifier, vector)` pairs in iteration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.as_str(), self.row(i)))
    }

    pub(crate) fn row(&self, index: usize) -> &[f32] {
        let start = index * self.dimension;
        &self.data[start..start + self.dimension]
    }

    pub(crate) fn norm(&self, index: usize) -> f32 {
        self.norms[index]
    }

    /// Cosine similarity between two rows. Zero vectors are treated as
    /// orthogonal to everything.
    pub(crate) fn cosine_at(&self, a: usize, b: usize) -> f32 {
        let denom = self.norms[a] * self.norms[b];
        if denom == 0.0 {
            return 0.0;
        }
        let dot: f32 = self
            .row(a)
            .iter()
            .zip(self.row(b))
            .map(|(x, y)| x * y)
            .sum();
        dot / denom
    }

    /// Cosine similarity between two named items.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        Ok(self.cosine_at(self.index_of(a)?, self.index_of(b)?))
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize)> {
    let bad_header = || EngineError::Parse {
        line: line_no,
        message: format!("expected '<item_count> <dimension>', found '{line}'"),
    };
    let mut fields = line.split_whitespace();
    let count = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(bad_header)?;
    let dimension = fields
        .next()
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(bad_header)?;
    if fields.next().is_some() {
        return Err(bad_header());
    }
    Ok((count, dimension))
}

/// Human-readable form of an identifier; the artifact stores spaces as `_`.
pub fn display_label(item: &str) -> String {
    item.replace('_', " ")
}
