//! Synthetic embedding spaces for engine tests.

use std::sync::Arc;

use lexapprox_core::EmbeddingSpace;

/// Deterministic pseudo-random value in `[-1, 1)`.
fn next_value(state: &mut u64) -> f32 {
    *state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
    ((*state >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
}

/// `a`, `b` and `c` from the game walkthrough plus `n - 3` filler items of
/// dimension 8 whose first two coordinates dominate.
pub fn walkthrough_space(n: usize) -> Arc<EmbeddingSpace> {
    let mut state = 0x5eed_u64;
    let mut entries = vec![
        ("a".to_string(), padded(&[1.0, 0.0])),
        ("b".to_string(), padded(&[0.99, 0.14])),
        ("c".to_string(), padded(&[0.0, 1.0])),
    ];
    for i in 0..n - 3 {
        let vector = (0..8)
            .map(|d| {
                let v = next_value(&mut state);
                if d < 2 { v } else { v * 0.2 }
            })
            .collect();
        entries.push((format!("filler_{i:04}"), vector));
    }
    Arc::new(EmbeddingSpace::from_entries(entries).unwrap())
}

fn padded(head: &[f32]) -> Vec<f32> {
    let mut v = head.to_vec();
    v.resize(8, 0.0);
    v
}

/// Render a space in the word2vec text format.
pub fn to_word2vec_text(space: &EmbeddingSpace) -> String {
    let mut out = format!("{} {}\n", space.len(), space.dimension());
    for (item, vector) in space.entries() {
        out.push_str(item);
        for v in vector {
            out.push(' ');
            out.push_str(&v.to_string());
        }
        out.push('\n');
    }
    out
}
