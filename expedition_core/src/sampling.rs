//! Weighted random sampling over normalized weight vectors
//!
//! Every weighted draw in the engine (rarity, skills, hero classes, level-up
//! attributes, drop pools) goes through the same cumulative-weight procedure:
//! normalize, accumulate, then pick the first index whose cumulative sum is
//! at least a uniform draw in `[0, 1)`.

use rand::Rng;

/// Normalize weights so they sum to 1.
///
/// Negative weights are treated as zero. Returns `None` if nothing is left
/// to draw from.
pub fn normalize(weights: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(weights.iter().map(|w| w.max(0.0) / total).collect())
}

/// Running sum of the given weights
pub fn cumulative(weights: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .scan(0.0, |acc, w| {
            *acc += w;
            Some(*acc)
        })
        .collect()
}

/// Map a draw onto a cumulative array.
///
/// Picks the first index whose cumulative sum is `>= roll`, clamped to the
/// last index so floating error at the top end never escapes the bounds.
/// Zero-weight entries are never chosen unless every weight is zero.
pub fn pick_index(cumulative: &[f64], roll: f64) -> usize {
    let last = cumulative.len().saturating_sub(1);
    let mut previous = 0.0;
    for (i, &sum) in cumulative.iter().enumerate() {
        if sum > previous && sum >= roll {
            return i;
        }
        previous = sum;
    }
    // Clamp past the top, landing on the last entry that carries weight
    cumulative
        .iter()
        .enumerate()
        .rev()
        .find(|(i, sum)| {
            let below = if *i == 0 { 0.0 } else { cumulative[i - 1] };
            **sum > below
        })
        .map(|(i, _)| i)
        .unwrap_or(last)
}

/// Draw one index from raw (unnormalized) weights
pub fn weighted_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let normalized = normalize(weights)?;
    let cumulative = cumulative(&normalized);
    Some(pick_index(&cumulative, rng.gen::<f64>()))
}

/// Draw `count` distinct indices, zeroing each chosen weight and
/// renormalizing before the next draw.
///
/// Stops early when the remaining weight is exhausted.
pub fn draw_without_replacement<R: Rng + ?Sized>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut remaining: Vec<f64> = weights.iter().map(|w| w.max(0.0)).collect();
    let mut chosen = Vec::with_capacity(count);

    for _ in 0..count {
        match weighted_index(&remaining, rng) {
            Some(index) => {
                chosen.push(index);
                remaining[index] = 0.0;
            }
            None => break,
        }
    }

    chosen
}

/// A weighted table of values, drawn with replacement
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T> WeightedTable<T> {
    /// Build a table from (value, weight) pairs. Returns `None` when all
    /// weights are zero.
    pub fn new(pairs: impl IntoIterator<Item = (T, f64)>) -> Option<Self> {
        let (entries, weights): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
        let normalized = normalize(&weights)?;
        Some(WeightedTable {
            entries,
            cumulative: cumulative(&normalized),
        })
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.entries[pick_index(&self.cumulative, rng.gen::<f64>())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
