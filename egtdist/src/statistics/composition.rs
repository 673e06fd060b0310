use derive_more::{Deref, From, Into, IntoIterator};
use serde::{Deserialize, Serialize};

/// Per-type counts of a population or of a sample drawn from it.
#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Deref,
    From,
    Into,
    IntoIterator,
)]
#[serde(transparent)]
pub struct Composition {
    counts: Vec<u64>,
}

impl Composition {
    pub fn new(counts: impl Into<Vec<u64>>) -> Self {
        Self {
            counts: counts.into(),
        }
    }

    /// Population size, or `None` if the counts overflow `u64`.
    pub fn total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }
}

impl AsRef<[u64]> for Composition {
    fn as_ref(&self) -> &[u64] {
        &self.counts
    }
}

/// Every way of splitting `total` individuals among `parts` types, starting at
/// `[total, 0, .., 0]` and ending at `[0, .., 0, total]` in reverse lexicographic order.
///
/// Yields exactly [`stars_bars(total, parts)`](super::combinatorics::stars_bars) items.
pub fn compositions(total: u64, parts: usize) -> Compositions {
    let first = match parts {
        0 if total == 0 => Some(Vec::new()),
        0 => None,
        _ => {
            let mut counts = vec![0; parts];
            counts[0] = total;
            Some(counts)
        }
    };
    Compositions { next: first }
}

#[derive(Debug, Clone)]
pub struct Compositions {
    next: Option<Vec<u64>>,
}

impl Compositions {
    fn successor(current: &[u64]) -> Option<Vec<u64>> {
        let last = current.len().checked_sub(1)?;
        // rightmost non-final slot that can still give one away
        let pivot = current[..last].iter().rposition(|&count| count > 0)?;

        let mut next = current.to_vec();
        let tail: u64 = next[pivot + 1..].iter().sum();
        next[pivot] -= 1;
        next[pivot + 1] = tail + 1;
        for count in &mut next[pivot + 2..] {
            *count = 0;
        }
        Some(next)
    }
}

impl Iterator for Compositions {
    type Item = Composition;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = Self::successor(&current);
        Some(Composition::new(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arithmetic::Fixed, statistics::combinatorics::stars_bars_with};

    #[test]
    fn test_compositions_order() {
        let all: Vec<Vec<u64>> = compositions(2, 3).map(Into::into).collect();
        assert_eq!(
            all,
            vec![
                vec![2, 0, 0],
                vec![1, 1, 0],
                vec![1, 0, 1],
                vec![0, 2, 0],
                vec![0, 1, 1],
                vec![0, 0, 2],
            ]
        );
    }

    #[test]
    fn test_compositions_count_matches_stars_bars() {
        for total in 0..8u64 {
            for parts in 1..5usize {
                let count = compositions(total, parts).count() as u128;
                assert_eq!(Ok(count), stars_bars_with::<Fixed>(total, parts as u64));
                assert!(compositions(total, parts).all(|c| c.total() == Some(total) && c.len() == parts));
            }
        }
    }

    #[test]
    fn test_compositions_degenerate() {
        assert_eq!(compositions(0, 0).count(), 1);
        assert_eq!(compositions(3, 0).count(), 0);
        let single: Vec<Composition> = compositions(4, 1).collect();
        assert_eq!(single, vec![Composition::new([4])]);
    }

    #[test]
    fn test_composition_serializes_as_list() {
        let composition = Composition::new([3, 2]);
        assert_eq!(serde_json::to_string(&composition).unwrap(), "[3,2]");
        let parsed: Composition = serde_json::from_str("[1,0,4]").unwrap();
        assert_eq!(parsed.as_slice(), &[1, 0, 4]);
        assert_eq!(parsed.total(), Some(5));
    }

    #[test]
    fn test_total_overflow() {
        assert_eq!(Composition::new([u64::MAX, 0]).total(), Some(u64::MAX));
        assert_eq!(Composition::new([u64::MAX, 1]).total(), None);
        assert_eq!(Composition::default().total(), Some(0));
    }
}
