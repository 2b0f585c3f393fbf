//! Competition ranking of priority scores.

/// Ranks `scores` in descending order using the "min" tie method.
///
/// Tied scores share the lowest rank among them and the next distinct score
/// skips ahead, so `[0.9, 0.9, 0.4]` ranks as `[1, 1, 3]`. The returned
/// ranks are in the same order as `scores`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn competition_ranks(scores: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0u32; scores.len()];
    let mut previous: Option<(f64, u32)> = None;

    for (position, &idx) in order.iter().enumerate() {
        let score = scores[idx];
        let rank = match previous {
            Some((prev_score, prev_rank)) if prev_score == score => prev_rank,
            _ => u32::try_from(position + 1).unwrap_or(u32::MAX),
        };
        ranks[idx] = rank;
        previous = Some((score, rank));
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descending() {
        assert_eq!(competition_ranks(&[0.2, 0.8, 0.5]), vec![3, 1, 2]);
    }

    #[test]
    fn ties_share_lowest_rank() {
        assert_eq!(competition_ranks(&[0.9, 0.4, 0.9]), vec![1, 3, 1]);
    }

    #[test]
    fn tie_in_the_middle_skips_next_rank() {
        assert_eq!(
            competition_ranks(&[0.9, 0.5, 0.5, 0.5, 0.1]),
            vec![1, 2, 2, 2, 5]
        );
    }

    #[test]
    fn all_tied_rank_first() {
        assert_eq!(competition_ranks(&[0.5, 0.5, 0.5]), vec![1, 1, 1]);
    }

    #[test]
    fn empty_scores() {
        assert!(competition_ranks(&[]).is_empty());
    }
}
