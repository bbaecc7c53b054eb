//! Taste similarity between two users over the movies both have rated.
//!
//! ## Coefficient
//!
//! For a co-rated set of `n` movies with paired scores `(x_i, y_i)`:
//!
//! ```text
//! n = 0        → no similarity (neighbor excluded)
//! n = 1        → +1 if x = y or both lie on the same side of the scale
//!                midpoint, otherwise SINGLE_OVERLAP_DISAGREEMENT
//! n ≥ 2        → Pearson ρ = Σ(x-x̄)(y-ȳ) / sqrt(Σ(x-x̄)² · Σ(y-ȳ)²)
//! ```
//!
//! Identical vectors always score exactly `1.0`. When either vector has zero
//! variance and they differ, Pearson is undefined and the coefficient is `0.0`.
//! Every result is clamped to `[-1, 1]`.

use std::cmp::Ordering;

use super::rating_set::Profile;
use super::scale::RatingScale;

/// Similarity assigned to a single-overlap neighbor whose one shared score
/// disagrees with the target's (opposite sides of the midpoint).
///
/// Any non-positive value excludes the neighbor from the weighted average; the
/// constant exists so the policy is named and tunable rather than inlined.
pub const SINGLE_OVERLAP_DISAGREEMENT: f64 = -0.1;

/// Score pairs `(target, neighbor)` for every co-rated movie.
pub type ScorePairs = Vec<(i32, i32)>;

/// Collects the co-rated score pairs of two profiles, ordered by movie ID.
///
/// `exclude_movie` is left out of the co-rated set; the predictor passes the
/// movie being predicted so it never contributes to its own estimate.
pub fn co_rated_pairs(target: &Profile, neighbor: &Profile, exclude_movie: i64) -> ScorePairs {
    let mut shared: Vec<(i64, i32, i32)> = target
        .iter()
        .filter(|(movie_id, _)| **movie_id != exclude_movie)
        .filter_map(|(movie_id, &mine)| {
            neighbor
                .get(movie_id)
                .map(|&theirs| (*movie_id, mine, theirs))
        })
        .collect();

    shared.sort_unstable_by_key(|(movie_id, _, _)| *movie_id);
    shared.into_iter().map(|(_, x, y)| (x, y)).collect()
}

/// Computes user-to-user similarity coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityPolicy {
    scale: RatingScale,
    single_overlap_disagreement: f64,
}

impl SimilarityPolicy {
    /// Creates a policy with an explicit single-overlap disagreement value.
    ///
    /// The value is clamped into `[-1, 0)`; a non-negative value would let a
    /// disagreeing neighbor survive the positivity filter.
    pub fn new(scale: RatingScale, single_overlap_disagreement: f64) -> Self {
        let value = if single_overlap_disagreement.is_finite() && single_overlap_disagreement < 0.0
        {
            single_overlap_disagreement.max(-1.0)
        } else {
            SINGLE_OVERLAP_DISAGREEMENT
        };

        Self {
            scale,
            single_overlap_disagreement: value,
        }
    }

    pub fn scale(&self) -> RatingScale {
        self.scale
    }

    pub fn single_overlap_disagreement(&self) -> f64 {
        self.single_overlap_disagreement
    }

    /// Similarity over co-rated pairs, or `None` when nothing is shared.
    pub fn coefficient(&self, pairs: &[(i32, i32)]) -> Option<f64> {
        let raw = match pairs {
            [] => return None,
            _ if pairs.iter().all(|(x, y)| x == y) => 1.0,
            [(x, y)] => self.single_overlap(*x, *y),
            _ => pearson(pairs),
        };

        Some(raw.clamp(-1.0, 1.0))
    }

    fn single_overlap(&self, x: i32, y: i32) -> f64 {
        let midpoint = self.scale.midpoint();
        let side = |score: i32| f64::from(score).total_cmp(&midpoint);

        if side(x) == side(y) {
            1.0
        } else {
            self.single_overlap_disagreement
        }
    }
}

impl Default for SimilarityPolicy {
    fn default() -> Self {
        Self::new(RatingScale::default(), SINGLE_OVERLAP_DISAGREEMENT)
    }
}

/// Pearson correlation; `0.0` when either side has zero variance.
fn pearson(pairs: &[(i32, i32)]) -> f64 {
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| f64::from(*x)).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| f64::from(*y)).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (x, y) in pairs {
        let dx = f64::from(*x) - mean_x;
        let dy = f64::from(*y) - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    match denominator.partial_cmp(&f64::EPSILON) {
        Some(Ordering::Greater) => cov / denominator,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(entries: &[(i64, i32)]) -> Profile {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_co_rated_pairs_intersects_and_excludes_target_movie() {
        let target = profile(&[(1, 5), (2, 3), (3, 4), (9, 2)]);
        let neighbor = profile(&[(2, 4), (3, 1), (7, 5), (9, 5)]);

        let pairs = co_rated_pairs(&target, &neighbor, 9);

        assert_eq!(pairs, vec![(3, 4), (4, 1)]);
    }

    #[test]
    fn test_empty_co_rated_set_has_no_similarity() {
        let policy = SimilarityPolicy::default();
        assert_eq!(policy.coefficient(&[]), None);
    }

    #[test]
    fn test_identical_vectors_score_exactly_one() {
        let policy = SimilarityPolicy::default();

        assert_eq!(policy.coefficient(&[(4, 4)]), Some(1.0));
        assert_eq!(policy.coefficient(&[(2, 2), (2, 2)]), Some(1.0));
        assert_eq!(policy.coefficient(&[(1, 1), (3, 3), (5, 5)]), Some(1.0));
    }

    #[test]
    fn test_single_overlap_same_side_agrees() {
        let policy = SimilarityPolicy::default();

        assert_eq!(policy.coefficient(&[(4, 5)]), Some(1.0));
        assert_eq!(policy.coefficient(&[(1, 2)]), Some(1.0));
    }

    #[test]
    fn test_single_overlap_disagreement_uses_policy_constant() {
        let policy = SimilarityPolicy::default();

        assert_eq!(
            policy.coefficient(&[(5, 1)]),
            Some(SINGLE_OVERLAP_DISAGREEMENT)
        );
        // The midpoint is its own side.
        assert_eq!(
            policy.coefficient(&[(5, 3)]),
            Some(SINGLE_OVERLAP_DISAGREEMENT)
        );
    }

    #[test]
    fn test_custom_disagreement_value_is_sanitized() {
        let scale = RatingScale::default();

        assert_eq!(
            SimilarityPolicy::new(scale, -0.5).single_overlap_disagreement(),
            -0.5
        );
        assert_eq!(
            SimilarityPolicy::new(scale, -3.0).single_overlap_disagreement(),
            -1.0
        );
        assert_eq!(
            SimilarityPolicy::new(scale, 0.2).single_overlap_disagreement(),
            SINGLE_OVERLAP_DISAGREEMENT
        );
        assert_eq!(
            SimilarityPolicy::new(scale, f64::NAN).single_overlap_disagreement(),
            SINGLE_OVERLAP_DISAGREEMENT
        );
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let policy = SimilarityPolicy::default();
        let coefficient = policy.coefficient(&[(1, 5), (3, 3), (5, 1)]).unwrap();

        assert!((coefficient + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_linear_but_not_identical_is_one() {
        let policy = SimilarityPolicy::default();
        let coefficient = policy.coefficient(&[(1, 2), (2, 3), (3, 4)]).unwrap();

        assert!((coefficient - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_variance_differing_vectors_are_uncorrelated() {
        let policy = SimilarityPolicy::default();

        assert_eq!(policy.coefficient(&[(5, 3), (1, 3)]), Some(0.0));
        assert_eq!(policy.coefficient(&[(4, 5), (4, 5)]), Some(0.0));
    }

    #[test]
    fn test_coefficients_stay_in_unit_range() {
        let policy = SimilarityPolicy::default();
        let cases: Vec<Vec<(i32, i32)>> = vec![
            vec![(1, 2), (2, 1), (5, 5), (3, 4)],
            vec![(5, 1), (4, 2), (1, 5)],
            vec![(2, 2), (2, 3), (2, 4)],
            vec![(1, 1), (5, 5), (1, 5), (5, 1)],
            vec![(3, 1)],
        ];

        for pairs in cases {
            let coefficient = policy.coefficient(&pairs).unwrap();
            assert!(
                (-1.0..=1.0).contains(&coefficient),
                "{pairs:?} gave {coefficient}"
            );
        }
    }
}
