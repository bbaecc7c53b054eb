//! Similarity-weighted score prediction.

use super::rating_set::RatingSet;
use super::similarity::{SimilarityPolicy, co_rated_pairs};

/// A user who rated the target movie and shares positive taste similarity
/// with the target user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_id: i64,
    pub similarity: f64,
    pub score: i32,
}

/// Predicts a user's score for a movie they have not rated from the scores of
/// users with similar taste.
///
/// The predictor is pure: it reads a [`RatingSet`] snapshot and holds no
/// state beyond its [`SimilarityPolicy`]. Every "not enough data" case yields
/// `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor {
    policy: SimilarityPolicy,
}

impl Predictor {
    pub fn new(policy: SimilarityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SimilarityPolicy {
        &self.policy
    }

    /// Neighbors of `user_id` for `movie_id` with similarity strictly above
    /// zero, ordered by user ID.
    ///
    /// The target's own rating on the movie is never a candidate, and the
    /// movie itself is excluded from every co-rated set.
    pub fn neighbors(&self, user_id: i64, movie_id: i64, ratings: &RatingSet) -> Vec<Neighbor> {
        let Some(target) = ratings.profile(user_id) else {
            return Vec::new();
        };

        let mut neighbors: Vec<Neighbor> = ratings
            .raters_of(movie_id)
            .filter(|(rater, _)| *rater != user_id)
            .filter_map(|(rater, score)| {
                let profile = ratings.profile(rater)?;
                let pairs = co_rated_pairs(target, profile, movie_id);
                let similarity = self.policy.coefficient(&pairs)?;

                (similarity > 0.0).then_some(Neighbor {
                    user_id: rater,
                    similarity,
                    score,
                })
            })
            .collect();

        neighbors.sort_unstable_by_key(|n| n.user_id);
        neighbors
    }

    /// Predicted integer score of `user_id` for `movie_id`.
    ///
    /// The weighted mean of the neighbors' scores is rounded half away from
    /// zero and clamped into the rating scale.
    pub fn predict(&self, user_id: i64, movie_id: i64, ratings: &RatingSet) -> Option<i32> {
        if !ratings.has_rated_any(user_id) {
            return None;
        }

        let neighbors = self.neighbors(user_id, movie_id, ratings);
        if neighbors.is_empty() {
            return None;
        }

        let (weighted, total) = neighbors.iter().fold((0.0, 0.0), |(sum, weight), n| {
            (sum + n.similarity * f64::from(n.score), weight + n.similarity)
        });

        if total <= 0.0 {
            return None;
        }

        let rounded = (weighted / total).round() as i32;
        Some(self.policy.scale().clamp(rounded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Rating;

    const A: i64 = 1;
    const B: i64 = 2;
    const C: i64 = 3;
    const N: i64 = 10;
    const M: i64 = 20;

    fn ratings(entries: &[(i64, i64, i32)]) -> RatingSet {
        entries
            .iter()
            .enumerate()
            .map(|(i, &(user, movie, score))| Rating::new(i as i64 + 1, user, movie, score))
            .collect()
    }

    #[test]
    fn test_prediction_follows_agreeing_neighbor() {
        let set = ratings(&[(C, N, 5), (A, N, 5), (A, M, 5), (B, N, 3), (B, M, 3)]);
        let predictor = Predictor::default();

        assert_eq!(predictor.predict(C, M, &set), Some(5));

        let neighbors = predictor.neighbors(C, M, &set);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].user_id, A);
        assert_eq!(neighbors[0].similarity, 1.0);
    }

    #[test]
    fn test_single_disagreeing_overlap_drops_neighbor() {
        // C shares one movie with each neighbor: 5 vs A's 5, 1 vs B's 3.
        const N2: i64 = 11;
        let set = ratings(&[
            (C, N, 5),
            (A, N, 5),
            (C, N2, 1),
            (B, N2, 3),
            (A, M, 5),
            (B, M, 3),
        ]);
        let predictor = Predictor::default();

        let neighbors = predictor.neighbors(C, M, &set);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].user_id, A);
        assert_eq!(neighbors[0].similarity, 1.0);

        assert_eq!(predictor.predict(C, M, &set), Some(5));
    }

    #[test]
    fn test_no_prediction_for_user_without_ratings() {
        let set = ratings(&[(A, N, 5), (A, M, 4)]);
        assert_eq!(Predictor::default().predict(C, M, &set), None);
    }

    #[test]
    fn test_no_prediction_without_raters_of_movie() {
        let set = ratings(&[(C, N, 5), (A, N, 5)]);
        assert_eq!(Predictor::default().predict(C, M, &set), None);
    }

    #[test]
    fn test_no_prediction_without_overlap() {
        let set = ratings(&[(C, N, 5), (A, 30, 5), (A, M, 4)]);
        assert_eq!(Predictor::default().predict(C, M, &set), None);
    }

    #[test]
    fn test_own_rating_on_target_movie_is_ignored() {
        // C's real 1 on M must neither count as a neighbor nor as overlap.
        let set = ratings(&[(C, N, 4), (C, M, 1), (A, N, 4), (A, M, 5)]);

        assert_eq!(Predictor::default().predict(C, M, &set), Some(5));
    }

    #[test]
    fn test_negatively_correlated_neighbors_are_discarded() {
        let set = ratings(&[
            (C, 1, 1),
            (C, 2, 3),
            (C, 3, 5),
            (A, 1, 5),
            (A, 2, 3),
            (A, 3, 1),
            (A, M, 1),
        ]);
        assert_eq!(Predictor::default().predict(C, M, &set), None);
    }

    #[test]
    fn test_weighted_average_rounds_half_away_from_zero() {
        // Two neighbors with similarity 1.0 scoring 4 and 5 average to 4.5.
        let set = ratings(&[(C, N, 4), (A, N, 4), (A, M, 4), (B, N, 5), (B, M, 5)]);

        assert_eq!(Predictor::default().predict(C, M, &set), Some(5));
    }

    #[test]
    fn test_weights_follow_similarity() {
        let set = ratings(&[
            // A mirrors C exactly.
            (C, 1, 2),
            (C, 2, 4),
            (C, 3, 5),
            (A, 1, 2),
            (A, 2, 4),
            (A, 3, 5),
            (A, M, 5),
            // B correlates weakly and scores M low.
            (B, 1, 3),
            (B, 2, 2),
            (B, 3, 5),
            (B, M, 1),
        ]);
        let predictor = Predictor::default();

        let neighbors = predictor.neighbors(C, M, &set);
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors[0].similarity > neighbors[1].similarity);

        let prediction = predictor.predict(C, M, &set).unwrap();
        assert!(prediction >= 3, "prediction {prediction} should lean on A");
    }

    #[test]
    fn test_predictions_always_in_scale() {
        let set = ratings(&[
            (C, 1, 5),
            (C, 2, 1),
            (A, 1, 5),
            (A, 2, 1),
            (A, M, 5),
            (B, 1, 4),
            (B, 2, 2),
            (B, M, 1),
        ]);
        let predictor = Predictor::default();
        let prediction = predictor.predict(C, M, &set).unwrap();

        assert!(predictor.policy().scale().contains(prediction));
    }
}
