//! Composition of the per-movie detail view.

use super::feedback::message_for;
use super::predictor::Predictor;
use super::rating_set::RatingSet;

/// A user's score for a movie, either stated or inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveRating {
    /// The user's own stored rating.
    Real(i32),
    /// A similarity-weighted prediction.
    Predicted(i32),
}

impl EffectiveRating {
    pub fn score(&self) -> i32 {
        match self {
            EffectiveRating::Real(score) | EffectiveRating::Predicted(score) => *score,
        }
    }

    pub fn is_predicted(&self) -> bool {
        matches!(self, EffectiveRating::Predicted(_))
    }
}

/// Derived values shown alongside a movie.
///
/// All fields are recomputed per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub movie_id: i64,
    pub rating_count: usize,
    pub average: Option<f64>,
    pub viewer_effective: Option<EffectiveRating>,
    /// True iff `viewer_effective` came from the predictor.
    pub prediction_used_for_viewer: bool,
    pub critic_effective: Option<EffectiveRating>,
    pub deviation: Option<u32>,
    pub message: Option<&'static str>,
}

/// Arithmetic mean of all real scores for a movie; `None` with no ratings.
pub fn community_average(movie_id: i64, ratings: &RatingSet) -> Option<f64> {
    let (sum, count) = ratings
        .raters_of(movie_id)
        .fold((0i64, 0u32), |(sum, count), (_, score)| {
            (sum + i64::from(score), count + 1)
        });

    (count > 0).then(|| sum as f64 / f64::from(count))
}

/// Absolute difference of two effective ratings when both exist.
pub fn deviation(
    viewer: Option<EffectiveRating>,
    critic: Option<EffectiveRating>,
) -> Option<u32> {
    Some(viewer?.score().abs_diff(critic?.score()))
}

/// Builds [`MovieDetail`] values for a viewer and a movie.
///
/// The critic is fixed at construction; with no critic configured the critic
/// rating, deviation and message are always absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailAggregator {
    predictor: Predictor,
    critic_id: Option<i64>,
}

impl DetailAggregator {
    pub fn new(predictor: Predictor, critic_id: Option<i64>) -> Self {
        Self {
            predictor,
            critic_id,
        }
    }

    pub fn critic_id(&self) -> Option<i64> {
        self.critic_id
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Real rating if present, else a prediction if the user has rated
    /// anything at all, else `None`.
    pub fn effective_rating(
        &self,
        user_id: i64,
        movie_id: i64,
        ratings: &RatingSet,
    ) -> Option<EffectiveRating> {
        if let Some(score) = ratings.score(user_id, movie_id) {
            return Some(EffectiveRating::Real(score));
        }

        self.predictor
            .predict(user_id, movie_id, ratings)
            .map(EffectiveRating::Predicted)
    }

    /// Composes the detail view. `viewer` is `None` for anonymous requests.
    pub fn compose(&self, viewer: Option<i64>, movie_id: i64, ratings: &RatingSet) -> MovieDetail {
        let viewer_effective =
            viewer.and_then(|user_id| self.effective_rating(user_id, movie_id, ratings));
        let critic_effective = self
            .critic_id
            .and_then(|critic_id| self.effective_rating(critic_id, movie_id, ratings));
        let deviation = deviation(viewer_effective, critic_effective);

        MovieDetail {
            movie_id,
            rating_count: ratings.rating_count(movie_id),
            average: community_average(movie_id, ratings),
            viewer_effective,
            prediction_used_for_viewer: viewer_effective.is_some_and(|e| e.is_predicted()),
            critic_effective,
            deviation,
            message: deviation.map(message_for),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Rating;
    use crate::domain::scoring::feedback::FEEDBACK_MESSAGES;

    const VIEWER: i64 = 1;
    const CRITIC: i64 = 99;
    const OTHER: i64 = 2;
    const MOVIE: i64 = 10;
    const SEEN: i64 = 11;

    fn ratings(entries: &[(i64, i64, i32)]) -> RatingSet {
        entries
            .iter()
            .enumerate()
            .map(|(i, &(user, movie, score))| Rating::new(i as i64 + 1, user, movie, score))
            .collect()
    }

    fn aggregator() -> DetailAggregator {
        DetailAggregator::new(Predictor::default(), Some(CRITIC))
    }

    #[test]
    fn test_average_of_three_four_five_is_four() {
        let set = ratings(&[(1, MOVIE, 3), (2, MOVIE, 4), (3, MOVIE, 5)]);
        assert_eq!(community_average(MOVIE, &set), Some(4.0));
    }

    #[test]
    fn test_average_absent_without_ratings() {
        let set = ratings(&[(1, SEEN, 3)]);
        assert_eq!(community_average(MOVIE, &set), None);
    }

    #[test]
    fn test_deviation_absent_unless_both_sides_present() {
        let four = Some(EffectiveRating::Real(4));

        assert_eq!(deviation(four, None), None);
        assert_eq!(deviation(None, four), None);
        assert_eq!(deviation(None, None), None);
    }

    #[test]
    fn test_deviation_is_symmetric() {
        for a in 1..=5 {
            for b in 1..=5 {
                let x = Some(EffectiveRating::Real(a));
                let y = Some(EffectiveRating::Predicted(b));
                assert_eq!(deviation(x, y), deviation(y, x));
            }
        }
    }

    #[test]
    fn test_real_ratings_drive_deviation_and_message() {
        let set = ratings(&[(VIEWER, MOVIE, 4), (CRITIC, MOVIE, 2)]);

        let detail = aggregator().compose(Some(VIEWER), MOVIE, &set);

        assert_eq!(detail.viewer_effective, Some(EffectiveRating::Real(4)));
        assert_eq!(detail.critic_effective, Some(EffectiveRating::Real(2)));
        assert!(!detail.prediction_used_for_viewer);
        assert_eq!(detail.deviation, Some(2));
        assert_eq!(detail.message, Some(FEEDBACK_MESSAGES[2]));
        assert_eq!(detail.average, Some(3.0));
        assert_eq!(detail.rating_count, 2);
    }

    #[test]
    fn test_unrated_movie_has_no_average() {
        let set = ratings(&[(VIEWER, SEEN, 4), (CRITIC, SEEN, 4)]);

        let detail = aggregator().compose(Some(VIEWER), MOVIE, &set);

        assert_eq!(detail.average, None);
        assert_eq!(detail.rating_count, 0);
        assert_eq!(detail.viewer_effective, None);
        assert_eq!(detail.deviation, None);
        assert_eq!(detail.message, None);
    }

    #[test]
    fn test_viewer_prediction_is_flagged() {
        let set = ratings(&[
            (VIEWER, SEEN, 5),
            (OTHER, SEEN, 5),
            (OTHER, MOVIE, 4),
            (CRITIC, MOVIE, 4),
        ]);

        let detail = aggregator().compose(Some(VIEWER), MOVIE, &set);

        assert_eq!(detail.viewer_effective, Some(EffectiveRating::Predicted(4)));
        assert!(detail.prediction_used_for_viewer);
        assert_eq!(detail.deviation, Some(0));
        assert_eq!(detail.message, Some(FEEDBACK_MESSAGES[0]));
    }

    #[test]
    fn test_critic_real_rating_wins_over_prediction() {
        let set = ratings(&[
            (CRITIC, SEEN, 5),
            (OTHER, SEEN, 5),
            (OTHER, MOVIE, 5),
            (CRITIC, MOVIE, 1),
        ]);

        let detail = aggregator().compose(None, MOVIE, &set);

        assert_eq!(detail.critic_effective, Some(EffectiveRating::Real(1)));
    }

    #[test]
    fn test_anonymous_viewer_gets_no_personal_values() {
        let set = ratings(&[(OTHER, MOVIE, 5), (CRITIC, MOVIE, 1)]);

        let detail = aggregator().compose(None, MOVIE, &set);

        assert_eq!(detail.average, Some(3.0));
        assert_eq!(detail.viewer_effective, None);
        assert!(!detail.prediction_used_for_viewer);
        assert_eq!(detail.deviation, None);
    }

    #[test]
    fn test_without_critic_no_deviation() {
        let set = ratings(&[(VIEWER, MOVIE, 4), (CRITIC, MOVIE, 2)]);

        let detail = DetailAggregator::new(Predictor::default(), None).compose(
            Some(VIEWER),
            MOVIE,
            &set,
        );

        assert_eq!(detail.critic_effective, None);
        assert_eq!(detail.deviation, None);
        assert_eq!(detail.message, None);
    }
}
