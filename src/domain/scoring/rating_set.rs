//! Read-only, indexed view over a batch of rating records.

use std::collections::HashMap;

use crate::domain::entities::Rating;

/// A user's ratings keyed by movie ID.
pub type Profile = HashMap<i64, i32>;

/// In-memory index of ratings by user and by movie.
///
/// Built from whatever records the caller fetched from storage; the engine
/// never queries storage itself. Storage guarantees one rating per
/// `(user, movie)`; should duplicates appear anyway, the last record wins in
/// both indexes.
#[derive(Debug, Clone, Default)]
pub struct RatingSet {
    by_user: HashMap<i64, Profile>,
    by_movie: HashMap<i64, HashMap<i64, i32>>,
}

impl RatingSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rating, replacing any previous score for the same pair.
    pub fn insert(&mut self, rating: Rating) {
        self.by_user
            .entry(rating.user_id)
            .or_default()
            .insert(rating.movie_id, rating.score);
        self.by_movie
            .entry(rating.movie_id)
            .or_default()
            .insert(rating.user_id, rating.score);
    }

    /// Returns the user's score for a movie, if any.
    pub fn score(&self, user_id: i64, movie_id: i64) -> Option<i32> {
        self.by_user.get(&user_id)?.get(&movie_id).copied()
    }

    /// Returns all ratings made by a user.
    pub fn profile(&self, user_id: i64) -> Option<&Profile> {
        self.by_user.get(&user_id).filter(|p| !p.is_empty())
    }

    /// Returns true if the user has rated at least one movie.
    pub fn has_rated_any(&self, user_id: i64) -> bool {
        self.profile(user_id).is_some()
    }

    /// Iterates `(user_id, score)` for every rating of a movie.
    pub fn raters_of(&self, movie_id: i64) -> impl Iterator<Item = (i64, i32)> + '_ {
        self.by_movie
            .get(&movie_id)
            .into_iter()
            .flat_map(|raters| raters.iter().map(|(&user, &score)| (user, score)))
    }

    /// Number of ratings recorded for a movie.
    pub fn rating_count(&self, movie_id: i64) -> usize {
        self.by_movie.get(&movie_id).map_or(0, HashMap::len)
    }
}

impl FromIterator<Rating> for RatingSet {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        let mut set = RatingSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Rating> for RatingSet {
    fn extend<I: IntoIterator<Item = Rating>>(&mut self, iter: I) {
        for rating in iter {
            self.insert(rating);
        }
    }
}
