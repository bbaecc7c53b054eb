//! Bounded integer rating scale.

/// The closed integer range scores live in.
///
/// Storage enforces the same bounds with a check constraint; the engine uses
/// the scale to clamp rounded predictions, to locate the midpoint for the
/// single-overlap similarity policy, and to bound deviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingScale {
    min: i32,
    max: i32,
}

impl RatingScale {
    /// The 1–5 star scale used throughout the service.
    pub const FIVE_STAR: RatingScale = RatingScale { min: 1, max: 5 };

    /// Creates a scale. Returns `None` if `min >= max`.
    pub fn new(min: i32, max: i32) -> Option<Self> {
        (min < max).then_some(Self { min, max })
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Returns true if `score` lies within the scale.
    pub fn contains(&self, score: i32) -> bool {
        (self.min..=self.max).contains(&score)
    }

    /// Midpoint of the scale; 3.0 for the five-star scale.
    pub fn midpoint(&self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }

    /// Largest possible absolute difference between two scores.
    pub fn max_deviation(&self) -> u32 {
        self.min.abs_diff(self.max)
    }

    /// Clamps a score into the scale.
    pub fn clamp(&self, score: i32) -> i32 {
        score.clamp(self.min, self.max)
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::FIVE_STAR
    }
}
