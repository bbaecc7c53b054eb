//! Rating prediction and aggregation engine.
//!
//! The engine is a set of pure, synchronous computations over a
//! [`RatingSet`] snapshot that the application layer fetched from storage. It
//! never performs I/O and holds no mutable state, so concurrent requests can
//! share one [`DetailAggregator`] freely.
//!
//! - [`similarity`] - User-to-user similarity over co-rated movies
//! - [`predictor`] - Similarity-weighted score prediction
//! - [`detail`] - Community average, effective ratings and critic deviation
//! - [`feedback`] - Deviation-indexed feedback messages

pub mod detail;
pub mod feedback;
pub mod predictor;
pub mod rating_set;
pub mod scale;
pub mod similarity;

pub use detail::{DetailAggregator, EffectiveRating, MovieDetail};
pub use feedback::{FEEDBACK_MESSAGES, message_for};
pub use predictor::{Neighbor, Predictor};
pub use rating_set::{Profile, RatingSet};
pub use scale::RatingScale;
pub use similarity::{SINGLE_OVERLAP_DISAGREEMENT, SimilarityPolicy};

/// Engine settings resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub scale: RatingScale,
    pub single_overlap_disagreement: f64,
    pub critic_id: Option<i64>,
}

impl EngineConfig {
    pub fn new(single_overlap_disagreement: f64, critic_id: Option<i64>) -> Self {
        Self {
            scale: RatingScale::FIVE_STAR,
            single_overlap_disagreement,
            critic_id,
        }
    }

    pub fn predictor(&self) -> Predictor {
        Predictor::new(SimilarityPolicy::new(
            self.scale,
            self.single_overlap_disagreement,
        ))
    }

    pub fn aggregator(&self) -> DetailAggregator {
        DetailAggregator::new(self.predictor(), self.critic_id)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(SINGLE_OVERLAP_DISAGREEMENT, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_wires_critic_and_policy() {
        let config = EngineConfig::new(-0.4, Some(7));
        let aggregator = config.aggregator();

        assert_eq!(aggregator.critic_id(), Some(7));
        assert_eq!(
            aggregator.predictor().policy().single_overlap_disagreement(),
            -0.4
        );
        assert_eq!(aggregator.predictor().policy().scale(), RatingScale::FIVE_STAR);
    }
}
