//! Feedback messages keyed by the viewer's deviation from the critic.

/// Escalating messages indexed by absolute deviation.
///
/// Index 0 means full agreement with the critic; each step adds one point of
/// disagreement. The five-star scale tops out at deviation 4.
pub const FEEDBACK_MESSAGES: [&str; 5] = [
    "I suppose you don't have such bad taste after all.",
    "I regret every decision that I've ever made that has brought me to listen to your opinion.",
    "Words fail me, as your taste in movies has clearly failed you.",
    "That movie is great. For a clown to watch. Idiot.",
    "Words cannot express the awfulness of your taste.",
];

/// Selects the message for a deviation.
///
/// Deviations past the last entry select the last entry.
pub fn message_for(deviation: u32) -> &'static str {
    let last = FEEDBACK_MESSAGES.len() - 1;
    let index = usize::try_from(deviation).map_or(last, |d| d.min(last));
    FEEDBACK_MESSAGES[index]
}
