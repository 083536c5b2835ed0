//! Simulated "thinking" delay before a reply is delivered.
//!
//! Urgent messages are answered faster. With the jitter capped at 400 ms the
//! slowest high-urgency delay (1600 ms) stays below the fastest low-urgency
//! one (2200 ms).

use rand::Rng;
use std::time::Duration;

use crate::brain::intent::Urgency;
use crate::brain::message::ConversationMessage;

const HIGH_BASE_MS: f64 = 800.0;
const MEDIUM_BASE_MS: f64 = 1500.0;
const LOW_BASE_MS: f64 = 2200.0;
const MAX_JITTER_MS: f64 = 400.0;

fn base_ms(urgency: Urgency) -> f64 {
    match urgency {
        Urgency::High => HIGH_BASE_MS,
        Urgency::Medium => MEDIUM_BASE_MS,
        Urgency::Low => LOW_BASE_MS,
    }
}

/// Delay before delivering the reply to `message`, multiplied by `scale`.
pub fn thinking_delay<R: Rng + ?Sized>(
    message: &ConversationMessage,
    scale: f64,
    rng: &mut R,
) -> Duration {
    let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    let intensity = f64::from(message.emotional_tone.intensity.clamp(0.0, 100.0));
    let jitter = rng.gen_range(0.0..=MAX_JITTER_MS);
    let millis = (base_ms(message.intent.urgency) * (1.0 + intensity / 200.0) + jitter)
        * scale;

    Duration::from_secs_f64(millis / 1000.0)
}
