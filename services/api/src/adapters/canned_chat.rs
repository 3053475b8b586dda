//! services/api/src/adapters/canned_chat.rs
//!
//! This module contains the canned-response chat backend. It implements the
//! `ChatBackend` port from the `core` crate by picking one of a fixed set of
//! reply templates at random; it is a stand-in for a real assistant, and the
//! reply has no semantic relationship to the message beyond string
//! interpolation. The random source is injected so tests can pin the reply
//! sequence.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;
use teaching_assistant_core::ports::{ChatBackend, PortError, PortResult};

/// The fixed reply templates. `{message}` is replaced with the user's text;
/// the first template additionally varies its lead-in on whether the message
/// looks like a question.
const REPLY_TEMPLATES: [&str; 4] = [
    r#"Great question! Let me help you with that. {lead_in} "{message}". Would you like me to generate specific content for your lesson?"#,
    r#"I can definitely assist with that! For topics like "{message}", I suggest creating hands-on activities that engage students. Would you like me to create a worksheet or visual aid?"#,
    "That's an interesting educational challenge! Based on my experience with similar topics, here are some effective approaches you might consider...",
    r#"Perfect! I love helping teachers with creative lesson planning. For "{message}", you might want to consider different learning styles and grade-appropriate activities."#,
];

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A `ChatBackend` that answers with a uniformly chosen canned reply.
pub struct CannedChatBackend {
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl CannedChatBackend {
    /// Creates a backend seeded from system entropy. `latency` is added to
    /// every reply to stand in for model inference time.
    pub fn new(latency: Duration) -> Self {
        Self::with_rng(StdRng::from_entropy(), latency)
    }

    /// Creates a backend with an explicit random source, so tests can pin
    /// the reply sequence.
    pub fn with_rng(rng: StdRng, latency: Duration) -> Self {
        Self {
            rng: Mutex::new(rng),
            latency,
        }
    }

    fn render(template: &str, message: &str) -> String {
        let lead_in = if message.contains('?') {
            "Here's what I recommend..."
        } else {
            "I understand you're looking for information about"
        };
        template
            .replace("{lead_in}", lead_in)
            .replace("{message}", message)
    }
}

//=========================================================================================
// `ChatBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatBackend for CannedChatBackend {
    async fn respond(&self, message: &str) -> PortResult<String> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let index = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
            rng.gen_range(0..REPLY_TEMPLATES.len())
        };

        Ok(Self::render(REPLY_TEMPLATES[index], message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_seed_reproduces_the_reply_sequence() {
        let first = CannedChatBackend::with_rng(StdRng::seed_from_u64(42), Duration::ZERO);
        let second = CannedChatBackend::with_rng(StdRng::seed_from_u64(42), Duration::ZERO);

        for message in ["how do plants grow?", "fractions", "the water cycle"] {
            assert_eq!(
                first.respond(message).await.unwrap(),
                second.respond(message).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn every_reply_comes_from_the_fixed_set() {
        let backend = CannedChatBackend::with_rng(StdRng::seed_from_u64(7), Duration::ZERO);
        let message = "how should I teach long division";
        let expected: Vec<String> = REPLY_TEMPLATES
            .iter()
            .map(|t| CannedChatBackend::render(t, message))
            .collect();

        for _ in 0..20 {
            let reply = backend.respond(message).await.unwrap();
            assert!(expected.contains(&reply));
        }
    }

    #[test]
    fn lead_in_depends_on_question_mark() {
        let with_question = CannedChatBackend::render(REPLY_TEMPLATES[0], "what is osmosis?");
        assert!(with_question.contains("Here's what I recommend..."));

        let without_question = CannedChatBackend::render(REPLY_TEMPLATES[0], "osmosis");
        assert!(without_question.contains("looking for information about"));
    }
}
