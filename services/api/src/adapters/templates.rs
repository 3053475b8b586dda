//! services/api/src/adapters/templates.rs
//!
//! This module contains the template-based generation backend. It implements
//! the `GenerationBackend` port from the `core` crate by filling fixed
//! narrative templates; it performs no model inference, and the output has no
//! semantic relationship to the input beyond string interpolation. A real
//! model-backed adapter would implement the same port.

const CONTENT_TEMPLATE: &str = r#"Generated educational content for "{input}"

**Learning Objectives:**
• Understand the core concepts of {input}
• Apply knowledge through practical examples
• Develop critical thinking skills

**Content Overview:**
This lesson covers the fundamental aspects of {input}, designed for {grade_level} level students. The content includes interactive activities, real-world examples, and assessment questions to ensure comprehensive understanding.

**Activities:**
1. Introduction discussion
2. Hands-on demonstration
3. Group activities
4. Individual practice
5. Assessment and reflection"#;

// The worksheet body is a fixed multi-grade breakdown; it does not
// interpolate the request.
const WORKSHEET_TEMPLATE: &str = r#"**Differentiated Worksheets Generated**

**Grade 3 Level:**
• Basic identification exercises
• Simple matching activities
• Visual learning aids
• Short answer questions (1-2 words)

**Grade 5 Level:**
• Analysis and comparison tasks
• Problem-solving scenarios
• Extended writing exercises
• Critical thinking questions

**Assessment Rubric:**
• Understanding: Basic to Advanced
• Application: Guided to Independent
• Communication: Simple to Complex"#;

const VISUAL_AID_TEMPLATE: &str = r#"**Visual Aid Generated**

Title: {input}

[Generated diagram/chart would appear here]

**Description:**
A clear, educational diagram illustrating {input}. The visual aid includes labeled components, color coding for better understanding, and is optimized for classroom display.

**Usage Tips:**
• Display prominently during lesson introduction
• Use as reference during activities
• Students can create their own versions
• Perfect for visual learners"#;

/// Stock placeholder attached to every visual aid in place of a generated
/// image.
const VISUAL_AID_IMAGE_URL: &str =
    "https://images.pexels.com/photos/256541/pexels-photo-256541.jpeg?auto=compress&cs=tinysrgb&w=800";

/// Grade level interpolated into the content template when the request does
/// not name one.
const DEFAULT_GRADE_LEVEL: &str = "elementary";

use async_trait::async_trait;
use std::time::Duration;
use teaching_assistant_core::domain::{ArtifactKind, GenerationRequest};
use teaching_assistant_core::ports::{GenerationBackend, PortResult, Synthesis};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A `GenerationBackend` that fabricates artifact bodies from fixed templates.
pub struct TemplateBackend {
    latency: Duration,
}

impl TemplateBackend {
    /// Creates a new `TemplateBackend`. `latency` is added to every call to
    /// stand in for model inference time; pass `Duration::ZERO` in tests.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

//=========================================================================================
// `GenerationBackend` Trait Implementation
//=========================================================================================

#[async_trait]
impl GenerationBackend for TemplateBackend {
    /// Fills the template selected by the request's kind. Every member of the
    /// closed kind set has its own branch; there is no fallback arm.
    async fn synthesize(&self, request: &GenerationRequest) -> PortResult<Synthesis> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let synthesis = match request.kind {
            ArtifactKind::Content => {
                let grade_level = request
                    .grade_level
                    .as_deref()
                    .unwrap_or(DEFAULT_GRADE_LEVEL);
                Synthesis {
                    output_text: CONTENT_TEMPLATE
                        .replace("{input}", &request.input_text)
                        .replace("{grade_level}", grade_level),
                    image_url: None,
                }
            }
            ArtifactKind::Worksheet => Synthesis {
                output_text: WORKSHEET_TEMPLATE.to_string(),
                image_url: None,
            },
            ArtifactKind::VisualAid => Synthesis {
                output_text: VISUAL_AID_TEMPLATE.replace("{input}", &request.input_text),
                image_url: Some(VISUAL_AID_IMAGE_URL.to_string()),
            },
        };

        Ok(synthesis)
    }
}
