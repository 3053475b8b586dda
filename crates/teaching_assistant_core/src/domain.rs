//! crates/teaching_assistant_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::ports::PortError;

/// The closed set of artifact categories. A kind is fixed at creation and
/// never mutated; any new category requires a new template branch, not a
/// generic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Content,
    Worksheet,
    VisualAid,
}

impl ArtifactKind {
    /// Every member of the closed set, in display order.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Content,
        ArtifactKind::Worksheet,
        ArtifactKind::VisualAid,
    ];

    /// The kebab-case wire name used by clients and the library filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Content => "content",
            ArtifactKind::Worksheet => "worksheet",
            ArtifactKind::VisualAid => "visual-aid",
        }
    }

    /// The human-facing label used when assembling artifact titles.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Content => "Content",
            ArtifactKind::Worksheet => "Worksheet",
            ArtifactKind::VisualAid => "Visual Aid",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(ArtifactKind::Content),
            "worksheet" => Ok(ArtifactKind::Worksheet),
            "visual-aid" => Ok(ArtifactKind::VisualAid),
            other => Err(PortError::UnknownKind(other.to_string())),
        }
    }
}

/// The "kind or all" argument accepted by the content library filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(ArtifactKind),
}

impl KindFilter {
    pub fn matches(&self, kind: ArtifactKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(KindFilter::All)
        } else {
            Ok(KindFilter::Only(s.parse()?))
        }
    }
}

/// Descriptive metadata attached to a generated artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactMetadata {
    pub language: Option<String>,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    pub image_url: Option<String>,
}

/// A single generated teaching material stored in the content library.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub id: String,
    pub owner_id: String,
    pub kind: ArtifactKind,
    pub title: String,
    pub input_text: String,
    pub output_text: String,
    pub metadata: ArtifactMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One question/answer pair in the chat history.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub id: String,
    pub owner_id: String,
    pub user_message: String,
    pub assistant_response: String,
    pub timestamp: DateTime<Utc>,
}

/// A transient request for a new artifact. Consumed once by the generation
/// service and never stored.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub kind: ArtifactKind,
    pub input_text: String,
    pub language: Option<String>,
    pub grade_level: Option<String>,
    pub subject: Option<String>,
    /// Reference to an image uploaded alongside the request form. Carried
    /// through for the request surface; no current backend consumes it.
    pub attached_image: Option<String>,
}
