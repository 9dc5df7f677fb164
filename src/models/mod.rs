//! Data models for quotations and the controller's display state

use serde::Deserialize;

/// A quotation as delivered by the quotable API.
///
/// Only `text` and `author` are guaranteed; the richer attributes are present
/// on some endpoints and absent on others, so everything else is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quotation {
    /// The quoted content. The API calls this `content`; some mirrors use `text`.
    #[serde(rename = "content", alias = "text")]
    pub text: String,
    pub author: String,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "authorSlug", default)]
    pub author_slug: Option<String>,
    #[serde(rename = "length", default)]
    pub character_length: Option<u32>,
    /// ISO-8601 timestamp, kept as text and formatted at display time
    #[serde(rename = "dateAdded", default)]
    pub date_added: Option<String>,
    #[serde(rename = "dateModified", default)]
    pub date_modified: Option<String>,
}

/// Coarse display state of the current fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

/// Snapshot of the controller's state, replaced wholesale on each transition.
///
/// Invariant: `quotation` is present exactly when the phase is `Ready` and
/// `error_message` exactly when it is `Failed`. The constructors below are the
/// only way these are built, so a snapshot never mixes data from two cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub phase: Phase,
    pub quotation: Option<Quotation>,
    pub error_message: Option<String>,
    /// Attempts issued so far in the current cycle (1 after the initial request)
    pub attempt_count: u32,
}

impl FetchState {
    /// Fresh cycle: nothing fetched yet, attempt counter back at zero.
    pub fn loading() -> Self {
        Self {
            phase: Phase::Loading,
            quotation: None,
            error_message: None,
            attempt_count: 0,
        }
    }

    pub fn ready(quotation: Quotation, attempt_count: u32) -> Self {
        Self {
            phase: Phase::Ready,
            quotation: Some(quotation),
            error_message: None,
            attempt_count,
        }
    }

    pub fn failed(message: impl Into<String>, attempt_count: u32) -> Self {
        Self {
            phase: Phase::Failed,
            quotation: None,
            error_message: Some(message.into()),
            attempt_count,
        }
    }

    /// Same cycle, one more attempt issued; phase and payload untouched.
    pub fn with_attempt_count(mut self, attempt_count: u32) -> Self {
        self.attempt_count = attempt_count;
        self
    }
}
