//! Record types persisted by the content store.
//!
//! Serialized field names follow the camelCase schema the admin UI reads and
//! writes (`uploadedAt`, `fileName`, `videoData`, ...), so stored values are
//! interchangeable with values a browser front-end keeps in local storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `fileName` value forced onto every youtube-sourced video record.
pub const YOUTUBE_FILE_NAME: &str = "youtube-embed";

/// Fixed category set for video records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum VideoCategory {
    Hardware,
    Software,
    Network,
    Security,
    Other,
}

impl std::fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            VideoCategory::Hardware => "Hardware",
            VideoCategory::Software => "Software",
            VideoCategory::Network => "Network",
            VideoCategory::Security => "Security",
            VideoCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Where a video's bytes come from: an uploaded file or a YouTube URL.
///
/// Serialized under the record's `type` key as `"local"` / `"youtube"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    Local,
    Youtube,
}

/// A persisted video entry.
///
/// Invariants maintained by [`ContentStore::create_video`]:
/// `Local` records carry non-empty encoded file content in `video_data`;
/// `Youtube` records carry a non-empty URL, `file_name` is
/// [`YOUTUBE_FILE_NAME`] and `file_size` is zero.
///
/// [`ContentStore::create_video`]: crate::content_store::ContentStore::create_video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Unique within the collection, assigned as `max(existing ids) + 1`.
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub category: VideoCategory,
    #[serde(rename = "type")]
    pub source: VideoSource,
    /// Set once at creation, never mutated afterwards.
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    /// Data URL of the uploaded file, or the YouTube embed URL.
    #[serde(default)]
    pub video_data: String,
}

/// Input for creating a video record; everything except the id and the
/// upload timestamp, which the store assigns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub category: VideoCategory,
    #[serde(rename = "type")]
    pub source: VideoSource,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub video_data: String,
}

/// Media kind for solution cards, serialized as `"video"` / `"youtube_embed"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "youtube_embed")]
    YoutubeEmbed,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => f.write_str("video"),
            MediaKind::YoutubeEmbed => f.write_str("youtube_embed"),
        }
    }
}

/// A persisted solution card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionCardRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub media_type: MediaKind,
    /// Data URL of an uploaded file, or the YouTube embed URL.
    #[serde(default)]
    pub media: String,
}

/// Input for creating or updating a solution card. Updates replace every
/// mutable field; there is no partial-update form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionCardInput {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub media_type: MediaKind,
    #[serde(default)]
    pub media: String,
}

/// The singleton "about" profile. Saved and loaded whole; the profile image
/// lives under its own storage key and is not part of this record.
///
/// Missing fields in a stored value deserialize to their defaults, so a
/// profile written by an older front-end still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutProfile {
    pub name: String,
    pub subtitle: String,
    pub bio: String,
    pub site_title: String,
    pub site_desc: String,
    pub credits: String,
    /// Ordered, unique (case-sensitive) short strings.
    pub tech_tags: Vec<String>,
}

impl AboutProfile {
    /// Appends a tag unless it is blank or already present (exact match).
    /// Returns whether the tag was added.
    pub fn add_tech_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tech_tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tech_tags.push(tag.to_string());
        true
    }

    /// Removes the tag at `index`, returning it, or `None` if out of range.
    pub fn remove_tech_tag(&mut self, index: usize) -> Option<String> {
        if index < self.tech_tags.len() {
            Some(self.tech_tags.remove(index))
        } else {
            None
        }
    }
}
