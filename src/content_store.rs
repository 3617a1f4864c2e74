//! CRUD and aggregation entry point over the persisted content collections.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::content_model::{
    AboutProfile, NewVideo, SolutionCardInput, SolutionCardRecord, VideoRecord, VideoSource,
    YOUTUBE_FILE_NAME,
};
use crate::error::{StoreError, StoreResult};
use crate::storage::{KeyValueStore, RedbStore};

/// Storage key of the video collection.
pub const VIDEOS_KEY: &str = "videos";
/// Storage key of the solution-card collection.
pub const SOLUTION_CARDS_KEY: &str = "solutionCards";
/// Storage key of the about profile (image excluded).
pub const ABOUT_KEY: &str = "about";
/// Storage key of the encoded profile image.
pub const ABOUT_IMG_KEY: &str = "about_img";
/// Storage key of the most-recent-mutation timestamp marker.
pub const LAST_UPDATE_KEY: &str = "lastUpdate";
/// Storage key of the admin-session flag.
pub const SESSION_KEY: &str = "loggedIn";

/// Content store over a key-value backend.
///
/// Each collection is stored as one JSON array under its key; the about
/// profile and the scalar markers each get a key of their own. Reads never
/// fail: an absent or unparseable value is logged and treated as empty.
/// Mutations either fully persist the new collection value or leave the
/// prior value untouched.
pub struct ContentStore {
    pub(crate) backend: Box<dyn KeyValueStore>,
}

/// max+1 assignment; ids are reused once the highest record is deleted.
/// Not collision-safe under concurrent writers, which the store does not
/// support.
fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

impl ContentStore {
    /// Wraps an already-constructed backend.
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Opens a redb-backed store at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(Box::new(RedbStore::open(path)?)))
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read '{key}': {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                // Corrupt collections degrade to empty rather than failing
                // the caller; the next successful write replaces them.
                warn!("discarding unparseable value under '{key}': {e}");
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.set(key, &raw)
    }

    fn touch_last_update(&self) -> StoreResult<()> {
        self.backend.set(LAST_UPDATE_KEY, &Utc::now().to_rfc3339())
    }

    /// Timestamp of the most recent mutating video/about operation, or
    /// `None` if nothing was ever mutated (or the marker is unreadable).
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        let raw = self.backend.get(LAST_UPDATE_KEY).ok().flatten()?;
        match DateTime::parse_from_rfc3339(&raw) {
            Ok(ts) => Some(ts.with_timezone(&Utc)),
            Err(e) => {
                warn!("discarding unparseable '{LAST_UPDATE_KEY}' marker: {e}");
                None
            }
        }
    }

    // ── videos ──────────────────────────────────────────────────────────

    /// All video records in insertion order, most recently created last.
    pub fn list_videos(&self) -> Vec<VideoRecord> {
        self.read_collection(VIDEOS_KEY)
    }

    /// Validates the input, assigns the next id, appends and persists.
    /// Touches the `lastUpdate` marker.
    pub fn create_video(&self, input: NewVideo) -> StoreResult<VideoRecord> {
        if input.title.trim().is_empty() {
            return Err(StoreError::MissingField("title"));
        }
        let (file_name, file_size, video_data) = match input.source {
            VideoSource::Local => {
                if input.video_data.is_empty() {
                    return Err(StoreError::MissingField("video file"));
                }
                (input.file_name, input.file_size, input.video_data)
            }
            VideoSource::Youtube => {
                let url = input.video_data.trim();
                if url.is_empty() {
                    return Err(StoreError::MissingField("YouTube embed URL"));
                }
                (YOUTUBE_FILE_NAME.to_string(), 0, url.to_string())
            }
        };

        let mut videos = self.list_videos();
        let record = VideoRecord {
            id: next_id(videos.iter().map(|v| v.id)),
            title: input.title.trim().to_string(),
            desc: input.desc.trim().to_string(),
            category: input.category,
            source: input.source,
            uploaded_at: Utc::now(),
            file_name,
            file_size,
            video_data,
        };
        videos.push(record.clone());
        self.write_collection(VIDEOS_KEY, &videos)?;
        self.touch_last_update()?;
        debug!("video {} created ({})", record.id, record.title);
        Ok(record)
    }

    /// Removes the record with `id` if present. An absent id is a no-op,
    /// not an error; the return value says whether anything was removed.
    pub fn delete_video(&self, id: u64) -> StoreResult<bool> {
        let mut videos = self.list_videos();
        let before = videos.len();
        videos.retain(|v| v.id != id);
        let removed = videos.len() != before;
        self.write_collection(VIDEOS_KEY, &videos)?;
        self.touch_last_update()?;
        if removed {
            debug!("video {id} deleted");
        }
        Ok(removed)
    }

    // ── solution cards ──────────────────────────────────────────────────

    /// All solution cards in insertion order.
    pub fn list_solution_cards(&self) -> Vec<SolutionCardRecord> {
        self.read_collection(SOLUTION_CARDS_KEY)
    }

    fn validate_card(input: &SolutionCardInput) -> StoreResult<()> {
        if input.title.trim().is_empty() {
            return Err(StoreError::MissingField("title"));
        }
        if input.media.trim().is_empty() {
            return Err(StoreError::MissingField("media"));
        }
        Ok(())
    }

    pub fn create_solution_card(
        &self,
        input: SolutionCardInput,
    ) -> StoreResult<SolutionCardRecord> {
        Self::validate_card(&input)?;
        let mut cards = self.list_solution_cards();
        let record = SolutionCardRecord {
            id: next_id(cards.iter().map(|c| c.id)),
            title: input.title.trim().to_string(),
            desc: input.desc.trim().to_string(),
            media_type: input.media_type,
            media: input.media.trim().to_string(),
        };
        cards.push(record.clone());
        self.write_collection(SOLUTION_CARDS_KEY, &cards)?;
        debug!("solution card {} created ({})", record.id, record.title);
        Ok(record)
    }

    /// Replaces every mutable field of the card with `id`. Unknown ids fail
    /// with [`StoreError::NotFound`].
    pub fn update_solution_card(
        &self,
        id: u64,
        input: SolutionCardInput,
    ) -> StoreResult<SolutionCardRecord> {
        Self::validate_card(&input)?;
        let mut cards = self.list_solution_cards();
        let updated = match cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                card.title = input.title.trim().to_string();
                card.desc = input.desc.trim().to_string();
                card.media_type = input.media_type;
                card.media = input.media.trim().to_string();
                card.clone()
            }
            None => return Err(StoreError::NotFound(id)),
        };
        self.write_collection(SOLUTION_CARDS_KEY, &cards)?;
        debug!("solution card {id} updated");
        Ok(updated)
    }

    /// Removes the card with `id` if present; absent ids are a no-op.
    pub fn delete_solution_card(&self, id: u64) -> StoreResult<bool> {
        let mut cards = self.list_solution_cards();
        let before = cards.len();
        cards.retain(|c| c.id != id);
        let removed = cards.len() != before;
        self.write_collection(SOLUTION_CARDS_KEY, &cards)?;
        if removed {
            debug!("solution card {id} deleted");
        }
        Ok(removed)
    }

    // ── about profile ───────────────────────────────────────────────────

    /// The stored profile, or the default (all-empty) profile when nothing
    /// valid is stored.
    pub fn load_about(&self) -> AboutProfile {
        let raw = match self.backend.get(ABOUT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AboutProfile::default(),
            Err(e) => {
                warn!("failed to read '{ABOUT_KEY}': {e}");
                return AboutProfile::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("discarding unparseable about profile: {e}");
                AboutProfile::default()
            }
        }
    }

    /// Whole-record replace; there are no partial updates. Touches the
    /// `lastUpdate` marker.
    pub fn save_about(&self, profile: &AboutProfile) -> StoreResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.backend.set(ABOUT_KEY, &raw)?;
        self.touch_last_update()?;
        debug!("about profile saved");
        Ok(())
    }

    /// The encoded profile image, stored separately from the profile.
    pub fn load_about_image(&self) -> Option<String> {
        self.backend.get(ABOUT_IMG_KEY).unwrap_or_else(|e| {
            warn!("failed to read '{ABOUT_IMG_KEY}': {e}");
            None
        })
    }

    /// Stores the encoded profile image. Does not touch `lastUpdate`.
    pub fn save_about_image(&self, encoded: &str) -> StoreResult<()> {
        self.backend.set(ABOUT_IMG_KEY, encoded)
    }
}
