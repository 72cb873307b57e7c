use futures::future::join_all;
use std::fmt;
use tokio::sync::watch;

use crate::orchestrator::picker::{ImagePicker, PhotoUploader, PickSource};

/// Remote URLs of photos already uploaded, capped at `max`.
///
/// Only URLs returned by a successful upload ever enter the list, never local
/// URIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoList {
    urls: Vec<String>,
    max: usize,
}

impl PhotoList {
    pub fn new(max: usize) -> Self {
        Self {
            urls: Vec::new(),
            max,
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.urls.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns false, leaving the list untouched, when it is already full.
    pub fn push(&mut self, url: String) -> bool {
        if self.is_full() {
            return false;
        }
        self.urls.push(url);
        true
    }

    /// Out-of-range indexes are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.urls.len() {
            Some(self.urls.remove(index))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    Picking,
    Uploading,
    Committed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTally {
    pub succeeded: usize,
    pub attempted: usize,
}

impl UploadTally {
    pub fn is_complete(&self) -> bool {
        self.attempted > 0 && self.succeeded == self.attempted
    }

    pub fn is_partial(&self) -> bool {
        self.succeeded > 0 && self.succeeded < self.attempted
    }

    pub fn is_failure(&self) -> bool {
        self.succeeded == 0
    }
}

impl fmt::Display for UploadTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} uploaded", self.succeeded, self.attempted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPhotosOutcome {
    Cancelled,
    Uploaded(UploadTally),
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("photo limit reached ({max})")]
    LimitReached { max: usize },

    #[error("image picker failed: {0}")]
    Picker(anyhow::Error),
}

/// Drives one photo slot: `Idle -> Picking -> Uploading -> Committed | Failed`,
/// then back to `Idle`.
///
/// `add_photos` holds `&mut self` for the whole batch, so intermediate states
/// are observed through [`subscribe`](Self::subscribe).
pub struct PhotoUploadOrchestrator<P, U> {
    picker: P,
    uploader: U,
    photos: PhotoList,
    state: watch::Sender<SlotState>,
    last_result: Option<SlotState>,
}

impl<P: ImagePicker, U: PhotoUploader> PhotoUploadOrchestrator<P, U> {
    pub fn new(picker: P, uploader: U, max_photos: usize) -> Self {
        Self {
            picker,
            uploader,
            photos: PhotoList::new(max_photos),
            state: watch::Sender::new(SlotState::Idle),
            last_result: None,
        }
    }

    pub fn photos(&self) -> &PhotoList {
        &self.photos
    }

    pub fn into_photos(self) -> PhotoList {
        self.photos
    }

    pub fn state(&self) -> SlotState {
        *self.state.borrow()
    }

    /// Every transition, including the terminal `Committed`/`Failed` before
    /// the slot returns to `Idle`.
    pub fn subscribe(&self) -> watch::Receiver<SlotState> {
        self.state.subscribe()
    }

    fn set_state(&self, state: SlotState) {
        self.state.send_replace(state);
    }

    /// Terminal state of the most recent batch, if any batch reached upload.
    pub fn last_result(&self) -> Option<SlotState> {
        self.last_result
    }

    pub fn can_add(&self) -> bool {
        !self.photos.is_full()
    }

    pub async fn take_photo(&mut self) -> Result<AddPhotosOutcome, PhotoError> {
        self.add_photos(PickSource::Camera).await
    }

    pub async fn pick_from_library(&mut self) -> Result<AddPhotosOutcome, PhotoError> {
        self.add_photos(PickSource::Library).await
    }

    /// Picks, uploads concurrently and appends whatever succeeded.
    ///
    /// A full list is rejected before the picker is opened. Selections beyond
    /// the remaining capacity are dropped.
    pub async fn add_photos(&mut self, source: PickSource) -> Result<AddPhotosOutcome, PhotoError> {
        if self.photos.is_full() {
            return Err(PhotoError::LimitReached {
                max: self.photos.max(),
            });
        }

        let limit = match source {
            PickSource::Camera => 1,
            PickSource::Library => self.photos.remaining(),
        };

        self.set_state(SlotState::Picking);
        let mut files = match self.picker.pick(source, limit).await {
            Ok(Some(files)) if !files.is_empty() => files,
            Ok(_) => {
                self.set_state(SlotState::Idle);
                return Ok(AddPhotosOutcome::Cancelled);
            }
            Err(e) => {
                self.set_state(SlotState::Idle);
                return Err(PhotoError::Picker(e));
            }
        };
        files.truncate(limit);

        self.set_state(SlotState::Uploading);
        let attempted = files.len();
        let uploader = &self.uploader;
        let results = join_all(files.into_iter().map(|file| uploader.upload_photo(file))).await;

        let mut succeeded = 0;
        for result in results {
            match result {
                Ok(url) => {
                    if self.photos.push(url) {
                        succeeded += 1;
                    }
                }
                Err(e) => tracing::warn!("photo upload failed: {}", e),
            }
        }

        let tally = UploadTally {
            succeeded,
            attempted,
        };
        let terminal = if tally.is_failure() {
            tracing::warn!("photo batch failed: {}", tally);
            SlotState::Failed
        } else {
            tracing::info!("photo batch committed: {}", tally);
            SlotState::Committed
        };
        self.set_state(terminal);
        self.last_result = Some(terminal);
        self.set_state(SlotState::Idle);

        Ok(AddPhotosOutcome::Uploaded(tally))
    }

    /// Drops the entry locally. The orphaned remote object is not deleted.
    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        self.photos.remove(index)
    }
}
