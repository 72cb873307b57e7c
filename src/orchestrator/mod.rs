//! Photo capture and upload coordination.
//!
//! The orchestrator sits between a platform picker (camera or library) and the
//! upload endpoint, and owns the bounded list of remote photo URLs a screen
//! attaches to a job or quote request.

pub mod photos;
pub mod picker;

pub use self::{
    photos::{AddPhotosOutcome, PhotoError, PhotoList, PhotoUploadOrchestrator, SlotState, UploadTally},
    picker::{CustomerPhotoUploader, ImagePicker, PhotoUploader, PickSource},
};
