//! Featured image handling: download from a URL, then register as an attachment.

pub mod fetcher;
pub mod models;
pub mod store;

pub use fetcher::{HttpImageFetcher, ImageFetchError, ImageFetcher, DEFAULT_MAX_IMAGE_BYTES};
pub use models::{Attachment, AttachmentMetadata, AttachmentStatus, DownloadedImage};
pub use store::{LocalMediaStore, MediaError, MediaStore};
