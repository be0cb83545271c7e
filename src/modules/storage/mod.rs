//! Storage module for uploaded pictures
//!
//! Local-disk backend behind the /images static mount.

mod media_store;

pub use media_store::{MediaStore, UploadedPicture};
