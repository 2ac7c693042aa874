//! blobpack bundles stored blobs into flat ZIP archives.
//!
//! The archive builder validates its inputs up front (non-empty file list,
//! every source present in the store, writable output directory) and then
//! writes a single flat archive whose entry names are the base names of the
//! sources. Storage is reached through the [`store::BlobStore`] trait so
//! tests and callers can supply their own backend; the authentication
//! boundary the surrounding application consumes lives in [`auth`].

pub mod archive;
pub mod auth;
pub mod error;
pub mod result;
pub mod store;

pub use archive::create_zip;
pub use auth::{CredentialValidator, Login, MemoryCredentials, User};
pub use error::Error;
pub use result::Result;
pub use store::{BlobStore, DiskStore};
