//! Assets and the storage around them.
//!
//! - **Entities**: [`AssetRegistry`] owns the canonical copy of every asset
//!   a generator produces
//! - **Key-value store**: [`AssetStore`] is a string-keyed JSON map that
//!   snapshots itself to disk after every change
//! - **File I/O**: thin text, byte, CSV and JSON helpers that create parent
//!   directories on write

pub mod entity;
pub mod error;
pub mod io;
pub mod store;

pub use entity::{Asset, AssetRegistry};
pub use error::IoError;
pub use io::Record;
pub use store::AssetStore;
