#![allow(non_snake_case, non_upper_case_globals)]

pub mod bytes;
pub mod container;
pub mod error;
pub mod qfs;
pub mod resource;

pub use bytes::ByteReader;
pub use container::{readDirectory, EntryKind, IndexEntry};
pub use error::IxfError;
pub use resource::{dispatch, ResourceKind};
