#![allow(non_snake_case, non_upper_case_globals)]

pub mod entry;
pub mod directory;

pub use entry::{EntryKind, IndexEntry};
pub use directory::{readDirectory, ContainerSignature};
