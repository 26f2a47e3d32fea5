#![allow(non_snake_case, non_upper_case_globals)]

pub mod header;
pub mod decode;
pub mod encode;

pub use header::QfsHeader;
pub use decode::{decode, decodeInto};
pub use encode::compress;
