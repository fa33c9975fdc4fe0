//! CLI command implementations

pub mod describe;
pub mod explain;
pub mod sync;
pub mod tag;
pub mod upload;
pub mod validate;
pub mod write;
