//! Infrastructure layer - storage and runtime plumbing

pub mod logging;
pub mod user;
