//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod dev;
pub(crate) mod init;
pub(crate) mod serve;
