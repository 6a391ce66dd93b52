//! wiretap-cli library, exposed so the binary and unit tests share one module tree.

pub mod app;
pub mod commands;
pub mod logging;
