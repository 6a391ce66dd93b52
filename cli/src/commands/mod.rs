pub mod cli;
pub mod decode;
