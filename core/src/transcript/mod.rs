//! Escaped byte transcripts.
//!
//! Every byte a forwarder moves is appended here. Line feeds become `<LF>`
//! followed by a real newline, carriage returns become `<CR>`, everything
//! else is written as-is.
mod codec;
mod sink;

pub use codec::{decode_transcript, encode, encode_byte, CR_MARKER};
pub use sink::Transcript;
