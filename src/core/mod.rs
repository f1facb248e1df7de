//! Core transcoding plumbing
//!
//! This module contains the error taxonomy, the line-oriented file I/O
//! helpers, and the tagged line classifier shared by both conversion
//! pipelines.

mod error;
pub mod io;
mod line;

pub use error::{ConvertError, ConvertResult};
pub use io::{read_first_line, read_lines, write_lines, DEFAULT_BUFFER_SIZE};
pub use line::{classify, LineKind, WigFormat};
