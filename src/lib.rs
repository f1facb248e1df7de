//! BedWig - bidirectional bedGraph to Wiggle and back transcoding
//!
//! Converts between two genomic-interval text encodings: per-base interval
//! listings (BED/bedGraph, one `chrom start end value` line per interval)
//! and step-based signal encodings (Wiggle `fixedStep`/`variableStep`
//! blocks).
//!
//! # Example
//!
//! ```ignore
//! use bedwig::formats::{self, TrackFormat};
//!
//! let format = formats::detect_file("signal.bedGraph")?;
//! let output = formats::default_output_path(format.target());
//! match format {
//!     TrackFormat::BedGraph => {
//!         formats::convert_bedgraph("signal.bedGraph", &output)?;
//!     }
//!     TrackFormat::Wiggle => {
//!         formats::convert_wig("signal.bedGraph", &output)?;
//!     }
//! }
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{classify, ConvertError, ConvertResult, LineKind, WigFormat};
pub use crate::formats::{
    convert_bedgraph, convert_wig, decode_lines, default_output_path, detect, detect_file,
    encode_lines, rewrite_header, IntervalRecord, TrackFormat, WigDeclaration,
};
