//! File format adapters
//!
//! Adapters for the two genomic signal text encodings (bedGraph intervals,
//! Wiggle steps) plus the shared track header handling.

pub mod bedgraph;
pub mod track;
pub mod wig;

pub use bedgraph::{
    convert_bedgraph, encode_lines, ConversionStats as BedGraphConversionStats, IntervalRecord,
};
pub use track::{default_output_path, detect, detect_file, rewrite_header, TrackFormat};
pub use wig::{convert_wig, decode_lines, ConversionStats as WigConversionStats, WigDeclaration};
