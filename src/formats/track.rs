//! Track format sniffing and header rewriting
//!
//! The first line of the input decides which conversion pipeline runs:
//! a `bedGraph` marker means the file is interval-encoded and must be
//! encoded to Wiggle, a `wiggle_0` marker means the file is step-encoded
//! and must be decoded back to intervals. The free-text `name=`/
//! `description=` metadata of the source header is carried into the
//! destination header with only the `type=` token replaced.

use crate::core::{read_first_line, ConvertError, ConvertResult};
use std::path::{Path, PathBuf};

/// Track type of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    /// Interval-encoded (`track type=bedGraph ...`)
    BedGraph,
    /// Step-encoded (`track type=wiggle_0 ...`)
    Wiggle,
}

impl TrackFormat {
    /// The `type=` token written into a track header of this format
    pub fn type_token(&self) -> &'static str {
        match self {
            TrackFormat::BedGraph => "bedGraph",
            TrackFormat::Wiggle => "wiggle_0",
        }
    }

    /// Output file extension for a file of this format
    pub fn extension(&self) -> &'static str {
        match self {
            TrackFormat::BedGraph => "bed",
            TrackFormat::Wiggle => "wig",
        }
    }

    /// The format the conversion targets
    pub fn target(&self) -> TrackFormat {
        match self {
            TrackFormat::BedGraph => TrackFormat::Wiggle,
            TrackFormat::Wiggle => TrackFormat::BedGraph,
        }
    }
}

/// Classify the first line of an input file
///
/// The marker substrings are searched anywhere in the line, matching how
/// track headers carry `type=` among free-form attributes.
pub fn detect(first_line: &str) -> ConvertResult<TrackFormat> {
    if first_line.contains("bedGraph") {
        Ok(TrackFormat::BedGraph)
    } else if first_line.contains("wiggle_0") {
        Ok(TrackFormat::Wiggle)
    } else {
        Err(ConvertError::UnrecognizedFormat)
    }
}

/// Classify an input file by reading only its first line
///
/// An empty file is unrecognized. Fails before any output is created.
pub fn detect_file<P: AsRef<Path>>(path: P) -> ConvertResult<TrackFormat> {
    let first = read_first_line(path)?.ok_or(ConvertError::UnrecognizedFormat)?;
    detect(&first)
}

/// Rewrite a source track header for the destination format
///
/// Splits on whitespace, discards the first two tokens (`track` and the old
/// `type=`), and re-joins the remainder as the metadata tail. An empty tail
/// is valid.
pub fn rewrite_header(source_line: &str, target: TrackFormat) -> String {
    let metadata: Vec<&str> = source_line.split_whitespace().skip(2).collect();
    if metadata.is_empty() {
        format!("track type={}", target.type_token())
    } else {
        format!("track type={} {}", target.type_token(), metadata.join(" "))
    }
}

/// Output path for a conversion targeting `target`
///
/// Conversions always write `converted_file.<ext>` in the working directory.
pub fn default_output_path(target: TrackFormat) -> PathBuf {
    PathBuf::from(format!("converted_file.{}", target.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bedgraph() {
        let line = "track type=bedGraph name=\"signal\"";
        assert_eq!(detect(line).unwrap(), TrackFormat::BedGraph);
    }

    #[test]
    fn test_detect_wiggle() {
        let line = "track type=wiggle_0 description=\"coverage\"";
        assert_eq!(detect(line).unwrap(), TrackFormat::Wiggle);
    }

    #[test]
    fn test_detect_unknown_fails() {
        let result = detect("track type=narrowPeak");
        assert!(matches!(result, Err(ConvertError::UnrecognizedFormat)));
    }

    #[test]
    fn test_detect_empty_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let result = detect_file(temp.path());
        assert!(matches!(result, Err(ConvertError::UnrecognizedFormat)));
    }

    #[test]
    fn test_rewrite_header_preserves_metadata() {
        let source = "track type=bedGraph name=\"x\" description=\"y\"";
        assert_eq!(
            rewrite_header(source, TrackFormat::Wiggle),
            "track type=wiggle_0 name=\"x\" description=\"y\""
        );
    }

    #[test]
    fn test_rewrite_header_to_bedgraph() {
        let source = "track type=wiggle_0 name=\"x\"";
        assert_eq!(
            rewrite_header(source, TrackFormat::BedGraph),
            "track type=bedGraph name=\"x\""
        );
    }

    #[test]
    fn test_rewrite_header_empty_metadata() {
        assert_eq!(
            rewrite_header("track type=bedGraph", TrackFormat::Wiggle),
            "track type=wiggle_0"
        );
    }

    #[test]
    fn test_target_and_extension() {
        assert_eq!(TrackFormat::BedGraph.target(), TrackFormat::Wiggle);
        assert_eq!(TrackFormat::Wiggle.target(), TrackFormat::BedGraph);
        assert_eq!(TrackFormat::BedGraph.extension(), "bed");
        assert_eq!(TrackFormat::Wiggle.extension(), "wig");
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(TrackFormat::Wiggle),
            PathBuf::from("converted_file.wig")
        );
        assert_eq!(
            default_output_path(TrackFormat::BedGraph),
            PathBuf::from("converted_file.bed")
        );
    }
}
