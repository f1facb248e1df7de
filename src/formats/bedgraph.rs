//! bedGraph format adapter: interval records and the Interval-to-Step encoder
//!
//! Consumes an ordered sequence of `chrom start end value` lines, groups
//! them into Runs by chromosome, infers `step`/`span` metadata per Run, and
//! emits one `fixedStep` block per Run.

use crate::core::{classify, read_lines, write_lines, ConvertError, ConvertResult, LineKind};
use crate::formats::track::{self, TrackFormat};
use log::debug;
use memchr::memchr2;
use std::path::Path;

/// One row of BED/bedGraph data
///
/// `value` is carried verbatim as text so a round-trip never reformats it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub value: String,
}

impl IntervalRecord {
    /// Parse an interval line (space- or tab-delimited fields)
    ///
    /// `line_no` is the 1-based source line, used only for error reporting.
    pub fn parse(line: &str, line_no: usize) -> ConvertResult<Self> {
        let fields = split_fields(line);
        if fields.len() < 4 {
            return Err(ConvertError::malformed(
                line_no,
                format!("expected 4 interval fields, found {}", fields.len()),
            ));
        }

        let start: u64 = fields[1].parse().map_err(|_| {
            ConvertError::malformed(line_no, format!("invalid start coordinate '{}'", fields[1]))
        })?;
        let end: u64 = fields[2].parse().map_err(|_| {
            ConvertError::malformed(line_no, format!("invalid end coordinate '{}'", fields[2]))
        })?;
        if end <= start {
            return Err(ConvertError::malformed(
                line_no,
                format!("interval end ({}) must exceed start ({})", end, start),
            ));
        }

        Ok(Self {
            chrom: fields[0].to_string(),
            start,
            end,
            value: fields[3].to_string(),
        })
    }

    /// Format as a tab-delimited bedGraph line
    pub fn to_line(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.value)
    }
}

/// Split a line into non-empty fields on space or tab
///
/// Consecutive separators collapse, so both delimiter conventions of
/// bedGraph sources parse identically.
fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(4);
    let mut start = 0;

    while start < bytes.len() {
        match memchr2(b'\t', b' ', &bytes[start..]) {
            Some(offset) => {
                if offset > 0 {
                    fields.push(&line[start..start + offset]);
                }
                start += offset + 1;
            }
            None => {
                fields.push(&line[start..]);
                break;
            }
        }
    }

    fields
}

/// Encoder statistics
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Interval records consumed (one output value line each)
    pub records: usize,
    /// Chromosome Runs, i.e. `fixedStep` headers emitted
    pub runs: usize,
}

/// Encode a bedGraph line vector into Wiggle body lines
///
/// `lines` is the whole input including the track line at index 0; the
/// returned vector holds only the `fixedStep` blocks (the caller rewrites
/// the header). Every record contributes exactly one value line, and the
/// number of headers equals the number of chromosome Runs.
pub fn encode_lines(lines: &[String]) -> ConvertResult<(Vec<String>, ConversionStats)> {
    let first = lines.first().ok_or(ConvertError::UnrecognizedFormat)?;
    if track::detect(first)? != TrackFormat::BedGraph {
        return Err(ConvertError::malformed(
            1,
            "expected a bedGraph track header".to_string(),
        ));
    }

    // Parse every data line, keeping source line numbers for diagnostics.
    let mut records: Vec<(usize, IntervalRecord)> = Vec::new();
    for (idx, raw) in lines.iter().enumerate().skip(1) {
        let line_no = idx + 1;
        match classify(raw) {
            LineKind::Blank | LineKind::Track => continue,
            LineKind::Declaration(_) => {
                return Err(ConvertError::malformed(
                    line_no,
                    "unexpected step declaration in interval input".to_string(),
                ));
            }
            LineKind::Value(payload) => {
                records.push((line_no, IntervalRecord::parse(payload, line_no)?));
            }
        }
    }

    let mut output = Vec::with_capacity(records.len() + 4);
    let mut stats = ConversionStats::default();

    let mut i = 0;
    while i < records.len() {
        let chrom = records[i].1.chrom.clone();
        let mut j = i + 1;
        while j < records.len() && records[j].1.chrom == chrom {
            j += 1;
        }
        let run = &records[i..j];

        output.push(run_header(run)?);
        for (_, record) in run {
            output.push(record.value.clone());
        }
        debug!("run on {}: {} records", chrom, run.len());

        stats.runs += 1;
        stats.records += run.len();
        i = j;
    }

    Ok((output, stats))
}

/// Infer a Run's `fixedStep` header from its first two records
///
/// `step` is the distance between consecutive starts, `span` the width of
/// the first interval. Irregular spacing further into the Run is not
/// detected.
fn run_header(run: &[(usize, IntervalRecord)]) -> ConvertResult<String> {
    let (first_line, first) = &run[0];
    if run.len() < 2 {
        return Err(ConvertError::malformed(
            *first_line,
            format!(
                "single-record run on {}: cannot infer step from one record",
                first.chrom
            ),
        ));
    }

    let (second_line, second) = &run[1];
    let step = second.start.checked_sub(first.start).ok_or_else(|| {
        ConvertError::malformed(
            *second_line,
            format!("records on {} are not sorted by start", first.chrom),
        )
    })?;
    let span = first.end - first.start;

    Ok(format!(
        "fixedStep chrom={} start={} step={} span={}",
        first.chrom, first.start, step, span
    ))
}

/// Convert a bedGraph file to Wiggle
///
/// Reads the whole input, encodes it, and writes the rewritten header plus
/// all `fixedStep` blocks to `output` in a single flush. No file is created
/// if any stage fails.
pub fn convert_bedgraph<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> ConvertResult<ConversionStats> {
    let lines = read_lines(input.as_ref())?;
    let (body, stats) = encode_lines(&lines)?;

    let mut out_lines = Vec::with_capacity(body.len() + 1);
    out_lines.push(track::rewrite_header(&lines[0], TrackFormat::Wiggle));
    out_lines.extend(body);
    write_lines(output.as_ref(), &out_lines)?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(content: &str) -> Vec<String> {
        content.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_parse_tab_delimited() {
        let rec = IntervalRecord::parse("chr1\t0\t100\t5", 2).unwrap();
        assert_eq!(rec.chrom, "chr1");
        assert_eq!(rec.start, 0);
        assert_eq!(rec.end, 100);
        assert_eq!(rec.value, "5");
    }

    #[test]
    fn test_parse_space_delimited() {
        let rec = IntervalRecord::parse("chr2 1000 1050 3.25", 2).unwrap();
        assert_eq!(rec.chrom, "chr2");
        assert_eq!(rec.start, 1000);
        assert_eq!(rec.end, 1050);
        assert_eq!(rec.value, "3.25");
    }

    #[test]
    fn test_parse_too_few_fields() {
        let result = IntervalRecord::parse("chr1\t0\t100", 3);
        assert!(matches!(
            result,
            Err(ConvertError::MalformedStream { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_inverted_interval() {
        let result = IntervalRecord::parse("chr1\t100\t100\t5", 4);
        assert!(matches!(result, Err(ConvertError::MalformedStream { .. })));
    }

    #[test]
    fn test_parse_rejects_non_numeric_start() {
        let result = IntervalRecord::parse("chr1\tzero\t100\t5", 2);
        assert!(matches!(result, Err(ConvertError::MalformedStream { .. })));
    }

    #[test]
    fn test_to_line_is_tab_delimited() {
        let rec = IntervalRecord {
            chrom: "chr1".to_string(),
            start: 100,
            end: 200,
            value: "1.5".to_string(),
        };
        assert_eq!(rec.to_line(), "chr1\t100\t200\t1.5");
    }

    #[test]
    fn test_split_fields_collapses_separators() {
        assert_eq!(split_fields("a  b\t\tc \td"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_encode_single_run() {
        let input = lines(
            "track type=bedGraph name=\"x\"\n\
             chr1 0 100 5\n\
             chr1 100 200 5\n\
             chr1 200 300 5",
        );
        let (body, stats) = encode_lines(&input).unwrap();

        assert_eq!(
            body,
            vec![
                "fixedStep chrom=chr1 start=0 step=100 span=100",
                "5",
                "5",
                "5"
            ]
        );
        assert_eq!(stats.records, 3);
        assert_eq!(stats.runs, 1);
    }

    #[test]
    fn test_encode_two_chromosome_runs() {
        let input = lines(
            "track type=bedGraph\n\
             chr1 0 50 1\n\
             chr1 100 150 2\n\
             chr2 500 600 3\n\
             chr2 700 800 4",
        );
        let (body, stats) = encode_lines(&input).unwrap();

        assert_eq!(stats.runs, 2);
        assert_eq!(stats.records, 4);
        assert_eq!(body[0], "fixedStep chrom=chr1 start=0 step=100 span=50");
        assert_eq!(body[3], "fixedStep chrom=chr2 start=500 step=200 span=100");
    }

    #[test]
    fn test_encode_skips_blank_and_comment_lines() {
        let input = lines(
            "track type=bedGraph\n\
             # comment\n\
             chr1 0 100 5\n\
             \n\
             chr1 100 200 5",
        );
        let (body, stats) = encode_lines(&input).unwrap();
        assert_eq!(stats.records, 2);
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_encode_single_record_run_fails() {
        let input = lines(
            "track type=bedGraph\n\
             chr1 0 100 5",
        );
        let result = encode_lines(&input);
        assert!(matches!(
            result,
            Err(ConvertError::MalformedStream { line: 2, .. })
        ));
    }

    #[test]
    fn test_encode_unsorted_run_fails() {
        let input = lines(
            "track type=bedGraph\n\
             chr1 200 300 5\n\
             chr1 100 200 5",
        );
        let result = encode_lines(&input);
        assert!(matches!(result, Err(ConvertError::MalformedStream { .. })));
    }

    #[test]
    fn test_encode_rejects_declaration_line() {
        let input = lines(
            "track type=bedGraph\n\
             fixedStep chrom=chr1 start=0 step=100 span=100",
        );
        let result = encode_lines(&input);
        assert!(matches!(result, Err(ConvertError::MalformedStream { .. })));
    }

    #[test]
    fn test_encode_rejects_wiggle_input() {
        let input = lines("track type=wiggle_0\nchr1 0 100 5\nchr1 100 200 5");
        let result = encode_lines(&input);
        assert!(matches!(result, Err(ConvertError::MalformedStream { .. })));
    }

    #[test]
    fn test_encode_empty_input() {
        let result = encode_lines(&[]);
        assert!(matches!(result, Err(ConvertError::UnrecognizedFormat)));
    }
}
