//! Wiggle format adapter: step declarations and the Step-to-Interval decoder
//!
//! Consumes a Wiggle stream of `fixedStep`/`variableStep` blocks and
//! reconstructs explicit `(chrom, start, end, value)` interval records.
//! The declaration keyword of the first block fixes the mode for the whole
//! stream; each declaration line resets all decode state, so no metadata
//! leaks across blocks.

use crate::core::{classify, read_lines, write_lines, ConvertError, ConvertResult, LineKind, WigFormat};
use crate::formats::bedgraph::IntervalRecord;
use crate::formats::track::{self, TrackFormat};
use log::debug;
use std::path::Path;

/// Parsed form of a `fixedStep` or `variableStep` declaration line
#[derive(Debug, Clone)]
pub struct WigDeclaration {
    pub format: WigFormat,
    pub chrom: String,
    pub span: u64,
    /// Only for fixedStep
    pub start: Option<u64>,
    /// Only for fixedStep
    pub step: Option<u64>,
}

impl WigDeclaration {
    /// Parse a declaration line
    ///
    /// `chrom` and `span` are required in both modes; `start` and `step` are
    /// additionally required for `fixedStep`. Unknown `key=value` pairs are
    /// ignored.
    pub fn parse(line: &str, line_no: usize) -> ConvertResult<Self> {
        let line = line.trim();
        let (format, rest) = if let Some(rest) = line.strip_prefix("fixedStep") {
            (WigFormat::FixedStep, rest)
        } else if let Some(rest) = line.strip_prefix("variableStep") {
            (WigFormat::VariableStep, rest)
        } else {
            return Err(ConvertError::malformed(
                line_no,
                "expected a fixedStep or variableStep declaration".to_string(),
            ));
        };

        let mut chrom = None;
        let mut span = None;
        let mut start = None;
        let mut step = None;

        for part in rest.split_whitespace() {
            if let Some((key, value)) = part.split_once('=') {
                match key {
                    "chrom" => chrom = Some(value.to_string()),
                    "span" => span = Some(parse_field("span", value, line_no)?),
                    "start" => start = Some(parse_field("start", value, line_no)?),
                    "step" => step = Some(parse_field("step", value, line_no)?),
                    _ => {}
                }
            }
        }

        let chrom = chrom.ok_or(ConvertError::MissingField {
            field: "chrom",
            line: line_no,
        })?;
        let span = span.ok_or(ConvertError::MissingField {
            field: "span",
            line: line_no,
        })?;
        if format == WigFormat::FixedStep {
            if start.is_none() {
                return Err(ConvertError::MissingField {
                    field: "start",
                    line: line_no,
                });
            }
            if step.is_none() {
                return Err(ConvertError::MissingField {
                    field: "step",
                    line: line_no,
                });
            }
        }

        Ok(Self {
            format,
            chrom,
            span,
            start,
            step,
        })
    }
}

fn parse_field(field: &'static str, value: &str, line_no: usize) -> ConvertResult<u64> {
    value.parse().map_err(|_| {
        ConvertError::malformed(line_no, format!("invalid {} value '{}'", field, value))
    })
}

/// Decode state of the current block
enum BlockState {
    Fixed {
        chrom: String,
        span: u64,
        step: u64,
        position: u64,
    },
    Variable {
        chrom: String,
        span: u64,
    },
}

/// Decoder statistics
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Interval records produced (one per value line)
    pub records: usize,
    /// Declaration blocks decoded
    pub blocks: usize,
}

/// Decode a Wiggle line vector into interval records
///
/// `lines` is the whole input including the track line at index 0. Every
/// value line produces exactly one record.
pub fn decode_lines(lines: &[String]) -> ConvertResult<(Vec<IntervalRecord>, ConversionStats)> {
    let first = lines.first().ok_or(ConvertError::UnrecognizedFormat)?;
    if track::detect(first)? != TrackFormat::Wiggle {
        return Err(ConvertError::malformed(
            1,
            "expected a wiggle_0 track header".to_string(),
        ));
    }

    // The first declaration locks the mode for the whole stream.
    let mut mode: Option<WigFormat> = None;
    let mut block: Option<BlockState> = None;
    let mut records = Vec::new();
    let mut stats = ConversionStats::default();

    for (idx, raw) in lines.iter().enumerate().skip(1) {
        let line_no = idx + 1;
        match classify(raw) {
            LineKind::Blank | LineKind::Track => continue,
            LineKind::Declaration(kind) => {
                match mode {
                    None => mode = Some(kind),
                    Some(locked) if locked != kind => {
                        return Err(ConvertError::malformed(
                            line_no,
                            "mixed fixedStep/variableStep streams are not supported".to_string(),
                        ));
                    }
                    Some(_) => {}
                }

                let decl = WigDeclaration::parse(raw, line_no)?;
                debug!("block on {}: {} span={}", decl.chrom, kind.keyword(), decl.span);
                block = Some(match kind {
                    WigFormat::FixedStep => {
                        let start = decl.start.ok_or(ConvertError::MissingField {
                            field: "start",
                            line: line_no,
                        })?;
                        let step = decl.step.ok_or(ConvertError::MissingField {
                            field: "step",
                            line: line_no,
                        })?;
                        BlockState::Fixed {
                            chrom: decl.chrom,
                            span: decl.span,
                            step,
                            position: start,
                        }
                    }
                    WigFormat::VariableStep => BlockState::Variable {
                        chrom: decl.chrom,
                        span: decl.span,
                    },
                });
                stats.blocks += 1;
            }
            LineKind::Value(payload) => {
                let state = block.as_mut().ok_or_else(|| {
                    ConvertError::malformed(
                        line_no,
                        "value line before any declaration".to_string(),
                    )
                })?;
                match state {
                    BlockState::Fixed {
                        chrom,
                        span,
                        step,
                        position,
                    } => {
                        records.push(IntervalRecord {
                            chrom: chrom.clone(),
                            start: *position,
                            end: *position + *span,
                            value: payload.to_string(),
                        });
                        *position += *step;
                    }
                    BlockState::Variable { chrom, span } => {
                        let mut fields = payload.split_whitespace();
                        let position_token = fields.next().unwrap_or(payload);
                        let value = fields.next().ok_or_else(|| {
                            ConvertError::malformed(
                                line_no,
                                format!("expected 'position value', found '{}'", payload),
                            )
                        })?;
                        let position: u64 = position_token.parse().map_err(|_| {
                            ConvertError::malformed(
                                line_no,
                                format!("invalid position '{}'", position_token),
                            )
                        })?;
                        records.push(IntervalRecord {
                            chrom: chrom.clone(),
                            start: position,
                            end: position + *span,
                            value: value.to_string(),
                        });
                    }
                }
                stats.records += 1;
            }
        }
    }

    Ok((records, stats))
}

/// Convert a Wiggle file to bedGraph
///
/// Reads the whole input, decodes it, and writes the rewritten header plus
/// one tab-delimited interval line per record to `output` in a single
/// flush. No file is created if any stage fails.
pub fn convert_wig<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> ConvertResult<ConversionStats> {
    let lines = read_lines(input.as_ref())?;
    let (records, stats) = decode_lines(&lines)?;

    let mut out_lines = Vec::with_capacity(records.len() + 1);
    out_lines.push(track::rewrite_header(&lines[0], TrackFormat::BedGraph));
    out_lines.extend(records.iter().map(IntervalRecord::to_line));
    write_lines(output.as_ref(), &out_lines)?;

    Ok(stats)
}
