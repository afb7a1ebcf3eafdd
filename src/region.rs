//! Syntenic region pairs: the input to a synteny render pass.
//!
//! A [`SyntenicRegionPair`] connects a [`GenomicRegion`] on one chromosome to a
//! [`GenomicRegion`] on another. Pairs are plain data; the render pass decorates
//! each region with its pixel span in place (see [`GenomicRegion::start_px`]).

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::file::InputFile;
use super::synteny::SyntenyError;

/// The integer type for genomic positions, in base pairs.
pub type Position = u64;

/// The float type for on-screen coordinates.
pub type Pixel = f64;

/// Fill color of a syntenic region that does not set its own.
pub const DEFAULT_COLOR: &str = "#CFC";

/// Fill opacity of a syntenic region that does not set its own.
pub const DEFAULT_OPACITY: f64 = 1.0;

/// A reference to a chromosome of the host ideogram, by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChromosomeRef {
    pub id: String,
}

impl ChromosomeRef {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl From<&str> for ChromosomeRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChromosomeRef {
    fn from(id: String) -> Self {
        Self { id }
    }
}

impl fmt::Display for ChromosomeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A genomic interval `[start, stop]` on a single chromosome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicRegion {
    pub chr: ChromosomeRef,
    pub start: Position,
    pub stop: Position,
    /// Pixel position of `start`, set once the region has been resolved.
    #[serde(skip)]
    pub start_px: Option<Pixel>,
    /// Pixel position of `stop`, set once the region has been resolved.
    #[serde(skip)]
    pub stop_px: Option<Pixel>,
}

impl GenomicRegion {
    pub fn new(chr: impl Into<ChromosomeRef>, start: Position, stop: Position) -> Self {
        Self {
            chr: chr.into(),
            start,
            stop,
            start_px: None,
            stop_px: None,
        }
    }

    /// Whether the pixel span of this region has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.start_px.is_some() && self.stop_px.is_some()
    }
}

/// One connection between a region on one chromosome and a region on another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntenicRegionPair {
    pub r1: GenomicRegion,
    pub r2: GenomicRegion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl SyntenicRegionPair {
    pub fn new(r1: GenomicRegion, r2: GenomicRegion) -> Self {
        Self {
            r1,
            r2,
            color: None,
            opacity: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// The fill color, taken verbatim from the pair or [`DEFAULT_COLOR`].
    pub fn fill_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// The fill opacity, taken verbatim from the pair or [`DEFAULT_OPACITY`].
    pub fn fill_opacity(&self) -> f64 {
        self.opacity.unwrap_or(DEFAULT_OPACITY)
    }

    /// The identifier of the rendered region, e.g. `1_0_100___2_50_150`.
    ///
    /// Pairs with identical coordinates share an identifier.
    pub fn region_id(&self) -> String {
        format!(
            "{}_{}_{}___{}_{}_{}",
            self.r1.chr, self.r1.start, self.r1.stop, self.r2.chr, self.r2.start, self.r2.stop
        )
    }
}

fn parse_position(field: Option<&str>, column: &str) -> Result<Position, SyntenyError> {
    let field = field.ok_or(SyntenyError::MissingField)?;
    field.trim().parse().map_err(|_| {
        SyntenyError::ParseError(format!("Failed to parse {} from string: {}", column, field))
    })
}

fn parse_region(
    record: &csv::StringRecord,
    offset: usize,
    suffix: &str,
) -> Result<GenomicRegion, SyntenyError> {
    let chrom = record.get(offset).ok_or(SyntenyError::MissingField)?;
    let start = parse_position(record.get(offset + 1), &format!("start{}", suffix))?;
    let stop = parse_position(record.get(offset + 2), &format!("stop{}", suffix))?;
    if start > stop {
        return Err(SyntenyError::InvalidRange(chrom.to_string(), start, stop));
    }
    Ok(GenomicRegion::new(chrom.trim(), start, stop))
}

/// Read syntenic region pairs from a tab-delimited file.
///
/// The file may be gzip-compressed. The columns are:
///
/// ```text
/// chrom1  start1  stop1   chrom2  start2  stop2   [color  [opacity]]
/// 1       0       100     2       50      150
/// 1       200     900     2       700     300     #F99    0.5
/// ```
///
/// Lines starting with `#` are skipped, as are header lines starting with `chrom1`.
/// Empty color or opacity columns fall back to the defaults.
pub fn read_synteny(filepath: &str) -> Result<Vec<SyntenicRegionPair>, SyntenyError> {
    let buf_reader = InputFile::new(filepath).reader()?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(buf_reader);

    let mut pairs = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.get(0) == Some("chrom1") {
            continue;
        }
        let r1 = parse_region(&record, 0, "1")?;
        let r2 = parse_region(&record, 3, "2")?;
        let mut pair = SyntenicRegionPair::new(r1, r2);

        if let Some(color) = record.get(6).map(str::trim).filter(|s| !s.is_empty()) {
            pair.color = Some(color.to_string());
        }
        if let Some(opacity) = record.get(7).map(str::trim).filter(|s| !s.is_empty()) {
            let opacity: f64 = opacity.parse().map_err(|_| {
                SyntenyError::ParseError(format!(
                    "Failed to parse opacity from string: {}",
                    opacity
                ))
            })?;
            pair.opacity = Some(opacity);
        }
        pairs.push(pair);
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> SyntenicRegionPair {
        SyntenicRegionPair::new(
            GenomicRegion::new("1", 0, 100),
            GenomicRegion::new("2", 50, 150),
        )
    }

    #[test]
    fn test_region_id() {
        assert_eq!(pair().region_id(), "1_0_100___2_50_150");
    }

    #[test]
    fn test_identical_pairs_share_id() {
        assert_eq!(pair().region_id(), pair().region_id());
    }

    #[test]
    fn test_style_defaults() {
        let p = pair();
        assert_eq!(p.fill_color(), DEFAULT_COLOR);
        assert_eq!(p.fill_opacity(), 1.0);
    }

    #[test]
    fn test_style_overrides_verbatim() {
        let p = pair().with_color("not-a-color").with_opacity(0.0);
        assert_eq!(p.fill_color(), "not-a-color");
        assert_eq!(p.fill_opacity(), 0.0);
    }

    #[test]
    fn test_read_synteny() {
        let pairs = read_synteny("tests/data/human_chimp_synteny.tsv").unwrap();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].region_id(), "1_0_100___2_50_150");
        assert_eq!(pairs[0].color, None);
        assert_eq!(pairs[1].fill_color(), "#F99");
        assert_eq!(pairs[1].opacity, Some(0.5));
        assert_eq!(pairs[2].fill_color(), "#99F");
        assert_eq!(pairs[2].opacity, None);
        assert!(!pairs[3].r1.is_resolved());
    }

    #[test]
    fn test_read_synteny_rejects_reversed_range() {
        let result = read_synteny("tests/data/reversed_range.tsv");
        assert!(matches!(result, Err(SyntenyError::InvalidRange(_, 500, 100))));
    }

    #[test]
    fn test_read_synteny_missing_column() {
        let result = read_synteny("tests/data/truncated.tsv");
        assert!(matches!(result, Err(SyntenyError::MissingField)));
    }
}
