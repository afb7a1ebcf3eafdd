//! The host ideogram: coordinate conversion, layout, configuration and scene.
//!
//! The render pass in [`crate::synteny`] never computes genomic layout itself;
//! everything it needs from the surrounding genome browser goes through the
//! [`Ideogram`] trait. [`LinearIdeogram`] is a self-contained host that scales
//! every chromosome relative to the longest one, which is what the command-line
//! tool renders into.

use genomap::GenomeMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::numeric::interp1d;
use super::region::{ChromosomeRef, Pixel, Position};
use super::scene::Scene;
use super::synteny::SyntenyError;

/// Host configuration consulted by the render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeogramConfig {
    /// Emit a timing diagnostic after each render pass.
    pub debug: bool,
    /// Visual width of a chromosome, in pixels.
    pub chr_width: Pixel,
    /// Height of the longest chromosome, in pixels.
    pub chr_height: Pixel,
    /// Distance between adjacent chromosome sets, in pixels.
    pub chr_spacing: Pixel,
    /// Selector of the host's root visual container, e.g. `#_ideogram`.
    pub selector: String,
}

impl Default for IdeogramConfig {
    fn default() -> Self {
        Self {
            debug: false,
            chr_width: 10.0,
            chr_height: 400.0,
            chr_spacing: 200.0,
            selector: "#_ideogram".to_string(),
        }
    }
}

/// Layout margin of the host, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: Pixel,
    pub top: Pixel,
}

/// The services a host visualization provides to the synteny renderer.
pub trait Ideogram {
    fn config(&self) -> &IdeogramConfig;

    /// Convert a base pair position on a chromosome to a pixel position along it.
    ///
    /// Must preserve the order of positions on the same chromosome.
    fn convert_bp_to_px(&self, chr: &ChromosomeRef, bp: Position) -> Result<Pixel, SyntenyError>;

    fn margin(&self) -> Margin;

    /// The pixel coordinate of the track holding chromosome set `set`.
    fn chromosome_set_translate(&self, set: usize) -> Pixel;

    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;

    /// Diagnostic sink, used for debug timing output.
    fn report(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// A piecewise-linear map from base pairs to pixels for a single chromosome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelScale {
    /// Sorted base pair anchors, starting at zero and ending at the chromosome length.
    pub bp: Vec<Position>,
    /// Pixel positions of each anchor.
    pub px: Vec<Pixel>,
}

impl PixelScale {
    /// A scale mapping `[0, length]` linearly onto `[0, height]`.
    pub fn linear(length: Position, height: Pixel) -> Self {
        Self {
            bp: vec![0, length],
            px: vec![0.0, height],
        }
    }

    /// The chromosome length covered by this scale.
    pub fn length(&self) -> Position {
        self.bp.last().copied().unwrap_or(0)
    }

    /// Interpolate the pixel position of `bp`; `None` past the chromosome end.
    pub fn to_px(&self, bp: Position) -> Option<Pixel> {
        if bp > self.length() {
            return None;
        }
        interp1d(&self.bp, &self.px, bp)
    }
}

/// Read a tab-delimited *genome file* of sequence (i.e. chromosome) names and their lengths.
pub fn read_seqlens(filepath: &str) -> Result<IndexMap<String, Position>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_path(filepath)?;

    let mut seqlens = IndexMap::new();

    #[derive(Debug, Serialize, Deserialize, Default)]
    struct SeqLenEntry {
        chrom: String,
        length: Position,
    }

    for result in rdr.deserialize() {
        let record: SeqLenEntry = result?;
        seqlens.insert(record.chrom, record.length);
    }

    Ok(seqlens)
}

/// A standalone host laying out two chromosome sets side by side.
pub struct LinearIdeogram {
    pub config: IdeogramConfig,
    pub margin: Margin,
    scales: GenomeMap<PixelScale>,
    scene: Scene,
}

impl LinearIdeogram {
    /// Create a new [`LinearIdeogram`] from chromosome names and lengths.
    ///
    /// Each chromosome is drawn with a height proportional to its length, the
    /// longest one being `config.chr_height` pixels tall.
    pub fn new(
        seqlens: &IndexMap<String, Position>,
        config: IdeogramConfig,
    ) -> Result<Self, SyntenyError> {
        let max_len = seqlens.values().copied().max().unwrap_or(0);
        let mut scales = GenomeMap::new();
        for (name, &length) in seqlens {
            let height = if max_len == 0 {
                0.0
            } else {
                config.chr_height * length as Pixel / max_len as Pixel
            };
            scales.insert(name, PixelScale::linear(length, height))?;
        }
        let scene = Scene::new(&config.selector);
        Ok(Self {
            config,
            margin: Margin::default(),
            scales,
            scene,
        })
    }

    /// Create a new [`LinearIdeogram`] from a TSV genome file (see [`read_seqlens`]).
    pub fn from_seqlens_file(filepath: &str, config: IdeogramConfig) -> Result<Self, SyntenyError> {
        let seqlens = read_seqlens(filepath)?;
        Self::new(&seqlens, config)
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Replace the scale of a chromosome, e.g. with one anchored at band boundaries.
    pub fn set_scale(&mut self, name: &str, scale: PixelScale) -> Result<(), SyntenyError> {
        let entry = self
            .scales
            .get_mut(name)
            .ok_or(SyntenyError::NoChrom(name.to_string()))?;
        *entry = scale;
        Ok(())
    }

    pub fn scale(&self, name: &str) -> Option<&PixelScale> {
        self.scales.get(name)
    }

    /// Width and height of the canvas holding both chromosome sets.
    ///
    /// Chromosomes run vertically, and `margin.left` offsets positions along
    /// them, so it pads the height while `margin.top` pads the width.
    pub fn canvas_size(&self) -> (Pixel, Pixel) {
        let width = self.chromosome_set_translate(1) + self.config.chr_width + self.margin.top;
        let height = self.margin.left + self.config.chr_height + self.margin.left;
        (width, height)
    }
}

impl Ideogram for LinearIdeogram {
    fn config(&self) -> &IdeogramConfig {
        &self.config
    }

    fn convert_bp_to_px(&self, chr: &ChromosomeRef, bp: Position) -> Result<Pixel, SyntenyError> {
        let scale = self
            .scales
            .get(&chr.id)
            .ok_or(SyntenyError::NoChrom(chr.id.clone()))?;
        scale
            .to_px(bp)
            .ok_or(SyntenyError::LookupOutOfBounds(chr.id.clone(), bp))
    }

    fn margin(&self) -> Margin {
        self.margin
    }

    fn chromosome_set_translate(&self, set: usize) -> Pixel {
        self.margin.top + self.config.chr_width + set as Pixel * self.config.chr_spacing
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}
