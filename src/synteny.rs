use std::io;
use std::time::Instant;
use thiserror::Error;

use genomap::GenomeMapError;

use super::file::FileError;
use super::ideogram::Ideogram;
use super::interaction::PointerEvent;
use super::region::{GenomicRegion, Pixel, Position, SyntenicRegionPair};
use super::scene::{Element, NodeId};

/// Class of the container group created by each render pass.
pub const SYNTENY_CLASS: &str = "synteny";

/// Class of the group holding one rendered syntenic region.
pub const REGION_CLASS: &str = "syntenicRegion";

/// Class of the two lines bounding a rendered syntenic region.
pub const BORDER_CLASS: &str = "syntenyBorder";

#[derive(Error, Debug)]
pub enum SyntenyError {
    #[error("Synteny parsing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("File reading eror: {0}")]
    FileError(#[from] FileError),
    #[error("Missing field")]
    MissingField,
    #[error("Failed to parse a column of a synteny file: {0}")]
    ParseError(String),
    #[error("Region start is past its stop ({0}:{1}-{2})")]
    InvalidRange(String, Position, Position),
    #[error("Chromosome key '{0}' does not exist")]
    NoChrom(String),
    #[error("Lookup out of bounds ({0}:{1})")]
    LookupOutOfBounds(String, Position),
    #[error("Scene node {0} does not exist")]
    NoNode(usize),
    #[error("Not a rendered syntenic region: {0}")]
    UnknownRegion(String),
    #[error("GenomeMap Error: error updating GenomeMap")]
    GenomeMapError(#[from] GenomeMapError),
}

/// The resolved pixel positions of a region's start and stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpan {
    pub start: Pixel,
    pub stop: Pixel,
}

fn resolve_region<I: Ideogram + ?Sized>(
    region: &mut GenomicRegion,
    x_offset: Pixel,
    ideo: &I,
) -> Result<PixelSpan, SyntenyError> {
    let start = ideo.convert_bp_to_px(&region.chr, region.start)? + x_offset;
    let stop = ideo.convert_bp_to_px(&region.chr, region.stop)? + x_offset;
    region.start_px = Some(start);
    region.stop_px = Some(stop);
    Ok(PixelSpan { start, stop })
}

/// Resolve the pixel spans of both regions of `pair`, shifted by `x_offset`.
///
/// The spans are also stored on the regions themselves (`start_px`, `stop_px`).
pub fn resolve_pair<I: Ideogram + ?Sized>(
    pair: &mut SyntenicRegionPair,
    x_offset: Pixel,
    ideo: &I,
) -> Result<(PixelSpan, PixelSpan), SyntenyError> {
    let s1 = resolve_region(&mut pair.r1, x_offset, ideo)?;
    let s2 = resolve_region(&mut pair.r2, x_offset, ideo)?;
    Ok((s1, s2))
}

/// Corners of the quadrilateral joining `s1` on track `x1` to `s2` on track `x2`.
///
/// The start edges and the stop edges are joined, so an inverted pair yields
/// a crossed shape.
pub fn quadrilateral(x1: Pixel, x2: Pixel, s1: PixelSpan, s2: PixelSpan) -> [(Pixel, Pixel); 4] {
    [(x1, s1.start), (x1, s1.stop), (x2, s2.stop), (x2, s2.start)]
}

/// The `points` attribute of an SVG polygon.
fn polygon_points(vertices: &[(Pixel, Pixel)]) -> String {
    vertices
        .iter()
        .map(|(x, y)| format!("{}, {}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_polygon<I: Ideogram + ?Sized>(
    ideo: &mut I,
    region: NodeId,
    vertices: &[(Pixel, Pixel)],
    pair: &SyntenicRegionPair,
) -> Result<(), SyntenyError> {
    let scene = ideo.scene_mut();
    let polygon = scene.append(region, Element::Polygon)?;
    scene.set_attr(polygon, "points", polygon_points(vertices))?;
    scene.set_attr(
        polygon,
        "style",
        format!(
            "fill: {}; fill-opacity: {}",
            pair.fill_color(),
            pair.fill_opacity()
        ),
    )?;
    Ok(())
}

fn write_border<I: Ideogram + ?Sized>(
    ideo: &mut I,
    region: NodeId,
    from: (Pixel, Pixel),
    to: (Pixel, Pixel),
) -> Result<(), SyntenyError> {
    let scene = ideo.scene_mut();
    let line = scene.append(region, Element::Line)?;
    scene.set_classed(line, BORDER_CLASS, true)?;
    scene.set_attr(line, "x1", from.0)?;
    scene.set_attr(line, "x2", to.0)?;
    scene.set_attr(line, "y1", from.1)?;
    scene.set_attr(line, "y2", to.1)?;
    Ok(())
}

fn write_syntenic_region<I: Ideogram + ?Sized>(
    ideo: &mut I,
    layer: NodeId,
    pair: &mut SyntenicRegionPair,
    x_offset: Pixel,
) -> Result<NodeId, SyntenyError> {
    let (s1, s2) = resolve_pair(pair, x_offset, &*ideo)?;

    let x1 = ideo.chromosome_set_translate(0);
    let x2 = ideo.chromosome_set_translate(1) - ideo.config().chr_width;

    let scene = ideo.scene_mut();
    let region = scene.append(layer, Element::Group)?;
    scene.set_classed(region, REGION_CLASS, true)?;
    scene.set_attr(region, "id", pair.region_id())?;
    // wire pointer events
    scene.register_synteny_region(region)?;

    write_polygon(ideo, region, &quadrilateral(x1, x2, s1, s2), pair)?;
    write_border(ideo, region, (x1, s1.start), (x2, s2.start))?;
    write_border(ideo, region, (x1, s1.stop), (x2, s2.stop))?;
    Ok(region)
}

/// Draw a trapezoid connecting a genomic range on one chromosome to a genomic
/// range on another chromosome, for each pair in `pairs`.
///
/// A container group of class `synteny` is inserted as the first child of the
/// scene root and returned; each pair gets a `syntenicRegion` group holding a
/// polygon and two border lines, in input order. The regions respond to
/// [`PointerEvent`]s through [`crate::interaction::dispatch`].
///
/// The pixel spans of all regions are stored on `pairs`. If a region cannot
/// be resolved, the error is returned and the remaining pairs are not drawn;
/// pairs drawn before it stay in the scene.
///
/// With `debug` set in the host configuration, the elapsed time is reported
/// through [`Ideogram::report`] once per call.
pub fn draw_synteny<I: Ideogram + ?Sized>(
    ideo: &mut I,
    pairs: &mut [SyntenicRegionPair],
) -> Result<NodeId, SyntenyError> {
    let t0 = Instant::now();

    let scene = ideo.scene_mut();
    let root = scene.root();
    let layer = scene.insert_first(root, Element::Group)?;
    scene.set_classed(layer, SYNTENY_CLASS, true)?;

    let x_offset = ideo.margin().left;

    for pair in pairs.iter_mut() {
        write_syntenic_region(ideo, layer, pair, x_offset)?;
    }

    report_performance(t0, &*ideo);
    Ok(layer)
}

fn report_performance<I: Ideogram + ?Sized>(t0: Instant, ideo: &I) {
    if ideo.config().debug {
        let elapsed = t0.elapsed().as_millis();
        ideo.report(&format!("Time in drawSyntenicRegions: {} ms", elapsed));
    }
}

/// Convenience wrapper delivering a pointer event to a region of the host's scene.
pub fn handle_pointer_event<I: Ideogram + ?Sized>(
    ideo: &mut I,
    region: NodeId,
    event: PointerEvent,
) -> Result<(), SyntenyError> {
    super::interaction::dispatch(ideo.scene_mut(), region, event)
}
