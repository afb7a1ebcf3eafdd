//! Render syntenic regions between the chromosomes of a genome ideogram.
//!
//! A syntenic region pair connects an interval on one chromosome to the
//! corresponding interval on another. [`draw_synteny`] turns a list of
//! [`SyntenicRegionPair`]s into trapezoids in the scene of a host
//! [`Ideogram`], which provides coordinate conversion, layout and
//! configuration. Rendered regions respond to pointer events: clicking one
//! isolates it, hovering one ghosts all the others.
//!
//! Here is an example which draws the syntenic regions of a TSV file and
//! writes the result as SVG.
//!
//! ```no_run
//! use synteny::prelude::*;
//! let ideo_config = IdeogramConfig::default();
//! let mut ideo = LinearIdeogram::from_seqlens_file("hg38_seqlens.tsv", ideo_config)
//!                   .expect("could not read seqlens");
//! let mut pairs = read_synteny("hg38_panTro6_synteny.tsv")
//!                   .expect("could not read synteny");
//!
//! let layer = draw_synteny(&mut ideo, &mut pairs).expect("could not draw synteny");
//!
//! // isolate the first region
//! let first = ideo.scene().children(layer)[0];
//! handle_pointer_event(&mut ideo, first, PointerEvent::Click).unwrap();
//!
//! let (width, height) = ideo.canvas_size();
//! ideo.scene().write_svg(Some("synteny.svg"), width, height).unwrap();
//! ```

pub mod file;
pub mod ideogram;
pub mod interaction;
mod numeric;
pub mod region;
pub mod scene;
pub mod synteny;

pub use ideogram::{read_seqlens, Ideogram, IdeogramConfig, LinearIdeogram, Margin, PixelScale};
pub use interaction::{PointerEvent, RegionState};
pub use region::{ChromosomeRef, GenomicRegion, Pixel, Position, SyntenicRegionPair};
pub use scene::{NodeId, Scene};
pub use synteny::{draw_synteny, handle_pointer_event, SyntenyError};

pub mod prelude {
    pub use crate::ideogram::{
        read_seqlens, Ideogram, IdeogramConfig, LinearIdeogram, Margin, PixelScale,
    };
    pub use crate::interaction::{region_state, PointerEvent, RegionState};
    pub use crate::region::{
        read_synteny, ChromosomeRef, GenomicRegion, Pixel, Position, SyntenicRegionPair,
    };
    pub use crate::scene::{NodeId, Scene};
    pub use crate::synteny::{draw_synteny, handle_pointer_event, SyntenyError};
}
