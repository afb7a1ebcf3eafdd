use clap::{Parser, Subcommand};
use log::LevelFilter;
use synteny::prelude::*;

const INFO: &str = "\
synteny: draw syntenic regions between chromosomes
usage: synteny [--help] <subcommand>

Subcommands:

  draw: render syntenic region pairs of a TSV file to SVG.

";

#[derive(Parser)]
#[clap(name = "synteny")]
#[clap(about = INFO)]
struct Cli {
    /// Report render timings (-d), and trace events (-dd)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the syntenic region pairs of a TSV file as SVG.
    ///
    /// The input TSV has the following columns:
    ///
    ///  - chromosome of the first region
    ///  - start of the first region  (bp)
    ///  - stop of the first region   (bp)
    ///  - chromosome of the second region
    ///  - start of the second region (bp)
    ///  - stop of the second region  (bp)
    ///  - fill color                 (optional, default #CFC)
    ///  - fill opacity               (optional, default 1)
    ///
    /// Example:
    ///
    ///  $ synteny draw --seqlens genome.tsv synteny.tsv --output synteny.svg
    Draw {
        /// a TSV file of chromosome names and their lengths
        #[arg(long, required = true)]
        seqlens: String,
        /// the output file path (if not set, uses standard out)
        #[arg(long)]
        output: Option<String>,
        /// the syntenic region pairs
        #[arg(required = true)]
        syntenyfile: String,
        /// chromosome width in pixels
        #[arg(long, default_value_t = 10.0)]
        chr_width: f64,
        /// height of the longest chromosome in pixels
        #[arg(long, default_value_t = 400.0)]
        chr_height: f64,
        /// distance between the two chromosome sets in pixels
        #[arg(long, default_value_t = 200.0)]
        chr_spacing: f64,
        /// isolate the N-th region (0-indexed), as if it were clicked
        #[arg(long)]
        isolate: Option<usize>,
    },
}

struct DrawArgs<'a> {
    seqlens: &'a str,
    syntenyfile: &'a str,
    output: Option<&'a str>,
    isolate: Option<usize>,
}

fn draw(args: DrawArgs, config: IdeogramConfig) -> Result<(), SyntenyError> {
    let mut ideo = LinearIdeogram::from_seqlens_file(args.seqlens, config)?.with_margin(Margin {
        left: 20.0,
        top: 20.0,
    });
    let mut pairs = read_synteny(args.syntenyfile)?;
    log::info!("read {} syntenic region pairs", pairs.len());

    let layer = draw_synteny(&mut ideo, &mut pairs)?;

    if let Some(index) = args.isolate {
        let region = ideo
            .scene()
            .children(layer)
            .get(index)
            .copied()
            .ok_or(SyntenyError::UnknownRegion(format!("index {}", index)))?;
        handle_pointer_event(&mut ideo, region, PointerEvent::Click)?;
    }

    let (width, height) = ideo.canvas_size();
    ideo.scene().write_svg(args.output, width, height)
}

fn run() -> Result<(), SyntenyError> {
    let cli = Cli::parse();

    let level = match cli.debug {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();

    match &cli.command {
        Some(Commands::Draw {
            seqlens,
            output,
            syntenyfile,
            chr_width,
            chr_height,
            chr_spacing,
            isolate,
        }) => {
            let config = IdeogramConfig {
                debug: cli.debug > 0,
                chr_width: *chr_width,
                chr_height: *chr_height,
                chr_spacing: *chr_spacing,
                ..IdeogramConfig::default()
            };
            let args = DrawArgs {
                seqlens,
                syntenyfile,
                output: output.as_deref(),
                isolate: *isolate,
            };
            draw(args, config)
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
