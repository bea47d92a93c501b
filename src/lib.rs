//! labelfile: annotation export for rotated-box labeling tools.
//!
//! Takes the boxes a user drew on an image (axis-aligned or rotated) and
//! writes them as Pascal VOC XML, a plain-text polygon list and a LabelMe
//! JSON document, side by side.
//!
//! # Modules
//!
//! - [`ir`]: Shapes, boxes, corner ordering and the per-format writers
//! - [`export`]: The exporter that writes all three formats for one image
//! - [`error`]: Error types for labelfile operations

pub mod error;
pub mod export;
pub mod ir;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use error::LabelFileError;
pub use export::{export_annotations, ExportOptions, ExportedFiles, LabelFile};

/// The labelfile CLI application.
#[derive(Parser)]
#[command(name = "labelfile")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log level for labelfile's own messages (RUST_LOG overrides it).
    #[arg(long, global = true, env = "LABELFILE_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Export a shape list to VOC XML, text and LabelMe JSON.
    Export(ExportArgs),
    /// Print four corners in canonical order.
    Order(OrderArgs),
    /// Summarize a VOC XML annotation file.
    Inspect(InspectArgs),
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Source image the shapes were drawn on.
    #[arg(long)]
    image: PathBuf,

    /// JSON file holding an array of shapes.
    #[arg(long)]
    shapes: PathBuf,

    /// Target annotation path; outputs are written to its directory.
    #[arg(long)]
    target: PathBuf,

    /// Mark the annotation as verified.
    #[arg(long)]
    verified: bool,

    /// Value for the VOC <source><database> element.
    #[arg(long, default_value = ir::io_voc_xml::DEFAULT_DATABASE)]
    database: String,
}

/// Arguments for the order subcommand.
#[derive(clap::Args)]
struct OrderArgs {
    /// Corner coordinates: x1 y1 x2 y2 x3 y3 x4 y4.
    #[arg(num_args = 8, allow_negative_numbers = true, required = true)]
    coords: Vec<f64>,

    /// Index into the canonical cycle to start from; negative counts from the
    /// end (magnitude 4 or more: no rotation).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start: i64,

    /// Reverse the winding after the first corner.
    #[arg(long)]
    reverse: bool,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// VOC XML file to summarize.
    input: PathBuf,
}

/// Run the labelfile CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelFileError> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Some(Commands::Export(args)) => run_export(args),
        Some(Commands::Order(args)) => run_order(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("labelfile {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Export rotated and axis-aligned box annotations.");
            println!();
            println!("Run 'labelfile --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("labelfile={level}")));

    // A subscriber may already be installed when embedded in a host; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Reads a JSON array of shapes, as dumped by a labeling GUI.
pub fn read_shapes_json(path: &Path) -> Result<Vec<ir::Shape>, LabelFileError> {
    let file = File::open(path).map_err(LabelFileError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LabelFileError::ShapesJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

fn run_export(args: ExportArgs) -> Result<(), LabelFileError> {
    let shapes = read_shapes_json(&args.shapes)?;
    let label_file = LabelFile::with_options(ExportOptions {
        verified: args.verified,
        database: args.database,
    });

    let outputs = label_file.save(&args.target, &shapes, &args.image)?;

    println!("Exported {} shape(s):", shapes.len());
    println!("  {}", outputs.xml.display());
    println!("  {}", outputs.txt.display());
    println!("  {}", outputs.json.display());
    Ok(())
}

fn run_order(args: OrderArgs) -> Result<(), LabelFileError> {
    let corners: Vec<ir::Point> = args
        .coords
        .chunks_exact(2)
        .map(|pair| ir::Point::new(pair[0], pair[1]))
        .collect();
    let directive = ir::OrderDirective {
        start: args.start,
        reverse: args.reverse,
    };

    let ordered = ir::order_shape_points("<cli>", &corners, directive)?;
    let line: Vec<String> = ordered
        .iter()
        .map(|point| format!("{} {}", point.x, point.y))
        .collect();
    println!("{}", line.join(" "));
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), LabelFileError> {
    let annotation = ir::io_voc_xml::read_voc_xml(&args.input)?;

    println!(
        "{} ({}x{}x{}){}",
        annotation.filename,
        annotation.size.width,
        annotation.size.height,
        annotation.size.depth,
        if annotation.verified { " [verified]" } else { "" }
    );
    for object in &annotation.objects {
        let geometry = match object.geometry {
            ir::io_voc_xml::VocBox::Bnd(bbox) => format!(
                "{} {} {} {}",
                bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax
            ),
            ir::io_voc_xml::VocBox::Rotated(rbox) => format!(
                "{} {} {} {} {}",
                rbox.cx, rbox.cy, rbox.w, rbox.h, rbox.angle
            ),
        };
        println!(
            "  {} {} {} difficult={}",
            object.geometry.type_name(),
            object.name,
            geometry,
            u8::from(object.difficult)
        );
    }
    println!("{} object(s)", annotation.objects.len());
    Ok(())
}
