use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seam_pattern::config::{AlignmentMarkers, ExportOptions};
use seam_pattern::pattern::{self, Model};
use seam_pattern::vector_export;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a mesh as an SVG sewing pattern
    Export {
        /// Path to the mesh document (JSON)
        path: PathBuf,
        /// Output file, defaults to the model name with an .svg extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// JSON file with export options
        #[arg(long)]
        options: Option<PathBuf>,
        #[arg(long, value_enum)]
        alignment_markers: Option<AlignmentMarkers>,
        /// Do not write the alignment numbers
        #[arg(long)]
        no_numbers: bool,
        /// Do not write the piece letters
        #[arg(long)]
        no_piece_ids: bool,
        /// Font size of the alignment numbers
        #[arg(long)]
        font_size: Option<f32>,
        /// Font size of the piece letters
        #[arg(long)]
        piece_id_font_size: Option<f32>,
    },
    /// Import a mesh and print summary
    Import {
        /// Path to the mesh document (JSON)
        path: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import { path } => {
            let model = load(&path)?;
            let islands = pattern::partition_islands(&model);
            let wires = model.edges().filter(|(_, e)| e.is_wire()).count();
            let seams = model.edges().filter(|(_, e)| e.is_wire() && e.is_seam()).count();
            println!("Model: {}", model.name());
            println!("Vertices: {}", model.num_vertices());
            println!("Faces: {}", model.num_faces());
            println!("Edges: {}", model.edges().count());
            println!("Wire edges: {} ({} marked as seam)", wires, seams);
            println!("Islands: {}", islands.len());
            let projector = pattern::Projector::new(model.uv_to_world_scale());
            println!("Document size: {}mm", projector.document_size());
        }
        Commands::Export {
            path,
            output,
            options,
            alignment_markers,
            no_numbers,
            no_piece_ids,
            font_size,
            piece_id_font_size,
        } => {
            let mut opts = match options {
                Some(file) => ExportOptions::load(&file)?,
                None => ExportOptions::default(),
            };
            if let Some(mode) = alignment_markers {
                opts.alignment_markers = mode;
            }
            if no_numbers {
                opts.alignment_numbers = false;
            }
            if no_piece_ids {
                opts.show_piece_ids = false;
            }
            if let Some(size) = font_size {
                opts.alignment_number_font_size = size;
            }
            if let Some(size) = piece_id_font_size {
                opts.piece_id_font_size = size;
            }

            let model = load(&path)?;
            let output = output.unwrap_or_else(|| default_output(model.name()));
            vector_export::export_svg_file(&model, &opts, &output)?;
        }
    }
    Ok(())
}

/// `<name>.svg`, dropping a trailing image extension from the model name first.
fn default_output(name: &str) -> PathBuf {
    let stem = [".png", ".eps", ".svg"]
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name);
    PathBuf::from(format!("{stem}.svg"))
}

fn load(path: &std::path::Path) -> Result<Model> {
    log::info!("importing model: {}", path.display());
    pattern::import_model_file(path).with_context(|| format!("loading {}", path.display()))
}
