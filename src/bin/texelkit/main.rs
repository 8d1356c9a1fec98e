//! Texelkit CLI - texel density command-line tool.
//!
//! Usage: texelkit <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `texelkit --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use texelkit::algo::batch::{calculate_densities_with_progress, normalize_objects_with_progress};
use texelkit::algo::texel::{DensityConfig, MeshAreas};
use texelkit::algo::Progress;
use texelkit::io;
use texelkit::mesh::{MeshObject, PolyMesh};

#[derive(Parser)]
#[command(name = "texelkit")]
#[command(author, version, about = "Texel density CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display per-object mesh and UV information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Measure the texel density of every object
    Density {
        /// Input mesh file
        input: PathBuf,

        /// Texture resolution in pixels
        #[arg(short, long, default_value_t = DensityConfig::DEFAULT_TEXTURE_RESOLUTION)]
        resolution: u32,
    },

    /// Rescale UVs so every object has the same texel density
    Normalize {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Texture resolution in pixels
        #[arg(short, long, default_value_t = DensityConfig::DEFAULT_TEXTURE_RESOLUTION)]
        resolution: u32,

        /// Target texel density
        #[arg(short, long, default_value_t = DensityConfig::DEFAULT_TARGET_DENSITY)]
        target: f64,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,
        Commands::Density { input, resolution } => cmd_density(&input, resolution)?,
        Commands::Normalize {
            input,
            output,
            resolution,
            target,
        } => cmd_normalize(&input, &output, resolution, target)?,
    }

    Ok(())
}

/// Create a progress reporter that draws a bar of processed objects on stderr.
fn create_progress() -> Progress {
    let last = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, name| {
        if total == 0 || last.fetch_max(current, Ordering::Relaxed) >= current {
            return;
        }

        let bar_width = 30;
        let filled = (current * bar_width) / total;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {}/{} {:<24}", bar, space, current, total, name);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn load_objects(input: &Path) -> Result<Vec<MeshObject<PolyMesh>>, Box<dyn std::error::Error>> {
    let objects: Vec<MeshObject<PolyMesh>> = io::load(input)?;
    println!("Loaded: {} ({} objects)", input.display(), objects.len());
    Ok(objects)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let objects = load_objects(input)?;

    for obj in &objects {
        let mesh = &obj.mesh;
        let areas = MeshAreas::measure(mesh);

        println!("\n{}", obj.name);
        println!("  Vertices: {}", mesh.num_vertices());
        println!("  Faces: {}", mesh.num_faces());
        println!("  Loops: {}", mesh.num_loops());
        println!("  Surface area: {:.6}", areas.surface);
        println!("  UV area: {:.6}", areas.uv);
        if let Some((min, max)) = mesh.uv_bounding_box() {
            println!(
                "  UV bounds: ({:.3}, {:.3}) to ({:.3}, {:.3})",
                min.x, min.y, max.x, max.y
            );
        }
        match areas.stretch() {
            Some(stretch) => println!("  Surface/UV ratio: {:.6}", stretch),
            None => println!("  Surface/UV ratio: undefined (no UV area)"),
        }
    }

    Ok(())
}

fn cmd_density(input: &Path, resolution: u32) -> Result<(), Box<dyn std::error::Error>> {
    let config = DensityConfig::default().with_texture_resolution(resolution)?;
    let mut objects = load_objects(input)?;

    println!("Texture resolution: {} px", config.texture_resolution_px());

    let report = calculate_densities_with_progress(&mut objects, &config, &create_progress());

    for entry in &report.entries {
        match &entry.result {
            Ok(density) => println!("  {}: {:.4} px/unit", entry.name, density),
            Err(e) => println!("  {}: error: {}", entry.name, e),
        }
    }

    Ok(())
}

fn cmd_normalize(
    input: &Path,
    output: &Path,
    resolution: u32,
    target: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DensityConfig::new(resolution, target)?;
    let mut objects = load_objects(input)?;

    println!(
        "Normalizing to {:.4} px/unit at {} px...",
        config.target_density(),
        config.texture_resolution_px()
    );

    let start = Instant::now();
    let report = normalize_objects_with_progress(&mut objects, &config, &create_progress());
    let elapsed = start.elapsed();

    for (entry, obj) in report.entries.iter().zip(&objects) {
        match &entry.result {
            Ok(outcome) if outcome.is_scaled() => println!(
                "  {}: scale factor {:.6}, now {:.4} px/unit",
                entry.name,
                outcome.scale_factor(),
                obj.texel_density().unwrap_or(0.0)
            ),
            Ok(_) => println!("  {}: density unchanged", entry.name),
            Err(e) => println!("  {}: error: {}", entry.name, e),
        }
    }

    io::save(&objects, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
