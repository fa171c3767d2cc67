use box_packer::catalog;
use box_packer::render;
use box_packer::solver::Packer;
use box_packer::types::Dims;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "box_packer",
    about = "3D box packing into a single container via a heightmap heuristic"
)]
struct Cli {
    /// Container dimensions (XxYxZ, e.g. 100x100x100)
    #[arg(long, default_value = "100x100x100")]
    container: String,

    /// Path to the item list JSON (array of [dx,dy,dz] triples, or an
    /// object with an "items" key)
    #[arg(long)]
    items: String,

    /// Write the pack result as JSON to this path
    #[arg(long)]
    out: Option<String>,

    /// Show an ASCII top-down layout of the packed container
    #[arg(long)]
    layout: bool,
}

fn parse_dimensions(s: &str) -> Result<Dims, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 3 {
        return Err(format!("invalid dimensions '{}', expected XxYxZ", s));
    }
    let mut dims = [0u32; 3];
    for (slot, part) in dims.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u32>()
            .map_err(|_| format!("invalid dimension in '{}'", s))?;
    }
    if dims.contains(&0) {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok(Dims::new(dims[0], dims[1], dims[2]))
}

fn main() {
    let cli = Cli::parse();

    let container = parse_dimensions(&cli.container).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let items = catalog::load_items(&cli.items).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let packer = Packer::new(container, items).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Packing into container {container} ...\n");

    let result = packer.pack();
    let total = result.placements.len() + result.unplaced.len();

    for (i, p) in result.placements.iter().enumerate() {
        println!(
            "[OK] {:02}/{:02} item {} at ({}, {}, {}) dims={}",
            i + 1,
            total,
            p.id,
            p.x,
            p.y,
            p.z,
            p.placed_dims,
        );
    }
    for item in &result.unplaced {
        println!("[FAIL] item {} dims={} could not be placed", item.id, item.dims);
    }

    println!("\n{}", "=".repeat(60));
    println!("Placed items: {} / {}", result.placements.len(), total);
    println!("Unplaced items: {}", result.unplaced.len());
    println!("Volume utilization: {:.2}%", result.utilization * 100.0);
    println!("Peak height used (Z): {}", result.peak_height);
    println!("{}", "=".repeat(60));

    if cli.layout {
        println!();
        print!("{}", render::render_top_view(container, &result.placements));
    }

    if let Some(path) = &cli.out {
        let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
            eprintln!("Error: cannot serialize result: {}", e);
            std::process::exit(1);
        });
        std::fs::write(path, json).unwrap_or_else(|e| {
            eprintln!("Error: cannot write {}: {}", path, e);
            std::process::exit(1);
        });
        println!("\nSaved placements to: {}", path);
    }
}
