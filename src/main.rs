use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexmap::geometry::{HexCoords, HexLayout};
use hexmap::map::HexMap;
use hexmap::palette;
use hexmap::render::{self, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "hexmap")]
#[command(about = "Render a randomly colored hex tile map with sample roads and rivers")]
struct Args {
    /// Number of tile rows
    #[arg(short, long, default_value = "8")]
    rows: usize,

    /// Number of tile columns
    #[arg(short, long, default_value = "10")]
    columns: usize,

    /// Hex circumradius in pixels
    #[arg(long, default_value = "50")]
    radius: f64,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fraction of tiles given a random non-background color
    #[arg(long, default_value = "0.35")]
    fill: f64,

    /// Number of sample rivers to place
    #[arg(long, default_value = "4")]
    rivers: usize,

    /// Number of sample roads to place
    #[arg(long, default_value = "2")]
    roads: usize,

    /// Blank border around the grid, in pixels
    #[arg(long, default_value = "16")]
    margin: u32,

    /// Supersampling factor for anti-aliasing
    #[arg(long, default_value = "2")]
    supersample: u32,

    /// Draw row,column labels on every tile
    #[arg(long)]
    labels: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "hexmap.png")]
    output: String,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("Generating hex map with seed: {}", seed);
    println!("Map size: {}x{} tiles", args.rows, args.columns);

    let mut map = HexMap::new(args.rows, args.columns, HexLayout::new(args.radius));

    // Random tile colors over the background.
    let mut colored = 0;
    for row in 0..args.rows {
        for column in 0..args.columns {
            if rng.gen::<f64>() < args.fill {
                let color = rng.gen_range(1..palette::PALETTE.len());
                if map.set_color(HexCoords::new(row, column), color).is_ok() {
                    colored += 1;
                }
            }
        }
    }
    println!("Colored {} tiles", colored);

    place_rivers(&mut map, args.rivers, &mut rng);
    place_roads(&mut map, args.roads, &mut rng);
    println!(
        "Placed {} rivers and {} roads",
        map.rivers().len(),
        map.roads().len()
    );

    let options = RenderOptions {
        margin: args.margin,
        supersample: args.supersample,
        label_scale: if args.labels { Some(2) } else { None },
        ..Default::default()
    };

    println!("Rendering at {}x supersampling...", options.supersample.max(1));
    match render::render(&map, &options) {
        Ok(img) => {
            if let Err(e) = img.save(&args.output) {
                eprintln!("Failed to save image: {}", e);
                std::process::exit(1);
            }
            println!(
                "Saved map to: {} ({}x{} pixels)",
                args.output,
                img.width(),
                img.height()
            );
        }
        Err(e) => {
            eprintln!("Render failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Add rivers along randomly chosen shared edges. A hex is always
/// edge-adjacent to its same-row right neighbor and to the hex directly
/// below it, so picks never fail validation.
fn place_rivers(map: &mut HexMap, count: usize, rng: &mut ChaCha8Rng) {
    if map.rows == 0 || map.columns == 0 {
        return;
    }

    for _ in 0..count {
        let start = HexCoords::new(
            rng.gen_range(0..map.rows),
            rng.gen_range(0..map.columns),
        );
        let end = if start.row + 1 < map.rows && rng.gen::<bool>() {
            HexCoords::new(start.row + 1, start.column)
        } else if start.column + 1 < map.columns {
            HexCoords::new(start.row, start.column + 1)
        } else if start.row + 1 < map.rows {
            HexCoords::new(start.row + 1, start.column)
        } else {
            continue; // 1x1 map has no neighbors
        };

        let color = rng.gen_range(1..palette::PALETTE.len());
        if let Err(e) = map.add_river(start, end, color) {
            eprintln!("Skipping river {:?} -> {:?}: {}", start, end, e);
        }
    }
}

/// Add roads between arbitrary random hexes (roads need no adjacency).
fn place_roads(map: &mut HexMap, count: usize, rng: &mut ChaCha8Rng) {
    if map.rows == 0 || map.columns == 0 {
        return;
    }

    for _ in 0..count {
        let start = HexCoords::new(
            rng.gen_range(0..map.rows),
            rng.gen_range(0..map.columns),
        );
        let end = HexCoords::new(
            rng.gen_range(0..map.rows),
            rng.gen_range(0..map.columns),
        );
        let color = rng.gen_range(1..palette::PALETTE.len());
        map.add_road(hexmap::features::Road::new(start, end, color));
    }
}
