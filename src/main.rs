use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use placegrid::{collect, details, grid, GeoPoint, HttpPlaces};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Print the grid points covering a parallelogram, one "lat,lon" per line
    Grid {
        center: GeoPoint,
        top_left: GeoPoint,
        bottom_right: GeoPoint,
        /// Distance between points along the center/bottom-right axis (metres)
        #[arg(long)]
        x_step: f64,
        /// Distance between points along the center/top-left axis (metres)
        #[arg(long)]
        y_step: f64,
    },
    /// Collect the place ids found around every grid point into a file
    Collect {
        center: GeoPoint,
        top_left: GeoPoint,
        bottom_right: GeoPoint,
        #[arg(long)]
        x_step: f64,
        #[arg(long)]
        y_step: f64,
        /// Place type to search for, e.g. "restaurant" or "hospital"
        #[arg(long = "type")]
        place_type: String,
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the distinct place ids found in id files, one per line
    Merge {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Fetch the full record of every id in the given id files into a folder
    Fetch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        folder: PathBuf,
        #[arg(long)]
        api_key: String,
    },
    /// Print a folder of fetched records as a JSON array
    Export { folder: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Grid {
            center,
            top_left,
            bottom_right,
            x_step,
            y_step,
        } => {
            for point in grid::build(center, top_left, bottom_right, x_step, y_step)? {
                println!("{point}");
            }
        }
        Command::Collect {
            center,
            top_left,
            bottom_right,
            x_step,
            y_step,
            place_type,
            api_key,
            out,
        } => {
            let grid = grid::build(center, top_left, bottom_right, x_step, y_step)?;
            eprintln!("Querying {} grid points...", grid.len());

            let service = HttpPlaces::new(api_key);
            let failed = collect::place_ids_to_file(&grid, &place_type, &out, &service)?;
            if !failed.is_empty() {
                eprintln!("{} points failed: {}", failed.len(), failed.iter().join("; "));
            }
        }
        Command::Merge { files } => {
            for id in collect::unique_ids(&files)? {
                println!("{id}");
            }
        }
        Command::Fetch {
            files,
            folder,
            api_key,
        } => {
            let ids = collect::unique_ids(&files)?;
            eprintln!("Fetching {} places...", ids.len());

            let service = HttpPlaces::new(api_key);
            let failed = details::place_details_to_folder(&ids, &folder, &service)?;
            if !failed.is_empty() {
                eprintln!("{} ids failed: {}", failed.len(), failed.iter().join(", "));
            }
        }
        Command::Export { folder } => {
            println!("{}", serde_json::to_string(&details::read_records(&folder)?)?);
        }
    }

    Ok(())
}
