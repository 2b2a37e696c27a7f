//! orbgrid command-line interface.
//!
//! Build grids from TOML job files or grid files:
//! ```sh
//! orbgrid run job.toml
//! orbgrid validate job.toml
//! orbgrid describe grid.txt
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use orbgrid_core::{GridForm, GridState};

#[derive(Parser)]
#[command(name = "orbgrid")]
#[command(about = "orbgrid: spatial grids for orbital and density evaluation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a grid from a TOML job file and write the requested outputs.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a job file without building the grid.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Read a grid file and print a description of the grid.
    Describe {
        /// Path to the grid file.
        grid_file: PathBuf,
        /// Comment marker used in the grid file.
        #[arg(long, default_value = orbgrid_io::DEFAULT_COMMENT)]
        comment: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("orbgrid");
            println!("=======");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let base_dir = config.parent().unwrap_or_else(|| Path::new("."));
            let state = runner::build_grid(&job, base_dir)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_grid_file {
                runner::write_grid(&state, &out_dir.join("grid.txt"))?;
            }
            if job.output.save_points_csv {
                runner::write_points_csv(&state, &out_dir.join("points.csv"))?;
            }
            if job.output.save_json {
                runner::write_summary_json(&state, &out_dir.join("grid.json"))?;
            }

            println!("Grid complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Describe { grid_file, comment } => {
            let mut state = GridState::new();
            let form = orbgrid_io::load_grid_file(&mut state, &grid_file, &comment)?;
            if form == GridForm::Regular {
                state.init(false)?;
            }
            println!("{} grid, {} points", form, state.num_points());
            print!("{}", state.describe("\t"));
            if let Some(volume) = state.cell_volume() {
                println!("\tcell volume = {:.6}", volume);
            }
            Ok(())
        }
    }
}
