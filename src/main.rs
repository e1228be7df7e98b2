use anyhow::Error;
use clap::Parser;
use cone_sensor::grid::standard_grids::StandardGrid;
use cone_sensor::grid::{Direction, IntLocation};
use cone_sensor::settings::ConeSettings;
use log::info;
use std::path::PathBuf;

/// Render the cells covered by a diagonal cone proximity sensor
#[derive(Parser, Debug)]
#[command(name = "cone-sensor")]
struct Cli {
    /// JSON settings file; the other options override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset grid (small or large); sets the grid size and centers the robot
    #[arg(long, value_parser = parse_standard_grid)]
    grid: Option<StandardGrid>,

    /// Width and height of the grid; centers the robot unless --robot-x/--robot-y are given
    #[arg(long)]
    grid_size: Option<usize>,

    /// Robot column
    #[arg(long, allow_negative_numbers = true)]
    robot_x: Option<i32>,

    /// Robot row, increasing downwards
    #[arg(long, allow_negative_numbers = true)]
    robot_y: Option<i32>,

    /// ne, se, sw or nw (full names and compass indices 1, 3, 5, 7 also work)
    #[arg(long)]
    direction: Option<String>,

    /// How far the cone extends
    #[arg(long, allow_negative_numbers = true)]
    range: Option<i32>,

    /// Render the cone for every diagonal direction in turn
    #[arg(long, conflicts_with = "direction")]
    all: bool,
}

fn parse_standard_grid(s: &str) -> Result<StandardGrid, String> {
    StandardGrid::get_all()
        .into_iter()
        .find(|grid| format!("{grid:?}").eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("unknown grid {s:?}, expected small or large"))
}

impl Cli {
    /// Start from the config file (or defaults), then apply each option given
    fn settings(&self) -> Result<ConeSettings, Error> {
        let mut settings = match &self.config {
            Some(path) => ConeSettings::load(path)?,
            None => ConeSettings::default(),
        };

        if let Some(grid) = self.grid {
            settings.grid_size = grid.size();
            settings.robot = grid.default_robot_location();
        }
        if let Some(grid_size) = self.grid_size {
            settings.grid_size = grid_size;
            settings.robot = IntLocation::center_of(grid_size);
        }
        if let Some(x) = self.robot_x {
            settings.robot.x = x;
        }
        if let Some(y) = self.robot_y {
            settings.robot.y = y;
        }
        if let Some(direction) = &self.direction {
            settings.direction = direction.parse()?;
        }
        if let Some(range) = self.range {
            settings.sensor_range = range;
        }

        Ok(settings)
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    info!("Rendering with {settings:?}");

    if cli.all {
        for direction in Direction::get_all() {
            let grid = ConeSettings {
                direction,
                ..settings.clone()
            }
            .render()?;
            println!("\n{direction}:");
            println!("{}", "=".repeat(20));
            print!("{grid}");
        }
    } else {
        print!("{}", settings.render()?);
    }

    Ok(())
}
