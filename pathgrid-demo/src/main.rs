//! `pathgrid`: edit a maze in the terminal and watch BFS, DFS and A* search
//! it, or run the searches headless.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pathgrid_core::{Layout, Point};
use pathgrid_demo::{DemoConfig, Editor, Maze, Terminal, app, render, report};
use pathgrid_search::Strategy;

#[derive(Parser)]
#[command(name = "pathgrid", version, about = "Step-by-step grid search demo")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for random maps.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Text map to load instead of generating one.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Grid rows for new maps.
    #[arg(long, global = true)]
    rows: Option<i32>,

    /// Grid columns for new maps.
    #[arg(long, global = true)]
    cols: Option<i32>,

    /// bfs, dfs or astar.
    #[arg(long, global = true)]
    strategy: Option<Strategy>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive editor (default).
    Play {
        #[arg(long)]
        fps: Option<u32>,

        /// Search steps per frame while animating.
        #[arg(long)]
        steps_per_frame: Option<usize>,
    },

    /// Run one strategy and print the map with its path.
    Solve {
        /// Start cell as "row,col".
        #[arg(long, value_parser = parse_cell)]
        start: Option<Point>,

        /// Goal cell as "row,col".
        #[arg(long, value_parser = parse_cell)]
        goal: Option<Point>,
    },

    /// Run every strategy on the same map.
    Compare,
}

fn parse_cell(s: &str) -> Result<Point, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"row,col\", got {s:?}"))?;
    let row = row.trim().parse::<i32>().map_err(|e| format!("row: {e}"))?;
    let col = col.trim().parse::<i32>().map_err(|e| format!("col: {e}"))?;
    Ok(Point::from_row_col(row, col))
}

fn read_layout(path: &Path) -> Result<Layout, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let layout = Layout::parse(&text)?;
    log::info!("loaded {} map from {}", layout.map.bounds(), path.display());
    Ok(layout)
}

/// The map given with `--map`, or a random one from the configured mix.
fn headless_maze(
    map: Option<&Path>,
    config: &DemoConfig,
) -> Result<Maze, Box<dyn std::error::Error>> {
    if let Some(path) = map {
        return Ok(Maze::from_layout(read_layout(path)?));
    }
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("random map seed {seed}");
    let mut maze = Maze::new(config.rows, config.cols);
    maze.randomize(&config.mix, StdRng::seed_from_u64(seed));
    Ok(maze)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let command = cli.command.unwrap_or(Command::Play {
        fps: None,
        steps_per_frame: None,
    });
    if let Command::Play {
        fps,
        steps_per_frame,
    } = command
    {
        if let Some(fps) = fps {
            config.fps = fps;
        }
        if let Some(n) = steps_per_frame {
            config.steps_per_frame = n;
        }
    }
    config.validate()?;

    match command {
        Command::Play { .. } => {
            let maze = match &cli.map {
                Some(path) => Maze::from_layout(read_layout(path)?),
                None => Maze::new(config.rows, config.cols),
            };
            let seed = config.seed.unwrap_or_else(rand::random);
            let mut editor = Editor::new(maze, config, seed);
            let mut term = Terminal::new();
            app::run(&mut editor, &mut term)?;
        }
        Command::Solve { start, goal } => {
            let mut maze = headless_maze(cli.map.as_deref(), &config)?;
            let bounds = maze.map().bounds();
            if let Some(p) = [start, goal].into_iter().flatten().find(|&p| !bounds.contains(p)) {
                return Err(format!("cell {p} is outside the {bounds} map").into());
            }
            report::place_endpoints(&mut maze, start, goal);
            maze.set_strategy(config.strategy);
            let summary = report::summarize(&mut maze)?;
            println!("{}\n", render::to_text(&maze));
            println!("{}\n", render::legend());
            println!("{}", report::TABLE_HEADER);
            println!("{summary}");
        }
        Command::Compare => {
            let mut maze = headless_maze(cli.map.as_deref(), &config)?;
            report::place_endpoints(&mut maze, None, None);
            println!("{}\n", maze.layout());
            println!("{}", report::TABLE_HEADER);
            for row in report::compare(&maze.layout())? {
                println!("{row}");
            }
        }
    }
    Ok(())
}
