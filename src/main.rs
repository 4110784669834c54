use maze_astar::algorithm::a_star_search;
use maze_astar::config::{Cli, Config};
use maze_astar::maze::Maze;
use maze_astar::stat::Stats;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        Config::default()
    }
    .override_from_command_line(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .with_writer(std::io::stderr)
        .init();
    info!("{config:?}");

    let maze = if let Some(maze_path) = config.maze_path.as_deref() {
        Maze::from_file(maze_path)?
    } else {
        info!("No maze file specified, using reference maze");
        Maze::reference()
    };

    let mut stats = Stats::default();
    let path = a_star_search(&maze, &mut stats);
    stats.print();

    if path.is_empty() {
        println!("No path. The maze wins, you lose.");
        return Ok(());
    }

    let labels: Vec<String> = path.iter().map(|cell| cell.label(maze.size())).collect();
    println!("{}", labels.join(" -> "));
    println!("Length: {} steps", path.len() - 1);

    Ok(())
}
