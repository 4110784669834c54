use anyhow::{anyhow, bail};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "Maze A*",
    about = "A* shortest path search through a maze with one-way passages.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to the YAML config file")]
    pub config: Option<String>,

    #[arg(
        long,
        help = "Path to a YAML maze file, the built-in reference maze is used when omitted"
    )]
    pub maze_path: Option<String>,

    #[arg(long, help = "Log filter, e.g. `info` or `maze_astar=trace`")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub maze_path: Option<String>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            maze_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Command line values take precedence over the config file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(maze_path) = &cli.maze_path {
            self.maze_path = Some(maze_path.clone());
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|err| anyhow!("Invalid log level {:?}: {err}", self.log_level))?;

        if let Some(maze_path) = &self.maze_path {
            if !std::path::Path::new(maze_path).is_file() {
                bail!("Maze file {maze_path:?} does not exist");
            }
        }
        Ok(())
    }
}
