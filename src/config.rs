use anyhow::{anyhow, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "taskboard")]
#[command(about = "A four-column kanban board in the terminal")]
pub struct Args {
    /// Directory holding the saved board
    #[arg(long, env = "TASKBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log file (defaults to taskboard.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is saved
    #[arg(long)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub storage: StorageKind,
}

fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "taskboard", "taskboard").map(|dirs| dirs.data_dir().to_path_buf())
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let data_dir = args
            .data_dir
            .or_else(default_data_dir)
            .ok_or_else(|| anyhow!("Failed to find a data directory, pass --data-dir"))?;
        let log_file = args
            .log_file
            .unwrap_or_else(|| data_dir.join("taskboard.log"));
        let storage = if args.in_memory {
            StorageKind::Memory
        } else {
            StorageKind::File
        };

        Ok(Self {
            data_dir,
            log_file,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_defaults_into_data_dir() {
        let args = Args::parse_from(["taskboard", "--data-dir", "/tmp/board"]);
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.log_file, PathBuf::from("/tmp/board/taskboard.log"));
        assert_eq!(config.storage, StorageKind::File);
    }

    #[test]
    fn in_memory_flag_selects_memory_storage() {
        let args = Args::parse_from(["taskboard", "--data-dir", "x", "--in-memory"]);
        assert_eq!(Config::from_args(args).unwrap().storage, StorageKind::Memory);
    }
}
