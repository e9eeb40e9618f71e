//! Command line flags.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "basicmon", version, about = "Basic system monitor for the terminal")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Refresh interval, e.g. 1s or 500ms
    #[arg(short = 'i', long = "interval", value_name = "DURATION")]
    pub interval: Option<String>,

    /// Disk path to monitor, e.g. /var
    #[arg(short = 'd', long = "disk", value_name = "PATH")]
    pub disk: Option<String>,

    /// Network interface to monitor, e.g. eth0 (default: all interfaces)
    #[arg(long = "iface", value_name = "NAME")]
    pub iface: Option<String>,

    /// Show the process list
    #[arg(short = 'p', long = "processes")]
    pub processes: bool,

    /// Write logs to this file (the terminal is taken by the dashboard)
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
