use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wall coordinate and hold geometry tools
#[derive(Parser, Debug)]
#[command(name = "holdkit", author, version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (JSON or TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Homography taking photographed wall corners onto a width x height rectangle
    Rectify {
        /// JSON array of four {x, y} corners: top-left, top-right, bottom-right, bottom-left
        #[arg(value_name = "CORNERS")]
        corners: PathBuf,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        height: f64,
    },

    /// Outline polygon around a set of holds
    Outline {
        /// JSON array of holds
        #[arg(value_name = "HOLDS")]
        holds: PathBuf,

        /// Only outline holds in this cluster
        #[arg(long, value_name = "ID")]
        cluster: Option<String>,
    },

    /// Holds under a screen point for a given viewport
    Hit {
        /// JSON array of holds
        #[arg(value_name = "HOLDS")]
        holds: PathBuf,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,

        #[arg(long, default_value = "1.0")]
        scale: f64,

        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        tx: f64,

        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        ty: f64,

        /// Image size in pixels, as WIDTHxHEIGHT
        #[arg(long, value_name = "WxH", default_value = "1x1", value_parser = parse_size)]
        content: (f64, f64),
    },
}

/// Parses `1000x800` into `(1000.0, 800.0)`.
pub fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width '{}': {}", w, e))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height '{}': {}", h, e))?;
    Ok((w, h))
}
