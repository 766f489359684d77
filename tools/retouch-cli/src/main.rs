//! retouch CLI: capture, describe, virtualize, and replay touch input.
//!
//! Usage:
//!   retouch record [OPTIONS]       Normalize a getevent log into a capture
//!   retouch probe [OPTIONS]        Write a device profile from system dumps
//!   retouch virtualize [OPTIONS]   Capture -> portable interactions
//!   retouch translate [OPTIONS]    Portable interactions -> replay artifact

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use retouch_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "retouch",
    about = "Device-independent recording and replay of touch input",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a saved `getevent -tt` log into a raw capture file
    Record {
        /// Touch node the log lines must come from (e.g. /dev/input/event2)
        #[arg(long)]
        touch_node: String,

        /// `dumpsys window` output from the capture device
        #[arg(long)]
        display_dump: PathBuf,

        /// `getevent -lp` output from the capture device
        #[arg(long)]
        touch_dump: PathBuf,

        /// `getevent -tt` log to normalize
        #[arg(short, long)]
        input: PathBuf,

        /// Capture file to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Derive a device profile from display and touch-panel dumps
    Probe {
        /// `dumpsys window` output
        #[arg(long)]
        display_dump: PathBuf,

        /// `getevent -lp` output
        #[arg(long)]
        touch_dump: PathBuf,

        /// `getevent -p` output, used to report the touch node
        #[arg(long)]
        getevent_dump: Option<PathBuf>,

        /// Device profile to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a raw capture into portable interactions
    Virtualize {
        /// Reference swipe capture
        #[arg(long)]
        calibration: PathBuf,

        /// Profile of the device the capture came from
        #[arg(long)]
        device: PathBuf,

        /// Raw capture to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Portable file to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert portable interactions into a replay artifact
    Translate {
        /// Reference swipe capture from the target device
        #[arg(long)]
        calibration: PathBuf,

        /// Profile of the target device
        #[arg(long)]
        device: PathBuf,

        /// Portable file to convert
        #[arg(short, long)]
        input: PathBuf,

        /// Input device number written into each record
        #[arg(long, conflicts_with = "getevent_dump")]
        device_id: Option<u32>,

        /// `getevent -p` output to discover the device number from
        #[arg(long)]
        getevent_dump: Option<PathBuf>,

        /// Replay artifact to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    retouch_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Record {
            touch_node,
            display_dump,
            touch_dump,
            input,
            output,
        } => commands::record::run(touch_node, display_dump, touch_dump, input, output),
        Commands::Probe {
            display_dump,
            touch_dump,
            getevent_dump,
            output,
        } => commands::probe::run(display_dump, touch_dump, getevent_dump, output),
        Commands::Virtualize {
            calibration,
            device,
            input,
            output,
        } => commands::virtualize::run(calibration, device, input, output),
        Commands::Translate {
            calibration,
            device,
            input,
            device_id,
            getevent_dump,
            output,
        } => commands::translate::run(
            calibration,
            device,
            input,
            device_id,
            getevent_dump,
            output,
            config.engine,
        ),
    }
}
