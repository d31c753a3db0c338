use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Play a folder of audio files, or rebuild its playlist document.
#[derive(Debug, Parser)]
#[command(name = "folderplay", version, about)]
pub struct Cli {
    /// Directory scanned for audio files (overrides `library.audio_dir`)
    #[arg(long, global = true, env = "FOLDERPLAY_AUDIO_DIR")]
    pub audio_dir: Option<PathBuf>,

    /// Directory holding cover images (overrides `library.cover_dir`)
    #[arg(long, global = true)]
    pub cover_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Scan the library and write the playlist document
    Scan {
        /// Also print the document to stdout
        #[arg(long)]
        print: bool,
        /// Do not write the document file
        #[arg(long)]
        no_persist: bool,
    },
    /// Open the terminal player (default)
    Play {
        /// Play from an existing playlist document instead of scanning
        #[arg(long)]
        document: Option<PathBuf>,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Play { document: None })
    }
}
