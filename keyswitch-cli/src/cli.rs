use std::path::PathBuf;

use clap::{Parser, Subcommand};
use keyswitch_app::DEFAULT_TEXT_MODEL;

/// keyswitch — manage Gemini API keys and generate with automatic key failover
#[derive(Parser)]
#[command(name = "keyswitch", version, about)]
pub struct Cli {
    /// Path of the JSON store file (defaults to the platform data directory)
    #[arg(long, global = true, env = "KEYSWITCH_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stored keys (secrets are masked)
    List,

    /// Store a new key
    Add {
        /// The API key
        secret: String,
        /// Display name (defaults to "API Key N")
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a key by id
    Remove {
        /// Key id as shown by `list`
        id: String,
    },

    /// Change a key's display name
    Rename {
        /// Key id as shown by `list`
        id: String,
        /// New display name
        name: String,
    },

    /// Make the key at INDEX the active one
    Activate {
        /// Zero-based position as shown by `list`
        index: usize,
    },

    /// Check every stored key against the API and record the result
    Test,

    /// Show the key the next request would start with
    Next,

    /// Move the active key to the next usable one
    Rotate,

    /// Generate text, trying each key until one works
    Generate {
        /// Prompt text
        prompt: String,
        /// Model name
        #[arg(long, default_value = DEFAULT_TEXT_MODEL)]
        model: String,
    },
}
