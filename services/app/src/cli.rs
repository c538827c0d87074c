//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use media::MediaId;

#[derive(Debug, Parser)]
#[command(name = "photoapp", version, about = "PhotoApp photo sharing client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long, env = "PHOTOAPP_EMAIL")]
        email: String,
        #[arg(long, env = "PHOTOAPP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the view for the signed-in user
    Dashboard,
    /// Upload a photo (creators)
    Upload(UploadArgs),
    /// List photos (consumers)
    Feed {
        /// Filter by title, caption, location or people
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one photo with its comments and rating (consumers)
    Show { id: MediaId },
    /// Comment on a photo (consumers)
    Comment { id: MediaId, text: String },
    /// Rate a photo from 1 to 5 (consumers)
    Rate {
        id: MediaId,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        value: u8,
    },
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Image file to upload
    pub file: PathBuf,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub caption: String,
    #[arg(long, default_value = "")]
    pub location: String,
    /// Comma-separated names
    #[arg(long, default_value = "")]
    pub people: String,
}
