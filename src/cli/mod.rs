pub mod init;
pub mod migrate;
pub mod seo;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogdesk")]
#[command(version)]
#[command(about = "Blog admin panel with live SEO scoring", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "blogdesk.toml", env = "BLOGDESK_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config file and data directory
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    /// Run the admin panel, feeds and JSON API
    Serve {
        /// Overrides server.host from the config
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Overrides server.port from the config
        #[arg(short, long)]
        port: Option<u16>,
    },
    Migrate {
        #[command(subcommand)]
        command: Option<MigrateCommand>,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Print the slug generated for a title
    Slug { title: String },
    /// Score post fields the way the editor does
    Seo {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        keywords: String,
        /// HTML file holding the post body
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum MigrateCommand {
    /// Show applied and pending migrations
    Status,
}

#[derive(Subcommand)]
pub enum UserCommand {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "author")]
        role: String,
        #[arg(long)]
        password: Option<String>,
    },
    List,
    Remove {
        username: String,
    },
    Passwd {
        username: String,
    },
}
