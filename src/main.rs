mod auth;
mod config;
mod connection;
mod consts;
mod content;
mod dashboard;
mod leads;
mod models;
mod pretty;
mod stream;
mod store;

use crate::config::get_session_path;
use crate::connection::ConnectionSettings;
use crate::consts::admin_consts::tables;
use crate::pretty::print_cmd_error;
use crate::store::Store;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify the master security code and open an admin session
    Login {
        /// The shared staff access code
        #[arg(long, value_name = "CODE")]
        code: String,
    },
    /// Close the admin session
    Logout,
    /// Totals and recent activity
    Overview,
    /// List lead/inquiry submissions, newest first
    Leads {
        /// Only show inquiries for one event type (e.g. Wedding)
        #[arg(long, value_name = "TYPE")]
        event_type: Option<String>,
    },
    /// Manage vlog posts
    Vlogs {
        #[command(subcommand)]
        command: VlogCommand,
    },
    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        command: JobCommand,
    },
    /// Manage promotional deals
    Deals {
        #[command(subcommand)]
        command: DealCommand,
    },
    /// Live stream embed configuration
    Stream {
        #[command(subcommand)]
        command: StreamCommand,
    },
}

#[derive(Subcommand)]
enum VlogCommand {
    /// List vlog posts, newest first
    List,
    /// Create a vlog post
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an existing vlog post
    Update {
        /// Identifier of the post to edit
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a vlog post
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum JobCommand {
    /// List job postings, newest first
    List,
    /// Create a job posting
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Application deadline, e.g. 2026-02-01
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an existing job posting
    Update {
        /// Identifier of the posting to edit
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a job posting
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum DealCommand {
    /// List promotional deals, newest first
    List,
    /// Create a deal
    Add {
        #[arg(long)]
        title: String,
        /// Display label, e.g. "20% OFF"
        #[arg(long)]
        discount: Option<String>,
        /// Last day of validity, e.g. 2026-02-28
        #[arg(long)]
        expiration: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an existing deal
    Update {
        /// Identifier of the deal to edit
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        discount: Option<String>,
        #[arg(long)]
        expiration: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a deal
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum StreamCommand {
    /// Show the configuration currently served to the public site
    Show,
    /// Replace the stream configuration
    Set {
        /// Hosting platform: youtube, twitch or vimeo
        #[arg(long, value_name = "PLATFORM")]
        platform: String,
        /// Channel or event identifier on that platform
        #[arg(long, value_name = "ID")]
        channel_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Visible by default so operators can tell demo runs from live runs.
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = ConnectionSettings::from_env();
    let session_path = get_session_path()?;
    let args = Args::parse();

    // The backend is chosen exactly once, from the two configured values,
    // and passed to every handler from here.
    let store = Store::connect(&settings);

    // Everything except login/logout requires an open session.
    if !matches!(args.command, Command::Login { .. } | Command::Logout) {
        auth::require_session(&session_path)?;
    }

    match args.command {
        Command::Login { code } => auth::login(&code, &session_path, &store).await,
        Command::Logout => auth::logout(&session_path),
        Command::Overview => dashboard::overview(&store).await,
        Command::Leads { event_type } => leads::list(&store, event_type.as_deref()).await,
        Command::Vlogs { command } => match command {
            VlogCommand::List => content::list_vlogs(&store).await,
            VlogCommand::Add { title, description } => {
                content::add_vlog(&store, title, description).await
            }
            VlogCommand::Update {
                id,
                title,
                description,
            } => content::update_vlog(&store, id, title, description).await,
            VlogCommand::Delete { id } => content::delete(&store, tables::VLOGS, id).await,
        },
        Command::Jobs { command } => match command {
            JobCommand::List => content::list_jobs(&store).await,
            JobCommand::Add {
                title,
                company,
                location,
                deadline,
                description,
            } => content::add_job(&store, title, company, location, deadline, description).await,
            JobCommand::Update {
                id,
                title,
                company,
                location,
                deadline,
                description,
            } => {
                content::update_job(&store, id, title, company, location, deadline, description)
                    .await
            }
            JobCommand::Delete { id } => content::delete(&store, tables::JOBS, id).await,
        },
        Command::Deals { command } => match command {
            DealCommand::List => content::list_deals(&store).await,
            DealCommand::Add {
                title,
                discount,
                expiration,
                description,
            } => content::add_deal(&store, title, discount, expiration, description).await,
            DealCommand::Update {
                id,
                title,
                discount,
                expiration,
                description,
            } => {
                content::update_deal(&store, id, title, discount, expiration, description).await
            }
            DealCommand::Delete { id } => content::delete(&store, tables::DEALS, id).await,
        },
        Command::Stream { command } => match command {
            StreamCommand::Show => stream::show(&store).await,
            StreamCommand::Set {
                platform,
                channel_id,
            } => {
                let platform: crate::models::StreamPlatform = platform.parse().map_err(|_| {
                    print_cmd_error!("Unknown platform: use youtube, twitch or vimeo.");
                    Box::<dyn Error>::from(format!("Unknown platform: {}", platform))
                })?;
                stream::set(&store, platform, channel_id).await
            }
        },
    }
}
