use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AppCommands, MediaCommands, OrgCommands, TimelineCommands, UserCommands, VersionCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server until ctrl-c.
    Serve(ServeArgs),
    /// Open the database, applying migrations.
    Migrate,
    /// Organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Dashboard users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Apps and their status.
    App {
        #[command(subcommand)]
        action: AppCommands,
    },
    /// App versions.
    Version {
        #[command(subcommand)]
        action: VersionCommands,
    },
    /// Timeline events.
    Timeline {
        #[command(subcommand)]
        action: TimelineCommands,
    },
    /// Media uploads.
    Media {
        #[command(subcommand)]
        action: MediaCommands,
    },
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Print a JSON schema, or list schema names.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.bind`
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// app, app_version, media, timeline_event, user, organization
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    /// created, updated, deleted, status_changed
    #[arg(long)]
    pub action: Option<String>,
    /// Only entries recorded by this actor
    #[arg(long = "by")]
    pub by: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; omit to list all names
    pub name: Option<String>,
}
