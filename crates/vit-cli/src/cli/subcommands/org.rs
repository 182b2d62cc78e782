use clap::Subcommand;

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Create an organization.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        slug: String,
        #[arg(long)]
        website_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Get an organization by ID, or by slug with `--slug`.
    Get {
        id: String,
        #[arg(long)]
        slug: bool,
    },
    /// Update an organization. Pass an empty string to clear a field.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        website_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an organization. Its users and apps are detached.
    Delete { id: String },
    /// List organizations.
    List {
        #[arg(long)]
        offset: Option<u32>,
    },
}
