use clap::{Args, Subcommand};

/// App commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AppCommands {
    /// Create a draft app.
    Create(AppCreateArgs),
    /// Get an app by ID, or by slug with `--slug`.
    Get {
        id: String,
        #[arg(long)]
        slug: bool,
    },
    /// Update an app. Pass an empty string to clear a field.
    Update(AppUpdateArgs),
    /// Move an app to a new status: draft, in_review, published, archived.
    Status { id: String, status: String },
    /// Delete an app with its versions, media, and timeline.
    Delete { id: String },
    /// List apps.
    List(AppListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AppCreateArgs {
    #[arg(long)]
    pub slug: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub tagline: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// web, ios, android, desktop, cli (repeatable)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,
    /// Repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub website_url: Option<String>,
    #[arg(long)]
    pub repository_url: Option<String>,
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub featured: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AppUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub tagline: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Replaces all platforms (repeatable)
    #[arg(long = "platform")]
    pub platforms: Option<Vec<String>>,
    /// Replaces all tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Option<Vec<String>>,
    #[arg(long)]
    pub website_url: Option<String>,
    #[arg(long)]
    pub repository_url: Option<String>,
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
}

#[derive(Clone, Debug, Args)]
pub struct AppListArgs {
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long)]
    pub org: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    #[arg(long)]
    pub featured: Option<bool>,
    /// Full-text search
    #[arg(long)]
    pub query: Option<String>,
    #[arg(long)]
    pub offset: Option<u32>,
    /// Published apps only, as the public catalog shows them
    #[arg(long)]
    pub catalog: bool,
}
