use clap::Subcommand;

/// Dashboard user commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Create a user and send a welcome email.
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// admin, editor, viewer
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Get a user by ID, or by email with `--email`.
    Get {
        id: String,
        #[arg(long)]
        email: bool,
    },
    /// Update a user. Pass an empty string to clear a field.
    Update {
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Delete a user. Their apps lose their owner.
    Delete { id: String },
    /// List users.
    List {
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
    },
}
