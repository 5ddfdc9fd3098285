use clap::{Parser, Subcommand};

/// Command-line interface definition for compound-assist
/// Resident companion for a gated compound: My ID, directory and visitor log
#[derive(Parser)]
#[command(
    name = "compound-assist",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compound resident assistant: personal ID, phone directory and visitor log with departure reminders",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Today's visitors and the compound's quick-dial numbers
    Dashboard,

    /// Resident profile and personal ID card
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Compound phone directory
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },

    /// Visitor log
    Visitors {
        #[command(subcommand)]
        action: VisitorsAction,
    },

    /// Visitors saved for reuse
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Departure reminders
    Remind {
        #[arg(long = "pending", help = "List reminders that have not fired yet")]
        pending: bool,

        #[arg(long = "fire", help = "Fire every reminder that is due")]
        fire: bool,

        /// Reference time for --fire (YYYY-MM-DD HH:MM), defaults to now
        #[arg(long = "at", value_name = "DATETIME", requires = "fire")]
        at: Option<String>,
    },

    /// Backup and restore of profile, contacts and visitors
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show name, apartment and image status
    Show,

    /// Update name and/or apartment
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        apartment: Option<String>,
    },

    /// Pick a new personal ID image
    SetId {
        /// Image file (path, file:// or content:// reference)
        file: String,
    },

    /// Pick a new profile photo
    SetPhoto {
        /// Image file (path, file:// or content:// reference)
        file: String,
    },

    /// Show where the ID card can be opened from
    Id,
}

#[derive(Subcommand)]
pub enum ContactsAction {
    /// List the directory grouped by category
    List {
        #[arg(long, short, help = "Search name, phone and hours")]
        query: Option<String>,

        #[arg(long, short, help = "Only this category (\"All\" for everything)")]
        category: Option<String>,

        #[arg(long = "categories", help = "List the available categories")]
        categories: bool,
    },

    /// Add a contact
    Add {
        name: String,
        phone: String,

        #[arg(long, default_value = "")]
        hours: String,

        #[arg(long, default_value = "")]
        category: String,
    },

    /// Edit every contact with the given name and phone
    Edit {
        name: String,
        phone: String,

        #[arg(long = "new-name")]
        new_name: Option<String>,

        #[arg(long = "new-phone")]
        new_phone: Option<String>,

        #[arg(long)]
        hours: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Delete every contact with the given name and phone
    Del { name: String, phone: String },

    /// Toggle the favorite flag
    Fav { name: String, phone: String },
}

#[derive(Subcommand)]
pub enum VisitorsAction {
    /// List today's, upcoming and previous visits
    List {
        #[arg(long = "all", help = "Do not cap the upcoming/previous lists")]
        all: bool,
    },

    /// Register a visit
    Add {
        /// Visitor name (taken from --from-saved when omitted)
        name: Option<String>,

        #[arg(long, help = "ID image (path, file:// or content:// reference)")]
        image: Option<String>,

        #[arg(long, help = "Arrival time (HH:MM or hh:mm AM/PM)")]
        arrival: Option<String>,

        #[arg(long, help = "Departure time (HH:MM or hh:mm AM/PM)")]
        departure: Option<String>,

        #[arg(long, help = "Visit date (YYYY-MM-DD), defaults to today")]
        date: Option<String>,

        #[arg(long = "save", help = "Save the visitor for reuse")]
        save: bool,

        #[arg(long = "from-saved", value_name = "ID", help = "Start from a saved visitor")]
        from_saved: Option<String>,
    },

    /// Change name or times of a visit
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        arrival: Option<String>,

        #[arg(long)]
        departure: Option<String>,
    },

    /// Delete a visit
    Del { id: String },

    /// Copy a visit to the following day
    Dup { id: String },

    /// Compose the notice for the security office
    Notice { id: String },
}

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved visitors
    List,

    /// Rename a saved visitor or change its ID image
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a saved visitor
    Del { id: String },
}

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write a backup file
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Wrap the backup in a .zip archive
        #[arg(long)]
        compress: bool,

        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Restore from a backup file (.json or .zip)
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,
    },
}
