use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "grabbit")]
#[command(about = "Track what to grab: shopping, errands, and gifts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item to the list
    #[command(alias = "a")]
    Add {
        /// What to get (e.g. "oat milk")
        name: String,

        /// Where to buy it (e.g. "Costco")
        #[arg(short, long)]
        store: Option<String>,

        /// groceries|household|clothing|electronics|gifts|other (aliases work)
        #[arg(short, long)]
        category: Option<String>,

        /// Who it's for ("self" unless it's a gift)
        #[arg(short = 'f', long = "for")]
        recipient: Option<String>,

        /// Extra details (e.g. "the organic kind")
        #[arg(short, long)]
        notes: Option<String>,

        /// low|medium|high|urgent
        #[arg(short, long)]
        priority: Option<String>,

        /// Link to the item online
        #[arg(long)]
        url: Option<String>,

        /// Estimated or known price
        #[arg(long)]
        price: Option<f64>,

        /// Something you buy regularly
        #[arg(long)]
        recurring: bool,
    },

    /// List items
    #[command(alias = "ls")]
    List {
        /// needed|bought|archived|all
        #[arg(long, default_value = "needed")]
        status: String,

        /// Filter by store
        #[arg(short, long)]
        store: Option<String>,

        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by who it's for
        #[arg(short = 'f', long = "for")]
        recipient: Option<String>,

        /// Filter by priority
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// What to grab at a store
    Store {
        /// Store name (aliases work, e.g. "tj")
        store: String,
    },

    /// Gift ideas for a person
    For {
        /// Recipient name
        recipient: String,
    },

    /// Urgent items still needed
    Urgent,

    /// Search items by name or notes
    Search { query: String },

    /// Mark an item as bought
    #[command(alias = "b")]
    Buy {
        /// Item id (a unique prefix is enough)
        id: Option<String>,

        /// Resolve the item by name instead
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Archive an item (keeps it queryable under --status all)
    Archive {
        /// Item id (a unique prefix is enough)
        id: String,
    },

    /// Restore an item to needed
    Restore {
        /// Item id (a unique prefix is enough)
        id: String,
    },

    /// Permanently delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item id (a unique prefix is enough)
        id: String,
    },

    /// Update an item's details
    Update {
        /// Item id (a unique prefix is enough)
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// needed|bought|archived
        #[arg(long)]
        status: Option<String>,

        #[arg(short, long)]
        store: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short = 'f', long = "for")]
        recipient: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        recurring: Option<bool>,
    },

    /// Recently bought items
    Recent {
        /// Window in days (defaults to the configured value)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Aggregate counts for the whole list
    Summary,

    /// Stores with needed-item counts
    Stores,

    /// Merge the external note document into the list
    Sync,

    /// Get or set configuration
    Config {
        /// Configuration key (sync-command, recent-days)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
