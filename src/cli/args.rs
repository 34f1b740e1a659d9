//! CLI argument definitions using clap

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::ProductStatus;

/// Admin toolkit for an insurance-brokerage network
#[derive(Parser, Debug)]
#[command(name = "brokerhub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (repeat for more detail)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Override the data directory
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage product categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Manage products
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Manage insurance companies
    Company {
        #[command(subcommand)]
        command: CompanyCommands,
    },

    /// Manage branch offices
    Branch {
        #[command(subcommand)]
        command: BranchCommands,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage news posts
    News {
        #[command(subcommand)]
        command: NewsCommands,
    },

    /// Manage calendar events
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Manage documents
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Show the category hierarchy as a tree
    Tree,

    /// List categories flat
    List,

    /// List categories as indented dropdown options
    Options,

    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Parent category id (omit for a root category)
        #[arg(short, long)]
        parent: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a category
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// New parent category id
        #[arg(short, long, conflicts_with = "root")]
        parent: Option<String>,
        /// Detach from its parent and make it a root
        #[arg(long, conflicts_with = "parent")]
        root: bool,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a category (children become roots)
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    List {
        /// Substring search on name and description
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by category or subcategory id
        #[arg(long)]
        category: Option<String>,
        /// Filter by company id
        #[arg(long)]
        company: Option<String>,
        /// Filter by status (active, inactive, pending)
        #[arg(long)]
        status: Option<ProductStatus>,
    },

    /// Show one product
    Show { id: String },

    /// Create a product
    Add {
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long)]
        company: String,
        /// Authoring user id
        #[arg(long)]
        author: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "active")]
        status: ProductStatus,
        #[arg(long)]
        strengths: Option<String>,
        #[arg(long)]
        weaknesses: Option<String>,
        #[arg(long)]
        processes: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Update a product
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<ProductStatus>,
        #[arg(long)]
        strengths: Option<String>,
        #[arg(long)]
        weaknesses: Option<String>,
        #[arg(long)]
        processes: Option<String>,
        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a product
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// List companies
    List {
        /// Substring search on the name
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        classification: Option<String>,
    },

    /// List distinct classification values
    Classifications,

    /// Show one company with its specifications
    Show { id: String },

    /// Create a company
    Add {
        name: String,
        #[arg(long)]
        classification: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long = "agent-url")]
        agent_access_url: Option<String>,
    },

    /// Update a company
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        classification: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long = "agent-url")]
        agent_access_url: Option<String>,
    },

    /// Delete a company
    Rm { id: String },

    /// Manage company specifications
    Spec {
        #[command(subcommand)]
        command: SpecCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SpecCommands {
    /// List specifications of a company
    List {
        /// Company id
        company: String,
    },

    /// Add a specification to a company
    Add {
        /// Company id
        company: String,
        /// Specification category (commissions, claims, ...)
        category: String,
        /// Specification text
        content: String,
    },

    /// Delete a specification
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BranchCommands {
    /// List branch offices
    List {
        /// Substring search on name and city
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a branch office
    Add {
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        province: String,
        #[arg(long = "postal-code")]
        postal_code: String,
        /// Contact person name
        #[arg(long)]
        contact: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },

    /// Update a branch office
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        province: Option<String>,
        #[arg(long = "postal-code")]
        postal_code: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },

    /// Delete a branch office
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List user accounts
    List {
        /// Substring search on name and email
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Filter by branch id
        #[arg(long)]
        branch: Option<String>,
    },

    /// Create a user account
    Add {
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
        /// Account type (employee, agent, ...)
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        position: Option<String>,
        /// Phone extension
        #[arg(long)]
        extension: Option<String>,
        #[arg(long = "social")]
        social_contact: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Update a user account
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        extension: Option<String>,
        #[arg(long = "social")]
        social_contact: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Delete a user account
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum NewsCommands {
    /// List news posts, newest first
    List {
        /// Substring search on the title
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Filter by company id
        #[arg(long)]
        company: Option<String>,
        /// Only featured posts
        #[arg(long)]
        featured: bool,
    },

    /// Publish a news post
    Add {
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: String,
        /// Authoring user id
        #[arg(long)]
        author: String,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long = "cover-image")]
        cover_image: Option<String>,
        #[arg(long)]
        featured: bool,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Update a news post
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "cover-image")]
        cover_image: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a news post
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List calendar events, ordered by start date
    List {
        #[arg(long)]
        category: Option<String>,
        /// Keep events ending on or after this date
        #[arg(long, value_parser = parse_datetime)]
        from: Option<DateTime<Utc>>,
        /// Keep events starting on or before this date
        #[arg(long, value_parser = parse_datetime)]
        to: Option<DateTime<Utc>>,
    },

    /// Create a calendar event
    Add {
        title: String,
        #[arg(long)]
        category: String,
        /// Start (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_datetime)]
        start: DateTime<Utc>,
        /// End (RFC 3339 or YYYY-MM-DD)
        #[arg(long, value_parser = parse_datetime)]
        end: DateTime<Utc>,
        /// Owning user id
        #[arg(long)]
        user: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Update a calendar event
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long, value_parser = parse_datetime)]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_datetime)]
        end: Option<DateTime<Utc>>,
    },

    /// Delete a calendar event
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum DocCommands {
    /// List documents
    List {
        /// Substring search on the title
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Filter by company id
        #[arg(long)]
        company: Option<String>,
        /// Filter by product id
        #[arg(long)]
        product: Option<String>,
    },

    /// Upload a file and create its document record
    Add {
        /// File to upload
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Document category id
        #[arg(long)]
        category: String,
        /// Uploading user id
        #[arg(long)]
        uploader: String,
        /// Title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        product: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a document record (the stored file is kept)
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}

/// Accepts RFC 3339 timestamps or bare dates (midnight UTC).
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| DateTime::from_naive_utc_and_offset(d.and_time(NaiveTime::MIN), Utc))
        .map_err(|_| format!("invalid date: {s} (expected RFC 3339 or YYYY-MM-DD)"))
}
