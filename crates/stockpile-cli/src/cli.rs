//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stockpile_core::{Config, ProductDraft};

#[derive(Parser, Debug)]
#[command(name = "stockpile")]
#[command(about = "Offline-first product inventory dashboard")]
#[command(version)]
pub struct Cli {
    /// Path to config file (default: $XDG_CONFIG_HOME/stockpile/config.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Product API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding the local product cache
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Number of products to fetch when the cache is empty
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Flags take precedence over the config file and the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref url) = self.base_url {
            config.base_url = url.clone();
        }
        if let Some(ref dir) = self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(limit) = self.limit {
            config.list_limit = limit;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all products
    List,
    /// Show a single product
    Show {
        id: i64,
        /// Fetch the product from the API instead of the local inventory
        #[arg(long)]
        remote: bool,
    },
    /// Add a product
    Add(AddArgs),
    /// Edit fields of an existing product
    Edit(EditArgs),
    /// Delete a product
    Delete { id: i64 },
    /// Discard the local cache and fetch products again
    Reset,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = "")]
    pub thumbnail: String,
}

impl From<AddArgs> for ProductDraft {
    fn from(args: AddArgs) -> Self {
        ProductDraft {
            title: args.title,
            description: args.description,
            price: args.price,
            category: args.category,
            thumbnail: args.thumbnail,
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub thumbnail: Option<String>,
}

impl EditArgs {
    /// Overwrite the fields given on the command line, keep the rest.
    pub fn apply(&self, draft: &mut ProductDraft) {
        if let Some(ref title) = self.title {
            draft.title = title.clone();
        }
        if let Some(ref description) = self.description {
            draft.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(ref category) = self.category {
            draft.category = category.clone();
        }
        if let Some(ref thumbnail) = self.thumbnail {
            draft.thumbnail = thumbnail.clone();
        }
    }
}
