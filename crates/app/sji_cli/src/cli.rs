use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sji_core::models::RecordCategory;
use sji_core::search::SearchFilters;
use sji_core::vocabulary::VocabularyKind;

/// Saint-Jacques heritage administration client.
#[derive(Parser, Debug)]
#[command(name = "sji", about = "Saint-Jacques heritage administration client")]
pub struct Cli {
    /// Backend origin.
    #[arg(long, global = true, env = "SJI_API_BASE_URL")]
    pub base_url: Option<String>,

    /// File holding the login session.
    #[arg(long, global = true, env = "SJI_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session.
    Login {
        #[arg(long, env = "SJI_EMAIL")]
        email: String,
        #[arg(long, env = "SJI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Account moderation.
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },
    /// Platform-wide contribution log.
    Contributions {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Contributions of one user.
    History {
        user_id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Record review.
    Record {
        #[command(subcommand)]
        action: RecordCommand,
    },
    /// The caller's drafts.
    Drafts {
        #[command(subcommand)]
        action: DraftsCommand,
    },
    /// Print a controlled vocabulary.
    Vocab { kind: VocabularyKind },
    /// Search published records.
    Search(SearchArgs),
    Version,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// Accounts waiting for validation.
    Pending,
    All,
    Show { id: String },
    Validate { id: String },
    Reject { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    Show { category: RecordCategory, id: String },
    Validate { category: RecordCategory, id: String },
    Reject { category: RecordCategory, id: String },
}

#[derive(Subcommand, Debug)]
pub enum DraftsCommand {
    List { category: RecordCategory },
    Delete { category: RecordCategory, id: String },
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query.
    #[arg(long, short, default_value = "")]
    pub query: String,

    /// Restrict to these categories (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<RecordCategory>,

    #[command(flatten)]
    pub page: PageArgs,

    #[arg(long = "century")]
    pub centuries: Vec<String>,
    #[arg(long = "theme")]
    pub themes: Vec<String>,
    /// Country id.
    #[arg(long = "country")]
    pub countries: Vec<String>,
    /// Region id.
    #[arg(long = "region")]
    pub regions: Vec<String>,
    /// Department id.
    #[arg(long = "department")]
    pub departments: Vec<String>,
    /// City id.
    #[arg(long = "city")]
    pub cities: Vec<String>,
    #[arg(long = "material")]
    pub materials: Vec<String>,
    #[arg(long = "building-nature")]
    pub building_natures: Vec<String>,
    #[arg(long = "furniture-nature")]
    pub furnitures_natures: Vec<String>,
    #[arg(long = "furniture-technique")]
    pub furnitures_techniques: Vec<String>,
    #[arg(long = "legal-entity-nature")]
    pub legal_entity_natures: Vec<String>,
    #[arg(long = "profession")]
    pub professions: Vec<String>,
    #[arg(long = "travel")]
    pub travels: Vec<String>,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            centuries: self.centuries.clone(),
            themes: self.themes.clone(),
            countries: self.countries.clone(),
            regions: self.regions.clone(),
            departments: self.departments.clone(),
            cities: self.cities.clone(),
            materials: self.materials.clone(),
            building_natures: self.building_natures.clone(),
            furnitures_natures: self.furnitures_natures.clone(),
            furnitures_techniques: self.furnitures_techniques.clone(),
            legal_entity_natures: self.legal_entity_natures.clone(),
            professions: self.professions.clone(),
            travels: self.travels.clone(),
        }
    }

    /// Selected categories, or all of them.
    pub fn categories(&self) -> Vec<RecordCategory> {
        if self.categories.is_empty() {
            RecordCategory::ALL.to_vec()
        } else {
            self.categories.clone()
        }
    }
}
