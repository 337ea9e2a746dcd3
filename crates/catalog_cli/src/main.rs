//! Command-line probe over the catalog core.
//!
//! # Responsibility
//! - Run category use cases against a SQLite file and print JSON results.
//! - Read storage and logging settings from `CATALOG_*` variables.
//! - Default to `catalog.db` in the working directory so rows persist between runs.

use anyhow::{Context, Result};
use catalog_core::config::ENV_DB_PATH;
use catalog_core::{
    core_version, CategoryService, CoreConfig, CreateCategoryInput, DatabaseConfig,
    ListCategoriesInput, SqliteCategoryRepository, UpdateCategoryInput,
};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::Value;

const DEFAULT_DB_FILE: &str = "catalog.db";

#[derive(Debug, Parser)]
#[command(name = "catalog", version, about = "Manage catalog categories")]
struct Cli {
    /// SQLite file, or `:memory:` for a throwaway database.
    #[arg(long, global = true, env = ENV_DB_PATH, default_value = DEFAULT_DB_FILE)]
    db: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a category.
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    /// Show one category.
    Get { id: String },
    /// Search categories.
    List(ListArgs),
    /// Patch a category.
    Update(UpdateArgs),
    /// Delete a category.
    Delete { id: String },
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    page: Option<i64>,
    #[arg(long)]
    per_page: Option<i64>,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    sort_dir: Option<String>,
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,
    #[arg(long)]
    clear_description: bool,
    #[arg(long, conflicts_with = "deactivate")]
    activate: bool,
    #[arg(long)]
    deactivate: bool,
}

impl From<ListArgs> for ListCategoriesInput {
    fn from(args: ListArgs) -> Self {
        Self {
            page: args.page.map(Value::from),
            per_page: args.per_page.map(Value::from),
            sort: args.sort,
            sort_dir: args.sort_dir,
            filter: args.filter,
        }
    }
}

impl From<UpdateArgs> for UpdateCategoryInput {
    fn from(args: UpdateArgs) -> Self {
        let description = if args.clear_description {
            Some(None)
        } else {
            args.description.map(Some)
        };
        let is_active = match (args.activate, args.deactivate) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Self {
            id: args.id,
            name: args.name,
            description,
            is_active,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_env().context("failed to read CATALOG_* settings")?;
    config.database = DatabaseConfig::from_path_value(&cli.db);
    config
        .init_logging()
        .context("failed to initialize logging")?;

    let conn = config
        .database
        .open()
        .context("failed to open category database")?;
    let repo = SqliteCategoryRepository::try_new(conn)?;
    let mut service = CategoryService::new(repo).with_default_per_page(config.default_per_page);
    info!(
        "event=cli_start module=cli status=ok core_version={} command={:?}",
        core_version(),
        cli.command
    );

    let output = match cli.command {
        Command::Create {
            name,
            description,
            inactive,
        } => {
            let input = CreateCategoryInput {
                name,
                description,
                is_active: Some(!inactive),
            };
            serde_json::to_value(service.create(input).await?)?
        }
        Command::Get { id } => serde_json::to_value(service.get(&id).await?)?,
        Command::List(args) => serde_json::to_value(service.list(args.into()).await?)?,
        Command::Update(args) => serde_json::to_value(service.update(args.into()).await?)?,
        Command::Delete { id } => {
            service.delete(&id).await?;
            serde_json::json!({ "deleted": id })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DEFAULT_DB_FILE};
    use catalog_core::{DatabaseConfig, ListCategoriesInput, UpdateCategoryInput};
    use clap::{CommandFactory, Parser};

    #[test]
    fn list_args_map_to_search_input() {
        let cli = Cli::parse_from([
            "catalog", "list", "--page", "2", "--per-page", "5", "--sort", "name", "--filter", "ab",
        ]);
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        let input: ListCategoriesInput = args.into();
        assert_eq!(input.page, Some(serde_json::json!(2)));
        assert_eq!(input.per_page, Some(serde_json::json!(5)));
        assert_eq!(input.sort.as_deref(), Some("name"));
        assert_eq!(input.sort_dir, None);
        assert_eq!(input.filter.as_deref(), Some("ab"));
    }

    #[test]
    fn update_args_distinguish_clear_from_absent() {
        let cli = Cli::parse_from(["catalog", "update", "some-id", "--clear-description"]);
        let Command::Update(args) = cli.command else {
            panic!("expected update");
        };
        let input: UpdateCategoryInput = args.into();
        assert_eq!(input.description, Some(None));
        assert_eq!(input.is_active, None);

        let cli = Cli::parse_from(["catalog", "update", "some-id", "--deactivate"]);
        let Command::Update(args) = cli.command else {
            panic!("expected update");
        };
        let input: UpdateCategoryInput = args.into();
        assert_eq!(input.description, None);
        assert_eq!(input.is_active, Some(false));
    }

    #[test]
    fn database_defaults_to_a_file() {
        let command = Cli::command();
        let db = command
            .get_arguments()
            .find(|arg| arg.get_id() == "db")
            .unwrap();
        let defaults = db.get_default_values();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0], *DEFAULT_DB_FILE);
        assert_eq!(db.get_env(), Some(std::ffi::OsStr::new("CATALOG_DB_PATH")));

        let cli = Cli::parse_from(["catalog", "--db", "/tmp/other.db", "get", "id"]);
        assert_eq!(
            DatabaseConfig::from_path_value(&cli.db),
            DatabaseConfig::File {
                path: "/tmp/other.db".into()
            }
        );
    }

    #[test]
    fn conflicting_flags_are_rejected() {
        let result = Cli::try_parse_from(["catalog", "update", "id", "--activate", "--deactivate"]);
        assert!(result.is_err());
    }
}
