//! Command handlers. Results are printed to stdout as JSON.

use std::io::Write;

use serde::Serialize;
use serde_json::json;
use sji_api_client::SjiClient;
use sji_core::models::ValidationAction;
use tracing::info;

use crate::cli::{Commands, DraftsCommand, RecordCommand, SearchArgs, UsersCommand};
use crate::{Error, Result};

pub async fn execute(client: &SjiClient, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let summary = client.login(&email, &password).await?;
            emit(&summary)
        }
        Commands::Logout => {
            client.logout()?;
            emit(&json!({ "loggedOut": true }))
        }
        Commands::Whoami => match client.current_user() {
            Some(summary) => emit(&summary),
            None => Err(Error::Custom(
                "Aucune session active. Connectez-vous avec `sji login`.".to_string(),
            )),
        },
        Commands::Users { action } => users(client, action).await,
        Commands::Contributions { page } => {
            emit(&client.list_contributions(page.limit, page.page).await?)
        }
        Commands::History { user_id, page } => emit(
            &client
                .user_history(&user_id, page.limit, page.page)
                .await?,
        ),
        Commands::Record { action } => record(client, action).await,
        Commands::Drafts { action } => drafts(client, action).await,
        Commands::Vocab { kind } => emit(&client.vocabulary(kind).await?),
        Commands::Search(args) => search(client, &args).await,
        Commands::Version => {
            println!(
                "{} {} (sji_core {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                sji_core::version()
            );
            Ok(())
        }
    }
}

async fn users(client: &SjiClient, action: UsersCommand) -> Result<()> {
    match action {
        UsersCommand::Pending => emit(&client.list_pending_users().await?),
        UsersCommand::All => emit(&client.get_all_users().await?),
        UsersCommand::Show { id } => emit(&client.get_user(&id).await?),
        UsersCommand::Validate { id } => {
            client.validate_user(&id, ValidationAction::Activate).await?;
            info!(user = %id, "account activated");
            emit(&json!({ "id": id, "action": ValidationAction::Activate }))
        }
        UsersCommand::Reject { id } => {
            client.validate_user(&id, ValidationAction::Reject).await?;
            info!(user = %id, "account rejected");
            emit(&json!({ "id": id, "action": ValidationAction::Reject }))
        }
        UsersCommand::Delete { id } => {
            client.delete_user(&id).await?;
            info!(user = %id, "account deleted");
            emit(&json!({ "id": id, "deleted": true }))
        }
    }
}

async fn record(client: &SjiClient, action: RecordCommand) -> Result<()> {
    let (category, id, decision) = match action {
        RecordCommand::Show { category, id } => {
            return emit(&client.get_record_detail(category, &id).await?);
        }
        RecordCommand::Validate { category, id } => (category, id, ValidationAction::Activate),
        RecordCommand::Reject { category, id } => (category, id, ValidationAction::Reject),
    };
    client.validate_record(category, &id, decision).await?;
    info!(%category, record = %id, %decision, "record reviewed");
    emit(&json!({ "category": category, "id": id, "action": decision }))
}

async fn drafts(client: &SjiClient, action: DraftsCommand) -> Result<()> {
    match action {
        DraftsCommand::List { category } => emit(&client.list_drafts(category).await?),
        DraftsCommand::Delete { category, id } => {
            client.delete_draft(category, &id).await?;
            emit(&json!({ "category": category, "id": id, "deleted": true }))
        }
    }
}

async fn search(client: &SjiClient, args: &SearchArgs) -> Result<()> {
    let build = client
        .build_search(&args.categories(), &args.filters())
        .await;
    if !build.failed.is_empty() {
        let names: Vec<String> = build.failed.iter().map(ToString::to_string).collect();
        eprintln!(
            "Filtres ignorés (vocabulaire indisponible) : {}",
            names.join(", ")
        );
    }
    let results = client
        .search(&args.query, args.page.limit, args.page.page, &build.body)
        .await?;
    emit(&results)
}

fn emit<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
