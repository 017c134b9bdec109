//! Subcommand handlers

use anyhow::bail;
use keyswitch_app::AppState;
use keyswitch_core::types::{CredentialEntry, CredentialUpdate, ENVIRONMENT_CANDIDATE_NAME};
use keyswitch_provider::mask_secret;

use crate::cli::Commands;

pub async fn execute(state: &AppState, command: Commands) -> anyhow::Result<()> {
    let store = &state.store;

    match command {
        Commands::List => {
            let entries = store.get_all();
            if entries.is_empty() {
                println!("No API keys stored.");
            }
            let active = store.active_index();
            for (index, entry) in entries.iter().enumerate() {
                println!("{}", render_entry(index, entry, index == active));
            }
            if let Some(env) = store.environment_secret() {
                println!("   env  {}  {ENVIRONMENT_CANDIDATE_NAME}", mask_secret(env));
            }
        }

        Commands::Add { secret, name } => {
            let secret = secret.trim();
            if secret.is_empty() {
                bail!("API key must not be empty");
            }
            let mut entry = CredentialEntry::draft(store.get_all().len());
            entry.secret = secret.to_string();
            if let Some(name) = name {
                entry.display_name = name;
            }
            println!("Added {} ({})", entry.display_name, entry.id);
            store.add(entry);
        }

        Commands::Remove { id } => {
            require_entry(state, &id)?;
            store.remove(&id);
            println!("Removed {id}");
        }

        Commands::Rename { id, name } => {
            require_entry(state, &id)?;
            store.update(&id, &CredentialUpdate::display_name(name));
            println!("Renamed {id}");
        }

        Commands::Activate { index } => {
            let len = store.get_all().len();
            if index >= len {
                bail!("No API key at index {index} ({len} stored)");
            }
            store.set_active_index(index);
            println!("Active key is now #{index}");
        }

        Commands::Test => {
            let entries = store.test_all().await;
            if entries.is_empty() {
                println!("No API keys stored.");
            }
            for (index, entry) in entries.iter().enumerate() {
                println!("{}", render_entry(index, entry, false));
            }
        }

        Commands::Next => print_selection(state, store.next_valid())?,

        Commands::Rotate => print_selection(state, store.rotate())?,

        Commands::Generate { prompt, model } => {
            let text = state.generate_text(&model, &prompt).await?;
            println!("{text}");
        }
    }

    Ok(())
}

fn require_entry(state: &AppState, id: &str) -> anyhow::Result<()> {
    if state.store.get_all().iter().any(|e| e.id == id) {
        Ok(())
    } else {
        bail!("No API key with id {id}")
    }
}

fn print_selection(state: &AppState, secret: Option<String>) -> anyhow::Result<()> {
    let Some(secret) = secret else {
        bail!("No usable API key stored");
    };
    println!("#{} {}", state.store.active_index(), mask_secret(&secret));
    Ok(())
}

/// One `list` line: marker, index, masked key, validity, name, id.
fn render_entry(index: usize, entry: &CredentialEntry, active: bool) -> String {
    let marker = if active { '*' } else { ' ' };
    let secret = if entry.has_secret() {
        mask_secret(&entry.secret)
    } else {
        "(empty)".to_string()
    };
    let status = match entry.last_validated {
        Some(true) => "valid",
        Some(false) => "invalid",
        None => "untested",
    };
    format!(
        "{marker} {index:>3}  {secret}  [{status}]  {}  ({})",
        entry.display_name, entry.id
    )
}
