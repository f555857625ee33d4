// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `library` subcommands.

use clap::Subcommand;
use colored::Colorize;
use postforge_config::PostforgeConfig;
use postforge_core::types::StoredContent;
use postforge_core::{ContentStore, PostforgeError};
use postforge_library::JsonLibrary;

#[derive(Subcommand, Debug)]
pub enum LibraryCommand {
    /// List saved entries, newest first.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one entry.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Remove one entry.
    Delete { id: String },
}

pub async fn run_library(config: &PostforgeConfig, command: LibraryCommand) -> Result<(), PostforgeError> {
    let library = JsonLibrary::open(&config.app.library_path).await?;
    match command {
        LibraryCommand::List { json } => {
            let items = library.list_content().await?;
            if json {
                println!("{}", to_json(&items)?);
            } else if items.is_empty() {
                eprintln!("library is empty ({})", library.path().display());
            } else {
                for item in &items {
                    println!("{}", summary_line(item));
                }
            }
        }
        LibraryCommand::Show { id, json } => {
            let item = library
                .get_content(&id)
                .await?
                .ok_or(PostforgeError::NotFound { id })?;
            if json {
                println!("{}", to_json(&item)?);
            } else {
                println!("{}", item.title.bold());
                println!("{}", summary_line(&item).dimmed());
                println!();
                println!("{}", item.body);
            }
        }
        LibraryCommand::Delete { id } => {
            library.delete_content(&id).await?;
            eprintln!("{} {id}", "deleted".green().bold());
        }
    }
    Ok(())
}

fn summary_line(item: &StoredContent) -> String {
    let platform = item
        .platform
        .as_ref()
        .map(|p| p.label())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {}  {:<10}  {}",
        item.id,
        item.created_at.format("%Y-%m-%d %H:%M"),
        platform,
        item.title
    )
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, PostforgeError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PostforgeError::Internal(format!("failed to encode library entry: {e}")))
}
