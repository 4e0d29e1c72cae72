//! Text and JSON rendering of entities and list pages.

use anyhow::Result;
use museum_client::ListState;
use museum_core::entity::Entity;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

pub fn print_page<E: Entity + Serialize>(state: &ListState<E>, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        let body = serde_json::json!({
            "items": state.items,
            "pagination": state.pagination,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if state.items.is_empty() {
        println!("No {} records found.", E::KIND.to_lowercase());
    }
    for item in &state.items {
        println!("{:<38} {:<12} {}", item.id(), item.status(), item.label());
    }
    let p = state.pagination;
    println!(
        "\nPage {} of {} ({} total, {} per page)",
        p.page_index,
        p.total_pages.max(1),
        p.total_items,
        p.page_size,
    );
    Ok(())
}

pub fn print_entity<E: Entity + Serialize>(entity: &E, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entity)?),
        OutputFormat::Text => {
            println!("{} {}", E::KIND, entity.id());
            println!("  label:  {}", entity.label());
            println!("  status: {}", entity.status());
            println!("{}", serde_json::to_string_pretty(entity)?);
        }
    }
    Ok(())
}

/// One-line confirmation of a mutation.
pub fn print_done(message: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "success": true, "message": message })),
        OutputFormat::Text => println!("{message}"),
    }
    Ok(())
}
