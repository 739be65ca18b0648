//! Inspect command - show field classifications and recommended chart fields.

use std::path::Path;

use colored::Colorize;
use vizlink::FieldType;

use super::{dataset_name, load_dashboard};
use crate::cli::DataSource;

pub fn run(
    source: DataSource,
    json_output: bool,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load_dashboard(&source, config_path)?;
    let schema = dashboard.schema();

    if json_output {
        let report = serde_json::json!({
            "source": dashboard.source(),
            "fields": schema.fields.values().collect::<Vec<_>>(),
            "recommendations": dashboard.recommendations(),
            "categorical_options": schema.categorical_options(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Fields of".cyan().bold(),
        dataset_name(&dashboard).white()
    );
    println!("{} records", dashboard.canonical().len());
    println!();

    println!(
        "  {} {} {} {}",
        format!("{:<28}", "FIELD").bold(),
        format!("{:<12}", "TYPE").bold(),
        format!("{:>8}", "UNIQUE").bold(),
        format!("{:>8}", "NULLS").bold()
    );
    for field in schema.fields.values() {
        let type_name = format!("{:<12}", field.primary_type.as_str());
        let type_label = match field.primary_type {
            FieldType::Numerical => type_name.green(),
            FieldType::Array => type_name.magenta(),
            FieldType::Date => type_name.blue(),
            FieldType::Boolean => type_name.yellow(),
            FieldType::Object => type_name.dimmed(),
            FieldType::Categorical => type_name.normal(),
        };
        let marker = if field.is_identifier_like() {
            " (identifier)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<28} {} {:>8} {:>8}{}",
            field.name,
            type_label,
            field.statistics.unique_count,
            field.statistics.null_count,
            marker
        );
    }

    println!();
    println!("{}", "Recommended fields".cyan().bold());
    for slot in dashboard.recommendations().slots() {
        let value = match slot.field {
            Some(field) => field.white().bold(),
            None => "(none)".dimmed(),
        };
        println!("  {:<20} {}", slot.name, value);
    }

    Ok(())
}
