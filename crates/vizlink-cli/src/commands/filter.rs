//! Filter command - apply predicates and clicks, report what survives.

use std::path::Path;

use colored::Colorize;
use vizlink::FilterPredicate;

use super::{dataset_name, load_dashboard};
use crate::cli::DataSource;

/// Filter and selection arguments, in the order given on the command line.
pub struct FilterArgs {
    pub include: Vec<String>,
    pub range: Vec<String>,
    pub select: Vec<String>,
    pub multi: bool,
}

pub fn run(
    source: DataSource,
    args: FilterArgs,
    json_output: bool,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dashboard = load_dashboard(&source, config_path)?;

    let mut predicates = Vec::with_capacity(args.include.len() + args.range.len());
    for spec in &args.include {
        predicates.push(parse_include(spec)?);
    }
    for spec in &args.range {
        predicates.push(parse_range(spec)?);
    }
    for predicate in predicates {
        dashboard.set_filter(predicate)?;
    }

    for name in &args.select {
        dashboard.click(name, args.multi);
    }

    if json_output {
        let report = serde_json::json!({
            "source": dataset_name(&dashboard),
            "filters": dashboard.filters().iter().collect::<Vec<_>>(),
            "summary": dashboard.summary(),
            "selected": dashboard.selection().iter().collect::<Vec<_>>(),
            "colors": dashboard
                .colors()
                .iter()
                .map(|(name, color)| (name.to_string(), serde_json::Value::from(color)))
                .collect::<serde_json::Map<_, _>>(),
            "records": dashboard.records(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let summary = dashboard.summary();
    println!(
        "{} {}",
        "Filtered".cyan().bold(),
        dataset_name(&dashboard).white()
    );
    println!(
        "Records: {}/{}",
        summary.filtered_records.to_string().white().bold(),
        summary.total_records
    );

    if !dashboard.filters().is_empty() {
        println!();
        println!("{}", "Active filters".bold());
        for predicate in dashboard.filters().iter() {
            println!("  {}", describe(predicate));
        }
    }

    println!();
    if dashboard.selection().is_empty() {
        println!("Selection: {}", "(empty)".dimmed());
    } else {
        let names: Vec<&str> = dashboard.selection().iter().collect();
        println!("Selection: {}", names.join(", ").yellow().bold());
    }

    println!();
    println!("{} ({})", "Colors".bold(), dashboard.colors().len());
    for (name, color) in dashboard.colors().iter() {
        let highlight = dashboard.selection().highlight(name);
        println!("  {} {:<30} {}", color, name, highlight.as_str().dimmed());
    }

    Ok(())
}

fn describe(predicate: &FilterPredicate) -> String {
    match predicate {
        FilterPredicate::Categorical { field, allowed } => {
            let values: Vec<&str> = allowed.iter().map(String::as_str).collect();
            format!("{} in [{}]", field, values.join(", "))
        }
        FilterPredicate::Range { field, min, max } => format!("{} in {}..{}", field, min, max),
    }
}

fn split_assignment<'a>(spec: &'a str, expected: &str) -> Result<(&'a str, &'a str), String> {
    match spec.split_once('=') {
        Some((field, rest)) if !field.trim().is_empty() => Ok((field.trim(), rest)),
        _ => Err(format!("Invalid filter '{}': expected {}", spec, expected)),
    }
}

/// Parse `FIELD=V1,V2` into a categorical predicate.
fn parse_include(spec: &str) -> Result<FilterPredicate, String> {
    let (field, values) = split_assignment(spec, "FIELD=V1,V2")?;
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);
    Ok(FilterPredicate::categorical(field, values))
}

/// Parse `FIELD=MIN..MAX` into a range predicate.
fn parse_range(spec: &str) -> Result<FilterPredicate, String> {
    let (field, bounds) = split_assignment(spec, "FIELD=MIN..MAX")?;
    let (min, max) = bounds
        .split_once("..")
        .ok_or_else(|| format!("Invalid range '{}': expected MIN..MAX", bounds))?;
    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| format!("Invalid range minimum '{}'", min))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| format!("Invalid range maximum '{}'", max))?;
    Ok(FilterPredicate::range(field, min, max))
}
