//! Samples command - list built-in sample datasets.

use colored::Colorize;
use vizlink::input::DataLoader;
use vizlink::SampleDataset;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Built-in samples".cyan().bold());
    println!();

    let loader = DataLoader::new();
    for sample in SampleDataset::ALL {
        let loaded = loader.load_value(&sample.value(), sample.name())?;
        println!(
            "  {:<22} {} records, {} fields",
            sample.name().white().bold(),
            loaded.source.record_count,
            loaded.source.field_count
        );
    }

    println!();
    println!("Use with: {}", "vizlink inspect --sample <name>".dimmed());
    Ok(())
}
