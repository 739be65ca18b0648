//! Charts command - print every chart model through the render contract.

use std::path::Path;

use colored::{ColoredString, Colorize};
use vizlink::chart::{ChordMatrix, ForceGraph, RadialChart, SunburstNode};
use vizlink::{ChartKind, ChartModel, ChartRenderer, Highlight, RenderDispatch, RenderFrame};

use super::{dataset_name, load_dashboard};
use crate::cli::DataSource;

/// Rows printed per chart before eliding the rest.
const MAX_ROWS: usize = 15;

pub fn run(
    source: DataSource,
    select: Vec<String>,
    json_output: bool,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dashboard = load_dashboard(&source, config_path)?;
    for name in &select {
        dashboard.click(name, true);
    }

    if json_output {
        let charts: serde_json::Map<String, serde_json::Value> = ChartKind::ALL
            .iter()
            .map(|kind| {
                let input = serde_json::to_value(dashboard.chart_input(*kind))?;
                Ok((kind.as_str().to_string(), input))
            })
            .collect::<Result<_, serde_json::Error>>()?;
        let report = serde_json::json!({
            "source": dataset_name(&dashboard),
            "selections": dashboard.selections(),
            "selected": dashboard.selection().iter().collect::<Vec<_>>(),
            "charts": charts,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Charts for".cyan().bold(),
        dataset_name(&dashboard).white()
    );

    let mut dispatch = ChartKind::ALL
        .iter()
        .fold(RenderDispatch::new(), |dispatch, kind| {
            dispatch.with(Box::new(TerminalRenderer { kind: *kind }))
        });
    dashboard.render(&mut dispatch);

    Ok(())
}

/// Draws one chart as indented text.
struct TerminalRenderer {
    kind: ChartKind,
}

impl ChartRenderer for TerminalRenderer {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn render(&mut self, frame: &RenderFrame<'_>) {
        println!();
        println!("{}", self.kind.as_str().bold().underline());

        match frame.input.model() {
            None => {
                let text = frame.input.placeholder().unwrap_or_default();
                println!("  {}", text.dimmed());
            }
            Some(ChartModel::RadialBar(chart)) => print_radial(frame, chart),
            Some(ChartModel::Chord(matrix)) => print_chord(frame, matrix),
            Some(ChartModel::Force(graph)) => print_force(frame, graph),
            Some(ChartModel::Sunburst(root)) => print_sunburst(frame, root, 0),
        }
    }
}

fn mark(name: &str, highlight: Highlight) -> ColoredString {
    match highlight {
        Highlight::Emphasized => name.yellow().bold(),
        Highlight::Dimmed => name.dimmed(),
        Highlight::Neutral => name.normal(),
    }
}

fn elided(total: usize) {
    if total > MAX_ROWS {
        println!("  {}", format!("... {} more", total - MAX_ROWS).dimmed());
    }
}

fn print_radial(frame: &RenderFrame<'_>, chart: &RadialChart) {
    let width = 30.0;
    for bar in chart.bars.iter().take(MAX_ROWS) {
        let filled = if chart.max_value > 0.0 {
            ((bar.value / chart.max_value) * width).round() as usize
        } else {
            0
        };
        println!(
            "  {} {} {}",
            mark(&format!("{:<24}", bar.name), frame.highlight(&bar.name)),
            "█".repeat(filled).cyan(),
            bar.value
        );
    }
    elided(chart.bars.len());
}

fn print_chord(frame: &RenderFrame<'_>, matrix: &ChordMatrix) {
    for (i, name) in matrix.names.iter().enumerate().take(MAX_ROWS) {
        let partners: Vec<String> = matrix
            .names
            .iter()
            .enumerate()
            .filter(|(j, _)| matrix.connected(i, *j))
            .map(|(_, other)| {
                let link = frame.link_highlight(name, other);
                format!("{}({:.1})", other, link.opacity())
            })
            .collect();
        println!(
            "  {} [{}] {}",
            mark(&format!("{:<24}", name), frame.highlight(name)),
            matrix.connection_count(i),
            partners.join(", ").dimmed()
        );
    }
    elided(matrix.names.len());
}

fn print_force(frame: &RenderFrame<'_>, graph: &ForceGraph) {
    println!(
        "  {} nodes, {} links, {} communities",
        graph.nodes.len(),
        graph.links.len(),
        graph.community_count()
    );
    for node in graph.nodes.iter().filter(|n| n.is_main).take(MAX_ROWS) {
        let neighbors: Vec<&str> = graph.neighbors(&node.id).collect();
        println!(
            "  {} group {} community {} -> {}",
            mark(&format!("{:<24}", node.id), frame.highlight(&node.id)),
            node.group,
            node.community,
            neighbors.join(", ").dimmed()
        );
    }
    elided(graph.nodes.iter().filter(|n| n.is_main).count());
}

fn print_sunburst(frame: &RenderFrame<'_>, node: &SunburstNode, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    println!(
        "{}{} {}",
        indent,
        mark(&node.name, frame.highlight(&node.name)),
        node.total().to_string().dimmed()
    );
    if depth >= 3 {
        return;
    }
    for child in node.children.iter().take(MAX_ROWS) {
        print_sunburst(frame, child, depth + 1);
    }
    if node.children.len() > MAX_ROWS {
        println!(
            "{}  {}",
            indent,
            format!("... {} more", node.children.len() - MAX_ROWS).dimmed()
        );
    }
}
