//! Core-to-renderer contract.
//!
//! The core computes chart models, colors and highlights once per render
//! pass; renderers consume them as pure inputs and own all drawing.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::chart::{
    chord_matrix, force_graph, radial_bars, sunburst_tree, ChordMatrix, ForceGraph, RadialChart,
    SunburstNode,
};
use crate::color::ColorMap;
use crate::recommend::FieldSelections;
use crate::selection::{Highlight, LinkHighlight, SelectionState};
use crate::value::Record;

/// The four linked chart views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    RadialBar,
    Chord,
    Force,
    Sunburst,
}

impl ChartKind {
    /// Every chart, in dashboard order.
    pub const ALL: [ChartKind; 4] = [
        ChartKind::RadialBar,
        ChartKind::Chord,
        ChartKind::Force,
        ChartKind::Sunburst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::RadialBar => "radial_bar",
            ChartKind::Chord => "chord",
            ChartKind::Force => "force",
            ChartKind::Sunburst => "sunburst",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A built chart model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", content = "model", rename_all = "snake_case")]
pub enum ChartModel {
    RadialBar(RadialChart),
    Chord(ChordMatrix),
    Force(ForceGraph),
    Sunburst(SunburstNode),
}

/// What a renderer receives for its chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChartInput {
    Ready { model: ChartModel },
    /// Required slots are unset; the renderer draws a placeholder.
    MissingFields {
        chart: ChartKind,
        missing: Vec<&'static str>,
    },
}

impl ChartInput {
    pub fn is_ready(&self) -> bool {
        matches!(self, ChartInput::Ready { .. })
    }

    pub fn model(&self) -> Option<&ChartModel> {
        match self {
            ChartInput::Ready { model } => Some(model),
            ChartInput::MissingFields { .. } => None,
        }
    }

    /// Placeholder text, e.g. `please select category and value fields`.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            ChartInput::Ready { .. } => None,
            ChartInput::MissingFields { missing, .. } => {
                Some(format!("please select {} fields", join_slots(missing)))
            }
        }
    }
}

fn join_slots(slots: &[&str]) -> String {
    match slots {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Build the input of one chart from the filtered records and its slots.
pub fn chart_input(kind: ChartKind, records: &[Record], selections: &FieldSelections) -> ChartInput {
    let built = match kind {
        ChartKind::RadialBar => {
            let slots = &selections.radial;
            match (slots.category.as_deref(), slots.value.as_deref()) {
                (Some(category), Some(value)) => {
                    Ok(ChartModel::RadialBar(radial_bars(records, category, value)))
                }
                (category, value) => Err(unset(&[("category", category), ("value", value)])),
            }
        }
        ChartKind::Chord => {
            let slots = &selections.chord;
            match (slots.entity.as_deref(), slots.relations.as_deref()) {
                (Some(entity), Some(relations)) => {
                    Ok(ChartModel::Chord(chord_matrix(records, entity, relations)))
                }
                (entity, relations) => Err(unset(&[("entity", entity), ("relations", relations)])),
            }
        }
        ChartKind::Force => {
            let slots = &selections.force;
            match (slots.entity.as_deref(), slots.relations.as_deref()) {
                (Some(entity), Some(relations)) => Ok(ChartModel::Force(force_graph(
                    records,
                    entity,
                    relations,
                    slots.group.as_deref(),
                ))),
                (entity, relations) => Err(unset(&[("entity", entity), ("relations", relations)])),
            }
        }
        ChartKind::Sunburst => {
            let slots = &selections.sunburst;
            match (
                slots.entity.as_deref(),
                slots.group.as_deref(),
                slots.relations.as_deref(),
            ) {
                (Some(entity), Some(group), Some(relations)) => Ok(ChartModel::Sunburst(
                    sunburst_tree(records, entity, group, relations),
                )),
                (entity, group, relations) => Err(unset(&[
                    ("entity", entity),
                    ("group", group),
                    ("relations", relations),
                ])),
            }
        }
    };

    match built {
        Ok(model) => ChartInput::Ready { model },
        Err(missing) => {
            debug!(chart = kind.as_str(), ?missing, "chart is missing fields");
            ChartInput::MissingFields { chart: kind, missing }
        }
    }
}

fn unset(slots: &[(&'static str, Option<&str>)]) -> Vec<&'static str> {
    slots
        .iter()
        .filter(|(_, field)| field.is_none())
        .map(|(slot, _)| *slot)
        .collect()
}

/// Everything one renderer needs for one pass.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub kind: ChartKind,
    pub records: &'a [Record],
    pub selections: &'a FieldSelections,
    pub selected: &'a SelectionState,
    pub colors: &'a ColorMap,
    /// Highlight of every colored entity.
    pub highlights: IndexMap<String, Highlight>,
    pub input: ChartInput,
}

impl<'a> RenderFrame<'a> {
    /// Build the frame for one chart.
    pub fn new(
        kind: ChartKind,
        records: &'a [Record],
        selections: &'a FieldSelections,
        selected: &'a SelectionState,
        colors: &'a ColorMap,
    ) -> Self {
        let highlights = colors
            .iter()
            .map(|(name, _)| (name.to_string(), selected.highlight(name)))
            .collect();
        Self {
            kind,
            records,
            selections,
            selected,
            colors,
            highlights,
            input: chart_input(kind, records, selections),
        }
    }

    /// Highlight of an entity; names outside the color map are computed on demand.
    pub fn highlight(&self, name: &str) -> Highlight {
        self.highlights
            .get(name)
            .copied()
            .unwrap_or_else(|| self.selected.highlight(name))
    }

    pub fn link_highlight(&self, source: &str, target: &str) -> LinkHighlight {
        self.selected.link_highlight(source, target)
    }

    pub fn color(&self, name: &str) -> &str {
        self.colors.color_for(name)
    }
}

/// A chart view that draws frames.
pub trait ChartRenderer {
    /// The chart this renderer draws.
    fn kind(&self) -> ChartKind;

    /// Draw one frame. Called once per render pass.
    fn render(&mut self, frame: &RenderFrame<'_>);
}

/// Registered renderers, invoked in registration order.
#[derive(Default)]
pub struct RenderDispatch {
    renderers: Vec<Box<dyn ChartRenderer>>,
}

impl RenderDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer.
    pub fn register(&mut self, renderer: Box<dyn ChartRenderer>) {
        self.renderers.push(renderer);
    }

    /// Builder form of [`RenderDispatch::register`].
    pub fn with(mut self, renderer: Box<dyn ChartRenderer>) -> Self {
        self.register(renderer);
        self
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Run one pass: each renderer gets the frame built for its chart.
    pub fn dispatch<'a, F>(&mut self, mut frame_for: F)
    where
        F: FnMut(ChartKind) -> RenderFrame<'a>,
    {
        for renderer in &mut self.renderers {
            let frame = frame_for(renderer.kind());
            renderer.render(&frame);
        }
        debug!(renderers = self.renderers.len(), "render pass complete");
    }
}

impl std::fmt::Debug for RenderDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<ChartKind> = self.renderers.iter().map(|r| r.kind()).collect();
        f.debug_struct("RenderDispatch").field("renderers", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::build_color_map;
    use crate::inference::classify;
    use crate::recommend::recommend;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn data() -> Vec<Record> {
        vec![
            json!({"Artist": "A", "Region": "Asia", "Follows": 5, "Tags": ["B", "C"]}),
            json!({"Artist": "D", "Region": "Europe", "Follows": 9, "Tags": ["A"]}),
        ]
        .into_iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect()
    }

    struct Recorder {
        kind: ChartKind,
        log: Rc<RefCell<Vec<(ChartKind, bool, Highlight)>>>,
    }

    impl ChartRenderer for Recorder {
        fn kind(&self) -> ChartKind {
            self.kind
        }

        fn render(&mut self, frame: &RenderFrame<'_>) {
            self.log
                .borrow_mut()
                .push((frame.kind, frame.input.is_ready(), frame.highlight("A")));
        }
    }

    #[test]
    fn test_all_charts_ready_with_recommendations() {
        let data = data();
        let selections = recommend(&classify(&data).unwrap());
        for kind in ChartKind::ALL {
            assert!(chart_input(kind, &data, &selections).is_ready(), "{} not ready", kind);
        }
    }

    #[test]
    fn test_missing_fields_placeholder() {
        let input = chart_input(ChartKind::RadialBar, &data(), &FieldSelections::default());
        assert_eq!(
            input.placeholder().as_deref(),
            Some("please select category and value fields")
        );

        let input = chart_input(ChartKind::Sunburst, &data(), &FieldSelections::default());
        assert_eq!(
            input.placeholder().as_deref(),
            Some("please select entity, group and relations fields")
        );
    }

    #[test]
    fn test_force_group_is_optional() {
        let mut selections = FieldSelections::default();
        selections.force.entity = Some("Artist".to_string());
        selections.force.relations = Some("Tags".to_string());
        assert!(chart_input(ChartKind::Force, &data(), &selections).is_ready());
    }

    #[test]
    fn test_dispatch_invokes_each_renderer_once() {
        let data = data();
        let selections = recommend(&classify(&data).unwrap());
        let colors = build_color_map(&data, &selections);
        let mut selected = SelectionState::new();
        selected.click("D", false);

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatch = RenderDispatch::new();
        for kind in ChartKind::ALL {
            dispatch.register(Box::new(Recorder { kind, log: Rc::clone(&log) }));
        }

        dispatch.dispatch(|kind| RenderFrame::new(kind, &data, &selections, &selected, &colors));

        let log = log.borrow();
        assert_eq!(log.len(), 4);
        assert!(log.iter().all(|(_, ready, h)| *ready && *h == Highlight::Dimmed));
        assert_eq!(log[2].0, ChartKind::Force);
    }

    #[test]
    fn test_frame_highlights_cover_colors() {
        let data = data();
        let selections = recommend(&classify(&data).unwrap());
        let colors = build_color_map(&data, &selections);
        let selected = SelectionState::new();

        let frame = RenderFrame::new(ChartKind::Chord, &data, &selections, &selected, &colors);
        assert_eq!(frame.highlights.len(), colors.len());
        assert_eq!(frame.highlight("A"), Highlight::Neutral);
        assert_eq!(frame.color("A"), "#1f77b4");
    }
}
