//! Dashboard controller: the single owner of all cross-view state.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::color::{build_color_map_with_palette, default_palette, ColorMap};
use crate::error::{Result, VizlinkError};
use crate::filter::{apply_filters, plan_filter_widgets, FilterPredicate, FilterSet, FilterWidget};
use crate::inference::{InferenceConfig, TypeInferrer};
use crate::input::{DataLoader, LoadedData, NormalizeConfig, SampleDataset, SourceMetadata};
use crate::recommend::{recommend, FieldSelections};
use crate::render::{chart_input, ChartInput, ChartKind, RenderDispatch, RenderFrame};
use crate::schema::DatasetSchema;
use crate::selection::SelectionState;
use crate::value::Record;

/// Configuration for a dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Type inference settings.
    pub inference: InferenceConfig,
    /// Normalization settings.
    pub normalize: NormalizeConfig,
    /// Colors assigned to entities, cycled.
    pub palette: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            normalize: NormalizeConfig::default(),
            palette: default_palette(),
        }
    }
}

impl DashboardConfig {
    /// Reject settings no dashboard can run with.
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(VizlinkError::Config("palette must not be empty".to_string()));
        }
        if self.inference.sample_size == 0 {
            return Err(VizlinkError::Config("sample_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Counts describing the current dashboard state.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    pub filtered_records: usize,
    pub fields: usize,
    pub active_filters: usize,
    pub selected: usize,
    pub colored_entities: usize,
    /// Charts whose required slots are all set.
    pub ready_charts: usize,
}

/// Linked-view dashboard state.
///
/// Every mutation takes `&mut self` and runs to completion, so a filter change
/// and a selection change never interleave.
pub struct Dashboard {
    config: DashboardConfig,
    loader: DataLoader,
    inferrer: TypeInferrer,
    canonical: Vec<Record>,
    working: Vec<Record>,
    schema: DatasetSchema,
    recommendations: FieldSelections,
    selections: FieldSelections,
    filters: FilterSet,
    selection: SelectionState,
    colors: ColorMap,
    source: Option<SourceMetadata>,
}

impl Dashboard {
    /// Create an empty dashboard with default configuration.
    pub fn new() -> Self {
        Self::build(DashboardConfig::default())
    }

    /// Create an empty dashboard with custom configuration.
    pub fn with_config(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DashboardConfig) -> Self {
        let loader = DataLoader::with_config(config.normalize.clone());
        let inferrer = TypeInferrer::with_config(config.inference.clone());
        Self {
            config,
            loader,
            inferrer,
            canonical: Vec::new(),
            working: Vec::new(),
            schema: DatasetSchema::new(),
            recommendations: FieldSelections::default(),
            selections: FieldSelections::default(),
            filters: FilterSet::new(),
            selection: SelectionState::new(),
            colors: ColorMap::new(),
            source: None,
        }
    }

    // ------------------------------------------------------------------
    // Loading

    /// Load an already parsed JSON value.
    pub fn load_value(&mut self, value: &Value, name: impl Into<String>) -> Result<()> {
        let loaded = self.loader.load_value(value, name)?;
        self.install(loaded)
    }

    /// Load JSON text.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let loaded = self.loader.load_str(text)?;
        self.install(loaded)
    }

    /// Load a `.json` file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = self.loader.load_file(path)?;
        self.install(loaded)
    }

    /// Load a built-in sample dataset.
    pub fn load_sample(&mut self, sample: SampleDataset) -> Result<()> {
        let loaded = self.loader.load_value(&sample.value(), sample.name())?;
        self.install(loaded)
    }

    /// Classify, then swap in the new dataset. A failure leaves all state untouched.
    fn install(&mut self, loaded: LoadedData) -> Result<()> {
        let schema = self.inferrer.classify(&loaded.records)?;
        let recommendations = recommend(&schema);

        for field in self.selections.used_fields() {
            if schema.get(field).is_none() {
                warn!(field, "selected field not present in new dataset");
            }
        }

        self.working = loaded.records.clone();
        self.canonical = loaded.records;
        self.schema = schema;
        self.selections = recommendations.clone();
        self.recommendations = recommendations;
        self.filters.reset();
        self.selection.clear();
        self.source = Some(loaded.source);
        self.rebuild_colors();

        info!(
            records = self.canonical.len(),
            fields = self.schema.len(),
            colors = self.colors.len(),
            "dashboard ready"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Field selections and filters

    /// Replace the field selections after checking them against the schema.
    pub fn update_field_selections(&mut self, selections: FieldSelections) -> Result<()> {
        selections.validate(&self.schema)?;
        self.selections = selections;
        self.rebuild_colors();
        Ok(())
    }

    /// Add or replace the predicate on a field.
    pub fn set_filter(&mut self, predicate: FilterPredicate) -> Result<()> {
        if self.schema.get(predicate.field()).is_none() {
            return Err(VizlinkError::UnknownField(predicate.field().to_string()));
        }
        self.filters.set(predicate);
        self.refilter();
        Ok(())
    }

    /// Remove the predicate on a field, if any.
    pub fn remove_filter(&mut self, field: &str) -> Option<FilterPredicate> {
        let removed = self.filters.remove(field);
        if removed.is_some() {
            self.refilter();
        }
        removed
    }

    /// Drop every predicate.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.working = apply_filters(&self.canonical, &self.filters);
        let pruned = self.selection.prune_against_dataset(&self.working);
        self.rebuild_colors();
        debug!(
            records = self.working.len(),
            pruned,
            "working set rebuilt"
        );
    }

    fn rebuild_colors(&mut self) {
        self.colors = build_color_map_with_palette(&self.working, &self.selections, &self.config.palette);
    }

    // ------------------------------------------------------------------
    // Selection

    /// Click on an entity; `modifier` is ctrl/shift.
    pub fn click(&mut self, name: &str, modifier: bool) {
        self.selection.click(name, modifier);
    }

    /// Select both endpoints of a link.
    pub fn select_pair(&mut self, source: &str, target: &str) {
        self.selection.select_pair(source, target);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Rendering

    /// Filter controls for every used, non-relation field of the canonical data.
    pub fn filter_widgets(&self) -> Vec<FilterWidget> {
        plan_filter_widgets(&self.canonical, &self.selections, &self.schema)
    }

    /// Model or placeholder for one chart over the working set.
    pub fn chart_input(&self, kind: ChartKind) -> ChartInput {
        chart_input(kind, &self.working, &self.selections)
    }

    /// Everything one renderer needs for one chart.
    pub fn render_frame(&self, kind: ChartKind) -> RenderFrame<'_> {
        RenderFrame::new(kind, &self.working, &self.selections, &self.selection, &self.colors)
    }

    /// Run one render pass over every registered renderer.
    pub fn render(&mut self, dispatch: &mut RenderDispatch) {
        self.rebuild_colors();
        dispatch.dispatch(|kind| self.render_frame(kind));
    }

    // ------------------------------------------------------------------
    // Accessors

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The filtered working records.
    pub fn records(&self) -> &[Record] {
        &self.working
    }

    /// The canonical records as loaded.
    pub fn canonical(&self) -> &[Record] {
        &self.canonical
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Defaults computed at load time.
    pub fn recommendations(&self) -> &FieldSelections {
        &self.recommendations
    }

    pub fn selections(&self) -> &FieldSelections {
        &self.selections
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn source(&self) -> Option<&SourceMetadata> {
        self.source.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            total_records: self.canonical.len(),
            filtered_records: self.working.len(),
            fields: self.schema.len(),
            active_filters: self.filters.iter().filter(|p| p.is_active()).count(),
            selected: self.selection.len(),
            colored_entities: self.colors.len(),
            ready_charts: ChartKind::ALL
                .iter()
                .filter(|kind| self.chart_input(**kind).is_ready())
                .count(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
