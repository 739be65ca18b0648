//! Fuzz target for the dashboard filter and selection cycle.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vizlink::value::record_mentions;
use vizlink::{Dashboard, FilterPredicate, SampleDataset};

#[derive(Debug, Arbitrary)]
enum Action {
    Include { field: u8, values: Vec<String> },
    Range { field: u8, min: f64, max: f64 },
    Remove { field: u8 },
    Reset,
    Click { name: String, modifier: bool },
}

fuzz_target!(|actions: Vec<Action>| {
    let mut dashboard = Dashboard::new();
    if dashboard.load_sample(SampleDataset::MusicArtists).is_err() {
        return;
    }
    let fields: Vec<String> = dashboard
        .schema()
        .field_names()
        .into_iter()
        .map(String::from)
        .collect();
    let pick = |i: u8| fields[i as usize % fields.len()].clone();

    for action in actions.into_iter().take(64) {
        match action {
            Action::Include { field, values } => {
                let _ = dashboard.set_filter(FilterPredicate::categorical(pick(field), values));
            }
            Action::Range { field, min, max } => {
                let _ = dashboard.set_filter(FilterPredicate::range(pick(field), min, max));
            }
            Action::Remove { field } => {
                dashboard.remove_filter(&pick(field));
            }
            Action::Reset => dashboard.reset_filters(),
            Action::Click { name, modifier } => dashboard.click(&name, modifier),
        }

        let filters = dashboard.filters().clone();
        assert_eq!(
            dashboard.records(),
            vizlink::apply_filters(dashboard.canonical(), &filters).as_slice()
        );
    }

    dashboard.reset_filters();
    for selected in dashboard.selection().iter() {
        assert!(dashboard.records().iter().any(|r| record_mentions(r, selected)));
    }
});
