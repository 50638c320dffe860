use criterion::{black_box, criterion_group, criterion_main, Criterion};
use starboard_styles::{BreakpointConfig, RuleDefaults, RuleSet, ScreenRegistry, StyleDeriver};
use std::sync::Arc;

fn derive_stats_grid(c: &mut Criterion) {
    let deriver = StyleDeriver::new(
        Arc::new(ScreenRegistry::tailwind()),
        RuleSet::stats(&RuleDefaults::default()),
    );
    let config: BreakpointConfig = serde_json::from_str(
        r#"{
            "Default": {"active": true, "settings": {"perRow": 1}},
            "md": {"active": true, "settings": {"perRow": 2}},
            "lg": {"active": true, "settings": {"perRow": 4}},
            "xl": {"active": false, "settings": {"perRow": 6}}
        }"#,
    )
    .unwrap();

    c.bench_function("derive_stats_grid", |b| b.iter(|| deriver.derive(black_box(&config))));
}

fn derive_stats_item(c: &mut Criterion) {
    let deriver = StyleDeriver::new(
        Arc::new(ScreenRegistry::tailwind()),
        RuleSet::stats_item(&RuleDefaults::default()),
    );
    let config: BreakpointConfig = serde_json::from_str(
        r#"{
            "Default": {"active": true, "settings": {"columns": 12}},
            "sm": {"active": true, "settings": {"columns": 6, "offset": false}},
            "lg": {"active": true, "settings": {"columns": 4, "offset": 1}}
        }"#,
    )
    .unwrap();

    c.bench_function("derive_stats_item", |b| b.iter(|| deriver.derive(black_box(&config))));
}

criterion_group!(benches, derive_stats_grid, derive_stats_item);
criterion_main!(benches);
