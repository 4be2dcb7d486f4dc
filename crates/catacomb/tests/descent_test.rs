//! # Descent Integration Test
//!
//! Full runs over the sample catalog and configuration.

use catacomb::graph::{GraphConfig, TemplateCatalog};
use catacomb::{ExplorationRun, RunError};

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/catalog/chambers.toml");
const CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/config/graph.toml");

#[test]
fn test_sample_descent() {
    let mut run = ExplorationRun::from_files(CATALOG, CONFIG).unwrap();
    let summary = run.run(300).unwrap();

    assert_eq!(summary.seed, 1337);
    assert_eq!(summary.ticks, 300);
    assert!(summary.rooms_explored > 1);
    assert_eq!(summary.chambers as u64, summary.generated + 1);
    assert_eq!(run.graph().path_score_of(summary.occupied), Some(0));
    run.graph().registry().verify_links().unwrap();
}

#[test]
fn test_descent_is_reproducible() {
    let a = ExplorationRun::from_files(CATALOG, CONFIG).unwrap().run(150).unwrap();
    let b = ExplorationRun::from_files(CATALOG, CONFIG).unwrap().run(150).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn test_every_tick_moves_on_sample_catalog() {
    let catalog = TemplateCatalog::from_toml_file(CATALOG).unwrap();
    let mut run = ExplorationRun::new(catalog, &GraphConfig::with_seed(77)).unwrap();
    for _ in 0..100 {
        let outcome = run.tick().unwrap();
        assert_eq!(run.graph().occupied(), outcome.chamber);
    }
}

#[test]
fn test_missing_catalog_file() {
    let result = ExplorationRun::from_files("does/not/exist.toml", CONFIG);
    assert!(matches!(result, Err(RunError::Graph(_))));
}

#[test]
fn test_unknown_start_blueprint() {
    let catalog = TemplateCatalog::from_toml_file(CATALOG).unwrap();
    let config = GraphConfig::with_seed(1).with_start("throne-room");
    assert!(matches!(
        ExplorationRun::new(catalog, &config),
        Err(RunError::Graph(_))
    ));
}
