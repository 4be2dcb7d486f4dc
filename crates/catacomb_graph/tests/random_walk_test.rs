//! # Random Walk Integration Test
//!
//! Proves the graph stays consistent however long the player wanders:
//! identities stay contiguous, every link round-trips, and path scores are
//! true hop counts.

use catacomb_graph::{
    Actor, ChamberGraph, ChamberId, FixedStyle, GraphConfig, PortalRef, TemplateCatalog,
    TransitionRequest, DEFAULT_MAX_PROPAGATION_ROUNDS,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/catalog/chambers.toml");
const CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/config/graph.toml");

fn sample_graph(seed: u64) -> ChamberGraph {
    let catalog = TemplateCatalog::from_toml_file(CATALOG).unwrap();
    let mut config = GraphConfig::from_toml_file(CONFIG).unwrap();
    config.seed = seed;
    ChamberGraph::new(catalog, &config).unwrap()
}

/// Walks `steps` random portals, returning the graph and final preferred style.
fn wander(seed: u64, steps: usize) -> (ChamberGraph, FixedStyle) {
    let mut graph = sample_graph(seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0xA5A5);
    let mut player = Actor::player(0, 0, 24);
    let mut preferred = FixedStyle::Amber;

    for _ in 0..steps {
        let here = graph.occupied();
        let doors = graph.chamber(here).unwrap().portals().len();
        let door = PortalRef::new(here, rng.gen_range(0..doors));
        let outcome = graph
            .request_transition(TransitionRequest::new(door, preferred), &mut player)
            .unwrap();
        preferred = outcome.preferred_style;
        assert_eq!(graph.occupied(), outcome.chamber);
    }
    (graph, preferred)
}

fn assert_consistent(graph: &ChamberGraph) {
    // Contiguous identities from 0
    for (index, chamber) in graph.chambers().enumerate() {
        assert_eq!(chamber.id(), ChamberId::new(index as u32));
    }

    // Round-trip links
    graph.registry().verify_links().unwrap();

    // Scores are BFS distances, capped by the round bound
    assert_eq!(graph.path_score_of(graph.occupied()), Some(0));
    for chamber in graph.chambers() {
        let Some(score) = chamber.path_score() else {
            continue;
        };
        let neighbour_scores: Vec<Option<u32>> =
            chamber.neighbours().map(|n| graph.path_score_of(n)).collect();
        for neighbour in &neighbour_scores {
            match neighbour {
                Some(other) => assert!(score.abs_diff(*other) <= 1),
                None => assert!(score >= DEFAULT_MAX_PROPAGATION_ROUNDS),
            }
        }
        if score > 0 {
            assert!(neighbour_scores.contains(&Some(score - 1)));
        }
    }
}

#[test]
fn test_long_walk_stays_consistent() {
    let (graph, _) = wander(42, 400);
    assert!(graph.chambers().count() > 1);
    assert_consistent(&graph);
}

#[test]
fn test_many_seeds_stay_consistent() {
    for seed in 0..16 {
        let (graph, _) = wander(seed, 120);
        assert_consistent(&graph);
    }
}

#[test]
fn test_same_seed_same_dungeon() {
    let (a, style_a) = wander(7, 200);
    let (b, style_b) = wander(7, 200);

    let kinds = |g: &ChamberGraph| g.chambers().map(|c| c.kind().to_string()).collect::<Vec<_>>();
    assert_eq!(kinds(&a), kinds(&b));
    assert_eq!(a.occupied(), b.occupied());
    assert_eq!(style_a, style_b);
}

#[test]
fn test_propagation_idempotent_after_walk() {
    let (mut graph, _) = wander(99, 150);
    let before: Vec<Option<u32>> = graph.chambers().map(|c| c.path_score()).collect();
    graph.propagate().unwrap();
    let after: Vec<Option<u32>> = graph.chambers().map(|c| c.path_score()).collect();
    assert_eq!(before, after);
}
