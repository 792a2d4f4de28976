use cellsizer::config::{GeneticConfig, SearchConfig, SearchSpaceConfig};
use cellsizer::{
    CostMap, EvolutionEngine, GeneticCandidateGenerator, JsonFilePersister, LogProgressCallback,
    ParameterSet, Result, SearchState,
};

fn reference() -> ParameterSet {
    ParameterSet::new(
        "inv",
        vec!["mp".to_string(), "mn".to_string(), "mx".to_string()],
        vec![2.0, 1.0, 1.5],
        vec![1.0, 1.0, 1.0],
        vec![1, 1, 1],
    )
    .unwrap()
}

/// Distance to a fixed sweet spot, shifted so every cost is positive
fn distance_cost(population: &[ParameterSet]) -> Result<CostMap> {
    Ok(population
        .iter()
        .map(|p| {
            let distance: f64 = p
                .device_widths()
                .iter()
                .map(|w| (w - 4.2).powi(2))
                .chain(p.device_lengths().iter().map(|l| (l - 2.5).powi(2)))
                .chain(p.device_fingers().iter().map(|&f| (f64::from(f) - 2.0).powi(2)))
                .sum();
            (p.key().to_string(), 1.0 + distance)
        })
        .collect())
}

fn generator(num_individuals: usize) -> GeneticCandidateGenerator {
    let config = GeneticConfig {
        num_individuals,
        elitism: true,
        p_mutation: 0.2,
        ..Default::default()
    };
    GeneticCandidateGenerator::new(config, &SearchSpaceConfig::default(), reference()).unwrap()
}

#[test]
fn test_elitism_never_loses_the_best() {
    let search = SearchConfig {
        max_iterations: 8,
        seed: Some(17),
    };
    let mut engine = EvolutionEngine::from_config(generator(10), distance_cost, &search);
    let outcome = engine.run(LogProgressCallback::new(8)).unwrap();

    let history = &outcome.min_cost_per_iteration;
    assert_eq!(history.len(), 8);
    assert!(history.iter().all(|&c| c >= 1.0));
    for pair in history.windows(2) {
        assert!(pair[1] <= pair[0], "history regressed: {:?}", history);
    }

    let (_, best_cost) = outcome.best.unwrap();
    assert_eq!(best_cost, history[7]);
    assert_eq!(outcome.final_population.len(), 10);
    assert_eq!(engine.state(), SearchState::Done);
}

#[test]
fn test_same_seed_reproduces_search() {
    let run = |seed| {
        let mut engine = EvolutionEngine::new(generator(6), distance_cost, 5, Some(seed));
        engine.run(LogProgressCallback::new(5)).unwrap()
    };

    let first = run(42);
    let second = run(42);
    assert_eq!(first.min_cost_per_iteration, second.min_cost_per_iteration);
    assert_eq!(first.final_population, second.final_population);
    assert_eq!(first.best.unwrap().0, second.best.unwrap().0);
}

#[test]
fn test_manual_stepping_matches_history() {
    let mut engine = EvolutionEngine::new(generator(4), distance_cost, 3, Some(3));
    let mut population = engine.initial_population().unwrap();

    let mut observed = Vec::new();
    while let SearchState::Running(_) = engine.state() {
        let costs = distance_cost(&population).unwrap();
        observed.push(costs.values().cloned().fold(f64::INFINITY, f64::min));
        population = engine.step(&population).unwrap();
    }

    assert_eq!(engine.min_cost_per_iteration(), observed.as_slice());
}

#[test]
fn test_persisted_candidates_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let persister = JsonFilePersister::new(dir.path()).unwrap();
    let generator = generator(4).with_persister(persister);

    let mut engine = EvolutionEngine::new(generator, distance_cost, 2, Some(9));
    let outcome = engine.run(LogProgressCallback::new(2)).unwrap();

    for candidate in &outcome.final_population {
        let path = dir.path().join(format!("{}.json", candidate.name()));
        let stored = ParameterSet::from_json_file(&path).unwrap();
        assert_eq!(&stored, candidate);
    }
}

#[test]
fn test_evaluator_failure_stops_search() {
    let failing = |_: &[ParameterSet]| -> Result<CostMap> {
        Err(cellsizer::CellsizerError::Evaluation("simulator crashed".to_string()))
    };
    let mut engine = EvolutionEngine::new(generator(4), failing, 3, Some(1));

    let err = engine.run(LogProgressCallback::new(3)).unwrap_err();
    assert!(err.to_string().contains("simulator crashed"));
    assert_eq!(engine.state(), SearchState::Running(0));
}
