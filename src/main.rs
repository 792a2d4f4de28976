use anyhow::Context;
use cellsizer::config::ConfigManager;
use cellsizer::{
    CommandEvaluator, EvolutionEngine, GeneticCandidateGenerator, JsonFilePersister,
    LogProgressCallback, ParameterSet,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cellsizer.toml".to_string());

    let manager = ConfigManager::new();
    manager
        .load_from_file(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;
    let config = manager.get()?;

    let reference = ParameterSet::from_json_file(&config.io.reference_path).with_context(|| {
        format!(
            "reading reference parameter set {}",
            config.io.reference_path.display()
        )
    })?;
    log::info!(
        "Sizing {} devices of '{}' with {} individuals for {} generations",
        reference.num_devices(),
        reference.name(),
        config.genetic.num_individuals,
        config.search.max_iterations
    );

    let netlist_dir = config.io.output_dir.join("netlists");
    let persister = JsonFilePersister::new(&netlist_dir)?;
    let evaluator = CommandEvaluator::new(
        config.io.evaluator_command.clone(),
        config.io.evaluator_args.clone(),
        config.io.working_dir.clone().unwrap_or(netlist_dir),
    );

    let generator = GeneticCandidateGenerator::new(config.genetic, &config.search_space, reference)?
        .with_persister(persister);
    let mut engine = EvolutionEngine::from_config(generator, evaluator, &config.search);
    let outcome = engine.run(LogProgressCallback::new(config.search.max_iterations))?;

    let (best, best_cost) = outcome
        .best
        .context("search finished without evaluating a generation")?;
    log::info!("Best candidate '{}' with cost {}", best.name(), best_cost);

    let history_path = config.io.output_dir.join("history.json");
    let history = serde_json::json!({
        "min_cost_per_iteration": outcome.min_cost_per_iteration,
        "best_cost": best_cost,
        "best": best,
    });
    std::fs::write(&history_path, serde_json::to_string_pretty(&history)?)?;
    log::info!("Wrote cost history to {}", history_path.display());

    Ok(())
}
