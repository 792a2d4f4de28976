use super::evolution_engine::ProgressCallback;

/// Reports generations through the `log` facade
pub struct LogProgressCallback {
    total: usize,
}

impl LogProgressCallback {
    pub fn new(total: usize) -> Self {
        Self { total }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Generation {}/{} starting...", generation + 1, self.total);
    }

    fn on_generation_complete(&mut self, generation: usize, min_cost: f64) {
        log::info!(
            "Generation {}/{} complete. Minimum cost: {:.6}",
            generation + 1,
            self.total,
            min_cost
        );
    }
}
