pub mod traits;
pub mod genetic;
pub mod search_space;
pub mod search;
pub mod io;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use genetic::GeneticConfig;
pub use search_space::SearchSpaceConfig;
pub use search::SearchConfig;
pub use io::IoConfig;
pub use traits::ConfigSection;
