pub mod persister;

pub use persister::{JsonFilePersister, Persister};
