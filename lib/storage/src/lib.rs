pub mod loader;
pub mod manager;
pub mod vocabulary;

pub use loader::{load_catalog, read_records};
pub use manager::{LoadedCatalog, StorageManager};
pub use vocabulary::VocabularyArtifact;
