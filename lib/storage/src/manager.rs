use crate::loader::load_catalog;
use crate::vocabulary::VocabularyArtifact;
use carfit_core::{Catalog, Error, Result, TextIndex, VectorizerConfig};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything read at startup: the catalog and its text index
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub index: TextIndex,
    /// The vocabulary was fit from the catalog rather than read from disk
    pub vocabulary_fitted: bool,
}

/// Locates and loads the startup artifacts
pub struct StorageManager {
    catalog_path: PathBuf,
    vocabulary_path: Option<PathBuf>,
    vectorizer: VectorizerConfig,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(catalog_path: P) -> Self {
        Self {
            catalog_path: catalog_path.as_ref().to_path_buf(),
            vocabulary_path: None,
            vectorizer: VectorizerConfig::default(),
        }
    }

    #[must_use]
    pub fn with_vocabulary<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.vocabulary_path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn with_vectorizer(mut self, config: VectorizerConfig) -> Self {
        self.vectorizer = config;
        self
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Load the catalog and build the text index.
    ///
    /// Any failure here is fatal for the caller: a partially loaded catalog
    /// must never serve requests.
    pub fn load(&self) -> Result<LoadedCatalog> {
        let catalog = load_catalog(&self.catalog_path)?;
        let documents = catalog.documents();

        let stored = match &self.vocabulary_path {
            Some(path) => VocabularyArtifact::load(path)?,
            None => None,
        };

        let (index, vocabulary_fitted) = match stored {
            Some(artifact) => {
                let vocabulary = artifact.into_vocabulary()?;
                info!("Loaded TF-IDF vocabulary with {} terms", vocabulary.len());
                (TextIndex::build(vocabulary, &documents), false)
            }
            None => {
                warn!("TF-IDF vocabulary not found, fitting from catalog");
                let index = TextIndex::fit(&documents, self.vectorizer.clone());
                info!(
                    "Fitted TF-IDF vocabulary: {} documents x {} terms",
                    index.len(),
                    index.vocabulary().len()
                );
                (index, true)
            }
        };

        Ok(LoadedCatalog {
            catalog,
            index,
            vocabulary_fitted,
        })
    }

    /// Persist the index vocabulary to the configured artifact path
    pub fn save_vocabulary(&self, index: &TextIndex) -> Result<()> {
        let path = self
            .vocabulary_path
            .as_ref()
            .ok_or_else(|| Error::InvalidConfig("no vocabulary path configured".to_string()))?;
        VocabularyArtifact::from_vocabulary(index.vocabulary()).save(path)?;
        info!("Saved TF-IDF vocabulary to {:?}", path);
        Ok(())
    }
}
