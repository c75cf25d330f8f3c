// Precomputed TF-IDF vocabulary artifact (JSON)
use atomicwrites::{AllowOverwrite, AtomicFile};
use carfit_core::{Error, Result, VectorizerConfig, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// On-disk form of a fitted vocabulary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VocabularyArtifact {
    #[serde(default)]
    pub config: VectorizerConfig,
    pub vocabulary: BTreeMap<String, u32>,
    pub idf: Vec<f32>,
}

impl VocabularyArtifact {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        Self {
            config: vocabulary.config().clone(),
            vocabulary: vocabulary.terms(),
            idf: vocabulary.idf().to_vec(),
        }
    }

    pub fn into_vocabulary(self) -> Result<Vocabulary> {
        Vocabulary::from_parts(self.vocabulary, self.idf, self.config)
    }

    /// Read an artifact; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(path)?;
        let artifact: Self = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Vocabulary(format!("{:?}: {}", path, e)))?;
        Ok(Some(artifact))
    }

    /// Write atomically so a crashed save never leaves a torn artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(self)?;
        AtomicFile::new(path, AllowOverwrite)
            .write(|f| f.write_all(&json))
            .map_err(|e| Error::Vocabulary(format!("failed to write {:?}: {}", path, e)))?;
        Ok(())
    }
}
