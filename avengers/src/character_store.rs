use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use avengers_api_types::{CharacterDocument, CharacterRecord};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Unable to read character data from {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },
    #[error("Malformed character data in {source_name}: {error}")]
    Parse {
        source_name: String,
        #[source]
        error: serde_json::Error,
    },
}

/// Somewhere the raw character document can be read from. Sources are read only.
#[async_trait]
pub(crate) trait DataSource: Debug + Send + Sync {
    /// Human readable name used in logs and errors
    fn describe(&self) -> String;

    async fn read(&self) -> std::io::Result<String>;
}

#[derive(Debug, Clone)]
pub(crate) struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub(crate) fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DataSource for JsonFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read(&self) -> std::io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// Reads and parses the whole document. One bad record fails the entire load.
pub(crate) async fn load(source: &dyn DataSource) -> Result<Vec<CharacterRecord>, DataSourceError> {
    let data = source.read().await.map_err(|error| DataSourceError::Io {
        source_name: source.describe(),
        error,
    })?;
    let document: CharacterDocument =
        serde_json::from_str(&data).map_err(|error| DataSourceError::Parse {
            source_name: source.describe(),
            error,
        })?;
    Ok(document.characters)
}

/// Immutable list of characters in load order.
#[derive(Debug, Clone, Default)]
pub(crate) struct CharacterStore {
    records: Arc<[CharacterRecord]>,
}

impl CharacterStore {
    pub(crate) fn new(records: Vec<CharacterRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub(crate) fn records(&self) -> &[CharacterRecord] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Case insensitive substring match on the character name. An empty search matches everything.
    pub(crate) fn search<'a>(
        &'a self,
        text: &str,
    ) -> impl Iterator<Item = &'a CharacterRecord> + 'a {
        let needle = fold_case(text);
        self.records()
            .iter()
            .filter(move |record| fold_case(&record.name).contains(&needle))
    }
}

/// Lowercases one char at a time so the result doesn't depend on position in the string.
/// `str::to_lowercase` turns a word-final `Σ` into `ς`, which would never match a searched `σ`.
fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}

/// Shared handle to the store. The first caller loads it, everyone after sees the same records.
///
/// A failed load leaves the cell empty so a later caller can try again.
#[derive(Debug, Clone)]
pub(crate) struct CharacterStoreHandle {
    source: Arc<dyn DataSource>,
    cell: Arc<OnceCell<CharacterStore>>,
}

impl CharacterStoreHandle {
    pub(crate) fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            cell: Arc::new(OnceCell::new()),
        }
    }

    #[instrument(skip(self), fields(source = %self.source.describe()))]
    pub(crate) async fn get(&self) -> Result<CharacterStore, DataSourceError> {
        let store = self
            .cell
            .get_or_try_init(|| async {
                let records = load(self.source.as_ref()).await?;
                info!("Loaded {} characters", records.len());
                Ok::<_, DataSourceError>(CharacterStore::new(records))
            })
            .await?;
        Ok(store.clone())
    }
}
