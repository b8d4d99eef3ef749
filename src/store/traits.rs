use crate::model::{Image, Synset};

/// Storage failure, with a distinguishable uniqueness-violation outcome so
/// handlers can answer `409 Conflict` instead of `500`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique key '{key}' already exists")]
    Duplicate { key: String },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait::async_trait]
pub trait SynsetStore: Send + Sync {
    async fn get_synset(&self, wnid: &str) -> StoreResult<Option<Synset>>;
    /// Synsets ordered by wnid, `limit` rows from offset `start`.
    async fn list_synsets(&self, start: usize, limit: usize) -> StoreResult<Vec<Synset>>;
    async fn insert_synset(&self, synset: Synset) -> StoreResult<()>;
    /// Full replacement, including a possible wnid rename. Returns false if
    /// no synset with the old wnid exists.
    async fn replace_synset(&self, wnid: &str, synset: Synset) -> StoreResult<bool>;
    /// Deletes the synset, its images, and every incident hyponym edge.
    async fn delete_synset(&self, wnid: &str) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait HyponymStore: Send + Sync {
    /// The remaining slice of the synset's ordered hyponym collection,
    /// starting at offset `start`. Callers derive pagination state from the
    /// slice length.
    async fn hyponyms_from(&self, wnid: &str, start: usize) -> StoreResult<Vec<Synset>>;
    /// Edge membership is decided by wnid value, never by row identity.
    /// Returns the target synset when the edge exists.
    async fn get_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<Option<Synset>>;
    async fn add_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<()>;
    async fn remove_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<bool>;
}

#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    async fn get_image(&self, wnid: &str, imid: &str) -> StoreResult<Option<Image>>;
    /// Images of one synset ordered by imid, `limit` rows from offset `start`.
    async fn list_images(&self, wnid: &str, start: usize, limit: usize)
        -> StoreResult<Vec<Image>>;
    async fn insert_image(&self, wnid: &str, image: Image) -> StoreResult<()>;
    async fn replace_image(&self, wnid: &str, imid: &str, image: Image) -> StoreResult<bool>;
    async fn delete_image(&self, wnid: &str, imid: &str) -> StoreResult<bool>;
}

pub trait Store: SynsetStore + HyponymStore + ImageStore + Send + Sync {}
