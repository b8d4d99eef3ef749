use std::collections::{BTreeMap, HashMap};

use anyhow::anyhow;
use parking_lot::RwLock;

use crate::model::{Image, Synset};
use crate::store::traits::{
    HyponymStore, ImageStore, Store, StoreError, StoreResult, SynsetStore,
};

/// In-memory store used by tests and local development. Synsets are kept in
/// a `BTreeMap` so range queries come out ordered by wnid; hyponym edges are
/// per-synset `Vec`s so the relation keeps insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    synsets: BTreeMap<String, Synset>,
    hyponyms: HashMap<String, Vec<String>>,
    images: HashMap<String, BTreeMap<String, Image>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryInner {
    fn imid_taken(&self, imid: &str) -> bool {
        self.images.values().any(|owned| owned.contains_key(imid))
    }
}

#[async_trait::async_trait]
impl SynsetStore for MemoryStore {
    async fn get_synset(&self, wnid: &str) -> StoreResult<Option<Synset>> {
        Ok(self.inner.read().synsets.get(wnid).cloned())
    }

    async fn list_synsets(&self, start: usize, limit: usize) -> StoreResult<Vec<Synset>> {
        Ok(self
            .inner
            .read()
            .synsets
            .values()
            .skip(start)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_synset(&self, synset: Synset) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if inner.synsets.contains_key(&synset.wnid) {
            return Err(StoreError::Duplicate {
                key: synset.wnid,
            });
        }
        inner.synsets.insert(synset.wnid.clone(), synset);
        Ok(())
    }

    async fn replace_synset(&self, wnid: &str, synset: Synset) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        if !inner.synsets.contains_key(wnid) {
            return Ok(false);
        }
        if synset.wnid != wnid && inner.synsets.contains_key(&synset.wnid) {
            return Err(StoreError::Duplicate {
                key: synset.wnid,
            });
        }

        inner.synsets.remove(wnid);
        let new_wnid = synset.wnid.clone();
        inner.synsets.insert(new_wnid.clone(), synset);

        if new_wnid != wnid {
            // Rename: references follow the key, like an FK ON UPDATE CASCADE.
            if let Some(owned) = inner.images.remove(wnid) {
                inner.images.insert(new_wnid.clone(), owned);
            }
            if let Some(edges) = inner.hyponyms.remove(wnid) {
                inner.hyponyms.insert(new_wnid.clone(), edges);
            }
            for edges in inner.hyponyms.values_mut() {
                for edge in edges.iter_mut() {
                    if edge == wnid {
                        *edge = new_wnid.clone();
                    }
                }
            }
        }

        Ok(true)
    }

    async fn delete_synset(&self, wnid: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        if inner.synsets.remove(wnid).is_none() {
            return Ok(false);
        }
        inner.images.remove(wnid);
        inner.hyponyms.remove(wnid);
        for edges in inner.hyponyms.values_mut() {
            edges.retain(|edge| edge != wnid);
        }
        Ok(true)
    }
}

#[async_trait::async_trait]
impl HyponymStore for MemoryStore {
    async fn hyponyms_from(&self, wnid: &str, start: usize) -> StoreResult<Vec<Synset>> {
        let inner = self.inner.read();
        let Some(edges) = inner.hyponyms.get(wnid) else {
            return Ok(Vec::new());
        };
        Ok(edges
            .iter()
            .skip(start)
            .filter_map(|edge| inner.synsets.get(edge).cloned())
            .collect())
    }

    async fn get_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<Option<Synset>> {
        let inner = self.inner.read();
        let is_member = inner
            .hyponyms
            .get(wnid)
            .map(|edges| edges.iter().any(|edge| edge == hyponym_wnid))
            .unwrap_or(false);
        if !is_member {
            return Ok(None);
        }
        Ok(inner.synsets.get(hyponym_wnid).cloned())
    }

    async fn add_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if !inner.synsets.contains_key(wnid) || !inner.synsets.contains_key(hyponym_wnid) {
            return Err(StoreError::Backend(anyhow!(
                "hyponym edge references a missing synset: '{}' -> '{}'",
                wnid,
                hyponym_wnid
            )));
        }
        let edges = inner.hyponyms.entry(wnid.to_string()).or_default();
        if edges.iter().any(|edge| edge == hyponym_wnid) {
            return Err(StoreError::Duplicate {
                key: format!("{}->{}", wnid, hyponym_wnid),
            });
        }
        edges.push(hyponym_wnid.to_string());
        Ok(())
    }

    async fn remove_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let Some(edges) = inner.hyponyms.get_mut(wnid) else {
            return Ok(false);
        };
        let before = edges.len();
        edges.retain(|edge| edge != hyponym_wnid);
        Ok(edges.len() < before)
    }
}

#[async_trait::async_trait]
impl ImageStore for MemoryStore {
    async fn get_image(&self, wnid: &str, imid: &str) -> StoreResult<Option<Image>> {
        Ok(self
            .inner
            .read()
            .images
            .get(wnid)
            .and_then(|owned| owned.get(imid))
            .cloned())
    }

    async fn list_images(
        &self,
        wnid: &str,
        start: usize,
        limit: usize,
    ) -> StoreResult<Vec<Image>> {
        Ok(self
            .inner
            .read()
            .images
            .get(wnid)
            .map(|owned| owned.values().skip(start).take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert_image(&self, wnid: &str, image: Image) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if !inner.synsets.contains_key(wnid) {
            return Err(StoreError::Backend(anyhow!(
                "image references a missing synset: '{}'",
                wnid
            )));
        }
        if inner.imid_taken(&image.imid) {
            return Err(StoreError::Duplicate { key: image.imid });
        }
        inner
            .images
            .entry(wnid.to_string())
            .or_default()
            .insert(image.imid.clone(), image);
        Ok(())
    }

    async fn replace_image(&self, wnid: &str, imid: &str, image: Image) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let has_image = inner
            .images
            .get(wnid)
            .map(|owned| owned.contains_key(imid))
            .unwrap_or(false);
        if !has_image {
            return Ok(false);
        }
        if image.imid != imid && inner.imid_taken(&image.imid) {
            return Err(StoreError::Duplicate { key: image.imid });
        }
        if let Some(owned) = inner.images.get_mut(wnid) {
            owned.remove(imid);
            owned.insert(image.imid.clone(), image);
        }
        Ok(true)
    }

    async fn delete_image(&self, wnid: &str, imid: &str) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        Ok(inner
            .images
            .get_mut(wnid)
            .map(|owned| owned.remove(imid).is_some())
            .unwrap_or(false))
    }
}

impl Store for MemoryStore {}

#[cfg(test)]
mod tests {
    use super::*;

    fn synset(wnid: &str, words: &str) -> Synset {
        Synset {
            wnid: wnid.to_string(),
            words: words.to_string(),
            gloss: format!("gloss of {}", words),
        }
    }

    fn image(imid: &str) -> Image {
        Image {
            imid: imid.to_string(),
            url: format!("http://images.example/{}.jpg", imid),
            date: None,
        }
    }

    #[tokio::test]
    async fn list_synsets_is_ordered_by_wnid() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n03", "c")).await.unwrap();
        store.insert_synset(synset("n01", "a")).await.unwrap();
        store.insert_synset(synset("n02", "b")).await.unwrap();

        let listed = store.list_synsets(0, 10).await.unwrap();
        let wnids: Vec<_> = listed.iter().map(|s| s.wnid.as_str()).collect();
        assert_eq!(wnids, ["n01", "n02", "n03"]);

        let offset = store.list_synsets(1, 1).await.unwrap();
        assert_eq!(offset[0].wnid, "n02");
    }

    #[tokio::test]
    async fn duplicate_wnid_is_rejected() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "a")).await.unwrap();
        let err = store.insert_synset(synset("n01", "other")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn rename_rewrites_incident_edges_and_images() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "root")).await.unwrap();
        store.insert_synset(synset("n02", "leaf")).await.unwrap();
        store.add_hyponym("n01", "n02").await.unwrap();
        store.insert_image("n02", image("n02_1")).await.unwrap();

        let renamed = synset("n09", "leaf");
        assert!(store.replace_synset("n02", renamed).await.unwrap());

        let hyponyms = store.hyponyms_from("n01", 0).await.unwrap();
        assert_eq!(hyponyms.len(), 1);
        assert_eq!(hyponyms[0].wnid, "n09");
        assert!(store.get_image("n09", "n02_1").await.unwrap().is_some());
        assert!(store.get_synset("n02").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_cascades_to_images_and_incident_edges() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "root")).await.unwrap();
        store.insert_synset(synset("n02", "leaf")).await.unwrap();
        store.add_hyponym("n01", "n02").await.unwrap();
        store.add_hyponym("n02", "n01").await.unwrap();
        store.insert_image("n02", image("n02_1")).await.unwrap();

        assert!(store.delete_synset("n02").await.unwrap());

        assert!(store.hyponyms_from("n01", 0).await.unwrap().is_empty());
        assert!(store.get_hyponym("n01", "n02").await.unwrap().is_none());
        assert!(store.get_image("n02", "n02_1").await.unwrap().is_none());
        // The deleted synset's imid is free again.
        store.insert_image("n01", image("n02_1")).await.unwrap();
    }

    #[tokio::test]
    async fn hyponym_collection_keeps_insertion_order_and_slices() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "root")).await.unwrap();
        for wnid in ["n05", "n03", "n04"] {
            store.insert_synset(synset(wnid, wnid)).await.unwrap();
            store.add_hyponym("n01", wnid).await.unwrap();
        }

        let all = store.hyponyms_from("n01", 0).await.unwrap();
        let wnids: Vec<_> = all.iter().map(|s| s.wnid.as_str()).collect();
        assert_eq!(wnids, ["n05", "n03", "n04"]);

        let rest = store.hyponyms_from("n01", 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].wnid, "n04");
    }

    #[tokio::test]
    async fn duplicate_edge_is_rejected_membership_is_by_wnid() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "root")).await.unwrap();
        store.insert_synset(synset("n02", "leaf")).await.unwrap();
        store.add_hyponym("n01", "n02").await.unwrap();

        let err = store.add_hyponym("n01", "n02").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        // A freshly fetched row is still a member.
        let fetched = store.get_hyponym("n01", "n02").await.unwrap().unwrap();
        assert_eq!(fetched.wnid, "n02");

        assert!(store.remove_hyponym("n01", "n02").await.unwrap());
        assert!(!store.remove_hyponym("n01", "n02").await.unwrap());
    }

    #[tokio::test]
    async fn imid_is_globally_unique() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "a")).await.unwrap();
        store.insert_synset(synset("n02", "b")).await.unwrap();
        store.insert_image("n01", image("img_1")).await.unwrap();

        let err = store.insert_image("n02", image("img_1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn image_lookup_is_scoped_to_the_owner() {
        let store = MemoryStore::new();
        store.insert_synset(synset("n01", "a")).await.unwrap();
        store.insert_synset(synset("n02", "b")).await.unwrap();
        store.insert_image("n01", image("img_1")).await.unwrap();

        assert!(store.get_image("n01", "img_1").await.unwrap().is_some());
        assert!(store.get_image("n02", "img_1").await.unwrap().is_none());
    }
}
