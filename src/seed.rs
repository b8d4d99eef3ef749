use anyhow::Result;

use crate::model::{Image, Synset};
use crate::store::traits::{HyponymStore, ImageStore, Store, StoreError, SynsetStore};

fn synset(wnid: &str, words: &str, gloss: &str) -> Synset {
    Synset {
        wnid: wnid.to_string(),
        words: words.to_string(),
        gloss: gloss.to_string(),
    }
}

/// Load a small WordNet fragment for demonstration. Reloading is harmless:
/// rows that already exist are skipped.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    let synsets = [
        synset(
            "n00001740",
            "entity",
            "that which is perceived or known or inferred to have its own distinct existence (living or nonliving)",
        ),
        synset(
            "n00001930",
            "physical entity",
            "an entity that has physical existence",
        ),
        synset(
            "n00002137",
            "abstraction, abstract entity",
            "a general concept formed by extracting common features from specific examples",
        ),
        synset(
            "n00002684",
            "object, physical object",
            "a tangible and visible entity; an entity that can cast a shadow",
        ),
        synset(
            "n00003553",
            "whole, unit",
            "an assemblage of parts that is regarded as a single entity",
        ),
    ];

    for entry in synsets {
        let wnid = entry.wnid.clone();
        match store.insert_synset(entry).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => {
                log::info!("seed synset '{}' already present", wnid);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let edges = [
        ("n00001740", "n00001930"),
        ("n00001740", "n00002137"),
        ("n00001930", "n00002684"),
        ("n00002684", "n00003553"),
    ];

    for (wnid, hyponym_wnid) in edges {
        match store.add_hyponym(wnid, hyponym_wnid).await {
            Ok(()) | Err(StoreError::Duplicate { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let images = [
        (
            "n00002684",
            Image {
                imid: "n00002684_18102".to_string(),
                url: "http://farm1.static.flickr.com/45/139488995_bd06578562.jpg".to_string(),
                date: Some("2006-05-05".to_string()),
            },
        ),
        (
            "n00002684",
            Image {
                imid: "n00002684_20952".to_string(),
                url: "http://farm4.static.flickr.com/3657/3532931699_bcbbd2ea85.jpg".to_string(),
                date: None,
            },
        ),
    ];

    for (wnid, image) in images {
        match store.insert_image(wnid, image).await {
            Ok(()) | Err(StoreError::Duplicate { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn seed_is_idempotent() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();
        load_seed_data(&store).await.unwrap();

        let roots = store.list_synsets(0, 100).await.unwrap();
        assert_eq!(roots.len(), 5);

        let hyponyms = store.hyponyms_from("n00001740", 0).await.unwrap();
        assert_eq!(hyponyms.len(), 2);
    }
}
