use anyhow::{Context, Result};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::model::{Image, Synset};
use crate::store::traits::{
    HyponymStore, ImageStore, Store, StoreError, StoreResult, SynsetStore,
};

/// PostgreSQL-backed store. Referential cleanup (cascade delete of images
/// and incident hyponym edges, key renames) is delegated to the schema's
/// `ON DELETE CASCADE ON UPDATE CASCADE` foreign keys, so every mutation is
/// a single atomic statement.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn synset_from_row(row: &PgRow) -> Synset {
    Synset {
        wnid: row.get("wnid"),
        words: row.get("words"),
        gloss: row.get("gloss"),
    }
}

fn image_from_row(row: &PgRow) -> Image {
    Image {
        imid: row.get("imid"),
        url: row.get("url"),
        date: row.get("date"),
    }
}

fn backend(e: sqlx::Error, action: &'static str) -> StoreError {
    StoreError::Backend(anyhow::Error::new(e).context(action))
}

/// Map a unique-constraint violation to `Duplicate`; anything else is a
/// backend failure.
fn write_error(e: sqlx::Error, key: &str, action: &'static str) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::Duplicate {
                key: key.to_string(),
            };
        }
    }
    backend(e, action)
}

#[async_trait::async_trait]
impl SynsetStore for PostgresStore {
    async fn get_synset(&self, wnid: &str) -> StoreResult<Option<Synset>> {
        let row = sqlx::query("SELECT wnid, words, gloss FROM synsets WHERE wnid = $1")
            .bind(wnid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend(e, "Failed to fetch synset"))?;

        Ok(row.as_ref().map(synset_from_row))
    }

    async fn list_synsets(&self, start: usize, limit: usize) -> StoreResult<Vec<Synset>> {
        let rows = sqlx::query(
            "SELECT wnid, words, gloss FROM synsets ORDER BY wnid OFFSET $1 LIMIT $2",
        )
        .bind(start as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| backend(e, "Failed to list synsets"))?;

        Ok(rows.iter().map(synset_from_row).collect())
    }

    async fn insert_synset(&self, synset: Synset) -> StoreResult<()> {
        sqlx::query("INSERT INTO synsets (wnid, words, gloss) VALUES ($1, $2, $3)")
            .bind(&synset.wnid)
            .bind(&synset.words)
            .bind(&synset.gloss)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, &synset.wnid, "Failed to insert synset"))?;

        Ok(())
    }

    async fn replace_synset(&self, wnid: &str, synset: Synset) -> StoreResult<bool> {
        let result =
            sqlx::query("UPDATE synsets SET wnid = $1, words = $2, gloss = $3 WHERE wnid = $4")
                .bind(&synset.wnid)
                .bind(&synset.words)
                .bind(&synset.gloss)
                .bind(wnid)
                .execute(&self.pool)
                .await
                .map_err(|e| write_error(e, &synset.wnid, "Failed to replace synset"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_synset(&self, wnid: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM synsets WHERE wnid = $1")
            .bind(wnid)
            .execute(&self.pool)
            .await
            .map_err(|e| backend(e, "Failed to delete synset"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl HyponymStore for PostgresStore {
    async fn hyponyms_from(&self, wnid: &str, start: usize) -> StoreResult<Vec<Synset>> {
        let rows = sqlx::query(
            "SELECT s.wnid, s.words, s.gloss
             FROM hyponyms h
             JOIN synsets s ON s.wnid = h.hyponym_wnid
             WHERE h.synset_wnid = $1
             ORDER BY h.position
             OFFSET $2",
        )
        .bind(wnid)
        .bind(start as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| backend(e, "Failed to list hyponyms"))?;

        Ok(rows.iter().map(synset_from_row).collect())
    }

    async fn get_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<Option<Synset>> {
        let row = sqlx::query(
            "SELECT s.wnid, s.words, s.gloss
             FROM hyponyms h
             JOIN synsets s ON s.wnid = h.hyponym_wnid
             WHERE h.synset_wnid = $1 AND h.hyponym_wnid = $2",
        )
        .bind(wnid)
        .bind(hyponym_wnid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| backend(e, "Failed to fetch hyponym"))?;

        Ok(row.as_ref().map(synset_from_row))
    }

    async fn add_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<()> {
        sqlx::query("INSERT INTO hyponyms (synset_wnid, hyponym_wnid) VALUES ($1, $2)")
            .bind(wnid)
            .bind(hyponym_wnid)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    &format!("{}->{}", wnid, hyponym_wnid),
                    "Failed to insert hyponym edge",
                )
            })?;

        Ok(())
    }

    async fn remove_hyponym(&self, wnid: &str, hyponym_wnid: &str) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM hyponyms WHERE synset_wnid = $1 AND hyponym_wnid = $2")
                .bind(wnid)
                .bind(hyponym_wnid)
                .execute(&self.pool)
                .await
                .map_err(|e| backend(e, "Failed to delete hyponym edge"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ImageStore for PostgresStore {
    async fn get_image(&self, wnid: &str, imid: &str) -> StoreResult<Option<Image>> {
        let row = sqlx::query(
            "SELECT imid, url, date FROM images WHERE synset_wnid = $1 AND imid = $2",
        )
        .bind(wnid)
        .bind(imid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| backend(e, "Failed to fetch image"))?;

        Ok(row.as_ref().map(image_from_row))
    }

    async fn list_images(
        &self,
        wnid: &str,
        start: usize,
        limit: usize,
    ) -> StoreResult<Vec<Image>> {
        let rows = sqlx::query(
            "SELECT imid, url, date FROM images
             WHERE synset_wnid = $1
             ORDER BY imid
             OFFSET $2 LIMIT $3",
        )
        .bind(wnid)
        .bind(start as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| backend(e, "Failed to list images"))?;

        Ok(rows.iter().map(image_from_row).collect())
    }

    async fn insert_image(&self, wnid: &str, image: Image) -> StoreResult<()> {
        sqlx::query("INSERT INTO images (imid, synset_wnid, url, date) VALUES ($1, $2, $3, $4)")
            .bind(&image.imid)
            .bind(wnid)
            .bind(&image.url)
            .bind(&image.date)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, &image.imid, "Failed to insert image"))?;

        Ok(())
    }

    async fn replace_image(&self, wnid: &str, imid: &str, image: Image) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE images SET imid = $1, url = $2, date = $3
             WHERE synset_wnid = $4 AND imid = $5",
        )
        .bind(&image.imid)
        .bind(&image.url)
        .bind(&image.date)
        .bind(wnid)
        .bind(imid)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &image.imid, "Failed to replace image"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_image(&self, wnid: &str, imid: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM images WHERE synset_wnid = $1 AND imid = $2")
            .bind(wnid)
            .bind(imid)
            .execute(&self.pool)
            .await
            .map_err(|e| backend(e, "Failed to delete image"))?;

        Ok(result.rows_affected() > 0)
    }
}

impl Store for PostgresStore {}
