use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::Database;
use crate::catalog::{Band, BandPatch};
use crate::metrics::timer_db;

impl Database {
    /// All bands in insertion order.
    pub async fn list_bands(&self) -> Result<Vec<Band>, sqlx::Error> {
        let _timer = timer_db("list_bands");
        sqlx::query_as::<_, Band>("SELECT id, name FROM bands ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
    }

    /// Look up a band by id.
    pub async fn find_band(&self, id: &str) -> Result<Option<Band>, sqlx::Error> {
        let _timer = timer_db("find_band");
        sqlx::query_as::<_, Band>("SELECT id, name FROM bands WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a band. A duplicate id fails with the driver's constraint error.
    pub async fn insert_band(&self, band: &Band) -> Result<(), sqlx::Error> {
        let _timer = timer_db("insert_band");
        sqlx::query("INSERT INTO bands (id, name) VALUES (?, ?)")
            .bind(&band.id)
            .bind(&band.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Merge `patch` onto the band stored under `id_to_edit`.
    ///
    /// Lookup and update share one transaction. Returns the stored record, or
    /// `None` when no band has that id.
    pub async fn update_band(
        &self,
        id_to_edit: &str,
        patch: &BandPatch,
    ) -> Result<Option<Band>, sqlx::Error> {
        let _timer = timer_db("update_band");
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Band>("SELECT id, name FROM bands WHERE id = ?")
            .bind(id_to_edit)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let merged = patch.apply(existing);

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE bands SET id = ");
        query
            .push_bind(merged.id.clone())
            .push(", name = ")
            .push_bind(merged.name.clone())
            .push(" WHERE id = ")
            .push_bind(id_to_edit.to_string());
        query.build().execute(&mut *tx).await?;

        tx.commit().await?;
        debug!(id_to_edit, new_id = %merged.id, "band updated");
        Ok(Some(merged))
    }

    /// Delete a band. Its songs are left in place.
    ///
    /// Returns `false` when no band has that id.
    pub async fn delete_band(&self, id: &str) -> Result<bool, sqlx::Error> {
        let _timer = timer_db("delete_band");
        let mut tx = self.pool.begin().await?;

        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bands WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if found == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM bands WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Whether a band with this id exists.
    pub async fn band_exists(&self, id: &str) -> Result<bool, sqlx::Error> {
        let _timer = timer_db("band_exists");
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bands WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
