use sqlx::{QueryBuilder, Sqlite};
use tracing::debug;

use super::Database;
use crate::catalog::{Song, SongPatch, SongWithBand};
use crate::metrics::timer_db;

impl Database {
    /// Every song joined with its band.
    ///
    /// Inner join: songs whose `band_id` matches no band are left out.
    pub async fn list_songs_with_band(&self) -> Result<Vec<SongWithBand>, sqlx::Error> {
        let _timer = timer_db("list_songs_with_band");
        sqlx::query_as::<_, SongWithBand>(
            r#"
            SELECT
                songs.id AS id,
                songs.name AS name,
                bands.id AS bandId,
                bands.name AS bandName
            FROM songs
            INNER JOIN bands ON songs.band_id = bands.id
            ORDER BY songs.rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Look up a song by id.
    pub async fn find_song(&self, id: &str) -> Result<Option<Song>, sqlx::Error> {
        let _timer = timer_db("find_song");
        sqlx::query_as::<_, Song>("SELECT id, name, band_id FROM songs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert a song. `band_id` is stored as given.
    pub async fn insert_song(&self, song: &Song) -> Result<(), sqlx::Error> {
        let _timer = timer_db("insert_song");
        sqlx::query("INSERT INTO songs (id, name, band_id) VALUES (?, ?, ?)")
            .bind(&song.id)
            .bind(&song.name)
            .bind(&song.band_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Merge `patch` onto the song stored under `id_to_edit`.
    ///
    /// Returns the stored record, or `None` when no song has that id.
    pub async fn update_song(
        &self,
        id_to_edit: &str,
        patch: &SongPatch,
    ) -> Result<Option<Song>, sqlx::Error> {
        let _timer = timer_db("update_song");
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Song>("SELECT id, name, band_id FROM songs WHERE id = ?")
                .bind(id_to_edit)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let merged = patch.apply(existing);

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE songs SET id = ");
        query
            .push_bind(merged.id.clone())
            .push(", name = ")
            .push_bind(merged.name.clone())
            .push(", band_id = ")
            .push_bind(merged.band_id.clone())
            .push(" WHERE id = ")
            .push_bind(id_to_edit.to_string());
        query.build().execute(&mut *tx).await?;

        tx.commit().await?;
        debug!(id_to_edit, new_id = %merged.id, "song updated");
        Ok(Some(merged))
    }
}
