//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{GalleryId, UserId};
use sqlx::PgPool;

use crate::domain::entity::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};

/// PostgreSQL-backed gallery repository
#[derive(Clone)]
pub struct PgGalleryRepository {
    pool: PgPool,
}

impl PgGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// `galleries.user_id` must reference an existing user.
fn map_write_error(err: sqlx::Error) -> GalleryError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return GalleryError::OwnerRequired;
        }
    }
    GalleryError::Database(err)
}

impl GalleryRepository for PgGalleryRepository {
    async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO galleries (user_id, title, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(gallery.owner_id.get())
        .bind(&gallery.title)
        .bind(gallery.created_at)
        .bind(gallery.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        gallery.id = GalleryId::from_raw(id);
        Ok(())
    }

    async fn find_by_id(&self, id: GalleryId) -> GalleryResult<Option<Gallery>> {
        let row = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM galleries
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GalleryRow::into_gallery))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> GalleryResult<Vec<Gallery>> {
        let rows = sqlx::query_as::<_, GalleryRow>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM galleries
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GalleryRow::into_gallery).collect())
    }

    async fn update(&self, gallery: &Gallery) -> GalleryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE galleries SET
                user_id = $2,
                title = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(gallery.id.get())
        .bind(gallery.owner_id.get())
        .bind(&gallery.title)
        .bind(gallery.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::GalleryNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct GalleryRow {
    id: i64,
    user_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GalleryRow {
    fn into_gallery(self) -> Gallery {
        Gallery {
            id: GalleryId::from_raw(self.id),
            owner_id: UserId::from_raw(self.user_id),
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
