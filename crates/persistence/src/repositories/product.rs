//! Product repository for database operations.

use domain::models::{ListProductsQuery, Product};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ProductEntity, RatingEntity};

/// Repository for product catalog database operations.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new product, optionally with an initial rating.
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        price: Decimal,
        category: &str,
        image: &str,
        initial_rating: Option<f32>,
    ) -> Result<Product, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, ProductEntity>(
            r#"
            INSERT INTO products (title, description, price, category, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, price, category, image, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image)
        .fetch_one(&mut *tx)
        .await?;

        let ratings = if let Some(rate) = initial_rating {
            let rating = sqlx::query_as::<_, RatingEntity>(
                r#"
                INSERT INTO product_ratings (product_id, rate)
                VALUES ($1, $2)
                RETURNING id, product_id, rate, created_at
                "#,
            )
            .bind(entity.id)
            .bind(rate)
            .fetch_one(&mut *tx)
            .await?;
            vec![rating]
        } else {
            Vec::new()
        };

        tx.commit().await?;

        Ok(entity.into_model(ratings))
    }

    /// Find a product by ID, with its ratings.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            r#"
            SELECT id, title, description, price, category, image, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(entity) = entity else {
            return Ok(None);
        };

        let ratings = self.ratings_for(entity.id).await?;
        Ok(Some(entity.into_model(ratings)))
    }

    /// List products with optional category filter and pagination.
    ///
    /// Returns `(products, total)` where total ignores pagination.
    pub async fn list(&self, query: &ListProductsQuery) -> Result<(Vec<Product>, i64), sqlx::Error> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(50).clamp(1, 100);
        let offset = (page - 1) * per_page;

        let entities = sqlx::query_as::<_, ProductEntity>(
            r#"
            SELECT id, title, description, price, category, image, created_at, updated_at
            FROM products
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.category.as_deref())
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM products
            WHERE ($1::text IS NULL OR category = $1)
            "#,
        )
        .bind(query.category.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let mut products = Vec::with_capacity(entities.len());
        for entity in entities {
            let ratings = self.ratings_for(entity.id).await?;
            products.push(entity.into_model(ratings));
        }

        Ok((products, total))
    }

    /// Distinct categories currently in the catalog.
    pub async fn list_categories(&self) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT category FROM products ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Update a product. `None` fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        category: Option<&str>,
        image: Option<&str>,
    ) -> Result<Option<Product>, sqlx::Error> {
        let entity = sqlx::query_as::<_, ProductEntity>(
            r#"
            UPDATE products
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                image = COALESCE($6, image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, price, category, image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image)
        .fetch_optional(&self.pool)
        .await?;

        let Some(entity) = entity else {
            return Ok(None);
        };

        let ratings = self.ratings_for(entity.id).await?;
        Ok(Some(entity.into_model(ratings)))
    }

    /// Delete a product and its ratings. Returns whether a row existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM products WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ratings_for(&self, product_id: Uuid) -> Result<Vec<RatingEntity>, sqlx::Error> {
        sqlx::query_as::<_, RatingEntity>(
            r#"
            SELECT id, product_id, rate, created_at
            FROM product_ratings
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
    }
}
