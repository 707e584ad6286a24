// db/productdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::dtos::productdtos::UpdateProductDto;
use crate::models::productmodel::Product;

#[async_trait]
pub trait ProductExt {
    async fn get_products(&self) -> Result<Vec<Product>, sqlx::Error>;

    async fn get_product(&self, product_id: i64) -> Result<Option<Product>, sqlx::Error>;

    async fn add_product(
        &self,
        name: &str,
        description: Option<&str>,
        price: f64,
        image_path: Option<&str>,
        stock: i32,
    ) -> Result<Product, sqlx::Error>;

    async fn update_product(
        &self,
        product_id: i64,
        update: &UpdateProductDto,
    ) -> Result<Option<Product>, sqlx::Error>;

    async fn delete_product(&self, product_id: i64) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ProductExt for DBClient {
    async fn get_products(&self) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_path, stock, sort_order
            FROM products
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_product(&self, product_id: i64) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, image_path, stock, sort_order
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn add_product(
        &self,
        name: &str,
        description: Option<&str>,
        price: f64,
        image_path: Option<&str>,
        stock: i32,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, image_path, stock)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, image_path, stock, sort_order
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_path)
        .bind(stock)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_product(
        &self,
        product_id: i64,
        update: &UpdateProductDto,
    ) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock = COALESCE($5, stock),
                sort_order = COALESCE($6, sort_order)
            WHERE id = $1
            RETURNING id, name, description, price, image_path, stock, sort_order
            "#,
        )
        .bind(product_id)
        .bind(update.name.as_deref())
        .bind(update.description.as_deref())
        .bind(update.price)
        .bind(update.stock)
        .bind(update.sort_order)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_product(&self, product_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
