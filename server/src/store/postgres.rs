// server/src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use leafix_core::{CatalogError, CatalogResult, CatalogStore, Category, PageWindow, Product, ProductFilter};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{error, instrument};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
  "id, title, price, quantity, description, rating, image, category_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  title: String,
  price: f64,
  quantity: i32,
  description: Option<String>,
  rating: f64,
  image: Option<String>,
  category_id: Option<Uuid>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: row.id,
      title: row.title,
      price: row.price,
      quantity: row.quantity,
      description: row.description,
      rating: row.rating,
      image: row.image,
      category_id: row.category_id,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
  id: Uuid,
  name: String,
  created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
  fn from(row: CategoryRow) -> Self {
    Category {
      id: row.id,
      name: row.name,
      created_at: row.created_at,
    }
  }
}

/// `CatalogStore` backed by the `products` / `categories` tables.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
  pool: PgPool,
}

impl PgCatalogStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Maps constraint violations onto catalog errors; everything else is a store failure.
fn map_db_error(context: &str, err: sqlx::Error) -> CatalogError {
  if let sqlx::Error::Database(db_err) = &err {
    if db_err.is_unique_violation() {
      return CatalogError::Conflict("Category name already exists".to_string());
    }
    if db_err.is_foreign_key_violation() {
      return CatalogError::validation("Referenced category does not exist");
    }
    if db_err.is_check_violation() {
      return CatalogError::Validation(format!("Rejected by store constraint: {}", db_err.message()));
    }
  }
  error!(error = %err, "{} failed", context);
  CatalogError::from(anyhow::Error::from(err))
}

/// Escapes `%`, `_` and `\` so `search` matches literally under `ILIKE ... ESCAPE '\'`.
pub fn like_pattern(search: &str) -> String {
  let mut pattern = String::with_capacity(search.len() + 2);
  pattern.push('%');
  for c in search.chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
  qb.push(" WHERE price >= ")
    .push_bind(filter.min_price)
    .push(" AND price <= ")
    .push_bind(filter.max_price);
  if let Some(search) = &filter.search {
    qb.push(" AND title ILIKE ")
      .push_bind(like_pattern(search))
      .push(" ESCAPE '\\'");
  }
  if let Some(category) = filter.category {
    qb.push(" AND category_id = ").push_bind(category);
  }
}

fn to_i64(value: u64) -> i64 {
  i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
  #[instrument(name = "pg::insert_product", skip_all, fields(product_id = %product.id))]
  async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
    let sql = format!(
      "INSERT INTO products ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {cols}",
      cols = PRODUCT_COLUMNS
    );
    let row: ProductRow = sqlx::query_as(&sql)
      .bind(product.id)
      .bind(&product.title)
      .bind(product.price)
      .bind(product.quantity)
      .bind(&product.description)
      .bind(product.rating)
      .bind(&product.image)
      .bind(product.category_id)
      .bind(product.created_at)
      .bind(product.updated_at)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| map_db_error("insert product", e))?;
    Ok(row.into())
  }

  async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_db_error("find product", e))?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "pg::count_products", skip_all)]
  async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64> {
    let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
    push_filter(&mut qb, filter);
    let count: i64 = qb
      .build_query_scalar()
      .fetch_one(&self.pool)
      .await
      .map_err(|e| map_db_error("count products", e))?;
    Ok(u64::try_from(count).unwrap_or(0))
  }

  #[instrument(name = "pg::find_products", skip_all, fields(skip = window.skip, limit = window.limit))]
  async fn find_products(&self, filter: &ProductFilter, window: PageWindow) -> CatalogResult<Vec<Product>> {
    let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY created_at ASC, id ASC LIMIT ")
      .push_bind(to_i64(window.limit))
      .push(" OFFSET ")
      .push_bind(to_i64(window.skip));
    let rows: Vec<ProductRow> = qb
      .build_query_as()
      .fetch_all(&self.pool)
      .await
      .map_err(|e| map_db_error("find products", e))?;
    Ok(rows.into_iter().map(Product::from).collect())
  }

  #[instrument(name = "pg::replace_product", skip_all, fields(product_id = %product.id))]
  async fn replace_product(&self, product: Product) -> CatalogResult<Option<Product>> {
    let sql = format!(
      "UPDATE products SET title = $2, price = $3, quantity = $4, description = $5, rating = $6, \
       image = $7, category_id = $8, updated_at = $9 WHERE id = $1 RETURNING {}",
      PRODUCT_COLUMNS
    );
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(product.id)
      .bind(&product.title)
      .bind(product.price)
      .bind(product.quantity)
      .bind(&product.description)
      .bind(product.rating)
      .bind(&product.image)
      .bind(product.category_id)
      .bind(product.updated_at)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_db_error("update product", e))?;
    Ok(row.map(Product::from))
  }

  async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(|e| map_db_error("delete product", e))?;
    Ok(result.rows_affected() > 0)
  }

  #[instrument(name = "pg::insert_category", skip_all, fields(name = %category.name))]
  async fn insert_category(&self, category: Category) -> CatalogResult<Category> {
    let row: CategoryRow =
      sqlx::query_as("INSERT INTO categories (id, name, created_at) VALUES ($1, $2, $3) RETURNING id, name, created_at")
        .bind(category.id)
        .bind(&category.name)
        .bind(category.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("insert category", e))?;
    Ok(row.into())
  }

  async fn find_category(&self, id: Uuid) -> CatalogResult<Option<Category>> {
    let row: Option<CategoryRow> = sqlx::query_as("SELECT id, name, created_at FROM categories WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| map_db_error("find category", e))?;
    Ok(row.map(Category::from))
  }

  async fn find_categories(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let rows: Vec<CategoryRow> = sqlx::query_as("SELECT id, name, created_at FROM categories WHERE id = ANY($1)")
      .bind(ids.to_vec())
      .fetch_all(&self.pool)
      .await
      .map_err(|e| map_db_error("find categories", e))?;
    Ok(rows.into_iter().map(Category::from).collect())
  }

  async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    let rows: Vec<CategoryRow> = sqlx::query_as("SELECT id, name, created_at FROM categories ORDER BY name ASC")
      .fetch_all(&self.pool)
      .await
      .map_err(|e| map_db_error("list categories", e))?;
    Ok(rows.into_iter().map(Category::from).collect())
  }
}
