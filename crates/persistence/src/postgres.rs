use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    CategoryId, Customer, CustomerId, CustomerRepository, Email, Money, NewProduct,
    PasswordHash, Product, ProductCategory, ProductId, ProductRepository, RepositoryError,
    RepositoryResult,
};
use sqlx::{PgPool, Row, postgres::PgRow};

const PRODUCT_COLUMNS: &str = "id, name, description, price_cents, category_id, category_name, \
     category_description, sku, stock_quantity, created_at, updated_at";

const CUSTOMER_COLUMNS: &str = "id, name, email, password_hash, address, created_at, updated_at";

type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>;

fn column<'r, T>(row: &'r PgRow, name: &str) -> RepositoryResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(RepositoryError::backend)
}

/// Runs the database migrations.
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new repository on an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> RepositoryResult<Product> {
        let category = ProductCategory::new(
            CategoryId::new(column::<String>(&row, "category_id")?),
            column::<String>(&row, "category_name")?,
            Some(column::<String>(&row, "category_description")?),
        )
        .map_err(RepositoryError::backend)?;

        let props = NewProduct {
            id: Some(ProductId::from_uuid(column(&row, "id")?)),
            name: column(&row, "name")?,
            description: column(&row, "description")?,
            price: Money::from_cents(column(&row, "price_cents")?),
            category,
            sku: column(&row, "sku")?,
            stock_quantity: column(&row, "stock_quantity")?,
            created_at: Some(column(&row, "created_at")?),
            updated_at: Some(column(&row, "updated_at")?),
        };

        Product::new(props).map_err(RepositoryError::backend)
    }

    async fn fetch_many(&self, query: PgQuery<'_>) -> RepositoryResult<Vec<Product>> {
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;
        rows.into_iter().map(Self::row_to_product).collect()
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        row.map(Self::row_to_product).transpose()
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id");
        self.fetch_many(sqlx::query(&sql)).await
    }

    async fn find_by_category(&self, category_id: &CategoryId) -> RepositoryResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY created_at, id"
        );
        self.fetch_many(sqlx::query(&sql).bind(category_id.as_str()))
            .await
    }

    async fn save(&self, product: &Product) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, category_id, category_name,
                                  category_description, sku, stock_quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price_cents = EXCLUDED.price_cents,
                category_id = EXCLUDED.category_id,
                category_name = EXCLUDED.category_name,
                category_description = EXCLUDED.category_description,
                sku = EXCLUDED.sku,
                stock_quantity = EXCLUDED.stock_quantity,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price().cents())
        .bind(product.category().id().as_str())
        .bind(product.category().name())
        .bind(product.category().description())
        .bind(product.sku())
        .bind(i64::from(product.stock_quantity()))
        .bind(product.created_at())
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                price_cents = $4,
                category_id = $5,
                category_name = $6,
                category_description = $7,
                sku = $8,
                stock_quantity = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.description())
        .bind(product.price().cents())
        .bind(product.category().id().as_str())
        .bind(product.category().name())
        .bind(product.category().description())
        .bind(product.sku())
        .bind(i64::from(product.stock_quantity()))
        .bind(product.updated_at())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product",
                id: product.id().to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = $1");
        let row = sqlx::query(&sql)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        row.map(Self::row_to_product).transpose()
    }

    async fn find_by_price_range(&self, min: Money, max: Money) -> RepositoryResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE price_cents BETWEEN $1 AND $2 ORDER BY created_at, id"
        );
        self.fetch_many(sqlx::query(&sql).bind(min.cents()).bind(max.cents()))
            .await
    }

    async fn find_out_of_stock(&self) -> RepositoryResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE stock_quantity = 0 ORDER BY created_at, id"
        );
        self.fetch_many(sqlx::query(&sql)).await
    }

    async fn find_low_stock(&self, threshold: u32) -> RepositoryResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE stock_quantity > 0 AND stock_quantity <= $1 ORDER BY created_at, id"
        );
        self.fetch_many(sqlx::query(&sql).bind(i64::from(threshold)))
            .await
    }
}

/// PostgreSQL-backed customer repository.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Creates a new repository on an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_customer(row: PgRow) -> RepositoryResult<Customer> {
        let email: String = column(&row, "email")?;
        let created_at: DateTime<Utc> = column(&row, "created_at")?;
        let updated_at: DateTime<Utc> = column(&row, "updated_at")?;

        Ok(Customer::restore(
            CustomerId::from_uuid(column(&row, "id")?),
            column(&row, "name")?,
            Email::parse(&email).map_err(RepositoryError::backend)?,
            PasswordHash::from_hash(column::<String>(&row, "password_hash")?),
            column(&row, "address")?,
            created_at,
            updated_at,
        ))
    }

    async fn fetch_optional(&self, query: PgQuery<'_>) -> RepositoryResult<Option<Customer>> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;

        row.map(Self::row_to_customer).transpose()
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn save(&self, customer: &Customer) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, password_hash, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                address = EXCLUDED.address,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.name())
        .bind(customer.email().as_str())
        .bind(customer.password().as_str())
        .bind(customer.address())
        .bind(customer.created_at())
        .bind(customer.updated_at())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        Ok(())
    }

    async fn find_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        self.fetch_optional(sqlx::query(&sql).bind(id.as_uuid()))
            .await
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<Customer>> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1");
        self.fetch_optional(sqlx::query(&sql).bind(email.as_str()))
            .await
    }

    async fn update(&self, customer: &Customer) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = $2,
                email = $3,
                password_hash = $4,
                address = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.name())
        .bind(customer.email().as_str())
        .bind(customer.password().as_str())
        .bind(customer.address())
        .bind(customer.updated_at())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::backend)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Customer",
                id: customer.id().to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, id: CustomerId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::backend)?;
        Ok(result.rows_affected() > 0)
    }
}
