use toko_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    seed_products(&pool).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_products(pool: &DbPool) -> anyhow::Result<()> {
    let products = [
        ("Axum Hoodie", 550_000_i64),
        ("Ferris Mug", 120_000),
        ("Rust Sticker Pack", 50_000),
        ("E-book: Async Rust", 250_000),
    ];

    for (name, price) in products {
        // products.name carries no unique constraint, so skip names already present.
        let inserted = sqlx::query(
            r#"
            INSERT INTO products (id, name, price)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $2 AND is_deleted = false)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(price)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            println!("Seeded {name}");
        }
    }

    Ok(())
}
