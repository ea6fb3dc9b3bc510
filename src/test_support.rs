use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::db::schema;

/// In-memory database with the declared schema applied. Pinned to a single
/// connection: a second connection would see a separate empty database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    schema::create_tables(&pool).await.expect("schema");

    pool
}

pub async fn insert_station(pool: &SqlitePool, code: &str, name: &str) {
    sqlx::query("insert into station (station, name) values (?1, ?2)")
        .bind(code)
        .bind(name)
        .execute(pool)
        .await
        .expect("insert station");
}

pub async fn insert_measurement(
    pool: &SqlitePool,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) {
    sqlx::query("insert into measurement (station, date, prcp, tobs) values (?1, ?2, ?3, ?4)")
        .bind(station)
        .bind(date)
        .bind(prcp)
        .bind(tobs)
        .execute(pool)
        .await
        .expect("insert measurement");
}
