//! Declared shape of the climate store.
//!
//! The database is owned by an external pipeline and is never created or
//! migrated here. The declaration pins the column set the query layer is
//! written against; [`verify`] fails fast at startup when the live database
//! does not match it.

use sqlx::sqlite::SqlitePool;

pub const SCHEMA_VERSION: u32 = 1;

const STATION_COLUMNS: &str = "station, name, latitude, longitude, elevation";
const MEASUREMENT_COLUMNS: &str = "station, date, prcp, tobs";

/// Probes each declared table with a trivial select over its declared
/// columns. A missing table or column surfaces as a database error.
pub async fn verify(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(&format!("select {STATION_COLUMNS} from station limit 1"))
        .fetch_optional(pool)
        .await?;
    sqlx::query(&format!(
        "select {MEASUREMENT_COLUMNS} from measurement limit 1"
    ))
    .fetch_optional(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
pub const CREATE_STATION: &str = "\
create table station (
    id        integer primary key,
    station   text not null,
    name      text not null,
    latitude  real,
    longitude real,
    elevation real
)";

#[cfg(test)]
pub const CREATE_MEASUREMENT: &str = "\
create table measurement (
    id      integer primary key,
    station text not null,
    date    text not null,
    prcp    real,
    tobs    real not null
)";

/// Materializes the declared shape in a test database.
#[cfg(test)]
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_STATION).execute(pool).await?;
    sqlx::query(CREATE_MEASUREMENT).execute(pool).await?;
    Ok(())
}
