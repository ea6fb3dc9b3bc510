pub mod schema;

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::SqlitePool;

use crate::domain::{PrecipitationReading, TemperatureReading, TemperatureSummary};
use crate::error::{ApiError, Result};

/// Last observation date in the dataset. The temperature-observation window
/// is anchored to this date, not to the current time.
const OBSERVATION_WINDOW_END: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("invalid observation window anchor"),
};

const OBSERVATION_WINDOW_DAYS: i64 = 365;

pub async fn precipitation_readings(pool: &SqlitePool) -> Result<Vec<PrecipitationReading>> {
    let readings = sqlx::query_as("select date, prcp from measurement")
        .fetch_all(pool)
        .await?;

    Ok(readings)
}

pub async fn station_codes(pool: &SqlitePool) -> Result<Vec<String>> {
    let codes = sqlx::query_scalar("select distinct station from station")
        .fetch_all(pool)
        .await?;

    Ok(codes)
}

/// Station with the most measurement rows. Ties resolve to the smallest
/// station code so repeated runs pick the same station.
pub async fn most_active_station(pool: &SqlitePool) -> Result<String> {
    sqlx::query_scalar(
        "select station from measurement
         group by station
         order by count(station) desc, station asc
         limit 1",
    )
    .fetch_optional(pool)
    .await?
    .ok_or(ApiError::NoMeasurements)
}

pub async fn recent_temperature_observations(
    pool: &SqlitePool,
) -> Result<Vec<TemperatureReading>> {
    let station = most_active_station(pool).await?;
    let (window_start, window_end) = observation_window();

    let readings = sqlx::query_as(
        "select date, tobs from measurement
         where station = ?1 and date >= ?2 and date <= ?3",
    )
    .bind(&station)
    .bind(&window_start)
    .bind(&window_end)
    .fetch_all(pool)
    .await?;

    Ok(readings)
}

pub async fn temperature_summary(
    pool: &SqlitePool,
    start: &str,
    end: Option<&str>,
) -> Result<TemperatureSummary> {
    let summary = match end {
        Some(end) => {
            sqlx::query_as(
                "select min(tobs) as min_tobs, avg(tobs) as avg_tobs, max(tobs) as max_tobs
                 from measurement where date >= ?1 and date <= ?2",
            )
            .bind(start)
            .bind(end)
            .fetch_one(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "select min(tobs) as min_tobs, avg(tobs) as avg_tobs, max(tobs) as max_tobs
                 from measurement where date >= ?1",
            )
            .bind(start)
            .fetch_one(pool)
            .await?
        }
    };

    Ok(summary)
}

fn observation_window() -> (String, String) {
    let window_start = OBSERVATION_WINDOW_END - Duration::days(OBSERVATION_WINDOW_DAYS);

    (
        window_start.format("%Y-%m-%d").to_string(),
        OBSERVATION_WINDOW_END.format("%Y-%m-%d").to_string(),
    )
}
