use std::collections::BTreeMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use log::{error, info};
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::db;
use crate::domain::PrecipitationReading;
use crate::error::ApiError;

const ROUTE_LISTING: &str = concat!(
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/>",
    "/api/v1.0/YYYY-MM-DD<br/>",
    "/api/v1.0/YYYY-MM-DD/YYYY-MM-DD",
);

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

async fn serve_precipitation(pool: SqlitePool) -> Result<impl Reply, Rejection> {
    let readings = db::precipitation_readings(&pool)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&precipitation_by_date(readings)))
}

fn precipitation_by_date(
    readings: Vec<PrecipitationReading>,
) -> BTreeMap<String, Option<f64>> {
    let mut by_date = BTreeMap::new();

    // A later reading for the same date replaces the earlier one.
    for reading in readings {
        by_date.insert(reading.date, reading.prcp);
    }

    by_date
}

async fn serve_stations(pool: SqlitePool) -> Result<impl Reply, Rejection> {
    let codes = db::station_codes(&pool)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&codes))
}

async fn serve_temperature_observations(pool: SqlitePool) -> Result<impl Reply, Rejection> {
    let readings = db::recent_temperature_observations(&pool)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&readings))
}

async fn serve_temperature_summary_from(
    start: String,
    pool: SqlitePool,
) -> Result<impl Reply, Rejection> {
    let summary = db::temperature_summary(&pool, &start, None)
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&[
        summary.min_tobs,
        summary.avg_tobs,
        summary.max_tobs,
    ]))
}

async fn serve_temperature_summary_range(
    start: String,
    end: String,
    pool: SqlitePool,
) -> Result<impl Reply, Rejection> {
    let summary = db::temperature_summary(&pool, &start, Some(&end))
        .await
        .map_err(warp::reject::custom)?;

    Ok(warp::reply::json(&[
        summary.min_tobs,
        summary.avg_tobs,
        summary.max_tobs,
    ]))
}

fn with_pool(
    pool: SqlitePool,
) -> impl Filter<Extract = (SqlitePool,), Error = Infallible> + Clone {
    warp::any().map(move || pool.clone())
}

async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_error) = rejection.find::<ApiError>() {
        match api_error {
            ApiError::Database(cause) => {
                error!("query failed: {}", cause);
                (StatusCode::INTERNAL_SERVER_ERROR, "database error")
            }
            ApiError::NoMeasurements => (StatusCode::NOT_FOUND, "no measurement data"),
        }
    } else if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "not found")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    } else {
        error!("unhandled rejection: {:?}", rejection);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    };

    let body = warp::reply::json(&ErrorBody { error: message });

    Ok(warp::reply::with_status(body, status))
}

pub fn routes(
    pool: SqlitePool,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index = warp::path::end().map(|| warp::reply::html(ROUTE_LISTING));
    let precipitation = warp::path!("api" / "v1.0" / "precipitation")
        .and(with_pool(pool.clone()))
        .and_then(serve_precipitation);
    let stations = warp::path!("api" / "v1.0" / "stations")
        .and(with_pool(pool.clone()))
        .and_then(serve_stations);
    let tobs = warp::path!("api" / "v1.0" / "tobs")
        .and(with_pool(pool.clone()))
        .and_then(serve_temperature_observations);
    let summary_range = warp::path!("api" / "v1.0" / String / String)
        .and(with_pool(pool.clone()))
        .and_then(serve_temperature_summary_range);
    let summary_from = warp::path!("api" / "v1.0" / String)
        .and(with_pool(pool))
        .and_then(serve_temperature_summary_from);

    // The literal routes must come before the date captures or a request for
    // /api/v1.0/stations would be read as a start date.
    warp::get()
        .and(
            index
                .or(precipitation)
                .or(stations)
                .or(tobs)
                .or(summary_range)
                .or(summary_from),
        )
        .recover(handle_rejection)
}

pub async fn run(pool: SqlitePool, address: SocketAddr) {
    let filter = routes(pool).with(warp::log("climate_api"));
    let (bound, server) =
        warp::serve(filter).bind_with_graceful_shutdown(address, shutdown_signal());

    info!("listening on http://{}", bound);
    server.await;
}

async fn shutdown_signal() {
    if let Err(cause) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", cause);
    }
}
