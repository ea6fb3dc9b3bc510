use serde::Serialize;

#[derive(Debug, sqlx::FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

/// Single aggregate row. All three values are null when the date filter
/// matched no measurements.
#[derive(Debug, sqlx::FromRow)]
pub struct TemperatureSummary {
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
}
