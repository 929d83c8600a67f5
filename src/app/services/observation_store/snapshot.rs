//! Parquet snapshots of users and observations
//!
//! Each snapshot is a pair of files in the data directory. Files are written
//! to a temporary sibling first and renamed into place, so a crash mid-write
//! leaves the previous snapshot intact. Dates are stored as `YYYY-MM-DD`
//! strings and timestamps as epoch milliseconds.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use polars::prelude::{
    Column, DataFrame, ParquetReader, ParquetWriter, PolarsError, SerReader, Series,
    StatisticsOptions,
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::app::models::{Observation, PrivacyLevel, User};
use crate::constants::{OBSERVATIONS_SNAPSHOT_FILE, USERS_SNAPSHOT_FILE};
use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write users and observations into `dir`
pub fn save_to_dir(dir: &Path, users: &[User], observations: &[Observation]) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::io(
            format!("Failed to create data directory {}", dir.display()),
            e,
        )
    })?;

    let mut users_frame = users_to_frame(users)?;
    write_frame_atomically(dir, USERS_SNAPSHOT_FILE, &mut users_frame)?;

    let mut observations_frame = observations_to_frame(observations)?;
    write_frame_atomically(dir, OBSERVATIONS_SNAPSHOT_FILE, &mut observations_frame)?;

    debug!(
        "Saved snapshot of {} users and {} observations to {}",
        users.len(),
        observations.len(),
        dir.display()
    );
    Ok(())
}

/// Load a snapshot from `dir`; `None` when no snapshot has been written yet
pub fn load_from_dir(dir: &Path) -> Result<Option<(Vec<User>, Vec<Observation>)>> {
    let users_path = dir.join(USERS_SNAPSHOT_FILE);
    if !users_path.exists() {
        return Ok(None);
    }

    let users = frame_to_users(&read_frame(&users_path)?)?;

    let observations_path = dir.join(OBSERVATIONS_SNAPSHOT_FILE);
    let observations = if observations_path.exists() {
        frame_to_observations(&read_frame(&observations_path)?)?
    } else {
        Vec::new()
    };

    info!(
        "Loaded snapshot with {} users and {} observations from {}",
        users.len(),
        observations.len(),
        dir.display()
    );
    Ok(Some((users, observations)))
}

fn write_frame_atomically(dir: &Path, file_name: &str, frame: &mut DataFrame) -> Result<()> {
    let mut temp_file = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(format!("Failed to create temp file in {}", dir.display()), e))?;

    ParquetWriter::new(temp_file.as_file_mut())
        .with_statistics(StatisticsOptions::full())
        .finish(frame)
        .map_err(|e| Error::storage(format!("Failed to write {}", file_name), e))?;

    let target = dir.join(file_name);
    temp_file
        .persist(&target)
        .map_err(|e| Error::io(format!("Failed to replace {}", target.display()), e.error))?;
    Ok(())
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| Error::storage(format!("Failed to read {}", path.display()), e))
}

fn corrupt(message: String) -> Error {
    Error::storage(message.clone(), PolarsError::ComputeError(message.into()))
}

fn series<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Series> {
    frame
        .column(name)
        .map(Column::as_materialized_series)
        .map_err(|e| Error::storage(format!("Snapshot column '{}' is missing", name), e))
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| corrupt(format!("Snapshot column '{}' is null at row {}", column, row)))
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| corrupt(format!("Bad observation date '{}' at row {}", value, row)))
}

fn parse_timestamp(millis: i64, row: usize) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| corrupt(format!("Bad timestamp {} at row {}", millis, row)))
}

// =============================================================================
// Users
// =============================================================================

fn users_to_frame(users: &[User]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            "id".into(),
            users.iter().map(|u| u.id).collect::<Vec<u64>>(),
        ),
        Column::new(
            "email".into(),
            users.iter().map(|u| u.email.clone()).collect::<Vec<String>>(),
        ),
        Column::new(
            "name".into(),
            users.iter().map(|u| u.name.clone()).collect::<Vec<String>>(),
        ),
        Column::new(
            "privacy_level".into(),
            users
                .iter()
                .map(|u| u.privacy_level.as_str().to_string())
                .collect::<Vec<String>>(),
        ),
        Column::new(
            "created_at".into(),
            users
                .iter()
                .map(|u| u.created_at.timestamp_millis())
                .collect::<Vec<i64>>(),
        ),
        Column::new(
            "last_login".into(),
            users
                .iter()
                .map(|u| u.last_login.map(|t| t.timestamp_millis()))
                .collect::<Vec<Option<i64>>>(),
        ),
    ];
    DataFrame::new(columns).map_err(|e| Error::storage("Failed to build users frame", e))
}

fn frame_to_users(frame: &DataFrame) -> Result<Vec<User>> {
    let ids = series(frame, "id")?.u64()?;
    let emails = series(frame, "email")?.str()?;
    let names = series(frame, "name")?.str()?;
    let privacy_levels = series(frame, "privacy_level")?.str()?;
    let created = series(frame, "created_at")?.i64()?;
    let last_login = series(frame, "last_login")?.i64()?;

    let mut users = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        let privacy_level: PrivacyLevel =
            required(privacy_levels.get(row), "privacy_level", row)?.parse()?;
        users.push(User {
            id: required(ids.get(row), "id", row)?,
            email: required(emails.get(row), "email", row)?.to_string(),
            name: required(names.get(row), "name", row)?.to_string(),
            privacy_level,
            created_at: parse_timestamp(required(created.get(row), "created_at", row)?, row)?,
            last_login: last_login
                .get(row)
                .map(|millis| parse_timestamp(millis, row))
                .transpose()?,
        });
    }
    Ok(users)
}

// =============================================================================
// Observations
// =============================================================================

fn observations_to_frame(observations: &[Observation]) -> Result<DataFrame> {
    fn strings<F>(observations: &[Observation], f: F) -> Vec<String>
    where
        F: Fn(&Observation) -> String,
    {
        observations.iter().map(f).collect()
    }

    fn optional_strings<F>(observations: &[Observation], f: F) -> Vec<Option<String>>
    where
        F: Fn(&Observation) -> Option<String>,
    {
        observations.iter().map(f).collect()
    }

    let columns = vec![
        Column::new(
            "sequence".into(),
            observations.iter().map(|o| o.sequence).collect::<Vec<u64>>(),
        ),
        Column::new(
            "user_id".into(),
            observations.iter().map(|o| o.user_id).collect::<Vec<u64>>(),
        ),
        Column::new(
            "submission_id".into(),
            optional_strings(observations, |o| o.submission_id.clone()),
        ),
        Column::new(
            "common_name".into(),
            strings(observations, |o| o.common_name.clone()),
        ),
        Column::new(
            "scientific_name".into(),
            strings(observations, |o| o.scientific_name.clone()),
        ),
        Column::new(
            "taxonomic_order".into(),
            observations
                .iter()
                .map(|o| o.taxonomic_order)
                .collect::<Vec<Option<i64>>>(),
        ),
        Column::new("count".into(), optional_strings(observations, |o| o.count.clone())),
        Column::new(
            "state_province".into(),
            optional_strings(observations, |o| o.state_province.clone()),
        ),
        Column::new(
            "county".into(),
            optional_strings(observations, |o| o.county.clone()),
        ),
        Column::new(
            "location".into(),
            optional_strings(observations, |o| o.location.clone()),
        ),
        Column::new(
            "latitude".into(),
            observations
                .iter()
                .map(|o| o.latitude)
                .collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "longitude".into(),
            observations
                .iter()
                .map(|o| o.longitude)
                .collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "observation_date".into(),
            strings(observations, |o| {
                o.observation_date.format(DATE_FORMAT).to_string()
            }),
        ),
        Column::new(
            "row_ordinal".into(),
            observations
                .iter()
                .map(|o| o.row_ordinal as u64)
                .collect::<Vec<u64>>(),
        ),
        Column::new(
            "uploaded_at".into(),
            observations
                .iter()
                .map(|o| o.uploaded_at.timestamp_millis())
                .collect::<Vec<i64>>(),
        ),
    ];
    DataFrame::new(columns).map_err(|e| Error::storage("Failed to build observations frame", e))
}

fn frame_to_observations(frame: &DataFrame) -> Result<Vec<Observation>> {
    let sequences = series(frame, "sequence")?.u64()?;
    let user_ids = series(frame, "user_id")?.u64()?;
    let submission_ids = series(frame, "submission_id")?.str()?;
    let common_names = series(frame, "common_name")?.str()?;
    let scientific_names = series(frame, "scientific_name")?.str()?;
    let taxonomic_orders = series(frame, "taxonomic_order")?.i64()?;
    let counts = series(frame, "count")?.str()?;
    let states = series(frame, "state_province")?.str()?;
    let counties = series(frame, "county")?.str()?;
    let locations = series(frame, "location")?.str()?;
    let latitudes = series(frame, "latitude")?.f64()?;
    let longitudes = series(frame, "longitude")?.f64()?;
    let dates = series(frame, "observation_date")?.str()?;
    let row_ordinals = series(frame, "row_ordinal")?.u64()?;
    let uploaded = series(frame, "uploaded_at")?.i64()?;

    let mut observations = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        observations.push(Observation {
            sequence: required(sequences.get(row), "sequence", row)?,
            user_id: required(user_ids.get(row), "user_id", row)?,
            submission_id: submission_ids.get(row).map(str::to_string),
            common_name: required(common_names.get(row), "common_name", row)?.to_string(),
            scientific_name: required(scientific_names.get(row), "scientific_name", row)?
                .to_string(),
            taxonomic_order: taxonomic_orders.get(row),
            count: counts.get(row).map(str::to_string),
            state_province: states.get(row).map(str::to_string),
            county: counties.get(row).map(str::to_string),
            location: locations.get(row).map(str::to_string),
            latitude: latitudes.get(row),
            longitude: longitudes.get(row),
            observation_date: parse_date(
                required(dates.get(row), "observation_date", row)?,
                row,
            )?,
            row_ordinal: required(row_ordinals.get(row), "row_ordinal", row)? as usize,
            uploaded_at: parse_timestamp(required(uploaded.get(row), "uploaded_at", row)?, row)?,
        });
    }
    Ok(observations)
}
