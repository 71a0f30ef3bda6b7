//! Validate-and-insert seeding through the shared document client

use std::fmt;
use std::sync::Arc;

use bson::Document;
use serde::Serialize;
use thiserror::Error;
use tms_common::TmsError;
use tms_mongodb::{DocumentClient, Filter};
use tms_validation::{Schema, TimeLogRecord, UserRecord, ValidationErrors};
use tracing::{error, info, warn};

use crate::generator::DataGenerator;

/// Why a single row was not written
#[derive(Error, Debug, Clone)]
pub enum RecordError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("MongoDB error: {0}")]
    Store(#[from] TmsError),
}

/// Outcome counts for one record kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindReport {
    pub inserted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl KindReport {
    pub fn total(&self) -> usize {
        self.inserted + self.skipped + self.failed
    }
}

impl fmt::Display for KindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} skipped, {} failed",
            self.inserted, self.skipped, self.failed
        )
    }
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: KindReport,
    pub time_logs: KindReport,
}

impl SeedReport {
    pub fn has_failures(&self) -> bool {
        self.users.failed > 0 || self.time_logs.failed > 0
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "users: {}; time logs: {}", self.users, self.time_logs)
    }
}

/// Writes generated rows through a [`DocumentClient`]
pub struct Seeder {
    client: Arc<DocumentClient>,
}

impl Seeder {
    pub fn new(client: Arc<DocumentClient>) -> Self {
        Self { client }
    }

    /// Drop both seeded collections
    pub fn drop_collections(&self) -> tms_common::Result<()> {
        for collection in [UserRecord::COLLECTION, TimeLogRecord::COLLECTION] {
            self.client.drop_collection(collection)?;
            warn!("Dropped collection '{}'", collection);
        }
        Ok(())
    }

    /// Insert users, skipping any whose employee ID is already stored
    pub fn seed_users(&self, rows: &[Document]) -> KindReport {
        let mut report = KindReport::default();
        for row in rows {
            match self.seed_user(row) {
                Ok(true) => report.inserted += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    error!("Failed to seed user {}: {}", row, e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn seed_user(&self, row: &Document) -> Result<bool, RecordError> {
        let user = UserRecord::validate(row)?;

        let existing = self.client.find_one(
            UserRecord::COLLECTION,
            Filter::eq("employee_id", user.employee_id.as_str()),
        )?;
        if existing.is_some() {
            info!(
                "User with employee_id {} already exists. Skipping.",
                user.employee_id
            );
            return Ok(false);
        }

        self.client
            .insert_one(UserRecord::COLLECTION, user.to_document())?;
        info!("Inserted user: {}", user.employee_id);
        Ok(true)
    }

    /// Insert time logs
    pub fn seed_timelogs(&self, rows: &[Document]) -> KindReport {
        let mut report = KindReport::default();
        for row in rows {
            match self.seed_timelog(row) {
                Ok(()) => report.inserted += 1,
                Err(e) => {
                    error!("Failed to seed time log {}: {}", row, e);
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn seed_timelog(&self, row: &Document) -> Result<(), RecordError> {
        let timelog = TimeLogRecord::validate(row)?;
        self.client
            .insert_one(TimeLogRecord::COLLECTION, timelog.to_document())?;
        info!(
            "Inserted time log for {} on {}",
            timelog.employee_id, timelog.date
        );
        Ok(())
    }

    /// Generate, seed users then time logs, and release the connection
    pub fn run(&self, generator: &mut DataGenerator) -> SeedReport {
        let users = generator.generate_users();
        let timelogs = generator.generate_timelogs(&users);

        let report = SeedReport {
            users: self.seed_users(&users),
            time_logs: self.seed_timelogs(&timelogs),
        };

        self.client.release();
        info!("Database seeding complete: {}", report);
        report
    }
}
