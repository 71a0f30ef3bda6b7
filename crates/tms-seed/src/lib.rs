//! Synthetic data seeding for the time management system
//!
//! [`DataGenerator`] produces raw user and time-log rows; [`Seeder`] validates
//! each row against its record schema and writes it through the shared
//! document client, logging and counting failures without stopping the run.

pub mod generator;
pub mod seeder;

pub use generator::{
    DataGenerator, GeneratorConfig, DEPARTMENTS, MAX_LOGS_PER_USER, MAX_USERS, OPERATING_SYSTEMS,
    SITES,
};
pub use seeder::{KindReport, RecordError, SeedReport, Seeder};
