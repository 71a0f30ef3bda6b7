//! Synthetic user and time-log rows
//!
//! Rows are raw BSON documents, the same shape an external feed would hand to
//! the record schemas. Output is reproducible for a given seed.

use bson::{doc, Document};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::warn;

pub const DEPARTMENTS: [&str; 24] = [
    "Compositing",
    "Lighting",
    "Modeling",
    "Rigging",
    "Animation",
    "FX",
    "Matte Painting",
    "Layout",
    "Matchmove",
    "Pipeline",
    "Editorial",
    "Production",
    "IT",
    "Prodtech",
    "Asset Management",
    "Lookdev",
    "Groom",
    "Texturing",
    "Environments",
    "Rendering",
    "Color Grading",
    "Art Department",
    "Previs",
    "Story",
];

pub const SITES: [&str; 3] = ["Hyderabad", "London", "Sydney"];

pub const OPERATING_SYSTEMS: [&str; 3] = ["Linux", "Windows", "macOS"];

const FIRST_NAMES: [&str; 20] = [
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "Arjun", "Priya", "Oliver", "Amelia", "Jack", "Isla", "Noah", "Charlotte",
    "Ravi", "Ananya",
];

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Wilson",
    "Taylor", "Sharma", "Patel", "Reddy", "Evans", "Walker", "Thompson", "White", "Harris",
    "Clarke", "Nguyen",
];

const EMAIL_DOMAINS: [&str; 4] = ["example.com", "example.org", "example.net", "studio.test"];

const HOST_PREFIXES: [&str; 5] = ["ws", "render", "edit", "desk", "lap"];

/// Upper bound for `--users`
pub const MAX_USERS: u32 = 100_000;

/// Upper bound for `--logs-per-user` (ten years of daily logs)
pub const MAX_LOGS_PER_USER: u32 = 3_660;

/// Rows reserved up front; larger batches grow as they are generated
const MAX_PREALLOCATED_ROWS: usize = 1 << 16;

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of users (employee IDs run E001..)
    pub users: usize,
    /// Time logs per user, one per consecutive day
    pub logs_per_user: usize,
    /// Date of each user's first time log
    pub start_date: NaiveDate,
    /// Random seed; a fresh one is drawn when unset
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            users: 501,
            logs_per_user: 10,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or(NaiveDate::MIN),
            seed: None,
        }
    }

    pub fn with_users(mut self, users: usize) -> Self {
        self.users = users;
        self
    }

    pub fn with_logs_per_user(mut self, logs: usize) -> Self {
        self.logs_per_user = logs;
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces raw rows for the `users` and `time_logs` collections
pub struct DataGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl DataGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = StdRng::seed_from_u64(seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Employee ID for a 1-based user index: E001, E002, ..., E1000
    pub fn employee_id(index: usize) -> String {
        format!("E{:03}", index)
    }

    /// One row per user. Every second user is active.
    pub fn generate_users(&mut self) -> Vec<Document> {
        (1..=self.config.users)
            .map(|index| {
                let first = self.pick(&FIRST_NAMES);
                let last = self.pick(&LAST_NAMES);
                let domain = self.pick(&EMAIL_DOMAINS);
                doc! {
                    "employee_id": Self::employee_id(index),
                    "full_name": format!("{} {}", first, last),
                    // the index suffix keeps emails unique across the batch
                    "email": format!(
                        "{}.{}{}@{}",
                        first.to_lowercase(),
                        last.to_lowercase(),
                        index,
                        domain
                    ),
                    "department": self.pick(&DEPARTMENTS),
                    "site": self.pick(&SITES),
                    "active": index % 2 == 0,
                }
            })
            .collect()
    }

    /// `logs_per_user` rows for every user row that carries an employee ID.
    ///
    /// Days past the last representable date are not generated.
    pub fn generate_timelogs(&mut self, users: &[Document]) -> Vec<Document> {
        let dates = self.log_dates();
        let expected = users.len().saturating_mul(dates.len());
        let mut timelogs = Vec::with_capacity(expected.min(MAX_PREALLOCATED_ROWS));
        for user in users {
            let Ok(employee_id) = user.get_str("employee_id") else {
                continue;
            };
            for &date in &dates {
                timelogs.push(self.timelog(employee_id, date));
            }
        }
        timelogs
    }

    fn log_dates(&self) -> Vec<NaiveDate> {
        let start = self.config.start_date;
        let dates: Vec<NaiveDate> = (0..self.config.logs_per_user as u64)
            .map_while(|day| start.checked_add_days(Days::new(day)))
            .collect();
        if dates.len() < self.config.logs_per_user {
            warn!(
                "Only {} of {} log days fit after {}",
                dates.len(),
                self.config.logs_per_user,
                start
            );
        }
        dates
    }

    fn timelog(&mut self, employee_id: &str, date: NaiveDate) -> Document {
        let login_hour: u32 = self.rng.gen_range(7..=10);
        let logout_hour: u32 = login_hour + self.rng.gen_range(7..=10);
        let login_minute: u32 = self.rng.gen_range(0..=59);
        let logout_minute: u32 = self.rng.gen_range(0..=59);

        let worked = (f64::from(logout_hour) + f64::from(logout_minute) / 60.0)
            - (f64::from(login_hour) + f64::from(login_minute) / 60.0);
        let active_hours = (worked * 10.0).round() / 10.0;

        doc! {
            "employee_id": employee_id,
            "date": date.format("%Y-%m-%d").to_string(),
            "hostname": self.hostname(),
            "os": self.pick(&OPERATING_SYSTEMS),
            "login_time": format!("{:02}:{:02}", login_hour, login_minute),
            "logout_time": format!("{:02}:{:02}", logout_hour, logout_minute),
            "active_hours": active_hours,
        }
    }

    fn hostname(&mut self) -> String {
        let prefix = self.pick(&HOST_PREFIXES);
        let number: u32 = self.rng.gen_range(1..=999);
        let site = self.pick(&SITES).to_lowercase();
        format!("{}-{:03}.{}.studio.test", prefix, number, site)
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> DataGenerator {
        DataGenerator::new(GeneratorConfig::new().with_users(12).with_seed(seed))
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.users, 501);
        assert_eq!(config.logs_per_user, 10);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_employee_ids_are_padded() {
        assert_eq!(DataGenerator::employee_id(1), "E001");
        assert_eq!(DataGenerator::employee_id(42), "E042");
        assert_eq!(DataGenerator::employee_id(501), "E501");
        assert_eq!(DataGenerator::employee_id(1000), "E1000");
    }

    #[test]
    fn test_users_shape() {
        let users = generator(7).generate_users();
        assert_eq!(users.len(), 12);

        for (i, user) in users.iter().enumerate() {
            let index = i + 1;
            assert_eq!(user.get_str("employee_id").unwrap(), DataGenerator::employee_id(index));
            assert_eq!(user.get_bool("active").unwrap(), index % 2 == 0);
            assert!(DEPARTMENTS.contains(&user.get_str("department").unwrap()));
            assert!(SITES.contains(&user.get_str("site").unwrap()));
        }

        let mut emails: Vec<&str> = users.iter().map(|u| u.get_str("email").unwrap()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), 12);
    }

    #[test]
    fn test_timelogs_shape() {
        let mut generator = generator(7);
        let users = generator.generate_users();
        let logs = generator.generate_timelogs(&users);
        assert_eq!(logs.len(), 120);

        assert_eq!(logs[0].get_str("date").unwrap(), "2025-06-01");
        assert_eq!(logs[9].get_str("date").unwrap(), "2025-06-10");
        assert_eq!(logs[10].get_str("employee_id").unwrap(), "E002");

        for log in &logs {
            let login = log.get_str("login_time").unwrap();
            let logout = log.get_str("logout_time").unwrap();
            let login_hour: u32 = login[..2].parse().unwrap();
            let logout_hour: u32 = logout[..2].parse().unwrap();
            assert!((7..=10).contains(&login_hour));
            assert!((7..=10).contains(&(logout_hour - login_hour)));

            let hours = log.get_f64("active_hours").unwrap();
            assert!((6.0..=11.0).contains(&hours), "active_hours {}", hours);
            assert_eq!((hours * 10.0).round() / 10.0, hours);
            assert!(OPERATING_SYSTEMS.contains(&log.get_str("os").unwrap()));
        }
    }

    #[test]
    fn test_same_seed_same_rows() {
        let mut first = generator(99);
        let mut second = generator(99);

        let users = first.generate_users();
        assert_eq!(users, second.generate_users());
        assert_eq!(first.generate_timelogs(&users), second.generate_timelogs(&users));
    }

    #[test]
    fn test_log_days_stop_at_last_date() {
        let last = NaiveDate::MAX;
        let mut generator = DataGenerator::new(
            GeneratorConfig::new()
                .with_users(1)
                .with_logs_per_user(200_000_000)
                .with_start_date(last.checked_sub_days(Days::new(2)).unwrap())
                .with_seed(5),
        );
        let users = generator.generate_users();
        let logs = generator.generate_timelogs(&users);
        assert_eq!(logs.len(), 3);
    }

    #[test]
    fn test_rows_without_employee_id_are_skipped() {
        let mut generator = generator(1);
        let logs = generator.generate_timelogs(&[doc! { "full_name": "nobody" }]);
        assert!(logs.is_empty());
    }
}
