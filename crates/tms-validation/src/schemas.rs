//! Record schemas for the `users` and `time_logs` collections
//!
//! Each schema takes a raw BSON document, type-checks every known field and
//! either returns the normalized record or a [`ValidationErrors`] listing all
//! offending fields. Unknown fields are ignored and dropped on
//! [`Schema::to_document`].

use bson::{doc, Bson, Document};
use chrono::NaiveDate;

use crate::errors::{ValidationError, ValidationErrors, ValidationResult};
use crate::formats::{validate_clock_time, validate_date, validate_email};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A record kind stored in its own collection
pub trait Schema: Sized {
    /// Record kind used as the error location
    const KIND: &'static str;

    /// Collection the record kind is persisted in
    const COLLECTION: &'static str;

    /// Validate a raw document into a typed record
    fn validate(raw: &Document) -> ValidationResult<Self>;

    /// Render the normalized record as a BSON document
    fn to_document(&self) -> Document;
}

// ============================================================================
// Users
// ============================================================================

/// An employee known to the time management system
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    /// Unique employee ID
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub site: String,
    pub active: bool,
}

impl Schema for UserRecord {
    const KIND: &'static str = "user";
    const COLLECTION: &'static str = "users";

    fn validate(raw: &Document) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(Self::KIND, raw);

        let employee_id = reader.string("employee_id");
        let full_name = reader.string("full_name");
        let email = reader.email("email");
        let department = reader.string("department");
        let site = reader.string("site");
        let active = reader.boolean("active");

        match (employee_id, full_name, email, department, site, active) {
            (
                Some(employee_id),
                Some(full_name),
                Some(email),
                Some(department),
                Some(site),
                Some(active),
            ) => reader.finish(UserRecord {
                employee_id,
                full_name,
                email,
                department,
                site,
                active,
            }),
            _ => Err(reader.errors),
        }
    }

    fn to_document(&self) -> Document {
        doc! {
            "employee_id": &self.employee_id,
            "full_name": &self.full_name,
            "email": &self.email,
            "department": &self.department,
            "site": &self.site,
            "active": self.active,
        }
    }
}

// ============================================================================
// Time logs
// ============================================================================

/// One employee's login session for a single day
#[derive(Debug, Clone, PartialEq)]
pub struct TimeLogRecord {
    /// References `UserRecord::employee_id`
    pub employee_id: String,
    pub date: NaiveDate,
    pub hostname: String,
    pub os: String,
    /// `HH:MM`, 24-hour
    pub login_time: String,
    /// `HH:MM`, 24-hour
    pub logout_time: String,
    pub active_hours: f64,
}

impl Schema for TimeLogRecord {
    const KIND: &'static str = "time_log";
    const COLLECTION: &'static str = "time_logs";

    fn validate(raw: &Document) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(Self::KIND, raw);

        let employee_id = reader.string("employee_id");
        let date = reader.date("date");
        let hostname = reader.string("hostname");
        let os = reader.string("os");
        let login_time = reader.clock_time("login_time");
        let logout_time = reader.clock_time("logout_time");
        let active_hours = reader.float("active_hours");

        match (
            employee_id,
            date,
            hostname,
            os,
            login_time,
            logout_time,
            active_hours,
        ) {
            (
                Some(employee_id),
                Some(date),
                Some(hostname),
                Some(os),
                Some(login_time),
                Some(logout_time),
                Some(active_hours),
            ) => reader.finish(TimeLogRecord {
                employee_id,
                date,
                hostname,
                os,
                login_time,
                logout_time,
                active_hours,
            }),
            _ => Err(reader.errors),
        }
    }

    fn to_document(&self) -> Document {
        doc! {
            "employee_id": &self.employee_id,
            "date": self.date.format(DATE_FORMAT).to_string(),
            "hostname": &self.hostname,
            "os": &self.os,
            "login_time": &self.login_time,
            "logout_time": &self.logout_time,
            "active_hours": self.active_hours,
        }
    }
}

// ============================================================================
// Field reader
// ============================================================================

/// Reads typed fields out of a raw document, accumulating errors
struct FieldReader<'a> {
    location: &'static str,
    raw: &'a Document,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    fn new(location: &'static str, raw: &'a Document) -> Self {
        Self {
            location,
            raw,
            errors: ValidationErrors::new(),
        }
    }

    fn finish<T>(self, record: T) -> ValidationResult<T> {
        self.errors.into_result(record)
    }

    /// Present, non-null value for `field`; reports a missing error otherwise
    fn present(&mut self, field: &str) -> Option<&'a Bson> {
        match self.raw.get(field) {
            None | Some(Bson::Null) => {
                self.errors
                    .add(ValidationError::missing_error(self.location, field));
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        match self.present(field)? {
            Bson::String(s) => Some(s.clone()),
            _ => {
                self.errors
                    .add(ValidationError::type_error(self.location, field, "string"));
                None
            }
        }
    }

    fn boolean(&mut self, field: &str) -> Option<bool> {
        match self.present(field)? {
            Bson::Boolean(b) => Some(*b),
            _ => {
                self.errors
                    .add(ValidationError::type_error(self.location, field, "boolean"));
                None
            }
        }
    }

    fn float(&mut self, field: &str) -> Option<f64> {
        match self.present(field)? {
            Bson::Double(f) => Some(*f),
            Bson::Int32(i) => Some(f64::from(*i)),
            Bson::Int64(i) => Some(*i as f64),
            _ => {
                self.errors
                    .add(ValidationError::type_error(self.location, field, "number"));
                None
            }
        }
    }

    fn email(&mut self, field: &str) -> Option<String> {
        let value = self.string(field)?;
        if validate_email(&value) {
            Some(value)
        } else {
            self.errors.add(ValidationError::format_error(
                self.location,
                field,
                "Value is not a valid email address",
            ));
            None
        }
    }

    fn clock_time(&mut self, field: &str) -> Option<String> {
        let value = self.string(field)?;
        if validate_clock_time(&value) {
            Some(value)
        } else {
            self.errors.add(ValidationError::format_error(
                self.location,
                field,
                "Time must be in HH:MM 24-hour format",
            ));
            None
        }
    }

    fn date(&mut self, field: &str) -> Option<NaiveDate> {
        match self.present(field)? {
            Bson::String(s) => {
                let parsed = if validate_date(s) {
                    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
                } else {
                    None
                };
                if parsed.is_none() {
                    self.errors.add(ValidationError::format_error(
                        self.location,
                        field,
                        "Date must be a valid YYYY-MM-DD calendar date",
                    ));
                }
                parsed
            }
            Bson::DateTime(dt) => Some(dt.to_chrono().date_naive()),
            _ => {
                self.errors
                    .add(ValidationError::type_error(self.location, field, "date"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorType;

    fn user_doc() -> Document {
        doc! {
            "employee_id": "E001",
            "full_name": "A",
            "email": "a@x.com",
            "department": "IT",
            "site": "London",
            "active": true,
        }
    }

    fn time_log_doc() -> Document {
        doc! {
            "employee_id": "E001",
            "date": "2025-06-01",
            "hostname": "ws-042.example.com",
            "os": "Linux",
            "login_time": "09:30",
            "logout_time": "17:45",
            "active_hours": 8.2,
        }
    }

    #[test]
    fn test_user_valid() {
        let user = UserRecord::validate(&user_doc()).unwrap();
        assert_eq!(user.employee_id, "E001");
        assert!(user.active);
        assert_eq!(user.to_document(), user_doc());
    }

    #[test]
    fn test_user_extra_fields_dropped() {
        let mut raw = user_doc();
        raw.insert("nickname", "ace");
        let user = UserRecord::validate(&raw).unwrap();
        assert!(!user.to_document().contains_key("nickname"));
    }

    #[test]
    fn test_user_reports_every_offending_field() {
        let raw = doc! {
            "employee_id": "E001",
            "full_name": 42,
            "email": "not-an-email",
            "site": "London",
            "active": "yes",
        };
        let errors = UserRecord::validate(&raw).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.fields(),
            vec!["full_name", "email", "department", "active"]
        );
        assert_eq!(errors.as_slice()[0].error_type, ErrorType::TypeError);
        assert_eq!(errors.as_slice()[1].error_type, ErrorType::FormatError);
        assert_eq!(errors.as_slice()[2].error_type, ErrorType::Missing);
        assert!(errors.as_slice().iter().all(|e| e.location == "user"));
    }

    #[test]
    fn test_null_is_missing() {
        let mut raw = user_doc();
        raw.insert("site", Bson::Null);
        let errors = UserRecord::validate(&raw).unwrap_err();
        assert_eq!(errors.as_slice()[0].error_type, ErrorType::Missing);
    }

    #[test]
    fn test_time_log_valid() {
        let log = TimeLogRecord::validate(&time_log_doc()).unwrap();
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(log.to_document(), time_log_doc());
    }

    #[test]
    fn test_time_log_time_patterns() {
        for good in ["09:30", "9:30", "00:00", "23:59"] {
            let mut raw = time_log_doc();
            raw.insert("login_time", good);
            assert!(TimeLogRecord::validate(&raw).is_ok(), "{} should pass", good);
        }
        for bad in ["25:00", "9:3", "24:00", "12:60", "noon"] {
            let mut raw = time_log_doc();
            raw.insert("logout_time", bad);
            let errors = TimeLogRecord::validate(&raw).unwrap_err();
            assert!(errors.has_field("logout_time"), "{} should fail", bad);
        }
    }

    #[test]
    fn test_time_log_integer_hours_coerced() {
        let mut raw = time_log_doc();
        raw.insert("active_hours", 8);
        let log = TimeLogRecord::validate(&raw).unwrap();
        assert_eq!(log.active_hours, 8.0);
        assert_eq!(log.to_document().get_f64("active_hours").unwrap(), 8.0);
    }

    #[test]
    fn test_time_log_invalid_calendar_date() {
        let mut raw = time_log_doc();
        raw.insert("date", "2025-02-30");
        let errors = TimeLogRecord::validate(&raw).unwrap_err();
        assert_eq!(errors.fields(), vec!["date"]);
    }

    #[test]
    fn test_time_log_datetime_date() {
        let mut raw = time_log_doc();
        let instant = chrono::NaiveDate::from_ymd_opt(2025, 6, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        raw.insert("date", bson::DateTime::from_chrono(instant));
        let log = TimeLogRecord::validate(&raw).unwrap();
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
    }

    #[test]
    fn test_collections() {
        assert_eq!(UserRecord::COLLECTION, "users");
        assert_eq!(TimeLogRecord::COLLECTION, "time_logs");
    }
}
