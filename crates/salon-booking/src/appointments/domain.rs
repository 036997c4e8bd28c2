use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Booking form payload as posted by the website.
///
/// Every field is optional on the wire so that an absent value surfaces as a
/// [`MissingFields`] error naming it, instead of a body rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSubmission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Fields a booking cannot be recorded without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Email,
    Phone,
    Service,
    Date,
    Time,
}

impl RequiredField {
    pub const ALL: [RequiredField; 6] = [
        RequiredField::Name,
        RequiredField::Email,
        RequiredField::Phone,
        RequiredField::Service,
        RequiredField::Date,
        RequiredField::Time,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Email => "email",
            RequiredField::Phone => "phone",
            RequiredField::Service => "service",
            RequiredField::Date => "date",
            RequiredField::Time => "time",
        }
    }
}

/// Presence check failure. `received` echoes the required fields that were supplied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", join_labels(.missing))]
pub struct MissingFields {
    pub missing: Vec<RequiredField>,
    pub received: BTreeMap<&'static str, String>,
}

fn join_labels(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppointmentSubmission {
    fn field(&self, field: RequiredField) -> Option<&str> {
        let value = match field {
            RequiredField::Name => &self.name,
            RequiredField::Email => &self.email,
            RequiredField::Phone => &self.phone,
            RequiredField::Service => &self.service,
            RequiredField::Date => &self.date,
            RequiredField::Time => &self.time,
        };
        value.as_deref().filter(|value| !value.is_empty())
    }

    /// Required fields that are absent or empty, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_none())
            .collect()
    }

    /// Presence-only validation. Formats (e-mail syntax, date layout) are accepted as given.
    pub fn validate(self) -> Result<Appointment, MissingFields> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let received = RequiredField::ALL
                .into_iter()
                .filter_map(|field| {
                    self.field(field)
                        .map(|value| (field.label(), value.to_string()))
                })
                .collect();
            return Err(MissingFields { missing, received });
        }

        Ok(Appointment {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            service: self.service.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
        })
    }
}

/// A submission that passed validation. Serializes to the six echoed fields;
/// the free-form message only travels to the spreadsheet and the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing)]
    pub message: String,
}

impl Appointment {
    /// Spreadsheet row: recorded-at, name, email, phone, service, date, time, message.
    pub fn row(&self, recorded_at: &str) -> Vec<String> {
        vec![
            recorded_at.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.service.clone(),
            self.date.clone(),
            self.time.clone(),
            self.message.clone(),
        ]
    }

    pub fn display_time(&self) -> String {
        to_twelve_hour(&self.time)
    }
}

/// Render a 24-hour `H:MM`/`HH:MM` clock value as `h:mm AM|PM`.
///
/// Values already carrying a period, and anything that does not parse, are
/// returned unchanged.
pub fn to_twelve_hour(raw: &str) -> String {
    let upper = raw.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return raw.to_string();
    }

    match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
        Ok(time) => time.format("%-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
