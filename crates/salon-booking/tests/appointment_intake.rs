use std::sync::{Arc, Mutex};

use salon_booking::appointments::{
    AppointmentIntake, AppointmentSubmission, IntakeError, MailError, Mailer, OutboundEmail,
    RowStore, StoreError,
};

#[derive(Default)]
struct FakeSheet {
    rows: Mutex<Vec<Vec<String>>>,
}

impl RowStore for FakeSheet {
    async fn append_row(&self, row: Vec<String>) -> Result<(), StoreError> {
        self.rows.lock().expect("sheet mutex").push(row);
        Ok(())
    }
}

struct ExpiredCredentialsSheet;

impl RowStore for ExpiredCredentialsSheet {
    async fn append_row(&self, _row: Vec<String>) -> Result<(), StoreError> {
        Err(StoreError::Auth("invalid_grant: account not found".to_string()))
    }
}

#[derive(Default)]
struct FakeOutbox {
    messages: Mutex<Vec<OutboundEmail>>,
}

impl Mailer for FakeOutbox {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.messages.lock().expect("outbox mutex").push(email);
        Ok(())
    }
}

fn aisha() -> AppointmentSubmission {
    serde_json::from_value(serde_json::json!({
        "name": "Aisha",
        "email": "a@x.com",
        "phone": "0300",
        "service": "Facial",
        "date": "2024-05-01",
        "time": "15:00",
    }))
    .expect("payload deserializes")
}

#[tokio::test]
async fn booking_is_recorded_and_announced() {
    let sheet = Arc::new(FakeSheet::default());
    let outbox = Arc::new(FakeOutbox::default());
    let intake = AppointmentIntake::new(
        Some(sheet.clone()),
        Some(outbox.clone()),
        "owner@nikhaar.test",
    );

    let receipt = intake.submit(aisha()).await.expect("booking accepted");

    let echoed = serde_json::to_value(&receipt.appointment).expect("serializes");
    assert_eq!(
        echoed,
        serde_json::json!({
            "name": "Aisha",
            "email": "a@x.com",
            "phone": "0300",
            "service": "Facial",
            "date": "2024-05-01",
            "time": "15:00",
        })
    );

    let rows = sheet.rows.lock().expect("sheet mutex").clone();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0][1..],
        ["Aisha", "a@x.com", "0300", "Facial", "2024-05-01", "15:00", ""]
    );

    let messages = outbox.messages.lock().expect("outbox mutex").clone();
    assert_eq!(messages.len(), 2);
    let mut recipients: Vec<_> = messages.iter().map(|email| email.to.as_str()).collect();
    recipients.sort_unstable();
    assert_eq!(recipients, vec!["a@x.com", "owner@nikhaar.test"]);
    for email in &messages {
        assert!(email.html_body.contains("Facial"));
        assert!(email.html_body.contains("2024-05-01"));
        assert!(email.html_body.contains("3:00 PM"));
    }
}

#[tokio::test]
async fn credential_failure_surfaces_as_persistence_error() {
    let outbox = Arc::new(FakeOutbox::default());
    let intake = AppointmentIntake::new(
        Some(Arc::new(ExpiredCredentialsSheet)),
        Some(outbox.clone()),
        "owner@nikhaar.test",
    );

    let err = intake.submit(aisha()).await.expect_err("store rejects");

    assert!(matches!(err, IntakeError::Persistence(StoreError::Auth(_))));
    assert!(err.to_string().contains("invalid_grant"));
    assert!(outbox.messages.lock().expect("outbox mutex").is_empty());
}

#[tokio::test]
async fn unknown_fields_are_ignored_and_message_is_optional() {
    let sheet = Arc::new(FakeSheet::default());
    let intake = AppointmentIntake::new(
        Some(sheet.clone()),
        Some(Arc::new(FakeOutbox::default())),
        "owner@nikhaar.test",
    );
    let submission: AppointmentSubmission = serde_json::from_value(serde_json::json!({
        "name": "Sana",
        "email": "sana@example.com",
        "phone": "0311",
        "service": "Bridal Makeup",
        "date": "2024-06-12",
        "time": "10:30 AM",
        "referrer": "instagram",
    }))
    .expect("payload deserializes");

    intake.submit(submission).await.expect("booking accepted");

    let rows = sheet.rows.lock().expect("sheet mutex").clone();
    assert_eq!(rows[0][6], "10:30 AM");
    assert_eq!(rows[0][7], "");
}
