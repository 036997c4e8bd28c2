use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;
use tokio::sync::Barrier;

use crate::appointments::domain::AppointmentSubmission;
use crate::appointments::mailer::{MailError, Mailer, OutboundEmail};
use crate::appointments::service::AppointmentIntake;
use crate::appointments::store::{RowStore, StoreError};

pub(super) const OPERATOR: &str = "owner@nikhaar.test";

pub(super) fn submission() -> AppointmentSubmission {
    AppointmentSubmission {
        name: Some("Aisha".to_string()),
        email: Some("a@x.com".to_string()),
        phone: Some("0300".to_string()),
        service: Some("Facial".to_string()),
        date: Some("2024-05-01".to_string()),
        time: Some("15:00".to_string()),
        message: None,
    }
}

pub(super) fn build_intake() -> (
    AppointmentIntake<MemoryStore, RecordingMailer>,
    Arc<MemoryStore>,
    Arc<RecordingMailer>,
) {
    let store = Arc::new(MemoryStore::default());
    let mailer = Arc::new(RecordingMailer::default());
    let intake = AppointmentIntake::new(Some(store.clone()), Some(mailer.clone()), OPERATOR);
    (intake, store, mailer)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemoryStore {
    pub(super) fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().expect("store mutex poisoned").clone()
    }
}

impl RowStore for MemoryStore {
    async fn append_row(&self, row: Vec<String>) -> Result<(), StoreError> {
        self.rows.lock().expect("store mutex poisoned").push(row);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl RowStore for UnavailableStore {
    async fn append_row(&self, _row: Vec<String>) -> Result<(), StoreError> {
        Err(StoreError::Backend("The caller does not have permission".to_string()))
    }
}

/// Records every message; sends to addresses in `failing` are rejected.
#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    attempts: AtomicUsize,
    failing: HashSet<String>,
}

impl RecordingMailer {
    pub(super) fn failing_for(addresses: &[&str]) -> Self {
        Self {
            failing: addresses.iter().map(|address| address.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }

    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&email.to) {
            return Err(MailError::Transport("550 mailbox unavailable".to_string()));
        }
        self.sent.lock().expect("mailer mutex poisoned").push(email);
        Ok(())
    }
}

/// Each send waits until both sends are in flight, so a sequential
/// dispatcher never completes.
pub(super) struct BarrierMailer {
    barrier: Barrier,
}

impl Default for BarrierMailer {
    fn default() -> Self {
        Self {
            barrier: Barrier::new(2),
        }
    }
}

impl Mailer for BarrierMailer {
    async fn send(&self, _email: OutboundEmail) -> Result<(), MailError> {
        self.barrier.wait().await;
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
