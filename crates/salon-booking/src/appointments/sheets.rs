use google_sheets4::api::{Scope, ValueRange};
use google_sheets4::{hyper_rustls, hyper_util, yup_oauth2, Sheets};
use serde_json::{json, Value};
use tracing::debug;

use super::store::{RowStore, StoreError};
use crate::config::SheetsConfig;

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Rows are interpreted by Sheets as if typed into the UI, so dates and
/// times stay sortable in the spreadsheet.
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;

/// Appends booking rows to a fixed range of one spreadsheet through the
/// generated google-sheets4 client.
pub struct GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    hub: Sheets<C>,
    spreadsheet_id: String,
    range: String,
}

impl<C> GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    pub fn new(hub: Sheets<C>, spreadsheet_id: String, range: String) -> Self {
        Self {
            hub,
            spreadsheet_id,
            range,
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    fn map_error<E: std::fmt::Display>(err: E) -> StoreError {
        StoreError::Backend(err.to_string())
    }
}

impl GoogleSheetsStore<HttpsConnector> {
    /// Authenticate with the configured service account and build the hub.
    pub async fn connect(config: &SheetsConfig) -> Result<Self, StoreError> {
        let key: yup_oauth2::ServiceAccountKey = serde_json::from_value(json!({
            "type": "service_account",
            "client_email": config.client_email,
            "private_key": config.private_key,
            "token_uri": GOOGLE_TOKEN_URI,
        }))
        .map_err(|err| StoreError::Auth(err.to_string()))?;

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|err| StoreError::Auth(err.to_string()))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(Self::map_error)?
            .https_or_http()
            .enable_http1()
            .build();
        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build(connector);

        Ok(Self::new(
            Sheets::new(client, auth),
            config.spreadsheet_id.clone(),
            config.range.clone(),
        ))
    }
}

impl<C> std::fmt::Debug for GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsStore")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl<C> RowStore for GoogleSheetsStore<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    async fn append_row(&self, row: Vec<String>) -> Result<(), StoreError> {
        let request = ValueRange {
            values: Some(vec![row.into_iter().map(Value::String).collect()]),
            ..ValueRange::default()
        };

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_append(request, &self.spreadsheet_id, &self.range)
            .value_input_option(VALUE_INPUT_OPTION)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(Self::map_error)?;

        let updated_range = response
            .updates
            .and_then(|updates| updates.updated_range)
            .unwrap_or_default();
        debug!(%updated_range, "sheet row appended");
        Ok(())
    }
}
