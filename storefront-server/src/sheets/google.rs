//! Google Sheets REST client
//!
//! - open-by-name: Drive v3 file search on the exact title
//! - column read: Sheets v4 `values.get` with `majorDimension=COLUMNS`
//! - row append: Sheets v4 `values.append` (`RAW`, `INSERT_ROWS`)
//!
//! The resolved spreadsheet id and first worksheet title are cached after the
//! first successful lookup. A 404 from the Sheets API drops the cache so a
//! deleted or renamed document is reported as not found.

use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::auth::{ServiceAccountKey, TokenProvider};
use super::{ProductSheet, SheetError};
use crate::core::config::SheetsConfig;

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Spreadsheet id plus the title of its first worksheet
#[derive(Debug, Clone)]
struct Worksheet {
    spreadsheet_id: String,
    title: String,
}

impl Worksheet {
    /// A1 range covering one whole column, e.g. `'Sheet1'!B:B`
    fn column_range(&self, col: usize) -> Result<String, SheetError> {
        let letters = column_letters(col).ok_or(SheetError::InvalidColumn(col))?;
        Ok(format!("{}!{letters}:{letters}", quote_title(&self.title)))
    }
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default)]
    index: u32,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    #[serde(default)]
    updates: Option<AppendUpdates>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    #[serde(default)]
    updated_range: Option<String>,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// Product sheet backed by a Google Sheets document
#[derive(Debug)]
pub struct GoogleSheets {
    http: reqwest::Client,
    tokens: TokenProvider,
    sheets_api: String,
    drive_api: String,
    spreadsheet_name: String,
    worksheet: RwLock<Option<Worksheet>>,
}

impl GoogleSheets {
    /// Build a client from the configured service-account key
    ///
    /// Nothing is fetched here; the document is looked up on first use.
    pub fn new(config: &SheetsConfig, http: reqwest::Client) -> Result<Self, SheetError> {
        let key = ServiceAccountKey::from_file(&config.credentials_path)?;
        Self::with_key(config, key, http)
    }

    /// Build a client from an already loaded key
    pub fn with_key(
        config: &SheetsConfig,
        key: ServiceAccountKey,
        http: reqwest::Client,
    ) -> Result<Self, SheetError> {
        let tokens = TokenProvider::new(key, http.clone())?;

        tracing::info!(
            client_email = %tokens.client_email(),
            spreadsheet = %config.spreadsheet_name,
            "Google Sheets client ready"
        );

        Ok(Self {
            http,
            tokens,
            sheets_api: config.sheets_api_base.clone(),
            drive_api: config.drive_api_base.clone(),
            spreadsheet_name: config.spreadsheet_name.clone(),
            worksheet: RwLock::new(None),
        })
    }

    /// Resolve the spreadsheet by title, cached after the first success
    async fn open(&self) -> Result<Worksheet, SheetError> {
        if let Some(worksheet) = self.worksheet.read().await.as_ref() {
            return Ok(worksheet.clone());
        }

        let mut cached = self.worksheet.write().await;
        if let Some(worksheet) = cached.as_ref() {
            return Ok(worksheet.clone());
        }

        let spreadsheet_id = self.find_spreadsheet_id().await?;
        let title = self.first_worksheet_title(&spreadsheet_id).await?;

        tracing::info!(
            spreadsheet = %self.spreadsheet_name,
            spreadsheet_id = %spreadsheet_id,
            worksheet = %title,
            "Opened spreadsheet"
        );

        let worksheet = Worksheet {
            spreadsheet_id,
            title,
        };
        *cached = Some(worksheet.clone());
        Ok(worksheet)
    }

    async fn find_spreadsheet_id(&self) -> Result<String, SheetError> {
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            escape_drive_literal(&self.spreadsheet_name)
        );

        let request = self.http.get(&self.drive_api).query(&[
            ("q", query.as_str()),
            ("fields", "files(id,name)"),
            ("pageSize", "1"),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ]);

        let list: DriveFileList = self.send(request).await?;
        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SheetError::SpreadsheetNotFound(self.spreadsheet_name.clone()))
    }

    async fn first_worksheet_title(&self, spreadsheet_id: &str) -> Result<String, SheetError> {
        let url = api_url(&self.sheets_api, &[spreadsheet_id])?;
        let request = self
            .http
            .get(url)
            .query(&[("fields", "sheets.properties(title,index)")]);

        let meta: SpreadsheetMeta = self.send(request).await?;
        meta.sheets
            .into_iter()
            .map(|s| s.properties)
            .min_by_key(|p| p.index)
            .map(|p| p.title)
            .ok_or(SheetError::NoWorksheet)
    }

    /// Attach a bearer token, send, and decode the JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetError> {
        let token = self.tokens.access_token().await?;
        let resp = request.bearer_auth(token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.json::<GoogleErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
            };
            return Err(SheetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Map a 404 on a cached document to not-found and forget the cache
    async fn forget_on_missing(&self, err: SheetError) -> SheetError {
        match err {
            SheetError::Api { status: 404, .. } => {
                self.worksheet.write().await.take();
                tracing::warn!(
                    spreadsheet = %self.spreadsheet_name,
                    "Cached spreadsheet is gone, lookup will be retried"
                );
                SheetError::SpreadsheetNotFound(self.spreadsheet_name.clone())
            }
            other => other,
        }
    }
}

#[async_trait::async_trait]
impl ProductSheet for GoogleSheets {
    async fn col_values(&self, col: usize) -> Result<Vec<String>, SheetError> {
        let worksheet = self.open().await?;
        let range = worksheet.column_range(col)?;
        let url = api_url(&self.sheets_api, &[&worksheet.spreadsheet_id, "values", &range])?;
        let request = self.http.get(url).query(&[("majorDimension", "COLUMNS")]);

        match self.send::<ValueRange>(request).await {
            Ok(value_range) => Ok(value_range.values.into_iter().next().unwrap_or_default()),
            Err(e) => Err(self.forget_on_missing(e).await),
        }
    }

    async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError> {
        let worksheet = self.open().await?;
        let target = format!("{}:append", quote_title(&worksheet.title));
        let url = api_url(&self.sheets_api, &[&worksheet.spreadsheet_id, "values", &target])?;
        let request = self
            .http
            .post(url)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&serde_json::json!({ "values": [row] }));

        match self.send::<AppendResponse>(request).await {
            Ok(resp) => {
                tracing::debug!(
                    updated_range = ?resp.updates.and_then(|u| u.updated_range),
                    "Row appended"
                );
                Ok(())
            }
            Err(e) => Err(self.forget_on_missing(e).await),
        }
    }
}

/// Build a Sheets API url from path segments, percent-encoding each one
fn api_url(base: &str, segments: &[&str]) -> Result<Url, SheetError> {
    let mut url = Url::parse(base).map_err(|e| SheetError::Url(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SheetError::Url(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Convert a 1-based column index to A1 letters (1 → A, 27 → AA)
pub fn column_letters(col: usize) -> Option<String> {
    if col == 0 {
        return None;
    }

    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).ok()
}

/// Quote a worksheet title for A1 notation
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Escape a string literal for a Drive search query
fn escape_drive_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};

    use super::*;
    use crate::core::config::{DEFAULT_DRIVE_API, DEFAULT_SHEETS_API};

    /// In-memory stand-in for the Drive, Sheets and token endpoints
    struct FakeGoogle {
        /// Spreadsheet ids the Drive search returns
        drive_files: Mutex<Vec<String>>,
        drive_calls: AtomicUsize,
        /// Status answered by `values.get`
        values_status: Mutex<StatusCode>,
    }

    impl Default for FakeGoogle {
        fn default() -> Self {
            Self {
                drive_files: Mutex::default(),
                drive_calls: AtomicUsize::new(0),
                values_status: Mutex::new(StatusCode::OK),
            }
        }
    }

    impl FakeGoogle {
        fn publish(&self, spreadsheet_id: &str) {
            self.drive_files.lock().unwrap().push(spreadsheet_id.to_string());
        }

        fn answer_values_with(&self, status: StatusCode) {
            *self.values_status.lock().unwrap() = status;
        }

        fn drive_calls(&self) -> usize {
            self.drive_calls.load(Ordering::SeqCst)
        }
    }

    async fn token() -> Json<Value> {
        Json(json!({"access_token": "test-token", "expires_in": 3600, "token_type": "Bearer"}))
    }

    async fn drive_files(State(fake): State<Arc<FakeGoogle>>) -> Json<Value> {
        fake.drive_calls.fetch_add(1, Ordering::SeqCst);
        let files: Vec<Value> = fake
            .drive_files
            .lock()
            .unwrap()
            .iter()
            .map(|id| json!({"id": id, "name": "db-tienda"}))
            .collect();
        Json(json!({ "files": files }))
    }

    async fn spreadsheet_meta() -> Json<Value> {
        Json(json!({"sheets": [{"properties": {"title": "Hoja 1", "index": 0}}]}))
    }

    async fn column_values(State(fake): State<Arc<FakeGoogle>>) -> (StatusCode, Json<Value>) {
        let status = *fake.values_status.lock().unwrap();
        if status.is_success() {
            return (
                status,
                Json(json!({"range": "'Hoja 1'!B1:B2", "majorDimension": "COLUMNS", "values": [["a", "b"]]})),
            );
        }
        let message = if status == StatusCode::NOT_FOUND {
            "Requested entity was not found."
        } else {
            "Internal error encountered."
        };
        (
            status,
            Json(json!({"error": {"code": status.as_u16(), "message": message, "status": "ERROR"}})),
        )
    }

    /// Serve the fake APIs on a local port, returning the base url
    async fn spawn_fake_google(fake: Arc<FakeGoogle>) -> String {
        let app = axum::Router::new()
            .route("/token", post(token))
            .route("/drive/files", get(drive_files))
            .route("/sheets/{id}", get(spreadsheet_meta))
            .route("/sheets/{id}/values/{range}", get(column_values))
            .with_state(fake);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    fn client(base: &str) -> GoogleSheets {
        let config = SheetsConfig {
            credentials_path: "unused.json".into(),
            spreadsheet_name: "db-tienda".into(),
            skip_header: true,
            sheets_api_base: format!("{base}/sheets"),
            drive_api_base: format!("{base}/drive/files"),
        };
        let key = ServiceAccountKey {
            client_email: "catalog@test-project.iam.gserviceaccount.com".into(),
            private_key: include_str!("testdata/service_account_key.pem").into(),
            private_key_id: Some("test-key".into()),
            token_uri: format!("{base}/token"),
        };
        GoogleSheets::with_key(&config, key, reqwest::Client::new()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_spreadsheet_is_not_cached() {
        let fake = Arc::new(FakeGoogle::default());
        let sheets = client(&spawn_fake_google(fake.clone()).await);

        let err = sheets.col_values(2).await.unwrap_err();
        assert!(
            matches!(&err, SheetError::SpreadsheetNotFound(name) if name == "db-tienda"),
            "{err}"
        );
        assert_eq!(fake.drive_calls(), 1);

        fake.publish("sheet-1");
        assert_eq!(sheets.col_values(2).await.unwrap(), ["a", "b"]);
        assert_eq!(fake.drive_calls(), 2);

        // Resolved document is reused
        sheets.col_values(3).await.unwrap();
        assert_eq!(fake.drive_calls(), 2);
    }

    #[tokio::test]
    async fn test_deleted_spreadsheet_clears_cache() {
        let fake = Arc::new(FakeGoogle::default());
        fake.publish("sheet-1");
        let sheets = client(&spawn_fake_google(fake.clone()).await);

        sheets.col_values(2).await.unwrap();
        assert_eq!(fake.drive_calls(), 1);

        fake.answer_values_with(StatusCode::NOT_FOUND);
        let err = sheets.col_values(2).await.unwrap_err();
        assert!(matches!(err, SheetError::SpreadsheetNotFound(_)), "{err}");

        fake.answer_values_with(StatusCode::OK);
        sheets.col_values(2).await.unwrap();
        assert_eq!(fake.drive_calls(), 2);
    }

    #[tokio::test]
    async fn test_google_error_body_surfaces_as_api_error() {
        let fake = Arc::new(FakeGoogle::default());
        fake.publish("sheet-1");
        fake.answer_values_with(StatusCode::INTERNAL_SERVER_ERROR);
        let sheets = client(&spawn_fake_google(fake.clone()).await);

        match sheets.col_values(2).await.unwrap_err() {
            SheetError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal error encountered.");
            }
            other => panic!("unexpected error: {other}"),
        }

        // Non-404 failures keep the resolved document
        sheets.col_values(2).await.unwrap_err();
        assert_eq!(fake.drive_calls(), 1);
    }

    #[test]
    fn test_default_api_bases() {
        assert!(DEFAULT_DRIVE_API.ends_with("/drive/v3/files"));
        assert!(api_url(DEFAULT_SHEETS_API, &["id"]).is_ok());
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), None);
        assert_eq!(column_letters(1).as_deref(), Some("A"));
        assert_eq!(column_letters(4).as_deref(), Some("D"));
        assert_eq!(column_letters(26).as_deref(), Some("Z"));
        assert_eq!(column_letters(27).as_deref(), Some("AA"));
        assert_eq!(column_letters(52).as_deref(), Some("AZ"));
        assert_eq!(column_letters(703).as_deref(), Some("AAA"));
    }

    #[test]
    fn test_column_range_quotes_title() {
        let worksheet = Worksheet {
            spreadsheet_id: "abc".into(),
            title: "Hoja 1".into(),
        };
        assert_eq!(worksheet.column_range(2).unwrap(), "'Hoja 1'!B:B");

        let worksheet = Worksheet {
            spreadsheet_id: "abc".into(),
            title: "Bob's".into(),
        };
        assert_eq!(worksheet.column_range(3).unwrap(), "'Bob''s'!C:C");
        assert!(matches!(
            worksheet.column_range(0),
            Err(SheetError::InvalidColumn(0))
        ));
    }

    #[test]
    fn test_api_url_encodes_segments() {
        let url = api_url(DEFAULT_SHEETS_API, &["sheet-id", "values", "'Hoja 1'!B:B"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/'Hoja%201'!B:B"
        );

        let url = api_url("http://127.0.0.1:9/sheets/", &["abc"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/sheets/abc");
    }

    #[test]
    fn test_escape_drive_literal() {
        assert_eq!(escape_drive_literal("db-tienda"), "db-tienda");
        assert_eq!(escape_drive_literal("it's"), "it\\'s");
    }

    #[test]
    fn test_value_range_without_values() {
        let range: ValueRange =
            serde_json::from_str(r#"{"range":"Sheet1!B1:B1000","majorDimension":"COLUMNS"}"#)
                .unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn test_first_worksheet_by_index() {
        let meta: SpreadsheetMeta = serde_json::from_str(
            r#"{"sheets":[
                {"properties":{"title":"Archive","index":1}},
                {"properties":{"title":"Sheet1"}}
            ]}"#,
        )
        .unwrap();
        let first = meta
            .sheets
            .into_iter()
            .map(|s| s.properties)
            .min_by_key(|p| p.index)
            .unwrap();
        assert_eq!(first.title, "Sheet1");
    }
}
