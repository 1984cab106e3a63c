use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tempfile::TempDir;

// Leading `::` disambiguates the storage crate from this `common` test module.
use ::common::storage::filesystem::FilesystemFileStore;
use server::config::{
    AppConfig, CorsConfig, DEFAULT_ALLOWED_EXTENSIONS, DatabaseConfig, ServerConfig, StorageConfig,
};
use server::state::AppState;

/// Upload size ceiling for tests, kept small so capacity tests stay fast.
pub const TEST_MAX_FILE_SIZE: u64 = 256 * 1024;

pub mod routes {
    pub const REGIONS: &str = "/api/v1/regions";
    pub const SEARCH: &str = "/api/v1/customers/search";
    pub const STATISTICS: &str = "/api/v1/statistics";

    pub fn customers(region: &str) -> String {
        format!("/api/v1/regions/{region}/customers")
    }

    pub fn customer(id: i32) -> String {
        format!("/api/v1/customers/{id}")
    }

    pub fn communications(id: i32) -> String {
        format!("/api/v1/customers/{id}/communications")
    }

    pub fn files(id: i32) -> String {
        format!("/api/v1/customers/{id}/files")
    }

    pub fn file(id: i32, file_id: i32) -> String {
        format!("/api/v1/customers/{id}/files/{file_id}")
    }
}

/// A running test server backed by a tempdir SQLite database and upload dir.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub upload_root: PathBuf,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");

        let db_path = dir.path().join("crm-test.db");
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = server::database::init_db(&db_url)
            .await
            .expect("Failed to initialize test database");

        let upload_root = dir.path().join("uploads");
        let files = FilesystemFileStore::new(upload_root.clone(), TEST_MAX_FILE_SIZE)
            .await
            .expect("Failed to create file store");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: db_url },
            storage: StorageConfig {
                root: upload_root.clone(),
                max_file_size: TEST_MAX_FILE_SIZE,
                allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                    .iter()
                    .map(|e| e.to_string())
                    .collect(),
            },
        };

        let state = AppState {
            db: db.clone(),
            files: Arc::new(files),
            config,
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            upload_root,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_query(&self, path: &str, query: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn upload(
        &self,
        path: &str,
        file_name: &str,
        file_bytes: Vec<u8>,
        description: Option<&str>,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes).file_name(file_name.to_string());
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(desc) = description {
            form = form.text("description", desc.to_string());
        }

        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    /// Create a customer and return its id.
    pub async fn create_customer(&self, region: &str, company_name: &str) -> i32 {
        let body = serde_json::json!({ "company_name": company_name });
        let res = self.post(&routes::customers(region), &body).await;
        assert_eq!(res.status, 201, "Customer creation failed: {}", res.text);
        res.body["id"].as_i64().expect("customer id") as i32
    }

    /// Record a communication for a customer.
    pub async fn add_communication(&self, customer_id: i32, details: &str) -> TestResponse {
        let body = serde_json::json!({ "details": details });
        self.post(&routes::communications(customer_id), &body).await
    }
}
