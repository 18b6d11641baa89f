use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Contract of the remote JSON document store.
///
/// Per collection `C` and record id `id`:
/// - `GET {base}/C.json` returns a map of id to record, or JSON `null` when
///   the collection is empty.
/// - `POST {base}/C.json` creates a record; the store assigns the id and
///   returns it as `{"name": "<id>"}`.
/// - `PATCH {base}/C/{id}.json` merges the given fields into the record.
/// - `DELETE {base}/C/{id}.json` removes the record.
///
/// The store enforces no schema and no referential integrity; writes are
/// last-write-wins.
pub trait RemoteStore {
    /// Whole-collection read. `None` means the collection is empty.
    fn get_all(&self, collection: &str) -> Result<Option<Value>>;

    /// Single-record read. `None` means the record does not exist.
    fn get_one(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Create a record and return the store-assigned id.
    fn create(&self, collection: &str, record: &Value) -> Result<String>;

    /// Merge the fields of `patch` into an existing record.
    fn update(&self, collection: &str, id: &str, patch: &Value) -> Result<()>;

    /// Remove a record. Removing an absent record is not an error.
    fn remove(&self, collection: &str, id: &str) -> Result<()>;
}

/// Production implementation over plain HTTP.
pub struct HttpStore {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(HttpStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}.json", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}.json", self.base_url, collection, id)
    }

    fn get(&self, url: String) -> Result<Option<Value>> {
        let value: Value = self
            .client
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("GET {} failed", url))?
            .json()
            .with_context(|| format!("Invalid JSON from {}", url))?;

        // The store answers `null` for anything that does not exist.
        Ok(if value.is_null() { None } else { Some(value) })
    }
}

#[derive(Deserialize)]
struct CreateResponse {
    name: String,
}

impl RemoteStore for HttpStore {
    fn get_all(&self, collection: &str) -> Result<Option<Value>> {
        self.get(self.collection_url(collection))
    }

    fn get_one(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.get(self.record_url(collection, id))
    }

    fn create(&self, collection: &str, record: &Value) -> Result<String> {
        let url = self.collection_url(collection);
        let response: CreateResponse = self
            .client
            .post(&url)
            .json(record)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("POST {} failed", url))?
            .json()
            .with_context(|| format!("Invalid create response from {}", url))?;

        Ok(response.name)
    }

    fn update(&self, collection: &str, id: &str, patch: &Value) -> Result<()> {
        let url = self.record_url(collection, id);
        self.client
            .patch(&url)
            .json(patch)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("PATCH {} failed", url))?;

        Ok(())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.record_url(collection, id);
        self.client
            .delete(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("DELETE {} failed", url))?;

        Ok(())
    }
}
