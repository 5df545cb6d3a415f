use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::entities::TOKEN_KEY;
use crate::domain::errors::StoreError;
use crate::domain::ports::TokenStore;

// Process-local token slot; gone when the process exits.
#[derive(Default)]
pub struct InMemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn set(&self, token: String) -> Result<(), StoreError> {
        *self.token.lock().await = Some(token);
        Ok(())
    }

    async fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token.lock().await.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock().await = None;
        Ok(())
    }
}

// Durable key-value file, a JSON object with the token under `auth_token`.
// Other keys in the file are preserved.
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt("expected a json object".to_string())),
            Err(err) => Err(StoreError::Corrupt(err.to_string())),
        }
    }

    async fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::Io(err.to_string()))?;
        }
        let body = serde_json::to_string_pretty(map)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        // Write a sibling file then rename it over the target, so readers see
        // either the old contents or the new ones.
        let tmp = self.temp_path();
        let written = write_private(&tmp, body.as_bytes()).await;
        let result = match written {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(err) => Err(err),
        };
        if result.is_err() {
            let _ = tokio::fs::remove_file(&tmp).await;
        }
        result.map_err(|err| StoreError::Io(err.to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

// Owner-only on unix; the file holds a bearer token.
async fn write_private(path: &std::path::Path, body: &[u8]) -> std::io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Err(err) if err.kind() != ErrorKind::NotFound => return Err(err),
        _ => {}
    }
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.sync_all().await
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn set(&self, token: String) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        map.insert(TOKEN_KEY.to_string(), Value::String(token));
        self.save(&map).await
    }

    async fn get(&self) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let map = self.load().await?;
        match map.get(TOKEN_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) => Ok(Some(token.clone())),
            Some(_) => Err(StoreError::Corrupt(format!("`{TOKEN_KEY}` is not a string"))),
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.save(&map).await
    }
}
