//! JSON-file session store.
//!
//! One pretty-printed snapshot per session id, written atomically enough
//! for an audit trail: the whole file is rewritten on every save.

use async_trait::async_trait;
use colloquy_application::ports::session_store::{SessionStore, StoreError};
use colloquy_domain::DialogueSession;
use std::path::{Path, PathBuf};

/// Session store persisting snapshots as `<dir>/<session-id>.json`
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn save(&self, session: &DialogueSession) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        let encoded = serde_json::to_string_pretty(session)
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        tokio::fs::write(self.path_for(session.id()), encoded)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn load(&self, id: &str) -> Result<DialogueSession, StoreError> {
        let path = self.path_for(id);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|_| StoreError::NotFound(id.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StoreError::Encode(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // A store that was never written to is simply empty.
            Err(_) => return Ok(ids),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_domain::builtin_roster;

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path());

        let session = DialogueSession::new("dlg-roundtrip", builtin_roster());
        store.save(&session).await.unwrap();

        let loaded = store.load("dlg-roundtrip").await.unwrap();
        assert_eq!(loaded.id(), "dlg-roundtrip");
        assert_eq!(loaded.participants().len(), 5);
        assert_eq!(loaded.cycle(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path());

        assert!(matches!(
            store.load("nope").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path());

        store
            .save(&DialogueSession::new("dlg-b", builtin_roster()))
            .await
            .unwrap();
        store
            .save(&DialogueSession::new("dlg-a", builtin_roster()))
            .await
            .unwrap();

        let ids = store.list().await.unwrap();
        assert_eq!(ids, vec!["dlg-a", "dlg-b"]);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let store = JsonFileSessionStore::new("/nonexistent/colloquy-store");
        assert!(store.list().await.unwrap().is_empty());
    }
}
