use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ForYouResult;

/// What the user follows and bookmarks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserPreferences {
    #[serde(default)]
    pub followed_topics: BTreeSet<String>,
    #[serde(default)]
    pub followed_authors: BTreeSet<String>,
    #[serde(default)]
    pub saved_news_resources: BTreeSet<String>,
    #[serde(default)]
    pub onboarding_completed: bool,
}

/// Shared preference set, written back to disk after every change.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    inner: Arc<RwLock<UserPreferences>>,
    path: Option<PathBuf>,
}

// Toggles on a BTreeSet; returns whether membership changed.
fn set_membership(set: &mut BTreeSet<String>, id: &str, member: bool) -> bool {
    if member {
        set.insert(id.to_string())
    } else {
        set.remove(id)
    }
}

async fn read_json_with_tmp_fallback<T: DeserializeOwned + Default>(path: &Path) -> T {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<T>(&bytes) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to parse JSON, trying tmp fallback");
                let tmp = path.with_extension("json.tmp");
                match tokio::fs::read(&tmp).await {
                    Ok(tmp_bytes) => serde_json::from_slice::<T>(&tmp_bytes).unwrap_or_default(),
                    Err(_) => Default::default(),
                }
            }
        },
        Err(_) => Default::default(),
    }
}

impl PreferencesStore {
    pub fn in_memory(initial: UserPreferences) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
            path: None,
        }
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let prefs: UserPreferences = read_json_with_tmp_fallback(&path).await;
        Self {
            inner: Arc::new(RwLock::new(prefs)),
            path: Some(path),
        }
    }

    pub async fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!(error = %e, "failed to create config dir");
        }
        Self::load_from(dir.join("preferences.json")).await
    }

    pub async fn snapshot(&self) -> UserPreferences {
        self.inner.read().await.clone()
    }

    pub async fn set_topic_followed(&self, topic_id: &str, followed: bool) -> ForYouResult<()> {
        let mut inner = self.inner.write().await;
        let changed = set_membership(&mut inner.followed_topics, topic_id, followed);
        drop(inner);
        self.persist_if(changed).await
    }

    pub async fn set_author_followed(&self, author_id: &str, followed: bool) -> ForYouResult<()> {
        let mut inner = self.inner.write().await;
        let changed = set_membership(&mut inner.followed_authors, author_id, followed);
        drop(inner);
        self.persist_if(changed).await
    }

    pub async fn set_news_resource_saved(
        &self,
        news_resource_id: &str,
        saved: bool,
    ) -> ForYouResult<()> {
        let mut inner = self.inner.write().await;
        let changed = set_membership(&mut inner.saved_news_resources, news_resource_id, saved);
        drop(inner);
        self.persist_if(changed).await
    }

    pub async fn complete_onboarding(&self) -> ForYouResult<()> {
        let mut inner = self.inner.write().await;
        let changed = !inner.onboarding_completed;
        inner.onboarding_completed = true;
        drop(inner);
        self.persist_if(changed).await
    }

    /// Writes the in-memory set to disk, e.g. after an earlier write failed.
    pub async fn flush(&self) -> ForYouResult<()> {
        self.persist().await
    }

    async fn persist_if(&self, changed: bool) -> ForYouResult<()> {
        if changed {
            self.persist().await
        } else {
            debug!("preferences unchanged");
            Ok(())
        }
    }

    // The in-memory set stays authoritative when a write fails; the file on
    // disk is only replaced once the temp copy is fully written.
    async fn persist(&self) -> ForYouResult<()> {
        let Some(path) = &self.path else {
            debug!("preferences are in-memory only; skipping persist");
            return Ok(());
        };
        let bytes = {
            let inner = self.inner.read().await;
            serde_json::to_vec_pretty(&*inner)?
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(error = %e, path = %parent.display(), "failed to create preferences dir");
            }
        }
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            warn!(error = %e, path = %tmp.display(), "failed to write temp preferences.json");
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            warn!(error = %e, path = %path.display(), "failed to persist preferences.json");
            return Err(e.into());
        }
        Ok(())
    }
}
