use std::collections::HashMap;

use tokio::sync::RwLock;

use vitrine_core::session::{BehaviorSnapshot, SearchSnapshot};

use super::{BehaviorStateRepository, RepositoryError, SearchStateRepository};

#[derive(Default)]
pub struct InMemoryBehaviorStateRepository {
    snapshots: RwLock<HashMap<String, BehaviorSnapshot>>,
}

#[async_trait::async_trait]
impl BehaviorStateRepository for InMemoryBehaviorStateRepository {
    async fn load(&self, user_key: &str) -> Result<Option<BehaviorSnapshot>, RepositoryError> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.get(user_key).cloned())
    }

    async fn save(
        &self,
        user_key: &str,
        snapshot: &BehaviorSnapshot,
    ) -> Result<(), RepositoryError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(user_key.to_string(), snapshot.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySearchStateRepository {
    snapshots: RwLock<HashMap<String, SearchSnapshot>>,
}

#[async_trait::async_trait]
impl SearchStateRepository for InMemorySearchStateRepository {
    async fn load(&self, user_key: &str) -> Result<Option<SearchSnapshot>, RepositoryError> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.get(user_key).cloned())
    }

    async fn save(&self, user_key: &str, snapshot: &SearchSnapshot) -> Result<(), RepositoryError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(user_key.to_string(), snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn behavior_snapshots_round_trip() {
        let repo = InMemoryBehaviorStateRepository::default();
        let snapshot = BehaviorSnapshot::default();

        repo.save("user-1", &snapshot).await.expect("save");
        let loaded = repo.load("user-1").await.expect("load");
        assert_eq!(loaded, Some(snapshot));
    }

    #[tokio::test]
    async fn search_snapshots_are_keyed_per_user() {
        let repo = InMemorySearchStateRepository::default();
        let snapshot = SearchSnapshot {
            recent_searches: vec!["lamp".to_string()],
            search_history: Vec::new(),
        };

        repo.save("user-1", &snapshot).await.expect("save");
        assert!(repo.load("user-2").await.expect("load").is_none());
        assert_eq!(repo.load("user-1").await.expect("load"), Some(snapshot));
    }
}
