//! src/store.rs

use crate::errors::StoreError;
use crate::models::{VideoDraft, VideoRecord};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 视频数据仓库
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn list(&self) -> Result<Vec<VideoRecord>, StoreError>;
    /// 新增一条记录，由仓库分配 ID 和创建时间
    async fn insert(&self, draft: VideoDraft) -> Result<VideoRecord, StoreError>;
    /// 整体替换一条记录的内容，ID 和创建时间保持不变
    async fn update(&self, id: &str, draft: VideoDraft) -> Result<VideoRecord, StoreError>;
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// 以 JSON 数组形式保存在单个文件中的仓库
pub struct JsonVideoStore {
    path: PathBuf,
}

impl JsonVideoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 从导出的 JSON 文件追加记录，返回导入的条数。
    /// 缺少 ID 或与已有 ID 冲突的记录会重新分配 ID。
    pub async fn import(&self, source: &Path) -> Result<usize, StoreError> {
        let content = fs::read_to_string(source).await?;
        let incoming: Vec<VideoRecord> = serde_json::from_str(&content)?;

        let mut records = self.load().await?;
        let imported = incoming.len();
        for mut record in incoming {
            if record.id.trim().is_empty() || records.iter().any(|r| r.id == record.id) {
                record.id = next_id(&records);
            }
            records.push(record);
        }
        self.save(&records).await?;
        log::info!("imported {imported} records from {}", source.display());
        Ok(imported)
    }

    async fn load(&self) -> Result<Vec<VideoRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, records: &[VideoRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// 以插入时的毫秒时间戳作为 ID，冲突时递增
fn next_id(existing: &[VideoRecord]) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    while existing.iter().any(|r| r.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[async_trait]
impl VideoStore for JsonVideoStore {
    async fn list(&self) -> Result<Vec<VideoRecord>, StoreError> {
        self.load().await
    }

    async fn insert(&self, draft: VideoDraft) -> Result<VideoRecord, StoreError> {
        let mut records = self.load().await?;
        let record = VideoRecord::new(next_id(&records), Utc::now(), draft);
        records.push(record.clone());
        self.save(&records).await?;
        log::debug!("inserted video record {}", record.id);
        Ok(record)
    }

    async fn update(&self, id: &str, draft: VideoDraft) -> Result<VideoRecord, StoreError> {
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.draft = draft;
        let updated = record.clone();
        self.save(&records).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save(&records).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn draft(title: &str, views: u64) -> VideoDraft {
        VideoDraft {
            title: title.to_string(),
            views,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_collection() {
        let dir = tempdir().unwrap();
        let store = JsonVideoStore::new(dir.path().join("videos.json"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let dir = tempdir().unwrap();
        let store = JsonVideoStore::new(dir.path().join("nested").join("videos.json"));
        let a = store.insert(draft("a", 1)).await.unwrap();
        let b = store.insert(draft("b", 2)).await.unwrap();
        assert_ne!(a.id, b.id);

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "a");
        assert_eq!(listed[1].views, 2);
    }

    #[tokio::test]
    async fn update_replaces_content_but_keeps_identity() {
        let dir = tempdir().unwrap();
        let store = JsonVideoStore::new(dir.path().join("videos.json"));
        let original = store.insert(draft("旧标题", 10)).await.unwrap();

        let updated = store.update(&original.id, draft("新标题", 99)).await.unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.title, "新标题");

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].views, 99);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_fail() {
        let dir = tempdir().unwrap();
        let store = JsonVideoStore::new(dir.path().join("videos.json"));
        assert!(matches!(
            store.update("nope", draft("x", 1)).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(store.delete("nope").await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let dir = tempdir().unwrap();
        let store = JsonVideoStore::new(dir.path().join("videos.json"));
        let a = store.insert(draft("a", 1)).await.unwrap();
        let b = store.insert(draft("b", 2)).await.unwrap();

        store.delete(&a.id).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, b.id);
    }

    #[tokio::test]
    async fn import_reassigns_missing_and_duplicate_ids() {
        let dir = tempdir().unwrap();
        let store = JsonVideoStore::new(dir.path().join("videos.json"));
        let existing = store.insert(draft("已有", 1)).await.unwrap();

        let export = dir.path().join("export.json");
        let payload = format!(
            r#"[
                {{"id": "{}", "title": "重复", "views": "10"}},
                {{"title": "无ID", "views": 20, "keywords": "保洁,收纳"}}
            ]"#,
            existing.id
        );
        std::fs::write(&export, payload).unwrap();

        assert_eq!(store.import(&export).await.unwrap(), 2);
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_ne!(listed[1].id, existing.id);
        assert!(!listed[2].id.is_empty());
        assert_ne!(listed[1].id, listed[2].id);
        assert_eq!(listed[2].keywords, vec!["保洁", "收纳"]);
    }
}
