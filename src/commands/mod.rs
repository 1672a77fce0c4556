pub mod chat;
pub mod hotspots;
pub mod init;
pub mod pay;
pub mod records;
pub mod stats;

use crate::config::{self, Config};
use crate::store::JsonVideoStore;
use anyhow::Result;

/// 读取配置并打开视频数据仓库
pub async fn open_store() -> Result<(Config, JsonVideoStore)> {
    let config = config::load_config().await?;
    let store = JsonVideoStore::new(config::data_file(&config).await?);
    log::debug!("using data file {}", store.path().display());
    Ok((config, store))
}
