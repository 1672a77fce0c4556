use thiserror::Error;

/// 视频数据存储层的错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("读写数据文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据文件格式错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("找不到 ID 为 {0} 的视频记录")]
    NotFound(String),
}

/// 模拟支付流程的错误
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("缺少必要参数: {0}")]
    MissingParams(&'static str),

    #[error("支付金额必须大于 0")]
    InvalidAmount,
}
