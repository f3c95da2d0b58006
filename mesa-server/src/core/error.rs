use thiserror::Error;

/// 服务器启动/运行错误
///
/// 请求级别的错误使用 [`crate::utils::AppError`]；
/// 这里只覆盖启动阶段的不可恢复失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 核心模块的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
