//! 本地化模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制。翻译、遍历和同步过程本身是全函数，
//! 只有词典构建、配置加载、偏好持久化和 HTML 解析/序列化会产生错误。

use std::fmt;

use thiserror::Error;

use super::locale::Direction;

/// 本地化错误类型
#[derive(Error, Debug)]
pub enum TranslationError {
    /// IO 错误（偏好文件、输入输出文件）
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 偏好文件 JSON 错误
    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 词条无效（空短语或两侧相同）
    #[error("词条无效: {0}")]
    InvalidEntry(String),

    /// 同一源短语对应了不同的目标短语
    #[error("源短语重复: '{source_phrase}' 已映射到 '{existing}'，不能再映射到 '{rejected}'")]
    DuplicateSource {
        source_phrase: String,
        existing: String,
        rejected: String,
    },

    /// 反向映射歧义（仅严格模式）
    #[error("反向映射歧义: '{target_phrase}' 同时来自 '{first}' 和 '{second}'")]
    AmbiguousReverse {
        target_phrase: String,
        first: String,
        second: String,
    },

    /// 译文中含有同方向的待替换短语，重复翻译会继续改写
    #[error("词条链式替换 ({direction:?}): '{from}' → '{to}' 的译文包含短语 '{phrase}'")]
    ChainedEntry {
        direction: Direction,
        from: String,
        to: String,
        phrase: String,
    },

    /// 模式规则编译失败
    #[error("模式规则无效: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// HTML 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::Io(_) => ErrorSeverity::Warning,
            TranslationError::Json(_) => ErrorSeverity::Warning,
            TranslationError::Config(_) => ErrorSeverity::Critical,
            TranslationError::InvalidEntry(_) => ErrorSeverity::Error,
            TranslationError::DuplicateSource { .. } => ErrorSeverity::Error,
            TranslationError::AmbiguousReverse { .. } => ErrorSeverity::Error,
            TranslationError::ChainedEntry { .. } => ErrorSeverity::Error,
            TranslationError::InvalidPattern(_) => ErrorSeverity::Critical,
            TranslationError::Parse(_) => ErrorSeverity::Error,
            TranslationError::Serialization(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::Io(_) => ErrorCategory::Storage,
            TranslationError::Json(_) => ErrorCategory::Storage,
            TranslationError::Config(_) => ErrorCategory::Configuration,
            TranslationError::InvalidEntry(_)
            | TranslationError::DuplicateSource { .. }
            | TranslationError::AmbiguousReverse { .. }
            | TranslationError::ChainedEntry { .. }
            | TranslationError::InvalidPattern(_) => ErrorCategory::Lexicon,
            TranslationError::Parse(_) => ErrorCategory::Parsing,
            TranslationError::Serialization(_) => ErrorCategory::Serialization,
        }
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::Config(format!("TOML解析错误: {}", error))
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Lexicon,
    Storage,
    Parsing,
    Serialization,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Lexicon => "lexicon",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Parsing => "parsing",
            ErrorCategory::Serialization => "serialization",
        };
        write!(f, "{}", name)
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 记录错误日志，按严重程度选择日志级别
pub fn log_error(error: &TranslationError) {
    match error.severity() {
        ErrorSeverity::Info => tracing::info!(category = %error.category(), "{}", error),
        ErrorSeverity::Warning => tracing::warn!(category = %error.category(), "{}", error),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            tracing::error!(category = %error.category(), "{}", error)
        }
    }
}
