//! 统一的环境变量管理系统
//!
//! 类型安全、可验证的环境变量访问，命令行参数未给出时作为后备来源

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::translation::Locale;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 未设置时返回默认值（可能为 `None`），设置了但无法解析时报错
    fn get_optional() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) if value.trim().is_empty() => Ok(Self::DEFAULT),
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(Self::DEFAULT),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 强制使用的界面语言
pub struct LocaleOverride;
impl EnvVar<Locale> for LocaleOverride {
    const NAME: &'static str = "DOM_I18N_LOCALE";
    const DEFAULT: Option<Locale> = None;
    const DESCRIPTION: &'static str = "Force the UI locale: en, zh";

    fn parse(value: &str) -> EnvResult<Locale> {
        Locale::from_code(value.trim()).ok_or_else(|| EnvError {
            variable: Self::NAME.to_string(),
            message: format!("Invalid locale '{}'. Use: {}", value, Locale::CODES.join(", ")),
        })
    }
}

const DEFAULT_LOG_LEVEL: &str = "warn";

/// 日志级别
pub struct LogLevel;
impl EnvVar<String> for LogLevel {
    const NAME: &'static str = "DOM_I18N_LOG_LEVEL";
    const DEFAULT: Option<String> = None;
    const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

    fn get() -> EnvResult<String> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    fn parse(value: &str) -> EnvResult<String> {
        match value.trim().to_lowercase().as_str() {
            level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
            _ => Err(EnvError {
                variable: Self::NAME.to_string(),
                message: format!(
                    "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                    value
                ),
            }),
        }
    }
}

/// 偏好文件路径
pub struct PrefsPath;
impl EnvVar<PathBuf> for PrefsPath {
    const NAME: &'static str = "DOM_I18N_PREFS";
    const DEFAULT: Option<PathBuf> = None;
    const DESCRIPTION: &'static str = "Path of the JSON preference file";

    fn parse(value: &str) -> EnvResult<PathBuf> {
        parse_path(value, Self::NAME)
    }
}

/// 配置文件路径
pub struct ConfigPath;
impl EnvVar<PathBuf> for ConfigPath {
    const NAME: &'static str = "DOM_I18N_CONFIG";
    const DEFAULT: Option<PathBuf> = None;
    const DESCRIPTION: &'static str = "Path of the TOML localizer configuration";

    fn parse(value: &str) -> EnvResult<PathBuf> {
        parse_path(value, Self::NAME)
    }
}

fn parse_path(value: &str, var_name: &str) -> EnvResult<PathBuf> {
    let expanded = shellexpand::full(value.trim()).map_err(|e| EnvError {
        variable: var_name.to_string(),
        message: format!("Cannot expand path '{}': {}", value, e),
    })?;
    Ok(PathBuf::from(&*expanded))
}

/// 全部环境变量的快照
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub locale: Option<Locale>,
    pub log_level: String,
    pub prefs_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    /// 已忽略的无效取值，日志初始化后再报告
    pub warnings: Vec<EnvError>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    ///
    /// 日志级别无效时退回默认级别并记入 `warnings`，其余变量无效时报错。
    pub fn from_env() -> EnvResult<Self> {
        let mut warnings = Vec::new();
        let log_level = LogLevel::get().unwrap_or_else(|e| {
            warnings.push(e);
            DEFAULT_LOG_LEVEL.to_string()
        });

        Ok(Self {
            locale: LocaleOverride::get_optional()?,
            log_level,
            prefs_path: PrefsPath::get_optional()?,
            config_path: ConfigPath::get_optional()?,
            warnings,
        })
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");
    docs.push_str(&format!(
        "- `{}`: {}\n",
        LocaleOverride::NAME,
        LocaleOverride::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: warn)\n",
        LogLevel::NAME,
        LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!("- `{}`: {}\n", PrefsPath::NAME, PrefsPath::DESCRIPTION));
    docs.push_str(&format!("- `{}`: {}\n", ConfigPath::NAME, ConfigPath::DESCRIPTION));
    docs
}
