//! # DOM i18n Library
//!
//! 运行时页面文本本地化：在宿主应用渲染出的 DOM 上原地替换界面文字，
//! 并在宿主重新渲染时自动重新同步。
//!
//! ## 模块组织
//!
//! - `translation` - 词典、模式规则与翻译器
//! - `parsers` - HTML 解析、DOM 操作与文本节点遍历
//! - `sync` - 页面模型、偏好存储、切换按钮与同步状态机
//! - `core` - 面向命令行的整页处理入口
//! - `env` - 环境变量

pub mod core;
pub mod env;
pub mod parsers;
pub mod sync;
pub mod translation;

// Re-export commonly used items for convenience
pub use sync::{MemoryStore, Page, PassReport, PreferenceStore, Synchronizer};
pub use translation::{Direction, Locale, LocalizerConfig, TranslationError, Translator};
