//! 翻译模块
//!
//! 静态词典 + 模式规则组成的双向翻译器：
//! - **locale**: 语言区域与翻译方向
//! - **lexicon**: 正向词典及其反转得到的反向词典
//! - **patterns**: 带数字短语的有序改写规则
//! - **translator**: 先模式后词典的纯函数翻译
//! - **config**: 配置管理
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust
//! use dom_i18n::translation::{Direction, Translator};
//!
//! let translator = Translator::builtin().unwrap();
//! assert_eq!(
//!     translator.translate("3 Workflows", Direction::SourceToTarget),
//!     "3 个工作流"
//! );
//! ```

pub mod config;
pub mod error;
pub mod lexicon;
pub mod locale;
pub mod patterns;
pub mod translator;

pub use config::{constants, EntryConfig, LocalizerConfig};
pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};
pub use lexicon::{Lexicon, LexiconBuilder, LexiconEntry, ReverseCollision};
pub use locale::{Direction, Locale};
pub use patterns::{PatternRule, PatternRuleSet};
pub use translator::Translator;
