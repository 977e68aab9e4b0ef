//! 本地化配置
//!
//! 提供配置加载和验证，支持 TOML 文件、字符串和默认值三种来源。

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{TranslationError, TranslationResult};
use super::lexicon::{Lexicon, LexiconBuilder, TEMPORAL_UI_ENTRIES};
use super::patterns::PatternRuleSet;
use super::translator::Translator;

/// 本地化配置常量
pub mod constants {
    /// 偏好存储中保存语言区域的键
    pub const DEFAULT_STORAGE_KEY: &str = "temporal_ui_locale";
    /// 切换按钮的固定 id
    pub const DEFAULT_TOGGLE_ID: &str = "temporal-lang-toggle";
    /// 不参与翻译的容器元素
    pub const SKIP_ELEMENTS: &[&str] = &["script", "style", "noscript"];
    /// settle() 单次调用内最多处理的变更批次
    pub const DEFAULT_MAX_SETTLE_PASSES: usize = 8;
    pub const MIN_SETTLE_PASSES: usize = 1;
    pub const MAX_SETTLE_PASSES: usize = 1000;
    /// 视口宽度低于此值时使用紧凑样式的切换按钮
    pub const COMPACT_VIEWPORT_WIDTH: u32 = 1100;

    pub const CONFIG_PATHS: &[&str] = &[
        "dom-i18n.toml",
        ".dom-i18n.toml",
        "~/.config/dom-i18n/config.toml",
        "/etc/dom-i18n/config.toml",
    ];
}

/// 额外词条
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntryConfig {
    pub source: String,
    pub target: String,
}

/// 本地化层配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizerConfig {
    /// 偏好存储的键
    pub storage_key: String,
    /// 切换按钮的 id
    pub toggle_id: String,
    /// 直接父元素为这些标签时跳过文本节点
    pub skip_tags: Vec<String>,
    /// 每次同步结束时丢弃自身写入产生的变更记录
    pub suppress_self_mutations: bool,
    /// settle() 的批次上限
    pub max_settle_passes: usize,
    /// 反向映射冲突时报错
    pub strict_lexicon: bool,
    /// 追加在内置词条之后的额外词条
    pub entries: Vec<EntryConfig>,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            storage_key: constants::DEFAULT_STORAGE_KEY.to_string(),
            toggle_id: constants::DEFAULT_TOGGLE_ID.to_string(),
            skip_tags: constants::SKIP_ELEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suppress_self_mutations: true,
            max_settle_passes: constants::DEFAULT_MAX_SETTLE_PASSES,
            strict_lexicon: false,
            entries: Vec::new(),
        }
    }
}

impl LocalizerConfig {
    /// 从 TOML 字符串解析并验证
    pub fn from_toml_str(content: &str) -> TranslationResult<Self> {
        let mut config: LocalizerConfig = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载，路径支持 `~` 展开
    pub fn load<P: AsRef<Path>>(path: P) -> TranslationResult<Self> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let expanded = shellexpand::tilde(&path);
        let content = std::fs::read_to_string(&*expanded).map_err(|e| {
            TranslationError::Config(format!("无法读取配置文件 {}: {}", expanded, e))
        })?;
        tracing::info!("加载配置文件: {}", expanded);
        Self::from_toml_str(&content)
    }

    /// 依次查找默认位置，找到第一个存在的配置文件；都不存在时使用默认值
    pub fn discover() -> TranslationResult<Self> {
        for path in constants::CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(&*expanded).exists() {
                return Self::load(&*expanded);
            }
        }
        Ok(Self::default())
    }

    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(TranslationError::Config("storage_key 不能为空".to_string()));
        }
        if self.toggle_id.trim().is_empty() || self.toggle_id.contains(char::is_whitespace) {
            return Err(TranslationError::Config(format!(
                "toggle_id 无效: '{}'",
                self.toggle_id
            )));
        }
        if !(constants::MIN_SETTLE_PASSES..=constants::MAX_SETTLE_PASSES)
            .contains(&self.max_settle_passes)
        {
            return Err(TranslationError::Config(format!(
                "max_settle_passes 必须在 {} 到 {} 之间",
                constants::MIN_SETTLE_PASSES,
                constants::MAX_SETTLE_PASSES
            )));
        }
        Ok(())
    }

    /// 标签名统一为小写，与解析后的 DOM 保持一致
    fn normalize(&mut self) {
        for tag in self.skip_tags.iter_mut() {
            *tag = tag.trim().to_ascii_lowercase();
        }
    }

    /// 根据配置构建词典：内置词条在前，额外词条在后
    pub fn build_lexicon(&self) -> TranslationResult<Lexicon> {
        let mut builder = LexiconBuilder::new().strict(self.strict_lexicon);
        builder.extend(TEMPORAL_UI_ENTRIES.iter().copied())?;
        builder.extend(
            self.entries
                .iter()
                .map(|entry| (entry.source.as_str(), entry.target.as_str())),
        )?;
        builder.build()
    }

    /// 根据配置构建翻译器
    pub fn build_translator(&self) -> TranslationResult<Translator> {
        Ok(Translator::new(
            self.build_lexicon()?,
            PatternRuleSet::builtin()?,
        ))
    }
}
