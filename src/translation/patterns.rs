//! 模式规则
//!
//! 词典无法覆盖带数字的短语（例如 "3 Workflows"），由一组有序的正则改写规则处理。
//! 每个方向一组规则，按列表顺序依次应用，前一条的输出是后一条的输入。

use std::borrow::Cow;

use regex::Regex;

use super::error::TranslationResult;
use super::locale::Direction;

/// 内置正向规则（源语言 → 目标语言）
///
/// 使用 ASCII 单词边界，数字前紧挨着中文字符时同样视为边界。
pub const FORWARD_RULES: &[(&str, &str)] = &[
    (r"(?-u:\b)([0-9]+)\s+Workflows(?-u:\b)", "${1} 个工作流"),
    (r"(?-u:\b)([0-9]+)\s+Completed(?-u:\b)", "${1} 个已完成"),
];

/// 内置反向规则（目标语言 → 源语言）
pub const REVERSE_RULES: &[(&str, &str)] = &[
    (r"([0-9]+)\s*个工作流", "${1} Workflows"),
    (r"([0-9]+)\s*个已完成", "${1} Completed"),
];

/// 单条改写规则：带捕获组的匹配器和引用捕获组的替换模板
#[derive(Debug, Clone)]
pub struct PatternRule {
    matcher: Regex,
    template: String,
}

impl PatternRule {
    pub fn new(pattern: &str, template: &str) -> TranslationResult<Self> {
        Ok(Self {
            matcher: Regex::new(pattern)?,
            template: template.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// 改写所有匹配（全局替换）
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.matcher.replace_all(text, self.template.as_str())
    }
}

/// 两个方向各一组有序规则
#[derive(Debug, Clone, Default)]
pub struct PatternRuleSet {
    forward: Vec<PatternRule>,
    reverse: Vec<PatternRule>,
}

impl PatternRuleSet {
    /// 空规则集
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置的 Temporal UI 规则集
    pub fn builtin() -> TranslationResult<Self> {
        let mut rules = Self::new();
        for (pattern, template) in FORWARD_RULES {
            rules.push(Direction::SourceToTarget, PatternRule::new(pattern, template)?);
        }
        for (pattern, template) in REVERSE_RULES {
            rules.push(Direction::TargetToSource, PatternRule::new(pattern, template)?);
        }
        Ok(rules)
    }

    /// 在指定方向的列表末尾追加规则
    pub fn push(&mut self, direction: Direction, rule: PatternRule) {
        match direction {
            Direction::SourceToTarget => self.forward.push(rule),
            Direction::TargetToSource => self.reverse.push(rule),
        }
    }

    pub fn rules(&self, direction: Direction) -> &[PatternRule] {
        match direction {
            Direction::SourceToTarget => &self.forward,
            Direction::TargetToSource => &self.reverse,
        }
    }

    /// 按顺序应用指定方向的全部规则
    pub fn apply<'a>(&self, text: &'a str, direction: Direction) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for rule in self.rules(direction) {
            let rewritten = match rule.apply(&out) {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            };
            if let Some(rewritten) = rewritten {
                out = Cow::Owned(rewritten);
            }
        }
        out
    }
}
