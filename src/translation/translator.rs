//! 翻译器
//!
//! 文本进、文本出：先按顺序应用模式规则，再做词典替换。
//! 纯函数，无内部可变状态，可以在多个同步过程中共享。

use std::borrow::Cow;
use std::sync::Arc;

use super::error::TranslationResult;
use super::lexicon::Lexicon;
use super::locale::Direction;
use super::patterns::PatternRuleSet;

/// 词典 + 模式规则组成的双向翻译器
#[derive(Debug, Clone)]
pub struct Translator {
    lexicon: Arc<Lexicon>,
    patterns: Arc<PatternRuleSet>,
}

impl Translator {
    pub fn new(lexicon: Lexicon, patterns: PatternRuleSet) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            patterns: Arc::new(patterns),
        }
    }

    /// 使用内置的 Temporal UI 词典和规则
    pub fn builtin() -> TranslationResult<Self> {
        Ok(Self::new(Lexicon::builtin()?, PatternRuleSet::builtin()?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn patterns(&self) -> &PatternRuleSet {
        &self.patterns
    }

    /// 翻译一段文本
    ///
    /// 空串或纯空白原样返回；没有任何规则或词条命中时同样原样返回（借用输入）。
    pub fn translate<'a>(&self, text: &'a str, direction: Direction) -> Cow<'a, str> {
        if text.trim().is_empty() {
            return Cow::Borrowed(text);
        }

        match self.patterns.apply(text, direction) {
            Cow::Borrowed(text) => self.lexicon.substitute(text, direction),
            Cow::Owned(rewritten) => {
                let substituted = match self.lexicon.substitute(&rewritten, direction) {
                    Cow::Owned(substituted) => Some(substituted),
                    Cow::Borrowed(_) => None,
                };
                Cow::Owned(substituted.unwrap_or(rewritten))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::builtin().unwrap()
    }

    #[test]
    fn test_blank_input_is_unchanged() {
        let translator = translator();
        for text in ["", " ", "\n\t  "] {
            assert!(matches!(
                translator.translate(text, Direction::SourceToTarget),
                Cow::Borrowed(t) if t == text
            ));
        }
    }

    #[test]
    fn test_pattern_before_lexicon() {
        let translator = translator();
        assert_eq!(
            translator.translate("3 Workflows", Direction::SourceToTarget),
            "3 个工作流"
        );
        assert_eq!(
            translator.translate("3 个工作流", Direction::TargetToSource),
            "3 Workflows"
        );
    }

    #[test]
    fn test_pattern_and_lexicon_in_one_string() {
        let translator = translator();
        assert_eq!(
            translator.translate("Open Workflows: 4 Workflows", Direction::SourceToTarget),
            "运行中工作流: 4 个工作流"
        );
    }

    #[test]
    fn test_miss_passes_through() {
        let translator = translator();
        assert_eq!(
            translator.translate("Temporal", Direction::SourceToTarget),
            "Temporal"
        );
        assert_eq!(
            translator.translate("历史记录", Direction::TargetToSource),
            "历史记录"
        );
    }

    #[test]
    fn test_clones_share_tables() {
        let translator = translator();
        let other = translator.clone();
        assert!(Arc::ptr_eq(&translator.lexicon, &other.lexicon));
    }
}
