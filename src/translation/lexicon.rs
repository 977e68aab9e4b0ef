//! 静态词典
//!
//! 保存正向映射（源语言短语 → 目标语言短语），并在构建时反转得到反向映射。
//! 替换按"最长短语优先"的顺序逐条进行，保证较长的短语不会先被其中的子串拆散。

use std::borrow::Cow;
use std::collections::HashMap;

use super::error::{TranslationError, TranslationResult};
use super::locale::Direction;

/// Temporal UI 内置词条，按声明顺序排列
pub const TEMPORAL_UI_ENTRIES: &[(&str, &str)] = &[
    ("Start Workflow", "发起工作流"),
    ("Workflow ID", "工作流 ID"),
    ("Run ID", "运行 ID"),
    ("Open Workflows", "运行中工作流"),
    ("Closed Workflows", "已关闭工作流"),
    ("Temporal System Workflows", "Temporal 系统工作流"),
    ("Workflows", "工作流"),
    ("Schedules", "调度"),
    ("Batch", "批处理"),
    ("Archive", "归档"),
    ("Namespaces", "命名空间"),
    ("Import", "导入"),
    ("Docs", "文档"),
    ("Feedback", "反馈"),
    ("Filter", "筛选"),
    ("Status", "状态"),
    ("Type", "类型"),
    ("Start", "开始时间"),
    ("Completed", "已完成"),
    ("Running", "运行中"),
    ("Failed", "失败"),
    ("Canceled", "已取消"),
    ("Terminated", "已终止"),
    ("Timed Out", "已超时"),
    ("Namespace", "命名空间"),
    ("Search", "搜索"),
    ("Advanced", "高级"),
    ("Day", "天间模式"),
    ("Night", "夜间模式"),
];

/// 一条词条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub source: String,
    pub target: String,
}

/// 反向映射冲突：多个源短语翻译成同一个目标短语
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseCollision {
    /// 冲突的目标短语
    pub target: String,
    /// 反向查找时采用的源短语（最后声明的）
    pub kept: String,
    /// 被舍弃的源短语
    pub dropped: String,
}

/// 词典构建器
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, usize>,
    strict: bool,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 严格模式下，反向映射冲突视为错误而不是按后声明者优先处理
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 添加一条词条
    ///
    /// 完全相同的重复词条会被忽略；同一源短语映射到不同目标短语则报错。
    pub fn insert(&mut self, source: &str, target: &str) -> TranslationResult<()> {
        if source.is_empty() || target.is_empty() {
            return Err(TranslationError::InvalidEntry(format!(
                "'{}' → '{}': 短语不能为空",
                source, target
            )));
        }
        if source == target {
            return Err(TranslationError::InvalidEntry(format!(
                "'{}': 源短语与目标短语相同",
                source
            )));
        }

        if let Some(&existing) = self.index.get(source) {
            let existing = &self.entries[existing];
            if existing.target == target {
                tracing::debug!(source, "忽略重复词条");
                return Ok(());
            }
            return Err(TranslationError::DuplicateSource {
                source_phrase: source.to_string(),
                existing: existing.target.clone(),
                rejected: target.to_string(),
            });
        }

        self.index.insert(source.to_string(), self.entries.len());
        self.entries.push(LexiconEntry {
            source: source.to_string(),
            target: target.to_string(),
        });
        Ok(())
    }

    /// 批量添加词条
    pub fn extend<'a, I>(&mut self, entries: I) -> TranslationResult<()>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (source, target) in entries {
            self.insert(source, target)?;
        }
        Ok(())
    }

    /// 构建词典，反转正向映射并生成最长优先的替换顺序
    ///
    /// 反向映射冲突时后声明的源短语生效（与按声明顺序逐条写入映射表一致）。
    /// 任一方向上，译文中若含有同方向的待替换短语，则拒绝构建。
    pub fn build(self) -> TranslationResult<Lexicon> {
        let mut forward = HashMap::with_capacity(self.entries.len());
        let mut reverse: HashMap<String, String> = HashMap::with_capacity(self.entries.len());
        let mut reverse_slots: HashMap<String, usize> = HashMap::with_capacity(self.entries.len());
        let mut forward_pairs = Vec::with_capacity(self.entries.len());
        let mut reverse_pairs: Vec<(String, String)> = Vec::with_capacity(self.entries.len());
        let mut collisions = Vec::new();

        for entry in self.entries {
            if let Some(&slot) = reverse_slots.get(&entry.target) {
                let replaced = reverse_pairs[slot].1.clone();
                if self.strict {
                    return Err(TranslationError::AmbiguousReverse {
                        target_phrase: entry.target,
                        first: replaced,
                        second: entry.source,
                    });
                }
                tracing::debug!(
                    phrase = %entry.target,
                    kept = %entry.source,
                    dropped = %replaced,
                    "反向映射冲突，采用后声明的源短语"
                );
                collisions.push(ReverseCollision {
                    target: entry.target.clone(),
                    kept: entry.source.clone(),
                    dropped: replaced,
                });
                reverse_pairs[slot].1 = entry.source.clone();
            } else {
                reverse_slots.insert(entry.target.clone(), reverse_pairs.len());
                reverse_pairs.push((entry.target.clone(), entry.source.clone()));
            }
            reverse.insert(entry.target.clone(), entry.source.clone());

            forward_pairs.push((entry.source.clone(), entry.target.clone()));
            forward.insert(entry.source, entry.target);
        }

        check_unchained(&forward_pairs, Direction::SourceToTarget)?;
        check_unchained(&reverse_pairs, Direction::TargetToSource)?;

        sort_longest_first(&mut forward_pairs);
        sort_longest_first(&mut reverse_pairs);

        Ok(Lexicon {
            forward,
            reverse,
            forward_pairs,
            reverse_pairs,
            collisions,
        })
    }
}

/// 同一方向上，任何译文都不能含有待替换短语
fn check_unchained(pairs: &[(String, String)], direction: Direction) -> TranslationResult<()> {
    for (from, to) in pairs {
        if let Some((phrase, _)) = pairs.iter().find(|(other, _)| to.contains(other.as_str())) {
            return Err(TranslationError::ChainedEntry {
                direction,
                from: from.clone(),
                to: to.clone(),
                phrase: phrase.clone(),
            });
        }
    }
    Ok(())
}

/// 按 `from` 的字符数降序排列；稳定排序，长度相同的保持声明顺序
fn sort_longest_first(pairs: &mut [(String, String)]) {
    pairs.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
}

/// 双向静态词典，构建后不可变
#[derive(Debug, Clone)]
pub struct Lexicon {
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
    forward_pairs: Vec<(String, String)>,
    reverse_pairs: Vec<(String, String)>,
    collisions: Vec<ReverseCollision>,
}

impl Lexicon {
    /// 内置的 Temporal UI 词典
    pub fn builtin() -> TranslationResult<Lexicon> {
        let mut builder = LexiconBuilder::new();
        builder.extend(TEMPORAL_UI_ENTRIES.iter().copied())?;
        builder.build()
    }

    /// 正向整句查找
    pub fn forward(&self, phrase: &str) -> Option<&str> {
        self.forward.get(phrase).map(String::as_str)
    }

    /// 反向整句查找
    pub fn reverse(&self, phrase: &str) -> Option<&str> {
        self.reverse.get(phrase).map(String::as_str)
    }

    /// 指定方向的 (from, to) 序列，按 `from` 长度降序
    pub fn longest_first(&self, direction: Direction) -> &[(String, String)] {
        match direction {
            Direction::SourceToTarget => &self.forward_pairs,
            Direction::TargetToSource => &self.reverse_pairs,
        }
    }

    /// 构建时发现的反向映射冲突
    pub fn collisions(&self) -> &[ReverseCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// 按最长优先顺序逐条做字面替换，每条的输出作为下一条的输入
    pub fn substitute<'a>(&self, text: &'a str, direction: Direction) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for (from, to) in self.longest_first(direction) {
            if out.contains(from.as_str()) {
                out = Cow::Owned(out.replace(from.as_str(), to));
            }
        }
        out
    }
}
