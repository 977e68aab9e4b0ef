//! 语言区域与翻译方向

use std::fmt;

/// 支持的两种语言区域
///
/// `En` 是源语言（页面原生语言），`Zh` 是目标语言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// 源语言，页面原生文本
    #[default]
    En,
    /// 目标语言
    Zh,
}

/// 翻译方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 源语言 → 目标语言（正向词典）
    SourceToTarget,
    /// 目标语言 → 源语言（反向词典）
    TargetToSource,
}

impl Locale {
    /// 所有可识别的语言代码
    pub const CODES: [&'static str; 2] = ["en", "zh"];

    /// 持久化使用的语言代码
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// 解析持久化的语言代码，只接受完全一致的代码
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    /// 解析存储中读出的值；缺失或无法识别时回落到源语言
    pub fn from_stored(value: Option<&str>) -> Locale {
        value.and_then(Locale::from_code).unwrap_or_default()
    }

    /// 写入 `<html lang>` 的值
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh-CN",
        }
    }

    /// 另一种语言区域
    pub fn other(self) -> Locale {
        match self {
            Locale::En => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }

    /// 语言区域自身的显示名称
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Zh => "中文",
        }
    }

    /// 切换按钮的文字：显示切换后的语言，而不是当前语言
    pub fn toggle_label(self) -> &'static str {
        self.other().display_name()
    }

    /// 把页面翻译为当前语言所需的方向
    pub fn direction(self) -> Direction {
        match self {
            Locale::En => Direction::TargetToSource,
            Locale::Zh => Direction::SourceToTarget,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Direction {
    /// 相反的方向
    pub fn reversed(self) -> Direction {
        match self {
            Direction::SourceToTarget => Direction::TargetToSource,
            Direction::TargetToSource => Direction::SourceToTarget,
        }
    }
}
