//! 页面同步器
//!
//! 状态机：`Idle` → `Translating` → `Observing`。
//!
//! 每次同步（启动、切换语言、收到一批外部变更）都完整执行一遍：
//! 设置文档语言、翻译标题、遍历 `<body>` 翻译全部文本节点、确保切换按钮存在并更新文字。
//!
//! 同步过程中的写入本身也是变更。防止"订阅 → 写入 → 订阅"无限循环的是写入纪律：
//! 只有译文与原文不同时才写入，而同方向重复翻译已翻译的文本不会再产生变化，
//! 因此第二遍必然没有写入。开启 `suppress_self_mutations` 时，
//! 自身写入产生的记录在每遍结束时直接丢弃，连这多余的一遍也省掉。

use markup5ever_rcdom::Handle;

use crate::parsers::html::{get_text, TextWalker};
use crate::translation::{Locale, LocalizerConfig, TranslationResult, Translator};

use super::page::Page;
use super::store::PreferenceStore;
use super::toggle::{ensure_toggle, place_toggle, sync_toggle_label};

/// 同步器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    Idle,
    Translating,
    Observing,
}

/// 一遍同步的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// 遍历到的可翻译文本节点数
    pub nodes_visited: usize,
    /// 实际写入的文本节点数
    pub nodes_written: usize,
    /// 标题是否被写入
    pub title_written: bool,
}

impl PassReport {
    /// 本遍是否修改了任何文本
    pub fn wrote_anything(&self) -> bool {
        self.nodes_written > 0 || self.title_written
    }
}

/// 页面同步器
pub struct Synchronizer<S: PreferenceStore> {
    translator: Translator,
    walker: TextWalker,
    store: S,
    config: LocalizerConfig,
    locale: Locale,
    state: SyncState,
    viewport_width: Option<u32>,
}

impl<S: PreferenceStore> Synchronizer<S> {
    /// 创建同步器，从偏好存储读取语言；缺失或无法识别时使用源语言
    pub fn new(translator: Translator, store: S, config: LocalizerConfig) -> Self {
        let stored = store.get(&config.storage_key);
        let locale = Locale::from_stored(stored.as_deref());
        tracing::debug!(stored = ?stored, locale = %locale, "载入语言偏好");

        Self {
            translator,
            walker: TextWalker::new(config.skip_tags.iter().cloned()),
            store,
            config,
            locale,
            state: SyncState::Idle,
            viewport_width: None,
        }
    }

    /// 按配置构建翻译器并创建同步器
    pub fn from_config(config: LocalizerConfig, store: S) -> TranslationResult<Self> {
        let translator = config.build_translator()?;
        Ok(Self::new(translator, store, config))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// 覆盖当前语言，不持久化，也不触发同步
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// 启动：挂载按钮、执行第一遍同步、开启变更订阅
    pub fn start(&mut self, page: &mut Page) -> PassReport {
        if let Some(button) = ensure_toggle(page, &self.config.toggle_id, self.locale) {
            if let Some(width) = self.viewport_width {
                place_toggle(page, &button, width);
            }
        }
        let report = self.apply_locale_to_page(page);
        page.observe();
        self.state = SyncState::Observing;
        tracing::debug!(locale = %self.locale, ?report, "同步器已启动");
        report
    }

    /// 停止订阅
    pub fn stop(&mut self, page: &mut Page) {
        page.disconnect();
        self.state = SyncState::Idle;
    }

    /// 完整执行一遍同步
    pub fn apply_locale_to_page(&mut self, page: &mut Page) -> PassReport {
        self.state = SyncState::Translating;

        page.set_lang(self.locale.html_lang());

        let mut report = PassReport::default();
        let title = page.title();
        let next_title = self.translator.translate(&title, self.locale.direction());
        if !next_title.is_empty() && next_title != title {
            report.title_written = page.set_title(&next_title);
        }

        let toggle = ensure_toggle(page, &self.config.toggle_id, self.locale);
        let body = page.body();
        let (visited, written) = self.translate_dom(page, body.as_ref(), toggle.as_ref());
        report.nodes_visited = visited;
        report.nodes_written = written;

        if let Some(button) = toggle.as_ref() {
            sync_toggle_label(page, button, self.locale);
        }

        if self.config.suppress_self_mutations && page.is_observing() {
            let dropped = page.take_records().len();
            if dropped > 0 {
                tracing::trace!(dropped, "丢弃自身写入产生的变更记录");
            }
        }

        self.state = if page.is_observing() {
            SyncState::Observing
        } else {
            SyncState::Idle
        };
        tracing::debug!(locale = %self.locale, ?report, "同步完成");
        report
    }

    /// 翻译 `root` 下的全部文本节点，只写入发生变化的节点
    ///
    /// 返回 (遍历节点数, 写入节点数)。`excluded` 子树（切换按钮）不参与翻译。
    pub fn translate_dom(
        &self,
        page: &mut Page,
        root: Option<&Handle>,
        excluded: Option<&Handle>,
    ) -> (usize, usize) {
        let direction = self.locale.direction();
        let mut visited = 0;
        let mut written = 0;

        for node in self.walker.walk(root).excluding(excluded.cloned()) {
            visited += 1;
            let Some(original) = get_text(&node) else {
                continue;
            };
            let next = self.translator.translate(&original, direction);
            if next != original {
                tracing::trace!(from = %original, to = %next, "写入译文");
                page.set_text(&node, &next);
                written += 1;
            }
        }

        (visited, written)
    }

    /// 处理一批待处理的变更记录；没有记录时返回 `None`
    pub fn pump(&mut self, page: &mut Page) -> Option<PassReport> {
        let records = page.take_records();
        if records.is_empty() {
            return None;
        }
        tracing::debug!(records = records.len(), "收到外部变更");
        Some(self.apply_locale_to_page(page))
    }

    /// 反复处理变更直到没有新记录，最多 `max_settle_passes` 遍；返回执行的遍数
    pub fn settle(&mut self, page: &mut Page) -> usize {
        let mut passes = 0;
        while passes < self.config.max_settle_passes {
            if self.pump(page).is_none() {
                return passes;
            }
            passes += 1;
        }
        if page.pending_records() > 0 {
            tracing::warn!(
                passes,
                pending = page.pending_records(),
                "达到同步遍数上限，仍有未处理的变更"
            );
        }
        passes
    }

    /// 切换语言：翻转、持久化、立即重新同步
    ///
    /// 持久化失败只记录日志，不影响本次切换。
    pub fn toggle(&mut self, page: &mut Page) -> PassReport {
        self.locale = self.locale.other();
        if let Err(e) = self.store.set(&self.config.storage_key, self.locale.code()) {
            tracing::warn!(error = %e, "保存语言偏好失败");
        }
        tracing::info!(locale = %self.locale, "切换语言");
        self.apply_locale_to_page(page)
    }

    /// 用户点击；只有切换按钮会响应
    pub fn click(&mut self, page: &mut Page, element_id: &str) -> Option<PassReport> {
        if element_id != self.config.toggle_id || page.get_element_by_id(element_id).is_none() {
            return None;
        }
        Some(self.toggle(page))
    }

    /// 视口尺寸变化时调整按钮位置，与翻译状态无关
    pub fn on_resize(&mut self, page: &mut Page, viewport_width: u32) {
        self.viewport_width = Some(viewport_width);
        if let Some(button) = page.get_element_by_id(&self.config.toggle_id) {
            place_toggle(page, &button, viewport_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::store::MemoryStore;

    fn synchronizer(store: MemoryStore) -> Synchronizer<MemoryStore> {
        Synchronizer::from_config(LocalizerConfig::default(), store).unwrap()
    }

    fn page(body: &str) -> Page {
        let html = format!(
            "<html><head><title>Workflows — App</title></head><body>{}</body></html>",
            body
        );
        Page::from_html(html.as_bytes(), "utf-8").unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sync = synchronizer(MemoryStore::new());
        assert_eq!(sync.state(), SyncState::Idle);
        assert_eq!(sync.locale(), Locale::En);

        let sync = synchronizer(MemoryStore::with_value("temporal_ui_locale", "zh"));
        assert_eq!(sync.locale(), Locale::Zh);

        let sync = synchronizer(MemoryStore::with_value("temporal_ui_locale", "de"));
        assert_eq!(sync.locale(), Locale::En);
    }

    #[test]
    fn test_start_translates_and_observes() {
        let mut page = page("<p>Start Workflow</p>");
        let mut sync = synchronizer(MemoryStore::with_value("temporal_ui_locale", "zh"));
        let report = sync.start(&mut page);

        assert_eq!(sync.state(), SyncState::Observing);
        assert!(page.is_observing());
        assert_eq!(report.nodes_written, 1);
        assert!(report.title_written);
        assert_eq!(page.title(), "工作流 — App");
        assert_eq!(page.lang().as_deref(), Some("zh-CN"));
        assert_eq!(page.pending_records(), 0);
    }

    #[test]
    fn test_source_locale_start_writes_nothing() {
        let mut page = page("<p>Start Workflow</p>");
        let mut sync = synchronizer(MemoryStore::new());
        let report = sync.start(&mut page);
        assert!(!report.wrote_anything());
        assert_eq!(page.character_data_writes(), 0);
        assert_eq!(page.lang().as_deref(), Some("en"));
    }

    #[test]
    fn test_pump_without_records_is_noop() {
        let mut page = page("<p>Docs</p>");
        let mut sync = synchronizer(MemoryStore::new());
        sync.start(&mut page);
        assert!(sync.pump(&mut page).is_none());
        assert_eq!(sync.settle(&mut page), 0);
    }

    #[test]
    fn test_click_ignores_other_elements() {
        let mut page = page("<p id=\"other\">Docs</p>");
        let mut sync = synchronizer(MemoryStore::new());
        sync.start(&mut page);
        assert!(sync.click(&mut page, "other").is_none());
        assert!(sync.click(&mut page, "temporal-lang-toggle").is_some());
        assert_eq!(sync.locale(), Locale::Zh);
    }

    #[test]
    fn test_toggle_label_is_not_translated() {
        let config = LocalizerConfig::from_toml_str(
            r#"
            [[entries]]
            source = "English"
            target = "英语"
            "#,
        )
        .unwrap();
        let mut page = page("<p>Docs</p>");
        let mut sync = Synchronizer::from_config(config, MemoryStore::new()).unwrap();
        sync.start(&mut page);
        sync.toggle(&mut page);

        let button = page.get_element_by_id("temporal-lang-toggle").unwrap();
        assert_eq!(
            get_text(&button.children.borrow()[0]).as_deref(),
            Some("English")
        );
        let report = sync.apply_locale_to_page(&mut page);
        assert!(!report.wrote_anything());
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut page = page("<p>Docs</p>");
        let mut sync = synchronizer(MemoryStore::new());
        sync.start(&mut page);
        sync.stop(&mut page);
        assert_eq!(sync.state(), SyncState::Idle);
        let body = page.body().unwrap();
        page.append_text(&body, "Search");
        assert!(sync.pump(&mut page).is_none());
    }
}
