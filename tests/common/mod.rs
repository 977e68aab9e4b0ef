// 集成测试公共模块
//
// 提供测试页面、同步器构建与文本断言等共享工具

#![allow(dead_code)]

use dom_i18n::parsers::html::{get_text, TextWalker};
use dom_i18n::sync::{MemoryStore, Page, PreferenceStore, Synchronizer};
use dom_i18n::translation::{Locale, LocalizerConfig};

/// 测试配置构建器
pub struct TestConfigBuilder {
    config: LocalizerConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LocalizerConfig::default(),
        }
    }

    /// 关闭自身写入记录的丢弃，只靠写入纪律收敛
    pub fn without_suppression(mut self) -> Self {
        self.config.suppress_self_mutations = false;
        self
    }

    pub fn with_entry(mut self, source: &str, target: &str) -> Self {
        self.config.entries.push(dom_i18n::translation::EntryConfig {
            source: source.to_string(),
            target: target.to_string(),
        });
        self
    }

    pub fn with_max_settle_passes(mut self, passes: usize) -> Self {
        self.config.max_settle_passes = passes;
        self
    }

    pub fn build(self) -> LocalizerConfig {
        self.config
    }
}

/// 测试环境：一个页面加一个已启动的同步器
pub struct TestEnvironment<S: PreferenceStore = MemoryStore> {
    pub page: Page,
    pub synchronizer: Synchronizer<S>,
}

impl TestEnvironment<MemoryStore> {
    /// 以指定语言启动
    pub fn started(html: &str, locale: Locale) -> Self {
        Self::started_with(html, locale, TestConfigBuilder::new().build())
    }

    pub fn started_with(html: &str, locale: Locale, config: LocalizerConfig) -> Self {
        let store = MemoryStore::with_value(&config.storage_key, locale.code());
        Self::start(html, config, store)
    }
}

impl<S: PreferenceStore> TestEnvironment<S> {
    pub fn start(html: &str, config: LocalizerConfig, store: S) -> Self {
        let mut page = HtmlTestHelper::page(html);
        let mut synchronizer = Synchronizer::from_config(config, store).unwrap();
        synchronizer.start(&mut page);
        Self { page, synchronizer }
    }

    /// `<body>` 下全部可翻译文本（不含切换按钮）
    pub fn body_texts(&self) -> Vec<String> {
        HtmlTestHelper::body_texts(&self.page)
    }

    pub fn toggle_label(&self) -> Option<String> {
        let id = &self.synchronizer.config().toggle_id;
        let button = self.page.get_element_by_id(id)?;
        let children = button.children.borrow();
        children.first().and_then(get_text)
    }
}

/// HTML 测试辅助工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    pub fn page(html: &str) -> Page {
        Page::from_html(html.as_bytes(), "utf-8").unwrap()
    }

    /// 宿主应用首页的简化版本
    pub fn temporal_home_page() -> String {
        r#"<!DOCTYPE html>
<html>
<head><title>Workflows — App</title></head>
<body>
  <nav><a>Workflows</a><a>Schedules</a><a>Batch</a><a>Namespaces</a><a>Docs</a></nav>
  <main>
    <h1>Start Workflow</h1>
    <p>3 Workflows</p>
    <p>12 Completed</p>
    <button>Filter</button>
    <table><tr><td>Status</td><td>Running</td><td>Timed Out</td></tr></table>
  </main>
  <script>window.label = "Workflows";</script>
  <style>.Workflows { color: red; }</style>
</body>
</html>"#
            .to_string()
    }

    pub fn body_texts(page: &Page) -> Vec<String> {
        let toggle = page.get_element_by_id("temporal-lang-toggle");
        TextWalker::default()
            .walk(page.body().as_ref())
            .excluding(toggle)
            .filter_map(|node| get_text(&node))
            .filter(|text| !text.trim().is_empty())
            .collect()
    }

    /// 全部 `<script>` / `<style>` 内的原始文本
    pub fn raw_texts(page: &Page) -> Vec<String> {
        let mut raw = Vec::new();
        collect_raw(page.document(), false, &mut raw);
        raw
    }
}

fn collect_raw(node: &markup5ever_rcdom::Handle, in_raw: bool, out: &mut Vec<String>) {
    use markup5ever_rcdom::NodeData;

    match node.data {
        NodeData::Text { .. } if in_raw => {
            if let Some(text) = get_text(node) {
                out.push(text);
            }
        }
        NodeData::Element { ref name, .. } => {
            let raw = matches!(&*name.local, "script" | "style");
            for child in node.children.borrow().iter() {
                collect_raw(child, raw, out);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                collect_raw(child, in_raw, out);
            }
        }
    }
}
