//! 宿主页面模型
//!
//! 用 `RcDom` 表示宿主应用持有并不断修改的文档，并模拟浏览器的变更订阅：
//! 订阅开启后，子节点增删和文本内容修改都会生成一条变更记录，等待同步器按批取走。
//! 属性修改（`lang`、`style` 等）不在订阅范围内。

use std::fmt;

use markup5ever_rcdom::{Handle, RcDom};

use crate::parsers::html::{
    append_child, create_element_node, create_text_node, find_element_by_id, get_body,
    get_html_element, get_lang, get_text, get_title, html_to_dom, remove_child,
    serialize_document, set_lang, set_node_attr, set_text, set_title,
};
use crate::translation::error::TranslationResult;

/// 变更类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// 子节点增删
    ChildList,
    /// 文本节点内容修改
    CharacterData,
}

/// 一条变更记录
#[derive(Clone)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// `ChildList` 为父节点，`CharacterData` 为文本节点
    pub target: Handle,
}

impl fmt::Debug for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationRecord")
            .field("kind", &self.kind)
            .field("text", &get_text(&self.target))
            .finish()
    }
}

/// 宿主页面
pub struct Page {
    dom: RcDom,
    observing: bool,
    records: Vec<MutationRecord>,
    character_data_writes: usize,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("observing", &self.observing)
            .field("pending_records", &self.records.len())
            .field("character_data_writes", &self.character_data_writes)
            .finish()
    }
}

impl Page {
    pub fn from_dom(dom: RcDom) -> Self {
        Self {
            dom,
            observing: false,
            records: Vec::new(),
            character_data_writes: 0,
        }
    }

    /// 解析 HTML 字节构建页面
    pub fn from_html(data: &[u8], document_encoding: &str) -> TranslationResult<Self> {
        Ok(Self::from_dom(html_to_dom(data, document_encoding)?))
    }

    /// 只有文档节点、尚未挂载任何元素的空页面
    pub fn empty() -> Self {
        Self::from_dom(RcDom::default())
    }

    pub fn document(&self) -> &Handle {
        &self.dom.document
    }

    pub fn html_element(&self) -> Option<Handle> {
        get_html_element(&self.dom.document)
    }

    pub fn body(&self) -> Option<Handle> {
        get_body(&self.dom.document)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Handle> {
        find_element_by_id(&self.dom.document, id)
    }

    /// 文档标题；没有标题时为空串
    pub fn title(&self) -> String {
        get_title(&self.dom.document).unwrap_or_default()
    }

    /// 写入文档标题，没有 `<title>` 元素时返回 `false`
    pub fn set_title(&mut self, title: &str) -> bool {
        match set_title(&self.dom.document, title) {
            Some(text_node) => {
                self.character_data_writes += 1;
                self.record(MutationKind::CharacterData, text_node);
                true
            }
            None => false,
        }
    }

    pub fn lang(&self) -> Option<String> {
        get_lang(&self.dom.document)
    }

    /// 设置 `<html lang>`（属性修改，不产生变更记录）
    pub fn set_lang(&mut self, lang: &str) -> bool {
        set_lang(&self.dom.document, lang)
    }

    /// 设置元素属性（不产生变更记录）
    pub fn set_attr(&mut self, node: &Handle, name: &str, value: Option<String>) {
        set_node_attr(node, name, value);
    }

    /// 写入文本节点
    ///
    /// 与浏览器一致，即使新旧内容相同也算一次写入并产生变更记录。
    pub fn set_text(&mut self, node: &Handle, text: &str) -> bool {
        if !set_text(node, text) {
            return false;
        }
        self.character_data_writes += 1;
        self.record(MutationKind::CharacterData, node.clone());
        true
    }

    /// 追加文本节点
    pub fn append_text(&mut self, parent: &Handle, text: &str) -> Handle {
        let node = create_text_node(text);
        append_child(parent, node.clone());
        self.record(MutationKind::ChildList, parent.clone());
        node
    }

    /// 追加元素
    pub fn append_element(&mut self, parent: &Handle, tag: &str, attrs: &[(&str, &str)]) -> Handle {
        let node = create_element_node(tag, attrs);
        append_child(parent, node.clone());
        self.record(MutationKind::ChildList, parent.clone());
        node
    }

    /// 移除子节点
    pub fn remove_child(&mut self, parent: &Handle, child: &Handle) -> bool {
        if !remove_child(parent, child) {
            return false;
        }
        self.record(MutationKind::ChildList, parent.clone());
        true
    }

    /// 移除全部子节点，模拟宿主整块重新渲染
    pub fn clear_children(&mut self, parent: &Handle) {
        let children: Vec<Handle> = parent.children.borrow().clone();
        if children.is_empty() {
            return;
        }
        for child in children.iter() {
            remove_child(parent, child);
        }
        self.record(MutationKind::ChildList, parent.clone());
    }

    /// 开启整棵文档的变更订阅
    pub fn observe(&mut self) {
        self.observing = true;
    }

    /// 关闭订阅并丢弃尚未取走的记录
    pub fn disconnect(&mut self) {
        self.observing = false;
        self.records.clear();
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// 取走当前累积的变更记录
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn pending_records(&self) -> usize {
        self.records.len()
    }

    /// 自页面创建以来文本节点被写入的次数（不受订阅状态影响）
    pub fn character_data_writes(&self) -> usize {
        self.character_data_writes
    }

    /// 序列化当前文档
    pub fn serialize(&self, document_encoding: &str) -> TranslationResult<Vec<u8>> {
        serialize_document(&self.dom.document, document_encoding)
    }

    fn record(&mut self, kind: MutationKind, target: Handle) {
        if self.observing {
            self.records.push(MutationRecord { kind, target });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::from_html(
            b"<html><head><title>Docs</title></head><body><p>Search</p></body></html>",
            "utf-8",
        )
        .unwrap()
    }

    #[test]
    fn test_records_only_while_observing() {
        let mut page = page();
        let body = page.body().unwrap();
        page.append_text(&body, "before");
        assert_eq!(page.pending_records(), 0);

        page.observe();
        let node = page.append_text(&body, "after");
        page.set_text(&node, "changed");
        let records = page.take_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, MutationKind::ChildList);
        assert_eq!(records[1].kind, MutationKind::CharacterData);
        assert_eq!(page.pending_records(), 0);
    }

    #[test]
    fn test_same_value_write_still_counts() {
        let mut page = page();
        let body = page.body().unwrap();
        let node = page.append_text(&body, "Batch");
        page.set_text(&node, "Batch");
        assert_eq!(page.character_data_writes(), 1);
    }

    #[test]
    fn test_attribute_writes_are_not_recorded() {
        let mut page = page();
        page.observe();
        assert!(page.set_lang("zh-CN"));
        let html = page.html_element().unwrap();
        page.set_attr(&html, "data-x", Some("1".to_string()));
        assert_eq!(page.pending_records(), 0);
        assert_eq!(page.lang().as_deref(), Some("zh-CN"));
    }

    #[test]
    fn test_title_write_is_character_data() {
        let mut page = page();
        page.observe();
        assert!(page.set_title("文档"));
        assert_eq!(page.title(), "文档");
        let records = page.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, MutationKind::CharacterData);
    }

    #[test]
    fn test_clear_children_and_disconnect() {
        let mut page = page();
        let body = page.body().unwrap();
        page.observe();
        page.clear_children(&body);
        assert!(body.children.borrow().is_empty());
        assert_eq!(page.pending_records(), 1);
        page.disconnect();
        assert_eq!(page.pending_records(), 0);
        assert!(!page.is_observing());
    }

    #[test]
    fn test_empty_page_has_no_body() {
        let mut page = Page::empty();
        assert!(page.body().is_none());
        assert_eq!(page.title(), "");
        assert!(!page.set_title("x"));
        assert!(!page.set_lang("en"));
    }
}
