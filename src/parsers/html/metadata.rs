//! HTML 文档元数据处理模块
//!
//! 本地化层需要读写的文档级信息：
//! - `<html lang>` 语言属性
//! - `<title>` 文档标题
//! - `<html>` / `<body>` 等结构节点的定位

use markup5ever_rcdom::{Handle, NodeData};

use super::dom::{
    append_child, create_text_node, find_nodes, get_child_node_by_name, get_node_attr,
    set_node_attr, set_text,
};

/// 获取 `<html>` 元素
pub fn get_html_element(document: &Handle) -> Option<Handle> {
    get_child_node_by_name(document, "html")
}

/// 获取 `<body>` 元素；文档尚未构建出 body 时返回 `None`
pub fn get_body(document: &Handle) -> Option<Handle> {
    get_html_element(document).and_then(|html| get_child_node_by_name(&html, "body"))
}

/// 获取文档语言
pub fn get_lang(document: &Handle) -> Option<String> {
    get_html_element(document).and_then(|html| get_node_attr(&html, "lang"))
}

/// 设置文档语言，返回是否真的发生了修改
pub fn set_lang(document: &Handle, lang: &str) -> bool {
    match get_html_element(document) {
        Some(html) if get_node_attr(&html, "lang").as_deref() != Some(lang) => {
            set_node_attr(&html, "lang", Some(lang.to_string()));
            true
        }
        _ => false,
    }
}

/// 获取文档标题
///
/// 从 HTML 文档的 `<title>` 标签中提取文本内容。
/// 只返回第一个 title 标签的第一个文本子节点。
///
/// # 返回值
///
/// * `Some(String)` - 如果找到 title 标签且包含文本，返回标题文本
/// * `None` - 如果没有找到 title 标签或标签为空
///
/// # 示例
///
/// ```ignore
/// // 对于包含 <title>Workflows — App</title> 的文档
/// let title = get_title(&document_handle);
/// assert_eq!(title, Some("Workflows — App".to_string()));
/// ```
pub fn get_title(node: &Handle) -> Option<String> {
    get_title_text_node(node).map(|text_node| match &text_node.data {
        NodeData::Text { contents } => contents.borrow().to_string(),
        _ => String::new(),
    })
}

/// 获取 `<title>` 的第一个文本子节点
pub fn get_title_text_node(node: &Handle) -> Option<Handle> {
    let title_node = find_nodes(node, &["html", "head", "title"]).into_iter().next()?;
    let children = title_node.children.borrow();
    children
        .iter()
        .find(|child| matches!(child.data, NodeData::Text { .. }))
        .cloned()
}

/// 设置文档标题
///
/// 已有文本子节点时原地改写；`<title>` 为空时追加文本节点。
/// 没有 `<title>` 元素时不做任何事，返回 `None`；否则返回被写入的文本节点。
pub fn set_title(node: &Handle, title: &str) -> Option<Handle> {
    if let Some(text_node) = get_title_text_node(node) {
        set_text(&text_node, title);
        return Some(text_node);
    }

    let title_node = find_nodes(node, &["html", "head", "title"]).into_iter().next()?;
    let text_node = create_text_node(title);
    append_child(&title_node, text_node.clone());
    Some(text_node)
}
