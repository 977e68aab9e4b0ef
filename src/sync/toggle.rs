//! 语言切换按钮
//!
//! 页面上唯一的切换控件，按固定 id 识别：不存在时创建，存在时复用，不会重复创建。
//! 按钮文字是切换后的语言名称。

use markup5ever_rcdom::{Handle, NodeData};

use crate::parsers::html::get_text;
use crate::translation::constants::COMPACT_VIEWPORT_WIDTH;
use crate::translation::Locale;

use super::page::Page;

const BASE_STYLE: &str = "position: fixed; z-index: 999999; border: 0; border-radius: 8px; \
background: #111827; color: #ffffff; cursor: pointer; \
box-shadow: 0 2px 8px rgba(0,0,0,0.18); opacity: 0.96;";
const REGULAR_PLACEMENT: &str = "top: 56px; right: 16px; padding: 6px 10px; font-size: 12px;";
const COMPACT_PLACEMENT: &str = "top: 52px; right: 12px; padding: 5px 9px; font-size: 11px;";

/// 按视口宽度计算按钮的 `style` 属性
pub fn toggle_style(viewport_width: Option<u32>) -> String {
    let placement = match viewport_width {
        Some(width) if width < COMPACT_VIEWPORT_WIDTH => COMPACT_PLACEMENT,
        _ => REGULAR_PLACEMENT,
    };
    format!("{} {}", BASE_STYLE, placement)
}

/// 确保按钮存在
///
/// 已存在则直接返回；不存在时在 `<body>` 末尾创建。没有 `<body>` 时返回 `None`。
pub fn ensure_toggle(page: &mut Page, id: &str, locale: Locale) -> Option<Handle> {
    if let Some(existing) = page.get_element_by_id(id) {
        return Some(existing);
    }

    let body = page.body()?;
    let style = toggle_style(None);
    let button = page.append_element(
        &body,
        "button",
        &[("id", id), ("type", "button"), ("style", style.as_str())],
    );
    page.append_text(&button, locale.toggle_label());
    tracing::debug!(id, "创建语言切换按钮");
    Some(button)
}

/// 让按钮文字与当前语言一致，只在不同时写入，返回是否写入
pub fn sync_toggle_label(page: &mut Page, button: &Handle, locale: Locale) -> bool {
    let label = locale.toggle_label();
    let text_node = button
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Text { .. }))
        .cloned();

    match text_node {
        Some(node) if get_text(&node).as_deref() == Some(label) => false,
        Some(node) => page.set_text(&node, label),
        None => {
            page.append_text(button, label);
            true
        }
    }
}

/// 按视口宽度调整按钮位置（仅修改 `style` 属性）
pub fn place_toggle(page: &mut Page, button: &Handle, viewport_width: u32) {
    page.set_attr(button, "style", Some(toggle_style(Some(viewport_width))));
}
