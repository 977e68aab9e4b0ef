//! DOM遍历器模块
//!
//! 按文档顺序惰性地产出可翻译的文本节点。遍历器不持有任何跨遍历的状态，
//! 每次同步都从根节点重新构建一个新的遍历器；宿主页面随时可能替换节点，
//! 所以节点句柄只在一次遍历内有效，不应被缓存。
//!
//! 直接父元素属于跳过列表（默认 `script`、`style`、`noscript`）的文本节点不会产出。
//!
//! # 使用示例
//!
//! ```rust
//! use dom_i18n::parsers::html::{get_body, html_to_dom, TextWalker};
//!
//! let dom = html_to_dom(b"<body><p>Docs</p><script>x()</script></body>", "utf-8").unwrap();
//! let walker = TextWalker::default();
//! let texts: Vec<String> = walker
//!     .walk(get_body(&dom.document).as_ref())
//!     .map(|node| dom_i18n::parsers::html::get_text(&node).unwrap_or_default())
//!     .collect();
//! assert_eq!(texts, vec!["Docs"]);
//! ```

use std::rc::Rc;

use markup5ever_rcdom::{Handle, NodeData};

use crate::translation::constants::SKIP_ELEMENTS;

use super::dom::{get_node_name, get_parent_node};

/// 文本节点遍历器配置
#[derive(Debug, Clone)]
pub struct TextWalker {
    skip_tags: Vec<String>,
}

impl Default for TextWalker {
    fn default() -> Self {
        Self::new(SKIP_ELEMENTS.iter().map(|tag| tag.to_string()))
    }
}

impl TextWalker {
    pub fn new<I, S>(skip_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skip_tags: skip_tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn skip_tags(&self) -> &[String] {
        &self.skip_tags
    }

    /// 元素名是否属于跳过列表
    pub fn is_skipped(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|skip| skip == tag)
    }

    /// 从 `root` 开始一次新的遍历；`root` 缺失时产出空序列
    pub fn walk(&self, root: Option<&Handle>) -> TextNodes<'_> {
        let mut stack = Vec::new();
        if let Some(root) = root {
            let skipped = match root.data {
                NodeData::Text { .. } => get_parent_node(root)
                    .map(|parent| self.is_skipped_parent(&parent))
                    .unwrap_or(true),
                _ => false,
            };
            stack.push(Frame {
                node: root.clone(),
                skipped,
            });
        }
        TextNodes {
            walker: self,
            stack,
            excluded: None,
        }
    }

    fn is_skipped_parent(&self, parent: &Handle) -> bool {
        get_node_name(parent).map_or(false, |tag| self.is_skipped(tag))
    }
}

struct Frame {
    node: Handle,
    /// 该节点的直接父元素在跳过列表中
    skipped: bool,
}

/// 文本节点的惰性序列，先序深度优先
pub struct TextNodes<'a> {
    walker: &'a TextWalker,
    stack: Vec<Frame>,
    excluded: Option<Handle>,
}

impl TextNodes<'_> {
    /// 不进入 `subtree` 这棵子树
    pub fn excluding(mut self, subtree: Option<Handle>) -> Self {
        self.excluded = subtree;
        self
    }

    fn is_excluded(&self, node: &Handle) -> bool {
        self.excluded
            .as_ref()
            .map_or(false, |excluded| Rc::ptr_eq(excluded, node))
    }
}

impl Iterator for TextNodes<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        while let Some(frame) = self.stack.pop() {
            if matches!(frame.node.data, NodeData::Text { .. }) {
                if !frame.skipped {
                    return Some(frame.node);
                }
                continue;
            }

            if matches!(
                frame.node.data,
                NodeData::Element { .. } | NodeData::Document
            ) && !self.is_excluded(&frame.node)
            {
                let children_skipped = self.walker.is_skipped_parent(&frame.node);
                let children = frame.node.children.borrow();
                self.stack.extend(children.iter().rev().map(|child| Frame {
                    node: child.clone(),
                    skipped: children_skipped,
                }));
            }
        }
        None
    }
}
