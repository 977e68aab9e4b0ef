//! # 解析器模块
//!
//! 宿主页面的 HTML 解析、DOM 操作、元数据读写与文本节点遍历。

pub mod html;

pub use html::{
    get_body, get_title, html_to_dom, serialize_document, set_lang, set_title, TextWalker,
};
