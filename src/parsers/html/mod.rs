//! HTML解析和处理模块
//!
//! - `dom`: 基础DOM操作
//! - `metadata`: 文档元数据（语言、标题）
//! - `serializer`: 序列化功能
//! - `walker`: 可翻译文本节点的惰性遍历

pub mod dom;
pub mod metadata;
pub mod serializer;
pub mod walker;

pub use dom::{
    append_child, create_element_node, create_text_node, find_element_by_id, find_nodes,
    get_child_node_by_name, get_node_attr, get_node_name, get_parent_node, get_text, html_to_dom,
    remove_child, set_node_attr, set_text,
};
pub use metadata::{
    get_body, get_html_element, get_lang, get_title, get_title_text_node, set_lang, set_title,
};
pub use serializer::serialize_document;
pub use walker::{TextNodes, TextWalker};
