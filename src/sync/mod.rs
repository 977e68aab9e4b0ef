//! 页面同步模块
//!
//! - **page**: 宿主页面模型与变更订阅
//! - **store**: 语言偏好的持久化
//! - **toggle**: 语言切换按钮
//! - **synchronizer**: 把翻译结果同步到页面的状态机
//!
//! # 基本用法
//!
//! ```rust
//! use dom_i18n::sync::{MemoryStore, Page, Synchronizer};
//! use dom_i18n::translation::LocalizerConfig;
//!
//! let mut page = Page::from_html(b"<html><body><p>Docs</p></body></html>", "utf-8").unwrap();
//! let mut sync = Synchronizer::from_config(LocalizerConfig::default(), MemoryStore::new()).unwrap();
//! sync.start(&mut page);
//! sync.toggle(&mut page);
//! assert_eq!(page.lang().as_deref(), Some("zh-CN"));
//! ```

pub mod page;
pub mod store;
pub mod synchronizer;
pub mod toggle;

pub use page::{MutationKind, MutationRecord, Page};
pub use store::{FileStore, MemoryStore, PreferenceStore};
pub use synchronizer::{PassReport, SyncState, Synchronizer};
pub use toggle::{ensure_toggle, place_toggle, sync_toggle_label, toggle_style};
