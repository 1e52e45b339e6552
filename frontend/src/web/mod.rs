//! 浏览器 API 适配层
//!
//! 直接封装 `web_sys`，为核心库提供传输层、存储和导航器实现。

mod env;
mod http;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use env::{apply_theme, page_location, reload_page, runtime_base_url};
pub use http::FetchTransport;
pub use storage::BrowserStorage;
pub use timer::Interval;
