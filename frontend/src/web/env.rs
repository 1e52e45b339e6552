//! 页面环境：地址、运行时配置、主题属性

use uniportal::config::PageLocation;
use uniportal::preferences::Theme;
use wasm_bindgen::JsValue;

pub fn page_location() -> PageLocation {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return PageLocation::default();
    };
    PageLocation::new(
        location.protocol().unwrap_or_default(),
        location.hostname().unwrap_or_default(),
    )
}

/// 读取部署时注入的 `window.UNIPORTAL_CONFIG.apiBaseUrl`
pub fn runtime_base_url() -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &JsValue::from_str("UNIPORTAL_CONFIG")).ok()?;
    if config.is_undefined() || config.is_null() {
        return None;
    }
    js_sys::Reflect::get(&config, &JsValue::from_str("apiBaseUrl"))
        .ok()?
        .as_string()
}

/// 在 `<html>` 上设置 `data-theme`；跟随系统时移除该属性
pub fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let _ = match theme {
        Theme::System => root.remove_attribute("data-theme"),
        _ => root.set_attribute("data-theme", theme.as_attr()),
    };
}

pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}
