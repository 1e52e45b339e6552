//! 设置页：偏好、密码、接口地址、诊断

mod api_section;
mod debug_section;
mod password_section;
mod preferences_section;

use leptos::prelude::*;

use crate::components::layout::PageHeader;
use crate::components::ui::Tabs;

use api_section::ApiSection;
use debug_section::DebugSection;
use password_section::PasswordSection;
use preferences_section::PreferencesSection;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let active = RwSignal::new("preferences".to_string());
    let tabs = [
        ("preferences", "Preferences"),
        ("password", "Password"),
        ("connection", "Connection"),
        ("diagnostics", "Diagnostics"),
    ]
    .into_iter()
    .map(|(k, l)| (k.to_string(), l.to_string()))
    .collect();

    view! {
        <PageHeader title="Settings" subtitle="Manage your account and this device" />
        <Tabs tabs=tabs active=active />
        {move || match active.get().as_str() {
            "password" => view! { <PasswordSection /> }.into_any(),
            "connection" => view! { <ApiSection /> }.into_any(),
            "diagnostics" => view! { <DebugSection /> }.into_any(),
            _ => view! { <PreferencesSection /> }.into_any(),
        }}
    }
}
