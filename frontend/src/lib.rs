//! UniPortal 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::route` / `web::router`: 路由定义与路由服务
//! - `web`: 浏览器 API 适配（传输层、存储、导航器、定时器）
//! - `auth`: 会话状态镜像，`query`: 查询钩子
//! - `components`: 页面与通用 UI 组件
//!
//! 业务逻辑（请求、缓存、会话、选课流程）都在 `uniportal` 核心库中。

mod auth;
mod components {
    pub mod course_detail;
    pub mod courses;
    pub mod dashboard;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod not_found;
    pub mod profile;
    pub mod settings;
    pub mod timetable;
    pub mod ui;
}
mod logging;
mod preferences;
mod query;
pub(crate) mod web;

use leptos::prelude::*;

use crate::auth::{AuthContext, Services, init_auth};
use crate::components::course_detail::CourseDetailPage;
use crate::components::courses::CoursesPage;
use crate::components::dashboard::DashboardPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::components::profile::ProfilePage;
use crate::components::settings::SettingsPage;
use crate::components::timetable::TimetablePage;
use crate::components::ui::{ToastHost, provide_toast};
use crate::preferences::provide_preferences;
use web::route::AppRoute;
use web::router::{BrowserNavigator, Router, RouterOutlet};

/// 路由匹配函数：需要认证的页面包在 `AppShell` 中
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        AppRoute::Dashboard => view! { <AppShell><DashboardPage /></AppShell> }.into_any(),
        AppRoute::Courses => view! { <AppShell><CoursesPage /></AppShell> }.into_any(),
        AppRoute::CourseDetail(id) => {
            view! { <AppShell><CourseDetailPage course_id=id /></AppShell> }.into_any()
        }
        AppRoute::Timetable => view! { <AppShell><TimetablePage /></AppShell> }.into_any(),
        AppRoute::Profile => view! { <AppShell><ProfilePage /></AppShell> }.into_any(),
        AppRoute::Settings => view! { <AppShell><SettingsPage /></AppShell> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    logging::init();

    // 1. 核心服务与认证上下文
    let navigator = BrowserNavigator::new();
    let services = Services::new(navigator);
    provide_preferences(services.store.clone());
    let auth_ctx = AuthContext::new(services);
    provide_context(auth_ctx);
    provide_toast();

    // 2. 恢复会话，并订阅服务器拆除会话的通知
    init_auth(&auth_ctx, navigator);

    // 3. 认证信号注入路由服务；恢复期间不挂载路由，避免深链接被守卫提前重定向
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let is_restoring = auth_ctx.is_restoring_signal();

    view! {
        <ToastHost />
        <Show
            when=move || !is_restoring.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <Router is_authenticated=is_authenticated>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </Show>
    }
}
