use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::preferences::Theme;

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::components::ui::{Dropdown, use_toast};
use crate::preferences::use_preferences;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

/// 已登录页面的外壳：导航栏 + 内容区
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let prefs = use_preferences();
    let toast = use_toast();

    let user_label = Signal::derive(move || {
        auth.state
            .with(|s| s.identity().map(|u| u.name.clone()))
            .unwrap_or_else(|| "Account".to_string())
    });
    let initials = move || {
        auth.state
            .with(|s| s.identity().map(|u| u.initials()))
            .unwrap_or_default()
    };

    let nav_class = move |section: AppRoute| {
        Signal::derive(move || {
            if router.current_route().with(|r| r.section()) == section {
                "btn btn-ghost btn-sm gap-2 btn-active".to_string()
            } else {
                "btn btn-ghost btn-sm gap-2".to_string()
            }
        })
    };

    let on_toggle_theme = move |_| {
        if let Err(e) = prefs.toggle_theme() {
            toast.error(format!("Could not save theme: {}", e.message()));
        }
    };

    let on_logout = move |_| {
        spawn_local(async move {
            logout(&auth).await;
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 font-sans">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-2">
                    <GraduationCap attr:class="text-primary h-6 w-6" />
                    <Link route=AppRoute::Dashboard class="btn btn-ghost text-xl">
                        "UniPortal"
                    </Link>
                    <nav class="hidden md:flex gap-1 ml-4">
                        <Link route=AppRoute::Dashboard class=nav_class(AppRoute::Dashboard)>
                            <LayoutDashboard attr:class="h-4 w-4" />
                            "Dashboard"
                        </Link>
                        <Link route=AppRoute::Courses class=nav_class(AppRoute::Courses)>
                            <BookOpen attr:class="h-4 w-4" />
                            "Courses"
                        </Link>
                        <Link route=AppRoute::Timetable class=nav_class(AppRoute::Timetable)>
                            <Calendar attr:class="h-4 w-4" />
                            "Timetable"
                        </Link>
                    </nav>
                </div>
                <div class="flex-none gap-2">
                    <button class="btn btn-ghost btn-circle" on:click=on_toggle_theme>
                        {move || {
                            if prefs.theme().get() == Theme::Dark {
                                view! { <Sun attr:class="h-5 w-5" /> }.into_any()
                            } else {
                                view! { <Moon attr:class="h-5 w-5" /> }.into_any()
                            }
                        }}
                    </button>
                    <div class="avatar placeholder hidden md:inline-flex">
                        <div class="bg-primary text-primary-content rounded-full w-8">
                            <span class="text-xs">{initials}</span>
                        </div>
                    </div>
                    <Dropdown label=user_label align_end=true>
                        <li>
                            <Link route=AppRoute::Profile>
                                <User attr:class="h-4 w-4" />
                                "Profile"
                            </Link>
                        </li>
                        <li>
                            <Link route=AppRoute::Settings>
                                <Sliders attr:class="h-4 w-4" />
                                "Settings"
                            </Link>
                        </li>
                        <li>
                            <a on:click=on_logout class="text-error hover:bg-error/10">
                                <LogOut attr:class="h-4 w-4" />
                                "Log out"
                            </a>
                        </li>
                    </Dropdown>
                </div>
            </div>
            <main class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">{children()}</main>
        </div>
    }
}

/// 页面标题行
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between">
            <div>
                <h1 class="text-3xl font-bold">{title}</h1>
                {subtitle.map(|s| view! { <p class="text-base-content/70">{s}</p> })}
            </div>
            <div class="flex gap-2">{children.map(|c| c())}</div>
        </div>
    }
}
