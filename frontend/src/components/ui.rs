//! 通用界面组件，不含任何领域知识

use std::time::Duration;

use leptos::prelude::*;

use crate::components::icons::{ChevronDown, CircleAlert, CircleCheck};

const TOAST_DURATION: Duration = Duration::from_secs(3);

// ============================================================================
// Card
// ============================================================================

#[component]
pub fn Card(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] subtitle: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("card bg-base-100 shadow-xl {}", class)>
            <div class="card-body">
                {title.map(|t| view! { <h3 class="card-title">{t}</h3> })}
                {subtitle.map(|s| view! { <p class="text-base-content/70 text-sm">{s}</p> })}
                {children()}
            </div>
        </div>
    }
}

/// 仪表盘统计块
#[component]
pub fn StatCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] desc: Option<String>,
    #[prop(optional, into)] accent: String,
) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{title}</div>
            <div class=format!("stat-value {}", accent)>{move || value.get()}</div>
            {desc.map(|d| view! { <div class="stat-desc">{d}</div> })}
        </div>
    }
}

// ============================================================================
// Badge
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Primary,
    Success,
    Warning,
    Error,
    Info,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            Self::Neutral => "badge-neutral",
            Self::Primary => "badge-primary",
            Self::Success => "badge-success",
            Self::Warning => "badge-warning",
            Self::Error => "badge-error",
            Self::Info => "badge-info",
        }
    }
}

#[component]
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    #[prop(optional)] outline: bool,
    children: Children,
) -> impl IntoView {
    let class = format!(
        "badge {}{}",
        variant.class(),
        if outline { " badge-outline" } else { "" }
    );
    view! { <span class=class>{children()}</span> }
}

// ============================================================================
// Tabs
// ============================================================================

/// `tabs` 为 (key, label) 列表，`active` 保存当前 key
#[component]
pub fn Tabs(tabs: Vec<(String, String)>, active: RwSignal<String>) -> impl IntoView {
    view! {
        <div role="tablist" class="tabs tabs-boxed bg-base-100 w-fit">
            {tabs
                .into_iter()
                .map(|(key, label)| {
                    let is_active = {
                        let key = key.clone();
                        move || active.with(|a| *a == key)
                    };
                    view! {
                        <a
                            role="tab"
                            class=move || if is_active() { "tab tab-active" } else { "tab" }
                            on:click=move |_| active.set(key.clone())
                        >
                            {label}
                        </a>
                    }
                })
                .collect_view()}
        </div>
    }
}

// ============================================================================
// Dropdown
// ============================================================================

#[component]
pub fn Dropdown(
    #[prop(into)] label: Signal<String>,
    #[prop(optional)] align_end: bool,
    children: Children,
) -> impl IntoView {
    let class = if align_end {
        "dropdown dropdown-end"
    } else {
        "dropdown"
    };
    view! {
        <div class=class>
            <div tabindex="0" role="button" class="btn btn-ghost gap-2">
                {move || label.get()}
                <ChevronDown attr:class="h-4 w-4 opacity-60" />
            </div>
            <ul tabindex="0" class="dropdown-content z-[1] menu p-2 shadow bg-base-100 rounded-box w-56">
                {children()}
            </ul>
        </div>
    }
}

// ============================================================================
// Feedback
// ============================================================================

#[component]
pub fn Spinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-8 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            {label}
        </div>
    }
}

#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <CircleAlert attr:class="h-5 w-5 shrink-0" />
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] text: String) -> impl IntoView {
    view! { <div class="text-center py-8 text-base-content/50">{text}</div> }
}

// ============================================================================
// Toast
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    pub message: String,
    pub is_error: bool,
}

/// 全局消息提示，同时只显示最新一条
#[derive(Clone, Copy)]
pub struct ToastContext {
    current: RwSignal<Option<Toast>>,
}

impl ToastContext {
    fn show(&self, message: String, is_error: bool) {
        let id = self
            .current
            .with_untracked(|t| t.as_ref().map_or(0, |t| t.id + 1));
        self.current.set(Some(Toast {
            id,
            message,
            is_error,
        }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), true);
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn provide_toast() -> ToastContext {
    let ctx = ToastContext {
        current: RwSignal::new(None),
    };
    provide_context(ctx);
    ctx
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toast = use_toast();
    let current = toast.current;

    // 3 秒后清除；期间出现新消息则由新消息的计时器负责
    Effect::new(move |_| {
        if let Some(id) = current.with(|t| t.as_ref().map(|t| t.id)) {
            set_timeout(
                move || {
                    if current.with_untracked(|t| t.as_ref().map(|t| t.id)) == Some(id) {
                        current.set(None);
                    }
                },
                TOAST_DURATION,
            );
        }
    });

    view! {
        <Show when=move || current.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div
                    class=move || {
                        if current.with(|t| t.as_ref().is_some_and(|t| t.is_error)) {
                            "alert alert-error shadow-lg"
                        } else {
                            "alert alert-success shadow-lg"
                        }
                    }
                    on:click=move |_| toast.dismiss()
                >
                    {move || {
                        if current.with(|t| t.as_ref().is_some_and(|t| t.is_error)) {
                            view! { <CircleAlert attr:class="h-5 w-5" /> }.into_any()
                        } else {
                            view! { <CircleCheck attr:class="h-5 w-5" /> }.into_any()
                        }
                    }}
                    <span>{move || current.with(|t| t.as_ref().map(|t| t.message.clone()).unwrap_or_default())}</span>
                </div>
            </div>
        </Show>
    }
}
