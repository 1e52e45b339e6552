use leptos::prelude::*;
use uniportal::api::DashboardApi;
use uniportal::query::QueryKey;
use uniportal_shared::{DashboardSummary, Notification, TimetableEntry};

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::layout::PageHeader;
use crate::components::ui::{Badge, BadgeVariant, Card, EmptyState, ErrorAlert, Spinner, StatCard};
use crate::query::use_query;
use crate::web::Interval;
use crate::web::route::AppRoute;
use crate::web::router::Link;

const AUTO_REFRESH_MS: u32 = 5 * 60 * 1000;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let summary = use_query(QueryKey::from(["dashboard", "summary"]), |client| async move {
        DashboardApi::new(&client).summary().await
    });
    let today = use_query(QueryKey::from(["dashboard", "today"]), |client| async move {
        DashboardApi::new(&client).today_classes().await
    });
    let notifications = use_query(
        QueryKey::from(["dashboard", "notifications"]),
        |client| async move { DashboardApi::new(&client).notifications().await },
    );

    let reload_all = move || {
        summary.reload();
        today.reload();
        notifications.reload();
    };

    // 随页面卸载一起释放
    let _auto_refresh = StoredValue::new_local(Interval::new(AUTO_REFRESH_MS, reload_all));

    let loading = move || summary.loading.get() || today.loading.get() || notifications.loading.get();
    let stat = move |f: fn(&DashboardSummary) -> String| {
        Signal::derive(move || {
            summary
                .data
                .with(|s| s.as_ref().map(f))
                .unwrap_or_else(|| "-".to_string())
        })
    };
    let greeting = move || {
        auth.state
            .with(|s| s.identity().map(|u| format!("Welcome back, {}", u.name)))
            .unwrap_or_else(|| "Welcome back".to_string())
    };

    view! {
        <PageHeader title="Dashboard" subtitle=greeting()>
            <button on:click=move |_| reload_all() disabled=loading class="btn btn-ghost btn-circle">
                <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
            </button>
        </PageHeader>

        <ErrorAlert message=Signal::derive(move || summary.error_message()) />

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <StatCard
                title="Enrolled courses"
                value=stat(|s| s.enrolled_courses.to_string())
                accent="text-primary"
            />
            <StatCard title="Total credits" value=stat(|s| s.total_credits.to_string()) />
            <StatCard
                title="Classes today"
                value=stat(|s| s.classes_today.to_string())
                accent="text-secondary"
            />
            <StatCard
                title="Attendance"
                value=stat(|s| {
                    s.attendance_percentage
                        .map(|p| format!("{:.0}%", p))
                        .unwrap_or_else(|| "-".to_string())
                })
                desc="This semester"
            />
        </div>

        <div class="grid gap-8 md:grid-cols-2">
            <Card title="Today's classes">
                <TodayClasses entries=today.data loading=today.loading />
                <Link route=AppRoute::Timetable class="btn btn-link btn-sm self-end">
                    "Full timetable"
                </Link>
            </Card>
            <Card title="Notifications">
                <div class="flex justify-end -mt-10">
                    {move || {
                        let unread = summary.data.with(|s| s.as_ref().map_or(0, |s| s.unread_notifications));
                        (unread > 0).then(|| view! {
                            <Badge variant=BadgeVariant::Primary>{format!("{} unread", unread)}</Badge>
                        })
                    }}
                </div>
                <NotificationList items=notifications.data loading=notifications.loading />
            </Card>
        </div>
    }
}

#[component]
fn TodayClasses(entries: RwSignal<Option<Vec<TimetableEntry>>>, loading: RwSignal<bool>) -> impl IntoView {
    let list = move || entries.get().unwrap_or_default();
    view! {
        <Show
            when=move || !list().is_empty()
            fallback=move || {
                if loading.get() {
                    view! { <Spinner /> }.into_any()
                } else {
                    view! { <EmptyState text="No classes today" /> }.into_any()
                }
            }
        >
            <ul class="space-y-3">
                <For
                    each=list
                    key=|e| e.id.clone()
                    children=|entry| {
                        view! {
                            <li class="flex items-center justify-between rounded-box bg-base-200 p-3">
                                <div>
                                    <div class="font-semibold">
                                        <span class="font-mono">{entry.course_code}</span>
                                        " · "
                                        {entry.course_name}
                                    </div>
                                    <div class="text-sm opacity-70">
                                        {entry.teacher_name.unwrap_or_default()}
                                    </div>
                                </div>
                                <div class="text-right text-sm">
                                    <div class="flex items-center gap-1 justify-end">
                                        <Clock attr:class="h-4 w-4 opacity-50" />
                                        {format!("{} - {}", entry.start_time, entry.end_time)}
                                    </div>
                                    {entry.room.map(|room| view! {
                                        <div class="flex items-center gap-1 justify-end opacity-70">
                                            <MapPin attr:class="h-4 w-4 opacity-50" />
                                            {room}
                                        </div>
                                    })}
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}

#[component]
fn NotificationList(items: RwSignal<Option<Vec<Notification>>>, loading: RwSignal<bool>) -> impl IntoView {
    let list = move || items.get().unwrap_or_default();
    view! {
        <Show
            when=move || !list().is_empty()
            fallback=move || {
                if loading.get() {
                    view! { <Spinner /> }.into_any()
                } else {
                    view! { <EmptyState text="You're all caught up" /> }.into_any()
                }
            }
        >
            <ul class="space-y-3">
                <For
                    each=list
                    key=|n| n.id.clone()
                    children=|n| {
                        let class = if n.read {
                            "flex gap-3 p-3 rounded-box opacity-60"
                        } else {
                            "flex gap-3 p-3 rounded-box bg-base-200"
                        };
                        view! {
                            <li class=class>
                                <Bell attr:class="h-5 w-5 text-primary shrink-0" />
                                <div>
                                    <div class="font-semibold">{n.title}</div>
                                    <p class="text-sm opacity-80">{n.message}</p>
                                    {n.created_at.map(|t| view! { <p class="text-xs opacity-50">{t}</p> })}
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
        </Show>
    }
}
