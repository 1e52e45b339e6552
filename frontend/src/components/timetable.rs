use chrono::Datelike;
use leptos::prelude::*;
use uniportal::api::TimetableApi;
use uniportal::api::timetable::group_by_day;
use uniportal::query::QueryKey;
use uniportal_shared::{DayOfWeek, TimetableEntry, TimetableStats};

use crate::auth::use_services;
use crate::components::icons::{Clock, MapPin, RefreshCw, User};
use crate::components::layout::PageHeader;
use crate::components::ui::{Card, EmptyState, ErrorAlert, Spinner, StatCard, Tabs};
use crate::query::use_query;

#[component]
pub fn TimetablePage() -> impl IntoView {
    let today = DayOfWeek::from(use_services().today().weekday());

    let week = use_query(QueryKey::from(["timetable", "current"]), |client| async move {
        TimetableApi::new(&client).current().await
    });
    let stats = use_query(QueryKey::from(["timetable", "stats"]), |client| async move {
        TimetableApi::new(&client).stats().await
    });
    let upcoming = use_query(QueryKey::from(["timetable", "upcoming"]), |client| async move {
        TimetableApi::new(&client).upcoming().await
    });

    let active = RwSignal::new(today.as_path().to_string());
    let tabs = DayOfWeek::ALL
        .iter()
        .map(|d| (d.as_path().to_string(), d.short_label().to_string()))
        .collect::<Vec<_>>();

    let day_entries = move || {
        let entries = week.data.get().unwrap_or_default();
        let key = active.get();
        group_by_day(&entries)
            .into_iter()
            .find(|(day, _)| day.as_path() == key)
            .map(|(_, classes)| classes)
            .unwrap_or_default()
    };

    let stat = move |f: fn(&TimetableStats) -> String| {
        Signal::derive(move || {
            stats
                .data
                .with(|s| s.as_ref().map(f))
                .unwrap_or_else(|| "-".to_string())
        })
    };

    let loading = move || week.loading.get();
    let reload = move |_| {
        week.reload();
        stats.reload();
        upcoming.reload();
    };

    view! {
        <PageHeader title="Timetable" subtitle=format!("Today is {}", today)>
            <button on:click=reload disabled=loading class="btn btn-ghost btn-circle">
                <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
            </button>
        </PageHeader>

        <ErrorAlert message=Signal::derive(move || week.error_message()) />

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <StatCard title="Classes per week" value=stat(|s| s.total_classes.to_string()) accent="text-primary" />
            <StatCard title="Courses" value=stat(|s| s.total_courses.to_string()) />
            <StatCard title="Hours per week" value=stat(|s| format!("{:.1}", s.hours_per_week)) />
            <StatCard
                title="Busiest day"
                value=stat(|s| s.busiest_day.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()))
                accent="text-secondary"
            />
        </div>

        <div class="grid gap-8 lg:grid-cols-3">
            <div class="lg:col-span-2 space-y-4">
                <Tabs tabs=tabs active=active />
                <Card>
                    <Show
                        when=move || !day_entries().is_empty()
                        fallback=move || {
                            if loading() {
                                view! { <Spinner /> }.into_any()
                            } else {
                                view! { <EmptyState text="No classes on this day" /> }.into_any()
                            }
                        }
                    >
                        <ul class="space-y-3">
                            <For each=day_entries key=|e| e.id.clone() children=|e| view! { <EntryRow entry=e /> } />
                        </ul>
                    </Show>
                </Card>
            </div>
            <Card title="Upcoming">
                <Show
                    when=move || upcoming.data.with(|u| u.as_ref().is_some_and(|u| !u.is_empty()))
                    fallback=|| view! { <EmptyState text="Nothing coming up" /> }
                >
                    <ul class="space-y-3">
                        <For
                            each=move || upcoming.data.get().unwrap_or_default()
                            key=|e| e.id.clone()
                            children=|e| view! { <EntryRow entry=e show_day=true /> }
                        />
                    </ul>
                </Show>
            </Card>
        </div>
    }
}

#[component]
fn EntryRow(entry: TimetableEntry, #[prop(optional)] show_day: bool) -> impl IntoView {
    let when = if show_day {
        format!("{} {} - {}", entry.day.short_label(), entry.start_time, entry.end_time)
    } else {
        format!("{} - {}", entry.start_time, entry.end_time)
    };
    view! {
        <li class="rounded-box bg-base-200 p-3 space-y-1">
            <div class="font-semibold">
                <span class="font-mono">{entry.course_code}</span>
                " · "
                {entry.course_name}
            </div>
            <div class="flex flex-wrap gap-4 text-sm opacity-70">
                <span class="flex items-center gap-1">
                    <Clock attr:class="h-4 w-4" />
                    {when}
                </span>
                {entry.teacher_name.map(|t| view! {
                    <span class="flex items-center gap-1">
                        <User attr:class="h-4 w-4" />
                        {t}
                    </span>
                })}
                {entry.room.map(|r| view! {
                    <span class="flex items-center gap-1">
                        <MapPin attr:class="h-4 w-4" />
                        {r}
                    </span>
                })}
            </div>
        </li>
    }
}
