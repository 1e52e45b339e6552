//! 选课页面
//!
//! `SelectionFlow` 驱动 课程 → 教师 → 时段 的级联选择，状态存放在 `SignalCell` 中，
//! 面板和列表两个子组件共享同一个 `SelectionContext`。

mod selection_list;
mod selection_panel;
mod signal_cell;

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::api::CoursesApi;
use uniportal::error::PortalResult;
use uniportal::query::QueryKey;
use uniportal::selection::{SelectionFlow, SelectionState};
use uniportal_shared::Course;

use crate::auth::use_services;
use crate::components::icons::RefreshCw;
use crate::components::layout::PageHeader;
use crate::components::ui::{Badge, BadgeVariant, Card, EmptyState, ErrorAlert, Spinner, Tabs};
use crate::query::use_query;
use crate::web::route::AppRoute;
use crate::web::router::Link;

use selection_list::SelectionList;
use selection_panel::SelectionPanel;
pub use signal_cell::SignalCell;

type Flow = Rc<SelectionFlow<SignalCell>>;

/// 结果可能在离开选课页之后才返回，此时信号已销毁，结果直接丢弃。
/// 返回结果是否写入了页面。
fn record_load_result(target: RwSignal<Option<String>>, result: PortalResult<()>) -> bool {
    let message = result.err().map(|e| e.message().to_string());
    let dropped = target.try_set(message).is_some();
    if dropped {
        tracing::debug!("course selection view unmounted, dropping load result");
    }
    !dropped
}

#[derive(Clone, Copy)]
pub struct SelectionContext {
    pub state: RwSignal<SelectionState>,
    /// 读取类失败（课程/教师/时段/列表）显示在页面内
    pub load_error: RwSignal<Option<String>>,
    flow: StoredValue<Flow, LocalStorage>,
}

impl SelectionContext {
    /// 在后台执行一次流程操作
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(Flow) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        if let Some(flow) = self.flow.try_get_value() {
            spawn_local(op(flow));
        }
    }

    pub fn with_flow<R>(&self, f: impl FnOnce(&Flow) -> R) -> Option<R> {
        self.flow.try_with_value(f)
    }

    /// 读取失败写入页面错误，成功时清除
    pub fn track_load(&self, result: PortalResult<()>) {
        record_load_result(self.load_error, result);
    }

    pub fn reload(&self) {
        let ctx = *self;
        ctx.spawn(move |flow| async move {
            let result = match flow.load_courses().await {
                Ok(_) => flow.refresh_selections().await.map(|_| ()),
                Err(e) => Err(e),
            };
            ctx.track_load(result);
        });
    }
}

fn use_selection() -> SelectionContext {
    use_context::<SelectionContext>().expect("SelectionContext should be provided")
}

#[component]
pub fn CoursesPage() -> impl IntoView {
    let services = use_services();
    let state = RwSignal::new(SelectionState::default());
    let flow = Rc::new(SelectionFlow::new(
        services.client.clone(),
        services.queries.clone(),
        SignalCell(state),
    ));
    let ctx = SelectionContext {
        state,
        load_error: RwSignal::new(None),
        flow: StoredValue::new_local(flow),
    };
    provide_context(ctx);
    ctx.reload();

    let active = RwSignal::new("select".to_string());
    let tabs = vec![
        ("select".to_string(), "Select courses".to_string()),
        ("catalog".to_string(), "Catalog".to_string()),
    ];
    let credits = move || format!("{} credits selected", state.with(SelectionState::total_credits));

    view! {
        <PageHeader title="Course Selection" subtitle="Pick a course, a teacher and a time slot">
            <Badge variant=BadgeVariant::Info>{credits}</Badge>
            <button on:click=move |_| ctx.reload() class="btn btn-ghost btn-circle">
                <RefreshCw attr:class="h-5 w-5" />
            </button>
        </PageHeader>

        <ErrorAlert message=ctx.load_error />
        <Tabs tabs=tabs active=active />

        {move || {
            if active.with(|a| a == "catalog") {
                view! { <CatalogList /> }.into_any()
            } else {
                view! {
                    <div class="grid gap-8 lg:grid-cols-2">
                        <SelectionPanel />
                        <SelectionList />
                    </div>
                }
                .into_any()
            }
        }}
    }
}

#[component]
fn CatalogList() -> impl IntoView {
    let catalog = use_query(QueryKey::from(["courses", "catalog"]), |client| async move {
        CoursesApi::new(&client).catalog().await
    });
    let courses = move || catalog.data.get().unwrap_or_default();

    view! {
        <ErrorAlert message=Signal::derive(move || catalog.error_message()) />
        <Show
            when=move || !courses().is_empty()
            fallback=move || {
                if catalog.loading.get() {
                    view! { <Spinner label="Loading catalog..." /> }.into_any()
                } else {
                    view! { <EmptyState text="No courses are offered right now" /> }.into_any()
                }
            }
        >
            <div class="grid gap-4 md:grid-cols-2 xl:grid-cols-3">
                <For each=courses key=|c| c.id.clone() children=|course| view! { <CatalogCard course=course /> } />
            </div>
        </Show>
    }
}

#[component]
fn CatalogCard(course: Course) -> impl IntoView {
    let route = AppRoute::CourseDetail(course.id.clone());
    view! {
        <Card title=course.name.clone() subtitle=course.code.clone()>
            <p class="text-sm opacity-80 line-clamp-3">{course.description.unwrap_or_default()}</p>
            <div class="card-actions justify-between items-center mt-2">
                <div class="flex gap-2">
                    <Badge outline=true>{format!("{} credits", course.credits)}</Badge>
                    {course.department.map(|d| view! { <Badge variant=BadgeVariant::Primary outline=true>{d}</Badge> })}
                </div>
                <Link route=route class="btn btn-sm btn-primary">"Details"</Link>
            </div>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniportal::error::PortalError;

    #[test]
    fn load_result_sets_and_clears_page_error() {
        let owner = Owner::new();
        owner.with(|| {
            let error = RwSignal::new(None);
            assert!(record_load_result(error, Err(PortalError::network("offline"))));
            assert_eq!(error.get_untracked().as_deref(), Some("offline"));
            assert!(record_load_result(error, Ok(())));
            assert_eq!(error.get_untracked(), None);
        });
    }

    #[test]
    fn load_result_after_unmount_is_dropped() {
        let owner = Owner::new();
        let error = owner.with(|| RwSignal::new(None));
        error.dispose();
        assert!(!record_load_result(error, Err(PortalError::network("offline"))));
    }
}
