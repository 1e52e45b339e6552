use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::api::CoursesApi;
use uniportal::query::QueryKey;
use uniportal::selection::SELECTIONS_KEY;
use uniportal_shared::Course;

use crate::auth::use_services;
use crate::components::icons::{ArrowLeft, BookOpen};
use crate::components::ui::{Badge, BadgeVariant, Card, ErrorAlert, Spinner, use_toast};
use crate::query::{QueryHandle, use_query};
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[derive(Clone, Copy, PartialEq)]
enum Action {
    Enroll,
    Drop,
}

#[component]
pub fn CourseDetailPage(course_id: String) -> impl IntoView {
    let course = {
        let id = course_id.clone();
        use_query(QueryKey::new(["courses", "detail", id.as_str()]), move |client| {
            let id = id.clone();
            async move { CoursesApi::new(&client).course(&id).await }
        })
    };
    let selections = use_query(QueryKey::from(SELECTIONS_KEY), |client| async move {
        CoursesApi::new(&client).selections().await
    });

    let enrolled = {
        let id = course_id.clone();
        Signal::derive(move || {
            selections
                .data
                .with(|list| list.as_ref().is_some_and(|l| l.iter().any(|s| s.course_id == id)))
        })
    };

    view! {
        <Link route=AppRoute::Courses class="btn btn-ghost btn-sm gap-2 w-fit">
            <ArrowLeft attr:class="h-4 w-4" />
            "Back to courses"
        </Link>

        <ErrorAlert message=Signal::derive(move || course.error_message()) />

        {move || match course.data.get() {
            Some(c) => view! { <CourseSummary course=c enrolled=enrolled selections=selections /> }.into_any(),
            None if course.loading.get() => view! { <Spinner label="Loading course..." /> }.into_any(),
            None => ().into_any(),
        }}
    }
}

#[component]
fn CourseSummary(
    course: Course,
    enrolled: Signal<bool>,
    selections: QueryHandle<Vec<uniportal_shared::CourseSelection>>,
) -> impl IntoView {
    let services = use_services();
    let toast = use_toast();
    let busy = RwSignal::new(None::<Action>);
    let client = StoredValue::new_local(services.client.clone());
    let queries = StoredValue::new_local(services.queries.clone());
    let ids = StoredValue::new((course.id.clone(), course.code.clone()));

    let run = move |action: Action| {
        let (Some(client), Some(queries)) = (client.try_get_value(), queries.try_get_value()) else {
            return;
        };
        let (id, code) = ids.get_value();
        busy.set(Some(action));
        spawn_local(async move {
            let api = CoursesApi::new(&client);
            let result = match action {
                Action::Enroll => api.enroll(&id).await.map(|_| ()),
                Action::Drop => api.drop_course(&id).await,
            };
            match result {
                Ok(()) => {
                    queries.invalidate_prefix(&SELECTIONS_KEY);
                    queries.invalidate_prefix(&["dashboard"]);
                    queries.invalidate_prefix(&["timetable"]);
                    let verb = if action == Action::Enroll { "Enrolled in" } else { "Dropped" };
                    toast.success(format!("{} {}", verb, code));
                    selections.reload();
                }
                Err(e) => toast.error(e.message().to_string()),
            }
            let _ = busy.try_set(None);
        });
    };

    let is_busy = move |action: Action| move || busy.get() == Some(action);

    view! {
        <Card>
            <div class="flex items-start justify-between gap-4">
                <div class="flex gap-4">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary h-fit">
                        <BookOpen attr:class="h-8 w-8" />
                    </div>
                    <div>
                        <h1 class="text-3xl font-bold">{course.name.clone()}</h1>
                        <p class="font-mono opacity-70">{course.code.clone()}</p>
                    </div>
                </div>
                <Show when=move || enrolled.get()>
                    <Badge variant=BadgeVariant::Success>"Enrolled"</Badge>
                </Show>
            </div>

            <div class="flex gap-2 mt-4">
                <Badge outline=true>{format!("{} credits", course.credits)}</Badge>
                {course.department.clone().map(|d| view! { <Badge variant=BadgeVariant::Primary outline=true>{d}</Badge> })}
            </div>

            <p class="mt-4 leading-relaxed">
                {course.description.clone().unwrap_or_else(|| "No description available.".to_string())}
            </p>

            <div class="card-actions justify-end mt-6">
                <Show
                    when=move || enrolled.get()
                    fallback=move || view! {
                        <button
                            class="btn btn-primary"
                            disabled=move || busy.get().is_some()
                            on:click=move |_| run(Action::Enroll)
                        >
                            <Show when=is_busy(Action::Enroll)>
                                <span class="loading loading-spinner"></span>
                            </Show>
                            "Enroll"
                        </button>
                    }
                >
                    <button
                        class="btn btn-outline btn-error"
                        disabled=move || busy.get().is_some()
                        on:click=move |_| run(Action::Drop)
                    >
                        <Show when=is_busy(Action::Drop)>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        "Drop course"
                    </button>
                </Show>
            </div>
        </Card>
    }
}
