use leptos::prelude::*;
use uniportal::selection::SelectionState;

use super::use_selection;
use crate::components::icons::Plus;
use crate::components::ui::{Card, use_toast};

fn selected(state: RwSignal<SelectionState>, pick: fn(&SelectionState) -> Option<&str>) -> String {
    state.with(|s| pick(s).unwrap_or_default().to_string())
}

/// 课程、教师、时段三级下拉 + 提交
#[component]
pub fn SelectionPanel() -> impl IntoView {
    let ctx = use_selection();
    let toast = use_toast();
    let state = ctx.state;

    let on_course = move |ev: web_sys::Event| {
        let id = event_target_value(&ev);
        ctx.spawn(move |flow| async move {
            ctx.track_load(flow.choose_course(&id).await);
        });
    };
    let on_teacher = move |ev: web_sys::Event| {
        let id = event_target_value(&ev);
        ctx.spawn(move |flow| async move {
            ctx.track_load(flow.choose_teacher(&id).await);
        });
    };
    let on_slot = move |ev: web_sys::Event| {
        let id = event_target_value(&ev);
        if let Some(Err(e)) = ctx.with_flow(|flow| flow.choose_slot(&id)) {
            toast.error(e.message().to_string());
        }
    };
    let on_submit = move |_| {
        ctx.spawn(move |flow| async move {
            match flow.submit().await {
                Ok(record) => toast.success(format!("{} added to your selections", record.course_code)),
                Err(e) => toast.error(e.message().to_string()),
            }
        });
    };

    let no_course = move || state.with(|s| s.selected_course().is_none());
    let no_teacher = move || state.with(|s| s.selected_teacher().is_none());

    view! {
        <Card title="New selection">
            <div class="form-control">
                <label class="label" for="course">
                    <span class="label-text">"Course"</span>
                </label>
                <select
                    id="course"
                    class="select select-bordered w-full"
                    on:change=on_course
                    prop:value=move || selected(state, SelectionState::selected_course)
                >
                    <option value="">"Choose a course"</option>
                    <For
                        each=move || state.with(|s| s.courses.clone())
                        key=|c| c.id.clone()
                        children=|c| {
                            view! {
                                <option value=c.id.clone()>
                                    {format!("{} · {} ({} cr)", c.code, c.name, c.credits)}
                                </option>
                            }
                        }
                    />
                </select>
            </div>

            <div class="form-control">
                <label class="label" for="teacher">
                    <span class="label-text">"Teacher"</span>
                    <Show when=move || state.with(|s| s.teachers_loading)>
                        <span class="loading loading-spinner loading-xs"></span>
                    </Show>
                </label>
                <select
                    id="teacher"
                    class="select select-bordered w-full"
                    disabled=move || no_course() || state.with(|s| s.teachers_loading)
                    on:change=on_teacher
                    prop:value=move || selected(state, SelectionState::selected_teacher)
                >
                    <option value="">"Choose a teacher"</option>
                    <For
                        each=move || state.with(|s| s.teachers.clone())
                        key=|t| t.id.clone()
                        children=|t| {
                            let label = match &t.designation {
                                Some(d) => format!("{} ({})", t.name, d),
                                None => t.name.clone(),
                            };
                            view! { <option value=t.id.clone()>{label}</option> }
                        }
                    />
                </select>
            </div>

            <div class="form-control">
                <label class="label" for="slot">
                    <span class="label-text">"Time slot"</span>
                    <Show when=move || state.with(|s| s.slots_loading)>
                        <span class="loading loading-spinner loading-xs"></span>
                    </Show>
                </label>
                <select
                    id="slot"
                    class="select select-bordered w-full"
                    disabled=move || no_teacher() || state.with(|s| s.slots_loading)
                    on:change=on_slot
                    prop:value=move || selected(state, SelectionState::selected_slot)
                >
                    <option value="">"Choose a time slot"</option>
                    <For
                        each=move || state.with(|s| s.slots.clone())
                        key=|s| s.id.clone()
                        children=|slot| {
                            let mut label = slot.label();
                            if let Some(room) = &slot.room {
                                label.push_str(&format!(" · {}", room));
                            }
                            if let Some(left) = slot.seats_left() {
                                label.push_str(&format!(" · {} seats left", left));
                            }
                            let full = slot.seats_left() == Some(0);
                            view! { <option value=slot.id.clone() disabled=full>{label}</option> }
                        }
                    />
                </select>
            </div>

            <div class="card-actions justify-end mt-4">
                <button
                    class="btn btn-primary gap-2"
                    disabled=move || !state.with(SelectionState::can_submit)
                    on:click=on_submit
                >
                    {move || if state.with(SelectionState::is_submitting) {
                        view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                    } else {
                        view! { <Plus attr:class="h-4 w-4" /> "Add selection" }.into_any()
                    }}
                </button>
            </div>
        </Card>
    }
}
