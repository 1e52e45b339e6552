use leptos::prelude::*;
use uniportal::selection::SelectionState;

use super::use_selection;
use crate::components::icons::{Clock, Trash2};
use crate::components::ui::{Badge, BadgeVariant, Card, EmptyState, use_toast};

/// 当前选课（含尚未确认的乐观记录）
#[component]
pub fn SelectionList() -> impl IntoView {
    let ctx = use_selection();
    let toast = use_toast();
    let state = ctx.state;

    let on_remove = move |id: String| {
        ctx.spawn(move |flow| async move {
            match flow.remove(&id).await {
                Ok(()) => toast.success("Selection removed"),
                Err(e) => toast.error(e.message().to_string()),
            }
        });
    };

    let rows = move || state.with(SelectionState::visible_selections);
    let total = move || state.with(SelectionState::total_credits);

    view! {
        <Card title="My selections">
            <Show when=move || !rows().is_empty() fallback=|| view! { <EmptyState text="No courses selected yet" /> }>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Course"</th>
                                <th class="hidden md:table-cell">"Teacher"</th>
                                <th>"Slot"</th>
                                <th>"Credits"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=rows
                                key=|s| s.id.clone()
                                children=move |selection| {
                                    let id = selection.id.clone();
                                    let pending = {
                                        let id = id.clone();
                                        move || state.with(|s| s.is_pending(&id))
                                    };
                                    let row_class = {
                                        let pending = pending.clone();
                                        move || if pending() { "opacity-50" } else { "" }
                                    };
                                    view! {
                                        <tr class=row_class>
                                            <td>
                                                <div class="font-mono text-sm font-bold">{selection.course_code}</div>
                                                <div class="text-sm opacity-70">{selection.course_name}</div>
                                            </td>
                                            <td class="hidden md:table-cell">{selection.teacher_name}</td>
                                            <td>
                                                <div class="flex items-center gap-1 text-sm">
                                                    <Clock attr:class="h-4 w-4 opacity-50" />
                                                    {selection.slot_label}
                                                </div>
                                            </td>
                                            <td>
                                                <Badge variant=BadgeVariant::Neutral outline=true>
                                                    {selection.credits}
                                                </Badge>
                                            </td>
                                            <td>
                                                <button
                                                    class="btn btn-ghost btn-sm btn-square text-error"
                                                    disabled=pending
                                                    on:click=move |_| on_remove(id.clone())
                                                >
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                        <tfoot>
                            <tr>
                                <td colspan="3" class="text-right">"Total credits"</td>
                                <td colspan="2" class="font-bold">{total}</td>
                            </tr>
                        </tfoot>
                    </table>
                </div>
            </Show>
        </Card>
    }
}
