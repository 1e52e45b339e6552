use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::api::auth::MIN_PASSWORD_LEN;

use crate::auth::use_auth;
use crate::components::icons::KeyRound;
use crate::components::ui::{Card, ErrorAlert, use_toast};

#[component]
pub fn PasswordSection() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let error_msg = RwSignal::new(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (c, n, k) = (current.get_untracked(), new.get_untracked(), confirm.get_untracked());
        submitting.set(true);
        error_msg.set(None);
        spawn_local(async move {
            let session = auth.services().session;
            match session.change_password(&c, &n, &k).await {
                Ok(()) => {
                    toast.success("Password updated");
                    for field in [current, new, confirm] {
                        let _ = field.try_set(String::new());
                    }
                }
                Err(e) => {
                    toast.error(e.message().to_string());
                    let _ = error_msg.try_set(Some(e.message().to_string()));
                }
            }
            let _ = submitting.try_set(false);
        });
    };

    let field = move |id: &'static str, label: &'static str, value: RwSignal<String>, autocomplete: &'static str| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type="password"
                    autocomplete=autocomplete
                    class="input input-bordered"
                    prop:value=value
                    on:input=move |ev| value.set(event_target_value(&ev))
                    required
                />
            </div>
        }
    };

    view! {
        <Card title="Change password" subtitle=format!("Use at least {} characters", MIN_PASSWORD_LEN)>
            <form class="space-y-2 max-w-md" on:submit=on_submit>
                <ErrorAlert message=error_msg />
                {field("current", "Current password", current, "current-password")}
                {field("new", "New password", new, "new-password")}
                {field("confirm", "Confirm new password", confirm, "new-password")}
                <button class="btn btn-primary gap-2 mt-4" disabled=move || submitting.get()>
                    <KeyRound attr:class="h-4 w-4" />
                    "Update password"
                </button>
            </form>
        </Card>
    }
}
