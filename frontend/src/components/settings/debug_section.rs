use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use uniportal::api::DebugApi;
use uniportal::error::PortalResult;

use crate::auth::use_auth;
use crate::components::ui::{Card, ErrorAlert};

#[derive(Clone, Copy, PartialEq)]
enum Probe {
    Health,
    Info,
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// 后端健康检查与自省信息，原样展示
#[component]
pub fn DebugSection() -> impl IntoView {
    let auth = use_auth();
    let output = RwSignal::new(None::<String>);
    let error_msg = RwSignal::new(None::<String>);
    let running = RwSignal::new(None::<Probe>);

    let run = move |which: Probe| {
        let client = auth.services().client;
        running.set(Some(which));
        error_msg.set(None);
        spawn_local(async move {
            let api = DebugApi::new(&client);
            let result: PortalResult<Value> = match which {
                Probe::Health => api.health().await,
                Probe::Info => api.info().await,
            };
            match result {
                Ok(value) => {
                    let _ = output.try_set(Some(pretty(&value)));
                }
                Err(e) => {
                    let _ = error_msg.try_set(Some(e.to_string()));
                }
            }
            let _ = running.try_set(None);
        });
    };

    view! {
        <Card title="Diagnostics" subtitle=format!("Server: {}", auth.services().client.base_url())>
            <div class="flex gap-2">
                <button class="btn btn-outline btn-sm" disabled=move || running.get().is_some() on:click=move |_| run(Probe::Health)>
                    "Health check"
                </button>
                <button class="btn btn-outline btn-sm" disabled=move || running.get().is_some() on:click=move |_| run(Probe::Info)>
                    "Server info"
                </button>
                <Show when=move || running.get().is_some()>
                    <span class="loading loading-spinner loading-sm"></span>
                </Show>
            </div>
            <ErrorAlert message=error_msg />
            <Show when=move || output.with(Option::is_some)>
                <pre class="bg-base-200 rounded-box p-4 text-xs overflow-x-auto">
                    {move || output.get().unwrap_or_default()}
                </pre>
            </Show>
        </Card>
    }
}
