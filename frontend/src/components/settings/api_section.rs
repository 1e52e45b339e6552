use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::probe::{ProbeReport, candidate_base_urls, probe};
use uniportal_shared::STORAGE_BASE_URL_KEY;

use crate::auth::use_auth;
use crate::components::icons::Wifi;
use crate::components::ui::{Badge, BadgeVariant, Card, EmptyState, use_toast};
use crate::web::reload_page;

/// 接口地址：探测候选地址并持久化覆盖值。
/// 应用新地址后整页重载，让会话恢复走新地址。
#[component]
pub fn ApiSection() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();

    let current = RwSignal::new(auth.services().client.base_url());
    let source = format!("{:?}", auth.services().client.base_url_source());
    let draft = RwSignal::new(current.get_untracked());
    let probing = RwSignal::new(false);
    let report = RwSignal::new(None::<ProbeReport>);

    let apply = move |raw: String| {
        let services = auth.services();
        match services.client.set_base_url_override(&raw) {
            Ok(url) => {
                services.queries.clear();
                current.set(url.clone());
                toast.success(format!("Using {}", url));
                reload_page();
            }
            Err(e) => toast.error(e.message().to_string()),
        }
    };

    let on_reset = move |_| {
        let services = auth.services();
        let url = services.client.clear_base_url_override();
        services.queries.clear();
        current.set(url.clone());
        draft.set(url);
        reload_page();
    };

    let on_probe = move |_| {
        let services = auth.services();
        let client = services.client.clone();
        let persisted = services.store.get(STORAGE_BASE_URL_KEY);
        let candidates = candidate_base_urls(client.config(), persisted.as_deref(), client.location());
        probing.set(true);
        spawn_local(async move {
            let transport = client.transport();
            let result = probe(transport.as_ref(), &candidates, client.config().probe_timeout).await;
            let _ = report.try_set(Some(result));
            let _ = probing.try_set(false);
        });
    };

    view! {
        <Card title="API server" subtitle=format!("Resolved from: {}", source)>
            <div class="form-control">
                <label class="label" for="base-url">
                    <span class="label-text">"Base address"</span>
                    <span class="label-text-alt font-mono">{move || current.get()}</span>
                </label>
                <div class="join w-full">
                    <input
                        id="base-url"
                        type="url"
                        class="input input-bordered join-item w-full font-mono"
                        prop:value=draft
                        on:input=move |ev| draft.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary join-item" on:click=move |_| apply(draft.get_untracked())>
                        "Apply"
                    </button>
                </div>
            </div>
            <div class="card-actions justify-between mt-4">
                <button class="btn btn-ghost btn-sm" on:click=on_reset>"Reset to default"</button>
                <button class="btn btn-outline btn-sm gap-2" disabled=move || probing.get() on:click=on_probe>
                    <Wifi attr:class=move || if probing.get() { "h-4 w-4 animate-pulse" } else { "h-4 w-4" } />
                    "Test connections"
                </button>
            </div>
        </Card>

        <Card title="Connection test">
            {move || match report.get() {
                None => view! { <EmptyState text="Run a test to compare candidate servers" /> }.into_any(),
                Some(r) => view! { <ProbeTable report=r on_use=Callback::new(move |url: String| apply(url)) /> }.into_any(),
            }}
        </Card>
    }
}

#[component]
fn ProbeTable(report: ProbeReport, on_use: Callback<String>) -> impl IntoView {
    let best = report.best.clone();
    let summary = format!("{} of {} reachable", report.reachable_count(), report.results.len());
    view! {
        <p class="text-sm opacity-70">{summary}</p>
        <div class="overflow-x-auto w-full">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Address"</th>
                        <th>"Status"</th>
                        <th>"Latency"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {report
                        .results
                        .into_iter()
                        .map(|r| {
                            let is_best = best.as_deref() == Some(r.base_url.as_str());
                            let url = r.base_url.clone();
                            let status = match (r.reachable, r.status) {
                                (true, Some(code)) => view! { <Badge variant=BadgeVariant::Success>{code}</Badge> }.into_any(),
                                (false, _) => view! {
                                    <Badge variant=BadgeVariant::Error>
                                        {r.error.clone().unwrap_or_else(|| "unreachable".to_string())}
                                    </Badge>
                                }.into_any(),
                                (true, None) => view! { <Badge>"ok"</Badge> }.into_any(),
                            };
                            view! {
                                <tr class=if is_best { "bg-success/10" } else { "" }>
                                    <td class="font-mono text-sm">{r.base_url}</td>
                                    <td>{status}</td>
                                    <td>{format!("{} ms", r.latency_ms)}</td>
                                    <td>
                                        {r.reachable.then(|| view! {
                                            <button class="btn btn-xs btn-primary" on:click=move |_| on_use.run(url.clone())>
                                                {if is_best { "Use (fastest)" } else { "Use" }}
                                            </button>
                                        })}
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
