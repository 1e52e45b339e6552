use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::api::ProfileApi;
use uniportal::query::QueryKey;
use uniportal::session::SessionState;
use uniportal_shared::{Department, StudentProfile};

use crate::auth::{refresh, use_auth};
use crate::components::icons::RefreshCw;
use crate::components::layout::PageHeader;
use crate::components::ui::{Badge, BadgeVariant, Card, Spinner};
use crate::query::use_query;

/// 档案里只有院系 id 时，用院系列表补全名称
fn department_label(profile: &StudentProfile, departments: &[Department]) -> String {
    let Some(dept) = &profile.department else {
        return "-".to_string();
    };
    if !dept.name.is_empty() && dept.name != dept.id {
        return dept.name.clone();
    }
    departments
        .iter()
        .find(|d| d.id == dept.id)
        .map(|d| d.name.clone())
        .unwrap_or_else(|| dept.id.clone())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let refreshing = RwSignal::new(false);
    let departments = use_query(QueryKey::from(["departments"]), |client| async move {
        ProfileApi::new(&client).departments().await
    });

    let on_refresh = move |_| {
        refreshing.set(true);
        spawn_local(async move {
            refresh(&auth).await;
            let _ = refreshing.try_set(false);
        });
    };
    let stale = move || auth.state.with(|s| matches!(s, SessionState::Authenticated { stale: true, .. }));

    view! {
        <PageHeader title="Profile">
            <Show when=stale>
                <Badge variant=BadgeVariant::Warning>"Offline copy"</Badge>
            </Show>
            <button on:click=on_refresh disabled=move || refreshing.get() class="btn btn-ghost btn-circle">
                <RefreshCw attr:class=move || if refreshing.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
            </button>
        </PageHeader>

        {move || match auth.profile() {
            None => view! { <Spinner /> }.into_any(),
            Some(profile) => {
                let department = departments
                    .data
                    .with(|d| department_label(&profile, d.as_deref().unwrap_or_default()));
                view! { <ProfileDetails profile=profile department=department /> }.into_any()
            }
        }}
    }
}

#[component]
fn ProfileDetails(profile: StudentProfile, department: String) -> impl IntoView {
    let identity = profile.identity.clone();
    let rows = vec![
        ("Student ID", profile.student_id.clone().unwrap_or_else(|| "-".to_string())),
        ("Department", department),
        ("Section", profile.section.clone().unwrap_or_else(|| "-".to_string())),
        ("Semester", profile.semester.to_string()),
        ("Academic year", format!("Year {}", profile.academic_year)),
        ("Batch", profile.batch_year.to_string()),
        ("Phone", profile.phone.clone().unwrap_or_else(|| "-".to_string())),
    ];

    view! {
        <div class="grid gap-8 md:grid-cols-3">
            <Card class="md:col-span-1">
                <div class="flex flex-col items-center gap-3 text-center">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-20">
                            <span class="text-2xl">{identity.initials()}</span>
                        </div>
                    </div>
                    <h2 class="text-xl font-bold">{identity.name.clone()}</h2>
                    <p class="opacity-70">{identity.email.clone()}</p>
                    {identity.role.clone().map(|r| view! { <Badge variant=BadgeVariant::Primary>{r}</Badge> })}
                </div>
            </Card>
            <Card title="Academic details" class="md:col-span-2">
                <dl class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                    {rows
                        .into_iter()
                        .map(|(label, value)| view! {
                            <div>
                                <dt class="text-sm opacity-60">{label}</dt>
                                <dd class="font-semibold">{value}</dd>
                            </div>
                        })
                        .collect_view()}
                </dl>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniportal_shared::UserIdentity;

    fn profile(department: Option<Department>) -> StudentProfile {
        StudentProfile {
            identity: UserIdentity {
                id: "u1".into(),
                name: "Ada Lovelace".into(),
                email: "ada@uni.edu".into(),
                role: None,
            },
            student_id: None,
            department,
            semester: 3,
            academic_year: 2,
            batch_year: 2024,
            phone: None,
            section: None,
        }
    }

    fn dept(id: &str, name: &str) -> Department {
        Department {
            id: id.into(),
            name: name.into(),
            code: None,
        }
    }

    #[test]
    fn test_department_name_resolved_from_list() {
        let p = profile(Some(dept("d7", "d7")));
        let all = [dept("d7", "Computer Science")];
        assert_eq!(department_label(&p, &all), "Computer Science");
        assert_eq!(department_label(&p, &[]), "d7");
    }

    #[test]
    fn test_named_department_and_missing_department() {
        assert_eq!(department_label(&profile(Some(dept("d1", "Physics"))), &[]), "Physics");
        assert_eq!(department_label(&profile(None), &[]), "-");
    }
}
