use leptos::prelude::*;
use uniportal::preferences::{Preferences, Theme};

use crate::components::ui::{Card, use_toast};
use crate::preferences::use_preferences;

#[component]
pub fn PreferencesSection() -> impl IntoView {
    let prefs = use_preferences();
    let toast = use_toast();

    let save = move |f: Box<dyn FnOnce(&mut Preferences)>| {
        if let Err(e) = prefs.update(f) {
            toast.error(format!("Could not save preferences: {}", e.message()));
        }
    };

    let theme_button = move |theme: Theme, label: &'static str| {
        view! {
            <button
                class=move || {
                    if prefs.theme().get() == theme { "btn btn-sm join-item btn-active" } else { "btn btn-sm join-item" }
                }
                on:click=move |_| save(Box::new(move |p| p.theme = theme))
            >
                {label}
            </button>
        }
    };

    let toggle = move |label: &'static str, get: fn(&Preferences) -> bool, set: fn(&mut Preferences, bool)| {
        view! {
            <label class="label cursor-pointer justify-between">
                <span class="label-text">{label}</span>
                <input
                    type="checkbox"
                    class="toggle toggle-primary"
                    prop:checked=move || prefs.prefs.with(get)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        save(Box::new(move |p| set(p, checked)));
                    }
                />
            </label>
        }
    };

    view! {
        <Card title="Appearance">
            <div class="flex items-center justify-between">
                <span>"Theme"</span>
                <div class="join">
                    {theme_button(Theme::Light, "Light")}
                    {theme_button(Theme::Dark, "Dark")}
                    {theme_button(Theme::System, "System")}
                </div>
            </div>
            {toggle("Animations", |p| p.animations, |p, v| p.animations = v)}
        </Card>
        <Card title="Notifications">
            {toggle("Email notifications", |p| p.email_notifications, |p, v| p.email_notifications = v)}
            {toggle("Push notifications", |p| p.push_notifications, |p, v| p.push_notifications = v)}
            {toggle("Class reminders", |p| p.class_reminders, |p, v| p.class_reminders = v)}
        </Card>
    }
}
