//! 偏好设置上下文：信号镜像 + 持久化 + 主题应用

use std::rc::Rc;

use leptos::prelude::*;
use tracing::debug;
use uniportal::error::PortalResult;
use uniportal::preferences::{Preferences, Theme};
use uniportal::storage::KeyValueStore;

use crate::web::apply_theme;

#[derive(Clone, Copy)]
pub struct PreferencesContext {
    pub prefs: RwSignal<Preferences>,
    store: StoredValue<Rc<dyn KeyValueStore>, LocalStorage>,
}

impl PreferencesContext {
    pub fn theme(&self) -> Signal<Theme> {
        let prefs = self.prefs;
        Signal::derive(move || prefs.with(|p| p.theme))
    }

    /// 修改并保存；保存失败时信号保持旧值
    pub fn update(&self, f: impl FnOnce(&mut Preferences)) -> PortalResult<()> {
        let mut next = self.prefs.get_untracked();
        f(&mut next);
        self.store.with_value(|store| next.save(store.as_ref()))?;
        apply_theme(next.theme);
        debug!(theme = ?next.theme, "preferences saved");
        self.prefs.set(next);
        Ok(())
    }

    pub fn toggle_theme(&self) -> PortalResult<()> {
        self.update(|p| {
            p.toggle_theme();
        })
    }
}

pub fn provide_preferences(store: Rc<dyn KeyValueStore>) -> PreferencesContext {
    let prefs = Preferences::load(store.as_ref());
    apply_theme(prefs.theme);
    let ctx = PreferencesContext {
        prefs: RwSignal::new(prefs),
        store: StoredValue::new_local(store),
    };
    provide_context(ctx);
    ctx
}

pub fn use_preferences() -> PreferencesContext {
    use_context::<PreferencesContext>().expect("PreferencesContext should be provided")
}
