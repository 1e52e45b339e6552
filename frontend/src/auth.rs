//! 认证模块
//!
//! `Services` 持有核心库的客户端、查询缓存和会话管理器（非 Send，存放在本地 StoredValue 中）。
//! `AuthContext` 把会话状态镜像到信号上，路由服务通过注入的认证信号做守卫。

use std::rc::Rc;

use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;
use uniportal::client::ApiClient;
use uniportal::config::PortalConfig;
use uniportal::error::PortalResult;
use uniportal::query::{Clock, QueryClient, QueryOptions, SystemClock};
use uniportal::session::{SessionManager, SessionState};
use uniportal::storage::KeyValueStore;
use uniportal_shared::StudentProfile;

use crate::web::router::BrowserNavigator;
use crate::web::{BrowserStorage, FetchTransport, page_location, runtime_base_url};

/// 应用级服务，克隆开销很小
#[derive(Clone)]
pub struct Services {
    pub client: ApiClient,
    pub queries: QueryClient,
    pub session: Rc<SessionManager>,
    pub store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
}

impl Services {
    pub fn new(navigator: BrowserNavigator) -> Self {
        let config = PortalConfig::new().with_runtime_base_url(runtime_base_url());
        let store: Rc<dyn KeyValueStore> = Rc::new(BrowserStorage);
        let client = ApiClient::new(
            Rc::new(FetchTransport),
            store.clone(),
            Rc::new(navigator),
            config.clone(),
            page_location(),
        );
        let clock: Rc<dyn Clock> = Rc::new(SystemClock);
        let queries = QueryClient::new(clock.clone(), QueryOptions::from_config(&config));
        let session = Rc::new(SessionManager::new(
            client.clone(),
            queries.clone(),
            clock.clone(),
        ));
        Self {
            client,
            queries,
            session,
            store,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<SessionState>,
    services: StoredValue<Services, LocalStorage>,
}

impl AuthContext {
    pub fn new(services: Services) -> Self {
        let state = RwSignal::new(services.session.state());
        Self {
            state,
            services: StoredValue::new_local(services),
        }
    }

    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    /// 用于路由服务注入
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_authenticated))
    }

    pub fn is_restoring_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_restoring))
    }

    pub fn profile(&self) -> Option<StudentProfile> {
        self.state.with(|s| s.profile().cloned())
    }

    fn publish(&self, next: SessionState) {
        let _ = self.state.try_set(next);
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

pub fn use_services() -> Services {
    use_auth().services()
}

/// 恢复会话，并在客户端因 401 拆除会话时同步状态
pub fn init_auth(ctx: &AuthContext, navigator: BrowserNavigator) {
    let ctx = *ctx;
    spawn_local(async move {
        let next = ctx.services().session.restore().await;
        ctx.publish(next);
    });

    let expirations = navigator.expirations();
    Effect::new(move |_| {
        if expirations.get() > 0 {
            let next = ctx.services().session.expire();
            ctx.publish(next);
        }
    });
}

/// 登录后立即进入已认证状态，同时在后台刷新档案
pub async fn login(ctx: &AuthContext, email: String, password: String) -> PortalResult<()> {
    let services = ctx.services();
    let next = services.session.login(&email, &password).await?;
    ctx.publish(next);

    let ctx = *ctx;
    spawn_local(async move {
        let next = services.session.refresh().await;
        ctx.publish(next);
    });
    Ok(())
}

/// 注销：导航由路由服务的认证监听处理
pub async fn logout(ctx: &AuthContext) {
    let next = ctx.services().session.logout().await;
    info!("session cleared");
    ctx.publish(next);
}

pub async fn refresh(ctx: &AuthContext) {
    let next = ctx.services().session.refresh().await;
    ctx.publish(next);
}
