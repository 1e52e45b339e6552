//! 查询钩子
//!
//! 把核心库 `QueryClient` 的读取结果暴露为 `{data, loading, error}` 三个信号。
//! 重新获取期间保留旧数据。

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use uniportal::client::ApiClient;
use uniportal::error::{PortalError, PortalResult};
use uniportal::query::QueryKey;

use crate::auth::use_services;

pub struct QueryHandle<T: 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<PortalError>>,
    run: StoredValue<Rc<dyn Fn(bool)>, LocalStorage>,
}

impl<T: 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for QueryHandle<T> {}

impl<T: Clone + Send + Sync + 'static> QueryHandle<T> {
    /// 新鲜期内命中缓存
    pub fn refetch(&self) {
        self.run.with_value(|run| run(false));
    }

    /// 跳过缓存强制重新获取
    pub fn reload(&self) {
        self.run.with_value(|run| run(true));
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.with(|e| e.as_ref().map(|e| e.message().to_string()))
    }
}

pub fn use_query<T, F, Fut>(key: QueryKey, fetcher: F) -> QueryHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(ApiClient) -> Fut + 'static,
    Fut: Future<Output = PortalResult<T>> + 'static,
{
    let services = use_services();
    let data = RwSignal::new(services.queries.get_cached::<T>(&key));
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<PortalError>);
    let fetcher = Rc::new(fetcher);

    let run: Rc<dyn Fn(bool)> = Rc::new(move |force: bool| {
        let services = services.clone();
        let key = key.clone();
        let fetcher = fetcher.clone();
        if force {
            services.queries.invalidate(&key);
        }
        let _ = loading.try_set(true);
        spawn_local(async move {
            let client = services.client.clone();
            let result = services
                .queries
                .fetch(key, || (*fetcher)(client.clone()))
                .await;
            match result {
                Ok(value) => {
                    let _ = data.try_set(Some(value));
                    let _ = error.try_set(None);
                }
                Err(e) => {
                    let _ = error.try_set(Some(e));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    run(false);
    QueryHandle {
        data,
        loading,
        error,
        run: StoredValue::new_local(run),
    }
}
