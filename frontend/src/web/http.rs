//! 基于 `window.fetch` 的传输层
//!
//! 实现核心库的 `Transport`。超时由 `AbortController` 执行：
//! 计时器到期时中止请求，fetch 的 Promise 随之以 AbortError 拒绝。

use std::cell::Cell;
use std::rc::Rc;

use uniportal::error::{PortalError, PortalResult};
use uniportal::request::{HttpRequest, HttpResponse, Transport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

use super::timer::Timeout;

fn js_error(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// 浏览器 fetch 传输层
#[derive(Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    fn build(req: &HttpRequest, controller: &AbortController) -> PortalResult<Request> {
        let headers = Headers::new()
            .map_err(|e| PortalError::network(format!("failed to create headers: {}", js_error(&e))))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| PortalError::network(format!("invalid header {}: {}", key, js_error(&e))))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_signal(Some(&controller.signal()));
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| PortalError::network(format!("failed to build request: {}", js_error(&e))))
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> PortalResult<HttpResponse> {
        let controller = AbortController::new()
            .map_err(|e| PortalError::network(format!("abort controller unavailable: {}", js_error(&e))))?;
        let request = Self::build(&req, &controller)?;
        let window = web_sys::window().ok_or_else(|| PortalError::network("window is unavailable"))?;

        let timed_out = Rc::new(Cell::new(false));
        let _timeout = {
            let timed_out = timed_out.clone();
            let controller = controller.clone();
            let millis = u32::try_from(req.timeout.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                if timed_out.get() {
                    PortalError::timeout(format!(
                        "no response within {} ms",
                        req.timeout.as_millis()
                    ))
                } else {
                    PortalError::network(js_error(&e))
                }
            })?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| PortalError::network(format!("unexpected fetch result: {}", js_error(&e))))?;
        let status = response.status();

        let promise = response
            .text()
            .map_err(|e| PortalError::network(format!("unreadable body: {}", js_error(&e))))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| PortalError::network(format!("unreadable body: {}", js_error(&e))))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse { status, body })
    }
}
