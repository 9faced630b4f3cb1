//! `fetch`-backed transport for the browser.

use std::collections::HashMap;

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::RequestInit;

use crate::{FetchError, RequestBuilder, Response, Transport};

/// A [`Transport`] using the window's `fetch`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTransport;

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let window = web_sys::window()
            .ok_or_else(|| FetchError::RequestError("no window".to_string()))?;

        let init = RequestInit::new();
        init.set_method("GET");

        let js_request =
            web_sys::Request::new_with_str_and_init(&request.url, &init).map_err(js_error)?;
        for (key, value) in &request.headers {
            js_request.headers().set(key, value).map_err(js_error)?;
        }

        let value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(js_error)?;
        let js_response: web_sys::Response = value.dyn_into().map_err(js_error)?;

        let status = js_response.status();
        let mut headers = HashMap::new();
        if let Ok(Some(content_type)) = js_response.headers().get("content-type") {
            headers.insert("Content-Type".to_string(), content_type);
        }

        let text = JsFuture::from(js_response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = text.as_string().unwrap_or_default().into_bytes();

        Ok(Response::new(status, headers, body))
    }
}

fn js_error(e: JsValue) -> FetchError {
    FetchError::RequestError(format!("{:?}", e))
}
