//! [`ShareTarget`] over `navigator.share` and `navigator.clipboard`.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::error::UiError;
use crate::share::{ShareData, ShareTarget};

#[derive(Debug, Default, Clone, Copy)]
pub struct NavigatorShare;

fn navigator() -> Result<JsValue, UiError> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("navigator"))
        .map_err(super::js_to_ui)
}

#[async_trait(?Send)]
impl ShareTarget for NavigatorShare {
    fn can_share(&self) -> bool {
        navigator()
            .and_then(|nav| {
                js_sys::Reflect::get(&nav, &JsValue::from_str("share")).map_err(super::js_to_ui)
            })
            .map(|share| share.is_function())
            .unwrap_or(false)
    }

    async fn share(&self, data: &ShareData) -> Result<(), UiError> {
        let payload = js_sys::Object::new();
        js_sys::Reflect::set(&payload, &"title".into(), &data.title.as_str().into())
            .map_err(super::js_to_ui)?;
        js_sys::Reflect::set(&payload, &"url".into(), &data.url.as_str().into())
            .map_err(super::js_to_ui)?;

        let promise = super::call_method(&navigator()?, "share", &[payload.into()])
            .map_err(super::js_to_ui)?;
        JsFuture::from(js_sys::Promise::resolve(&promise))
            .await
            .map_err(super::js_to_ui)?;
        Ok(())
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), UiError> {
        let clipboard = js_sys::Reflect::get(&navigator()?, &JsValue::from_str("clipboard"))
            .map_err(super::js_to_ui)?;
        let promise = super::call_method(&clipboard, "writeText", &[text.into()])
            .map_err(super::js_to_ui)?;
        JsFuture::from(js_sys::Promise::resolve(&promise))
            .await
            .map_err(super::js_to_ui)?;
        Ok(())
    }
}
