//! Browser HTTP transport.
//!
//! GET requests go through `gloo-net` (Fetch API). Uploads use
//! `XMLHttpRequest` because only XHR reports upload byte progress.

use gloo_net::http::Request;
use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ProgressEvent, XmlHttpRequest};

use crate::config::upload_fields;
use crate::core::api::{ProgressFn, RawResponse, Transport, UploadForm};
use crate::core::error::{ApiError, describe_js};

/// [`Transport`] over the browser's Fetch and XHR APIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

fn request_error(e: JsValue) -> ApiError {
    ApiError::RequestCreationFailed(describe_js(&e))
}

impl Transport for BrowserTransport {
    type File = File;

    async fn get(&self, url: &str) -> Result<RawResponse, ApiError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = response
            .binary()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(RawResponse::new(response.status(), response.status_text(), body))
    }

    async fn post_multipart(
        &self,
        url: &str,
        form: UploadForm<'_, File>,
        on_progress: Option<ProgressFn>,
    ) -> Result<RawResponse, ApiError> {
        let data = FormData::new().map_err(request_error)?;
        data.append_with_blob(upload_fields::MODEL, form.model)
            .map_err(request_error)?;
        data.append_with_str(upload_fields::METADATA, &form.metadata)
            .map_err(request_error)?;

        let xhr = XmlHttpRequest::new().map_err(request_error)?;

        // Closures must outlive the request; they are dropped after it settles.
        let progress_listener = on_progress.map(|report| {
            Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
                if event.length_computable() && event.total() > 0.0 {
                    report(event.loaded() / event.total() * 100.0);
                }
            })
        });
        if let Some(listener) = &progress_listener {
            xhr.upload()
                .map_err(request_error)?
                .set_onprogress(Some(listener.as_ref().unchecked_ref()));
        }

        let mut listeners = None;
        let settled = Promise::new(&mut |resolve, _reject| {
            let on_load = {
                let resolve = resolve.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
                })
            };
            let on_error = Closure::<dyn FnMut()>::new(move || {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
            });
            xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
            xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));
            xhr.set_onabort(Some(on_error.as_ref().unchecked_ref()));
            listeners = Some((on_load, on_error));
        });

        xhr.open("POST", url).map_err(request_error)?;
        xhr.send_with_opt_form_data(Some(&data))
            .map_err(|e| ApiError::Network(describe_js(&e)))?;

        let loaded = JsFuture::from(settled)
            .await
            .map_err(|e| ApiError::Network(describe_js(&e)))?;
        drop(listeners);
        drop(progress_listener);

        if loaded.as_bool() != Some(true) {
            return Err(ApiError::Network("request failed".to_string()));
        }

        let status = xhr.status().map_err(|e| ApiError::Decode(describe_js(&e)))?;
        let status_text = xhr.status_text().unwrap_or_default();
        let body = xhr
            .response_text()
            .map_err(|e| ApiError::Decode(describe_js(&e)))?
            .unwrap_or_default();

        Ok(RawResponse::new(status, status_text, body))
    }
}
