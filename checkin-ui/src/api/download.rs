//! Browser downloads of binary responses

use wasm_bindgen::JsCast;

/// How long the object URL outlives the click that starts the download
const REVOKE_DELAY_MS: u32 = 1000;

/// Offer `bytes` to the user as a file download named `filename`.
///
/// Returns the object URL, which stays valid for a short while after the
/// download starts.
pub fn save_bytes(bytes: &[u8], filename: &str, content_type: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let array = js_sys::Uint8Array::from(bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(
        &js_sys::Array::of1(&array),
        &options,
    )
    .map_err(|e| format!("Blob error: {:?}", e))?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Object URL error: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Not an anchor element".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let revoked = url.clone();
    gloo_timers::callback::Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(e) = web_sys::Url::revoke_object_url(&revoked) {
            web_sys::console::warn_1(&format!("Failed to revoke {}: {:?}", revoked, e).into());
        }
    })
    .forget();
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_admin::REPORT_CONTENT_TYPE;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn object_url_outlives_the_click() {
        let url =
            save_bytes(&[0x50, 0x4b, 0x03, 0x04], "weekly-report.xlsx", REPORT_CONTENT_TYPE)
                .unwrap();

        let response = gloo_net::http::Request::get(&url).send().await.unwrap();
        assert_eq!(response.binary().await.unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);

        gloo_timers::future::TimeoutFuture::new(REVOKE_DELAY_MS + 100).await;
        assert!(gloo_net::http::Request::get(&url).send().await.is_err());
    }
}
