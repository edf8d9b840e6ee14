//! Offer an exported file to the user.

use records::export::ExportFile;

/// The browser refused to build or open the download.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("download failed: {0}")]
pub struct DownloadError(String);

/// Trigger a browser download of `file` through a temporary object URL.
///
/// # Errors
///
/// Returns [`DownloadError`] if any DOM call fails.
#[cfg(feature = "hydrate")]
pub fn offer(file: &ExportFile) -> Result<(), DownloadError> {
    use wasm_bindgen::{JsCast, JsValue};

    let fail = |err: JsValue| DownloadError(err.as_string().unwrap_or_else(|| format!("{err:?}")));

    let parts = js_sys::Array::of1(&JsValue::from_str(&file.body));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(file.mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(fail)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(fail)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| DownloadError("no document".to_owned()))?;
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(fail)?
        .dyn_into()
        .map_err(|_| DownloadError("anchor element unavailable".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(&file.filename);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(fail)?;

    log::info!("exported {} ({} bytes)", file.filename, file.body.len());
    Ok(())
}

/// Outside the browser there is nowhere to save to; the export is logged.
///
/// # Errors
///
/// Never fails.
#[cfg(not(feature = "hydrate"))]
pub fn offer(file: &ExportFile) -> Result<(), DownloadError> {
    log::info!("export {} ready ({} bytes)", file.filename, file.body.len());
    Ok(())
}
