//! 解析サービス呼び出し（fetch + FormData）

use js_sys::{Array, Uint8Array};
use plant_doctor_common::{
    analyze_url, parse_analysis_body, AnalysisError, AnalysisResult, ImageFile, FILE_FIELD,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// fetchが理由を返さなかった場合のメッセージ
const FETCH_FAILED: &str = "Failed to fetch";

/// JSの例外からメッセージを取り出す
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| FETCH_FAILED.to_string())
}

/// 画像1枚を `file` フィールドに持つFormData
fn build_form(file: &ImageFile) -> Result<FormData, JsValue> {
    let bytes = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(FILE_FIELD, &blob, &file.name)?;
    Ok(form)
}

/// POSTしてステータスと本文を返す
async fn post_form(url: &str, form: &FormData) -> Result<(bool, u16, String), JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.ok(), resp.status(), text.as_string().unwrap_or_default()))
}

/// 選択画像を解析サービスに送る
///
/// # Arguments
/// * `service_url` - 解析サービスのオリジン
/// * `file` - 選択中の画像
pub async fn analyze_plant(
    service_url: &str,
    file: &ImageFile,
) -> Result<AnalysisResult, AnalysisError> {
    let network = |e: JsValue| AnalysisError::Network(js_error_message(&e));

    let form = build_form(file).map_err(network)?;
    let (ok, status, body) = post_form(&analyze_url(service_url), &form)
        .await
        .map_err(network)?;

    if !ok {
        return Err(AnalysisError::from_status(status, &body));
    }

    parse_analysis_body(&body)
}
