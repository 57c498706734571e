//! 解析サービスとの通信仕様
//!
//! トランスポート自体（fetch / reqwest）は各フロントエンドが持ち、
//! URL・フィールド名・レスポンス解釈はここで共有する。

use serde::Deserialize;
use serde_json::Value;

use crate::error::AnalysisError;
use crate::types::AnalysisResult;

/// 解析サービスのデフォルトのオリジン
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// 解析エンドポイントのパス
pub const ANALYZE_PATH: &str = "/analyze-plant";

/// multipartで画像を載せるフィールド名
pub const FILE_FIELD: &str = "file";

/// 解析エンドポイントのURL
///
/// ```
/// use plant_doctor_common::endpoint::analyze_url;
///
/// assert_eq!(analyze_url("http://localhost:8000/"), "http://localhost:8000/analyze-plant");
/// ```
pub fn analyze_url(service_url: &str) -> String {
    format!("{}{}", service_url.trim_end_matches('/'), ANALYZE_PATH)
}

/// 疎通確認用のURL（サービスのルート）
pub fn health_url(service_url: &str) -> String {
    format!("{}/", service_url.trim_end_matches('/'))
}

/// 成功レスポンスの本文を解析結果にする
///
/// JSONでさえあれば失敗しない。オブジェクト以外は全フィールド欠落として扱う。
pub fn parse_analysis_body(body: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::InvalidResponse(format!("invalid JSON response: {}", e)))?;

    match value {
        Value::Object(_) => AnalysisResult::deserialize(value)
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string())),
        _ => Ok(AnalysisResult::default()),
    }
}

/// `GET /` の本文から表示用メッセージを取り出す
///
/// `{"message": "..."}` 形式でなければ本文をそのまま返す
pub fn parse_health_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
