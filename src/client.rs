//! 解析サービスのHTTPクライアント
//!
//! 画像を `file` フィールドのmultipartで1回だけPOSTする。
//! リトライ・キャンセルはしない。

use std::time::Duration;

use plant_doctor_common::endpoint::{health_url, parse_health_body};
use plant_doctor_common::{
    analyze_url, parse_analysis_body, AnalysisError, AnalysisResult, ImageFile, FILE_FIELD,
};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;

pub struct AnalysisClient {
    http: reqwest::Client,
    service_url: String,
}

impl AnalysisClient {
    pub fn new(service_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            service_url: service_url.into(),
        })
    }

    pub fn from_config(config: &Config, override_url: Option<&str>) -> Result<Self> {
        Self::new(
            config.service_url(override_url),
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// 画像を解析サービスに送る
    pub async fn analyze(
        &self,
        file: &ImageFile,
    ) -> std::result::Result<AnalysisResult, AnalysisError> {
        let url = analyze_url(&self.service_url);
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| AnalysisError::Network(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        info!(url = %url, file = %file.name, size = file.bytes.len(), "sending analysis request");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        debug!(status = status.as_u16(), body_len = body.len(), "analysis response received");

        if !status.is_success() {
            return Err(AnalysisError::from_status(status.as_u16(), &body));
        }

        parse_analysis_body(&body)
    }

    /// サービスの疎通確認（`GET /`）
    pub async fn health(&self) -> std::result::Result<String, AnalysisError> {
        let response = self
            .http
            .get(health_url(&self.service_url))
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AnalysisError::from_status(status.as_u16(), &body));
        }
        Ok(parse_health_body(&body))
    }
}
