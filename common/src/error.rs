//! エラー型定義

use thiserror::Error;

/// 解析失敗時のフォールバックメッセージ（レスポンス本文が空の場合）
pub const DEFAULT_FAILURE_MESSAGE: &str = "Analysis failed";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not preview {0}")]
    Preview(String),

    #[error("No image selected")]
    NoImageSelected,

    #[error("An analysis is already in progress")]
    AnalysisInFlight,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 解析リクエストの失敗
///
/// どの種類でもユーザーに見えるのは `banner()` の1行だけ
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// 接続拒否などトランスポート層の失敗
    #[error("{0}")]
    Network(String),

    /// 非2xxステータス（本文をそのままメッセージにする）
    #[error("{message}")]
    Service { status: u16, message: String },

    /// 2xxだが本文がJSONではない
    #[error("{0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// 非2xxレスポンスからエラーを作る
    ///
    /// 本文が空なら `DEFAULT_FAILURE_MESSAGE` を使う
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            body.to_string()
        };
        AnalysisError::Service { status, message }
    }

    pub fn message(&self) -> &str {
        match self {
            AnalysisError::Network(message) => message,
            AnalysisError::Service { message, .. } => message,
            AnalysisError::InvalidResponse(message) => message,
        }
    }

    /// エラーパネルに表示する1行メッセージ
    pub fn banner(&self) -> String {
        format!("Error: {}. Check connection.", self.message())
    }
}
