//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型と、HTTPステータスへのマッピング。

use axum::http::StatusCode;
use launchpass_core::ReissueError;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 不正なリクエスト（launch_dataのデコード失敗）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),
    /// 認証失敗（launch_dataの署名検証失敗）
    #[error("認証に失敗しました: {0}")]
    Unauthorized(String),
    /// 内部エラー（サーバー設定の不備等）
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<ReissueError> for GatewayError {
    fn from(e: ReissueError) -> Self {
        match &e {
            ReissueError::MalformedInput(_) => GatewayError::BadRequest(e.to_string()),
            ReissueError::InvalidSignature => GatewayError::Unauthorized(e.to_string()),
            ReissueError::MisconfiguredServer(_) => GatewayError::Internal(e.to_string()),
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
