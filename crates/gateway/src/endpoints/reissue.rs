//! # /reissue エンドポイント
//!
//! ## 処理フロー
//! 1. リクエストボディからワイヤ形式のlaunch_dataを取り出す
//! 2. `launchpass_core::Reissuer` で検証と再署名を行う
//! 3. 再署名済みクレデンシャルを返却する
//!
//! 検証に失敗したリクエストは401で拒否し、部分的な結果は一切返さない。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use launchpass_types::{ReissueRequest, ReissueResponse};

use crate::config::GatewayState;
use crate::error::GatewayError;

/// POST /reissue ハンドラ。
/// クレデンシャルの中身はログに出さない（署名済み個人データを含むため）。
pub async fn handle_reissue(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<ReissueRequest>,
) -> Result<Json<ReissueResponse>, GatewayError> {
    let signed_data = match state.reissuer.reissue(&body.init_data) {
        Ok(signed_data) => signed_data,
        Err(e) => {
            tracing::warn!(error = %e, "launch_dataの再署名を拒否しました");
            return Err(e.into());
        }
    };

    Ok(Json(ReissueResponse { signed_data }))
}
