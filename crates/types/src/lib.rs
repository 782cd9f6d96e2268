//! # Launchpass 共有型定義
//!
//! GatewayのHTTP境界で使用するデータ構造をRust構造体として提供する。
//! クレデンシャル本体は不透明な文字列として受け渡し、構造の解釈は
//! `launchpass-core` に閉じる。

use serde::{Deserialize, Serialize};

/// POST /reissue のリクエストボディ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReissueRequest {
    /// Mini Appから受け取ったワイヤ形式のlaunch_data
    pub init_data: String,
}

/// POST /reissue のレスポンスボディ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReissueResponse {
    /// 下流クライアントのシークレットで再署名されたクレデンシャル
    pub signed_data: String,
}
