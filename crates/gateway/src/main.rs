//! # Launchpass Gateway
//!
//! Mini Appのlaunch_dataを受け取り、上流プラットフォームのシークレットで
//! 検証したうえで、下流クライアント向けに再署名して返すHTTPゲートウェイ。
//!
//! ## 役割
//! - 環境変数からのシークレット読み込み（欠落時は起動を中止）
//! - launch_dataの検証と再署名（`launchpass-core` に委譲）
//! - 検証結果のHTTPステータスへのマッピング
//!
//! ## API エンドポイント
//! - `POST /reissue` — launch_dataの検証と再署名
//! - `GET /healthz` — 死活監視

mod config;
mod endpoints;
mod error;

use std::sync::Arc;

use config::{GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // 環境変数の読み込み。シークレットが欠けている場合はここで起動を中止する
    let config = GatewayConfig::from_env()?;

    let reissuer = launchpass_core::Reissuer::new(&config.reissue)
        .map_err(|e| anyhow::anyhow!("再署名器の構築に失敗: {e}"))?;

    tracing::info!(client_id = %config.reissue.client_id, "再署名器を初期化しました");

    let state = Arc::new(GatewayState { reissuer });

    let app = axum::Router::new()
        .route("/reissue", axum::routing::post(endpoints::reissue::handle_reissue))
        .route("/healthz", axum::routing::get(endpoints::healthz::handle_healthz))
        .with_state(state);

    tracing::info!("Gatewayを {} で起動します", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
