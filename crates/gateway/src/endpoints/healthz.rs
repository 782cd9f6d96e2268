//! # /healthz エンドポイント

/// GET /healthz — 死活監視。
/// シークレットの読み込みは起動時に完了しているため、応答できること自体が正常の証。
pub async fn handle_healthz() -> &'static str {
    "ok"
}
