//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! シークレットはプロセス起動時に一度だけ読み込み、以降は不変として扱う。

use launchpass_core::{ReissueConfig, Reissuer};

/// Gatewayの共有状態。起動後は読み取り専用。
pub struct GatewayState {
    /// クレデンシャル再署名器（シークレットは構築時に検証済み）
    pub reissuer: Reissuer,
}

/// 環境変数から読み込んだGateway設定。
pub struct GatewayConfig {
    /// バインドアドレス
    pub listen_addr: String,
    /// 再署名に必要なシークレット一式
    pub reissue: ReissueConfig,
}

impl GatewayConfig {
    /// 環境変数から設定を読み込む。
    ///
    /// - `BOT_TOKEN` — 上流プラットフォームのシークレット（必須）
    /// - `CLIENT_ID` — 下流クライアントの識別子（必須）
    /// - `CLIENT_SECRET` — 下流クライアントのシークレット（必須）
    /// - `LISTEN_ADDR` — バインドアドレス（省略時 `0.0.0.0:3000`）
    ///
    /// 必須の値が欠落または空の場合はエラーを返し、プロセスは起動しない。
    pub fn from_env() -> anyhow::Result<Self> {
        let bot_token = require_env("BOT_TOKEN")?;
        let client_id = require_env("CLIENT_ID")?;
        let client_secret = require_env("CLIENT_SECRET")?;
        let listen_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            listen_addr,
            reissue: ReissueConfig {
                bot_token,
                client_id,
                client_secret,
            },
        })
    }
}

/// 必須の環境変数を読み込む。未設定または空ならエラー。
fn require_env(name: &str) -> anyhow::Result<String> {
    let value = std::env::var(name)
        .map_err(|_| anyhow::anyhow!("環境変数 {name} が設定されていません"))?;
    if value.is_empty() {
        anyhow::bail!("環境変数 {name} が空です");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 変数名はテストごとに固有にし、並列実行時の干渉を避ける

    /// 未設定の必須環境変数でエラーになることを確認（起動中止の条件）
    #[test]
    fn test_require_env_missing() {
        std::env::remove_var("LAUNCHPASS_TEST_MISSING");
        let err = require_env("LAUNCHPASS_TEST_MISSING").unwrap_err();
        assert!(err.to_string().contains("設定されていません"));
    }

    /// 空の必須環境変数でエラーになることを確認（空のシークレットを許さない）
    #[test]
    fn test_require_env_empty() {
        std::env::set_var("LAUNCHPASS_TEST_EMPTY", "");
        let err = require_env("LAUNCHPASS_TEST_EMPTY").unwrap_err();
        assert!(err.to_string().contains("空です"));
    }

    /// 設定済みの環境変数が読み込めることを確認
    #[test]
    fn test_require_env_present() {
        std::env::set_var("LAUNCHPASS_TEST_PRESENT", "value");
        assert_eq!(require_env("LAUNCHPASS_TEST_PRESENT").unwrap(), "value");
    }
}
