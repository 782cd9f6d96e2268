//! # Launchpass Core
//!
//! チャットプラットフォームのMini Appが発行する署名付きlaunch_dataを検証し、
//! 下流クライアントのシークレットで署名し直したクレデンシャルを再発行する。
//!
//! ## 処理フロー
//! 1. ワイヤ形式（クエリ文字列）のlaunch_dataをペア列にデコードする
//! 2. `hash` フィールドを取り除き、Canonical Check Stringを構築する
//! 3. 上流シークレットから導出した鍵でhashを検証する
//! 4. 検証成功時のみ `client_id` を束縛し、下流シークレットで再署名して返す
//!
//! 全処理は純粋な同期計算であり、外部I/Oや共有可変状態を持たない。

mod canonical;
mod signing;
mod wire;

pub use canonical::check_string;
pub use signing::{derive_key, sign, verify, DerivedKey};
pub use wire::{decode, encode, Pair};

/// クレデンシャルの署名フィールドとして予約されたキー。
pub const SIGNATURE_KEY: &str = "hash";

/// 再発行時にクライアント識別子を束縛するキー。
pub const CLIENT_ID_KEY: &str = "client_id";

/// Coreモジュールのエラー型
#[derive(Debug, thiserror::Error)]
pub enum ReissueError {
    /// ワイヤ形式をペア列にデコードできなかった
    #[error("launch_dataのデコードに失敗しました: {0}")]
    MalformedInput(String),
    /// 上流HMAC検証に失敗した
    #[error("launch_dataの署名検証に失敗しました")]
    InvalidSignature,
    /// 必要なシークレットが未設定または空
    #[error("サーバー設定が不正です: {0}")]
    MisconfiguredServer(String),
}

/// 再署名に必要な設定一式。
/// プロセス起動時に一度だけ読み込み、以降は不変として扱う。
#[derive(Debug, Clone)]
pub struct ReissueConfig {
    /// 上流プラットフォームの共有シークレット（ボットトークン）
    pub bot_token: String,
    /// 下流クライアントの識別子
    pub client_id: String,
    /// 下流クライアントの共有シークレット
    pub client_secret: String,
}

/// クレデンシャル再署名器。
/// 構築時にシークレットの存在を検証し、導出鍵を事前計算する。
#[derive(Debug)]
pub struct Reissuer {
    upstream_key: DerivedKey,
    downstream_key: DerivedKey,
    client_id: String,
}

impl Reissuer {
    /// 設定から再署名器を構築する。
    /// いずれかの設定値が空の場合は `MisconfiguredServer` を返す。
    /// シークレットに既定値を補うことはない。
    pub fn new(config: &ReissueConfig) -> Result<Self, ReissueError> {
        if config.bot_token.is_empty() {
            return Err(ReissueError::MisconfiguredServer(
                "bot_tokenが設定されていません".into(),
            ));
        }
        if config.client_id.is_empty() {
            return Err(ReissueError::MisconfiguredServer(
                "client_idが設定されていません".into(),
            ));
        }
        if config.client_secret.is_empty() {
            return Err(ReissueError::MisconfiguredServer(
                "client_secretが設定されていません".into(),
            ));
        }

        Ok(Self {
            upstream_key: signing::derive_key(&config.bot_token),
            downstream_key: signing::derive_key(&config.client_secret),
            client_id: config.client_id.clone(),
        })
    }

    /// launch_dataを検証し、下流クライアント向けに再署名したクレデンシャルを返す。
    ///
    /// 検証に失敗した入力に対しては部分的な再署名結果を一切生成しない。
    /// 再帰や外部I/Oを持たず、同じ入力には常に同じ結果を返す。
    pub fn reissue(&self, raw_credential: &str) -> Result<String, ReissueError> {
        let decoded = wire::decode(raw_credential)?;

        // hashフィールドを全て取り除く。複数あれば最後の出現を検証候補とする。
        // hashが存在しない場合は候補が空文字列となり、検証に失敗する。
        let mut candidate_hash = String::new();
        let mut pairs: Vec<Pair> = Vec::with_capacity(decoded.len());
        for (key, value) in decoded {
            if key == SIGNATURE_KEY {
                candidate_hash = value;
            } else {
                pairs.push((key, value));
            }
        }

        let upstream_check = canonical::check_string(&pairs, Some(SIGNATURE_KEY));
        if !signing::verify(&upstream_check, &self.upstream_key, &candidate_hash) {
            return Err(ReissueError::InvalidSignature);
        }

        // client_idを束縛して再署名する。check_stringはキー順で再ソートされるため、
        // 新しいペアの位置は追加順ではなくキーのバイト順で決まる。
        pairs.push((CLIENT_ID_KEY.to_string(), self.client_id.clone()));
        let downstream_check = canonical::check_string(&pairs, Some(SIGNATURE_KEY));
        let new_hash = signing::sign(&downstream_check, &self.downstream_key);
        pairs.push((SIGNATURE_KEY.to_string(), new_hash));

        Ok(wire::encode(&pairs))
    }
}
