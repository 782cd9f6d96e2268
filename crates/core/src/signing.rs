//! # 二段階HMAC署名・検証
//!
//! プラットフォームのlaunch_data署名方式:
//! 1. 鍵導出: `HMAC-SHA256(key="WebAppData", message=secret)` の生のダイジェストを中間鍵とする
//! 2. 署名:   `HMAC-SHA256(key=中間鍵, message=check_string)` の小文字hexを署名とする
//!
//! 中間鍵は必ず生の32バイトのまま次段の鍵に使う。hex文字列化した形を鍵に
//! 使うと、上流・下流の両認証局と互換性のない署名になる。

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// 鍵導出HMACの固定キー。プラットフォーム側で定められた定数。
const KEY_DERIVATION_KEY: &[u8] = b"WebAppData";

/// 導出済み署名鍵（生の32バイトダイジェスト）。
pub type DerivedKey = [u8; 32];

/// 共有シークレットから署名鍵を導出する。
pub fn derive_key(secret: &str) -> DerivedKey {
    hmac_sha256(KEY_DERIVATION_KEY, secret.as_bytes())
}

/// check_stringを導出鍵で署名し、小文字hexダイジェストを返す。
pub fn sign(check_string: &str, key: &DerivedKey) -> String {
    hex::encode(hmac_sha256(key, check_string.as_bytes()))
}

/// 候補hexダイジェストをcheck_stringに対して検証する。
/// ダイジェストの比較は定数時間で行う。
pub fn verify(check_string: &str, key: &DerivedKey, candidate_hex: &str) -> bool {
    let Ok(candidate) = hex::decode(candidate_hex) else {
        return false;
    };
    let expected = hmac_sha256(key, check_string.as_bytes());
    candidate.as_slice().ct_eq(expected.as_slice()).into()
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut mac =
        HmacSha256::new_from_slice(key).expect("HMAC-SHA256は任意長の鍵を受け付ける");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 署名が64文字の小文字hexであることを確認
    #[test]
    fn test_sign_is_lowercase_hex() {
        let key = derive_key("secret");
        let digest = sign("a=1\nb=2", &key);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    /// sign → verify のラウンドトリップを確認
    #[test]
    fn test_sign_verify_roundtrip() {
        let key = derive_key("secret");
        let digest = sign("a=1\nb=2", &key);
        assert!(verify("a=1\nb=2", &key, &digest));
    }

    /// 異なるシークレットの鍵では検証に失敗することを確認
    #[test]
    fn test_verify_rejects_wrong_key() {
        let digest = sign("a=1", &derive_key("secret"));
        assert!(!verify("a=1", &derive_key("other"), &digest));
    }

    /// check_stringの改変で検証に失敗することを確認
    #[test]
    fn test_verify_rejects_modified_check_string() {
        let key = derive_key("secret");
        let digest = sign("a=1", &key);
        assert!(!verify("a=2", &key, &digest));
    }

    /// hexでない候補や長さ不一致の候補が安全に拒否されることを確認
    #[test]
    fn test_verify_rejects_non_hex_candidate() {
        let key = derive_key("secret");
        assert!(!verify("a=1", &key, ""));
        assert!(!verify("a=1", &key, "not-hex"));
        assert!(!verify("a=1", &key, "abcd"));
    }

    /// 二段階導出と署名が外部実装で算出した既知ベクトルと一致することを確認。
    /// 期待値はPython標準ライブラリのhmacで算出した:
    ///   k1  = HMAC-SHA256(key="WebAppData", msg="123456:test-bot-token")
    ///   sig = HMAC-SHA256(key=k1, msg=check_string)
    #[test]
    fn test_known_answer_vector() {
        let key = derive_key("123456:test-bot-token");
        assert_eq!(
            hex::encode(key),
            "a9c05730d05ceafb064f018b353162c08095691b8507c3311ec566d71b0e9c3a"
        );

        let check = "auth_date=1700000000\nquery_id=AAA\nuser={\"id\":1}";
        let expected = "a40bd036c2f799307cf5d37a710bb1f8b0fb926339db8789d31121d0719ee681";
        assert_eq!(sign(check, &key), expected);
        assert!(verify(check, &key, expected));
    }

    /// 鍵導出が生のダイジェストを使う二段階HMACであることを確認。
    /// 中間鍵をhex文字列化して使った場合とは異なる署名になる。
    #[test]
    fn test_derive_key_uses_raw_intermediate() {
        let raw_key = derive_key("secret");
        let hex_key_signature = {
            let mut mac = HmacSha256::new_from_slice(hex::encode(raw_key).as_bytes()).unwrap();
            mac.update(b"a=1");
            hex::encode(mac.finalize().into_bytes())
        };
        assert_ne!(sign("a=1", &raw_key), hex_key_signature);

        // 同じシークレットからの導出は決定的
        assert_eq!(derive_key("secret"), derive_key("secret"));
        assert_ne!(derive_key("secret"), derive_key("secret2"));
    }
}
