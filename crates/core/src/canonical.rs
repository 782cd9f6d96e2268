//! # Canonical Check String の構築
//!
//! クレデンシャルの署名対象となる正規化文字列を構築する。
//! 正規化は純粋かつ決定的であり、同じペア集合は入力順序に関わらず
//! 常にバイト単位で同一のcheck_stringを生成する。

use crate::wire::Pair;

/// ペア列からCanonical Check Stringを構築する。
///
/// - `exclude_key` に一致するキーのペアを取り除く（署名フィールドの除外用）
/// - 残りをキーのバイト順で安定ソートする（重複キーは元の相対順序を維持）
/// - 各ペアを `key=value` とし、改行1つで連結する（末尾改行なし）
/// - ペアが0件の場合は空文字列
pub fn check_string(pairs: &[Pair], exclude_key: Option<&str>) -> String {
    let mut kept: Vec<&Pair> = pairs
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != exclude_key)
        .collect();
    kept.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    kept.iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
