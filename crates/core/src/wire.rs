//! # クレデンシャルのワイヤ形式コーデック
//!
//! launch_dataはクエリ文字列形式（パーセントエンコードされた `key=value` を
//! `&` で連結したもの）で受け渡される。
//! デコードは `&` で分割し、各ペアを最初の `=` で分割してからパーセントデコードする。
//! エンコードはペア列の現在の順序のまま再エンコードする。
//! `decode(encode(x))` が同じペア多重集合を再現することを保証する。

use crate::ReissueError;

/// デコード済みのキー/値ペア。
pub type Pair = (String, String);

/// ワイヤ形式のクレデンシャル文字列をペア列にデコードする。
///
/// - `&` で分割し、各セグメントを最初の `=` で分割する
/// - `=` を含まないセグメントは値が空のペアとして扱う
/// - `+` は空白にデコードする（application/x-www-form-urlencoded準拠）
/// - 不正なパーセントエンコーディングやUTF-8として不正なバイト列は
///   `ReissueError::MalformedInput` となる
pub fn decode(raw: &str) -> Result<Vec<Pair>, ReissueError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split('&')
        .map(|segment| {
            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key, value),
                None => (segment, ""),
            };
            Ok((percent_decode(key)?, percent_decode(value)?))
        })
        .collect()
}

/// ペア列をワイヤ形式に再エンコードする。ペア列の順序は維持する。
pub fn encode(pairs: &[Pair]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// パーセントエンコードされた文字列をデコードする。
fn percent_decode(input: &str) -> Result<String, ReissueError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
                let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => {
                        return Err(ReissueError::MalformedInput(format!(
                            "不正なパーセントエンコーディングです: 位置 {i}"
                        )));
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8(out)
        .map_err(|e| ReissueError::MalformedInput(format!("UTF-8として不正なバイト列です: {e}")))
}
