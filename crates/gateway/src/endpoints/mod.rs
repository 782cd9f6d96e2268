//! # Gateway エンドポイント
//!
//! - `reissue`: launch_dataの検証と再署名
//! - `healthz`: 死活監視

pub mod healthz;
pub mod reissue;
