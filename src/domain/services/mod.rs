//! # Domain Services
//!
//! 特定のエンティティに属さないビジネスロジック
//!
//! ## サービス
//!
//! - **ReshapeService**: ワイド形式からロング形式への変換
//! - **geography**: 地理識別子の変換とマージテンプレート

pub mod geography;
pub mod reshape;
