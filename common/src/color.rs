//! グラフ色の生成
//!
//! 24bit RGBを `#RRGGBB` 形式で扱う。重複チェックはしない。

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `#RRGGBB` 形式の色
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// RGB値から生成
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{:02X}{:02X}{:02X}", r, g, b))
    }

    /// 一様ランダムな色
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value: u32 = rng.random_range(0..=0x00FF_FFFF);
        Self(format!("#{:06X}", value))
    }

    /// `#RRGGBB` をパース（大文字小文字は問わない）
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("#{}", hex.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// (r, g, b)
    pub fn rgb(&self) -> (u8, u8, u8) {
        // 生成時に `#` + 16進6桁であることを検証済み
        debug_assert!(Self::parse(&self.0).is_some(), "invalid hex color: {}", self.0);
        let value = u32::from_str_radix(&self.0[1..], 16).unwrap_or(0);
        (
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("Invalid color: {}", value))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}
