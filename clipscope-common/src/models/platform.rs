// File: clipscope-common/src/models/platform.rs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Video platform as reported by the analysis service. Anything the
/// service names that we don't recognise collapses into `Unknown`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Platform {
    TikTok,
    YouTube,
    Instagram,
    #[default]
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::TikTok => write!(f, "TikTok"),
            Platform::YouTube => write!(f, "YouTube"),
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Unknown => write!(f, "Unknown"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiktok" | "tik tok" | "tik-tok" => Ok(Platform::TikTok),
            "youtube" | "yt" | "youtube shorts" => Ok(Platform::YouTube),
            "instagram" | "ig" | "instagram reels" => Ok(Platform::Instagram),
            "unknown" => Ok(Platform::Unknown),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or(Platform::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_spellings() {
        assert_eq!(Platform::from("TikTok"), Platform::TikTok);
        assert_eq!(Platform::from("tik tok"), Platform::TikTok);
        assert_eq!(Platform::from(" YouTube "), Platform::YouTube);
        assert_eq!(Platform::from("IG"), Platform::Instagram);
    }

    #[test]
    fn unrecognised_platform_is_unknown() {
        assert_eq!(Platform::from("Vimeo"), Platform::Unknown);
        assert_eq!(Platform::from(""), Platform::Unknown);
    }
}
