use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five social platforms the engine understands.
///
/// Serialized names are lowercase and match the compliance configuration
/// surface (`reddit`, `instagram`, `twitter`, `tiktok`, `youtube`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    TikTok,
    YouTube,
    Reddit,
}

impl Platform {
    /// All platforms, in the order the configuration table lists them.
    pub const ALL: [Platform; 5] = [
        Platform::Reddit,
        Platform::Instagram,
        Platform::Twitter,
        Platform::TikTok,
        Platform::YouTube,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::Reddit => "reddit",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl std::str::FromStr for Platform {
    type Err = UnknownPlatform;

    /// Case-insensitive platform lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "twitter" => Ok(Platform::Twitter),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "youtube" => Ok(Platform::YouTube),
            "reddit" => Ok(Platform::Reddit),
            _ => Err(UnknownPlatform(s.to_string())),
        }
    }
}
