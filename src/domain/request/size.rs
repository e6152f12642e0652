//! Ad size negotiation between the mediation layer and the ad network.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ConfigurationError;

/// Sizes the ad network can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdSize {
    /// 320x50 with fluid width.
    Banner,
    /// 728x90.
    Leader,
    /// 300x250 medium rectangle.
    Mrec,
    /// Fullscreen.
    Interstitial,
}

impl AdSize {
    pub const BANNER_STANDARD_HEIGHT: u32 = 50;
    pub const BANNER_HEIGHT_TOLERANCE: u32 = 10;
    pub const MREC_HEIGHT: u32 = 250;

    /// Maps a mediation banner size onto a network size.
    ///
    /// Predefined sizes map directly. Anything else is treated as fluid width
    /// and matched on height: close to the standard banner height gives a
    /// banner, and when `allow_mrec` is set a height that fits a medium
    /// rectangle gives an MREC.
    pub fn from_requested(requested: RequestedSize, allow_mrec: bool) -> Result<Self, ConfigurationError> {
        match requested {
            RequestedSize::Banner | RequestedSize::LargeBanner => Ok(AdSize::Banner),
            RequestedSize::MediumRectangle => Ok(AdSize::Mrec),
            RequestedSize::Leaderboard => Ok(AdSize::Leader),
            RequestedSize::Custom { width, height } => {
                if width == 0 || height == 0 {
                    return Err(ConfigurationError::UnsupportedAdSize { width, height });
                }

                if Self::BANNER_STANDARD_HEIGHT.abs_diff(height) <= Self::BANNER_HEIGHT_TOLERANCE {
                    Ok(AdSize::Banner)
                } else if allow_mrec && height <= Self::MREC_HEIGHT {
                    Ok(AdSize::Mrec)
                } else {
                    Err(ConfigurationError::UnsupportedAdSize { width, height })
                }
            }
        }
    }
}

impl fmt::Display for AdSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdSize::Banner => "BANNER",
            AdSize::Leader => "LEADER",
            AdSize::Mrec => "MREC",
            AdSize::Interstitial => "INTER",
        };
        write!(f, "{}", s)
    }
}

/// Banner size requested by the mediation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedSize {
    Banner,
    LargeBanner,
    MediumRectangle,
    Leaderboard,
    Custom { width: u32, height: u32 },
}

impl fmt::Display for RequestedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestedSize::Banner => write!(f, "320x50"),
            RequestedSize::LargeBanner => write!(f, "320x100"),
            RequestedSize::MediumRectangle => write!(f, "300x250"),
            RequestedSize::Leaderboard => write!(f, "728x90"),
            RequestedSize::Custom { width, height } => write!(f, "{}x{}", width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predefined_sizes_map_directly() {
        assert_eq!(AdSize::from_requested(RequestedSize::Banner, false), Ok(AdSize::Banner));
        assert_eq!(
            AdSize::from_requested(RequestedSize::LargeBanner, false),
            Ok(AdSize::Banner)
        );
        assert_eq!(
            AdSize::from_requested(RequestedSize::MediumRectangle, false),
            Ok(AdSize::Mrec)
        );
        assert_eq!(
            AdSize::from_requested(RequestedSize::Leaderboard, false),
            Ok(AdSize::Leader)
        );
    }

    #[test]
    fn custom_height_within_tolerance_is_banner() {
        for height in [40, 50, 60] {
            let size = RequestedSize::Custom { width: 360, height };
            assert_eq!(AdSize::from_requested(size, false), Ok(AdSize::Banner));
        }
    }

    #[test]
    fn custom_height_outside_tolerance_is_rejected_without_mrec() {
        let size = RequestedSize::Custom { width: 360, height: 61 };
        assert_eq!(
            AdSize::from_requested(size, false),
            Err(ConfigurationError::UnsupportedAdSize { width: 360, height: 61 })
        );
    }

    #[test]
    fn custom_height_fitting_mrec_is_mrec_when_allowed() {
        let size = RequestedSize::Custom { width: 300, height: 200 };
        assert_eq!(AdSize::from_requested(size, true), Ok(AdSize::Mrec));

        let too_tall = RequestedSize::Custom { width: 300, height: 251 };
        assert!(AdSize::from_requested(too_tall, true).is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let size = RequestedSize::Custom { width: 0, height: 50 };
        assert!(AdSize::from_requested(size, true).is_err());
    }
}
