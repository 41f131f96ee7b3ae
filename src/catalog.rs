//! Static registry of named device profiles.
//!
//! The catalog is a closed set: adding a device means new geometry and
//! therefore a code change, so keys are an enum rather than a runtime map.

use std::sync::LazyLock;

use crate::error::{FrameryError, FrameryResult};
use crate::fit::FitMode;
use crate::overlay::{OverlaySpec, StorySettings};

/// Stable catalog key for a device profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKey {
    Iphone14,
    InstagramStory,
    Macbook14,
    Macbook16,
    Imac24,
}

impl DeviceKey {
    /// Every registered key, in catalog order.
    pub const ALL: [DeviceKey; 5] = [
        DeviceKey::Iphone14,
        DeviceKey::InstagramStory,
        DeviceKey::Macbook14,
        DeviceKey::Macbook16,
        DeviceKey::Imac24,
    ];

    /// The snake_case key used in output file names and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKey::Iphone14 => "iphone14",
            DeviceKey::InstagramStory => "instagram_story",
            DeviceKey::Macbook14 => "macbook14",
            DeviceKey::Macbook16 => "macbook16",
            DeviceKey::Imac24 => "imac24",
        }
    }

    /// Parse a user-supplied key, failing with the list of valid keys.
    pub fn parse(s: &str) -> FrameryResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let valid = Self::ALL.map(DeviceKey::as_str).join(", ");
                FrameryError::configuration(format!(
                    "unknown device key '{s}' (valid keys: {valid})"
                ))
            })
    }
}

impl std::fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notch geometry drawn into the screen area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotchKind {
    None,
    DynamicIsland,
    MacbookNotch,
}

/// Device family, which keys body color and decorations (keyboard deck,
/// trackpad, stand).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceFamily {
    Phone,
    Laptop,
    Desktop,
}

/// Border sizes around the screen cutout, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// Immutable geometric/behavioral description of a target frame.
#[derive(Clone, Debug)]
pub struct DeviceProfile {
    pub key: DeviceKey,
    pub name: &'static str,
    pub screen_width: u32,
    pub screen_height: u32,
    pub padding: Padding,
    pub corner_radius: f64,
    pub notch: NotchKind,
    pub family: DeviceFamily,
    pub fit_mode: FitMode,
    pub overlay: Option<OverlaySpec>,
}

impl DeviceProfile {
    /// Full template width: screen plus horizontal padding.
    pub fn frame_width(&self) -> u32 {
        self.screen_width + self.padding.left + self.padding.right
    }

    /// Full template height: screen plus vertical padding.
    pub fn frame_height(&self) -> u32 {
        self.screen_height + self.padding.top + self.padding.bottom
    }
}

// Built in `DeviceKey::ALL` order so `profile` can index by discriminant.
static CATALOG: LazyLock<Vec<DeviceProfile>> = LazyLock::new(|| {
    vec![
        DeviceProfile {
            key: DeviceKey::Iphone14,
            name: "iPhone 14 Pro Max",
            screen_width: 1290,
            screen_height: 2796,
            padding: Padding {
                top: 40,
                bottom: 40,
                left: 20,
                right: 20,
            },
            corner_radius: 55.0,
            notch: NotchKind::DynamicIsland,
            family: DeviceFamily::Phone,
            fit_mode: FitMode::Contain,
            overlay: None,
        },
        DeviceProfile {
            key: DeviceKey::InstagramStory,
            name: "Instagram Story (UI Overlay)",
            screen_width: 1290,
            screen_height: 2796,
            padding: Padding {
                top: 40,
                bottom: 40,
                left: 20,
                right: 20,
            },
            corner_radius: 55.0,
            notch: NotchKind::DynamicIsland,
            family: DeviceFamily::Phone,
            fit_mode: FitMode::Cover,
            overlay: Some(OverlaySpec::Story(StorySettings {
                brand_text: "Your Brand • Sponsored".to_string(),
                subtitle_text: "Add your campaign hashtag or message here".to_string(),
                cta_text: "Learn more".to_string(),
                cta_subtext: "yourdomain.com".to_string(),
                progress_fraction: 0.65,
            })),
        },
        DeviceProfile {
            key: DeviceKey::Macbook14,
            name: "MacBook Pro 14\"",
            screen_width: 3024,
            screen_height: 1964,
            padding: Padding {
                top: 60,
                bottom: 80,
                left: 60,
                right: 60,
            },
            corner_radius: 12.0,
            notch: NotchKind::MacbookNotch,
            family: DeviceFamily::Laptop,
            fit_mode: FitMode::Cover,
            overlay: None,
        },
        DeviceProfile {
            key: DeviceKey::Macbook16,
            name: "MacBook Pro 16\"",
            screen_width: 3456,
            screen_height: 2234,
            padding: Padding {
                top: 60,
                bottom: 80,
                left: 60,
                right: 60,
            },
            corner_radius: 12.0,
            notch: NotchKind::MacbookNotch,
            family: DeviceFamily::Laptop,
            fit_mode: FitMode::Cover,
            overlay: None,
        },
        DeviceProfile {
            key: DeviceKey::Imac24,
            name: "iMac 24\"",
            screen_width: 4480,
            screen_height: 2520,
            padding: Padding {
                top: 100,
                bottom: 140,
                left: 80,
                right: 80,
            },
            corner_radius: 15.0,
            notch: NotchKind::None,
            family: DeviceFamily::Desktop,
            fit_mode: FitMode::Cover,
            overlay: None,
        },
    ]
});

/// Look up the profile for a key. Total over `DeviceKey`.
pub fn profile(key: DeviceKey) -> &'static DeviceProfile {
    &CATALOG[key as usize]
}

/// All registered profiles, in catalog order.
pub fn profiles() -> &'static [DeviceProfile] {
    &CATALOG
}
