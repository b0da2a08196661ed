//! Core data types for meshmapper
//!
//! This module defines the destination catalogue, the pinned shortcut and
//! the screen enumeration shared by the controller and the UI.

/// Root of the MeshMapper service
pub const HOME_URL: &str = "https://meshmapper.net/";

/// Wardrive feature
pub const WARDRIVE_URL: &str = "https://wardrive.meshmapper.net";

/// Domain every regional map lives under
pub const DESTINATION_DOMAIN: &str = "meshmapper.net";

/// A regional map reachable from the Explore screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub code: &'static str,
    pub name: &'static str,
}

pub const DESTINATION_COUNT: usize = 14;

/// Fixed catalogue, in display order
pub static DESTINATIONS: [Destination; DESTINATION_COUNT] = [
    Destination { code: "YOW", name: "Ottawa" },
    Destination { code: "YYZ", name: "Toronto" },
    Destination { code: "YYC", name: "Calgary" },
    Destination { code: "YVR", name: "Vancouver" },
    Destination { code: "YYJ", name: "Victoria" },
    Destination { code: "YKF", name: "Waterloo" },
    Destination { code: "YCD", name: "Nanaimo" },
    Destination { code: "YQQ", name: "Courtenay" },
    Destination { code: "YSE", name: "Squamish" },
    Destination { code: "YQA", name: "Muskoka" },
    Destination { code: "MSN", name: "Madison" },
    Destination { code: "BNE", name: "Brisbane" },
    Destination { code: "KTW", name: "Katowice" },
    Destination { code: "BLX", name: "Meano" },
];

impl Destination {
    /// Look up a catalogue entry by its code (case-insensitive)
    pub fn find(code: &str) -> Option<&'static Destination> {
        DESTINATIONS
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
    }

    /// Two-line label used on the Explore grid
    pub fn grid_label(&self) -> String {
        format!("{}\n{}", self.code, self.name)
    }
}

/// Build the map URL for a destination code
pub fn destination_url(code: &str) -> String {
    format!("https://{}.{}", code.to_lowercase(), DESTINATION_DOMAIN)
}

/// The single shortcut remembered on the start screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedShortcut {
    pub code: String,
    pub name: String,
}

impl PinnedShortcut {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn button_label(&self) -> String {
        format!("Explore {} ({})", self.name, self.code)
    }

    pub fn url(&self) -> String {
        destination_url(&self.code)
    }
}

/// Application screens (exactly one is visible)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Main,
    Explore,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Main => "Start",
            Screen::Explore => "Explore",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_url_is_lowercased() {
        assert_eq!(destination_url("YOW"), "https://yow.meshmapper.net");
        assert_eq!(destination_url("BLX"), "https://blx.meshmapper.net");
    }

    #[test]
    fn test_catalogue_order() {
        let codes: Vec<&str> = DESTINATIONS.iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            [
                "YOW", "YYZ", "YYC", "YVR", "YYJ", "YKF", "YCD", "YQQ", "YSE", "YQA", "MSN",
                "BNE", "KTW", "BLX"
            ]
        );
    }

    #[test]
    fn test_find() {
        assert_eq!(Destination::find("ktw").map(|d| d.name), Some("Katowice"));
        assert!(Destination::find("XXX").is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(DESTINATIONS[1].grid_label(), "YYZ\nToronto");
        let pin = PinnedShortcut::new("YYZ", "Toronto");
        assert_eq!(pin.button_label(), "Explore Toronto (YYZ)");
        assert_eq!(pin.url(), "https://yyz.meshmapper.net");
    }

    #[test]
    fn test_default_screen() {
        assert_eq!(Screen::default(), Screen::Main);
    }
}
