//! Dark-mode state and OS color-mode detection.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }
}

impl From<bool> for ColorMode {
    fn from(dark: bool) -> Self {
        if dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }
}

/// Tri-state dark-mode flag.
///
/// The flag starts out `Unset`. The first write only records a value; every
/// later write is a transition that the engine answers with a full
/// re-application, even when the value did not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DarkFlag {
    #[default]
    Unset,
    Light,
    Dark,
}

impl DarkFlag {
    /// Reads the flag, treating `Unset` as light.
    pub fn is_dark(self) -> bool {
        self == DarkFlag::Dark
    }

    pub fn is_set(self) -> bool {
        self != DarkFlag::Unset
    }

    /// Records a new value, returning the previous state.
    pub fn replace(&mut self, dark: bool) -> DarkFlag {
        std::mem::replace(self, ColorMode::from(dark).into())
    }
}

impl From<ColorMode> for DarkFlag {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => DarkFlag::Light,
            ColorMode::Dark => DarkFlag::Dark,
        }
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when the host knows the color mode better
/// than the operating system does.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Runs the current detector.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_dark_flag_starts_unset_and_reads_light() {
        let flag = DarkFlag::default();
        assert!(!flag.is_set());
        assert!(!flag.is_dark());
    }

    #[test]
    fn test_dark_flag_replace_returns_previous() {
        let mut flag = DarkFlag::Unset;
        assert_eq!(flag.replace(true), DarkFlag::Unset);
        assert_eq!(flag.replace(true), DarkFlag::Dark);
        assert_eq!(flag.replace(false), DarkFlag::Dark);
        assert_eq!(flag, DarkFlag::Light);
    }

    #[test]
    #[serial]
    fn test_set_theme_detector_overrides_detection() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);
    }
}
