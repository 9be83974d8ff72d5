//! Compatibility policy for encoders whose behaviour differs across platforms.
//!
//! Some default png encoders on modern platforms refuse to write unless an
//! explicit compression quality is present. The sink works around this in
//! two steps, both expressed here as pure functions so they can be tested
//! and switched off independently:
//!
//! 1. [`select_encoder`] prefers an alternative png encoder over the default.
//! 2. [`png_quality_override`] forces quality `0.0` when the default png
//!    encoder ends up being used. Caller parameters never reach png
//!    encoders, so this is the only quality a png write can carry.

use serde::{Deserialize, Serialize};

use super::format::FormatFamily;
use super::types::{EncoderInfo, BUILTIN_VENDOR};

/// Platform generation the sink should assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompatibilityMode {
    /// Older platforms whose default png encoder accepts implicit quality.
    Legacy,
    /// Newer platforms that need the png workaround.
    #[default]
    Modern,
}

impl CompatibilityMode {
    /// Derive the mode from a platform specification version string.
    ///
    /// Legacy version strings are dotted ("1.8"); modern ones are a single
    /// number ("9", "17").
    pub fn from_version_string(version: &str) -> Self {
        if version.contains('.') {
            CompatibilityMode::Legacy
        } else {
            CompatibilityMode::Modern
        }
    }

    pub fn is_modern(self) -> bool {
        self == CompatibilityMode::Modern
    }
}

/// Compatibility settings injected into an [`ImageSink`](super::ImageSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompatibilityConfig {
    pub mode: CompatibilityMode,
    /// Set to false to disable the png encoder workaround entirely.
    pub png_workaround: bool,
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            mode: CompatibilityMode::Modern,
            png_workaround: true,
        }
    }
}

impl CompatibilityConfig {
    /// Create a config for the given mode with the workaround enabled.
    pub fn new(mode: CompatibilityMode) -> Self {
        Self {
            mode,
            png_workaround: true,
        }
    }

    /// Create a config with the png workaround disabled.
    pub fn without_png_workaround(mode: CompatibilityMode) -> Self {
        Self {
            mode,
            png_workaround: false,
        }
    }

    /// Returns true if the png workaround should run.
    pub fn png_workaround_active(&self) -> bool {
        self.png_workaround && self.mode.is_modern()
    }
}

/// Returns true if `info` describes the built-in png encoder.
pub fn is_default_png_encoder(info: &EncoderInfo) -> bool {
    info.vendor == BUILTIN_VENDOR && info.handles("png")
}

/// Pick an encoder among `candidates`, which are in registration order.
///
/// Returns `None` only when `candidates` is empty. The first candidate wins
/// unless the png workaround is active, in which case the first non-default
/// png encoder is preferred.
pub fn select_encoder(
    family: FormatFamily,
    config: &CompatibilityConfig,
    candidates: &[EncoderInfo],
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    if family == FormatFamily::Png && config.png_workaround_active() {
        let alternative = candidates
            .iter()
            .position(|info| !is_default_png_encoder(info));
        return Some(alternative.unwrap_or(0));
    }

    Some(0)
}

/// Quality to force on the selected encoder, if any.
pub fn png_quality_override(
    family: FormatFamily,
    config: &CompatibilityConfig,
    selected: &EncoderInfo,
) -> Option<f32> {
    let applies = family == FormatFamily::Png
        && config.png_workaround_active()
        && is_default_png_encoder(selected);

    applies.then_some(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_PNG: EncoderInfo = EncoderInfo {
        name: "png",
        vendor: BUILTIN_VENDOR,
        format_names: &["png"],
        compression_types: &["Deflate"],
    };

    const ALT_PNG: EncoderInfo = EncoderInfo {
        name: "alt-png",
        vendor: "acme",
        format_names: &["png"],
        compression_types: &[],
    };

    const JPEG: EncoderInfo = EncoderInfo {
        name: "jpeg",
        vendor: BUILTIN_VENDOR,
        format_names: &["jpg", "jpeg"],
        compression_types: &["JPEG"],
    };

    #[test]
    fn test_mode_from_version_string() {
        assert_eq!(
            CompatibilityMode::from_version_string("1.8"),
            CompatibilityMode::Legacy
        );
        assert_eq!(
            CompatibilityMode::from_version_string("1.6"),
            CompatibilityMode::Legacy
        );
        assert_eq!(
            CompatibilityMode::from_version_string("9"),
            CompatibilityMode::Modern
        );
        assert_eq!(
            CompatibilityMode::from_version_string("21"),
            CompatibilityMode::Modern
        );
    }

    #[test]
    fn test_default_config() {
        let config = CompatibilityConfig::default();
        assert!(config.png_workaround_active());
        assert!(!CompatibilityConfig::new(CompatibilityMode::Legacy).png_workaround_active());
        assert!(
            !CompatibilityConfig::without_png_workaround(CompatibilityMode::Modern)
                .png_workaround_active()
        );
    }

    #[test]
    fn test_is_default_png_encoder() {
        assert!(is_default_png_encoder(&DEFAULT_PNG));
        assert!(!is_default_png_encoder(&ALT_PNG));
        assert!(!is_default_png_encoder(&JPEG));
    }

    #[test]
    fn test_select_first_when_empty_or_not_png() {
        let config = CompatibilityConfig::default();
        assert_eq!(select_encoder(FormatFamily::Png, &config, &[]), None);
        assert_eq!(
            select_encoder(FormatFamily::JpegLike, &config, &[JPEG, ALT_PNG]),
            Some(0)
        );
    }

    #[test]
    fn test_select_prefers_alternative_png_on_modern() {
        let config = CompatibilityConfig::default();
        let candidates = [DEFAULT_PNG, ALT_PNG];
        assert_eq!(
            select_encoder(FormatFamily::Png, &config, &candidates),
            Some(1)
        );
    }

    #[test]
    fn test_select_default_png_on_legacy() {
        let config = CompatibilityConfig::new(CompatibilityMode::Legacy);
        let candidates = [DEFAULT_PNG, ALT_PNG];
        assert_eq!(
            select_encoder(FormatFamily::Png, &config, &candidates),
            Some(0)
        );
    }

    #[test]
    fn test_select_falls_back_to_default_png() {
        let config = CompatibilityConfig::default();
        assert_eq!(
            select_encoder(FormatFamily::Png, &config, &[DEFAULT_PNG]),
            Some(0)
        );
    }

    #[test]
    fn test_select_with_workaround_disabled() {
        let config = CompatibilityConfig::without_png_workaround(CompatibilityMode::Modern);
        assert_eq!(
            select_encoder(FormatFamily::Png, &config, &[DEFAULT_PNG, ALT_PNG]),
            Some(0)
        );
    }

    #[test]
    fn test_quality_override() {
        let modern = CompatibilityConfig::default();
        let legacy = CompatibilityConfig::new(CompatibilityMode::Legacy);

        assert_eq!(
            png_quality_override(FormatFamily::Png, &modern, &DEFAULT_PNG),
            Some(0.0)
        );
        assert_eq!(
            png_quality_override(
                FormatFamily::Png,
                &CompatibilityConfig::without_png_workaround(CompatibilityMode::Modern),
                &DEFAULT_PNG
            ),
            None
        );
        assert_eq!(
            png_quality_override(FormatFamily::Png, &legacy, &DEFAULT_PNG),
            None
        );
        assert_eq!(
            png_quality_override(FormatFamily::Png, &modern, &ALT_PNG),
            None
        );
        assert_eq!(
            png_quality_override(FormatFamily::JpegLike, &modern, &JPEG),
            None
        );
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: CompatibilityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CompatibilityConfig::default());

        let config: CompatibilityConfig =
            serde_json::from_str(r#"{"mode":"legacy","pngWorkaround":false}"#).unwrap();
        assert_eq!(config.mode, CompatibilityMode::Legacy);
        assert!(!config.png_workaround);
    }
}
