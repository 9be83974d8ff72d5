//! Output format name classification.

use serde::{Deserialize, Serialize};

/// How the sink treats a format name when building encoder options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatFamily {
    /// "jpg", "jpeg" and "bmp": share a compression-quality knob and
    /// cannot carry an alpha channel.
    JpegLike,
    /// "png": subject to the default-encoder quality workaround.
    Png,
    /// Everything else is written with encoder defaults.
    Other,
}

/// Classify a format name, ignoring ASCII case.
pub fn classify_format(format_name: &str) -> FormatFamily {
    if is_jpeg_or_bmp(format_name) {
        FormatFamily::JpegLike
    } else if is_png(format_name) {
        FormatFamily::Png
    } else {
        FormatFamily::Other
    }
}

pub fn is_jpeg_or_bmp(format_name: &str) -> bool {
    ["jpg", "jpeg", "bmp"]
        .iter()
        .any(|name| name.eq_ignore_ascii_case(format_name))
}

pub fn is_png(format_name: &str) -> bool {
    format_name.eq_ignore_ascii_case("png")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for producing a random ASCII casing of a fixed word.
    fn any_case(word: &'static str) -> impl Strategy<Value = String> {
        prop::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
            word.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
    }

    proptest! {
        /// Property: jpg/jpeg/bmp are jpeg-like in every letter case.
        #[test]
        fn prop_jpeg_family_any_case(
            name in prop_oneof![any_case("jpg"), any_case("jpeg"), any_case("bmp")],
        ) {
            prop_assert_eq!(classify_format(&name), FormatFamily::JpegLike);
        }

        /// Property: png is png in every letter case.
        #[test]
        fn prop_png_any_case(name in any_case("png")) {
            prop_assert_eq!(classify_format(&name), FormatFamily::Png);
        }

        /// Property: any other name is classified as Other.
        #[test]
        fn prop_other_names(name in "[a-zA-Z0-9]{0,8}") {
            let lower = name.to_ascii_lowercase();
            prop_assume!(!["jpg", "jpeg", "bmp", "png"].contains(&lower.as_str()));
            prop_assert_eq!(classify_format(&name), FormatFamily::Other);
        }
    }
}
