//! Media format classification and priority ordering.

use serde::{Deserialize, Serialize};

/// Media format derived from a URL, in priority order (jpg best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    Jpg,
    Jpeg,
    Png,
    Webp,
    Other,
}

impl MediaFormat {
    /// Classify a URL by the first matching extension marker. Each URL lands
    /// in exactly one class.
    pub fn classify(url: &str) -> Self {
        let url = url.to_lowercase();

        if url.contains(".jpg") {
            MediaFormat::Jpg
        } else if url.contains(".jpeg") {
            MediaFormat::Jpeg
        } else if url.contains(".png") {
            MediaFormat::Png
        } else if url.contains(".webp") {
            MediaFormat::Webp
        } else {
            MediaFormat::Other
        }
    }

    /// Numeric priority (1 = best).
    pub fn priority(self) -> u8 {
        match self {
            MediaFormat::Jpg => 1,
            MediaFormat::Jpeg => 2,
            MediaFormat::Png => 3,
            MediaFormat::Webp => 4,
            MediaFormat::Other => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(MediaFormat::classify("https://a/x.jpg"), MediaFormat::Jpg);
        assert_eq!(
            MediaFormat::classify("https://a/x.JPEG?w=300"),
            MediaFormat::Jpeg
        );
        assert_eq!(MediaFormat::classify("https://a/x.png"), MediaFormat::Png);
        assert_eq!(MediaFormat::classify("https://a/x.webp"), MediaFormat::Webp);
        assert_eq!(MediaFormat::classify("https://a/x.gif"), MediaFormat::Other);
    }

    #[test]
    fn test_priority_order() {
        assert!(MediaFormat::Jpg.priority() < MediaFormat::Jpeg.priority());
        assert!(MediaFormat::Jpeg.priority() < MediaFormat::Png.priority());
        assert!(MediaFormat::Png.priority() < MediaFormat::Webp.priority());
        assert!(MediaFormat::Webp.priority() < MediaFormat::Other.priority());
    }
}
