//! Image formats and the constants that describe them.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Image host used when no constants document is configured.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://f4.bcbits.com/img";

// == Image Format ==
/// A rendition the image host can serve, identified by its numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFormat {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageFormat {
    fn square(id: u32, name: &str, size: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            width: Some(size),
            height: Some(size),
        }
    }
}

// == Image Constants ==
/// Base URL and known formats of the image host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConstants {
    pub base_url: String,
    pub formats: Vec<ImageFormat>,
}

impl ImageConstants {
    /// Constants used when no document is configured.
    pub fn builtin() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            formats: vec![
                ImageFormat {
                    id: 0,
                    name: "original".to_string(),
                    width: None,
                    height: None,
                },
                ImageFormat::square(2, "art_350", 350),
                ImageFormat::square(3, "art_100", 100),
                ImageFormat::square(4, "art_300", 300),
                ImageFormat::square(5, "art_700", 700),
                ImageFormat::square(7, "art_150", 150),
                ImageFormat::square(9, "art_210", 210),
                ImageFormat::square(10, "art_1200", 1200),
                ImageFormat::square(16, "art_700_q", 700),
                ImageFormat::square(21, "bio_120", 120),
                ImageFormat::square(42, "art_50", 50),
            ],
        }
    }

    pub fn find_by_id(&self, id: u32) -> Option<&ImageFormat> {
        self.formats.iter().find(|f| f.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ImageFormat> {
        self.formats.iter().find(|f| f.name == name)
    }
}

// == Format Reference ==
/// How a caller asks for an image format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatRef {
    Id(u32),
    Name(String),
    Format(ImageFormat),
}

impl From<u32> for FormatRef {
    fn from(id: u32) -> Self {
        FormatRef::Id(id)
    }
}

impl From<&str> for FormatRef {
    fn from(name: &str) -> Self {
        FormatRef::Name(name.to_string())
    }
}

impl From<ImageFormat> for FormatRef {
    fn from(format: ImageFormat) -> Self {
        FormatRef::Format(format)
    }
}

impl FromStr for FormatRef {
    type Err = Infallible;

    /// Numeric input is an id, anything else a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<u32>() {
            Ok(id) => FormatRef::Id(id),
            Err(_) => FormatRef::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for FormatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatRef::Id(id) => write!(f, "{}", id),
            FormatRef::Name(name) => f.write_str(name),
            FormatRef::Format(format) => write!(f, "{} ({})", format.name, format.id),
        }
    }
}
