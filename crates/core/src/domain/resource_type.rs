use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    PdfDocument,
    VideoClass,
    Image,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::PdfDocument => "PDF_DOCUMENT",
            ResourceType::VideoClass => "VIDEO_CLASS",
            ResourceType::Image => "IMAGE",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PDF_DOCUMENT" => Ok(ResourceType::PdfDocument),
            "VIDEO_CLASS" => Ok(ResourceType::VideoClass),
            "IMAGE" => Ok(ResourceType::Image),
            other => Err(DomainError::UnknownResourceType(other.to_string())),
        }
    }
}
