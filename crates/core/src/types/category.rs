//! Product category tags.

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known category tag.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category: {0} (expected ebook, course or template)")]
pub struct CategoryParseError(pub String);

/// The kind of digital good a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Downloadable book.
    Ebook,
    /// Video or interactive course.
    Course,
    /// Reusable site or document template.
    Template,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 3] = [Self::Ebook, Self::Course, Self::Template];

    /// The wire tag used in storage and query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ebook => "ebook",
            Self::Course => "course",
            Self::Template => "template",
        }
    }

    /// Plural label for filter buttons and headings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ebook => "eBooks",
            Self::Course => "Courses",
            Self::Template => "Templates",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ebook" => Ok(Self::Ebook),
            "course" => Ok(Self::Course),
            "template" => Ok(Self::Template),
            _ => Err(CategoryParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Ebook".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_tag() {
        let json = serde_json::to_string(&Category::Template).ok();
        assert_eq!(json.as_deref(), Some("\"template\""));
    }
}
