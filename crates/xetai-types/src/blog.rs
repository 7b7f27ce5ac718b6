//! Blog content records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog category with fixed label and URL slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlogCategory {
    IndustryNews,
    ProductReview,
    DriverTips,
    Maintenance,
    BuyingGuide,
    Technology,
}

impl BlogCategory {
    pub const ALL: [BlogCategory; 6] = [
        BlogCategory::IndustryNews,
        BlogCategory::ProductReview,
        BlogCategory::DriverTips,
        BlogCategory::Maintenance,
        BlogCategory::BuyingGuide,
        BlogCategory::Technology,
    ];

    /// Category key as stored in content data
    pub fn key(&self) -> &'static str {
        match self {
            BlogCategory::IndustryNews => "industry-news",
            BlogCategory::ProductReview => "product-review",
            BlogCategory::DriverTips => "driver-tips",
            BlogCategory::Maintenance => "maintenance",
            BlogCategory::BuyingGuide => "buying-guide",
            BlogCategory::Technology => "technology",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlogCategory::IndustryNews => "Tin Tức Ngành Vận Tải",
            BlogCategory::ProductReview => "Đánh Giá Xe",
            BlogCategory::DriverTips => "Kinh Nghiệm Lái Xe",
            BlogCategory::Maintenance => "Bảo Dưỡng",
            BlogCategory::BuyingGuide => "Tư Vấn Mua Xe",
            BlogCategory::Technology => "Công Nghệ & Đổi Mới",
        }
    }

    /// Vietnamese URL slug without diacritics
    pub fn url_slug(&self) -> &'static str {
        match self {
            BlogCategory::IndustryNews => "tin-tuc-nganh-van-tai",
            BlogCategory::ProductReview => "danh-gia-xe",
            BlogCategory::DriverTips => "kinh-nghiem-lai-xe",
            BlogCategory::Maintenance => "bao-duong",
            BlogCategory::BuyingGuide => "tu-van-mua-xe",
            BlogCategory::Technology => "cong-nghe-doi-moi",
        }
    }

    pub fn from_url_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.url_slug() == slug)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
    pub category: BlogCategory,
    #[serde(default)]
    pub images: Vec<String>,
    pub publish_date: DateTime<Utc>,
    /// Estimated reading time (minutes)
    pub read_time: u32,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: Option<u32>,
    #[serde(default)]
    pub comments: Option<u32>,
}

impl BlogPost {
    pub fn url_path(&self) -> String {
        format!("/{}/{}", self.category.url_slug(), self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_lookup_round_trip() {
        for category in BlogCategory::ALL {
            assert_eq!(BlogCategory::from_url_slug(category.url_slug()), Some(category));
            assert_eq!(BlogCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(BlogCategory::from_url_slug("khong-ton-tai"), None);
    }

    #[test]
    fn test_category_serde_uses_key() {
        let json = serde_json::to_string(&BlogCategory::BuyingGuide).unwrap();
        assert_eq!(json, "\"buying-guide\"");
    }
}
