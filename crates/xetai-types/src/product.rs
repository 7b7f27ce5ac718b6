//! Product (vehicle) records

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Accept either a single string or a list of strings
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let brands = match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(brand) => vec![brand],
        OneOrMany::Many(brands) => brands,
    };
    Ok(brands
        .into_iter()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect())
}

/// Vehicle category, serialized as its URL slug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    /// Xe tải
    #[serde(rename = "xe-tai")]
    Truck,
    /// Xe cẩu
    #[serde(rename = "xe-cau")]
    Crane,
    /// Sơ mi rơ mooc
    #[serde(rename = "mooc")]
    SemiTrailer,
    /// Xe đầu kéo
    #[serde(rename = "dau-keo")]
    Tractor,
    /// Xe đông lạnh
    #[serde(rename = "xe-dong-lanh")]
    Refrigerated,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Truck,
        VehicleType::Crane,
        VehicleType::SemiTrailer,
        VehicleType::Tractor,
        VehicleType::Refrigerated,
    ];

    /// URL slug, also the type tag used by the catalog filter
    pub fn slug(&self) -> &'static str {
        match self {
            VehicleType::Truck => "xe-tai",
            VehicleType::Crane => "xe-cau",
            VehicleType::SemiTrailer => "mooc",
            VehicleType::Tractor => "dau-keo",
            VehicleType::Refrigerated => "xe-dong-lanh",
        }
    }

    /// Display label in Vietnamese
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Truck => "Xe Tải",
            VehicleType::Crane => "Xe Cẩu",
            VehicleType::SemiTrailer => "Sơ Mi Rơ Mooc",
            VehicleType::Tractor => "Xe Đầu Kéo",
            VehicleType::Refrigerated => "Xe Đông Lạnh",
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| format!("unknown vehicle type: {}", s))
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Outer dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: u32,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {} x {} mm", self.length, self.width, self.height)
    }
}

/// Type-specific specification block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleSpecs {
    Crane {
        /// Max lifting capacity (t)
        lifting_capacity: f64,
        /// Boom length (m)
        boom_length: f64,
        #[serde(default)]
        working_radius: Option<f64>,
        #[serde(default)]
        boom_sections: Option<u8>,
    },
    Trailer {
        axle_count: u8,
        /// Bed or tank type (sàn, ben, xitéc, lồng...)
        body_type: String,
        /// Rated payload (t)
        #[serde(default)]
        payload: Option<f64>,
        #[serde(default)]
        tank_volume_m3: Option<f64>,
    },
    Tractor {
        engine: String,
        horsepower: u32,
        /// Fifth-wheel load (t)
        #[serde(default)]
        fifth_wheel_load: Option<f64>,
    },
    Refrigeration {
        box_volume_m3: f64,
        /// Lowest holding temperature (°C)
        min_temperature: i16,
        #[serde(default)]
        max_temperature: Option<i16>,
        #[serde(default)]
        cooling_unit: Option<String>,
    },
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Brand tags; a single brand is a one-element list
    #[serde(rename = "brand", deserialize_with = "one_or_many")]
    pub brands: Vec<String>,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    /// Price in VND, 0 means "contact us"
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub price_text: Option<String>,
    /// Payload (t)
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub weight_text: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default)]
    pub specs: Option<VehicleSpecs>,
}

impl Product {
    /// Weight label shown in listings and matched by free-text search
    pub fn weight_label(&self) -> String {
        match &self.weight_text {
            Some(text) => text.clone(),
            None => format!("{} tấn", self.weight),
        }
    }

    pub fn display_price(&self) -> String {
        if let Some(ref text) = self.price_text {
            return text.clone();
        }
        if self.price == 0 {
            "Liên hệ".to_string()
        } else {
            format_vnd(self.price)
        }
    }

    pub fn brand_label(&self) -> String {
        self.brands.join(", ")
    }

    pub fn url_path(&self) -> String {
        format!("/{}/{}", self.vehicle_type.slug(), self.slug)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Format an amount as VND with dot grouping, e.g. `1.250.000 ₫`
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{} ₫", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_accepts_single_string() {
        let json = r#"{"id":"a","name":"A","slug":"a","brand":"Hyundai","type":"xe-tai"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.brands, vec!["Hyundai".to_string()]);
    }

    #[test]
    fn test_brand_accepts_list() {
        let json = r#"{"id":"a","name":"A","slug":"a","brand":["Soosan"," Hyundai "],"type":"xe-cau"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.brands, vec!["Soosan".to_string(), "Hyundai".to_string()]);
        assert_eq!(product.vehicle_type, VehicleType::Crane);
    }

    #[test]
    fn test_vehicle_type_from_str() {
        assert_eq!("mooc".parse::<VehicleType>(), Ok(VehicleType::SemiTrailer));
        assert!("xe-bus".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_weight_label_fallback() {
        let json = r#"{"id":"a","name":"A","slug":"a","brand":"Hino","type":"xe-tai","weight":3.5}"#;
        let mut product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.weight_label(), "3.5 tấn");
        product.weight_text = Some("3,5 Tấn".to_string());
        assert_eq!(product.weight_label(), "3,5 Tấn");
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0 ₫");
        assert_eq!(format_vnd(999), "999 ₫");
        assert_eq!(format_vnd(1_000), "1.000 ₫");
        assert_eq!(format_vnd(1_250_000_000), "1.250.000.000 ₫");
    }

    #[test]
    fn test_specs_tagged() {
        let json = r#"{"kind":"crane","lifting_capacity":7.0,"boom_length":20.5}"#;
        let specs: VehicleSpecs = serde_json::from_str(json).unwrap();
        assert!(matches!(specs, VehicleSpecs::Crane { boom_sections: None, .. }));
    }
}
