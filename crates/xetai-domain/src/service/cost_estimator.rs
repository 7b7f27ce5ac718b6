//! On-road (lăn bánh) cost estimation

use serde::{Deserialize, Serialize};

/// How a fee is charged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FeeKind {
    /// Fixed amount in VND
    Flat(u64),
    /// Percentage of the vehicle price
    Percent(f64),
}

/// A named fee applied on top of the vehicle price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeComponent {
    pub name: String,
    pub kind: FeeKind,
}

impl FeeComponent {
    pub fn flat(name: impl Into<String>, amount: u64) -> Self {
        Self {
            name: name.into(),
            kind: FeeKind::Flat(amount),
        }
    }

    pub fn percent(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            kind: FeeKind::Percent(rate),
        }
    }

    /// Fee amount for a given base price, rounded to whole VND
    pub fn amount_for(&self, base_price: u64) -> u64 {
        match self.kind {
            FeeKind::Flat(amount) => amount,
            FeeKind::Percent(rate) if rate > 0.0 => (base_price as f64 * rate / 100.0).round() as u64,
            FeeKind::Percent(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub name: String,
    pub amount: u64,
}

/// Itemized on-road price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub base_price: u64,
    pub items: Vec<FeeLine>,
    pub fees_total: u64,
    pub total: u64,
}

pub fn estimate_rolling_cost(base_price: u64, fees: &[FeeComponent]) -> CostBreakdown {
    let items: Vec<FeeLine> = fees
        .iter()
        .map(|fee| FeeLine {
            name: fee.name.clone(),
            amount: fee.amount_for(base_price),
        })
        .collect();
    let fees_total = items.iter().map(|line| line.amount).sum();
    CostBreakdown {
        base_price,
        items,
        fees_total,
        total: base_price + fees_total,
    }
}

/// Standard fees for registering a commercial vehicle
pub fn default_fee_schedule() -> Vec<FeeComponent> {
    vec![
        FeeComponent::percent("Lệ phí trước bạ", 2.0),
        FeeComponent::flat("Phí cấp biển số", 500_000),
        FeeComponent::flat("Phí đăng kiểm", 570_000),
        FeeComponent::flat("Phí bảo trì đường bộ (12 tháng)", 2_160_000),
        FeeComponent::flat("Bảo hiểm trách nhiệm dân sự", 1_826_000),
    ]
}
