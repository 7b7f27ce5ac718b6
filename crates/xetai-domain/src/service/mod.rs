//! Domain services

pub mod blog;
pub mod compare;
pub mod cost_estimator;
pub mod filter;
pub mod loan_calculator;

pub use compare::{
    is_shareable_id, parse_share_url, AddOutcome, CompareList, LoadOutcome, MAX_COMPARE_ITEMS,
};
pub use cost_estimator::{
    default_fee_schedule, estimate_rolling_cost, CostBreakdown, FeeComponent, FeeKind, FeeLine,
};
pub use filter::{catalog_brands, filter_products, FilterCriteria, WeightCategory, WEIGHT_CATEGORIES};
pub use loan_calculator::{amortize, CalculatorError, LoanPeriod, LoanSchedule, LoanTerms};
