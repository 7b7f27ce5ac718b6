//! Fixed-rate loan amortization
//!
//! Amounts are whole VND. Each period pays the same total except the last,
//! which settles the remaining balance so principal sums exactly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted term (50 years)
pub const MAX_LOAN_MONTHS: u32 = 600;

/// Highest accepted nominal annual rate in percent
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("Loan term must be at least one month")]
    ZeroTerm,

    #[error("Loan term of {0} months exceeds the maximum of 600")]
    TermTooLong(u32),

    #[error("A {annual_rate_percent}% rate over {months} months never repays principal")]
    NotAmortizing { annual_rate_percent: f64, months: u32 },

    #[error("Invalid annual interest rate: {0}")]
    InvalidRate(f64),

    #[error("Down payment must be between 0 and 100 percent: {0}")]
    InvalidDownPayment(f64),
}

impl From<CalculatorError> for xetai_types::Error {
    fn from(err: CalculatorError) -> Self {
        xetai_types::Error::Calculation(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount financed (VND)
    pub principal: u64,
    /// Nominal annual rate, e.g. 9.5 for 9.5 %
    pub annual_rate_percent: f64,
    pub months: u32,
}

impl LoanTerms {
    pub fn new(principal: u64, annual_rate_percent: f64, months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            months,
        }
    }

    /// Finance a vehicle price after a down payment given in percent
    pub fn from_price(
        price: u64,
        down_payment_percent: f64,
        annual_rate_percent: f64,
        months: u32,
    ) -> Result<Self, CalculatorError> {
        if !(0.0..=100.0).contains(&down_payment_percent) {
            return Err(CalculatorError::InvalidDownPayment(down_payment_percent));
        }
        let down = (price as f64 * down_payment_percent / 100.0).round() as u64;
        Ok(Self::new(price.saturating_sub(down), annual_rate_percent, months))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPeriod {
    /// 1-based period number
    pub index: u32,
    pub payment: u64,
    pub principal: u64,
    pub interest: u64,
    /// Balance after this payment
    pub remaining: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub terms: LoanTerms,
    /// Regular payment (the last period may differ by rounding)
    pub monthly_payment: u64,
    pub periods: Vec<LoanPeriod>,
    pub total_interest: u64,
    pub total_paid: u64,
}

pub fn amortize(terms: &LoanTerms) -> Result<LoanSchedule, CalculatorError> {
    if terms.months == 0 {
        return Err(CalculatorError::ZeroTerm);
    }
    if terms.months > MAX_LOAN_MONTHS {
        return Err(CalculatorError::TermTooLong(terms.months));
    }
    let rate = terms.annual_rate_percent;
    if !rate.is_finite() || !(0.0..=MAX_ANNUAL_RATE_PERCENT).contains(&rate) {
        return Err(CalculatorError::InvalidRate(rate));
    }

    let n = terms.months;
    let monthly_rate = rate / 100.0 / 12.0;
    let monthly_payment = annuity_payment(terms.principal, monthly_rate, n)
        .ok_or(CalculatorError::InvalidRate(rate))?;
    let first_interest = (terms.principal as f64 * monthly_rate).round() as u64;
    if n > 1 && first_interest > 0 && monthly_payment <= first_interest {
        return Err(CalculatorError::NotAmortizing {
            annual_rate_percent: rate,
            months: n,
        });
    }

    let mut balance = terms.principal;
    let mut periods = Vec::with_capacity(n as usize);
    for index in 1..=n {
        let interest = (balance as f64 * monthly_rate).round() as u64;
        let principal = if index == n {
            balance
        } else {
            monthly_payment.saturating_sub(interest).min(balance)
        };
        balance -= principal;
        periods.push(LoanPeriod {
            index,
            payment: principal + interest,
            principal,
            interest,
            remaining: balance,
        });
    }

    let total_interest = periods.iter().map(|p| p.interest).sum();
    let total_paid = periods.iter().map(|p| p.payment).sum();
    Ok(LoanSchedule {
        terms: terms.clone(),
        monthly_payment,
        periods,
        total_interest,
        total_paid,
    })
}

/// Level payment for `n` periods, or `None` if it cannot be represented.
///
/// `P·r / (1 - (1+r)^-n)` evaluated through `ln_1p`/`exp_m1` so rates close to
/// zero do not cancel to a zero denominator.
fn annuity_payment(principal: u64, monthly_rate: f64, n: u32) -> Option<u64> {
    let even_split = principal / n as u64;
    if monthly_rate == 0.0 {
        return Some(even_split);
    }
    let denominator = -(-(n as f64) * monthly_rate.ln_1p()).exp_m1();
    if !denominator.is_normal() || denominator <= 0.0 {
        return Some(even_split);
    }
    let payment = (principal as f64 * monthly_rate / denominator).round();
    let ceiling = (principal as f64 * (1.0 + monthly_rate)).ceil();
    if !payment.is_finite() || payment < even_split as f64 || payment > ceiling {
        return None;
    }
    Some(payment as u64)
}
