//! Deterministic bank offer comparison.
//!
//! A fixed catalogue of competitor profiles is priced against the same
//! loan amount and term through the shared annuity formula. No network,
//! no randomness: identical inputs always produce identical offers, so
//! the comparison is testable without a backend.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity::{annuity_payment, monthly_rate};
use crate::types::{Money, Rate};

/// Market base rate the catalogue offsets are applied to, percent.
const BASE_RATE: Decimal = dec!(3.50);

/// A competitor bank's pricing profile.
struct BankProfile {
    name: &'static str,
    /// Offset from [`BASE_RATE`] in percentage points.
    rate_offset: Decimal,
    /// One-off processing fee, percent of the loan amount.
    fee_percent: Decimal,
    fixed_rate_period_years: u32,
    /// Free yearly special repayment, percent of the loan amount.
    special_repayment_limit: Decimal,
    /// Customer rating, 0–5.
    rating: Decimal,
    features: &'static [&'static str],
    pros: &'static [&'static str],
    cons: &'static [&'static str],
}

const BANK_PROFILES: [BankProfile; 6] = [
    BankProfile {
        name: "DirektBaufi24",
        rate_offset: dec!(-0.25),
        fee_percent: dec!(0.50),
        fixed_rate_period_years: 10,
        special_repayment_limit: dec!(5),
        rating: dec!(4.2),
        features: &["Online-only origination", "Digital document upload"],
        pros: &["Lowest nominal rate", "Fast approval"],
        cons: &["No branch support", "Short fixed-rate period"],
    },
    BankProfile {
        name: "Rheinische Volksbank",
        rate_offset: dec!(-0.10),
        fee_percent: dec!(0.90),
        fixed_rate_period_years: 15,
        special_repayment_limit: dec!(5),
        rating: dec!(4.6),
        features: &["Personal advisor", "Regional branch network"],
        pros: &["Long fixed-rate period", "High service rating"],
        cons: &["Higher processing fee"],
    },
    BankProfile {
        name: "Hansa Hypotheken",
        rate_offset: dec!(0.00),
        fee_percent: dec!(0.75),
        fixed_rate_period_years: 15,
        special_repayment_limit: dec!(10),
        rating: dec!(4.0),
        features: &["Generous special repayments", "Rate-lock option"],
        pros: &["10% yearly special repayment free of charge"],
        cons: &["Average pricing"],
    },
    BankProfile {
        name: "Süddeutsche Immobilienbank",
        rate_offset: dec!(0.15),
        fee_percent: dec!(0.60),
        fixed_rate_period_years: 20,
        special_repayment_limit: dec!(5),
        rating: dec!(4.4),
        features: &["20-year rate lock", "Construction phase financing"],
        pros: &["Longest fixed-rate period"],
        cons: &["Rate premium for the long lock"],
    },
    BankProfile {
        name: "KreditWerk",
        rate_offset: dec!(0.30),
        fee_percent: dec!(0.40),
        fixed_rate_period_years: 10,
        special_repayment_limit: dec!(3),
        rating: dec!(3.7),
        features: &["Low fees", "Flexible repayment changes"],
        pros: &["Lowest processing fee"],
        cons: &["Above-market rate", "Low special repayment allowance"],
    },
    BankProfile {
        name: "Metropol Bausparkasse",
        rate_offset: dec!(0.45),
        fee_percent: dec!(1.20),
        fixed_rate_period_years: 25,
        special_repayment_limit: dec!(5),
        rating: dec!(3.9),
        features: &["Full-term rate lock", "Bauspar combination products"],
        pros: &["Rate fixed for the entire term"],
        cons: &["Most expensive offer", "High fees"],
    },
];

/// One priced competitor offer. Produced fresh on every simulation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankOffer {
    pub bank_name: String,
    /// Nominal rate in percent.
    pub interest_rate: Rate,
    /// Nominal rate plus the fee amortized over the term.
    pub effective_rate: Rate,
    pub monthly_payment: Money,
    /// Annuity-derived repayment total plus the processing fee.
    pub total_cost: Money,
    pub fixed_rate_period_years: u32,
    pub processing_fee: Money,
    /// Free yearly special repayment, percent of the loan amount.
    pub special_repayment_limit: Rate,
    /// Customer rating, 0–5.
    pub rating: Decimal,
    pub features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub recommended: bool,
}

/// Key the offer ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferSortKey {
    TotalCost,
    EffectiveRate,
    MonthlyPayment,
}

impl OfferSortKey {
    fn value(&self, offer: &BankOffer) -> Decimal {
        match self {
            OfferSortKey::TotalCost => offer.total_cost,
            OfferSortKey::EffectiveRate => offer.effective_rate,
            OfferSortKey::MonthlyPayment => offer.monthly_payment,
        }
    }
}

/// Ranked offers with the comparison summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferComparison {
    pub sort_key: OfferSortKey,
    /// Offers in ascending order of the sort key; index 0 is the best.
    pub offers: Vec<BankOffer>,
    /// Cost gap between the most expensive offer and the best one,
    /// fixed once per comparison.
    pub potential_savings: Money,
}

impl OfferComparison {
    pub fn best_offer(&self) -> Option<&BankOffer> {
        self.offers.first()
    }
}

/// Price every catalogue profile against the given loan.
pub fn simulate_offers(loan_amount: Money, loan_term_years: u32) -> Vec<BankOffer> {
    let months = loan_term_years * 12;
    let term = Decimal::from(loan_term_years.max(1));

    BANK_PROFILES
        .iter()
        .map(|profile| {
            let interest_rate = BASE_RATE + profile.rate_offset;
            let monthly_payment =
                annuity_payment(loan_amount, monthly_rate(interest_rate), months);
            let processing_fee =
                loan_amount.max(Decimal::ZERO) * profile.fee_percent / dec!(100);
            BankOffer {
                bank_name: profile.name.to_string(),
                interest_rate,
                effective_rate: interest_rate + profile.fee_percent / term,
                monthly_payment,
                total_cost: monthly_payment * Decimal::from(months) + processing_fee,
                fixed_rate_period_years: profile.fixed_rate_period_years,
                processing_fee,
                special_repayment_limit: profile.special_repayment_limit,
                rating: profile.rating,
                features: profile.features.iter().map(|s| s.to_string()).collect(),
                pros: profile.pros.iter().map(|s| s.to_string()).collect(),
                cons: profile.cons.iter().map(|s| s.to_string()).collect(),
                recommended: false,
            }
        })
        .collect()
}

/// Simulate and rank offers by the given key.
///
/// The ordering is total: ties on the key fall back to the bank name, so
/// no offer is ever silently dropped or ambiguous. The best offer is
/// marked recommended.
pub fn compare_offers(
    loan_amount: Money,
    loan_term_years: u32,
    sort_key: OfferSortKey,
) -> OfferComparison {
    let mut offers = simulate_offers(loan_amount, loan_term_years);
    offers.sort_by(|a, b| {
        sort_key
            .value(a)
            .cmp(&sort_key.value(b))
            .then_with(|| a.bank_name.cmp(&b.bank_name))
    });

    if let Some(best) = offers.first_mut() {
        best.recommended = true;
    }

    let best_cost = offers
        .first()
        .map(|o| o.total_cost)
        .unwrap_or(Decimal::ZERO);
    let worst_cost = offers
        .iter()
        .map(|o| o.total_cost)
        .max()
        .unwrap_or(Decimal::ZERO);

    OfferComparison {
        sort_key,
        offers,
        potential_savings: worst_cost - best_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_catalogue_size() {
        let offers = simulate_offers(dec!(435_000), 25);
        assert_eq!(offers.len(), 6);
    }

    #[test]
    fn test_offers_use_shared_annuity() {
        let offers = simulate_offers(dec!(435_000), 25);
        for offer in &offers {
            let expected =
                annuity_payment(dec!(435_000), monthly_rate(offer.interest_rate), 300);
            assert_eq!(offer.monthly_payment, expected, "{}", offer.bank_name);
        }
    }

    #[test]
    fn test_rate_ordering_implies_payment_ordering() {
        let mut offers = simulate_offers(dec!(435_000), 25);
        offers.sort_by(|a, b| a.interest_rate.cmp(&b.interest_rate));
        for pair in offers.windows(2) {
            assert!(pair[0].monthly_payment <= pair[1].monthly_payment);
        }
    }

    #[test]
    fn test_best_offer_is_minimum_by_key() {
        for key in [
            OfferSortKey::TotalCost,
            OfferSortKey::EffectiveRate,
            OfferSortKey::MonthlyPayment,
        ] {
            let comparison = compare_offers(dec!(435_000), 25, key);
            let best = comparison.best_offer().unwrap();
            let min = comparison
                .offers
                .iter()
                .map(|o| key.value(o))
                .min()
                .unwrap();
            assert_eq!(key.value(best), min);
            assert!(best.recommended);
            assert_eq!(
                comparison.offers.iter().filter(|o| o.recommended).count(),
                1
            );
        }
    }

    #[test]
    fn test_savings_is_worst_cost_minus_best_cost() {
        let comparison = compare_offers(dec!(435_000), 25, OfferSortKey::TotalCost);
        let worst = comparison
            .offers
            .iter()
            .map(|o| o.total_cost)
            .max()
            .unwrap();
        let best = comparison.best_offer().unwrap().total_cost;
        assert_eq!(comparison.potential_savings, worst - best);
        assert!(comparison.potential_savings > Decimal::ZERO);
    }

    #[test]
    fn test_effective_rate_includes_amortized_fee() {
        let offers = simulate_offers(dec!(200_000), 20);
        for offer in &offers {
            assert!(offer.effective_rate > offer.interest_rate);
        }
    }

    #[test]
    fn test_determinism() {
        let a = compare_offers(dec!(435_000), 25, OfferSortKey::TotalCost);
        let b = compare_offers(dec!(435_000), 25, OfferSortKey::TotalCost);
        assert_eq!(a, b);
    }
}
