//! Three-tier quote calculation.
//!
//! Turns move logistics into the minimal / recommended / win-the-job price
//! ladder, together with the cost breakdown and the surcharge trail behind
//! it. Pure arithmetic: identical inputs always produce identical quotes.

use thiserror::Error;

use super::entities::{
    CompanySettings, CostBreakdown, MoveLogistics, PackingType, PricingTier, PricingTiers,
    SmartPricing, WalkDistance,
};

const TRUCK_FEE: f64 = 100.0;
const MILEAGE_RATE_PER_MILE: f64 = 0.99;

const RECOMMENDED_MARKUP: f64 = 1.12;
const WIN_THE_JOB_DISCOUNT: f64 = 0.95;
const DEPOSIT_SHARE: f64 = 0.25;
const DEPOSIT_FLOOR: f64 = 150.0;
const DEPOSIT_CEILING: f64 = 500.0;

const STAIRS_PER_FLIGHT: f64 = 0.05;
const STAIRS_CAP: f64 = 0.30;
const WALK_MEDIUM: f64 = 0.08;
const WALK_LONG: f64 = 0.15;
const HEAVY_ITEM_EACH: f64 = 0.03;
const HEAVY_ITEMS_CAP: f64 = 0.20;
const PACKING_PARTIAL: f64 = 0.15;
const PACKING_FULL: f64 = 0.30;
const SAME_DAY: f64 = 0.20;
const WEEKEND: f64 = 0.10;
const MONTH_END: f64 = 0.10;
const EXTRA_DAY: f64 = 0.10;

const AGREEMENT_NOTE: &str =
    "A signed Moving Services Agreement is required before the move.";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("crew size {0} is not quotable; crews of 2, 3 or 4 movers are offered")]
    UnsupportedCrewSize(u8),
    #[error("{0} must be a finite, non-negative number")]
    InvalidQuantity(&'static str),
}

/// Price a move as three internally consistent tiers.
///
/// No partial result is produced: bad input fails the whole call.
pub fn price_quote(
    logistics: &MoveLogistics,
    settings: &CompanySettings,
) -> Result<SmartPricing, PricingError> {
    let rate = hourly_rate(logistics.crew_size)?;
    if !logistics.mileage.is_finite() || logistics.mileage < 0.0 {
        return Err(PricingError::InvalidQuantity("mileage"));
    }
    if !logistics.estimated_hours.is_finite() || logistics.estimated_hours < 0.0 {
        return Err(PricingError::InvalidQuantity("estimated hours"));
    }

    let billed_hours = logistics.estimated_hours.max(settings.min_charge_hours);
    let labor_revenue = rate * billed_hours;
    let mileage_charge = logistics.mileage * MILEAGE_RATE_PER_MILE;
    let fuel_fee = fuel_fee(logistics.mileage);
    let base_subtotal = labor_revenue + TRUCK_FEE + mileage_charge + fuel_fee;

    let (complexity_multiplier, surcharge_reasons) = complexity(logistics);

    let minimal_price = (base_subtotal * complexity_multiplier).round();
    let recommended_price = (minimal_price * RECOMMENDED_MARKUP).round();
    // Nominally a discount off recommended, but never below the bare-bones tier.
    let win_price = minimal_price.max((recommended_price * WIN_THE_JOB_DISCOUNT).round());

    // One deposit for all tiers, derived from the minimal price.
    let deposit_due = (minimal_price * DEPOSIT_SHARE)
        .round()
        .clamp(DEPOSIT_FLOOR, DEPOSIT_CEILING);

    let fee_rate = settings.processing_fee_rate;
    let card = logistics.use_credit_card;

    let tiers = PricingTiers {
        minimal: build_tier(
            "Minimal",
            format!("Lean crew and schedule with no buffers. {AGREEMENT_NOTE}"),
            minimal_price,
            base_subtotal,
            deposit_due,
            fee_rate,
            card,
        ),
        recommended: build_tier(
            "Recommended",
            format!("Standard staffing with slack for overruns. {AGREEMENT_NOTE}"),
            recommended_price,
            base_subtotal,
            deposit_due,
            fee_rate,
            card,
        ),
        win_the_job: build_tier(
            "Win the Job",
            format!("Sharpened against competing bids. {AGREEMENT_NOTE}"),
            win_price,
            base_subtotal,
            deposit_due,
            fee_rate,
            card,
        ),
    };

    Ok(SmartPricing {
        tiers,
        breakdown: CostBreakdown {
            labor_revenue,
            truck_fee: TRUCK_FEE,
            mileage_charge,
            fuel_fee,
            complexity_multiplier,
            estimated_hours: billed_hours,
            base_subtotal,
        },
        surcharge_reasons,
        tip: None,
    })
}

/// Hourly labor rate, flat per crew size rather than per mover.
fn hourly_rate(crew_size: u8) -> Result<f64, PricingError> {
    match crew_size {
        2 => Ok(150.0),
        3 => Ok(225.0),
        4 => Ok(300.0),
        other => Err(PricingError::UnsupportedCrewSize(other)),
    }
}

/// Flat fuel fee stepped by mileage band.
fn fuel_fee(mileage: f64) -> f64 {
    if mileage <= 15.0 {
        0.0
    } else if mileage <= 30.0 {
        25.0
    } else if mileage <= 50.0 {
        45.0
    } else if mileage <= 75.0 {
        65.0
    } else if mileage <= 100.0 {
        85.0
    } else {
        150.0
    }
}

/// Additive difficulty/timing adjustment starting at 1.0, with one
/// human-readable reason per component applied.
fn complexity(logistics: &MoveLogistics) -> (f64, Vec<String>) {
    let mut multiplier = 1.0;
    let mut reasons = Vec::new();
    let mut apply = |amount: f64, label: &str| {
        multiplier += amount;
        reasons.push(format!(
            "{label} surcharge applied (+{:.0}%)",
            amount * 100.0
        ));
    };

    let flights = u32::from(logistics.stairs_pickup) + u32::from(logistics.stairs_dropoff);
    if flights > 0 {
        apply(
            (f64::from(flights) * STAIRS_PER_FLIGHT).min(STAIRS_CAP),
            "Stairs",
        );
    }

    match logistics.walk_distance {
        WalkDistance::Short => {}
        WalkDistance::Medium => apply(WALK_MEDIUM, "Medium walk distance"),
        WalkDistance::Long => apply(WALK_LONG, "Long walk distance"),
    }

    if logistics.heavy_items_count > 0 {
        apply(
            (f64::from(logistics.heavy_items_count) * HEAVY_ITEM_EACH).min(HEAVY_ITEMS_CAP),
            "Heavy items",
        );
    }

    match logistics.packing_type {
        PackingType::None => {}
        PackingType::Partial => apply(PACKING_PARTIAL, "Partial packing"),
        PackingType::Full => apply(PACKING_FULL, "Full packing"),
    }

    if logistics.is_same_day {
        apply(SAME_DAY, "Same-day");
    }
    if logistics.is_weekend {
        apply(WEEKEND, "Weekend");
    }
    if logistics.is_month_end {
        apply(MONTH_END, "Month-end");
    }

    // Logistics overhead for every day beyond the first.
    let extra_days = logistics.duration_days.saturating_sub(1);
    if extra_days > 0 {
        apply(f64::from(extra_days) * EXTRA_DAY, "Multi-day schedule");
    }

    (multiplier, reasons)
}

fn build_tier(
    label: &str,
    description: String,
    price: f64,
    base_subtotal: f64,
    deposit_due: f64,
    fee_rate: f64,
    use_credit_card: bool,
) -> PricingTier {
    let processing_fee = if use_credit_card {
        (price * fee_rate).round()
    } else {
        0.0
    };
    let margin = if price > 0.0 {
        (((price - base_subtotal) / price) * 100.0).max(0.0)
    } else {
        0.0
    };

    PricingTier {
        label: label.to_string(),
        price,
        margin,
        description,
        deposit_due,
        processing_fee,
        total_with_fees: price + processing_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn base_logistics() -> MoveLogistics {
        let mut logistics = MoveLogistics::draft(date!(2024 - 06 - 03));
        logistics.crew_size = 3;
        logistics.estimated_hours = 4.0;
        logistics.mileage = 10.0;
        logistics.walk_distance = WalkDistance::Medium;
        logistics
    }

    fn settings() -> CompanySettings {
        CompanySettings::default()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn worked_three_tier_quote() {
        let pricing = price_quote(&base_logistics(), &settings()).unwrap();

        assert_close(pricing.breakdown.labor_revenue, 900.0);
        assert_close(pricing.breakdown.truck_fee, 100.0);
        assert_close(pricing.breakdown.mileage_charge, 9.9);
        assert_close(pricing.breakdown.fuel_fee, 0.0);
        assert_close(pricing.breakdown.base_subtotal, 1009.9);
        assert_close(pricing.breakdown.complexity_multiplier, 1.08);

        assert_eq!(pricing.tiers.minimal.price, 1091.0);
        assert_eq!(pricing.tiers.recommended.price, 1222.0);
        assert_eq!(pricing.tiers.win_the_job.price, 1161.0);

        for tier in [
            &pricing.tiers.minimal,
            &pricing.tiers.recommended,
            &pricing.tiers.win_the_job,
        ] {
            assert_eq!(tier.deposit_due, 273.0);
        }
    }

    #[test]
    fn identical_inputs_produce_identical_quotes() {
        let logistics = base_logistics();
        let first = price_quote(&logistics, &settings()).unwrap();
        let second = price_quote(&logistics, &settings()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn fuel_fee_band_boundaries() {
        for (mileage, expected) in [
            (0.0, 0.0),
            (15.0, 0.0),
            (16.0, 25.0),
            (30.0, 25.0),
            (31.0, 45.0),
            (50.0, 45.0),
            (51.0, 65.0),
            (75.0, 65.0),
            (76.0, 85.0),
            (100.0, 85.0),
            (101.0, 150.0),
        ] {
            assert_eq!(fuel_fee(mileage), expected, "mileage {mileage}");
        }
    }

    #[test]
    fn stairs_and_heavy_item_contributions_are_capped() {
        let mut logistics = base_logistics();
        logistics.walk_distance = WalkDistance::Short;
        logistics.stairs_pickup = 6;
        logistics.stairs_dropoff = 4;
        logistics.heavy_items_count = 10;

        let pricing = price_quote(&logistics, &settings()).unwrap();
        // 10 flights would be +0.50 uncapped, 10 heavy items +0.30 uncapped.
        assert_close(pricing.breakdown.complexity_multiplier, 1.0 + 0.30 + 0.20);
        assert!(pricing
            .surcharge_reasons
            .contains(&"Stairs surcharge applied (+30%)".to_string()));
        assert!(pricing
            .surcharge_reasons
            .contains(&"Heavy items surcharge applied (+20%)".to_string()));
    }

    #[test]
    fn deposit_is_clamped_to_bounds() {
        let mut small = base_logistics();
        small.crew_size = 2;
        small.estimated_hours = 1.0;
        small.mileage = 0.0;
        small.walk_distance = WalkDistance::Short;
        let pricing = price_quote(&small, &settings()).unwrap();
        // round(550 * 0.25) = 138 would undershoot the floor.
        assert_eq!(pricing.tiers.minimal.deposit_due, 150.0);

        let mut large = base_logistics();
        large.crew_size = 4;
        large.estimated_hours = 12.0;
        let pricing = price_quote(&large, &settings()).unwrap();
        assert_eq!(pricing.tiers.minimal.deposit_due, 500.0);

        for logistics in [small, large] {
            let pricing = price_quote(&logistics, &settings()).unwrap();
            for tier in [
                &pricing.tiers.minimal,
                &pricing.tiers.recommended,
                &pricing.tiers.win_the_job,
            ] {
                assert!(tier.deposit_due >= 150.0 && tier.deposit_due <= 500.0);
            }
        }
    }

    #[test]
    fn card_fee_added_per_tier_and_zero_for_cash() {
        let mut logistics = base_logistics();
        logistics.use_credit_card = true;
        let by_card = price_quote(&logistics, &settings()).unwrap();
        for tier in [
            &by_card.tiers.minimal,
            &by_card.tiers.recommended,
            &by_card.tiers.win_the_job,
        ] {
            assert_eq!(tier.processing_fee, (tier.price * 0.029).round());
            assert_close(tier.total_with_fees, tier.price + tier.processing_fee);
        }

        logistics.use_credit_card = false;
        let by_cash = price_quote(&logistics, &settings()).unwrap();
        for tier in [
            &by_cash.tiers.minimal,
            &by_cash.tiers.recommended,
            &by_cash.tiers.win_the_job,
        ] {
            assert_eq!(tier.processing_fee, 0.0);
            assert_close(tier.total_with_fees, tier.price);
        }
    }

    #[test]
    fn win_the_job_never_undercuts_minimal() {
        let mut logistics = base_logistics();
        for (crew, hours, weekend) in [(2, 1.0, false), (3, 4.0, true), (4, 9.5, false)] {
            logistics.crew_size = crew;
            logistics.estimated_hours = hours;
            logistics.is_weekend = weekend;
            let pricing = price_quote(&logistics, &settings()).unwrap();
            assert!(pricing.tiers.win_the_job.price >= pricing.tiers.minimal.price);
        }
    }

    #[test]
    fn minimum_charge_hours_enforced() {
        let mut logistics = base_logistics();
        logistics.crew_size = 2;
        logistics.estimated_hours = 1.0;
        let pricing = price_quote(&logistics, &settings()).unwrap();
        // Billed at the 3-hour minimum, not the single estimated hour.
        assert_close(pricing.breakdown.estimated_hours, 3.0);
        assert_close(pricing.breakdown.labor_revenue, 450.0);
    }

    #[test]
    fn timing_surcharges_stack() {
        let mut logistics = base_logistics();
        logistics.walk_distance = WalkDistance::Short;
        logistics.is_same_day = true;
        logistics.is_weekend = true;
        logistics.is_month_end = true;
        logistics.duration_days = 3;

        let pricing = price_quote(&logistics, &settings()).unwrap();
        assert_close(
            pricing.breakdown.complexity_multiplier,
            1.0 + 0.20 + 0.10 + 0.10 + 0.20,
        );
        assert_eq!(
            pricing.surcharge_reasons,
            vec![
                "Same-day surcharge applied (+20%)".to_string(),
                "Weekend surcharge applied (+10%)".to_string(),
                "Month-end surcharge applied (+10%)".to_string(),
                "Multi-day schedule surcharge applied (+20%)".to_string(),
            ]
        );
    }

    #[test]
    fn clean_job_has_no_surcharge_reasons() {
        let mut logistics = base_logistics();
        logistics.walk_distance = WalkDistance::Short;
        let pricing = price_quote(&logistics, &settings()).unwrap();
        assert!(pricing.surcharge_reasons.is_empty());
        assert_close(pricing.breakdown.complexity_multiplier, 1.0);
    }

    #[test]
    fn every_tier_mentions_the_agreement() {
        let pricing = price_quote(&base_logistics(), &settings()).unwrap();
        for tier in [
            &pricing.tiers.minimal,
            &pricing.tiers.recommended,
            &pricing.tiers.win_the_job,
        ] {
            assert!(tier.description.contains("Moving Services Agreement"));
            assert!(tier.margin >= 0.0);
        }
    }

    #[test]
    fn rejects_invalid_input_without_partial_output() {
        let mut logistics = base_logistics();
        logistics.crew_size = 5;
        assert_eq!(
            price_quote(&logistics, &settings()),
            Err(PricingError::UnsupportedCrewSize(5))
        );

        let mut logistics = base_logistics();
        logistics.mileage = -1.0;
        assert_eq!(
            price_quote(&logistics, &settings()),
            Err(PricingError::InvalidQuantity("mileage"))
        );

        let mut logistics = base_logistics();
        logistics.estimated_hours = f64::NAN;
        assert_eq!(
            price_quote(&logistics, &settings()),
            Err(PricingError::InvalidQuantity("estimated hours"))
        );
    }

    #[test]
    fn tip_is_left_to_the_caller() {
        let pricing = price_quote(&base_logistics(), &settings()).unwrap();
        assert_eq!(pricing.tip, None);
    }
}
