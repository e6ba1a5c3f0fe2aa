use super::*;
use crate::money::{MONEY_TOLERANCE, money_eq};
use rand::Rng;
use shared::models::{CurrencyFormat, Plate, PlateCounts};
use std::collections::BTreeMap;

fn restaurant(id: &str, plates: &[(&str, f64)], vat_included: bool) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        logo: None,
        service_charge_rate: 0.1,
        vat_rate: 0.07,
        vat_included,
        currency: Some("THB".to_string()),
        currency_format: CurrencyFormat::default(),
        plates: plates
            .iter()
            .map(|(key, price)| {
                (
                    key.to_string(),
                    Plate {
                        label_th: None,
                        label_en: Some(key.to_string()),
                        price: *price,
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

fn katsu_midori() -> Restaurant {
    restaurant(
        "katsu_midori",
        &[
            ("red", 40.0),
            ("blue", 50.0),
            ("green", 60.0),
            ("yellow", 70.0),
            ("brown", 80.0),
            ("pink", 90.0),
            ("white", 120.0),
            ("gold", 150.0),
        ],
        true,
    )
}

fn sushiro() -> Restaurant {
    restaurant(
        "sushiro",
        &[
            ("red", 40.0),
            ("silver", 60.0),
            ("gold", 80.0),
            ("black", 120.0),
            ("special70", 70.0),
        ],
        true,
    )
}

fn counts(entries: &[(&str, u32)]) -> PlateCounts {
    entries.iter().map(|(k, c)| (k.to_string(), *c)).collect()
}

fn people(n: u32) -> Vec<Participant> {
    (1..=n).map(Participant::with_default_name).collect()
}

fn dec(value: f64) -> Decimal {
    to_decimal(value)
}

// ========================================================================
// Per-participant totals
// ========================================================================

#[test]
fn test_participant_plates() {
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 2), ("blue", 3)]));
    selections.insert(2, PlateCounts::new());

    assert_eq!(participant_plates(&selections, 1), 5);
    assert_eq!(participant_plates(&selections, 2), 0);
    assert_eq!(participant_plates(&selections, 99), 0);
}

#[test]
fn test_participant_amount() {
    let r = katsu_midori();
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 2), ("blue", 1)]));

    assert_eq!(participant_amount(&selections, 1, Some(&r)), dec(130.0));
    assert_eq!(participant_amount(&selections, 2, Some(&r)), Decimal::ZERO);
}

#[test]
fn test_unknown_plate_key_contributes_zero() {
    let r = katsu_midori();
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 1), ("purple", 4)]));

    assert_eq!(participant_amount(&selections, 1, Some(&r)), dec(40.0));
    // Plate counts still include it
    assert_eq!(participant_plates(&selections, 1), 5);
}

#[test]
fn test_no_restaurant_amount_is_zero() {
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 3)]));
    assert_eq!(participant_amount(&selections, 1, None), Decimal::ZERO);
}

#[test]
fn test_very_large_quantity() {
    let r = katsu_midori();
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 999_999)]));

    assert_eq!(participant_plates(&selections, 1), 999_999);
    assert_eq!(
        participant_amount(&selections, 1, Some(&r)),
        Decimal::from(999_999) * dec(40.0)
    );
}

#[test]
fn test_aggregate_subtotal_is_sum_of_participants() {
    let r = sushiro();
    let participants = people(3);
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 5), ("silver", 3)]));
    selections.insert(2, counts(&[("gold", 11)]));
    selections.insert(3, counts(&[("black", 1), ("special70", 3)]));

    let by_participant: Decimal = participants
        .iter()
        .map(|p| participant_amount(&selections, p.id, Some(&r)))
        .sum();
    assert_eq!(
        aggregate_subtotal(&participants, &selections, Some(&r)),
        by_participant
    );
    assert_eq!(total_plates(&participants, &selections), 23);
}

// ========================================================================
// Worked scenarios
// ========================================================================

#[test]
fn test_scenario_katsu_midori() {
    let r = katsu_midori();
    let participants = people(1);
    let mut selections = PlateSelections::new();
    selections.insert(
        1,
        counts(&[
            ("red", 3),
            ("blue", 5),
            ("green", 11),
            ("yellow", 5),
            ("brown", 6),
            ("pink", 2),
            ("white", 5),
            ("gold", 1),
        ]),
    );

    let bill = Bill::compute(&participants, &selections, Some(&r));
    let tax = bill.tax;

    assert_eq!(bill.total_plates(), 38);
    assert_eq!(tax.subtotal, dec(2790.0));
    assert!(money_eq(tax.service_charge, dec(279.0)));
    assert!(money_eq(tax.total_with_service, dec(3069.0)));
    assert!(money_eq(tax.vat_amount, dec(200.77)));
    assert!(money_eq(tax.net_amount, dec(2868.23)));
    assert_eq!(tax.grand_total, tax.total_with_service);
}

#[test]
fn test_scenario_sushiro() {
    let r = sushiro();
    let participants = people(1);
    let mut selections = PlateSelections::new();
    selections.insert(
        1,
        counts(&[
            ("red", 5),
            ("silver", 3),
            ("gold", 11),
            ("black", 1),
            ("special70", 3),
        ]),
    );

    let bill = Bill::compute(&participants, &selections, Some(&r));
    let tax = bill.tax;

    assert_eq!(bill.total_plates(), 23);
    assert_eq!(tax.subtotal, dec(1590.0));
    assert!(money_eq(tax.service_charge, dec(159.0)));
    assert!(money_eq(tax.total_with_service, dec(1749.0)));
    assert!(money_eq(tax.vat_amount, dec(114.42)));
    assert!(money_eq(tax.net_amount, dec(1634.58)));
}

#[test]
fn test_summary_total_for_single_participant() {
    // 2×red + 1×blue = 130, +10% service, VAT included
    let r = katsu_midori();
    let participants = vec![Participant {
        id: 1,
        name: "Alice".to_string(),
    }];
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 2), ("blue", 1)]));

    let bill = Bill::compute(&participants, &selections, Some(&r));
    assert!(money_eq(bill.tax.grand_total, dec(143.0)));
    assert_eq!(bill.shares[0].name, "Alice");
    assert_eq!(bill.shares[0].total, bill.tax.grand_total);
}

// ========================================================================
// Tax modes
// ========================================================================

#[test]
fn test_vat_included_extracts_vat() {
    let rates = TaxRates::new(dec(0.1), dec(0.07), true);
    let tax = TaxBreakdown::compute(dec(1000.0), &rates);

    assert!(money_eq(tax.service_charge, dec(100.0)));
    assert!(money_eq(tax.grand_total, dec(1100.0)));
    assert!(money_eq(tax.net_amount + tax.vat_amount, tax.total_with_service));
    assert!(money_eq(tax.vat_amount, dec(71.96)));
}

#[test]
fn test_vat_excluded_adds_vat() {
    let rates = TaxRates::new(dec(0.1), dec(0.07), false);
    let tax = TaxBreakdown::compute(dec(1000.0), &rates);

    assert!(money_eq(tax.vat_amount, dec(70.0)));
    assert_eq!(tax.net_amount, tax.subtotal);
    assert_eq!(
        tax.grand_total,
        tax.subtotal + tax.service_charge + tax.vat_amount
    );
    assert!(money_eq(tax.grand_total, dec(1170.0)));
}

#[test]
fn test_zero_subtotal_is_all_zero() {
    for vat_included in [true, false] {
        let rates = TaxRates::new(dec(0.1), dec(0.07), vat_included);
        let tax = TaxBreakdown::compute(Decimal::ZERO, &rates);
        assert_eq!(tax.service_charge, Decimal::ZERO);
        assert_eq!(tax.vat_amount, Decimal::ZERO);
        assert_eq!(tax.net_amount, Decimal::ZERO);
        assert_eq!(tax.grand_total, Decimal::ZERO);
        assert_eq!(tax.vat_included, vat_included);
    }
}

#[test]
fn test_zero_rates() {
    let rates = TaxRates::new(Decimal::ZERO, Decimal::ZERO, true);
    let tax = TaxBreakdown::compute(dec(250.0), &rates);
    assert_eq!(tax.service_charge, Decimal::ZERO);
    assert_eq!(tax.vat_amount, Decimal::ZERO);
    assert_eq!(tax.grand_total, dec(250.0));
}

#[test]
fn test_no_restaurant_has_no_charges() {
    let rates = TaxRates::for_restaurant(None);
    assert_eq!(rates, TaxRates::default());

    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 3)]));
    let bill = Bill::compute(&people(1), &selections, None);
    assert_eq!(bill.tax.grand_total, Decimal::ZERO);
    assert_eq!(bill.shares[0].total, Decimal::ZERO);
    assert_eq!(bill.shares[0].plates, 3);
}

// ========================================================================
// Proportional split
// ========================================================================

#[test]
fn test_split_is_proportional() {
    let r = restaurant("plain", &[("a", 100.0), ("b", 300.0)], false);
    let participants = people(2);
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("a", 1)]));
    selections.insert(2, counts(&[("b", 1)]));

    let bill = Bill::compute(&participants, &selections, Some(&r));
    let first = bill.share_for(1).unwrap();
    let second = bill.share_for(2).unwrap();

    // 100 / 400 of the service charge (40) and VAT (28)
    assert!(money_eq(first.service_charge, dec(10.0)));
    assert!(money_eq(first.vat, dec(7.0)));
    assert!(money_eq(first.total, dec(117.0)));
    assert!(money_eq(second.service_charge, dec(30.0)));
    assert!(money_eq(second.total, dec(351.0)));
    assert!(money_eq(bill.shares_total(), bill.tax.grand_total));
}

#[test]
fn test_vat_included_share_not_added_to_total() {
    let r = katsu_midori();
    let participants = people(2);
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("gold", 2)]));
    selections.insert(2, counts(&[("red", 1)]));

    let bill = Bill::compute(&participants, &selections, Some(&r));
    for share in &bill.shares {
        assert!(share.vat > Decimal::ZERO);
        assert_eq!(share.total, share.subtotal + share.service_charge);
    }
}

#[test]
fn test_participant_without_plates_pays_nothing() {
    let r = sushiro();
    let participants = people(3);
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("gold", 4)]));
    selections.insert(3, counts(&[("red", 2)]));

    let bill = Bill::compute(&participants, &selections, Some(&r));
    let idle = bill.share_for(2).unwrap();
    assert_eq!(idle.plates, 0);
    assert_eq!(idle.total, Decimal::ZERO);
    assert!(bill.share_for(42).is_none());
}

#[test]
fn test_empty_table_split_is_zero() {
    let r = sushiro();
    let bill = Bill::compute(&people(2), &PlateSelections::new(), Some(&r));
    assert_eq!(bill.tax.grand_total, Decimal::ZERO);
    assert!(bill.shares.iter().all(|s| s.total == Decimal::ZERO));
}

#[test]
fn test_single_participant_total_equals_grand_total() {
    for vat_included in [true, false] {
        let r = restaurant("one", &[("a", 33.33), ("b", 12.5)], vat_included);
        let mut selections = PlateSelections::new();
        selections.insert(7, counts(&[("a", 3), ("b", 1)]));
        let participants = vec![Participant::with_default_name(7)];

        let bill = Bill::compute(&participants, &selections, Some(&r));
        assert_eq!(bill.shares[0].total, bill.tax.grand_total);
    }
}

#[test]
fn test_random_tables_split_sums_to_grand_total() {
    let mut rng = rand::thread_rng();
    let keys = ["red", "silver", "gold", "black", "special70"];

    for round in 0..200 {
        let mut r = sushiro();
        r.vat_included = round % 2 == 0;
        r.service_charge_rate = rng.gen_range(0..=20) as f64 / 100.0;
        r.vat_rate = rng.gen_range(0..=25) as f64 / 100.0;

        let participants = people(rng.gen_range(1..=8));
        let mut selections = PlateSelections::new();
        for p in &participants {
            let mut c = PlateCounts::new();
            for key in keys {
                let n = rng.gen_range(0..6);
                if n > 0 {
                    c.insert(key.to_string(), n);
                }
            }
            selections.insert(p.id, c);
        }

        let bill = Bill::compute(&participants, &selections, Some(&r));
        let tax = bill.tax;

        assert_eq!(
            aggregate_subtotal(&participants, &selections, Some(&r)),
            tax.subtotal
        );
        assert!(
            (bill.shares_total() - tax.grand_total).abs() < MONEY_TOLERANCE,
            "round {}: shares {} != grand total {}",
            round,
            bill.shares_total(),
            tax.grand_total
        );
        if tax.vat_included {
            assert!(money_eq(tax.net_amount + tax.vat_amount, tax.total_with_service));
            assert_eq!(tax.grand_total, tax.total_with_service);
        } else {
            assert_eq!(
                tax.grand_total,
                tax.subtotal + tax.service_charge + tax.vat_amount
            );
        }
    }
}

#[test]
fn test_bill_serializes_camel_case() {
    let r = katsu_midori();
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 1)]));
    let bill = Bill::compute(&people(1), &selections, Some(&r));

    let value = serde_json::to_value(&bill).unwrap();
    assert!(value["tax"]["grandTotal"].is_number());
    assert_eq!(value["shares"][0]["participantId"], 1);
}

// ========================================================================
// Large amounts
// ========================================================================

#[test]
fn test_large_table_splits_without_overflow() {
    let r = restaurant("buffet", &[("platinum", 1_000_000.0)], false);
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("platinum", 1_000_000_000)]));
    selections.insert(2, counts(&[("platinum", 2_000_000_000)]));

    let bill = Bill::compute(&people(2), &selections, Some(&r));
    let tax = bill.tax;
    assert_eq!(tax.subtotal, Decimal::from(3_000_000_000_000_000u64));
    assert!(tax.grand_total > tax.subtotal);

    let first = bill.share_for(1).unwrap();
    let third = Decimal::from(3);
    assert!(money_eq(first.service_charge, tax.service_charge / third));
    assert!(money_eq(first.vat, tax.vat_amount / third));
    assert!(money_eq(bill.shares_total(), tax.grand_total));
}

#[test]
fn test_participant_amount_overflow_is_zero() {
    // Unvalidated price
    let r = restaurant("huge", &[("red", 1e28)], true);
    let mut selections = PlateSelections::new();
    selections.insert(1, counts(&[("red", 100)]));

    assert_eq!(participant_amount(&selections, 1, Some(&r)), Decimal::ZERO);
}

#[test]
fn test_tax_breakdown_overflow_is_zero() {
    let rates = TaxRates::new(Decimal::new(5, 1), Decimal::ZERO, false);
    let tax = TaxBreakdown::compute(Decimal::MAX, &rates);
    assert_eq!(tax.grand_total, Decimal::ZERO);
    assert_eq!(tax.service_charge, Decimal::ZERO);
    assert!(!tax.vat_included);
}
