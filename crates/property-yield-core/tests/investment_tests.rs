use pretty_assertions::assert_eq;
use property_yield_core::investment::tax_rates::{TaxRateEntry, TaxRateTable};
use property_yield_core::investment::types::{
    AcquisitionParameters, FinancingParameters, FinancingType, InvestmentInput, ManagementPlan,
    PropertyContext, ScenarioDrivers,
};
use property_yield_core::investment::{analyze_investment, analyze_investment_with_table, evaluate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Expected {expected} (±{tolerance}), got {actual}"
    );
}

/// Reference flat: 100k purchase, 55% LTV at 3.5%, basic management.
fn reference_input() -> InvestmentInput {
    InvestmentInput {
        acquisition: AcquisitionParameters {
            purchase_price: dec!(100000),
            closing_costs: dec!(1500),
            monthly_rent: dec!(500),
            management_plan: ManagementPlan::Basic,
        },
        financing: FinancingParameters {
            financing_type: FinancingType::FixedRate,
            loan_to_value: dec!(55),
            loan_term_years: 30,
            interest_rate: dec!(3.5),
        },
        scenarios: ScenarioDrivers {
            rental_variation_conservative: dec!(0),
            rental_variation_favorable: dec!(5),
            occupancy_rate_conservative: dec!(90),
            occupancy_rate_favorable: dec!(95),
        },
        property: PropertyContext {
            community_fees_monthly: dec!(0),
            annual_property_tax: dec!(0),
            region: Some("Unresolvable Place".into()),
            bedroom_count: None,
            renovation_cost: Some(dec!(0)),
        },
        viability_threshold: Some(dec!(5.50)),
    }
}

// ===========================================================================
// End-to-end reference scenario
// ===========================================================================

#[test]
fn test_reference_acquisition_and_fees() {
    let r = evaluate(&reference_input());

    assert_eq!(r.acquisition_costs.taxes.round_dp(2), dec!(8000.00));
    assert_eq!(r.acquisition_costs.deposit.amount().round_dp(2), dec!(45000.00));
    assert_eq!(r.investment_totals.loan_amount.round_dp(2), dec!(55000.00));
    assert_eq!(r.fees_and_capex.furnishing_cost, dec!(3738.17));
    assert_eq!(r.fees_and_capex.tenant_searching_fee.round_dp(2), dec!(605.00));
    assert_eq!(r.fees_and_capex.real_estate_agent_fee.round_dp(2), dec!(2500.00));
    assert_eq!(r.fees_and_capex.property_management_fee.round_dp(2), dec!(5000.00));
}

#[test]
fn test_reference_totals() {
    let r = evaluate(&reference_input());
    assert_eq!(
        r.investment_totals.total_investment_unlevered.round_dp(2),
        dec!(121343.17)
    );
    assert_eq!(
        r.investment_totals.total_investment_levered.round_dp(2),
        dec!(176343.17)
    );
}

#[test]
fn test_reference_yields() {
    let r = evaluate(&reference_input());

    assert_eq!(r.income.gross_yield.conservative.round_dp(2), dec!(5.40));
    assert_eq!(r.income.gross_yield.favorable.round_dp(2), dec!(5.70));

    let y = &r.returns_and_yields;
    assert_eq!(y.net_yield_unlevered.conservative.round_dp(2), dec!(4.15));
    assert_eq!(y.net_yield_unlevered.favorable.round_dp(2), dec!(4.60));
    assert_close(y.net_yield_levered.conservative, dec!(6.90), dec!(0.000001));
    // 3660.75 / 45000 = 8.135%
    assert_close(y.net_yield_levered.favorable, dec!(8.135), dec!(0.000001));
}

#[test]
fn test_reference_verdict() {
    let r = evaluate(&reference_input());
    // Only the levered yields clear 5.50%
    assert!(r.meets_threshold());
    assert_eq!(r.threshold(), dec!(5.50));
    assert_eq!(r.viability.qualifying_measures.len(), 2);
}

#[test]
fn test_reference_intermediate_rents() {
    let r = evaluate(&reference_input());
    assert_eq!(r.income.gross_monthly_rent.conservative, dec!(450));
    assert_eq!(r.income.gross_monthly_rent.favorable, dec!(498.75));
    assert_eq!(r.operating_expenses.management_monthly.conservative, dec!(22.5));
    assert_eq!(r.operating_expenses.loan_interest_annual, dec!(1925));
    assert_close(
        r.returns_and_yields.net_monthly_rent_levered.conservative,
        dec!(258.75),
        dec!(0.0000001),
    );
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_evaluate_is_idempotent() {
    let input = reference_input();
    let first = evaluate(&input);
    let second = evaluate(&input);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_full_ltv_zeroes_levered_yields() {
    let mut input = reference_input();
    input.financing.loan_to_value = dec!(100);
    let r = evaluate(&input);

    assert_eq!(r.acquisition_costs.deposit.amount(), Decimal::ZERO);
    assert_eq!(r.returns_and_yields.net_yield_levered.conservative, Decimal::ZERO);
    assert_eq!(r.returns_and_yields.net_yield_levered.favorable, Decimal::ZERO);
    // Unlevered figures are still computed
    assert!(r.returns_and_yields.net_yield_unlevered.favorable > Decimal::ZERO);
}

#[test]
fn test_missing_bedrooms_uses_single_bedroom_furnishing() {
    let mut input = reference_input();
    input.property.bedroom_count = None;
    assert_eq!(evaluate(&input).fees_and_capex.furnishing_cost, dec!(3738.17));

    input.property.bedroom_count = Some(1);
    assert_eq!(evaluate(&input).fees_and_capex.furnishing_cost, dec!(3738.17));
}

#[test]
fn test_occupancy_monotonicity() {
    let mut input = reference_input();
    let mut previous = evaluate(&input);
    for occupancy in [dec!(96), dec!(97.5), dec!(99), dec!(100)] {
        input.scenarios.occupancy_rate_favorable = occupancy;
        let current = evaluate(&input);
        assert!(current.income.gross_yield.favorable > previous.income.gross_yield.favorable);
        assert!(
            current.returns_and_yields.net_yield_unlevered.favorable
                > previous.returns_and_yields.net_yield_unlevered.favorable
        );
        // Conservative side is untouched
        assert_eq!(
            current.income.gross_yield.conservative,
            previous.income.gross_yield.conservative
        );
        previous = current;
    }
}

#[test]
fn test_verdict_matches_max_yield() {
    let base = reference_input();
    let cases = [
        (dec!(0), dec!(300), dec!(5.5)),
        (dec!(55), dec!(500), dec!(5.5)),
        (dec!(55), dec!(500), dec!(9)),
        (dec!(80), dec!(650), dec!(12)),
        (dec!(100), dec!(500), dec!(4.6)),
        (dec!(30), dec!(200), dec!(0)),
    ];

    for (ltv, rent, threshold) in cases {
        let mut input = base.clone();
        input.financing.loan_to_value = ltv;
        input.acquisition.monthly_rent = rent;
        input.viability_threshold = Some(threshold);

        let r = evaluate(&input);
        let y = &r.returns_and_yields;
        let max = [
            y.net_yield_unlevered.conservative,
            y.net_yield_unlevered.favorable,
            y.net_yield_levered.conservative,
            y.net_yield_levered.favorable,
        ]
        .into_iter()
        .max()
        .unwrap();

        assert_eq!(
            r.meets_threshold(),
            max >= threshold,
            "ltv={ltv} rent={rent} threshold={threshold} max={max}"
        );
        assert_eq!(r.viability.best_yield, max);
    }
}

#[test]
fn test_default_threshold_applied() {
    let mut input = reference_input();
    input.viability_threshold = None;
    assert_eq!(evaluate(&input).threshold(), dec!(5.50));
}

#[test]
fn test_loan_interest_shared_by_scenarios() {
    let r = evaluate(&reference_input());
    let y = &r.returns_and_yields;
    let cons_gap = y.net_monthly_rent_unlevered.conservative - y.net_monthly_rent_levered.conservative;
    let fav_gap = y.net_monthly_rent_unlevered.favorable - y.net_monthly_rent_levered.favorable;
    assert_eq!(cons_gap, fav_gap);
}

#[test]
fn test_levered_total_adds_loan() {
    let r = evaluate(&reference_input());
    let t = &r.investment_totals;
    assert_eq!(t.total_investment_levered - t.total_investment_unlevered, t.loan_amount);
}

#[test]
fn test_premium_plan_lowers_net_yield() {
    let basic = evaluate(&reference_input());
    let mut input = reference_input();
    input.acquisition.management_plan = ManagementPlan::Premium;
    let premium = evaluate(&input);

    assert_eq!(premium.fees_and_capex.property_management_fee, dec!(7000));
    assert!(
        premium.returns_and_yields.net_yield_unlevered.conservative
            < basic.returns_and_yields.net_yield_unlevered.conservative
    );
    // Gross figures do not depend on the plan
    assert_eq!(premium.income, basic.income);
}

#[test]
fn test_recurring_costs_reduce_net_rent() {
    let mut input = reference_input();
    input.property.community_fees_monthly = dec!(50);
    input.property.annual_property_tax = dec!(360);
    let r = evaluate(&input);

    assert_eq!(r.operating_expenses.ibi_monthly, dec!(30));
    // 450 - 50 - 8.33 - 30 - 22.5
    assert_close(
        r.returns_and_yields.net_monthly_rent_unlevered.conservative,
        dec!(339.1666667),
        dec!(0.0000001),
    );
}

#[test]
fn test_sale_price_collapse_is_guarded() {
    // -100% variation drives the sale price to zero; the gross yield must
    // not divide by it.
    let mut input = reference_input();
    input.scenarios.rental_variation_conservative = dec!(-100);
    let r = evaluate(&input);
    assert_eq!(r.acquisition_costs.sale_price.conservative, Decimal::ZERO);
    assert_eq!(r.income.gross_yield.conservative, Decimal::ZERO);
}

// ===========================================================================
// Tax resolution through the engine
// ===========================================================================

#[test]
fn test_region_drives_transfer_tax() {
    let mut input = reference_input();
    input.property.region = Some("Barcelona".into());
    let r = evaluate(&input);
    assert_eq!(r.acquisition_costs.taxes, dec!(10000));

    input.property.region = Some("Bilbao, Bizkaia".into());
    let r = evaluate(&input);
    assert_eq!(r.acquisition_costs.taxes, dec!(4000));
}

#[test]
fn test_custom_table_replaces_builtin() {
    let table = TaxRateTable::from_entries(vec![TaxRateEntry {
        key: "unresolvable place".into(),
        full_name: "Unresolvable Place".into(),
        rate: dec!(0.02),
        region_group: "Test".into(),
    }]);
    let out = analyze_investment_with_table(&reference_input(), &table).unwrap();
    assert_eq!(out.result.acquisition_costs.taxes, dec!(2000));
    assert!(out.warnings.iter().all(|w| !w.contains("transfer tax")));
}

// ===========================================================================
// Validated entry point
// ===========================================================================

#[test]
fn test_analyze_wraps_result() {
    let out = analyze_investment(&reference_input()).unwrap();
    assert_eq!(out.result, evaluate(&reference_input()));
    assert!(out.methodology.contains("Property Investment"));
    assert_eq!(out.assumptions["acquisition"]["purchase_price"], "100000");
}

#[test]
fn test_analyze_from_json() {
    let json = r#"{
        "acquisition": {
            "purchase_price": "100000",
            "closing_costs": "1500",
            "monthly_rent": "500",
            "management_plan": "basic"
        },
        "financing": {
            "financing_type": "fixed_rate",
            "loan_to_value": "55",
            "loan_term_years": 30,
            "interest_rate": "3.5"
        },
        "scenarios": {
            "rental_variation_conservative": "0",
            "rental_variation_favorable": "5",
            "occupancy_rate_conservative": "90",
            "occupancy_rate_favorable": "95"
        },
        "property": { "region": "Unresolvable Place" },
        "viability_threshold": "5.50"
    }"#;
    let input: InvestmentInput = serde_json::from_str(json).unwrap();
    let out = analyze_investment(&input).unwrap();
    assert_eq!(out.result, evaluate(&reference_input()));
}

#[test]
fn test_analyze_rejects_zero_price() {
    let mut input = reference_input();
    input.acquisition.purchase_price = Decimal::ZERO;
    let err = analyze_investment(&input).unwrap_err();
    assert!(err.to_string().contains("purchase_price"));
}
