//! Property-based tests for loan invariants.
//!
//! These tests verify properties that should hold for any valid loan:
//! - Payment and principal formulas invert each other
//! - Each payment splits exactly into principal and interest
//! - The schedule repays the principal to zero
//! - A derived rate reproduces the payment, whichever method converged
//! - Ownership and cumulative interest never decrease

use amortize_core::annuity::{payment_from_principal, principal_from_payment};
use amortize_core::prelude::*;
use approx::assert_relative_eq;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn principal_strategy() -> impl Strategy<Value = f64> {
    1_000.0..1_000_000.0
}

fn rate_strategy() -> impl Strategy<Value = f64> {
    0.01..0.2
}

fn term_strategy() -> impl Strategy<Value = u32> {
    1u32..=480
}

fn resolved(principal: f64, annual_rate: f64, term_months: u32) -> LoanParameters {
    LoanParameters::construct(
        LoanInputs::new()
            .with_principal(principal)
            .with_annual_rate(annual_rate)
            .with_term_months(term_months),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // PROPERTY: CLOSED FORMS ROUND TRIP
    // =========================================================================

    #[test]
    fn property_payment_principal_round_trip(
        principal in principal_strategy(),
        annual_rate in rate_strategy(),
        term_months in term_strategy(),
    ) {
        let payment = payment_from_principal(principal, annual_rate, term_months);
        let recovered = principal_from_payment(payment, annual_rate, term_months);
        assert_relative_eq!(recovered, principal, max_relative = 1e-9);
    }

    #[test]
    fn property_term_round_trip(
        principal in principal_strategy(),
        annual_rate in rate_strategy(),
        term_months in term_strategy(),
    ) {
        let payment = payment_from_principal(principal, annual_rate, term_months);
        let config = ResolverConfig::default().with_term_rounding(TermRounding::Nearest);
        let loan = LoanParameters::construct_with(
            LoanInputs::new()
                .with_principal(principal)
                .with_annual_rate(annual_rate)
                .with_monthly_payment(payment),
            &config,
        )
        .unwrap();
        prop_assert_eq!(loan.term_months(), term_months);
    }

    // =========================================================================
    // PROPERTY: PAYMENT CONSERVATION
    // =========================================================================

    #[test]
    fn property_split_sums_to_payment(
        principal in principal_strategy(),
        annual_rate in rate_strategy(),
        term_months in term_strategy(),
    ) {
        let loan = resolved(principal, annual_rate, term_months);
        for month in [1, term_months.div_ceil(2), term_months] {
            let interest = loan.interest_for_month(month).unwrap();
            let repaid = loan.principal_for_month(month).unwrap();
            assert_relative_eq!(
                interest + repaid,
                loan.monthly_payment(),
                max_relative = 1e-12
            );
        }
    }

    // =========================================================================
    // PROPERTY: BALANCE EXHAUSTION
    // =========================================================================

    #[test]
    fn property_schedule_ends_at_zero(
        principal in principal_strategy(),
        annual_rate in rate_strategy(),
        term_months in term_strategy(),
    ) {
        let loan = resolved(principal, annual_rate, term_months);
        let last = loan.schedule(None, None).unwrap().last().unwrap();

        prop_assert!(
            last.balance.abs() < 1e-8 * principal,
            "final balance {} for {} at {} over {}",
            last.balance, principal, annual_rate, term_months
        );
        assert_relative_eq!(
            last.cumulative_interest,
            loan.total_interest(),
            max_relative = 1e-8
        );
    }

    // =========================================================================
    // PROPERTY: MONOTONE PROGRESS
    // =========================================================================

    #[test]
    fn property_ownership_and_interest_non_decreasing(
        principal in principal_strategy(),
        annual_rate in rate_strategy(),
        term_months in term_strategy(),
    ) {
        let loan = resolved(principal, annual_rate, term_months);
        let rows: Vec<_> = loan.schedule(None, None).unwrap().collect();
        prop_assert_eq!(rows.len(), term_months as usize);

        for pair in rows.windows(2) {
            prop_assert!(pair[1].ownership_pct >= pair[0].ownership_pct);
            prop_assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
            prop_assert!(pair[1].interest <= pair[0].interest);
        }
    }

    // =========================================================================
    // PROPERTY: RATE INVERSION
    // =========================================================================

    #[test]
    fn property_derived_rate_reproduces_payment(
        principal in principal_strategy(),
        annual_rate in rate_strategy(),
        term_months in term_strategy(),
    ) {
        let payment = payment_from_principal(principal, annual_rate, term_months);
        let loan = LoanParameters::construct(
            LoanInputs::new()
                .with_principal(principal)
                .with_monthly_payment(payment)
                .with_term_months(term_months),
        )
        .unwrap();

        assert_relative_eq!(loan.annual_rate(), annual_rate, epsilon = 1e-8);
        assert_relative_eq!(
            payment_from_principal(principal, loan.annual_rate(), term_months),
            payment,
            max_relative = 1e-8
        );
    }
}

#[test]
fn property_rate_inversion_covers_both_methods() {
    let mut methods = Vec::new();
    for (principal, annual_rate, term_months) in [
        (10_000.0, 0.06, 60),
        (200_000.0, 0.045, 360),
        (100_000.0, 0.0999, 480),
    ] {
        let payment = payment_from_principal(principal, annual_rate, term_months);
        let loan = LoanParameters::construct(
            LoanInputs::new()
                .with_principal(principal)
                .with_monthly_payment(payment)
                .with_term_months(term_months),
        )
        .unwrap();

        assert_relative_eq!(loan.annual_rate(), annual_rate, epsilon = 1e-9);
        let solution = loan.resolution().rate_solution.unwrap();
        methods.push(solution.method);
    }

    assert!(methods.contains(&SolverMethod::NewtonRaphson));
    assert!(methods.contains(&SolverMethod::Bisection));
}
