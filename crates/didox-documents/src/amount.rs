//! Monetary arithmetic for line totals, VAT and delivery allocation.
//!
//! Drafts carry amounts as `f64`; all arithmetic happens in
//! [`rust_decimal::Decimal`] so two-decimal formatting never inherits binary
//! floating-point drift. Every operation is checked: an input or result
//! outside the `Decimal` range fails the build with
//! [`BuildError::AmountOutOfRange`] instead of panicking or degrading.

use didox_core::DocumentType;
use rust_decimal::prelude::{FromPrimitive, RoundingStrategy};
use rust_decimal::Decimal;

use crate::error::BuildError;

/// Convert a draft amount through its shortest round-trip decimal form, so
/// `12345.67` stays exactly `12345.67`. `None` for NaN, infinities and
/// magnitudes `Decimal` cannot hold.
pub(crate) fn decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
}

/// [`decimal`] for a named draft field.
pub(crate) fn amount(document: DocumentType, field: &'static str, value: f64) -> Result<Decimal, BuildError> {
    in_range(document, field, decimal(value))
}

/// Lift an unchecked result into the build error for `field`.
pub(crate) fn in_range(
    document: DocumentType,
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, BuildError> {
    value.ok_or(BuildError::AmountOutOfRange { document, field })
}

/// Round to cents, half away from zero.
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fixed two-decimal string, e.g. `"1200.00"`.
pub(crate) fn fixed2(value: Decimal) -> String {
    let mut rounded = round2(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Shortest decimal string, e.g. `"10"` or `"2.5"`.
pub(crate) fn plain(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Round to an integer with ties toward positive infinity, the way
/// JavaScript's `Math.round` does (`2.5 → 3`, `-2.5 → -2`).
pub(crate) fn js_round(value: Decimal) -> Option<Decimal> {
    value.checked_add(Decimal::new(5, 1)).map(|v| v.floor())
}

/// Derived sums for one priced line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineTotals {
    pub count: Decimal,
    /// Unit price.
    pub price: Decimal,
    /// Quantity × unit price.
    pub without_vat: Decimal,
    /// VAT rate actually applied (zero when VAT is off).
    pub vat_rate: Decimal,
    /// VAT amount, rounded to cents.
    pub vat: Decimal,
    /// `without_vat + vat`.
    pub with_vat: Decimal,
}

impl LineTotals {
    /// VAT applies only when the document charges VAT and the line's rate
    /// is positive.
    pub(crate) fn compute(
        document: DocumentType,
        count: f64,
        price: f64,
        vat_rate: Option<f64>,
        has_vat: bool,
    ) -> Result<Self, BuildError> {
        let count = amount(document, "products.count", count)?;
        let price = amount(document, "products.price", price)?;
        let rate = match vat_rate {
            Some(rate) => amount(document, "products.vat_rate", rate)?,
            None => Decimal::ZERO,
        };
        let without_vat = in_range(document, "products.total", count.checked_mul(price))?;
        let vat = if has_vat && rate > Decimal::ZERO {
            let raw = without_vat
                .checked_mul(rate)
                .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED));
            round2(in_range(document, "products.vat_sum", raw)?)
        } else {
            Decimal::ZERO
        };
        let with_vat = in_range(document, "products.total_with_vat", without_vat.checked_add(vat))?;
        Ok(Self {
            count,
            price,
            without_vat,
            vat_rate: rate,
            vat,
            with_vat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: DocumentType = DocumentType::Invoice;

    fn d(value: f64) -> Decimal {
        decimal(value).unwrap()
    }

    #[test]
    fn fixed2_pads_and_rounds() {
        assert_eq!(fixed2(d(10000.0)), "10000.00");
        assert_eq!(fixed2(d(0.125)), "0.13");
        assert_eq!(fixed2(d(1.5)), "1.50");
        assert_eq!(fixed2(Decimal::ZERO), "0.00");
    }

    #[test]
    fn plain_strips_trailing_zeros() {
        assert_eq!(plain(d(10.0)), "10");
        assert_eq!(plain(d(2.5)), "2.5");
        assert_eq!(plain(Decimal::ZERO), "0");
    }

    #[test]
    fn js_round_ties_toward_positive_infinity() {
        assert_eq!(js_round(d(2.5)), Some(Decimal::from(3)));
        assert_eq!(js_round(d(2.4)), Some(Decimal::from(2)));
        assert_eq!(js_round(d(-2.5)), Some(Decimal::from(-2)));
        assert_eq!(js_round(d(-2.6)), Some(Decimal::from(-3)));
        assert_eq!(js_round(Decimal::MAX), None);
    }

    #[test]
    fn two_decimal_inputs_convert_exactly() {
        assert_eq!(d(12345.67).to_string(), "12345.67");
        assert_eq!(d(0.1) + d(0.2), d(0.3));
    }

    #[test]
    fn unrepresentable_inputs_are_rejected() {
        assert_eq!(decimal(f64::NAN), None);
        assert_eq!(decimal(f64::INFINITY), None);
        assert_eq!(decimal(1e30), None);
        assert_eq!(decimal(-1e30), None);
        assert_eq!(
            amount(DOC, "products.count", 1e30),
            Err(BuildError::AmountOutOfRange {
                document: DOC,
                field: "products.count"
            })
        );
    }

    #[test]
    fn vat_applied_when_enabled_and_positive() {
        let t = LineTotals::compute(DOC, 10.0, 1000.0, Some(12.0), true).unwrap();
        assert_eq!(t.without_vat, Decimal::from(10000));
        assert_eq!(t.vat, Decimal::from(1200));
        assert_eq!(t.with_vat, Decimal::from(11200));
    }

    #[test]
    fn vat_zero_when_disabled_or_rate_missing() {
        let vat = |rate, has_vat| LineTotals::compute(DOC, 10.0, 1000.0, rate, has_vat).unwrap().vat;
        assert_eq!(vat(Some(12.0), false), Decimal::ZERO);
        assert_eq!(vat(None, true), Decimal::ZERO);
        assert_eq!(vat(Some(0.0), true), Decimal::ZERO);
    }

    #[test]
    fn vat_rounds_to_cents() {
        // 3 × 3.33 = 9.99; 15% of that is 1.4985.
        let t = LineTotals::compute(DOC, 3.0, 3.33, Some(15.0), true).unwrap();
        assert_eq!(fixed2(t.vat), "1.50");
        assert_eq!(fixed2(t.with_vat), "11.49");
    }

    #[test]
    fn overflowing_line_total_is_an_error() {
        let err = LineTotals::compute(DOC, 1e15, 1e15, None, false).unwrap_err();
        assert_eq!(
            err,
            BuildError::AmountOutOfRange {
                document: DOC,
                field: "products.total"
            }
        );
    }
}
