//! Budget query parsing helpers.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::oapi::extract::QueryParam;
use tracing::warn;

use scancart_app::domain::products::Budget;

pub(crate) trait BudgetExt {
    /// Parse the optional `budget` query parameter.
    ///
    /// Missing and unparseable values mean no budget. A negative budget is
    /// kept as an upper bound, so nothing fits it.
    fn into_budget(self) -> Budget;
}

impl BudgetExt for QueryParam<String, false> {
    fn into_budget(self) -> Budget {
        parse_budget(self.into_inner().as_deref())
    }
}

fn parse_budget(raw: Option<&str>) -> Budget {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Budget::Unbounded;
    };

    match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(budget) => Budget::AtMost(budget),
        Err(source) => {
            warn!(budget = raw, "ignoring unparseable budget: {source}");

            Budget::Unbounded
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_budget_is_unbounded() {
        assert_eq!(parse_budget(None), Budget::Unbounded);
        assert_eq!(parse_budget(Some("")), Budget::Unbounded);
        assert_eq!(parse_budget(Some("  ")), Budget::Unbounded);
    }

    #[test]
    fn decimal_budget_is_an_upper_bound() {
        assert_eq!(parse_budget(Some("3.00")), Budget::AtMost(Decimal::new(300, 2)));
        assert_eq!(parse_budget(Some(" 2 ")), Budget::AtMost(Decimal::new(2, 0)));
    }

    #[test]
    fn scientific_budget_is_an_upper_bound() {
        assert_eq!(parse_budget(Some("3e0")), Budget::AtMost(Decimal::new(3, 0)));
        assert_eq!(parse_budget(Some("2.5E0")), Budget::AtMost(Decimal::new(25, 1)));
    }

    #[test]
    fn negative_budget_is_kept() {
        assert_eq!(parse_budget(Some("-1")), Budget::AtMost(Decimal::new(-1, 0)));
    }

    #[test]
    fn garbage_budget_is_unbounded() {
        assert_eq!(parse_budget(Some("cheap")), Budget::Unbounded);
        assert_eq!(parse_budget(Some("3 euros")), Budget::Unbounded);
    }
}
