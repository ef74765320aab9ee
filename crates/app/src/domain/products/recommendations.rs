//! Cross-sell recommendations.

use rust_decimal::Decimal;

use crate::domain::products::{
    catalog::Catalog,
    models::{Category, Product},
};

/// Maximum number of products returned by [`Catalog::recommend`].
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Categories that sell well alongside each catalog category.
static COMPLEMENTARY_CATEGORIES: [(&str, [&str; 2]); 4] = [
    ("Fruits", ["Beverages", "Bakery"]),
    ("Bakery", ["Beverages", "Pantry"]),
    ("Beverages", ["Fruits", "Pantry"]),
    ("Pantry", ["Bakery", "Beverages"]),
];

/// Spending cap applied to recommendation candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Budget {
    /// No cap.
    #[default]
    Unbounded,

    /// Candidates must cost at most this much.
    AtMost(Decimal),
}

impl Budget {
    /// Whether a product at `price` fits the budget.
    #[must_use]
    pub fn allows(self, price: Decimal) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(limit) => price <= limit,
        }
    }
}

impl From<Option<Decimal>> for Budget {
    fn from(limit: Option<Decimal>) -> Self {
        limit.map_or(Self::Unbounded, Self::AtMost)
    }
}

/// Categories considered complementary to `category`.
pub fn complementary_categories(category: &Category) -> &'static [&'static str] {
    COMPLEMENTARY_CATEGORIES
        .iter()
        .find(|(name, _)| *name == category.as_str())
        .map(|(_, related)| related.as_slice())
        .unwrap_or_default()
}

impl Catalog {
    /// Recommend up to [`MAX_RECOMMENDATIONS`] products to go with `barcode`.
    ///
    /// Candidates share the source category or one of its complementary
    /// categories and fit the budget. Eco-friendly products rank first, then
    /// cheaper ones; equal keys keep catalog order. An unknown barcode yields
    /// no recommendations.
    #[must_use]
    pub fn recommend(&self, barcode: &str, budget: Budget) -> Vec<Product> {
        let Some(source) = self.find_by_barcode(barcode) else {
            return Vec::new();
        };

        let related = complementary_categories(&source.category);

        let mut candidates: Vec<&Product> = self
            .products()
            .iter()
            .filter(|candidate| candidate.id != source.id)
            .filter(|candidate| {
                candidate.category == source.category
                    || related.contains(&candidate.category.as_str())
            })
            .filter(|candidate| budget.allows(candidate.price))
            .collect();

        candidates.sort_by(|a, b| {
            b.eco_friendly
                .cmp(&a.eco_friendly)
                .then_with(|| a.price.cmp(&b.price))
        });

        candidates
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const APPLES: &str = "6430757015189";
    const BREAD: &str = "8293407795187";
    const SODA: &str = "9055483412902";
    const WATER: &str = "3327150290103";
    const PASTA: &str = "8649531808727";

    fn barcodes(products: &[Product]) -> Vec<&str> {
        products.iter().map(|product| product.barcode.as_str()).collect()
    }

    fn product(id: u64, category: &str, price: i64, eco_friendly: bool) -> Product {
        Product {
            id,
            barcode: format!("{id:013}"),
            name: format!("Product {id}"),
            description: String::new(),
            category: Category::from(category),
            price: Decimal::new(price, 2),
            image_path: String::new(),
            eco_friendly,
        }
    }

    #[test]
    fn unknown_barcode_returns_empty() -> TestResult {
        let catalog = Catalog::builtin()?;

        assert!(catalog.recommend("0000000000000", Budget::Unbounded).is_empty());

        Ok(())
    }

    #[test]
    fn budget_excludes_expensive_candidates() -> TestResult {
        let catalog = Catalog::builtin()?;

        let recommendations = catalog.recommend(APPLES, Budget::AtMost(Decimal::new(300, 2)));

        assert_eq!(barcodes(&recommendations), vec![SODA, WATER]);
        assert!(
            !barcodes(&recommendations).contains(&BREAD),
            "bread costs more than the budget"
        );

        Ok(())
    }

    #[test]
    fn unbounded_budget_ranks_eco_friendly_first() -> TestResult {
        let catalog = Catalog::builtin()?;

        let recommendations = catalog.recommend(APPLES, Budget::Unbounded);

        assert_eq!(barcodes(&recommendations), vec![BREAD, SODA, WATER]);

        Ok(())
    }

    #[test]
    fn source_product_is_never_recommended() -> TestResult {
        let catalog = Catalog::builtin()?;

        for product in catalog.products() {
            let recommendations = catalog.recommend(&product.barcode, Budget::Unbounded);

            assert!(
                recommendations.iter().all(|candidate| candidate.id != product.id),
                "{} recommended itself",
                product.barcode
            );
        }

        Ok(())
    }

    #[test]
    fn beverages_include_same_category_and_complements() -> TestResult {
        let catalog = Catalog::builtin()?;

        let recommendations = catalog.recommend(SODA, Budget::Unbounded);

        assert_eq!(barcodes(&recommendations), vec![PASTA, APPLES, WATER]);

        Ok(())
    }

    #[test]
    fn results_are_capped_sorted_and_within_budget() -> TestResult {
        let catalog = Catalog::new(vec![
            product(1, "Fruits", 100, false),
            product(2, "Fruits", 450, true),
            product(3, "Beverages", 120, false),
            product(4, "Bakery", 90, true),
            product(5, "Bakery", 700, true),
            product(6, "Beverages", 80, false),
            product(7, "Pantry", 10, true),
        ])?;

        let budget = Budget::AtMost(Decimal::new(500, 2));
        let recommendations = catalog.recommend("0000000000001", budget);

        assert_eq!(recommendations.len(), MAX_RECOMMENDATIONS);
        assert!(recommendations.iter().all(|p| budget.allows(p.price)));
        assert!(recommendations.iter().all(|p| p.category.as_str() != "Pantry"));

        let ids: Vec<u64> = recommendations.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![4, 2, 6, 3]);

        for pair in recommendations.windows(2) {
            if let [a, b] = pair {
                assert!(a.eco_friendly >= b.eco_friendly, "eco-friendly first");

                if a.eco_friendly == b.eco_friendly {
                    assert!(a.price <= b.price, "cheaper first within group");
                }
            }
        }

        Ok(())
    }

    #[test]
    fn equal_keys_keep_catalog_order() -> TestResult {
        let catalog = Catalog::new(vec![
            product(1, "Pantry", 100, true),
            product(2, "Pantry", 250, true),
            product(3, "Pantry", 250, true),
        ])?;

        let ids: Vec<u64> = catalog
            .recommend("0000000000001", Budget::Unbounded)
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![2, 3]);

        Ok(())
    }

    #[test]
    fn unknown_category_only_matches_itself() -> TestResult {
        let catalog = Catalog::new(vec![
            product(1, "Household", 100, false),
            product(2, "Household", 200, false),
            product(3, "Fruits", 50, true),
        ])?;

        let ids: Vec<u64> = catalog
            .recommend("0000000000001", Budget::Unbounded)
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![2]);

        Ok(())
    }

    #[test]
    fn budget_from_option() {
        assert_eq!(Budget::from(None), Budget::Unbounded);
        assert_eq!(
            Budget::from(Some(Decimal::ONE)),
            Budget::AtMost(Decimal::ONE)
        );
        assert!(Budget::Unbounded.allows(Decimal::MAX));
        assert!(!Budget::AtMost(Decimal::ZERO).allows(Decimal::ONE));
    }
}
