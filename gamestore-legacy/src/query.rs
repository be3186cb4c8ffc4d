//! Document-store query over products.
//!
//! The legacy analogue of the relational `GameQuery`: a conjunction of
//! predicates on document fields, an optional sort, and a skip/take window.

use crate::documents::LegacyProduct;

#[derive(Debug, Clone, PartialEq)]
pub enum ProductPredicate {
    /// Case-sensitive substring of `product_name`.
    NameContains(String),
    /// `category_id` is one of the listed ids. An empty list matches nothing.
    CategoryIn(Vec<i32>),
    SupplierIs(i32),
    PriceAtLeast(f64),
    PriceAtMost(f64),
    /// Matches no document. Used where the store lacks a field a filter needs.
    MatchNone,
}

impl ProductPredicate {
    pub fn matches(&self, product: &LegacyProduct) -> bool {
        match self {
            Self::NameContains(fragment) => product.product_name.contains(fragment.as_str()),
            Self::CategoryIn(ids) => product
                .category_id
                .is_some_and(|id| ids.contains(&id)),
            Self::SupplierIs(id) => product.supplier_id == Some(*id),
            Self::PriceAtLeast(min) => product.unit_price >= *min,
            Self::PriceAtMost(max) => product.unit_price <= *max,
            Self::MatchNone => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    ViewCount,
    UnitPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: ProductSortField,
    pub descending: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    predicates: Vec<ProductPredicate>,
    sort: Option<ProductSort>,
    skip: usize,
    take: Option<usize>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: ProductPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn sort_by(mut self, field: ProductSortField, descending: bool) -> Self {
        self.sort = Some(ProductSort { field, descending });
        self
    }

    pub fn paginate(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = Some(take);
        self
    }

    /// The same filter and sort without the window, for counting.
    pub fn without_page(&self) -> Self {
        Self {
            skip: 0,
            take: None,
            ..self.clone()
        }
    }

    pub fn predicates(&self) -> &[ProductPredicate] {
        &self.predicates
    }

    pub fn sort(&self) -> Option<ProductSort> {
        self.sort
    }

    pub fn matches(&self, product: &LegacyProduct) -> bool {
        self.predicates.iter().all(|p| p.matches(product))
    }

    /// Evaluate against documents in natural order.
    ///
    /// The sort is stable, so ties keep natural order.
    pub fn run<'a>(
        &self,
        documents: impl IntoIterator<Item = &'a LegacyProduct>,
    ) -> Vec<LegacyProduct> {
        let mut hits: Vec<LegacyProduct> = documents
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            hits.sort_by(|a, b| {
                let ordering = match sort.field {
                    ProductSortField::ViewCount => a.view_count.cmp(&b.view_count),
                    ProductSortField::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
                };
                if sort.descending { ordering.reverse() } else { ordering }
            });
        }

        let window = hits.into_iter().skip(self.skip);
        match self.take {
            Some(take) => window.take(take).collect(),
            None => window.collect(),
        }
    }

    /// Count matching documents, ignoring any window.
    pub fn count<'a>(&self, documents: impl IntoIterator<Item = &'a LegacyProduct>) -> u64 {
        documents.into_iter().filter(|p| self.matches(p)).count() as u64
    }
}
