//! Aggregate views over tours and products.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use travelhub_core::resources::{PRODUCTS, TOURS};
use travelhub_core::{Column, FieldValue, ResourceSpec, ServiceError, ServiceResult};

use crate::store::RecordStore;

const PRICE_STEP: u32 = 200;
const PRICE_BUCKETS: u32 = 8;

pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub y: u64,
}

#[derive(Clone)]
pub struct ChartsService {
    store: Arc<dyn RecordStore>,
}

impl ChartsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Tour count per price range `$min-max` (`min < price <= max`), in
    /// ascending order of range.
    #[instrument(skip(self))]
    pub async fn tour_price_bar_chart(&self) -> ServiceResult<Vec<ChartPoint>> {
        let prices = self.values(&TOURS, "price").await?;
        let prices: Vec<f64> = prices.iter().filter_map(FieldValue::as_f64).collect();

        let points = (0..PRICE_BUCKETS)
            .map(|i| {
                let (min, max) = (i * PRICE_STEP, (i + 1) * PRICE_STEP);
                let count = prices
                    .iter()
                    .filter(|&&p| p > f64::from(min) && p <= f64::from(max))
                    .count();
                ChartPoint {
                    x: format!("${min}-{max}"),
                    y: count as u64,
                }
            })
            .collect();

        Ok(points)
    }

    /// Total product quantity per category, sorted by category name.
    #[instrument(skip(self))]
    pub async fn product_category_pie_chart(&self) -> ServiceResult<Vec<ChartPoint>> {
        let products = self.store.find_all(&PRODUCTS, None).await.map_err(|e| {
            tracing::error!(resource = PRODUCTS.name, error = %e, "chart query failed");
            ServiceError::internal(e.to_string(), PRODUCTS.catalog.list_failed)
        })?;

        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for product in &products {
            let key = product
                .get("category")
                .and_then(FieldValue::as_text)
                .unwrap_or(UNCATEGORIZED)
                .to_string();
            let quantity = product
                .get("quantity")
                .and_then(FieldValue::as_i64)
                .map_or(0, |q| q.max(0) as u64);
            *totals.entry(key).or_default() += quantity;
        }

        Ok(totals.into_iter().map(|(x, y)| ChartPoint { x, y }).collect())
    }

    async fn values(&self, spec: &'static ResourceSpec, column: &str) -> ServiceResult<Vec<FieldValue>> {
        let list_failed = spec.catalog.list_failed;
        let column: &'static Column = spec.column(column).ok_or_else(|| {
            ServiceError::internal(format!("unknown column {}.{column}", spec.table), list_failed)
        })?;

        self.store.column_values(spec, column).await.map_err(|e| {
            tracing::error!(resource = spec.name, column = column.name, error = %e, "chart query failed");
            ServiceError::internal(e.to_string(), list_failed)
        })
    }
}
