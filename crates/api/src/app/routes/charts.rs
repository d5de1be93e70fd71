use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::app::errors::{self, ApiResult};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/tour-bar-chart", get(tour_bar_chart))
        .route("/product-pie-chart", get(product_pie_chart))
}

pub async fn tour_bar_chart(Extension(services): Extension<Arc<AppServices>>) -> ApiResult {
    let points = services.charts.tour_price_bar_chart().await?;
    Ok(errors::ok(points))
}

pub async fn product_pie_chart(Extension(services): Extension<Arc<AppServices>>) -> ApiResult {
    let points = services.charts.product_category_pie_chart().await?;
    Ok(errors::ok(points))
}
