//! KPI route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tally_core::money::{self, Money};
use tally_core::{Kpis, TopSku};

use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, CurrentUser};
use crate::services::kpi_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/shops/{shop_id}/kpis", get(get_kpis))
}

/// `?from=YYYY-MM-DD&to=YYYY-MM-DD`, both optional.
#[derive(Debug, Default, Deserialize)]
pub struct KpiQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KpisResponse {
    pub shop_id: i64,
    pub total_receipts: i64,
    #[serde(with = "money::as_major_units")]
    pub total_revenue: Money,
    pub top_skus: Vec<TopSkuResponse>,
}

#[derive(Debug, Serialize)]
pub struct TopSkuResponse {
    pub sku: String,
    pub name: String,
    pub qty: i64,
    #[serde(with = "money::as_major_units")]
    pub revenue: Money,
}

impl From<TopSku> for TopSkuResponse {
    fn from(top: TopSku) -> Self {
        TopSkuResponse {
            sku: top.sku,
            name: top.name,
            qty: top.qty,
            revenue: top.revenue,
        }
    }
}

impl From<Kpis> for KpisResponse {
    fn from(kpis: Kpis) -> Self {
        KpisResponse {
            shop_id: kpis.shop_id,
            total_receipts: kpis.total_receipts,
            total_revenue: kpis.total_revenue,
            top_skus: kpis.top_skus.into_iter().map(Into::into).collect(),
        }
    }
}

/// KPIs of one shop. Owner only.
pub async fn get_kpis(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    ApiPath(shop_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<KpiQuery>,
) -> Result<Json<KpisResponse>, ApiError> {
    let kpis = kpi_service::get_kpis(
        state.db(),
        &user,
        shop_id,
        query.from.as_deref(),
        query.to.as_deref(),
    )
    .await?;

    Ok(Json(kpis.into()))
}
