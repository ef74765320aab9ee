//! Recommendations Handler

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{extensions::*, products::ProductResponse};

/// Recommendations Handler
///
/// Suggests up to four related products within an optional budget.
/// Unknown barcodes yield an empty list.
#[endpoint(tags("products"), summary = "Recommend Products")]
pub(crate) async fn handler(
    barcode: PathParam<String>,
    budget: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.state()?;

    let recommendations = state
        .app
        .products
        .recommend(&barcode.into_inner(), budget.into_budget())
        .await;

    Ok(Json(recommendations.into_iter().map(Into::into).collect()))
}
