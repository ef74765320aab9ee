//! Product Errors

use salvo::{
    http::StatusCode,
    oapi::ToSchema,
    prelude::{Json, Response},
};
use serde::{Deserialize, Serialize};

use scancart_app::domain::products::ProductsServiceError;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    /// What went wrong
    pub error: String,
}

pub(crate) fn render_error(res: &mut Response, error: &ProductsServiceError) {
    match error {
        ProductsServiceError::NotFound => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse {
                error: "Product not found".to_owned(),
            }));
        }
    }
}
