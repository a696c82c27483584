//! 厨房显示
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /staff/kitchen | GET | 待制作订单 (Ready for Kitchen / Preparing) |
//! | /staff/kitchen/{id}/advance | POST | 推进到下一个状态 |

use axum::{
    Router,
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
};
use shared::models::KitchenTicket;

use crate::api::response::{see_other, view};
use crate::core::ServerState;
use crate::orders;
use crate::utils::{ApiResponse, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/staff/kitchen", get(list))
        .route("/staff/kitchen/{id}/advance", post(advance))
}

/// GET /staff/kitchen - oldest first
async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<KitchenTicket>>> {
    let tickets = orders::list_tickets(&state.pool).await?;
    Ok(view("kitchen", tickets))
}

/// POST /staff/kitchen/{id}/advance
async fn advance(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Redirect> {
    orders::advance_status(&state.pool, id).await?;
    Ok(see_other("/staff/kitchen"))
}
