//! Application router configuration for the expense routes and their auth guard.

use axum::{
    Router,
    http::Uri,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch},
};

use crate::{
    AppState, Error,
    auth::ensure_correct_user,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_by_category_endpoint,
        list_expenses_by_month_endpoint, list_expenses_by_year_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every expense route requires a bearer token issued to the user named in the path.
pub fn build_router(state: AppState) -> Router {
    let expense_routes = Router::new()
        .route(
            endpoints::USER_EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSES_BY_CATEGORY,
            get(list_expenses_by_category_endpoint),
        )
        .route(
            endpoints::EXPENSES_BY_YEAR,
            get(list_expenses_by_year_endpoint),
        )
        .route(
            endpoints::EXPENSES_BY_MONTH,
            get(list_expenses_by_month_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            patch(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_correct_user,
        ));

    Router::new()
        .nest(endpoints::EXPENSES_ROOT, expense_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found(uri: Uri) -> Response {
    Error::RouteNotFound(uri.path().to_owned()).into_response()
}
