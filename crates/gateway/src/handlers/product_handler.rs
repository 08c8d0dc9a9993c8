//! Product catalog handlers.
//!
//! Listing needs any authenticated session; every mutating route is
//! admin-only. Guards are attached per route so they run before form parsing.

use std::collections::BTreeMap;

use axum::{
    extract::{Extension, Path, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};

use common::AppError;
use domain::{ProductDraft, ProductForm, Submission};

use crate::middleware::{admin_only, authenticated, SessionContext};
use crate::state::AppState;
use crate::views;

const NEW_TITLE: &str = "Nuevo producto";
const EDIT_TITLE: &str = "Editar producto";

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/productos/nuevo", get(new_product_form))
        .route(
            "/productos/:id/editar",
            get(edit_product_form).post(update_product),
        )
        .route("/productos/:id/borrar", post(delete_product))
        .route_layer(middleware::from_fn(admin_only));

    Router::new()
        .route(
            "/productos",
            get(list_products.layer(middleware::from_fn(authenticated)))
                .post(create_product.layer(middleware::from_fn(admin_only))),
        )
        .merge(admin)
}

fn edit_action(id: i32) -> String {
    format!("/productos/{}/editar", id)
}

/// Validate a submitted product, or render the form again with status 422.
fn checked(form: ProductForm, title: &str, action: &str) -> Result<ProductDraft, Response> {
    form.check().map_err(|errors| {
        let page = views::product_form(title, action, &errors.old, Some(&errors));
        (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
    })
}

fn failure(err: AppError) -> Response {
    match err {
        AppError::NotFound => (
            StatusCode::NOT_FOUND,
            views::message("No encontrado", "Producto no encontrado"),
        )
            .into_response(),
        other => (other.status(), views::message("Error", &other.user_message())).into_response(),
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Extension(ctx): Extension<SessionContext>,
) -> Response {
    match state.catalog.list_products().await {
        Ok(products) => views::product_list(&products, &ctx.state).into_response(),
        Err(e) => failure(e),
    }
}

pub async fn new_product_form() -> Html<String> {
    views::product_form(NEW_TITLE, "/productos", &BTreeMap::new(), None)
}

pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    let draft = match checked(form, NEW_TITLE, "/productos") {
        Ok(draft) => draft,
        Err(page) => return page,
    };

    match state.catalog.create_product(draft).await {
        Ok(_) => Redirect::to("/productos").into_response(),
        Err(e) => failure(e),
    }
}

pub async fn edit_product_form(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.catalog.get_product(id).await {
        Ok(product) => {
            let values = ProductForm::from_product(&product).old_values();
            views::product_form(EDIT_TITLE, &edit_action(id), &values, None).into_response()
        }
        Err(e) => failure(e),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Response {
    let draft = match checked(form, EDIT_TITLE, &edit_action(id)) {
        Ok(draft) => draft,
        Err(page) => return page,
    };

    match state.catalog.update_product(id, draft).await {
        Ok(_) => Redirect::to("/productos").into_response(),
        Err(e) => failure(e),
    }
}

pub async fn delete_product(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.catalog.delete_product(id).await {
        Ok(()) => Redirect::to("/productos").into_response(),
        Err(e) => failure(e),
    }
}
