//! Route definitions for the Cotton Waste Billing Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalogs
        .nest("/packing-types", packing_type_routes())
        .nest("/waste-masters", waste_master_routes())
        .nest("/waste-lots", waste_lot_routes())
        .nest("/waste-rates", waste_rate_routes())
        // Transactions
        .nest("/packings", packing_routes())
        .nest("/sales-orders", sales_order_routes())
        .nest("/invoices", invoice_routes())
}

fn packing_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_packing_types).post(handlers::create_packing_type),
        )
        .route(
            "/:id",
            get(handlers::get_packing_type)
                .put(handlers::update_packing_type)
                .delete(handlers::delete_packing_type),
        )
}

fn waste_master_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_waste_masters).post(handlers::create_waste_master),
        )
        .route(
            "/:id",
            get(handlers::get_waste_master)
                .put(handlers::update_waste_master)
                .delete(handlers::delete_waste_master),
        )
}

fn waste_lot_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_waste_lots).post(handlers::create_waste_lot))
        .route("/resolve/:lot_no", get(handlers::resolve_waste_lot))
        .route(
            "/:id",
            get(handlers::get_waste_lot)
                .put(handlers::update_waste_lot)
                .delete(handlers::delete_waste_lot),
        )
}

fn waste_rate_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_waste_rates).post(handlers::create_waste_rate))
        .route("/available", get(handlers::list_available_masters))
        .route(
            "/:id",
            get(handlers::get_waste_rate)
                .put(handlers::update_waste_rate)
                .delete(handlers::delete_waste_rate),
        )
}

fn packing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_packings).post(handlers::create_packing))
        .route("/generate", post(handlers::generate_packing))
        .route(
            "/:id",
            get(handlers::get_packing)
                .put(handlers::update_packing)
                .delete(handlers::delete_packing),
        )
        .route("/:id/approve", post(handlers::approve_packing))
}

fn sales_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_sales_orders).post(handlers::create_sales_order),
        )
        .route(
            "/:id",
            get(handlers::get_sales_order)
                .put(handlers::update_sales_order)
                .delete(handlers::delete_sales_order),
        )
}

fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_invoices).post(handlers::create_invoice))
        .route(
            "/:id",
            get(handlers::get_invoice)
                .put(handlers::update_invoice)
                .delete(handlers::delete_invoice),
        )
        .route("/:id/approve", post(handlers::approve_invoice))
}
