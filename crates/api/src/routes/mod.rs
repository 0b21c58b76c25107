pub mod auth;
pub mod contract;
pub mod current_account;
pub mod delivery;
pub mod expense;
pub mod export;
pub mod health;
pub mod inventory;
pub mod labor_report;
pub mod lease;
pub mod machine;
pub mod maintenance;
pub mod payment;
pub mod payroll;
pub mod project;
pub mod shift;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
/// /auth/refresh                              refresh (public)
/// /auth/logout                               logout
/// /auth/me                                   current user
///
/// /users                                     list, create (admin only)
/// /users/{id}                                get, update, deactivate
/// /users/{id}/reset-password                 reset password
///
/// /projects                                  list, create
/// /projects/{id}                             get, update, delete
/// /projects/{id}/summary                     ledger totals
///
/// /machines                                  list, create
/// /machines/{id}                             get, update, delete
/// /machines/{id}/usage                       labor/lease usage
/// /machines/{id}/maintenance-status          hours since last service
/// /machines/{id}/image                       upload photo (multipart)
///
/// /contracts, /contracts/{id}                CRUD
/// /contracts/{id}/document                   upload document (multipart)
/// /expenses, /expenses/{id}                  CRUD (own records for workers)
/// /expenses/{id}/receipt                     upload receipt (multipart)
/// /payments, /payments/{id}                  CRUD
///
/// /products, /products/{id}                  CRUD
/// /inventory-movements                       list, record
/// /inventory-movements/{id}                  get
///
/// /leases, /leases/{id}                      CRUD
/// /labor-reports, /labor-reports/{id}        CRUD
/// /deliveries, /deliveries/{id}              CRUD
/// /deliveries/{id}/ticket                    upload ticket (multipart)
/// /maintenance, /maintenance/{id}            CRUD
/// /maintenance/{id}/photo                    upload photo (multipart)
///
/// /shifts                                    list, clock in
/// /shifts/current                            caller's open shift
/// /shifts/{id}                               get
/// /shifts/{id}/clock-out                     clock out
/// /shifts/{id}/confirm-overtime              resume into overtime
/// /shifts/{id}/reject-overtime               close with regular hours
/// /shifts/{id}/cancel                        cancel
/// /shifts/{id}/rest                          add a break
///
/// /payroll, /payroll/{id}                    generate, list, get, delete
/// /current-accounts, /current-accounts/{id}  generate, list, get, delete
///
/// /exports/shifts.xlsx                       completed shifts
/// /exports/payroll.xlsx                      payroll period
/// /exports/current-accounts/{id}.xlsx        account summary + detail
/// /exports/current-accounts/{id}.pdf         account detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // User administration.
        .nest("/users", user::router())
        // Master data.
        .nest("/projects", project::router())
        .nest("/machines", machine::router())
        .nest("/contracts", contract::router())
        .nest("/products", inventory::product_router())
        // Money in and out.
        .nest("/expenses", expense::router())
        .nest("/payments", payment::router())
        .nest("/inventory-movements", inventory::movement_router())
        // Field operations.
        .nest("/leases", lease::router())
        .nest("/labor-reports", labor_report::router())
        .nest("/deliveries", delivery::router())
        .nest("/maintenance", maintenance::router())
        // Shifts and what is derived from them.
        .nest("/shifts", shift::router())
        .nest("/payroll", payroll::router())
        .nest("/current-accounts", current_account::router())
        // File downloads.
        .nest("/exports", export::router())
}
