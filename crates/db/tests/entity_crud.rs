//! Integration tests for entity CRUD operations.
//!
//! Exercises the repository layer against a real database:
//! - Create/read/update/delete round trips
//! - Unique and foreign key violations
//! - Cascade behaviour
//! - Transactional side effects (inventory stock, hour meters)

use assert_matches::assert_matches;
use chrono::NaiveDate;
use faena_core::inventory::MovementType;
use faena_db::models::contract::{ContractFilter, CreateContract, UpdateContract};
use faena_db::models::inventory::{CreateInventoryMovement, CreateProduct, MovementFilter};
use faena_db::models::labor_report::CreateLaborReport;
use faena_db::models::machine::{CreateMachine, UpdateMachine};
use faena_db::models::project::{CreateProject, ProjectFilter, UpdateProject};
use faena_db::models::user::CreateUser;
use faena_db::repositories::{
    ContractRepo, InventoryMovementRepo, LaborReportRepo, MachineRepo, ProductRepo, ProjectRepo,
    StockOutcome, UserRepo,
};
use rust_decimal_macros::dec;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        client_name: Some("Constructora Andes".to_string()),
        location: Some("Rancagua".to_string()),
        description: None,
        status: None,
        start_date: Some(date(2026, 3, 1)),
        end_date: None,
    }
}

fn new_machine(code: &str) -> CreateMachine {
    CreateMachine {
        code: code.to_string(),
        name: "Excavadora CAT 320".to_string(),
        machine_type: "excavator".to_string(),
        brand: Some("Caterpillar".to_string()),
        model: Some("320".to_string()),
        plate: None,
        hour_meter: Some(dec!(1200)),
        hourly_rate: Some(dec!(45000)),
        maintenance_interval_hours: None,
        status: None,
        project_id: None,
    }
}

fn new_contract(project_id: i64, number: &str) -> CreateContract {
    CreateContract {
        project_id,
        contract_number: number.to_string(),
        client_name: "Constructora Andes".to_string(),
        description: None,
        amount: dec!(15000000),
        start_date: date(2026, 3, 1),
        end_date: None,
        status: None,
    }
}

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Operador".to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role_id: 3,
            national_id: None,
            phone: None,
            hourly_rate: Some(dec!(5000)),
        },
    )
    .await
    .unwrap()
    .id
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_round_trip(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project("Ruta 5 Sur")).await.unwrap();
    assert_eq!(created.status, "active");

    let found = ProjectRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Ruta 5 Sur");
    assert_eq!(found.start_date, Some(date(2026, 3, 1)));

    let updated = ProjectRepo::update(
        &pool,
        created.id,
        &UpdateProject {
            status: Some("paused".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "paused");
    assert_eq!(updated.name, "Ruta 5 Sur", "untouched fields keep their value");

    assert!(ProjectRepo::delete(&pool, created.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
    assert!(!ProjectRepo::delete(&pool, created.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_filters(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project("Puente Maipo")).await.unwrap();
    ProjectRepo::create(&pool, &new_project("Ruta 68")).await.unwrap();

    let all = ProjectRepo::list(&pool, &ProjectFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let filter = ProjectFilter {
        q: Some("maipo".to_string()),
        ..Default::default()
    };
    let hits = ProjectRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Puente Maipo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_project_returns_none(pool: PgPool) {
    let result = ProjectRepo::update(&pool, 999_999, &UpdateProject::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Machines & contracts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_machine_defaults_and_update(pool: PgPool) {
    let machine = MachineRepo::create(&pool, &new_machine("EX-01")).await.unwrap();
    assert_eq!(machine.status, "available");
    assert_eq!(machine.maintenance_interval_hours, dec!(250));

    let updated = MachineRepo::update(
        &pool,
        machine.id,
        &UpdateMachine {
            status: Some("maintenance".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "maintenance");
    assert_eq!(updated.hourly_rate, dec!(45000));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_machine_code_is_unique_violation(pool: PgPool) {
    MachineRepo::create(&pool, &new_machine("EX-01")).await.unwrap();
    let err = MachineRepo::create(&pool, &new_machine("EX-01")).await.unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contract_requires_existing_project(pool: PgPool) {
    let err = ContractRepo::create(&pool, &new_contract(999_999, "C-001"))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_contracts_cascade_with_project(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Embalse")).await.unwrap();
    let contract = ContractRepo::create(&pool, &new_contract(project.id, "C-001"))
        .await
        .unwrap();
    assert_eq!(contract.status, "draft");

    let updated = ContractRepo::update(
        &pool,
        contract.id,
        &UpdateContract {
            status: Some("active".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "active");

    ProjectRepo::delete(&pool, project.id).await.unwrap();
    let remaining = ContractRepo::list(
        &pool,
        &ContractFilter {
            project_id: Some(project.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(remaining.is_empty());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
    new_user(&pool, "ana@faena.cl").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            name: "Otra".to_string(),
            email: "ana@faena.cl".to_string(),
            password_hash: "x".to_string(),
            role_id: 3,
            national_id: None,
            phone: None,
            hourly_rate: None,
        },
    )
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_email_ignores_case(pool: PgPool) {
    let id = new_user(&pool, "Pedro@Faena.cl").await;
    let found = UserRepo::find_by_email(&pool, "pedro@faena.cl").await.unwrap().unwrap();
    assert_eq!(found.id, id);
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

fn movement(product_id: i64, kind: &str, quantity: rust_decimal::Decimal) -> CreateInventoryMovement {
    CreateInventoryMovement {
        product_id,
        project_id: None,
        movement_type: kind.to_string(),
        quantity,
        unit_cost: None,
        notes: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inventory_movements_update_stock(pool: PgPool) {
    let user_id = new_user(&pool, "bodega@faena.cl").await;
    let product = ProductRepo::create(
        &pool,
        &CreateProduct {
            sku: "DIESEL".to_string(),
            name: "Petróleo diésel".to_string(),
            unit: Some("l".to_string()),
            min_stock: Some(dec!(100)),
            unit_cost: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(product.stock, dec!(0));

    let outcome = InventoryMovementRepo::record(
        &pool,
        user_id,
        &movement(product.id, "in", dec!(500)),
        MovementType::In,
    )
    .await
    .unwrap();
    assert_matches!(outcome, StockOutcome::Recorded { ref product, .. } if product.stock == dec!(500));

    let outcome = InventoryMovementRepo::record(
        &pool,
        user_id,
        &movement(product.id, "out", dec!(120.5)),
        MovementType::Out,
    )
    .await
    .unwrap();
    let StockOutcome::Recorded { movement, product: after } = outcome else {
        panic!("expected movement to be recorded");
    };
    assert_eq!(movement.stock_after, dec!(379.5));
    assert_eq!(after.stock, dec!(379.5));

    let ledger = InventoryMovementRepo::list(
        &pool,
        &MovementFilter {
            product_id: Some(product.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(ledger.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_outgoing_beyond_stock_is_rejected_and_stock_unchanged(pool: PgPool) {
    let user_id = new_user(&pool, "bodega@faena.cl").await;
    let product = ProductRepo::create(
        &pool,
        &CreateProduct {
            sku: "GRASA".to_string(),
            name: "Grasa".to_string(),
            unit: None,
            min_stock: None,
            unit_cost: None,
        },
    )
    .await
    .unwrap();
    InventoryMovementRepo::record(&pool, user_id, &movement(product.id, "in", dec!(10)), MovementType::In)
        .await
        .unwrap();

    let outcome = InventoryMovementRepo::record(
        &pool,
        user_id,
        &movement(product.id, "out", dec!(11)),
        MovementType::Out,
    )
    .await
    .unwrap();
    assert_matches!(outcome, StockOutcome::Rejected(faena_core::error::CoreError::Conflict(_)));

    let reloaded = ProductRepo::find_by_id(&pool, product.id).await.unwrap().unwrap();
    assert_eq!(reloaded.stock, dec!(10));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_movement_for_missing_product(pool: PgPool) {
    let user_id = new_user(&pool, "bodega@faena.cl").await;
    let outcome = InventoryMovementRepo::record(
        &pool,
        user_id,
        &movement(424_242, "in", dec!(1)),
        MovementType::In,
    )
    .await
    .unwrap();
    assert_matches!(outcome, StockOutcome::ProductNotFound);
}

// ---------------------------------------------------------------------------
// Labor reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_labor_report_advances_hour_meter(pool: PgPool) {
    let user_id = new_user(&pool, "operador@faena.cl").await;
    let project = ProjectRepo::create(&pool, &new_project("Canal")).await.unwrap();
    let machine = MachineRepo::create(&pool, &new_machine("EX-07")).await.unwrap();

    let input = CreateLaborReport {
        user_id: None,
        machine_id: machine.id,
        project_id: project.id,
        report_date: date(2026, 3, 10),
        hour_meter_start: dec!(1200),
        hour_meter_end: dec!(1208.5),
        fuel_liters: Some(dec!(95)),
        description: None,
    };
    let report = LaborReportRepo::create(&pool, user_id, &input, dec!(8.5)).await.unwrap();
    assert_eq!(report.hours_worked, dec!(8.5));

    let machine = MachineRepo::find_by_id(&pool, machine.id).await.unwrap().unwrap();
    assert_eq!(machine.hour_meter, dec!(1208.5));

    let usage = MachineRepo::usage(&pool, machine.id).await.unwrap();
    assert_eq!(usage.report_count, 1);
    assert_eq!(usage.total_hours, dec!(8.5));
    assert_eq!(usage.total_fuel_liters, dec!(95));
}
