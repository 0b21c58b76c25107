use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seeded roles.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    faena_db::health_check(&pool).await.unwrap();

    let names: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let names: Vec<&str> = names.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(names, ["admin", "supervisor", "worker"]);
}

/// Role ids are pinned because the API refers to them by constant.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_default_role_is_worker(pool: PgPool) {
    let role = faena_db::repositories::RoleRepo::find_by_id(&pool, faena_core::roles::DEFAULT_ROLE_ID)
        .await
        .unwrap()
        .expect("default role seeded");
    assert_eq!(role.name, faena_core::roles::ROLE_WORKER);
}

/// New roles inserted after the seed must not collide with seeded ids.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_sequence_advanced_past_seed(pool: PgPool) {
    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO roles (name) VALUES ('auditor') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(id > 3);
}
