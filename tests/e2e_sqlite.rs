// these tests use #[serial] to run sequentially because setup_db() recreates
// the database each time. without serial, parallel tests would interfere
// with each other's data.

//! End-to-end tests for the `SQLite` team-member store.
//!
//! These tests use an in-memory `SQLite` database.
//! Run with: `cargo test --features sqlx_sqlite --test e2e_sqlite`

#![cfg(feature = "sqlx_sqlite")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use dashgate::sqlite::{SqliteTeamMemberRepository, migrations};
use dashgate::{
    AccessConfig, AccessError, CreateTeamMember, Identity, IdentityResolver, MemberStatus,
    Permission, PermissionSet, Principal, Role, TeamMemberRepository, UpdateTeamMember,
};
use serial_test::serial;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn setup_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite database");

    migrations::run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn new_member(email: &str, role: Role, permissions: &[Permission]) -> CreateTeamMember {
    CreateTeamMember {
        principal_id: None,
        email: email.to_owned(),
        name: "Staff Member".to_owned(),
        role,
        permissions: permissions.iter().copied().collect(),
        department: Some("Operations".to_owned()),
        position: None,
        status: MemberStatus::Active,
    }
}

#[tokio::test]
#[serial]
async fn test_team_member_crud() {
    let pool = setup_db().await;
    let repo = SqliteTeamMemberRepository::new(pool);

    let member = repo
        .create(new_member(
            "dev@example.com",
            Role::Developer,
            &[Permission::GemCoins, Permission::DailyRewards],
        ))
        .await
        .expect("Failed to create team member");
    assert!(member.id > 0);
    assert_eq!(member.role, Role::Developer);
    assert_eq!(member.permissions.len(), 2);
    assert_eq!(member.status, MemberStatus::Active);

    let found = repo.find_by_id(member.id).await.unwrap().unwrap();
    assert_eq!(found.email, "dev@example.com");
    assert_eq!(found.permissions, member.permissions);

    let updated = repo
        .update(
            member.id,
            UpdateTeamMember {
                role: Some(Role::Tester),
                permissions: Some(PermissionSet::from_iter([Permission::QaReleases])),
                ..UpdateTeamMember::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Tester);
    assert!(updated.permissions.contains(Permission::QaReleases));
    assert!(!updated.permissions.contains(Permission::GemCoins));
    // untouched fields keep their values
    assert_eq!(updated.name, "Staff Member");
    assert_eq!(updated.department.as_deref(), Some("Operations"));

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 1);

    repo.delete(member.id).await.unwrap();
    assert!(repo.find_by_id(member.id).await.unwrap().is_none());
    assert_eq!(
        repo.delete(member.id).await.unwrap_err(),
        AccessError::NotFound
    );
}

#[tokio::test]
#[serial]
async fn test_email_is_unique_ignoring_case() {
    let pool = setup_db().await;
    let repo = SqliteTeamMemberRepository::new(pool);

    repo.create(new_member("qa@example.com", Role::Tester, &[]))
        .await
        .unwrap();

    let result = repo
        .create(new_member("QA@Example.com", Role::Tester, &[]))
        .await;
    assert_eq!(result.unwrap_err(), AccessError::AlreadyExists);

    let found = repo.find_by_email("Qa@EXAMPLE.com").await.unwrap();
    assert!(found.is_some());
}

#[tokio::test]
#[serial]
async fn test_provider_id_is_unique() {
    let pool = setup_db().await;
    let repo = SqliteTeamMemberRepository::new(pool);

    repo.create(CreateTeamMember {
        principal_id: Some("uid-lead".to_owned()),
        ..new_member("lead@example.com", Role::Admin, &[])
    })
    .await
    .unwrap();

    let err = repo
        .create(CreateTeamMember {
            principal_id: Some("uid-lead".to_owned()),
            ..new_member("lead.other@example.com", Role::Tester, &[])
        })
        .await
        .unwrap_err();

    assert_eq!(err, AccessError::AlreadyExists);
    assert!(!err.to_string().contains("email"));
}

#[tokio::test]
#[serial]
async fn test_update_missing_member() {
    let pool = setup_db().await;
    let repo = SqliteTeamMemberRepository::new(pool);

    let result = repo.update(999, UpdateTeamMember::default()).await;
    assert_eq!(result.unwrap_err(), AccessError::NotFound);
}

#[tokio::test]
#[serial]
async fn test_find_by_principal_prefers_provider_id() {
    let pool = setup_db().await;
    let repo = SqliteTeamMemberRepository::new(pool);

    let linked = repo
        .create(CreateTeamMember {
            principal_id: Some("uid-lead".to_owned()),
            ..new_member("lead@example.com", Role::Admin, &[])
        })
        .await
        .unwrap();
    repo.create(new_member("qa@example.com", Role::Tester, &[]))
        .await
        .unwrap();

    // provider id wins even when the email changed at the provider
    let principal = Principal::new("uid-lead", "lead.renamed@example.com");
    let found = repo.find_by_principal(&principal).await.unwrap().unwrap();
    assert_eq!(found.id, linked.id);

    // unlinked records match by email
    let principal = Principal::new("uid-qa", "qa@example.com");
    let found = repo.find_by_principal(&principal).await.unwrap().unwrap();
    assert_eq!(found.role, Role::Tester);

    // a linked record is not claimed by another principal sharing the email
    let principal = Principal::new("uid-other", "lead@example.com");
    assert!(repo.find_by_principal(&principal).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_resolver_over_sqlite() {
    let pool = setup_db().await;
    let repo = SqliteTeamMemberRepository::new(pool);
    repo.create(new_member("qa@example.com", Role::Tester, &[Permission::BugReports]))
        .await
        .unwrap();

    let resolver = IdentityResolver::new(repo, AccessConfig::default());

    let managed = resolver
        .resolve(Some(Principal::new("uid-qa", "qa@example.com")))
        .await;
    assert!(managed.is_managed());
    assert!(managed.has_permission(Permission::BugReports));

    let unmanaged = resolver
        .resolve(Some(Principal::new("uid-root", "root@example.com")))
        .await;
    assert!(matches!(unmanaged, Identity::Unmanaged { .. }));
}

#[tokio::test]
#[serial]
async fn test_migrations_are_idempotent() {
    let pool = setup_db().await;

    migrations::run(&pool).await.unwrap();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _dashgate_migrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(applied, 1);
}
