//! Seed script for development: populates a fresh database with a sample enterprise.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use std::time::Duration;

use anyhow::Context;
use chrono::{Duration as Days, Utc};
use sqlx::PgPool;

use risk_sentinel::services::auth::hash_password;

const ENTERPRISE: &str = "TechCorp Inc.";
const DEFAULT_PASSWORD: &str = "Sentinel123!";

const USERS: [(&str, &str, &str); 4] = [
    ("admin", "admin@techcorp.example", "Admin"),
    ("pm", "pm@techcorp.example", "PM"),
    ("analyst", "analyst@techcorp.example", "Analyst"),
    ("vendor", "vendor@techcorp.example", "Vendor"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = risk_sentinel::db::create_pool(&db_url, 5, Duration::from_secs(5)).await?;
    risk_sentinel::db::run_migrations(&pool).await?;

    println!("=== Risk Sentinel Seed Script ===");

    let enterprise_id = seed_enterprise(&pool).await?;
    seed_users(&pool, enterprise_id).await?;
    seed_vendors(&pool, enterprise_id).await?;
    seed_portfolio(&pool, enterprise_id).await?;

    println!("\n=== Seed complete! ===");
    for (username, email, role) in USERS {
        println!("{role:<8} {username:<8} {email} / {DEFAULT_PASSWORD}");
    }

    Ok(())
}

async fn seed_enterprise(pool: &PgPool) -> anyhow::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO enterprises (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(ENTERPRISE)
    .fetch_one(pool)
    .await?;

    println!("[done] Enterprise '{ENTERPRISE}' (id {id})");
    Ok(id)
}

async fn seed_users(pool: &PgPool, enterprise_id: i64) -> anyhow::Result<()> {
    let hash = hash_password(DEFAULT_PASSWORD)?;

    for (username, email, role) in USERS {
        sqlx::query(
            "INSERT INTO users (username, email, password_hash, role, enterprise_id)
             VALUES ($1, $2, $3, $4::user_role, $5)
             ON CONFLICT (username) DO UPDATE SET password_hash = EXCLUDED.password_hash",
        )
        .bind(username)
        .bind(email)
        .bind(&hash)
        .bind(role)
        .bind(enterprise_id)
        .execute(pool)
        .await?;
    }

    println!("[done] {} users", USERS.len());
    Ok(())
}

async fn seed_vendors(pool: &PgPool, enterprise_id: i64) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors WHERE enterprise_id = $1")
        .bind(enterprise_id)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("[skip] Vendors already exist ({existing})");
        return Ok(());
    }

    let vendors = [
        ("Acme Cloud Services", "support@acme.example"),
        ("Northwind Consulting", "hello@northwind.example"),
        ("Globex Security", "soc@globex.example"),
    ];
    for (name, email) in vendors {
        sqlx::query("INSERT INTO vendors (enterprise_id, name, contact_email) VALUES ($1, $2, $3)")
            .bind(enterprise_id)
            .bind(name)
            .bind(email)
            .execute(pool)
            .await?;
    }

    println!("[done] {} vendors", vendors.len());
    Ok(())
}

async fn user_id(pool: &PgPool, username: &str) -> anyhow::Result<i64> {
    sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await
        .with_context(|| format!("user '{username}' missing"))
}

async fn seed_portfolio(pool: &PgPool, enterprise_id: i64) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE enterprise_id = $1")
        .bind(enterprise_id)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("[skip] Projects already exist ({existing})");
        return Ok(());
    }

    let pm_id = user_id(pool, "pm").await?;
    let vendor_id = user_id(pool, "vendor").await?;
    let today = Utc::now().date_naive();

    let projects = [
        ("Alpha Sprint", "Active", 120_000.0, 35_000.0, 8),
        ("Beta Release", "Planning", 80_000.0, 0.0, 5),
        ("Gamma MVP", "Completed", 45_000.0, 44_000.0, 3),
    ];

    let mut tx = pool.begin().await?;
    let mut project_ids = Vec::with_capacity(projects.len());
    for (name, status, budget_total, budget_spent, team_size) in projects {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO projects (enterprise_id, pm_id, name, status, budget_total, budget_spent, team_size, start_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(enterprise_id)
        .bind(pm_id)
        .bind(name)
        .bind(status)
        .bind(budget_total)
        .bind(budget_spent)
        .bind(team_size)
        .bind(today - Days::days(30))
        .fetch_one(&mut *tx)
        .await?;
        project_ids.push(id);

        sqlx::query("INSERT INTO activities (project_id, user_id, action, details) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(pm_id)
            .bind("Created project")
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }

    let risks = [
        (0, "Key supplier delivery slip", "Red", 4.5, "Open"),
        (0, "Scope creep from stakeholder requests", "Amber", 3.2, "In Progress"),
        (1, "Budget approval pending", "Amber", 2.5, "Identified"),
        (2, "Legacy API deprecation", "Green", 1.0, "Closed"),
    ];
    for (project, title, rag, score, status) in risks {
        sqlx::query(
            "INSERT INTO risks (enterprise_id, project_id, title, rag_status, risk_score, status)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(enterprise_id)
        .bind(project_ids[project])
        .bind(title)
        .bind(rag)
        .bind(score)
        .bind(status)
        .execute(&mut *tx)
        .await?;
    }

    let tasks = [
        (0, "Finalize vendor contract", "In Progress", "High", Some(-3), Some(vendor_id)),
        (0, "Security review", "Not Started", "Critical", Some(7), Some(vendor_id)),
        (0, "Sprint retrospective", "Completed", "Low", Some(-10), None),
        (1, "Draft project charter", "Testing", "Medium", Some(14), None),
        (1, "Collect requirements", "Not Started", "Medium", None, Some(vendor_id)),
        (2, "Release notes", "Completed", "Low", Some(-20), None),
    ];
    for (project, title, status, priority, due_in_days, assignee) in tasks {
        sqlx::query(
            "INSERT INTO tasks (project_id, assigned_to, title, status, priority, due_date)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(project_ids[project])
        .bind(assignee)
        .bind(title)
        .bind(status)
        .bind(priority)
        .bind(due_in_days.map(|d| today + Days::days(d)))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    println!(
        "[done] {} projects, {} risks, {} tasks",
        projects.len(),
        risks.len(),
        tasks.len()
    );
    Ok(())
}
