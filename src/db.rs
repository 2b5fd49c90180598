use anyhow::Context;
use sqlx::MySqlPool;
use tracing::info;

pub async fn init_db(database_url: &str) -> anyhow::Result<MySqlPool> {
    MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")
}

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS hr_accounts (
        hr_id         VARCHAR(6)   NOT NULL PRIMARY KEY,
        name          VARCHAR(100) NOT NULL,
        designation   VARCHAR(100) NOT NULL DEFAULT '',
        username      VARCHAR(100) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        dept_id       CHAR(4)      NOT NULL PRIMARY KEY,
        dept_name     VARCHAR(100) NOT NULL,
        head_emp_code CHAR(6)      NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS persons (
        emp_code      CHAR(6)      NOT NULL PRIMARY KEY,
        name          VARCHAR(100) NOT NULL,
        role          VARCHAR(10)  NOT NULL CHECK (role IN ('employee', 'head')),
        department    VARCHAR(100) NOT NULL,
        designation   VARCHAR(100) NOT NULL DEFAULT '',
        post          VARCHAR(100) NOT NULL DEFAULT '',
        dept_id       CHAR(4)      NOT NULL,
        join_date     DATE         NOT NULL,
        relieve_date  DATE         NULL,
        leave_balance INT          NOT NULL,
        live_status   VARCHAR(10)  NOT NULL DEFAULT 'live'
                      CHECK (live_status IN ('live', 'longleave')),
        password_hash VARCHAR(255) NOT NULL,
        created_by_hr VARCHAR(100) NOT NULL,
        INDEX idx_persons_dept (dept_id),
        FOREIGN KEY (dept_id) REFERENCES departments (dept_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_requests (
        id            BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        emp_code      CHAR(6)      NOT NULL,
        from_date     DATE         NOT NULL,
        to_date       DATE         NOT NULL,
        days          INT          NOT NULL,
        reason        TEXT         NOT NULL,
        leave_type    VARCHAR(10)  NOT NULL,
        status        VARCHAR(10)  NOT NULL DEFAULT 'pending'
                      CHECK (status IN ('pending', 'approved', 'rejected', 'cancelled')),
        is_lop        BOOLEAN      NOT NULL DEFAULT FALSE,
        is_long_leave BOOLEAN      NOT NULL DEFAULT FALSE,
        INDEX idx_leave_owner (emp_code, status),
        FOREIGN KEY (emp_code) REFERENCES persons (emp_code)
    )
    "#,
];

/// Creates any missing table. Existing tables are left as they are.
pub async fn ensure_schema(pool: &MySqlPool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to create schema")?;
    }
    info!("Schema ready");
    Ok(())
}
