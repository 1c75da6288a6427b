//! Employee repository for database operations
//!
//! Read paths only ever return active accounts; deactivated employees are
//! reachable through [`EmployeeRepository::list_inactive`] alone.

use lunch_common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use crate::models::{Employee, NewEmployee};

/// Employee repository
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Create a new employee repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new, active employee; the plaintext password in `new_employee`
    /// is ignored in favour of `hashed_password`
    pub async fn create(
        &self,
        new_employee: &NewEmployee,
        hashed_password: &str,
    ) -> DatabaseResult<Employee> {
        info!("Creating new employee: {}", new_employee.email);

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (firstname, lastname, email, hashed_password, is_active, is_admin)
            VALUES ($1, $2, $3, $4, TRUE, $5)
            RETURNING id, firstname, lastname, email, hashed_password, is_active, is_admin
            "#,
        )
        .bind(&new_employee.firstname)
        .bind(&new_employee.lastname)
        .bind(&new_employee.email)
        .bind(hashed_password)
        .bind(new_employee.is_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Find an active employee by ID
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, firstname, lastname, email, hashed_password, is_active, is_admin
            FROM employees
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Find an active employee by email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, firstname, lastname, email, hashed_password, is_active, is_admin
            FROM employees
            WHERE email = $1 AND is_active
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Find the first active employee with the given name
    pub async fn find_by_name(
        &self,
        firstname: &str,
        lastname: &str,
    ) -> DatabaseResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, firstname, lastname, email, hashed_password, is_active, is_admin
            FROM employees
            WHERE firstname = $1 AND lastname = $2 AND is_active
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(firstname)
        .bind(lastname)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Whether an active account already uses this email
    pub async fn email_in_use(&self, email: &str) -> DatabaseResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// List active employees ordered by ID
    pub async fn list_active(&self, offset: i64, limit: i64) -> DatabaseResult<Vec<Employee>> {
        self.list(true, offset, limit).await
    }

    /// List deactivated employees ordered by ID
    pub async fn list_inactive(&self, offset: i64, limit: i64) -> DatabaseResult<Vec<Employee>> {
        self.list(false, offset, limit).await
    }

    async fn list(&self, active: bool, offset: i64, limit: i64) -> DatabaseResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, firstname, lastname, email, hashed_password, is_active, is_admin
            FROM employees
            WHERE is_active = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(active)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// Persist every mutable column of an employee
    pub async fn update(&self, employee: &Employee) -> DatabaseResult<()> {
        info!("Updating employee {}", employee.id);

        sqlx::query(
            r#"
            UPDATE employees
            SET firstname = $2, lastname = $3, email = $4, hashed_password = $5,
                is_active = $6, is_admin = $7
            WHERE id = $1
            "#,
        )
        .bind(employee.id)
        .bind(&employee.firstname)
        .bind(&employee.lastname)
        .bind(&employee.email)
        .bind(&employee.hashed_password)
        .bind(employee.is_active)
        .bind(employee.is_admin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Soft-delete an employee; returns false when no such row exists
    pub async fn deactivate(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deactivating employee {}", id);

        let result = sqlx::query("UPDATE employees SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
