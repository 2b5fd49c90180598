use chrono::NaiveDate;
use sqlx::{FromRow, MySql, MySqlPool, Transaction};

use crate::error::LeaveError;
use crate::model::department::Department;
use crate::model::hr::HrAccount;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveWithOwner, NewLeave};
use crate::model::person::{PersonDetailsUpdate, PersonRecord, PersonUpdate};
use crate::store::{LeaveStore, StoreTx};

const PERSON_COLUMNS: &str = "emp_code, name, role, department, designation, post, dept_id, \
     join_date, relieve_date, leave_balance, live_status, password_hash, created_by_hr";

const LEAVE_COLUMNS: &str = "l.id, l.emp_code, l.from_date, l.to_date, l.days, l.reason, \
     l.leave_type, l.status, l.is_lop, l.is_long_leave";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

pub struct MySqlTx {
    tx: Transaction<'static, MySql>,
}

impl LeaveStore for MySqlStore {
    type Tx = MySqlTx;

    async fn begin(&self) -> Result<MySqlTx, LeaveError> {
        Ok(MySqlTx {
            tx: self.pool.begin().await?,
        })
    }
}

// Stored enums are plain VARCHAR columns.
fn decode<T>(column: &str, raw: &str) -> Result<T, LeaveError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>().map_err(|e| {
        tracing::error!(column, value = raw, "Unexpected enum value in store");
        LeaveError::Persistence(sqlx::Error::Decode(Box::new(e)))
    })
}

/// MySQL reports duplicate keys as SQLSTATE 23000.
fn on_duplicate(e: sqlx::Error, message: &str) -> LeaveError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some("23000") {
            return LeaveError::Conflict(message.to_string());
        }
    }
    LeaveError::Persistence(e)
}

#[derive(FromRow)]
struct PersonRow {
    emp_code: String,
    name: String,
    role: String,
    department: String,
    designation: String,
    post: String,
    dept_id: String,
    join_date: NaiveDate,
    relieve_date: Option<NaiveDate>,
    leave_balance: i32,
    live_status: String,
    password_hash: String,
    created_by_hr: String,
}

impl TryFrom<PersonRow> for PersonRecord {
    type Error = LeaveError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        Ok(PersonRecord {
            role: decode("role", &row.role)?,
            live_status: decode("live_status", &row.live_status)?,
            emp_code: row.emp_code,
            name: row.name,
            department: row.department,
            designation: row.designation,
            post: row.post,
            dept_id: row.dept_id,
            join_date: row.join_date,
            relieve_date: row.relieve_date,
            leave_balance: row.leave_balance,
            password_hash: row.password_hash,
            created_by_hr: row.created_by_hr,
        })
    }
}

#[derive(FromRow)]
struct LeaveRow {
    id: u64,
    emp_code: String,
    from_date: NaiveDate,
    to_date: NaiveDate,
    days: i32,
    reason: String,
    leave_type: String,
    status: String,
    is_lop: bool,
    is_long_leave: bool,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = LeaveError;

    fn try_from(row: LeaveRow) -> Result<Self, Self::Error> {
        Ok(LeaveRequest {
            leave_type: decode("leave_type", &row.leave_type)?,
            status: decode("status", &row.status)?,
            id: row.id,
            emp_code: row.emp_code,
            from_date: row.from_date,
            to_date: row.to_date,
            days: row.days,
            reason: row.reason,
            is_lop: row.is_lop,
            is_long_leave: row.is_long_leave,
        })
    }
}

#[derive(FromRow)]
struct LeaveOwnerRow {
    #[sqlx(flatten)]
    leave: LeaveRow,
    owner_name: String,
    department: String,
    join_date: NaiveDate,
}

fn into_leaves(rows: Vec<LeaveRow>) -> Result<Vec<LeaveRequest>, LeaveError> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

impl StoreTx for MySqlTx {
    async fn get_person(&mut self, emp_code: &str) -> Result<PersonRecord, LeaveError> {
        let sql = format!("SELECT {PERSON_COLUMNS} FROM persons WHERE emp_code = ? FOR UPDATE");
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(emp_code)
            .fetch_optional(&mut *self.tx)
            .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(LeaveError::NotFound(format!("person {emp_code}"))),
        }
    }

    async fn insert_person(&mut self, person: &PersonRecord) -> Result<(), LeaveError> {
        let sql = format!(
            "INSERT INTO persons ({PERSON_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );
        sqlx::query(&sql)
            .bind(&person.emp_code)
            .bind(&person.name)
            .bind(person.role.as_str())
            .bind(&person.department)
            .bind(&person.designation)
            .bind(&person.post)
            .bind(&person.dept_id)
            .bind(person.join_date)
            .bind(person.relieve_date)
            .bind(person.leave_balance)
            .bind(person.live_status.as_str())
            .bind(&person.password_hash)
            .bind(&person.created_by_hr)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                on_duplicate(e, &format!("Employee code {} already exists", person.emp_code))
            })?;
        Ok(())
    }

    async fn update_person(
        &mut self,
        emp_code: &str,
        update: &PersonUpdate,
    ) -> Result<(), LeaveError> {
        if update.is_empty() {
            return Ok(());
        }
        sqlx::query(
            r#"
            UPDATE persons
            SET leave_balance = COALESCE(?, leave_balance),
                live_status = COALESCE(?, live_status)
            WHERE emp_code = ?
            "#,
        )
        .bind(update.leave_balance)
        .bind(update.live_status.map(|s| s.as_str()))
        .bind(emp_code)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn update_person_details(
        &mut self,
        emp_code: &str,
        update: &PersonDetailsUpdate,
    ) -> Result<(), LeaveError> {
        sqlx::query(
            r#"
            UPDATE persons
            SET name = COALESCE(?, name),
                department = COALESCE(?, department),
                designation = COALESCE(?, designation),
                post = COALESCE(?, post),
                relieve_date = COALESCE(?, relieve_date)
            WHERE emp_code = ?
            "#,
        )
        .bind(update.name.as_deref())
        .bind(update.department.as_deref())
        .bind(update.designation.as_deref())
        .bind(update.post.as_deref())
        .bind(update.relieve_date)
        .bind(emp_code)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn set_password(
        &mut self,
        emp_code: &str,
        password_hash: &str,
    ) -> Result<(), LeaveError> {
        sqlx::query("UPDATE persons SET password_hash = ? WHERE emp_code = ?")
            .bind(password_hash)
            .bind(emp_code)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn delete_person(&mut self, emp_code: &str) -> Result<(), LeaveError> {
        let result = sqlx::query("DELETE FROM persons WHERE emp_code = ?")
            .bind(emp_code)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(LeaveError::NotFound(format!("person {emp_code}")));
        }
        Ok(())
    }

    async fn get_department(&mut self, dept_id: &str) -> Result<Department, LeaveError> {
        sqlx::query_as::<_, Department>(
            "SELECT dept_id, dept_name, head_emp_code FROM departments WHERE dept_id = ? FOR UPDATE",
        )
        .bind(dept_id)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| LeaveError::NotFound(format!("department {dept_id}")))
    }

    async fn insert_department(&mut self, department: &Department) -> Result<(), LeaveError> {
        sqlx::query("INSERT INTO departments (dept_id, dept_name, head_emp_code) VALUES (?, ?, ?)")
            .bind(&department.dept_id)
            .bind(&department.dept_name)
            .bind(department.head_emp_code.as_deref())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| {
                on_duplicate(e, &format!("Department {} already exists", department.dept_id))
            })?;
        Ok(())
    }

    async fn rename_department(
        &mut self,
        dept_id: &str,
        dept_name: &str,
    ) -> Result<(), LeaveError> {
        sqlx::query("UPDATE departments SET dept_name = ? WHERE dept_id = ?")
            .bind(dept_name)
            .bind(dept_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn set_department_head(
        &mut self,
        dept_id: &str,
        head_emp_code: Option<&str>,
    ) -> Result<(), LeaveError> {
        sqlx::query("UPDATE departments SET head_emp_code = ? WHERE dept_id = ?")
            .bind(head_emp_code)
            .bind(dept_id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn count_department_members(&mut self, dept_id: &str) -> Result<i64, LeaveError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM persons WHERE dept_id = ?")
            .bind(dept_id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(count)
    }

    async fn delete_department(&mut self, dept_id: &str) -> Result<(), LeaveError> {
        let result = sqlx::query("DELETE FROM departments WHERE dept_id = ?")
            .bind(dept_id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(LeaveError::NotFound(format!("department {dept_id}")));
        }
        Ok(())
    }

    async fn insert_hr(&mut self, hr: &HrAccount) -> Result<(), LeaveError> {
        sqlx::query(
            r#"
            INSERT INTO hr_accounts (hr_id, name, designation, username, password_hash)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&hr.hr_id)
        .bind(&hr.name)
        .bind(&hr.designation)
        .bind(&hr.username)
        .bind(&hr.password_hash)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| on_duplicate(e, "HR ID or Username already exists"))?;
        Ok(())
    }

    async fn find_hr_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<HrAccount>, LeaveError> {
        let hr = sqlx::query_as::<_, HrAccount>(
            r#"
            SELECT hr_id, name, designation, username, password_hash
            FROM hr_accounts
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(hr)
    }

    async fn create_leave(&mut self, leave: &NewLeave) -> Result<u64, LeaveError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (emp_code, from_date, to_date, days, reason, leave_type, status, is_lop, is_long_leave)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&leave.emp_code)
        .bind(leave.from_date)
        .bind(leave.to_date)
        .bind(leave.days)
        .bind(&leave.reason)
        .bind(leave.leave_type.as_str())
        .bind(LeaveStatus::Pending.as_str())
        .bind(leave.is_lop)
        .bind(leave.is_long_leave)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.last_insert_id())
    }

    async fn get_leave(&mut self, id: u64) -> Result<LeaveRequest, LeaveError> {
        let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests l WHERE l.id = ? FOR UPDATE");
        let row = sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(LeaveError::NotFound(format!("leave {id}"))),
        }
    }

    async fn update_leave_status(
        &mut self,
        id: u64,
        from: LeaveStatus,
        to: LeaveStatus,
    ) -> Result<(), LeaveError> {
        let result = sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ? AND status = ?")
            .bind(to.as_str())
            .bind(id)
            .bind(from.as_str())
            .execute(&mut *self.tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LeaveError::InvalidTransition { id, from, to });
        }
        Ok(())
    }

    async fn sum_approved_days_in_month(
        &mut self,
        emp_code: &str,
        month: u32,
    ) -> Result<i32, LeaveError> {
        // SUM over INT yields DECIMAL in MySQL
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT CAST(COALESCE(SUM(days), 0) AS SIGNED)
            FROM leave_requests
            WHERE emp_code = ?
            AND MONTH(from_date) = ?
            AND status = 'approved'
            "#,
        )
        .bind(emp_code)
        .bind(month)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(i32::try_from(total).unwrap_or(i32::MAX))
    }

    async fn list_pending_for_department(
        &mut self,
        dept_id: &str,
    ) -> Result<Vec<LeaveRequest>, LeaveError> {
        let sql = format!(
            r#"
            SELECT {LEAVE_COLUMNS}
            FROM leave_requests l
            JOIN persons p ON p.emp_code = l.emp_code
            WHERE l.status = 'pending' AND p.dept_id = ?
            ORDER BY l.from_date, l.id
            "#
        );
        let rows = sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(dept_id)
            .fetch_all(&mut *self.tx)
            .await?;
        into_leaves(rows)
    }

    async fn list_leaves_for(&mut self, emp_code: &str) -> Result<Vec<LeaveRequest>, LeaveError> {
        let sql = format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests l WHERE l.emp_code = ? ORDER BY l.id"
        );
        let rows = sqlx::query_as::<_, LeaveRow>(&sql)
            .bind(emp_code)
            .fetch_all(&mut *self.tx)
            .await?;
        into_leaves(rows)
    }

    async fn delete_leaves_for(&mut self, emp_code: &str) -> Result<(), LeaveError> {
        sqlx::query("DELETE FROM leave_requests WHERE emp_code = ?")
            .bind(emp_code)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn list_leaves_with_owner(&mut self) -> Result<Vec<LeaveWithOwner>, LeaveError> {
        let sql = format!(
            r#"
            SELECT {LEAVE_COLUMNS}, p.name AS owner_name, p.department, p.join_date
            FROM leave_requests l
            JOIN persons p ON p.emp_code = l.emp_code
            ORDER BY l.status, l.from_date DESC
            "#
        );
        let rows = sqlx::query_as::<_, LeaveOwnerRow>(&sql)
            .fetch_all(&mut *self.tx)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(LeaveWithOwner {
                    leave: row.leave.try_into()?,
                    owner_name: row.owner_name,
                    department: row.department,
                    join_date: row.join_date,
                })
            })
            .collect()
    }

    async fn commit(self) -> Result<(), LeaveError> {
        self.tx.commit().await?;
        Ok(())
    }
}
