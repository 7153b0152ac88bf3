use crate::db::employees::{find_employee, insert_employee, load_employees, update_timezone};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use crate::utils::tz::parse_tz;

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn add(
        pool: &mut DbPool,
        name: &str,
        timezone: Option<&str>,
        company_id: i64,
    ) -> AppResult<Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("Employee name is required.".into()));
        }

        let tz = match timezone {
            Some(t) => Some(parse_tz(t)?.name().to_string()),
            None => None,
        };

        let id = insert_employee(&pool.conn, name, company_id, tz.as_deref())?;
        ttlog(&pool.conn, "employee_add", name, &format!("Employee {id} created"))?;

        Self::get(pool, id)
    }

    /// Change (or clear, with `None`) the employee's timezone.
    pub fn set_timezone(pool: &mut DbPool, id: i64, timezone: Option<&str>) -> AppResult<Employee> {
        let tz = match timezone {
            Some(t) => Some(parse_tz(t)?.name().to_string()),
            None => None,
        };

        if update_timezone(&pool.conn, id, tz.as_deref())? == 0 {
            return Err(AppError::NotFound(format!("Employee {id}")));
        }
        ttlog(
            &pool.conn,
            "employee_tz",
            &format!("employee {id}"),
            tz.as_deref().unwrap_or("cleared"),
        )?;

        Self::get(pool, id)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Employee> {
        find_employee(&pool.conn, id)?.ok_or_else(|| AppError::NotFound(format!("Employee {id}")))
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Employee>> {
        load_employees(&pool.conn)
    }
}
