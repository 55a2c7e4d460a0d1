//! Payroll entries

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::SalaryStatus;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::auth::OwnerScope;

/// Named amounts, e.g. `{"transport": 200}`
pub type Components = BTreeMap<String, Decimal>;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Salary {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub basic_salary: Decimal,
    pub allowances: Value,
    pub deductions: Value,
    pub net_salary: Decimal,
    pub period: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Payroll row with the employee's name, code and contact
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Payslip {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub salary: Salary,
    pub full_name: Option<String>,
    pub emp_code: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSalary {
    pub employee_id: Uuid,
    pub basic_salary: Decimal,
    #[serde(default)]
    pub allowances: Components,
    #[serde(default)]
    pub deductions: Components,
    pub period: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalaryFilter {
    pub period: Option<String>,
    pub status: Option<String>,
    pub employee_id: Option<Uuid>,
}

const SELECT_PAYSLIP: &str = "SELECT s.*, e.full_name, e.employee_id AS emp_code, e.department, e.phone
     FROM salary_payroll s LEFT JOIN employees e ON s.employee_id = e.id";

/// Largest magnitude a `NUMERIC(12, 2)` amount column holds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

fn in_range(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// `basic + Σ allowances − Σ deductions`
///
/// `None` when any amount, or the result, does not fit the amount columns.
pub fn net_salary(basic: Decimal, allowances: &Components, deductions: &Components) -> Option<Decimal> {
    let amounts_fit = std::iter::once(&basic)
        .chain(allowances.values())
        .chain(deductions.values())
        .all(|amount| in_range(*amount));
    if !amounts_fit {
        return None;
    }

    let gross = allowances
        .values()
        .try_fold(basic, |acc, amount| acc.checked_add(*amount))?;
    let net = deductions
        .values()
        .try_fold(gross, |acc, amount| acc.checked_sub(*amount))?;
    in_range(net).then_some(net)
}

/// Insert a payroll row; `net` comes from [`net_salary`]
pub async fn create(pool: &PgPool, data: &NewSalary, net: Decimal) -> Result<Salary, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO salary_payroll (employee_id, basic_salary, allowances, deductions, net_salary, period)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(data.employee_id)
    .bind(data.basic_salary)
    .bind(Json(&data.allowances))
    .bind(Json(&data.deductions))
    .bind(net)
    .bind(&data.period)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    scope: OwnerScope,
    filter: &SalaryFilter,
) -> Result<Vec<Payslip>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_PAYSLIP);
    qb.push(" WHERE TRUE");
    scope.push_predicate(&mut qb, "s.employee_id");
    if let Some(period) = &filter.period {
        qb.push(" AND s.period = ").push_bind(period.clone());
    }
    if let Some(status) = &filter.status {
        qb.push(" AND s.status = ").push_bind(status.clone());
    }
    qb.push(" ORDER BY s.created_at DESC");

    qb.build_query_as().fetch_all(pool).await
}

/// One payslip, only if it falls inside `scope`
pub async fn find_visible(
    pool: &PgPool,
    id: Uuid,
    scope: OwnerScope,
) -> Result<Option<Payslip>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_PAYSLIP);
    qb.push(" WHERE s.id = ").push_bind(id);
    scope.push_predicate(&mut qb, "s.employee_id");

    qb.build_query_as().fetch_optional(pool).await
}

pub async fn set_status(
    pool: &PgPool,
    id: Uuid,
    status: SalaryStatus,
) -> Result<Option<Salary>, sqlx::Error> {
    sqlx::query_as("UPDATE salary_payroll SET status = $1 WHERE id = $2 RETURNING *")
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(pairs: &[(&str, i64)]) -> Components {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Decimal::new(*v, 0)))
            .collect()
    }

    #[test]
    fn test_net_salary() {
        let net = net_salary(
            Decimal::new(500000, 2),
            &components(&[("transport", 200), ("meal", 150)]),
            &components(&[("cpf", 1000)]),
        );
        assert_eq!(net, Some(Decimal::new(435000, 2)));
    }

    #[test]
    fn test_net_salary_without_components() {
        let basic = Decimal::new(320050, 2);
        assert_eq!(net_salary(basic, &Components::new(), &Components::new()), Some(basic));
    }

    #[test]
    fn test_max_amount_matches_column_precision() {
        assert_eq!(MAX_AMOUNT, Decimal::new(999_999_999_999, 2));
    }

    #[test]
    fn test_decimal_overflow_is_rejected() {
        let payload = serde_json::json!({
            "employee_id": Uuid::new_v4(),
            "basic_salary": "79228162514264337593543950335",
            "allowances": { "bonus": "1" },
            "period": "2025-03",
        });
        let req: NewSalary = serde_json::from_value(payload).unwrap();
        assert_eq!(net_salary(req.basic_salary, &req.allowances, &req.deductions), None);
    }

    #[test]
    fn test_amounts_beyond_column_are_rejected() {
        let top = MAX_AMOUNT;
        assert_eq!(net_salary(top, &Components::new(), &Components::new()), Some(top));
        assert_eq!(
            net_salary(top, &components(&[("bonus", 1)]), &Components::new()),
            None
        );
        assert_eq!(
            net_salary(Decimal::ZERO, &Components::new(), &[("fine".to_string(), top + Decimal::ONE)].into()),
            None
        );
        assert_eq!(
            net_salary(Decimal::ZERO, &Components::new(), &components(&[("advance", 100)])),
            Some(Decimal::new(-100, 0))
        );
    }

    #[test]
    fn test_detail_query_is_scoped() {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_PAYSLIP);
        qb.push(" WHERE s.id = ").push_bind(Uuid::new_v4());
        OwnerScope::Owner(Uuid::new_v4()).push_predicate(&mut qb, "s.employee_id");
        assert!(qb.sql().ends_with("WHERE s.id = $1 AND s.employee_id = $2"));
    }
}
