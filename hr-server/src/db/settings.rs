//! Company settings
//!
//! One row per `(category, setting_key)`. Values are stored JSON-encoded
//! with a `value_type` tag, and decoded back on read.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

/// `{category: {key: value}}`
pub type SettingsMap = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettingRow {
    pub category: String,
    pub setting_key: String,
    pub setting_value: String,
    pub value_type: String,
    pub updated_at: DateTime<Utc>,
}

/// JSON type name stored alongside a value
pub fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Stored text back to JSON; legacy plain strings pass through
fn decode(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn group(rows: Vec<SettingRow>) -> SettingsMap {
    let mut map = SettingsMap::new();
    for row in rows {
        map.entry(row.category)
            .or_default()
            .insert(row.setting_key, decode(&row.setting_value));
    }
    map
}

pub async fn all(pool: &PgPool) -> Result<Vec<SettingRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT category, setting_key, setting_value, value_type, updated_at
         FROM company_settings ORDER BY category, setting_key",
    )
    .fetch_all(pool)
    .await
}

pub async fn by_category(pool: &PgPool, category: &str) -> Result<BTreeMap<String, Value>, sqlx::Error> {
    let rows: Vec<SettingRow> = sqlx::query_as(
        "SELECT category, setting_key, setting_value, value_type, updated_at
         FROM company_settings WHERE category = $1 ORDER BY setting_key",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.setting_key, decode(&row.setting_value)))
        .collect())
}

/// Upsert every key in `settings` in one transaction
pub async fn upsert(pool: &PgPool, settings: &SettingsMap, updated_by: Uuid) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut written = 0;
    for (category, values) in settings {
        for (key, value) in values {
            sqlx::query(
                "INSERT INTO company_settings (category, setting_key, setting_value, value_type, updated_by, updated_at)
                 VALUES ($1, $2, $3, $4, $5, now())
                 ON CONFLICT (category, setting_key)
                 DO UPDATE SET setting_value = EXCLUDED.setting_value,
                               value_type = EXCLUDED.value_type,
                               updated_by = EXCLUDED.updated_by,
                               updated_at = now()",
            )
            .bind(category)
            .bind(key)
            .bind(value.to_string())
            .bind(value_type(value))
            .bind(updated_by)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }
    }
    tx.commit().await?;
    Ok(written)
}

/// Insert the default settings, keeping any key that already exists.
///
/// Returns the number of keys inserted.
pub async fn initialize_defaults(pool: &PgPool, updated_by: Uuid) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for (category, key, value) in defaults() {
        let result = sqlx::query(
            "INSERT INTO company_settings (category, setting_key, setting_value, value_type, updated_by, updated_at)
             VALUES ($1, $2, $3, $4, $5, now())
             ON CONFLICT (category, setting_key) DO NOTHING",
        )
        .bind(category)
        .bind(key)
        .bind(value.to_string())
        .bind(value_type(&value))
        .bind(updated_by)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

fn defaults() -> Vec<(&'static str, &'static str, Value)> {
    vec![
        ("branding", "company_name", json!("Company")),
        ("branding", "company_short_name", json!("CO")),
        ("branding", "company_address", json!("")),
        ("branding", "company_phone", json!("")),
        ("branding", "company_email", json!("")),
        ("branding", "primary_color", json!("#1c2a49")),
        ("branding", "secondary_color", json!("#f0a500")),
        ("leave_policies", "annual_leave_days", json!(14)),
        ("leave_policies", "sick_leave_days", json!(14)),
        ("leave_policies", "medical_leave_days", json!(60)),
        ("leave_policies", "maternity_leave_days", json!(112)),
        ("leave_policies", "paternity_leave_days", json!(14)),
        ("leave_policies", "compassionate_leave_days", json!(3)),
        ("leave_policies", "unpaid_leave_days", json!(30)),
        ("leave_policies", "carry_forward_enabled", json!(true)),
        ("leave_policies", "max_carry_forward_days", json!(5)),
        ("leave_policies", "probation_leave_enabled", json!(false)),
        ("payroll", "pay_cycle", json!("monthly")),
        ("payroll", "pay_day", json!(28)),
        ("payroll", "currency", json!("SGD")),
        ("payroll", "currency_symbol", json!("S$")),
        ("payroll", "cpf_enabled", json!(true)),
        ("payroll", "cpf_employee_rate", json!(20)),
        ("payroll", "cpf_employer_rate", json!(17)),
        ("payroll", "overtime_rate", json!(1.5)),
        ("payroll", "tax_enabled", json!(true)),
        (
            "working_hours",
            "work_days",
            json!(["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
        ),
        ("working_hours", "start_time", json!("09:00")),
        ("working_hours", "end_time", json!("18:00")),
        ("working_hours", "lunch_start", json!("12:00")),
        ("working_hours", "lunch_duration", json!(60)),
        ("working_hours", "flexible_hours", json!(false)),
        ("working_hours", "core_hours_start", json!("10:00")),
        ("working_hours", "core_hours_end", json!("16:00")),
        ("working_hours", "overtime_threshold", json!(44)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, key: &str, value: &str) -> SettingRow {
        SettingRow {
            category: category.into(),
            setting_key: key.into(),
            setting_value: value.into(),
            value_type: "string".into(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_group_decodes_values() {
        let map = group(vec![
            row("payroll", "pay_day", "28"),
            row("payroll", "currency", "\"SGD\""),
            row("branding", "company_name", "plain text"),
        ]);
        assert_eq!(map["payroll"]["pay_day"], json!(28));
        assert_eq!(map["payroll"]["currency"], json!("SGD"));
        assert_eq!(map["branding"]["company_name"], json!("plain text"));
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(value_type(&json!(1.5)), "number");
        assert_eq!(value_type(&json!(true)), "boolean");
        assert_eq!(value_type(&json!(["a"])), "array");
        assert_eq!(value_type(&json!("x")), "string");
    }

    #[test]
    fn test_default_keys_are_unique() {
        let all = defaults();
        let mut keys: Vec<_> = all.iter().map(|(c, k, _)| (*c, *k)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), all.len());
    }
}
