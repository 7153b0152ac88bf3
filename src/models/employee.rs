use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub timezone: Option<String>, // IANA name, e.g. "Asia/Kolkata"
    pub created_at: String,
}
