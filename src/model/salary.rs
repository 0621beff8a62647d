use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SalaryStatus {
    #[default]
    Paid,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "8e1f0c3a-6a3e-4c0f-9a77-2b0d1c4e5f60",
        "employee_id": "E1",
        "amount": 350000.0,
        "month": "2025-01",
        "paid_by": "ACC1",
        "status": "paid",
        "created_at": "2025-01-31T10:00:00Z"
    })
)]
pub struct SalaryRecord {
    pub id: String,
    pub employee_id: String,
    pub amount: f64,
    /// Free-form payroll period label, e.g. `2025-01`
    pub month: String,
    pub paid_by: String,
    pub status: SalaryStatus,
    #[schema(format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
