use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContractType {
    Permanent,
    Temporary,
    Intern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contract {
    pub id: String,

    #[schema(example = "E1")]
    pub employee_id: String,

    #[serde(rename = "type")]
    pub contract_type: ContractType,

    #[schema(example = "2025-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2025-12-31", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    #[schema(example = "HR1")]
    pub signed_by: String,

    #[schema(example = "active")]
    pub status: String,

    #[schema(example = "2025-01-01T06:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}
