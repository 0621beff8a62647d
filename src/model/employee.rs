use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "lx2k9f3ab12cd",
        "name": "Jean Uwase",
        "email": "jean.uwase@ayateke.com",
        "tel": "+250788000111",
        "address": "Kigali",
        "gender": "female",
        "role": "Accountant",
        "branch": "Kigali",
        "education": "BSc Finance",
        "work_experience": "4 years",
        "documents": []
    })
)]
pub struct Employee {
    pub id: String,

    #[schema(example = "Jean Uwase")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "jean.uwase@ayateke.com")]
    pub email: String,

    #[serde(default)]
    #[schema(example = "+250788000111")]
    pub tel: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    #[schema(example = "Accountant")]
    pub role: String,

    #[serde(default)]
    #[schema(example = "Kigali")]
    pub branch: String,

    #[serde(default)]
    pub education: String,

    #[serde(default)]
    pub work_experience: String,

    #[serde(default)]
    pub documents: Vec<EmployeeDocument>,
}

/// Metadata of a document attached to an employee file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDocument {
    pub id: String,

    #[schema(example = "National ID")]
    pub name: String,

    #[serde(rename = "type")]
    #[schema(example = "pdf")]
    pub doc_type: String,

    #[schema(example = "2025-01-01T06:00:00Z", format = "date-time", value_type = String)]
    pub uploaded_at: DateTime<Utc>,
}
