use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Staff roster entry. Fields beyond the filterable ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub branch: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub status: String,

    #[serde(flatten)]
    pub profile: Map<String, Value>,
}
