use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The fixed set of operating branches.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, EnumIter, Display, AsRefStr, ToSchema,
)]
pub enum BranchName {
    Gatsibo,
    Kirehe,
    Kigali,
}

/// Per-branch role tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum BranchTable {
    #[strum(serialize = "staff")]
    Staff,
    #[strum(serialize = "schemeManagers")]
    SchemeManagers,
    #[strum(serialize = "plumbers")]
    Plumbers,
}

/// Role slots every branch is seeded with.
pub const STAFF_ROLES: [&str; 5] = [
    "Branch Manager",
    "Managing Director",
    "Human Resource",
    "Director Administrative of Finance",
    "Accountant",
];

/// Row of any branch table; `role` is only carried by `staff` rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BranchEntry {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Accountant", nullable = true)]
    pub role: Option<String>,

    #[serde(default)]
    #[schema(example = "Eric Mugisha")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[schema(example = "Kigali")]
    pub branch: BranchName,

    #[serde(default)]
    pub staff: Vec<BranchEntry>,

    #[serde(default)]
    pub scheme_managers: Vec<BranchEntry>,

    #[serde(default)]
    pub plumbers: Vec<BranchEntry>,
}

impl Branch {
    pub fn empty(branch: BranchName) -> Self {
        Self {
            branch,
            staff: Vec::new(),
            scheme_managers: Vec::new(),
            plumbers: Vec::new(),
        }
    }

    pub fn table(&self, table: BranchTable) -> &Vec<BranchEntry> {
        match table {
            BranchTable::Staff => &self.staff,
            BranchTable::SchemeManagers => &self.scheme_managers,
            BranchTable::Plumbers => &self.plumbers,
        }
    }

    pub fn table_mut(&mut self, table: BranchTable) -> &mut Vec<BranchEntry> {
        match table {
            BranchTable::Staff => &mut self.staff,
            BranchTable::SchemeManagers => &mut self.scheme_managers,
            BranchTable::Plumbers => &mut self.plumbers,
        }
    }
}
