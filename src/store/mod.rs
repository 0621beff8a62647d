//! Whole-document storage.
//!
//! Every operation reads the full [`Dataset`], mutates it in memory and writes the full
//! dataset back. There is no locking between the read and the write: two concurrent
//! writers both start from the same snapshot and the last write wins.

mod json_file;
mod memory;

use std::io;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{
    attendance::AttendanceRecord, branch::Branch, contract::Contract, employee::Employee,
    leave_request::LeaveRequest, salary::SalaryRecord, staff::StaffMember, user::UserAccount,
};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// All collections of the HR document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dataset {
    pub users: Vec<UserAccount>,
    pub employees: Vec<Employee>,
    pub staff: Vec<StaffMember>,
    pub branches: Vec<Branch>,
    pub contracts: Vec<Contract>,
    pub salaries: Vec<SalaryRecord>,
    pub attendance_records: Vec<AttendanceRecord>,
    pub leave_requests: Vec<LeaveRequest>,

    /// Collections this service does not model, written back untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Dataset {
    /// Contents of a freshly created document.
    pub fn seeded() -> Self {
        Self {
            users: vec![
                UserAccount::new("admin@ayateke.com", "admin123", "admin"),
                UserAccount::new("staff@ayateke.com", "staff123", "staff"),
            ],
            ..Self::default()
        }
    }
}

pub trait DocumentStore: Send + Sync {
    fn read_all(&self) -> StoreResult<Dataset>;
    fn write_all(&self, dataset: &Dataset) -> StoreResult<()>;
}

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "Store I/O failed: {}", _0)]
    Io(io::Error),

    #[display(fmt = "Store document is malformed: {}", _0)]
    Serialization(serde_json::Error),

    /// A writer panicked while holding the in-memory document
    #[display(fmt = "Store lock poisoned")]
    Poisoned,

    /// The blocking pool running store calls is gone
    #[display(fmt = "Store worker unavailable")]
    Unavailable,
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::Poisoned | Self::Unavailable => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
