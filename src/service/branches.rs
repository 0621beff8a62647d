use std::str::FromStr;

use strum::IntoEnumIterator;
use tracing::info;
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::model::branch::{Branch, BranchEntry, BranchName, BranchTable, STAFF_ROLES};
use crate::store::{Dataset, DocumentStore};

#[derive(Debug, Clone, Default)]
pub struct EntryFields {
    pub role: Option<String>,
    pub name: Option<String>,
}

fn parse_target(branch: &str, table: &str) -> HrResult<(BranchName, BranchTable)> {
    let branch = BranchName::from_str(branch)
        .map_err(|_| HrError::BadRequest("Invalid branch".to_string()))?;
    let table = BranchTable::from_str(table)
        .map_err(|_| HrError::BadRequest("Invalid table name".to_string()))?;
    Ok((branch, table))
}

fn entry_not_found() -> HrError {
    HrError::NotFound("Entry not found".to_string())
}

/// Adds any missing branch with empty tables. Returns whether the dataset changed.
fn ensure_shape(dataset: &mut Dataset) -> bool {
    let mut changed = false;
    for name in BranchName::iter() {
        if !dataset.branches.iter().any(|b| b.branch == name) {
            dataset.branches.push(Branch::empty(name));
            changed = true;
        }
    }
    changed
}

fn branch_mut(dataset: &mut Dataset, name: BranchName) -> &mut Branch {
    if let Some(index) = dataset.branches.iter().position(|b| b.branch == name) {
        return &mut dataset.branches[index];
    }
    dataset.branches.push(Branch::empty(name));
    let last = dataset.branches.len() - 1;
    &mut dataset.branches[last]
}

pub fn init(store: &dyn DocumentStore) -> HrResult<Vec<Branch>> {
    let mut dataset = store.read_all()?;
    ensure_shape(&mut dataset);
    store.write_all(&dataset)?;

    info!(count = dataset.branches.len(), "Branches initialized");
    Ok(dataset.branches)
}

/// Gives every branch one `staff` slot per standard role, with a blank name.
pub fn seed_staff_roles(store: &dyn DocumentStore) -> HrResult<Vec<Branch>> {
    let mut dataset = store.read_all()?;
    ensure_shape(&mut dataset);

    let mut added = 0;
    for branch in &mut dataset.branches {
        for role in STAFF_ROLES {
            if branch.staff.iter().any(|s| s.role.as_deref() == Some(role)) {
                continue;
            }
            branch.staff.push(BranchEntry {
                id: Uuid::new_v4().to_string(),
                role: Some(role.to_string()),
                name: String::new(),
            });
            added += 1;
        }
    }

    store.write_all(&dataset)?;

    info!(added, "Staff roles seeded");
    Ok(dataset.branches)
}

/// Lists branches, filling in missing ones without persisting them.
pub fn list(store: &dyn DocumentStore) -> HrResult<Vec<Branch>> {
    let mut dataset = store.read_all()?;
    ensure_shape(&mut dataset);
    Ok(dataset.branches)
}

pub fn get(store: &dyn DocumentStore, name: &str) -> HrResult<Branch> {
    list(store)?
        .into_iter()
        .find(|b| b.branch.as_ref() == name)
        .ok_or_else(|| HrError::NotFound("Branch not found".to_string()))
}

pub fn add_entry(
    store: &dyn DocumentStore,
    branch: &str,
    table: &str,
    fields: EntryFields,
) -> HrResult<BranchEntry> {
    let (branch, table) = parse_target(branch, table)?;

    let entry = match table {
        BranchTable::Staff => {
            let role = fields
                .role
                .filter(|r| !r.is_empty())
                .ok_or_else(|| HrError::BadRequest("Role is required".to_string()))?;
            BranchEntry {
                id: Uuid::new_v4().to_string(),
                role: Some(role),
                name: fields.name.unwrap_or_default(),
            }
        }
        BranchTable::SchemeManagers | BranchTable::Plumbers => {
            let name = fields
                .name
                .filter(|n| !n.is_empty())
                .ok_or_else(|| HrError::BadRequest("Name is required".to_string()))?;
            BranchEntry {
                id: Uuid::new_v4().to_string(),
                role: None,
                name,
            }
        }
    };

    let mut dataset = store.read_all()?;
    ensure_shape(&mut dataset);
    branch_mut(&mut dataset, branch)
        .table_mut(table)
        .push(entry.clone());
    store.write_all(&dataset)?;

    info!(branch = %branch, table = %table, entry_id = %entry.id, "Branch entry added");
    Ok(entry)
}

/// Only `staff` rows take a role; it is ignored for the other tables.
pub fn update_entry(
    store: &dyn DocumentStore,
    branch: &str,
    table: &str,
    entry_id: &str,
    fields: EntryFields,
) -> HrResult<BranchEntry> {
    let (branch, table) = parse_target(branch, table)?;

    let mut dataset = store.read_all()?;
    ensure_shape(&mut dataset);

    let entry = branch_mut(&mut dataset, branch)
        .table_mut(table)
        .iter_mut()
        .find(|e| e.id == entry_id)
        .ok_or_else(entry_not_found)?;

    if table == BranchTable::Staff {
        if let Some(role) = fields.role {
            entry.role = Some(role);
        }
    }
    if let Some(name) = fields.name {
        entry.name = name;
    }
    let entry = entry.clone();

    store.write_all(&dataset)?;

    info!(branch = %branch, table = %table, entry_id, "Branch entry updated");
    Ok(entry)
}

pub fn delete_entry(
    store: &dyn DocumentStore,
    branch: &str,
    table: &str,
    entry_id: &str,
) -> HrResult<BranchEntry> {
    let (branch, table) = parse_target(branch, table)?;

    let mut dataset = store.read_all()?;
    ensure_shape(&mut dataset);

    let rows = branch_mut(&mut dataset, branch).table_mut(table);
    let index = rows
        .iter()
        .position(|e| e.id == entry_id)
        .ok_or_else(entry_not_found)?;
    let removed = rows.remove(index);

    store.write_all(&dataset)?;

    info!(branch = %branch, table = %table, entry_id, "Branch entry deleted");
    Ok(removed)
}
