use crate::error::{HrError, HrResult};
use crate::model::staff::StaffMember;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Default)]
pub struct StaffFilter {
    pub branch: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl StaffFilter {
    fn matches(&self, member: &StaffMember) -> bool {
        self.branch.as_deref().is_none_or(|b| member.branch == b)
            && self.role.as_deref().is_none_or(|r| member.role == r)
            && self.status.as_deref().is_none_or(|s| member.status == s)
    }
}

pub fn list(store: &dyn DocumentStore, filter: &StaffFilter) -> HrResult<Vec<StaffMember>> {
    let dataset = store.read_all()?;
    Ok(dataset
        .staff
        .into_iter()
        .filter(|m| filter.matches(m))
        .collect())
}

pub fn get(store: &dyn DocumentStore, id: &str) -> HrResult<StaffMember> {
    let dataset = store.read_all()?;
    dataset
        .staff
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| HrError::NotFound("Staff not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Dataset, MemoryStore};
    use serde_json::json;

    fn roster() -> MemoryStore {
        let staff = json!([
            { "id": "S1", "name": "Alice", "branch": "Kigali", "role": "Plumber", "status": "active" },
            { "id": "S2", "name": "Bob", "branch": "Kirehe", "role": "Plumber", "status": "inactive", "phone": "0788" },
            { "id": "S3", "name": "Claire", "branch": "Kigali", "role": "Accountant", "status": "active" }
        ]);
        let mut dataset = Dataset::seeded();
        dataset.staff = serde_json::from_value(staff).unwrap();
        MemoryStore::new(dataset)
    }

    #[test]
    fn filters_combine() {
        let store = roster();

        let kigali = list(&store, &StaffFilter {
            branch: Some("Kigali".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(kigali.len(), 2);

        let plumbers_active = list(&store, &StaffFilter {
            role: Some("Plumber".into()),
            status: Some("active".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plumbers_active.len(), 1);
        assert_eq!(plumbers_active[0].id, "S1");
    }

    #[test]
    fn extra_profile_fields_are_kept() {
        let store = roster();
        let bob = get(&store, "S2").unwrap();
        assert_eq!(bob.profile["phone"], "0788");
        assert!(matches!(get(&store, "S9"), Err(HrError::NotFound(_))));
    }
}
