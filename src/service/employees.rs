use tracing::info;
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::model::employee::{Employee, EmployeeDocument};
use crate::service::clock::Clock;
use crate::store::DocumentStore;
use crate::utils::validation::require;

/// Profile fields accepted on create and update; `None` leaves a field as it is
/// (or empty on create).
#[derive(Debug, Clone, Default)]
pub struct EmployeeFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tel: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
    pub branch: Option<String>,
    pub education: Option<String>,
    pub work_experience: Option<String>,
}

impl EmployeeFields {
    fn apply(self, employee: &mut Employee) {
        let targets = [
            (self.name, &mut employee.name),
            (self.email, &mut employee.email),
            (self.tel, &mut employee.tel),
            (self.address, &mut employee.address),
            (self.gender, &mut employee.gender),
            (self.role, &mut employee.role),
            (self.branch, &mut employee.branch),
            (self.education, &mut employee.education),
            (self.work_experience, &mut employee.work_experience),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

fn not_found() -> HrError {
    HrError::NotFound("Employee not found".to_string())
}

pub fn list(store: &dyn DocumentStore) -> HrResult<Vec<Employee>> {
    Ok(store.read_all()?.employees)
}

/// Rewrites the document so the collection exists on disk, then lists it.
pub fn init(store: &dyn DocumentStore) -> HrResult<Vec<Employee>> {
    let dataset = store.read_all()?;
    store.write_all(&dataset)?;
    Ok(dataset.employees)
}

pub fn get(store: &dyn DocumentStore, id: &str) -> HrResult<Employee> {
    store
        .read_all()?
        .employees
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(not_found)
}

pub fn add(store: &dyn DocumentStore, fields: EmployeeFields) -> HrResult<Employee> {
    require("name", fields.name.as_deref().unwrap_or_default())?;

    let mut dataset = store.read_all()?;

    let mut employee = Employee {
        id: Uuid::new_v4().to_string(),
        name: String::new(),
        email: String::new(),
        tel: String::new(),
        address: String::new(),
        gender: String::new(),
        role: String::new(),
        branch: String::new(),
        education: String::new(),
        work_experience: String::new(),
        documents: Vec::new(),
    };
    fields.apply(&mut employee);

    dataset.employees.push(employee.clone());
    store.write_all(&dataset)?;

    info!(employee_id = %employee.id, "Employee added");
    Ok(employee)
}

pub fn update(store: &dyn DocumentStore, id: &str, fields: EmployeeFields) -> HrResult<Employee> {
    let mut dataset = store.read_all()?;
    let employee = dataset
        .employees
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(not_found)?;

    fields.apply(employee);
    let employee = employee.clone();

    store.write_all(&dataset)?;

    info!(employee_id = id, "Employee updated");
    Ok(employee)
}

/// Employees are removed outright; their attendance and leave stay behind.
pub fn remove(store: &dyn DocumentStore, id: &str) -> HrResult<Employee> {
    let mut dataset = store.read_all()?;
    let index = dataset
        .employees
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(not_found)?;

    let removed = dataset.employees.remove(index);
    store.write_all(&dataset)?;

    info!(employee_id = id, "Employee deleted");
    Ok(removed)
}

pub fn add_document(
    store: &dyn DocumentStore,
    clock: &dyn Clock,
    id: &str,
    name: String,
    doc_type: Option<String>,
) -> HrResult<Vec<EmployeeDocument>> {
    let mut dataset = store.read_all()?;
    let employee = dataset
        .employees
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(not_found)?;

    employee.documents.push(EmployeeDocument {
        id: Uuid::new_v4().to_string(),
        name,
        doc_type: doc_type.unwrap_or_else(|| "Unknown".to_string()),
        uploaded_at: clock.now(),
    });
    let documents = employee.documents.clone();

    store.write_all(&dataset)?;

    info!(employee_id = id, count = documents.len(), "Document attached");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::clock::SteppingClock;
    use crate::store::MemoryStore;

    fn named(name: &str) -> EmployeeFields {
        EmployeeFields {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn add_fills_missing_fields_with_empty_text() {
        let store = MemoryStore::seeded();
        let employee = add(&store, EmployeeFields {
            branch: Some("Kirehe".into()),
            ..named("Jean")
        })
        .unwrap();

        assert_eq!(employee.name, "Jean");
        assert_eq!(employee.branch, "Kirehe");
        assert_eq!(employee.email, "");
        assert!(employee.documents.is_empty());
        assert_eq!(get(&store, &employee.id).unwrap(), employee);
    }

    #[test]
    fn add_requires_a_name() {
        let store = MemoryStore::seeded();
        assert!(matches!(add(&store, EmployeeFields::default()), Err(HrError::Validation(_))));
    }

    #[test]
    fn update_changes_only_the_given_fields() {
        let store = MemoryStore::seeded();
        let employee = add(&store, EmployeeFields {
            email: Some("jean@ayateke.com".into()),
            ..named("Jean")
        })
        .unwrap();

        let updated = update(&store, &employee.id, EmployeeFields {
            role: Some("Accountant".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(updated.role, "Accountant");
        assert_eq!(updated.email, "jean@ayateke.com");
        assert_eq!(updated.name, "Jean");
    }

    #[test]
    fn remove_deletes_and_then_reports_not_found() {
        let store = MemoryStore::seeded();
        let employee = add(&store, named("Jean")).unwrap();

        assert_eq!(remove(&store, &employee.id).unwrap().id, employee.id);
        assert!(list(&store).unwrap().is_empty());
        assert!(matches!(remove(&store, &employee.id), Err(HrError::NotFound(_))));
    }

    #[test]
    fn documents_default_their_type() {
        let store = MemoryStore::seeded();
        let clock = SteppingClock::starting_at("2025-01-01T06:00:00Z");
        let employee = add(&store, named("Jean")).unwrap();

        add_document(&store, &clock, &employee.id, "CV".into(), None).unwrap();
        let docs = add_document(&store, &clock, &employee.id, "ID".into(), Some("pdf".into())).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].doc_type, "Unknown");
        assert_eq!(docs[1].doc_type, "pdf");
        assert!(matches!(
            add_document(&store, &clock, "missing", "CV".into(), None),
            Err(HrError::NotFound(_))
        ));
    }
}
