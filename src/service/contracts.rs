use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::error::HrResult;
use crate::model::contract::{Contract, ContractType};
use crate::service::{clock::Clock, newest_first};
use crate::store::DocumentStore;
use crate::utils::validation::require;

const ACTIVE: &str = "active";

#[derive(Debug, Clone)]
pub struct NewContract {
    pub employee_id: String,
    pub contract_type: ContractType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub signed_by: String,
}

#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    pub employee_id: Option<String>,
    pub contract_type: Option<ContractType>,
}

pub fn add(
    store: &dyn DocumentStore,
    clock: &dyn Clock,
    contract: NewContract,
) -> HrResult<Contract> {
    require("employee_id", &contract.employee_id)?;
    require("signed_by", &contract.signed_by)?;

    let mut dataset = store.read_all()?;

    let entry = Contract {
        id: Uuid::new_v4().to_string(),
        employee_id: contract.employee_id,
        contract_type: contract.contract_type,
        start_date: contract.start_date,
        end_date: contract.end_date,
        signed_by: contract.signed_by,
        status: ACTIVE.to_string(),
        created_at: clock.now(),
    };

    dataset.contracts.push(entry.clone());
    store.write_all(&dataset)?;

    info!(contract_id = %entry.id, employee_id = %entry.employee_id, contract_type = %entry.contract_type, "Contract added");
    Ok(entry)
}

pub fn list(store: &dyn DocumentStore, filter: &ContractFilter) -> HrResult<Vec<Contract>> {
    let dataset = store.read_all()?;

    let mut contracts: Vec<_> = dataset
        .contracts
        .into_iter()
        .filter(|c| {
            filter
                .employee_id
                .as_deref()
                .is_none_or(|id| c.employee_id == id)
                && filter.contract_type.is_none_or(|t| c.contract_type == t)
        })
        .collect();
    newest_first(&mut contracts, |c| c.created_at);

    Ok(contracts)
}
