//! Leave workflow: submission, review decisions with an audit trail, and
//! soft deletion. Requests are never physically removed.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, StatusChange};
use crate::service::{clock::Clock, newest_first};
use crate::store::DocumentStore;
use crate::utils::validation::require;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub submitted_by: String,
}

#[derive(Debug, Clone, Default)]
pub struct LeaveFilter {
    pub employee_id: Option<String>,
    pub status: Option<LeaveStatus>,
}

impl LeaveFilter {
    fn matches(&self, request: &LeaveRequest) -> bool {
        self.employee_id
            .as_deref()
            .is_none_or(|id| request.employee_id == id)
            && self.status.is_none_or(|s| request.status == s)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeavePage {
    /// Matching requests before pagination
    #[schema(example = 15)]
    pub total: usize,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub limit: u32,
    pub data: Vec<LeaveRequest>,
}

#[derive(Clone)]
pub struct LeaveWorkflow {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
}

impl LeaveWorkflow {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn submit(&self, request: NewLeaveRequest) -> HrResult<LeaveRequest> {
        require("employee_id", &request.employee_id)?;
        require("type", &request.leave_type)?;
        require("submitted_by", &request.submitted_by)?;

        let mut dataset = self.store.read_all()?;
        let now = self.clock.now();

        let leave = LeaveRequest {
            id: Uuid::new_v4().to_string(),
            employee_id: request.employee_id,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason,
            status: LeaveStatus::Pending,
            status_history: vec![StatusChange {
                status: LeaveStatus::Pending,
                changed_by: request.submitted_by.clone(),
                changed_at: now,
            }],
            submitted_by: request.submitted_by,
            deleted: false,
            deleted_by: None,
            deleted_at: None,
            created_at: now,
        };

        dataset.leave_requests.push(leave.clone());
        self.store.write_all(&dataset)?;

        info!(leave_id = %leave.id, employee_id = %leave.employee_id, "Leave request submitted");
        Ok(leave)
    }

    /// Non-deleted requests matching `filter`, newest first, one page of them.
    pub fn list(&self, filter: &LeaveFilter, page: u32, limit: u32) -> HrResult<LeavePage> {
        if page == 0 {
            return Err(HrError::invalid("page", "Page must be a positive integer"));
        }
        if limit == 0 {
            return Err(HrError::invalid("limit", "Limit must be a positive integer"));
        }

        let dataset = self.store.read_all()?;

        let mut matching: Vec<_> = dataset
            .leave_requests
            .into_iter()
            .filter(|r| r.is_active() && filter.matches(r))
            .collect();
        newest_first(&mut matching, |r| r.created_at);

        let total = matching.len();
        let offset = (page as usize - 1).saturating_mul(limit as usize);
        let data = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        debug!(?filter, total, page, limit, "Leave requests listed");
        Ok(LeavePage {
            total,
            page,
            limit,
            data,
        })
    }

    pub fn get(&self, id: &str) -> HrResult<LeaveRequest> {
        let dataset = self.store.read_all()?;
        dataset
            .leave_requests
            .into_iter()
            .find(|r| r.id == id && r.is_active())
            .ok_or_else(not_found)
    }

    /// Records a review decision. Already decided requests may be decided again;
    /// each call adds one history entry.
    pub fn update_status(
        &self,
        id: &str,
        status: LeaveStatus,
        changed_by: &str,
    ) -> HrResult<LeaveRequest> {
        if !status.is_decision() {
            return Err(HrError::invalid("status", "Invalid status value"));
        }
        require("changed_by", changed_by)?;

        let mut dataset = self.store.read_all()?;
        let leave = find_active_mut(&mut dataset.leave_requests, id)?;

        leave.status_history.push(StatusChange {
            status,
            changed_by: changed_by.to_string(),
            changed_at: self.clock.now(),
        });
        leave.status = status;
        let leave = leave.clone();

        self.store.write_all(&dataset)?;

        info!(leave_id = id, %status, changed_by, "Leave status updated");
        Ok(leave)
    }

    /// Marks the request deleted. Status and history are left as they were.
    pub fn soft_delete(&self, id: &str, deleted_by: &str) -> HrResult<LeaveRequest> {
        require("deleted_by", deleted_by)?;

        let mut dataset = self.store.read_all()?;
        let leave = find_active_mut(&mut dataset.leave_requests, id)?;

        leave.deleted = true;
        leave.deleted_by = Some(deleted_by.to_string());
        leave.deleted_at = Some(self.clock.now());
        let leave = leave.clone();

        self.store.write_all(&dataset)?;

        info!(leave_id = id, deleted_by, "Leave request cancelled");
        Ok(leave)
    }
}

fn not_found() -> HrError {
    HrError::NotFound("Leave request not found".to_string())
}

fn find_active_mut<'a>(requests: &'a mut [LeaveRequest], id: &str) -> HrResult<&'a mut LeaveRequest> {
    requests
        .iter_mut()
        .find(|r| r.id == id && r.is_active())
        .ok_or_else(|| {
            warn!(leave_id = id, "No active leave request");
            not_found()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::clock::SteppingClock;
    use crate::store::MemoryStore;

    fn workflow() -> (LeaveWorkflow, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::seeded());
        let clock = Arc::new(SteppingClock::starting_at("2025-01-15T08:00:00Z"));
        (LeaveWorkflow::new(store.clone(), clock), store)
    }

    fn annual_leave(employee_id: &str) -> NewLeaveRequest {
        NewLeaveRequest {
            employee_id: employee_id.to_string(),
            leave_type: "annual".to_string(),
            start_date: "2025-02-01".parse().unwrap(),
            end_date: "2025-02-05".parse().unwrap(),
            reason: None,
            submitted_by: employee_id.to_string(),
        }
    }

    fn by_employee(employee_id: &str) -> LeaveFilter {
        LeaveFilter {
            employee_id: Some(employee_id.to_string()),
            ..LeaveFilter::default()
        }
    }

    #[test]
    fn submit_starts_pending_with_one_history_entry() {
        let (workflow, store) = workflow();

        let leave = workflow.submit(annual_leave("E1")).unwrap();

        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.status_history.len(), 1);
        assert_eq!(leave.status_history[0].status, LeaveStatus::Pending);
        assert_eq!(leave.status_history[0].changed_by, "E1");
        assert!(!leave.deleted);
        assert_eq!(store.read_all().unwrap().leave_requests, vec![leave]);
    }

    #[test]
    fn approval_appends_one_entry_matching_the_status() {
        let (workflow, _) = workflow();
        let leave = workflow.submit(annual_leave("E1")).unwrap();

        let approved = workflow
            .update_status(&leave.id, LeaveStatus::Approved, "MGR1")
            .unwrap();

        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.status_history.len(), 2);
        assert_eq!(approved.status_history[1].status, LeaveStatus::Approved);
        assert_eq!(approved.status_history[1].changed_by, "MGR1");
        assert!(approved.status_history[1].changed_at > approved.status_history[0].changed_at);
    }

    #[test]
    fn decided_requests_can_be_decided_again() {
        let (workflow, _) = workflow();
        let leave = workflow.submit(annual_leave("E1")).unwrap();

        workflow.update_status(&leave.id, LeaveStatus::Approved, "MGR1").unwrap();
        let reversed = workflow
            .update_status(&leave.id, LeaveStatus::Rejected, "MGR2")
            .unwrap();

        assert_eq!(reversed.status, LeaveStatus::Rejected);
        let trail: Vec<_> = reversed.status_history.iter().map(|c| c.status).collect();
        assert_eq!(
            trail,
            [LeaveStatus::Pending, LeaveStatus::Approved, LeaveStatus::Rejected]
        );
    }

    #[test]
    fn pending_is_not_a_valid_decision() {
        let (workflow, _) = workflow();
        let leave = workflow.submit(annual_leave("E1")).unwrap();

        let err = workflow
            .update_status(&leave.id, LeaveStatus::Pending, "MGR1")
            .unwrap_err();
        assert!(matches!(err, HrError::Validation(_)));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (workflow, _) = workflow();
        assert!(matches!(
            workflow.update_status("nope", LeaveStatus::Approved, "MGR1"),
            Err(HrError::NotFound(_))
        ));
        assert!(matches!(workflow.soft_delete("nope", "E1"), Err(HrError::NotFound(_))));
        assert!(matches!(workflow.get("nope"), Err(HrError::NotFound(_))));
    }

    #[test]
    fn soft_delete_keeps_status_and_history_and_hides_the_request() {
        let (workflow, store) = workflow();
        let leave = workflow.submit(annual_leave("E1")).unwrap();
        let approved = workflow
            .update_status(&leave.id, LeaveStatus::Approved, "MGR1")
            .unwrap();

        let deleted = workflow.soft_delete(&leave.id, "E1").unwrap();

        assert!(deleted.deleted);
        assert_eq!(deleted.deleted_by.as_deref(), Some("E1"));
        assert!(deleted.deleted_at.is_some());
        assert_eq!(deleted.status, approved.status);
        assert_eq!(deleted.status_history, approved.status_history);

        let page = workflow.list(&by_employee("E1"), 1, 10).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());

        // still on disk
        assert_eq!(store.read_all().unwrap().leave_requests.len(), 1);
    }

    #[test]
    fn deleted_requests_accept_no_further_operations() {
        let (workflow, _) = workflow();
        let leave = workflow.submit(annual_leave("E1")).unwrap();
        workflow.soft_delete(&leave.id, "E1").unwrap();

        assert!(matches!(
            workflow.update_status(&leave.id, LeaveStatus::Approved, "MGR1"),
            Err(HrError::NotFound(_))
        ));
        assert!(matches!(workflow.soft_delete(&leave.id, "E1"), Err(HrError::NotFound(_))));
        assert!(matches!(workflow.get(&leave.id), Err(HrError::NotFound(_))));
    }

    #[test]
    fn second_page_holds_the_remainder() {
        let (workflow, _) = workflow();
        for _ in 0..15 {
            workflow.submit(annual_leave("E1")).unwrap();
        }
        workflow.submit(annual_leave("E2")).unwrap();

        let page = workflow.list(&by_employee("E1"), 2, 10).unwrap();

        assert_eq!(page.total, 15);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn list_is_newest_first_and_filters_by_status() {
        let (workflow, _) = workflow();
        let first = workflow.submit(annual_leave("E1")).unwrap();
        let second = workflow.submit(annual_leave("E2")).unwrap();
        workflow
            .update_status(&first.id, LeaveStatus::Rejected, "MGR1")
            .unwrap();

        let all = workflow.list(&LeaveFilter::default(), 1, 10).unwrap();
        let ids: Vec<_> = all.data.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, [second.id.clone(), first.id.clone()]);

        let rejected = workflow
            .list(
                &LeaveFilter {
                    status: Some(LeaveStatus::Rejected),
                    ..LeaveFilter::default()
                },
                1,
                10,
            )
            .unwrap();
        assert_eq!(rejected.total, 1);
        assert_eq!(rejected.data[0].id, first.id);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let (workflow, _) = workflow();
        workflow.submit(annual_leave("E1")).unwrap();

        let page = workflow.list(&LeaveFilter::default(), 3, 10).unwrap();
        assert_eq!(page.total, 1);
        assert!(page.data.is_empty());
    }

    #[test]
    fn zero_page_or_limit_is_invalid() {
        let (workflow, _) = workflow();
        assert!(matches!(
            workflow.list(&LeaveFilter::default(), 0, 10),
            Err(HrError::Validation(_))
        ));
        assert!(matches!(
            workflow.list(&LeaveFilter::default(), 1, 0),
            Err(HrError::Validation(_))
        ));
    }

    #[test]
    fn submit_requires_submitter() {
        let (workflow, _) = workflow();
        let mut request = annual_leave("E1");
        request.submitted_by = String::new();

        assert!(matches!(workflow.submit(request), Err(HrError::Validation(_))));
    }

    #[test]
    fn end_before_start_is_accepted() {
        let (workflow, _) = workflow();
        let mut request = annual_leave("E1");
        request.end_date = "2025-01-20".parse().unwrap();

        assert!(workflow.submit(request).is_ok());
    }
}
