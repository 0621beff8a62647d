pub mod attendance;
pub mod branch;
pub mod contract;
pub mod employee;
pub mod leave_request;
pub mod salary;
pub mod staff;
pub mod user;
