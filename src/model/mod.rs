pub mod department;
pub mod hr;
pub mod leave_request;
pub mod person;
pub mod role;
