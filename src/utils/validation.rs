use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LeaveError;

static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s.'-]+$").unwrap());
static HR_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^HR\d{4}$").unwrap());
static EMP_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

fn check(ok: bool, message: &str) -> Result<(), LeaveError> {
    if ok {
        Ok(())
    } else {
        Err(LeaveError::Validation(message.to_string()))
    }
}

pub fn person_name(name: &str) -> Result<(), LeaveError> {
    check(NAME.is_match(name), "Invalid name")
}

/// `HR` followed by 4 digits, e.g. HR1234.
pub fn hr_id(id: &str) -> Result<(), LeaveError> {
    check(
        HR_ID.is_match(id),
        "HR ID must start with 'HR' followed by 4 digits",
    )
}

pub fn emp_code(code: &str) -> Result<(), LeaveError> {
    check(EMP_CODE.is_match(code), "Employee Code must be 6 digits")
}

pub fn dept_id(id: &str) -> Result<(), LeaveError> {
    check(id.chars().count() == 4, "Department ID must be 4 characters")
}

pub fn not_blank(value: &str, field: &str) -> Result<(), LeaveError> {
    check(!value.trim().is_empty(), &format!("{field} must not be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(person_name("Mary-Jane O'Neil Jr.").is_ok());
        assert!(person_name("R2D2").is_err());
        assert!(person_name("").is_err());
    }

    #[test]
    fn hr_ids() {
        assert!(hr_id("HR1234").is_ok());
        assert!(hr_id("HR123").is_err());
        assert!(hr_id("hr1234").is_err());
        assert!(hr_id("HR12345").is_err());
    }

    #[test]
    fn employee_codes() {
        assert!(emp_code("100001").is_ok());
        assert!(emp_code("10001").is_err());
        assert!(emp_code("10000a").is_err());
    }

    #[test]
    fn department_ids() {
        assert!(dept_id("ENGG").is_ok());
        assert!(dept_id("EN").is_err());
    }

    #[test]
    fn blanks() {
        assert!(not_blank("  ", "Username").is_err());
        assert!(not_blank("alice", "Username").is_ok());
    }
}
