use crate::naming::constants::{FAILURE_SUFFIX, SUCCESS_SUFFIX, UNKNOWN_FAILURE_SUFFIX};

pub fn is_success_status(code: u16) -> bool {
  (200..300).contains(&code)
}

/// Suffix for one response group given the success class of the group that follows it.
///
/// A success group is only qualified with its first status code when the next group is a
/// success group as well; a failure group is qualified whenever any group follows it.
///
/// # Example
///
/// ```text
/// [200] [201] [400] [404] => Success200, Success, Failure400, Failure
/// ```
pub fn variant_suffix(success: bool, first_code: u16, next_group_success: Option<bool>) -> String {
  match (success, next_group_success) {
    (true, Some(true)) => format!("{SUCCESS_SUFFIX}{first_code}"),
    (true, _) => SUCCESS_SUFFIX.to_string(),
    (false, Some(_)) => format!("{FAILURE_SUFFIX}{first_code}"),
    (false, None) => FAILURE_SUFFIX.to_string(),
  }
}

pub fn variant_name(operation_type: &str, suffix: &str) -> String {
  format!("{operation_type}{suffix}")
}

pub fn unknown_failure_name(operation_type: &str) -> String {
  variant_name(operation_type, UNKNOWN_FAILURE_SUFFIX)
}
