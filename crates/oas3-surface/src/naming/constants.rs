pub const REQUEST_SUFFIX: &str = "Request";
pub const RESPONSE_SUFFIX: &str = "Response";

pub const SUCCESS_SUFFIX: &str = "Success";
pub const FAILURE_SUFFIX: &str = "Failure";
pub const UNKNOWN_FAILURE_SUFFIX: &str = "UnknownFailure";

pub const DEFAULT_CLIENT_NAME: &str = "Default";

/// Schema name that collides with the nested namespace emitters reserve on every type.
pub const RESERVED_TYPE_NAME: &str = "Companion";

pub const UNNAMED_IDENTIFIER: &str = "unnamed";
pub const EMPTY_CONSTANT: &str = "EMPTY";

pub const PATH_PARAM_PREFIX: &str = "by";
