pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod validate;

pub use extractor::{SafeAssignmentIdI64, SafeClassIdI64, SafeMaterialIdI64, SafeStudentIdI64};
pub use parameter_error_handler::json_error_handler;
