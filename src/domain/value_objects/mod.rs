//! Domain Value Objects
//!
//! Immutable, validated values used by the resolver and the deployment plan.

mod config_warning;
mod function_name;
mod hash;
mod runtime_version;
mod service_id;

pub use config_warning::ConfigWarning;
pub use function_name::{valid_cloud_function_name, FunctionName, MAX_FUNCTION_NAME_LEN};
pub use hash::ContentHash;
pub use runtime_version::{normalize_version, RuntimeVersion, SUPPORTED_NODE_VERSIONS};
pub use service_id::{
    valid_cloud_run_service_id, CloudRunServiceId, MAX_SERVICE_ID_LEN, MIN_SERVICE_ID_LEN,
};
