pub mod config_service;
pub mod file_key_value_store;
pub mod memory_key_value_store;
pub mod navigator;
pub mod paths;
pub mod reqwest_transport;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_key_value_store::FileKeyValueStore;
pub use crate::memory_key_value_store::InMemoryKeyValueStore;
pub use crate::navigator::TracingNavigator;
pub use crate::paths::TalentDeskPaths;
pub use crate::reqwest_transport::ReqwestTransport;
