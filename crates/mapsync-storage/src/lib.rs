pub mod disconnected;
pub mod memory;
pub mod mysql;

pub use disconnected::DisconnectedRepository;
pub use mapsync_core::repository::{ReadRepository, Repository};
pub use mapsync_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
