//! Collaborator contracts. Implementations live outside this workspace.

mod repository;

pub use repository::IMemoryRepository;
