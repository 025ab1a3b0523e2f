// Domain layer: business entities and collaborator contracts
pub mod models;

// Collaborator traits use http types (server-only)
#[cfg(not(target_arch = "wasm32"))]
pub mod services;
