// Shared services
// ApiService talks to the BFF routes from the browser; native builds get stubs
pub mod api_service;

pub use api_service::ApiService;
