pub mod components;
pub mod layouts;
pub mod pages;

// Re-export the search App
pub use pages::App;
