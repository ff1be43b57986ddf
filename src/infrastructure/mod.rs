pub mod logging;
pub mod store;
pub mod upstream;
