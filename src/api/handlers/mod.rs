pub mod devices;
pub mod notifications;
pub mod system;
