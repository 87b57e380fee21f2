pub mod device;
pub mod notification;

pub use device::*;
pub use notification::*;
