mod code;
mod layout;
mod registry;
mod rfc4122;
mod sortable;

pub use code::*;
pub use layout::*;
pub use registry::*;
pub use rfc4122::*;
pub use sortable::*;
