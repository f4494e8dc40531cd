mod nav_pvt;
mod sec_uniqid;

pub use nav_pvt::*;
pub use sec_uniqid::*;
