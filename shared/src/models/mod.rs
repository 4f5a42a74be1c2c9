//! Domain models for the cotton waste billing platform

mod invoice;
mod packing;
mod packing_type;
mod sales_order;
mod status;
mod waste_lot;
mod waste_master;
mod waste_rate;

pub use invoice::*;
pub use packing::*;
pub use packing_type::*;
pub use sales_order::*;
pub use status::*;
pub use waste_lot::*;
pub use waste_master::*;
pub use waste_rate::*;
