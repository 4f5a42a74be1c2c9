//! HTTP handlers for the Cotton Waste Billing Platform

pub mod health;
pub mod invoice;
pub mod packing;
pub mod packing_type;
pub mod sales_order;
pub mod waste_lot;
pub mod waste_master;
pub mod waste_rate;

pub use health::*;
pub use invoice::*;
pub use packing::*;
pub use packing_type::*;
pub use sales_order::*;
pub use waste_lot::*;
pub use waste_master::*;
pub use waste_rate::*;
