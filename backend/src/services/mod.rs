//! Business logic services for the Cotton Waste Billing Platform

pub mod invoice;
pub mod packing;
pub mod packing_type;
pub mod resolution;
pub mod sales_order;
pub mod waste_lot;
pub mod waste_master;
pub mod waste_rate;

pub use invoice::InvoiceService;
pub use packing::PackingService;
pub use packing_type::PackingTypeService;
pub use resolution::ResolutionService;
pub use sales_order::SalesOrderService;
pub use waste_lot::WasteLotService;
pub use waste_master::WasteMasterService;
pub use waste_rate::WasteRateService;
