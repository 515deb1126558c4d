//! # Data Layer
//!
//! Entity structs and sqlx-backed CRUD operations for the three tables:
//! `device`, `device_model`, and `device_type`. A device belongs to exactly
//! one model, a model to exactly one type; referential integrity is enforced
//! by foreign keys in the schema.

pub mod device;
pub mod device_model;
pub mod device_type;

pub use device::{Device, DeviceView, NewDevice, UpdateDevice};
pub use device_model::{DeviceModel, DeviceModelView, NewDeviceModel, UpdateDeviceModel};
pub use device_type::{DeviceType, NewDeviceType, UpdateDeviceType};
