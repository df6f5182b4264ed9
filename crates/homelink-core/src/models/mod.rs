//! Data models for the smart-home service.
//!
//! This module contains the wire structures exchanged with the server:
//!
//! - `User` plus the login/edit request bodies
//! - `Device`, `Host`: hardware registered against a house
//! - `House`: a named group of hosts and devices owned by a user
//! - `ThData`: one thermo-hygrometer history record
//!
//! All JSON fields are camelCase on the wire; identifiers are UUIDs in
//! canonical string form.

pub mod device;
pub mod host;
pub mod house;
pub mod thdata;
pub mod user;

pub use device::{ChangeUpdateFrequency, Device, DeviceHouseAssoc, DeviceId};
pub use host::{Host, HostHouseAssoc, HostId};
pub use house::{House, HouseId, NewHouse};
pub use thdata::ThData;
pub use user::{ChangeMailRequest, ChangePasswordRequest, User, UserId, UserLogin};
