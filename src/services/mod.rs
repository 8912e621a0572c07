//! Service layer
//!
//! Services encapsulate the business logic that ties evaluation to delivery.

pub mod alert_service;

pub use alert_service::{AlertService, RaisedAlert};
