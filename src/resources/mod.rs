//! Generated API resources: request parameters, response models and endpoints.

pub mod customers;
pub mod disputes;
pub mod license_keys;
pub mod pagination;
pub mod payments;
pub mod products;
pub mod refunds;
pub mod subscriptions;
pub mod webhooks;
