pub mod alert_service;
pub mod price_service;
pub mod schedule_service;
pub mod subscription_service;
