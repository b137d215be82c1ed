pub mod company_controller;
pub mod location_controller;
pub mod service_order_controller;
pub mod vehicle_controller;
