pub mod communication_log;
pub mod customer;
pub mod customer_file;
