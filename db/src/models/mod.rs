pub mod robot;
pub mod sensor_data;
pub mod user;
