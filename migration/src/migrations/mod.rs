pub mod m202608290001_create_users;
pub mod m202608290002_create_robots;
pub mod m202608290003_create_sensor_data;
