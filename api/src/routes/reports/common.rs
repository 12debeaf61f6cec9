use chrono::{DateTime, Utc};
use db::models::robot::Model as RobotModel;
use db::models::sensor_data::Model as SensorDataModel;
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;

use crate::routes::common::round_to;

/// Sentinel shown when a robot has no readings yet.
pub const NO_READING: &str = "N/A";

/// One summary row, shared between the JSON summary and the spreadsheet
/// export so both always agree.
#[derive(Debug, Serialize)]
pub struct RobotReport {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub status: String,
    pub battery: i32,
    pub sensor_count: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_speed: f64,
    pub last_reading: String,
    pub created_at: String,
}

pub struct ReadingStats {
    pub count: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_speed: f64,
    pub last_reading: Option<DateTime<Utc>>,
}

/// Arithmetic means rounded to 2 decimals; zero means when there are no
/// readings.
pub fn summarize(readings: &[SensorDataModel]) -> ReadingStats {
    if readings.is_empty() {
        return ReadingStats {
            count: 0,
            avg_temperature: 0.0,
            avg_humidity: 0.0,
            avg_speed: 0.0,
            last_reading: None,
        };
    }

    let n = readings.len() as f64;
    ReadingStats {
        count: readings.len(),
        avg_temperature: round_to(readings.iter().map(|r| r.temperature).sum::<f64>() / n, 2),
        avg_humidity: round_to(readings.iter().map(|r| r.humidity).sum::<f64>() / n, 2),
        avg_speed: round_to(readings.iter().map(|r| r.speed).sum::<f64>() / n, 2),
        last_reading: readings.iter().map(|r| r.timestamp).max(),
    }
}

/// Builds one report row per robot owned by the user.
pub async fn build_report(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<RobotReport>, DbErr> {
    let robots = RobotModel::list_for_user(db, user_id).await?;

    let mut rows = Vec::with_capacity(robots.len());
    for robot in robots {
        let readings = SensorDataModel::all_for_robot(db, robot.id).await?;
        let stats = summarize(&readings);

        rows.push(RobotReport {
            id: robot.id,
            name: robot.name,
            model: robot.model,
            status: robot.status,
            battery: robot.battery,
            sensor_count: stats.count,
            avg_temperature: stats.avg_temperature,
            avg_humidity: stats.avg_humidity,
            avg_speed: stats.avg_speed,
            last_reading: stats
                .last_reading
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| NO_READING.to_owned()),
            created_at: robot.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use chrono::{Duration, Utc};
    use db::models::sensor_data::Model as SensorDataModel;

    fn reading(temperature: f64, offset_secs: i64) -> SensorDataModel {
        SensorDataModel {
            id: 0,
            robot_id: 1,
            temperature,
            humidity: 50.0,
            speed: 1.0,
            timestamp: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn averages_are_exact_for_simple_input() {
        let readings = [reading(10.0, 0), reading(20.0, 1), reading(30.0, 2)];
        let stats = summarize(&readings);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.avg_temperature, 20.0);
        assert_eq!(stats.last_reading, Some(readings[2].timestamp));
    }

    #[test]
    fn empty_input_yields_zeroes_and_no_timestamp() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.avg_temperature, 0.0);
        assert_eq!(stats.avg_humidity, 0.0);
        assert_eq!(stats.avg_speed, 0.0);
        assert!(stats.last_reading.is_none());
    }

    #[test]
    fn averages_are_rounded_to_two_decimals() {
        let readings = [reading(10.0, 0), reading(10.0, 1), reading(11.0, 2)];
        let stats = summarize(&readings);
        assert_eq!(stats.avg_temperature, 10.33);
    }
}
