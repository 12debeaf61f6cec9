use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

/// One timestamped telemetry reading. Rows are append-only; they are removed
/// only when the owning robot is deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "sensor_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub robot_id: i64,

    pub temperature: f64,
    pub humidity: f64,
    pub speed: f64,

    pub timestamp: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::robot::Entity",
        from = "Column::RobotId",
        to = "super::robot::Column::Id",
        on_delete = "Cascade"
    )]
    Robot,
}

impl Related<super::robot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Robot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        robot_id: i64,
        temperature: f64,
        humidity: f64,
        speed: f64,
    ) -> Result<Model, DbErr> {
        let reading = ActiveModel {
            robot_id: Set(robot_id),
            temperature: Set(temperature),
            humidity: Set(humidity),
            speed: Set(speed),
            timestamp: Set(Utc::now()),
            ..Default::default()
        };

        reading.insert(db).await
    }

    /// Most recent readings for a robot, newest first.
    pub async fn latest_for_robot<C: ConnectionTrait>(
        db: &C,
        robot_id: i64,
        limit: u64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::RobotId.eq(robot_id))
            .order_by_desc(Column::Timestamp)
            .limit(limit)
            .all(db)
            .await
    }

    /// All readings for a robot, in insertion order. Used by the reporting
    /// aggregation.
    pub async fn all_for_robot<C: ConnectionTrait>(
        db: &C,
        robot_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::RobotId.eq(robot_id))
            .all(db)
            .await
    }
}
