use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, PaginatorTrait, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::sensor_data::{Column as SensorColumn, Entity as SensorEntity};

/// Default status assigned to newly registered robots.
pub const DEFAULT_STATUS: &str = "active";
/// Battery level assigned to newly registered robots.
pub const DEFAULT_BATTERY: i32 = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "robots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Display name. Not globally unique; smart upload matches on it
    /// within the owning user's fleet.
    pub name: String,
    pub model: String,
    pub status: String,
    pub battery: i32,

    pub created_at: DateTime<Utc>,

    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::sensor_data::Entity")]
    SensorData,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sensor_data::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensorData.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a robot for the given owner with default status and battery.
    ///
    /// Generic over the connection so smart upload can create robots inside
    /// an open transaction and use the generated id immediately.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i64,
        name: &str,
        model: &str,
    ) -> Result<Model, DbErr> {
        let robot = ActiveModel {
            name: Set(name.to_owned()),
            model: Set(model.to_owned()),
            status: Set(DEFAULT_STATUS.to_owned()),
            battery: Set(DEFAULT_BATTERY),
            created_at: Set(Utc::now()),
            user_id: Set(user_id),
            ..Default::default()
        };

        robot.insert(db).await
    }

    /// Looks up a robot by id, scoped to the owning user.
    pub async fn find_by_id_for_user<C: ConnectionTrait>(
        db: &C,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    /// Looks up a robot by exact name, scoped to the owning user.
    pub async fn find_by_name_for_user<C: ConnectionTrait>(
        db: &C,
        name: &str,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Name.eq(name))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    /// Returns all robots owned by the given user.
    pub async fn list_for_user(db: &DbConn, user_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(db)
            .await
    }

    /// Partial update: only the provided fields are written. Returns `None`
    /// when no robot with this id is owned by the user.
    pub async fn update_for_user(
        db: &DbConn,
        id: i64,
        user_id: i64,
        name: Option<String>,
        model: Option<String>,
        status: Option<String>,
        battery: Option<i32>,
    ) -> Result<Option<Model>, DbErr> {
        let Some(existing) = Self::find_by_id_for_user(db, id, user_id).await? else {
            return Ok(None);
        };

        let mut robot: ActiveModel = existing.into();
        if let Some(name) = name {
            robot.name = Set(name);
        }
        if let Some(model) = model {
            robot.model = Set(model);
        }
        if let Some(status) = status {
            robot.status = Set(status);
        }
        if let Some(battery) = battery {
            robot.battery = Set(battery);
        }

        robot.update(db).await.map(Some)
    }

    /// Deletes a robot and its sensor rows (sensors first, one transaction).
    /// Returns `false` when no robot with this id is owned by the user.
    pub async fn delete_for_user(db: &DbConn, id: i64, user_id: i64) -> Result<bool, DbErr> {
        let Some(robot) = Self::find_by_id_for_user(db, id, user_id).await? else {
            return Ok(false);
        };

        let txn = db.begin().await?;
        SensorEntity::delete_many()
            .filter(SensorColumn::RobotId.eq(robot.id))
            .exec(&txn)
            .await?;
        Entity::delete_by_id(robot.id).exec(&txn).await?;
        txn.commit().await?;

        Ok(true)
    }

    /// Number of sensor readings recorded for this robot.
    pub async fn sensor_count<C: ConnectionTrait>(&self, db: &C) -> Result<u64, DbErr> {
        SensorEntity::find()
            .filter(SensorColumn::RobotId.eq(self.id))
            .count(db)
            .await
    }

    /// Applies a battery drain, clamped at zero. Battery is never restored
    /// automatically.
    pub async fn drain_battery<C: ConnectionTrait>(
        &self,
        db: &C,
        amount: i32,
    ) -> Result<Model, DbErr> {
        let mut robot: ActiveModel = self.clone().into();
        robot.battery = Set((self.battery - amount).max(0));
        robot.update(db).await
    }
}
