use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202608290003_create_sensor_data"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("sensor_data"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("robot_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("temperature")).double().not_null())
                    .col(ColumnDef::new(Alias::new("humidity")).double().not_null())
                    .col(ColumnDef::new(Alias::new("speed")).double().not_null())
                    .col(ColumnDef::new(Alias::new("timestamp")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("sensor_data"), Alias::new("robot_id"))
                            .to(Alias::new("robots"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("sensor_data")).to_owned())
            .await
    }
}
