use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202507010001_create_users::Migration),
            Box::new(migrations::m202507010002_create_tickets::Migration),
            Box::new(migrations::m202507010003_create_ticket_responses::Migration),
        ]
    }
}
