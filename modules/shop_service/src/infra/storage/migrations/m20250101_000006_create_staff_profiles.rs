use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffProfiles::Table)
                    .if_not_exists()
                    .col(pk(StaffProfiles::Id))
                    .col(
                        ColumnDef::new(StaffProfiles::AccountId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::Matricule)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StaffProfiles::Photo).string())
                    .col(
                        ColumnDef::new(StaffProfiles::Phone)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::Address)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(StaffProfiles::HireDate).date())
                    .col(
                        ColumnDef::new(StaffProfiles::JobTitle)
                            .string_len(100)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::Bio)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(StaffProfiles::Skills).json().not_null())
                    .col(timestamp(StaffProfiles::CreatedAt))
                    .col(timestamp(StaffProfiles::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_staff_profiles_account",
                        StaffProfiles::Table,
                        StaffProfiles::AccountId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StaffProfiles {
    Table,
    Id,
    AccountId,
    Matricule,
    Photo,
    Phone,
    Address,
    HireDate,
    JobTitle,
    Bio,
    Skills,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}
