use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poles::Table)
                    .if_not_exists()
                    .col(pk(Poles::Id))
                    .col(ColumnDef::new(Poles::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Poles::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Poles::Description).text().not_null())
                    .col(ColumnDef::new(Poles::ResponsibleId).big_integer())
                    .col(
                        ColumnDef::new(Poles::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(Poles::CreatedAt))
                    .col(timestamp(Poles::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_poles_responsible",
                        Poles::Table,
                        Poles::ResponsibleId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrgServices::Table)
                    .if_not_exists()
                    .col(pk(OrgServices::Id))
                    .col(ColumnDef::new(OrgServices::Name).string_len(100).not_null())
                    .col(ColumnDef::new(OrgServices::Description).text().not_null())
                    .col(ColumnDef::new(OrgServices::PoleId).big_integer().not_null())
                    .col(ColumnDef::new(OrgServices::ResponsibleId).big_integer())
                    .col(
                        ColumnDef::new(OrgServices::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(OrgServices::CreatedAt))
                    .col(timestamp(OrgServices::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_org_services_pole",
                        OrgServices::Table,
                        OrgServices::PoleId,
                        Poles::Table,
                        Poles::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_org_services_responsible",
                        OrgServices::Table,
                        OrgServices::ResponsibleId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_org_services_name_pole",
                OrgServices::Table,
                [OrgServices::Name, OrgServices::PoleId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceMembers::Table)
                    .if_not_exists()
                    .col(pk(ServiceMembers::Id))
                    .col(
                        ColumnDef::new(ServiceMembers::ServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceMembers::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp(ServiceMembers::AssignedAt))
                    .col(
                        ColumnDef::new(ServiceMembers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(&mut reference(
                        "fk_service_members_service",
                        ServiceMembers::Table,
                        ServiceMembers::ServiceId,
                        OrgServices::Table,
                        OrgServices::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_service_members_account",
                        ServiceMembers::Table,
                        ServiceMembers::AccountId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_service_members_pair",
                ServiceMembers::Table,
                [ServiceMembers::ServiceId, ServiceMembers::AccountId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(pk(Teams::Id))
                    .col(ColumnDef::new(Teams::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Teams::Description).text().not_null())
                    .col(ColumnDef::new(Teams::ServiceId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::ResponsibleId).big_integer())
                    .col(
                        ColumnDef::new(Teams::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp(Teams::CreatedAt))
                    .col(timestamp(Teams::UpdatedAt))
                    .foreign_key(&mut reference(
                        "fk_teams_service",
                        Teams::Table,
                        Teams::ServiceId,
                        OrgServices::Table,
                        OrgServices::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_teams_responsible",
                        Teams::Table,
                        Teams::ResponsibleId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_teams_name_service",
                Teams::Table,
                [Teams::Name, Teams::ServiceId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(pk(TeamMembers::Id))
                    .col(ColumnDef::new(TeamMembers::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::AccountId).big_integer().not_null())
                    .col(timestamp(TeamMembers::AssignedAt))
                    .col(
                        ColumnDef::new(TeamMembers::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(&mut reference(
                        "fk_team_members_team",
                        TeamMembers::Table,
                        TeamMembers::TeamId,
                        Teams::Table,
                        Teams::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_team_members_account",
                        TeamMembers::Table,
                        TeamMembers::AccountId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_team_members_pair",
                TeamMembers::Table,
                [TeamMembers::TeamId, TeamMembers::AccountId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoleAssignments::Table)
                    .if_not_exists()
                    .col(pk(RoleAssignments::Id))
                    .col(
                        ColumnDef::new(RoleAssignments::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoleAssignments::Role).string_len(30).not_null())
                    .col(ColumnDef::new(RoleAssignments::PoleId).big_integer())
                    .col(ColumnDef::new(RoleAssignments::ServiceId).big_integer())
                    .col(ColumnDef::new(RoleAssignments::TeamId).big_integer())
                    .col(timestamp(RoleAssignments::AssignedAt))
                    .col(
                        ColumnDef::new(RoleAssignments::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(&mut reference(
                        "fk_role_assignments_account",
                        RoleAssignments::Table,
                        RoleAssignments::AccountId,
                        Accounts::Table,
                        Accounts::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_role_assignments_pole",
                        RoleAssignments::Table,
                        RoleAssignments::PoleId,
                        Poles::Table,
                        Poles::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_role_assignments_service",
                        RoleAssignments::Table,
                        RoleAssignments::ServiceId,
                        OrgServices::Table,
                        OrgServices::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut reference(
                        "fk_role_assignments_team",
                        RoleAssignments::Table,
                        RoleAssignments::TeamId,
                        Teams::Table,
                        Teams::Id,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "ux_role_assignments_scope",
                RoleAssignments::Table,
                [
                    RoleAssignments::AccountId,
                    RoleAssignments::Role,
                    RoleAssignments::PoleId,
                    RoleAssignments::ServiceId,
                    RoleAssignments::TeamId,
                ],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrgServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Poles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Poles {
    Table,
    Id,
    Name,
    Code,
    Description,
    ResponsibleId,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OrgServices {
    Table,
    Id,
    Name,
    Description,
    PoleId,
    ResponsibleId,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ServiceMembers {
    Table,
    Id,
    ServiceId,
    AccountId,
    AssignedAt,
    Active,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    Description,
    ServiceId,
    ResponsibleId,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    AccountId,
    AssignedAt,
    Active,
}

#[derive(DeriveIden)]
enum RoleAssignments {
    Table,
    Id,
    AccountId,
    Role,
    PoleId,
    ServiceId,
    TeamId,
    AssignedAt,
    Active,
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
}
