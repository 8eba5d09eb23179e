use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建上传记录表
        manager
            .create_table(
                Table::create()
                    .table(Uploads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Uploads::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Uploads::OriginalName).string().not_null())
                    .col(ColumnDef::new(Uploads::MimeType).string().not_null())
                    .col(ColumnDef::new(Uploads::Size).big_integer().not_null())
                    .col(ColumnDef::new(Uploads::Url).string().not_null())
                    .col(ColumnDef::new(Uploads::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 按创建时间倒序查询的索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_uploads_created_at")
                    .table(Uploads::Table)
                    .col(Uploads::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_uploads_created_at")
                    .table(Uploads::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Uploads::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Uploads {
    #[sea_orm(iden = "uploads")]
    Table,
    Id,
    OriginalName,
    MimeType,
    Size,
    Url,
    CreatedAt,
}
