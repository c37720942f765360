use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建图书表
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Title).string_len(500).not_null())
                    .col(ColumnDef::new(Books::Author).string_len(250).not_null())
                    .col(ColumnDef::new(Books::Year).integer().null())
                    .col(ColumnDef::new(Books::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Books::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 同一 title + author 只允许存在一条记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uix_books_title_author")
                    .table(Books::Table)
                    .col(Books::Title)
                    .col(Books::Author)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_books_title")
                    .table(Books::Table)
                    .col(Books::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_books_author")
                    .table(Books::Table)
                    .col(Books::Author)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_books_year")
                    .table(Books::Table)
                    .col(Books::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Books {
    #[sea_orm(iden = "books")]
    Table,
    Id,
    Title,
    Author,
    Year,
    CreatedAt,
    UpdatedAt,
}
