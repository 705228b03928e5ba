use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202512010004_create_tickets"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("tickets"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("titulo")).string_len(150).not_null())
                    .col(ColumnDef::new(Alias::new("descricao")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("ticket_status"),
                                vec![
                                    Alias::new("aberto"),
                                    Alias::new("em_andamento"),
                                    Alias::new("resolvido"),
                                    Alias::new("concluido"),
                                    Alias::new("excluido"),
                                ],
                            )
                            .not_null()
                            .default("aberto"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("prioridade"))
                            .enumeration(
                                Alias::new("ticket_prioridade"),
                                vec![
                                    Alias::new("baixa"),
                                    Alias::new("importante"),
                                    Alias::new("urgente"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("tempo_estimado")).integer().null())
                    .col(ColumnDef::new(Alias::new("observacoes_iniciais")).text().null())
                    .col(ColumnDef::new(Alias::new("solucao_aplicada")).text().null())
                    .col(ColumnDef::new(Alias::new("observacoes_internas")).text().null())
                    .col(ColumnDef::new(Alias::new("reabertura_motivo")).text().null())
                    .col(ColumnDef::new(Alias::new("reabertura_detalhes")).text().null())
                    .col(ColumnDef::new(Alias::new("avaliacao")).integer().null())
                    .col(ColumnDef::new(Alias::new("comentario_avaliacao")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("comentario_confirmacao_usuario"))
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(Alias::new("id_usuario")).uuid().not_null())
                    .col(ColumnDef::new(Alias::new("id_categoria")).uuid().not_null())
                    .col(ColumnDef::new(Alias::new("id_responsavel")).uuid().null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("tickets"), Alias::new("id_usuario"))
                            .to(Alias::new("usuarios"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("tickets"), Alias::new("id_categoria"))
                            .to(Alias::new("categorias"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("tickets"), Alias::new("id_responsavel"))
                            .to(Alias::new("colaboradores"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("tickets")).to_owned())
            .await
    }
}
