//! Ticket entity and lifecycle engine.
//!
//! All status transitions go through the methods on [`Model`]; each one
//! checks the exact required current status, mutates the ticket, and appends
//! one history entry, committing both writes in a single transaction.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use super::ticket_historico;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub titulo: String,
    pub descricao: String,

    pub status: TicketStatus,
    pub prioridade: TicketPrioridade,

    // Workflow fields. Each is written by exactly one transition and never
    // cleared afterwards; reopening does not erase resolution data.
    pub tempo_estimado: Option<i32>,
    pub observacoes_iniciais: Option<String>,
    pub solucao_aplicada: Option<String>,
    pub observacoes_internas: Option<String>,
    pub reabertura_motivo: Option<String>,
    pub reabertura_detalhes: Option<String>,

    pub avaliacao: Option<i32>,
    pub comentario_avaliacao: Option<String>,
    pub comentario_confirmacao_usuario: Option<String>,

    pub id_usuario: Uuid,
    pub id_categoria: Uuid,
    pub id_responsavel: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ticket lifecycle states.
///
/// `aberto → em_andamento → resolvido → concluido`, with the one back-edge
/// `resolvido → em_andamento` (reopen). `excluido` is reserved: it exists in
/// the schema but no operation produces it.
#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_status")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TicketStatus {
    #[sea_orm(string_value = "aberto")]
    Aberto,

    #[sea_orm(string_value = "em_andamento")]
    EmAndamento,

    #[sea_orm(string_value = "resolvido")]
    Resolvido,

    #[sea_orm(string_value = "concluido")]
    Concluido,

    #[sea_orm(string_value = "excluido")]
    Excluido,
}

/// Ticket priority, fixed at creation.
#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ticket_prioridade")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TicketPrioridade {
    #[sea_orm(string_value = "baixa")]
    Baixa,

    #[sea_orm(string_value = "importante")]
    Importante,

    #[sea_orm(string_value = "urgente")]
    Urgente,
}

/// Failure modes of the lifecycle engine.
///
/// Payload constraints (lengths, ranges) are the API layer's job; by the
/// time a transition runs, only existence, state, and persistence can fail.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Ticket not found")]
    NotFound,

    #[error("ticket status is '{current}' but this operation requires '{required}'")]
    InvalidTransition {
        current: TicketStatus,
        required: TicketStatus,
    },

    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::IdUsuario",
        to = "super::usuario::Column::Id"
    )]
    Usuario,

    #[sea_orm(
        belongs_to = "super::categoria::Entity",
        from = "Column::IdCategoria",
        to = "super::categoria::Column::Id"
    )]
    Categoria,

    #[sea_orm(
        belongs_to = "super::colaborador::Entity",
        from = "Column::IdResponsavel",
        to = "super::colaborador::Column::Id"
    )]
    Colaborador,

    #[sea_orm(has_many = "super::ticket_historico::Entity")]
    TicketHistorico,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::categoria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categoria.def()
    }
}

impl Related<super::colaborador::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Colaborador.def()
    }
}

impl Related<super::ticket_historico::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketHistorico.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a ticket in status `aberto` together with its first history
    /// entry, so a ticket is never observable with an empty history.
    ///
    /// The caller is responsible for having checked that `id_usuario` and
    /// `id_categoria` resolve to existing rows.
    pub async fn create(
        db: &DbConn,
        titulo: &str,
        descricao: &str,
        prioridade: TicketPrioridade,
        id_usuario: Uuid,
        id_categoria: Uuid,
    ) -> Result<Model, LifecycleError> {
        let txn = db.begin().await?;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            titulo: Set(titulo.to_owned()),
            descricao: Set(descricao.to_owned()),
            status: Set(TicketStatus::Aberto),
            prioridade: Set(prioridade),
            id_usuario: Set(id_usuario),
            id_categoria: Set(id_categoria),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let ticket = active_model.insert(&txn).await?;

        ticket_historico::Model::append(&txn, ticket.id, TicketStatus::Aberto, None).await?;

        txn.commit().await?;
        Ok(ticket)
    }

    /// `aberto → em_andamento`: assigns a collaborator with an estimate and
    /// initial notes.
    pub async fn start(
        db: &DbConn,
        id: Uuid,
        id_responsavel: Uuid,
        tempo_estimado: i32,
        observacoes_iniciais: &str,
    ) -> Result<Model, LifecycleError> {
        let txn = db.begin().await?;
        let ticket = load_for_transition(&txn, id, TicketStatus::Aberto).await?;

        let mut active_model: ActiveModel = ticket.into();
        active_model.status = Set(TicketStatus::EmAndamento);
        active_model.id_responsavel = Set(Some(id_responsavel));
        active_model.tempo_estimado = Set(Some(tempo_estimado));
        active_model.observacoes_iniciais = Set(Some(observacoes_iniciais.to_owned()));
        active_model.updated_at = Set(Some(Utc::now()));
        let updated = active_model.update(&txn).await?;

        ticket_historico::Model::append(&txn, id, TicketStatus::EmAndamento, None).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// `em_andamento → resolvido`: records the applied solution.
    pub async fn resolve(
        db: &DbConn,
        id: Uuid,
        solucao_aplicada: &str,
        observacoes_internas: Option<&str>,
    ) -> Result<Model, LifecycleError> {
        let txn = db.begin().await?;
        let ticket = load_for_transition(&txn, id, TicketStatus::EmAndamento).await?;

        let mut active_model: ActiveModel = ticket.into();
        active_model.status = Set(TicketStatus::Resolvido);
        active_model.solucao_aplicada = Set(Some(solucao_aplicada.to_owned()));
        if let Some(obs) = observacoes_internas {
            active_model.observacoes_internas = Set(Some(obs.to_owned()));
        }
        active_model.updated_at = Set(Some(Utc::now()));
        let updated = active_model.update(&txn).await?;

        ticket_historico::Model::append(&txn, id, TicketStatus::Resolvido, None).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// `resolvido → concluido`: the requesting user confirms the solution
    /// and rates it. Terminal state; no transition leaves `concluido`.
    pub async fn close(
        db: &DbConn,
        id: Uuid,
        avaliacao: i32,
        comentario_avaliacao: Option<&str>,
        comentario_confirmacao_usuario: &str,
    ) -> Result<Model, LifecycleError> {
        let txn = db.begin().await?;
        let ticket = load_for_transition(&txn, id, TicketStatus::Resolvido).await?;

        let mut active_model: ActiveModel = ticket.into();
        active_model.status = Set(TicketStatus::Concluido);
        active_model.avaliacao = Set(Some(avaliacao));
        if let Some(comentario) = comentario_avaliacao {
            active_model.comentario_avaliacao = Set(Some(comentario.to_owned()));
        }
        active_model.comentario_confirmacao_usuario =
            Set(Some(comentario_confirmacao_usuario.to_owned()));
        active_model.updated_at = Set(Some(Utc::now()));
        let updated = active_model.update(&txn).await?;

        ticket_historico::Model::append(&txn, id, TicketStatus::Concluido, None).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// `resolvido → em_andamento`: the user rejects the solution. Resolution
    /// fields stay in place; only the reopen fields are added.
    pub async fn reopen(
        db: &DbConn,
        id: Uuid,
        reabertura_motivo: &str,
        reabertura_detalhes: &str,
    ) -> Result<Model, LifecycleError> {
        let txn = db.begin().await?;
        let ticket = load_for_transition(&txn, id, TicketStatus::Resolvido).await?;

        let mut active_model: ActiveModel = ticket.into();
        active_model.status = Set(TicketStatus::EmAndamento);
        active_model.reabertura_motivo = Set(Some(reabertura_motivo.to_owned()));
        active_model.reabertura_detalhes = Set(Some(reabertura_detalhes.to_owned()));
        active_model.updated_at = Set(Some(Utc::now()));
        let updated = active_model.update(&txn).await?;

        ticket_historico::Model::append(&txn, id, TicketStatus::EmAndamento, None).await?;

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn find_by_id(db: &DbConn, id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().all(db).await
    }
}

/// Loads the ticket and checks it sits in the exact `required` state.
///
/// Runs on the open transaction, so a racing transition that commits first
/// leaves this call observing the new state and failing the check.
async fn load_for_transition(
    txn: &DatabaseTransaction,
    id: Uuid,
    required: TicketStatus,
) -> Result<Model, LifecycleError> {
    let ticket = Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or(LifecycleError::NotFound)?;

    if ticket.status != required {
        return Err(LifecycleError::InvalidTransition {
            current: ticket.status,
            required,
        });
    }

    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{categoria, colaborador, ticket_historico, usuario};
    use crate::test_utils::setup_test_db;

    struct Fixtures {
        usuario: usuario::Model,
        categoria: categoria::Model,
        colaborador: colaborador::Model,
    }

    async fn setup_fixtures(db: &DbConn) -> Fixtures {
        let usuario = usuario::Model::create(db, "Ana Souza", "ana@example.com", "segredo1")
            .await
            .unwrap();
        let categoria = categoria::Model::create(db, "Infraestrutura", "Rede e servidores")
            .await
            .unwrap();
        let colaborador =
            colaborador::Model::create(db, "Carlos Lima", colaborador::Cargo::N2, "12345678901")
                .await
                .unwrap();

        Fixtures {
            usuario,
            categoria,
            colaborador,
        }
    }

    async fn create_ticket(db: &DbConn, f: &Fixtures) -> Model {
        Model::create(
            db,
            "VPN fora do ar",
            "Ninguém do financeiro consegue conectar na VPN",
            TicketPrioridade::Urgente,
            f.usuario.id,
            f.categoria.id,
        )
        .await
        .unwrap()
    }

    fn long_note() -> &'static str {
        "Verificando logs do concentrador VPN e reiniciando o serviço"
    }

    fn long_solution() -> &'static str {
        "Certificado do concentrador VPN estava expirado. Certificado renovado, \
         serviço reiniciado e conexão validada com três usuários do financeiro."
    }

    #[tokio::test]
    async fn create_sets_aberto_and_writes_first_history_entry() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;

        let ticket = create_ticket(&db, &f).await;

        assert_eq!(ticket.status, TicketStatus::Aberto);
        assert_eq!(ticket.prioridade, TicketPrioridade::Urgente);
        assert!(ticket.updated_at.is_none());

        let history = ticket_historico::Model::list_by_ticket(&db, ticket.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, TicketStatus::Aberto);
    }

    #[tokio::test]
    async fn start_moves_to_em_andamento_and_appends_history() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        let started = Model::start(&db, ticket.id, f.colaborador.id, 3, long_note())
            .await
            .unwrap();

        assert_eq!(started.status, TicketStatus::EmAndamento);
        assert_eq!(started.id_responsavel, Some(f.colaborador.id));
        assert_eq!(started.tempo_estimado, Some(3));
        assert_eq!(started.observacoes_iniciais.as_deref(), Some(long_note()));
        assert!(started.updated_at.is_some());

        let history = ticket_historico::Model::list_by_ticket(&db, ticket.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].status, TicketStatus::EmAndamento);
    }

    #[tokio::test]
    async fn start_twice_fails_with_invalid_transition() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        Model::start(&db, ticket.id, f.colaborador.id, 3, long_note())
            .await
            .unwrap();

        let err = Model::start(&db, ticket.id, f.colaborador.id, 3, long_note())
            .await
            .unwrap_err();

        match err {
            LifecycleError::InvalidTransition { current, required } => {
                assert_eq!(current, TicketStatus::EmAndamento);
                assert_eq!(required, TicketStatus::Aberto);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }

        // The failed attempt must not have touched the history.
        let history = ticket_historico::Model::list_by_ticket(&db, ticket.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn resolve_from_aberto_is_rejected() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        let err = Model::resolve(&db, ticket.id, long_solution(), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::InvalidTransition {
                current: TicketStatus::Aberto,
                required: TicketStatus::EmAndamento,
            }
        ));
    }

    #[tokio::test]
    async fn close_from_em_andamento_is_rejected() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        Model::start(&db, ticket.id, f.colaborador.id, 2, long_note())
            .await
            .unwrap();

        // No shortcut past `resolvido`, even though `concluido` is further along.
        let err = Model::close(&db, ticket.id, 5, None, long_note())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::InvalidTransition {
                current: TicketStatus::EmAndamento,
                required: TicketStatus::Resolvido,
            }
        ));
    }

    #[tokio::test]
    async fn transition_on_unknown_ticket_fails_not_found() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;

        let err = Model::start(&db, Uuid::new_v4(), f.colaborador.id, 3, long_note())
            .await
            .unwrap_err();

        assert!(matches!(err, LifecycleError::NotFound));
    }

    #[tokio::test]
    async fn full_lifecycle_grows_history_by_one_per_transition() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        Model::start(&db, ticket.id, f.colaborador.id, 3, long_note())
            .await
            .unwrap();
        Model::resolve(&db, ticket.id, long_solution(), None)
            .await
            .unwrap();
        let closed = Model::close(&db, ticket.id, 5, Some("Ótimo"), long_note())
            .await
            .unwrap();

        assert_eq!(closed.status, TicketStatus::Concluido);
        assert_eq!(closed.avaliacao, Some(5));
        assert_eq!(closed.comentario_avaliacao.as_deref(), Some("Ótimo"));
        assert_eq!(
            closed.comentario_confirmacao_usuario.as_deref(),
            Some(long_note())
        );

        let history = ticket_historico::Model::list_by_ticket(&db, ticket.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].status, TicketStatus::Concluido);
        assert_eq!(history[3].status, TicketStatus::Aberto);

        // Terminal: nothing leaves `concluido`.
        let err = Model::start(&db, ticket.id, f.colaborador.id, 1, long_note())
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn reopen_cycle_is_repeatable_and_keeps_resolution_fields() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        Model::start(&db, ticket.id, f.colaborador.id, 3, long_note())
            .await
            .unwrap();
        Model::resolve(&db, ticket.id, long_solution(), Some("ver ticket 1234"))
            .await
            .unwrap();

        let reopened = Model::reopen(&db, ticket.id, "não resolvido", "ainda cai a conexão")
            .await
            .unwrap();

        assert_eq!(reopened.status, TicketStatus::EmAndamento);
        assert_eq!(reopened.reabertura_motivo.as_deref(), Some("não resolvido"));
        assert_eq!(
            reopened.reabertura_detalhes.as_deref(),
            Some("ainda cai a conexão")
        );
        // Monotonic population: reopening does not erase the resolution.
        assert_eq!(reopened.solucao_aplicada.as_deref(), Some(long_solution()));
        assert_eq!(
            reopened.observacoes_internas.as_deref(),
            Some("ver ticket 1234")
        );

        // The cycle resolvido <-> em_andamento repeats without limit.
        let resolved_again = Model::resolve(&db, ticket.id, long_solution(), None)
            .await
            .unwrap();
        assert_eq!(resolved_again.status, TicketStatus::Resolvido);

        let history = ticket_historico::Model::list_by_ticket(&db, ticket.id)
            .await
            .unwrap();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].status, TicketStatus::Resolvido);
    }

    #[tokio::test]
    async fn reopen_requires_resolvido() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        let err = Model::reopen(&db, ticket.id, "motivo", "detalhes")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            LifecycleError::InvalidTransition {
                current: TicketStatus::Aberto,
                required: TicketStatus::Resolvido,
            }
        ));
    }

    #[tokio::test]
    async fn history_is_ordered_newest_first() {
        let db = setup_test_db().await;
        let f = setup_fixtures(&db).await;
        let ticket = create_ticket(&db, &f).await;

        Model::start(&db, ticket.id, f.colaborador.id, 3, long_note())
            .await
            .unwrap();
        Model::resolve(&db, ticket.id, long_solution(), None)
            .await
            .unwrap();

        let history = ticket_historico::Model::list_by_ticket(&db, ticket.id)
            .await
            .unwrap();

        assert_eq!(history.len(), 3);
        for pair in history.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(history[0].status, TicketStatus::Resolvido);
        assert_eq!(history[2].status, TicketStatus::Aberto);
    }
}
