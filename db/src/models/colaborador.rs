use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::DeriveActiveEnum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "colaboradores")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub nome: String,
    pub cargo: Cargo,
    pub cpf: String,

    pub created_at: DateTime<Utc>,
}

/// Support tier of a collaborator (`n1` to `n3`, plus team lead).
#[derive(
    Debug, Clone, PartialEq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cargo")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Cargo {
    #[sea_orm(string_value = "n1")]
    N1,

    #[sea_orm(string_value = "n2")]
    N2,

    #[sea_orm(string_value = "n3")]
    N3,

    #[sea_orm(string_value = "lider")]
    Lider,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket::Entity")]
    Ticket,
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        nome: &str,
        cargo: Cargo,
        cpf: &str,
    ) -> Result<Model, DbErr> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            nome: Set(nome.to_owned()),
            cargo: Set(cargo),
            cpf: Set(cpf.to_owned()),
            created_at: Set(Utc::now()),
        };

        active_model.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: Uuid) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().all(db).await
    }

    /// Applies a partial update; `None` fields keep their current value.
    pub async fn edit(
        db: &DbConn,
        id: Uuid,
        nome: Option<&str>,
        cargo: Option<Cargo>,
    ) -> Result<Model, DbErr> {
        let model = Entity::find_by_id(id).one(db).await?;

        let model = match model {
            Some(m) => m,
            None => return Err(DbErr::RecordNotFound("Colaborador not found".to_string())),
        };

        let mut active_model: ActiveModel = model.into();
        if let Some(nome) = nome {
            active_model.nome = Set(nome.to_owned());
        }
        if let Some(cargo) = cargo {
            active_model.cargo = Set(cargo);
        }
        active_model.update(db).await
    }

    /// Deletes the collaborator, reporting whether a row was removed.
    pub async fn delete(db: &DbConn, id: Uuid) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
