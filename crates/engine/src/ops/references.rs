//! Reference tables: companies, operators, staff.
//!
//! Names are unique after NFC normalization and trimming. Rows are never
//! hard-deleted once journal rows can reference them; they archive instead.

use std::collections::HashSet;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Company, EngineError, Operator, ResultEngine, StaffMember, companies, operators, staff,
    util::normalize_name,
};

use super::Engine;

impl Engine {
    /// Create a company, rejecting duplicate names.
    pub async fn new_company(&self, name: &str, extra: bool) -> ResultEngine<Uuid> {
        let name = normalize_name(name, "company")?;

        let existing = companies::Entity::find()
            .filter(companies::Column::Name.eq(name.clone()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let company = Company::new(name, extra);
        let id = company.id;
        companies::ActiveModel::from(&company)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn list_companies(&self, include_archived: bool) -> ResultEngine<Vec<Company>> {
        let mut query = companies::Entity::find().order_by_asc(companies::Column::Name);
        if !include_archived {
            query = query.filter(companies::Column::Archived.eq(false));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Company::try_from).collect()
    }

    /// Archive a company. Existing journal rows keep referencing it.
    pub async fn archive_company(&self, company_id: Uuid) -> ResultEngine<()> {
        self.require_company(company_id).await?;
        let model = companies::ActiveModel {
            id: ActiveValue::Set(company_id.to_string()),
            archived: ActiveValue::Set(true),
            ..Default::default()
        };
        model.update(&self.database).await?;
        Ok(())
    }

    /// Create an operator, rejecting duplicate names.
    pub async fn new_operator(
        &self,
        name: &str,
        shift_rate_minor: i64,
        revenue_share_bps: i64,
    ) -> ResultEngine<Uuid> {
        let name = normalize_name(name, "operator")?;

        let existing = operators::Entity::find()
            .filter(operators::Column::Name.eq(name.clone()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let operator = Operator::new(name, shift_rate_minor, revenue_share_bps)?;
        let id = operator.id;
        operators::ActiveModel::from(&operator)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn list_operators(&self, include_inactive: bool) -> ResultEngine<Vec<Operator>> {
        let mut query = operators::Entity::find().order_by_asc(operators::Column::Name);
        if !include_inactive {
            query = query.filter(operators::Column::Active.eq(true));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Operator::try_from).collect()
    }

    pub async fn deactivate_operator(&self, operator_id: Uuid) -> ResultEngine<()> {
        self.require_operator(operator_id).await?;
        let model = operators::ActiveModel {
            id: ActiveValue::Set(operator_id.to_string()),
            active: ActiveValue::Set(false),
            ..Default::default()
        };
        model.update(&self.database).await?;
        Ok(())
    }

    /// Create a staff member, rejecting duplicate names.
    pub async fn new_staff(&self, name: &str, monthly_salary_minor: i64) -> ResultEngine<Uuid> {
        let name = normalize_name(name, "staff")?;

        let existing = staff::Entity::find()
            .filter(staff::Column::Name.eq(name.clone()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey(name));
        }

        let member = StaffMember::new(name, monthly_salary_minor)?;
        let id = member.id;
        staff::ActiveModel::from(&member)
            .insert(&self.database)
            .await?;
        Ok(id)
    }

    pub async fn list_staff(&self, include_inactive: bool) -> ResultEngine<Vec<StaffMember>> {
        let mut query = staff::Entity::find().order_by_asc(staff::Column::Name);
        if !include_inactive {
            query = query.filter(staff::Column::Active.eq(true));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(StaffMember::try_from).collect()
    }

    pub async fn deactivate_staff(&self, staff_id: Uuid) -> ResultEngine<()> {
        self.require_staff(staff_id).await?;
        let model = staff::ActiveModel {
            id: ActiveValue::Set(staff_id.to_string()),
            active: ActiveValue::Set(false),
            ..Default::default()
        };
        model.update(&self.database).await?;
        Ok(())
    }

    pub(crate) async fn require_company(&self, company_id: Uuid) -> ResultEngine<Company> {
        let model = companies::Entity::find_by_id(company_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("company".to_string()))?;
        Company::try_from(model)
    }

    pub(crate) async fn require_operator(&self, operator_id: Uuid) -> ResultEngine<Operator> {
        let model = operators::Entity::find_by_id(operator_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("operator".to_string()))?;
        Operator::try_from(model)
    }

    pub(crate) async fn require_staff(&self, staff_id: Uuid) -> ResultEngine<StaffMember> {
        let model = staff::Entity::find_by_id(staff_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("staff".to_string()))?;
        StaffMember::try_from(model)
    }

    /// Ids of companies flagged as extra revenue streams, as stored strings.
    pub(crate) async fn extra_company_ids(&self) -> ResultEngine<HashSet<String>> {
        let models = companies::Entity::find()
            .filter(companies::Column::Extra.eq(true))
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(|m| m.id).collect())
    }
}
