//! Student and faculty directory handlers.
//!
//! ```text
//! GET /AddStudent/?ID=S1&NAME=Asha&MOBILE=..&DOB=..&GENDER=..&CATEGORY=..&BRANCH=..
//!     &EMC_NAME=..&EMC_MOBILE=..&EMC_RELATIONSHIP=..
//! GET /AddFaculty/?ID=F1&NAME=..&MOBILE=..&DOB=..&GENDER=..&ACCESS_ID=..
//! GET /GetStudent/?ID=S1      GET /GetFaculty/?ID=F1
//! GET /DeleteStudent/?ID=S1   GET /DeleteFaculty/?ID=F1
//! ```
//!
//! Every handler resolves the session token before looking at the query
//! string, so an unauthenticated caller never reaches the record store and
//! never learns which parameters were wrong.

use actix_web::{HttpRequest, get, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::ports::EntityOutcome;
use crate::domain::{
    BearerToken, Collection, EmergencyContact, EntityId, EntityIdValidationError, EntityRecord,
    EntityRecordValidationError, Error, FacultyRecord, NewEntity, StudentRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query for `GET /AddStudent/`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[into_params(parameter_in = Query)]
pub struct AddStudentQuery {
    /// Record identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Date of birth.
    pub dob: String,
    /// Gender.
    pub gender: String,
    /// Admission category.
    pub category: String,
    /// Branch of study.
    pub branch: String,
    /// Emergency contact name.
    pub emc_name: String,
    /// Emergency contact mobile number.
    pub emc_mobile: String,
    /// Emergency contact's relationship to the student.
    pub emc_relationship: String,
}

/// Query for `GET /AddFaculty/`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[into_params(parameter_in = Query)]
pub struct AddFacultyQuery {
    /// Record identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Date of birth.
    pub dob: String,
    /// Gender.
    pub gender: String,
    /// Staff access identifier.
    pub access_id: String,
}

/// Query naming a single record.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[into_params(parameter_in = Query)]
pub struct EntityIdQuery {
    /// Record identifier.
    pub id: String,
}

/// Confirmation of a create or delete.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityOutcomeResponse {
    /// Confirmation such as `Added Student: Asha`.
    #[schema(example = "Added Student: Asha")]
    pub message: String,
    /// Collection name.
    #[schema(example = "Student")]
    pub collection: String,
    /// Record identifier.
    #[schema(example = "S1")]
    pub id: String,
    /// Display name; empty when a deleted record had none.
    #[schema(example = "Asha")]
    pub name: String,
}

impl From<EntityOutcome> for EntityOutcomeResponse {
    fn from(outcome: EntityOutcome) -> Self {
        Self {
            message: outcome.message(),
            collection: outcome.collection().to_string(),
            id: outcome.id().to_string(),
            name: outcome.name().to_owned(),
        }
    }
}

/// A stored record as read back from the directory.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecordResponse {
    /// Collection name.
    pub collection: String,
    /// Record identifier.
    pub id: String,
    /// Record fields using the stored upper-case names.
    #[schema(value_type = Object)]
    pub record: serde_json::Value,
}

fn parse_query<Q: DeserializeOwned>(req: &HttpRequest) -> Result<Q, Error> {
    web::Query::<Q>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|err| Error::invalid_request(format!("invalid query: {err}")))
}

fn parse_id(raw: String) -> Result<EntityId, Error> {
    EntityId::new(raw).map_err(|err: EntityIdValidationError| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "ID" }))
    })
}

fn map_record_validation_error(err: EntityRecordValidationError) -> Error {
    match err {
        EntityRecordValidationError::EmptyName => {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "NAME" }))
        }
    }
}

impl TryFrom<AddStudentQuery> for NewEntity {
    type Error = Error;

    fn try_from(query: AddStudentQuery) -> Result<Self, Self::Error> {
        let id = parse_id(query.id)?;
        let record = StudentRecord {
            name: query.name,
            mobile: query.mobile,
            dob: query.dob,
            gender: query.gender,
            category: query.category,
            branch: query.branch,
            emergency_contact: EmergencyContact {
                name: query.emc_name,
                mobile: query.emc_mobile,
                relationship: query.emc_relationship,
            },
        };
        NewEntity::new(id, EntityRecord::Student(record)).map_err(map_record_validation_error)
    }
}

impl TryFrom<AddFacultyQuery> for NewEntity {
    type Error = Error;

    fn try_from(query: AddFacultyQuery) -> Result<Self, Self::Error> {
        let id = parse_id(query.id)?;
        let record = FacultyRecord {
            name: query.name,
            mobile: query.mobile,
            dob: query.dob,
            gender: query.gender,
            access_id: query.access_id,
        };
        NewEntity::new(id, EntityRecord::Faculty(record)).map_err(map_record_validation_error)
    }
}

fn require_token(state: &HttpState, session: &SessionContext) -> Result<BearerToken, Error> {
    session.require_token(state.clock.utc())
}

async fn create<Q>(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityOutcomeResponse>>
where
    Q: DeserializeOwned,
    NewEntity: TryFrom<Q, Error = Error>,
{
    let token = require_token(&state, &session)?;
    let entity = NewEntity::try_from(parse_query::<Q>(&req)?)?;
    let outcome = state.directory.create_entity(&token, entity).await?;
    Ok(web::Json(outcome.into()))
}

async fn read(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    collection: Collection,
) -> ApiResult<web::Json<EntityRecordResponse>> {
    let token = require_token(&state, &session)?;
    let id = parse_id(parse_query::<EntityIdQuery>(&req)?.id)?;
    let record = state.directory.read_entity(&token, collection, &id).await?;
    let value = record
        .to_value()
        .map_err(|err| Error::internal(format!("failed to encode record: {err}")))?;
    Ok(web::Json(EntityRecordResponse {
        collection: collection.to_string(),
        id: id.to_string(),
        record: value,
    }))
}

async fn delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
    collection: Collection,
) -> ApiResult<web::Json<EntityOutcomeResponse>> {
    let token = require_token(&state, &session)?;
    let id = parse_id(parse_query::<EntityIdQuery>(&req)?.id)?;
    let outcome = state.directory.delete_entity(&token, collection, &id).await?;
    Ok(web::Json(outcome.into()))
}

/// Create a student record.
#[utoipa::path(
    get,
    path = "/AddStudent/",
    params(AddStudentQuery),
    responses(
        (status = 200, description = "Student added", body = EntityOutcomeResponse),
        (status = 400, description = "Missing or invalid parameter", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Student already exists", body = ErrorSchema),
        (status = 502, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "addStudent"
)]
#[get("/AddStudent/")]
pub async fn add_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityOutcomeResponse>> {
    create::<AddStudentQuery>(state, session, req).await
}

/// Read a student record.
#[utoipa::path(
    get,
    path = "/GetStudent/",
    params(EntityIdQuery),
    responses(
        (status = 200, description = "Student record", body = EntityRecordResponse),
        (status = 400, description = "Missing or invalid ID", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such student", body = ErrorSchema),
        (status = 502, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/GetStudent/")]
pub async fn get_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityRecordResponse>> {
    read(state, session, req, Collection::Student).await
}

/// Delete a student record, reporting its name.
#[utoipa::path(
    get,
    path = "/DeleteStudent/",
    params(EntityIdQuery),
    responses(
        (status = 200, description = "Student removed", body = EntityOutcomeResponse),
        (status = 400, description = "Missing or invalid ID", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 502, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[get("/DeleteStudent/")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityOutcomeResponse>> {
    delete(state, session, req, Collection::Student).await
}

/// Create a faculty record.
#[utoipa::path(
    get,
    path = "/AddFaculty/",
    params(AddFacultyQuery),
    responses(
        (status = 200, description = "Faculty added", body = EntityOutcomeResponse),
        (status = 400, description = "Missing or invalid parameter", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Faculty already exists", body = ErrorSchema),
        (status = 502, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "addFaculty"
)]
#[get("/AddFaculty/")]
pub async fn add_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityOutcomeResponse>> {
    create::<AddFacultyQuery>(state, session, req).await
}

/// Read a faculty record.
#[utoipa::path(
    get,
    path = "/GetFaculty/",
    params(EntityIdQuery),
    responses(
        (status = 200, description = "Faculty record", body = EntityRecordResponse),
        (status = 400, description = "Missing or invalid ID", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No such faculty", body = ErrorSchema),
        (status = 502, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "getFaculty"
)]
#[get("/GetFaculty/")]
pub async fn get_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityRecordResponse>> {
    read(state, session, req, Collection::Faculty).await
}

/// Delete a faculty record, reporting its name.
#[utoipa::path(
    get,
    path = "/DeleteFaculty/",
    params(EntityIdQuery),
    responses(
        (status = 200, description = "Faculty removed", body = EntityOutcomeResponse),
        (status = 400, description = "Missing or invalid ID", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 502, description = "Record store failure", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "deleteFaculty"
)]
#[get("/DeleteFaculty/")]
pub async fn delete_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> ApiResult<web::Json<EntityOutcomeResponse>> {
    delete(state, session, req, Collection::Faculty).await
}

#[cfg(test)]
#[path = "entities_tests.rs"]
mod tests;
