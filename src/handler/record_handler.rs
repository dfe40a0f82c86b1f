use crate::dto::listing_dto::ListingParams;
use crate::dto::record_dto::{CompanyCreateDto, DeletedDto};
use crate::entity::caller::Caller;
use crate::entity::checkpoint::Checkpoint;
use crate::entity::company::Company;
use crate::entity::document::Document;
use crate::entity::employee::Employee;
use crate::entity::info_card::InfoCard;
use crate::entity::record::Record;
use crate::error::{AppError, request_error::ValidatedRequest};
use crate::repository::record_repository::RecordStore;
use crate::response::app_response::DataResponse;
use crate::service::query_builder::{self, ListingRequest};
use crate::state::record_state::RecordState;
use axum::extract::{Extension, Path, Query, State};
use tracing::info;

async fn list<R, S>(store: &S, caller: &Caller, params: ListingParams) -> Result<DataResponse<Vec<R>>, AppError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    let query = query_builder::build::<R>(&ListingRequest::from(params));
    let records = store.execute_listing(&query).await?;

    info!("{} listed {} {}", caller.identity, records.len(), R::TABLE);
    Ok(DataResponse::listing(records, query.page))
}

pub async fn list_companies(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListingParams>,
) -> Result<DataResponse<Vec<Company>>, AppError> {
    list(state.repositories.companies.as_ref(), &caller, params).await
}

pub async fn list_employees(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListingParams>,
) -> Result<DataResponse<Vec<Employee>>, AppError> {
    list(state.repositories.employees.as_ref(), &caller, params).await
}

pub async fn list_info_cards(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListingParams>,
) -> Result<DataResponse<Vec<InfoCard>>, AppError> {
    list(state.repositories.info_cards.as_ref(), &caller, params).await
}

pub async fn list_documents(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListingParams>,
) -> Result<DataResponse<Vec<Document>>, AppError> {
    list(state.repositories.documents.as_ref(), &caller, params).await
}

pub async fn list_checkpoints(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    Query(params): Query<ListingParams>,
) -> Result<DataResponse<Vec<Checkpoint>>, AppError> {
    list(state.repositories.checkpoints.as_ref(), &caller, params).await
}

pub async fn create_company(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    ValidatedRequest(payload): ValidatedRequest<CompanyCreateDto>,
) -> Result<DataResponse<Company>, AppError> {
    let company = state.repositories.companies.create_company(payload.into()).await?;
    info!("{} created company {}", caller.identity, company.id);
    Ok(DataResponse::created(company))
}

pub async fn delete_employee(
    State(state): State<RecordState>,
    Extension(caller): Extension<Caller>,
    Path(identity): Path<String>,
) -> Result<DataResponse<DeletedDto>, AppError> {
    state.auth_service.delete_credential(&identity).await?;
    info!("{} deleted employee {}", caller.identity, identity);
    Ok(DataResponse::ok(DeletedDto { identity }))
}
