//! Request router: maps gateway requests onto repository operations.
//!
//! | Method | Path           | Success                              |
//! |--------|----------------|--------------------------------------|
//! | GET    | `/fatwa`       | 200, every record                    |
//! | GET    | `/fatwa/{id}`  | 200, the record                      |
//! | POST   | `/fatwa`       | 201, created record, `Location`      |
//! | PUT    | `/fatwa/{id}`  | 200, replaced record, `Location`     |
//! | DELETE | `/fatwa/{id}`  | 200, deleted record                  |
//!
//! Failures answer with the status phrase as a plain-text body. Store failures
//! are logged and answered with 500; they never reach the Lambda runtime.

use crate::{
    model::{CreateFatwa, UpdateFatwa},
    repository::FatwaRepository,
    table::{Conditional, Table},
};

use lambda_http::{
    Body, Error, Request, RequestExt, Response,
    http::{Method, StatusCode, header},
};
use serde::{Serialize, de::DeserializeOwned};

/// Path the records are served under.
pub const RESOURCE_PATH: &str = "/fatwa";

/// Name of the path parameter carrying the record id.
pub const ID_PARAMETER: &str = "id";

/// Handle one gateway request.
///
/// The only error returned is a failure to build the response itself.
pub async fn handle<T: Table>(
    repository: &FatwaRepository<T>,
    request: Request,
) -> Result<Response<Body>, Error> {
    let id = path_id(&request);
    tracing::info!(
        method = %request.method(),
        path = request.uri().path(),
        id = id.as_deref(),
        "received request"
    );
    match *request.method() {
        Method::GET => match id {
            Some(id) => get_fatwa(repository, &id).await,
            None => list_fatawa(repository).await,
        },
        Method::POST => create_fatwa(repository, request.body()).await,
        Method::DELETE => match id {
            Some(id) => delete_fatwa(repository, &id).await,
            None => client_error(StatusCode::BAD_REQUEST),
        },
        Method::PUT => match id {
            Some(id) => update_fatwa(repository, &id, request.body()).await,
            None => client_error(StatusCode::BAD_REQUEST),
        },
        _ => client_error(StatusCode::METHOD_NOT_ALLOWED),
    }
}

fn path_id(request: &Request) -> Option<String> {
    let parameters = request.path_parameters();
    parameters
        .first(ID_PARAMETER)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn location(id: &str) -> String {
    format!("{RESOURCE_PATH}/{id}")
}

async fn get_fatwa<T: Table>(
    repository: &FatwaRepository<T>,
    id: &str,
) -> Result<Response<Body>, Error> {
    match repository.get(id).await {
        Ok(Some(fatwa)) => json_response(StatusCode::OK, &fatwa, None),
        Ok(None) => client_error(StatusCode::NOT_FOUND),
        Err(err) => server_error(&err),
    }
}

async fn list_fatawa<T: Table>(repository: &FatwaRepository<T>) -> Result<Response<Body>, Error> {
    match repository.list_all().await {
        Ok(fatawa) => {
            tracing::info!(count = fatawa.len(), "listed fatawa");
            json_response(StatusCode::OK, &fatawa, None)
        }
        Err(err) => server_error(&err),
    }
}

async fn create_fatwa<T: Table>(
    repository: &FatwaRepository<T>,
    body: &Body,
) -> Result<Response<Body>, Error> {
    let create: CreateFatwa = match parse_body(body) {
        Ok(create) => create,
        Err(status) => return client_error(status),
    };
    if let Err(err) = create.validate() {
        tracing::info!(error = %err, "invalid body");
        return client_error(StatusCode::BAD_REQUEST);
    }
    match repository.insert(create).await {
        Ok(fatwa) => {
            tracing::info!(id = %fatwa.id, "inserted fatwa");
            json_response(StatusCode::CREATED, &fatwa, Some(location(&fatwa.id)))
        }
        Err(err) => server_error(&err),
    }
}

async fn update_fatwa<T: Table>(
    repository: &FatwaRepository<T>,
    id: &str,
    body: &Body,
) -> Result<Response<Body>, Error> {
    let update: UpdateFatwa = match parse_body(body) {
        Ok(update) => update,
        Err(status) => return client_error(status),
    };
    if let Err(err) = update.validate() {
        tracing::info!(error = %err, "invalid body");
        return client_error(StatusCode::BAD_REQUEST);
    }
    match repository.update(id, update).await {
        Ok(Conditional::Applied(fatwa)) => {
            tracing::info!(id = %fatwa.id, "updated fatwa");
            json_response(StatusCode::OK, &fatwa, Some(location(&fatwa.id)))
        }
        Ok(Conditional::ConditionFailed) => client_error(StatusCode::NOT_FOUND),
        Err(err) => server_error(&err),
    }
}

async fn delete_fatwa<T: Table>(
    repository: &FatwaRepository<T>,
    id: &str,
) -> Result<Response<Body>, Error> {
    match repository.delete(id).await {
        Ok(Some(fatwa)) => {
            tracing::info!(id = %fatwa.id, "deleted fatwa");
            json_response(StatusCode::OK, &fatwa, None)
        }
        Ok(None) => client_error(StatusCode::NOT_FOUND),
        Err(err) => server_error(&err),
    }
}

/// A JSON `null` body reads as an empty body and is left to validation.
fn parse_body<B: DeserializeOwned + Default>(body: &Body) -> Result<B, StatusCode> {
    serde_json::from_slice::<Option<B>>(body.as_ref())
        .map(Option::unwrap_or_default)
        .map_err(|err| {
            tracing::info!(error = %err, "can't deserialize body");
            StatusCode::UNPROCESSABLE_ENTITY
        })
}

fn json_response<V: Serialize>(
    status: StatusCode,
    value: &V,
    location: Option<String>,
) -> Result<Response<Body>, Error> {
    let body = match serde_json::to_string(value) {
        Ok(body) => body,
        Err(err) => return server_error(&err),
    };
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(location) = location {
        builder = builder.header(header::LOCATION, location);
    }
    Ok(builder.body(Body::Text(body))?)
}

fn client_error(status: StatusCode) -> Result<Response<Body>, Error> {
    let phrase = status.canonical_reason().unwrap_or_default();
    let response = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::Text(phrase.to_string()))?;
    Ok(response)
}

fn server_error(err: &dyn std::error::Error) -> Result<Response<Body>, Error> {
    tracing::error!(error = %err, "request failed");
    client_error(StatusCode::INTERNAL_SERVER_ERROR)
}
