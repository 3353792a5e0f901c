use actix_web::{HttpResponse, web};
use serde_json::Value;

use crate::errors::AppError;
use crate::store::{Collection, MockStore, Record};

/// Fields a create must carry, per collection.
fn required_fields(collection: Collection) -> &'static [&'static str] {
    match collection {
        Collection::Pessoas => &["nome", "email"],
        Collection::Salas => &["nome"],
        Collection::Reunioes => &["titulo", "dataHoraInicio"],
        Collection::Tarefas => &["descricao"],
    }
}

fn into_record(body: Value) -> Result<Record, AppError> {
    match body {
        Value::Object(record) => Ok(record),
        _ => Err(AppError::BadRequest("Body must be a JSON object".to_string())),
    }
}

fn not_found(collection: Collection, id: &str) -> AppError {
    AppError::NotFound(format!("{} {} does not exist", collection.path(), id))
}

/// GET /{collection}
pub async fn list(
    store: web::Data<MockStore>,
    collection: web::Data<Collection>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.list(**collection)))
}

/// GET /{collection}/{id}
pub async fn read(
    store: web::Data<MockStore>,
    collection: web::Data<Collection>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let record = store
        .get(**collection, &id)
        .ok_or_else(|| not_found(**collection, &id))?;
    Ok(HttpResponse::Ok().json(record))
}

/// POST /{collection}
pub async fn create(
    store: web::Data<MockStore>,
    collection: web::Data<Collection>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let record = into_record(body.into_inner())?;

    let missing: Vec<&str> = required_fields(**collection)
        .iter()
        .copied()
        .filter(|field| match record.get(*field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        })
        .collect();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!("Missing required fields: {}", missing.join(", "))));
    }

    let created = store.insert(**collection, record);
    log::info!("{}: created {:?}", collection.path(), created.get("id"));
    Ok(HttpResponse::Created().json(created))
}

/// PUT or PATCH /{collection}/{id}. Both merge the given fields.
pub async fn update(
    store: web::Data<MockStore>,
    collection: web::Data<Collection>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let changes = into_record(body.into_inner())?;
    let updated = store
        .update(**collection, &id, changes)
        .ok_or_else(|| not_found(**collection, &id))?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /{collection}/{id}
pub async fn delete(
    store: web::Data<MockStore>,
    collection: web::Data<Collection>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !store.remove(**collection, &id) {
        return Err(not_found(**collection, &id));
    }
    log::info!("{}: deleted {}", collection.path(), id);
    Ok(HttpResponse::NoContent().finish())
}
