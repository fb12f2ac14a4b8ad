use crate::auth::VerifiedUser;
use crate::core::types::Book;
use crate::error::ServiceError;
use crate::storage::BookRepository;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub edition: Option<String>,
}

pub async fn list_books(
    books: web::Data<Arc<dyn BookRepository>>,
) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(books.list().await?))
}

pub async fn get_book(
    id: web::Path<Uuid>,
    books: web::Data<Arc<dyn BookRepository>>,
) -> Result<HttpResponse, ServiceError> {
    match books.find(id.into_inner()).await? {
        Some(book) => Ok(HttpResponse::Ok().json(book)),
        None => Err(ServiceError::NotFound),
    }
}

/// Admin only; the creator is stamped from the verified identity.
pub async fn create_book(
    user: VerifiedUser,
    body: web::Json<NewBook>,
    books: web::Data<Arc<dyn BookRepository>>,
) -> Result<HttpResponse, ServiceError> {
    let body = body.into_inner();
    if body.title.trim().is_empty() || body.author.trim().is_empty() {
        return Err(ServiceError::BadRequest(
            "title and author are required".to_string(),
        ));
    }

    let book = books
        .save(Book {
            id: Uuid::new_v4(),
            title: body.title,
            author: body.author,
            edition: body.edition,
            created_by: user.username,
            created_at: Utc::now(),
        })
        .await?;
    info!("Book {} added by {}", book.id, book.created_by);
    Ok(HttpResponse::Created().json(book))
}

/// Admin only.
pub async fn delete_book(
    user: VerifiedUser,
    id: web::Path<Uuid>,
    books: web::Data<Arc<dyn BookRepository>>,
) -> Result<HttpResponse, ServiceError> {
    let id = id.into_inner();
    if !books.delete(id).await? {
        return Err(ServiceError::NotFound);
    }
    info!("Book {} deleted by {}", id, user.username);
    Ok(HttpResponse::NoContent().finish())
}
