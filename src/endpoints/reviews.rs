use crate::auth::VerifiedUser;
use crate::core::types::Review;
use crate::error::ServiceError;
use crate::storage::ReviewRepository;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize)]
pub struct NewReview {
    pub book_id: Uuid,
    pub rating: u8,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub book_id: Option<Uuid>,
}

pub async fn list_reviews(
    query: web::Query<ReviewQuery>,
    reviews: web::Data<Arc<dyn ReviewRepository>>,
) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok().json(reviews.list_for_book(query.book_id).await?))
}

/// The review's author is always the verified user, never a body field.
pub async fn create_review(
    user: VerifiedUser,
    body: web::Json<NewReview>,
    reviews: web::Data<Arc<dyn ReviewRepository>>,
) -> Result<HttpResponse, ServiceError> {
    let body = body.into_inner();
    if !(1..=5).contains(&body.rating) {
        return Err(ServiceError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let review = reviews
        .save(Review {
            id: Uuid::new_v4(),
            book_id: body.book_id,
            author: user.username,
            rating: body.rating,
            body: body.body,
            created_at: Utc::now(),
        })
        .await?;
    info!("Review {} on book {} by {}", review.id, review.book_id, review.author);
    Ok(HttpResponse::Created().json(review))
}

/// Only the review's author may delete it.
pub async fn delete_review(
    user: VerifiedUser,
    id: web::Path<Uuid>,
    reviews: web::Data<Arc<dyn ReviewRepository>>,
) -> Result<HttpResponse, ServiceError> {
    let id = id.into_inner();
    let review = reviews.find(id).await?.ok_or(ServiceError::NotFound)?;
    if review.author != user.username {
        warn!("{} tried to delete review {} by {}", user.username, id, review.author);
        return Err(ServiceError::Forbidden);
    }

    reviews.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
