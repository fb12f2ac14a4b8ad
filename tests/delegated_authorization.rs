use actix_web::{test, web, App};
use bookshelf_auth::auth::USER_NAME_HEADER;
use bookshelf_auth::core::types::{Book, Review};
use bookshelf_auth::endpoints::books::NewBook;
use bookshelf_auth::endpoints::reviews::NewReview;
use bookshelf_auth::error::{ErrorBody, GENERIC_SERVER_ERROR};
use bookshelf_auth::routes::{init_book_routes, init_review_routes};
use bookshelf_auth::storage::mock::CountingBookRepository;
use bookshelf_auth::storage::{
    BookRepository, MemoryBookRepository, MemoryReviewRepository, ReviewRepository,
};
use bookshelf_auth::{AuthForwarder, DomainEndpoints};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forwarder(base_url: &str) -> Arc<AuthForwarder> {
    Arc::new(AuthForwarder::new(DomainEndpoints::from_base_url(base_url), None).unwrap())
}

fn dune() -> NewBook {
    NewBook {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        edition: None,
    }
}

fn unused_port_url() -> String {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{}", port)
}

#[actix_web::test]
async fn test_account_denial_is_relayed_and_save_never_runs() {
    let _ = env_logger::builder().is_test(true).try_init();
    let account = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/inter-service/admin"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&account)
        .await;

    let repo = Arc::new(CountingBookRepository::new(MemoryBookRepository::new()));
    let books: Arc<dyn BookRepository> = repo.clone();
    let forwarder = forwarder(&account.uri());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(books))
            .configure(|cfg| init_book_routes(cfg, forwarder)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/books")
        .insert_header(("Authorization", "Bearer user-token"))
        .set_json(&dune())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 403);
    assert_eq!(test::read_body(resp).await, "Forbidden");
    assert_eq!(repo.save_calls(), 0);
}

#[actix_web::test]
async fn test_other_upstream_statuses_are_relayed_verbatim() {
    let account = MockServer::start().await;
    Mock::given(path("/api/inter-service/admin"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&account)
        .await;

    let repo = Arc::new(CountingBookRepository::new(MemoryBookRepository::new()));
    let books: Arc<dyn BookRepository> = repo.clone();
    let forwarder = forwarder(&account.uri());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(books))
            .configure(|cfg| init_book_routes(cfg, forwarder)),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/books/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(test::read_body(resp).await, "Unauthorized");
}

#[actix_web::test]
async fn test_unreachable_account_service_is_a_generic_500() {
    let repo = Arc::new(CountingBookRepository::new(MemoryBookRepository::new()));
    let books: Arc<dyn BookRepository> = repo.clone();
    let forwarder = forwarder(&unused_port_url());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(books))
            .configure(|cfg| init_book_routes(cfg, forwarder)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/books")
        .insert_header(("Authorization", "Bearer admin-token"))
        .set_json(&dune())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, GENERIC_SERVER_ERROR);
    assert_eq!(repo.save_calls(), 0);
}

#[actix_web::test]
async fn test_approved_admin_creates_book_as_verified_user() {
    let account = MockServer::start().await;
    Mock::given(path("/api/inter-service/admin"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).insert_header(USER_NAME_HEADER, "alice"))
        .expect(1)
        .mount(&account)
        .await;

    let repo = Arc::new(CountingBookRepository::new(MemoryBookRepository::new()));
    let books: Arc<dyn BookRepository> = repo.clone();
    let forwarder = forwarder(&account.uri());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(books))
            .configure(|cfg| init_book_routes(cfg, forwarder)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/books")
        .insert_header(("Authorization", "Bearer admin-token"))
        .set_json(&dune())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let book: Book = test::read_body_json(resp).await;
    assert_eq!(book.created_by, "alice");
    assert_eq!(repo.save_calls(), 1);
}

#[actix_web::test]
async fn test_public_reads_skip_the_account_service() {
    let account = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&account)
        .await;

    let books: Arc<dyn BookRepository> = Arc::new(MemoryBookRepository::new());
    let forwarder = forwarder(&account.uri());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(books))
            .configure(|cfg| init_book_routes(cfg, forwarder)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/books").to_request();
    let listed: Vec<Book> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}

#[actix_web::test]
async fn test_review_author_comes_from_user_domain_verification() {
    let account = MockServer::start().await;
    Mock::given(path("/api/inter-service/user"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).insert_header(USER_NAME_HEADER, "alice"))
        .mount(&account)
        .await;

    let reviews: Arc<dyn ReviewRepository> = Arc::new(MemoryReviewRepository::new());
    let forwarder = forwarder(&account.uri());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(reviews.clone()))
            .configure(|cfg| init_review_routes(cfg, forwarder)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/reviews")
        .insert_header(("Authorization", "Bearer user-token"))
        .set_json(&NewReview {
            book_id: Uuid::new_v4(),
            rating: 4,
            body: "Sand everywhere".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let review: Review = test::read_body_json(resp).await;
    assert_eq!(review.author, "alice");
    assert_eq!(reviews.list_for_book(None).await.unwrap().len(), 1);
}
