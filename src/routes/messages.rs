use crate::{
    db::Db,
    errors::ApiError,
    models::{MessagesCount, PostMessage},
};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListQuery {
    // The parameter name is uppercase on the wire.
    #[serde(rename = "OFFSET")]
    pub offset: i64,
}

/// POST /messages. Malformed JSON is rejected by the extractor before we
/// get here; empty text is rejected before the store sees anything.
pub async fn post_message(
    db: web::Data<Db>,
    body: web::Json<PostMessage>,
) -> Result<HttpResponse, ApiError> {
    if body.text.is_empty() {
        return Err(ApiError::BadRequest("message text must not be empty".into()));
    }

    db.add_message(&body.text).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({"status": "Message received"})))
}

/// GET /messages?OFFSET=n. Returns every message from the n-th on; an
/// empty table yields `[]`, not null.
pub async fn list_messages(
    db: web::Data<Db>,
    q: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    if q.offset < 0 {
        return Err(ApiError::BadRequest("OFFSET must not be negative".into()));
    }

    let msgs = db.list_messages(q.offset).await?;
    Ok(HttpResponse::Ok().json(msgs))
}

/// GET /messages/count. Responds 201; existing clients expect that
/// status here.
pub async fn count_messages(db: web::Data<Db>) -> Result<HttpResponse, ApiError> {
    let count = db.count_messages().await?;
    Ok(HttpResponse::Created().json(MessagesCount { count }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header;
    use actix_web::{test, App};
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    // A pool that never dials out. Requests that are rejected during
    // validation must succeed against it; anything that touches the
    // store would hang on connect and fail the test.
    fn unreachable_db() -> Db {
        let opts = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nowhere");
        Db(PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy_with(opts))
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(unreachable_db()))
                    .route("/messages", web::post().to(post_message))
                    .route("/messages", web::get().to(list_messages))
                    .route("/messages/count", web::get().to(count_messages)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn empty_text_is_rejected_before_the_store() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/messages")
            .set_json(serde_json::json!({"text": ""}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn malformed_json_is_rejected() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/messages")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn missing_text_field_is_rejected() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/messages")
            .set_json(serde_json::json!({"body": "hi"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn offset_must_be_present_and_an_integer() {
        let app = test_app!();
        for uri in ["/messages", "/messages?OFFSET=abc", "/messages?offset=3"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status().as_u16(), 400, "uri: {uri}");
        }
    }

    #[actix_web::test]
    async fn negative_offset_is_rejected() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/messages?OFFSET=-1")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
    }

    #[actix_web::test]
    async fn store_failure_maps_to_500() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/messages/count").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 500);
    }
}
