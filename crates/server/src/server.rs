use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{dashboard, debts, expenses, exports, incomes, payroll, references, taxes};
use engine::{Engine, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<users::Model> = users::Entity::find()
        .filter(users::Column::Username.eq(auth_header.username()))
        .filter(users::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/companies",
            get(references::list_companies).post(references::company_new),
        )
        .route(
            "/companies/{id}/archive",
            post(references::company_archive),
        )
        .route(
            "/operators",
            get(references::list_operators).post(references::operator_new),
        )
        .route(
            "/operators/{id}/deactivate",
            post(references::operator_deactivate),
        )
        .route(
            "/staff",
            get(references::list_staff).post(references::staff_new),
        )
        .route("/staff/{id}/deactivate", post(references::staff_deactivate))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route(
            "/expenses/{id}",
            axum::routing::patch(expenses::update).delete(expenses::delete),
        )
        .route("/incomes", get(incomes::list).post(incomes::create))
        .route(
            "/incomes/{id}",
            axum::routing::patch(incomes::update).delete(incomes::delete),
        )
        .route("/payroll/operators", get(payroll::operator_payroll))
        .route("/payroll/staff", get(payroll::staff_payroll))
        .route(
            "/payroll/staff/payments",
            get(payroll::list_staff_payments).post(payroll::staff_payment_new),
        )
        .route(
            "/payroll/operators/adjustments",
            get(payroll::list_adjustments).post(payroll::adjustment_new),
        )
        .route("/taxes/estimate", get(taxes::estimate))
        .route("/debts", get(debts::list).post(debts::open))
        .route("/debts/{id}/settle", post(debts::settle))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/export/expenses.csv", get(exports::expenses_csv))
        .route("/export/incomes.csv", get(exports::incomes_csv))
        .route("/export/payroll.csv", get(exports::payroll_csv))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, header};
    use base64::Engine as _;
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::{ActiveValue, Database};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();

        let user = users::ActiveModel {
            username: ActiveValue::Set("alice".to_string()),
            password: ActiveValue::Set("password".to_string()),
        };
        users::Entity::insert(user).exec(&db).await.unwrap();

        let engine = Engine::builder().database(db.clone()).build().await.unwrap();
        router(ServerState {
            engine: Arc::new(engine),
            db,
        })
    }

    fn basic_auth() -> String {
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode("alice:password")
        )
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, basic_auth())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn requests_without_credentials_are_rejected() {
        let router = test_router().await;

        let request = Request::builder()
            .method("GET")
            .uri("/companies")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({}).to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let router = test_router().await;

        let request = Request::builder()
            .method("GET")
            .uri("/companies")
            .header(
                header::AUTHORIZATION,
                format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD.encode("alice:nope")
                ),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({}).to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn company_create_and_list_roundtrip() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/companies",
                serde_json::json!({ "name": "Main Hall", "extra": false }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(json_request("GET", "/companies", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["companies"][0]["name"], "Main Hall");
    }

    #[tokio::test]
    async fn duplicate_company_returns_conflict() {
        let router = test_router().await;

        let payload = serde_json::json!({ "name": "Main Hall" });
        let response = router
            .clone()
            .oneshot(json_request("POST", "/companies", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(json_request("POST", "/companies", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn inverted_dashboard_range_is_unprocessable() {
        let router = test_router().await;

        let response = router
            .oneshot(json_request(
                "GET",
                "/dashboard",
                serde_json::json!({
                    "from": "2026-03-10",
                    "to": "2026-03-01",
                    "granularity": "day"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn expense_create_validates_amounts() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/companies",
                serde_json::json!({ "name": "Main Hall" }),
            ))
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let company_id = created["id"].as_str().unwrap().to_string();

        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/expenses",
                serde_json::json!({
                    "date": "2026-03-01",
                    "company_id": company_id.as_str(),
                    "category": "supplies",
                    "cash_minor": 0,
                    "card_minor": 0
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = router
            .oneshot(json_request(
                "POST",
                "/expenses",
                serde_json::json!({
                    "date": "2026-03-01",
                    "company_id": company_id.as_str(),
                    "category": "supplies",
                    "cash_minor": 1500,
                    "card_minor": 0
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn expense_export_is_csv_with_bom() {
        let router = test_router().await;

        let response = router
            .oneshot(json_request(
                "GET",
                "/export/expenses.csv",
                serde_json::json!({ "from": "2026-03-01", "to": "2026-03-31" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap(),
            "text/csv; charset=utf-8"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }
}
