use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};

use pickleball_server::http;
use pickleball_server::session::{SessionStore, SessionUser, ADMIN_ROLE, SESSION_COOKIE};

fn session_user(role: &str) -> SessionUser {
    SessionUser {
        id: 1,
        username: "alice".into(),
        role: role.into(),
    }
}

#[actix_web::test]
async fn api_test_probe_needs_no_session() {
    let app = test::init_service(App::new().service(
        web::scope("/api").configure(http::health::init_routes),
    ))
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/test").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "API test route working");
}

#[actix_web::test]
async fn gated_page_redirects_without_session() {
    let sessions = web::Data::new(SessionStore::new());
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/home").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}

#[actix_web::test]
async fn gated_page_renders_with_session() {
    let sessions = web::Data::new(SessionStore::new());
    let sid = sessions.create(session_user("user"));
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/home")
        .cookie(Cookie::new(SESSION_COOKIE, sid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let page = String::from_utf8_lossy(&body);
    assert!(page.contains("alice"));
}

#[actix_web::test]
async fn admin_page_forbidden_for_regular_user() {
    let sessions = web::Data::new(SessionStore::new());
    let sid = sessions.create(session_user("user"));
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dstd_admin")
        .cookie(Cookie::new(SESSION_COOKIE, sid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admin_page_renders_for_admin() {
    let sessions = web::Data::new(SessionStore::new());
    let sid = sessions.create(session_user(ADMIN_ROLE));
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dstd_admin")
        .cookie(Cookie::new(SESSION_COOKIE, sid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn admin_page_redirects_without_session() {
    let sessions = web::Data::new(SessionStore::new());
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/dstd_admin").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn root_redirects_to_home() {
    let sessions = web::Data::new(SessionStore::new());
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/home");
}

#[actix_web::test]
async fn logout_destroys_the_session() {
    let sessions = web::Data::new(SessionStore::new());
    let sid = sessions.create(session_user("user"));
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes)
            .service(pickleball_server::http::auth::logout),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(Cookie::new(SESSION_COOKIE, sid.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

    // The old cookie no longer resolves.
    let req = test::TestRequest::get()
        .uri("/home")
        .cookie(Cookie::new(SESSION_COOKIE, sid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn expired_session_is_rejected() {
    let sessions = web::Data::new(SessionStore::new());
    let sid = sessions.create_with_ttl(session_user("user"), chrono::Duration::seconds(-1));
    let app = test::init_service(
        App::new()
            .app_data(sessions.clone())
            .configure(http::pages::init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/home")
        .cookie(Cookie::new(SESSION_COOKIE, sid))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}
