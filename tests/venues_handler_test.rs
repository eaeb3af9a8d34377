//! Integration tests for venue routes
//!
//! Covers:
//! - Grouped listing and search
//! - Detail page with past/upcoming shows
//! - Create, edit and delete submissions

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Local};
use pretty_assertions::assert_eq;
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use fyyur::db::entities::{show, venue};
use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    handlers::app_routes().with_state(state.clone())
}

fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

fn venue_fields<'a>(name: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("genres", "Jazz"),
        ("genres", "Reggae"),
        ("genres", "Swing"),
        ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
        ("image_link", "https://images.example.com/hop.jpg"),
        ("website", "https://www.themusicalhop.com"),
        ("seeking_talent", "Yes"),
        ("seeking_description", "We are on the lookout for a local artist"),
    ]
}

#[tokio::test]
async fn test_list_venues_grouped_by_area() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "Park Square Live", "San Francisco", "CA").await;
    create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;

    let response = create_test_router(&state).oneshot(get("/venues")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert_eq!(body.matches("San Francisco, CA").count(), 1);
    assert_eq!(body.matches("New York, NY").count(), 1);
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_search_venues() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&state.db, "Park Square Live Music", "San Francisco", "CA").await;
    create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;

    let response = create_test_router(&state)
        .oneshot(form_request("/venues/search", &[("search_term", "MuSiC")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Park Square Live Music"));
    assert!(!body.contains("The Dueling Pianos Bar"));
    assert!(body.contains(r#"<span class="font-semibold">2</span>"#));
}

#[tokio::test]
async fn test_show_venue_not_found() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state).oneshot(get("/venues/42")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_show_venue_splits_past_and_upcoming() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let past = create_test_artist(&state.db, "Guns N Petals", "San Francisco", "CA").await;
    let upcoming = create_test_artist(&state.db, "The Wild Sax Band", "San Francisco", "CA").await;
    let now = Local::now().naive_local();
    create_test_show(&state.db, venue.id, past.id, now - Duration::days(100)).await;
    create_test_show(&state.db, venue.id, upcoming.id, now + Duration::days(100)).await;

    let response = create_test_router(&state)
        .oneshot(get(&format!("/venues/{}", venue.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let upcoming_at = body.find("1 Upcoming Show").unwrap();
    let past_at = body.find("1 Past Show").unwrap();
    let wild_sax = body.find("The Wild Sax Band").unwrap();
    let petals = body.find("Guns N Petals").unwrap();
    assert!(upcoming_at < wild_sax && wild_sax < past_at);
    assert!(past_at < petals);
}

#[tokio::test]
async fn test_show_venue_displays_notice_from_query() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(get(&format!(
            "/venues/{}?notice=Venue%20The%20Musical%20Hop%20was%20successfully%20updated!&level=success",
            venue.id
        )))
        .await
        .unwrap();

    let body = body_text(response).await;
    assert!(body.contains("Venue The Musical Hop was successfully updated!"));
    assert!(body.contains("bg-green-50"));
}

#[tokio::test]
async fn test_create_venue_form_renders() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state).oneshot(get("/venues/create")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"action="/venues/create""#));
    assert!(body.contains(r#"name="genres""#));
    assert!(body.contains(r#"name="seeking_talent""#));
}

#[tokio::test]
async fn test_create_venue_success() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state)
        .oneshot(form_request("/venues/create", &venue_fields("The Musical Hop")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Venue The Musical Hop was successfully listed!"));

    let venues = venue::Entity::find().all(&state.db).await.unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0].genres.0, vec!["Jazz", "Reggae", "Swing"]);
    assert!(venues[0].seeking_talent);
    assert_eq!(venues[0].website.as_deref(), Some("https://www.themusicalhop.com"));
}

#[tokio::test]
async fn test_create_venue_missing_field_writes_nothing() {
    let state = setup_test_app_state().await;
    let fields: Vec<_> = venue_fields("The Musical Hop")
        .into_iter()
        .filter(|(k, _)| *k != "phone")
        .collect();

    let response = create_test_router(&state)
        .oneshot(form_request("/venues/create", &fields))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("An error occurred. Venue could not be saved"));
    assert!(body.contains("phone"));
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_venue_form_is_prefilled() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(get(&format!("/venues/{}/edit", venue.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"value="The Musical Hop""#));
    assert!(body.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
    assert!(body.contains(r#"<option value="Blues">Blues</option>"#));
}

#[tokio::test]
async fn test_edit_venue_redirects_to_detail() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(form_request(
            &format!("/venues/{}/edit", venue.id),
            &venue_fields("The Musical Hop Reloaded"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!(
            "/venues/{}?notice=Venue%20The%20Musical%20Hop%20Reloaded%20was%20successfully%20updated%21&level=success",
            venue.id
        )
    );

    let stored = venue::Entity::find_by_id(venue.id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "The Musical Hop Reloaded");
    assert!(stored.seeking_talent);
}

#[tokio::test]
async fn test_edit_missing_venue_is_not_found() {
    let state = setup_test_app_state().await;

    let response = create_test_router(&state)
        .oneshot(form_request("/venues/7/edit", &venue_fields("Ghost Venue")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_unknown_venue_changes_nothing() {
    let state = setup_test_app_state().await;
    create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/venues/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/?notice=Venue%20was%20successfully%20deleted.&level=success"
    );
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_from_htmx_uses_hx_redirect() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/venues/{}", venue.id))
                .header("HX-Request", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert_eq!(
        response.headers()["hx-redirect"].to_str().unwrap(),
        "/?notice=Venue%20was%20successfully%20deleted.&level=success"
    );
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_detail_delete_button_does_not_swap_the_page() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let response = create_test_router(&state)
        .oneshot(get(&format!("/venues/{}", venue.id)))
        .await
        .unwrap();

    let body = body_text(response).await;
    assert!(body.contains(&format!(r#"hx-delete="/venues/{}""#, venue.id)));
    assert!(body.contains(r#"hx-swap="none""#));
    assert!(!body.contains(r#"hx-target="body""#));
}

#[tokio::test]
async fn test_edit_venue_with_blank_image_link_is_rejected() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let fields: Vec<_> = venue_fields("The Musical Hop")
        .into_iter()
        .map(|(k, v)| if k == "image_link" { (k, "  ") } else { (k, v) })
        .collect();

    let response = create_test_router(&state)
        .oneshot(form_request(&format!("/venues/{}/edit", venue.id), &fields))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_text(response).await;
    assert!(body.contains("image_link"));

    let stored = venue::Entity::find_by_id(venue.id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, venue);
}

#[tokio::test]
async fn test_delete_venue_removes_shows() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = create_test_artist(&state.db, "Matt Quevedo", "New York", "NY").await;
    create_test_show(&state.db, venue.id, artist.id, Local::now().naive_local()).await;

    let response = create_test_router(&state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/venues/{}", venue.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(venue::Entity::find().count(&state.db).await.unwrap(), 0);
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}
