use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::routes;
use server::startup::build_cors;
use server::state::ServerState;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Real router over a private in-memory SQLite database on an ephemeral port.
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;

    let app: Router = routes::build_router(ServerState::from_db(db), build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn create_author(app: &TestApp, first: &str, last: &str) -> anyhow::Result<Value> {
    let res = client()
        .post(app.url("/api/authors"))
        .json(&json!({"firstName": first, "lastName": last}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(res.json().await?)
}

async fn create_book(app: &TestApp, author_id: i64, title: &str, date: &str) -> anyhow::Result<reqwest::Response> {
    Ok(client()
        .post(app.url("/api/books"))
        .json(&json!({"title": title, "authorId": author_id, "datePublished": date, "isFiction": false}))
        .send()
        .await?)
}

fn error_paths(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|a| a.iter().filter_map(|e| e["path"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_docs_are_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/docs.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let doc: Value = res.json().await?;
    assert!(doc["paths"]["/api/books/{id}"].is_object());

    let ui = client().get(app.url("/docs/")).send().await?;
    assert_eq!(ui.status(), HttpStatusCode::OK);

    let alias = client().get(app.url("/api-docs")).send().await?;
    assert_eq!(alias.status(), HttpStatusCode::OK);
    assert_eq!(alias.url().path(), "/docs/");
    Ok(())
}

#[tokio::test]
async fn e2e_author_crud_flow() -> anyhow::Result<()> {
    let app = start_server().await?;

    let created = create_author(&app, "jon", "doe").await?;
    let id = created["id"].as_i64().expect("id assigned");
    assert_eq!(created, json!({"id": id, "firstName": "jon", "lastName": "doe"}));

    let res = client().get(app.url(&format!("/api/authors/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);

    let res = client()
        .put(app.url(&format!("/api/authors/{id}")))
        .json(&json!({"firstName": "john", "lastName": "doe"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["firstName"], "john");

    let list: Value = client().get(app.url("/api/authors")).send().await?.json().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    assert_eq!(list[0]["firstName"], "john");

    let res = client().delete(app.url(&format!("/api/authors/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = client().get(app.url(&format!("/api/authors/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_author_body_is_rejected_before_the_store() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = client()
        .post(app.url("/api/authors"))
        .json(&json!({"firstName": 42}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(error_paths(&body), ["firstName", "lastName"]);
    assert_eq!(body["errors"][0]["msg"], "Invalid value");
    assert_eq!(body["errors"][0]["location"], "body");

    // no content type at all: every field is reported
    let res = client().post(app.url("/api/authors")).body("firstName=jon").send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(error_paths(&res.json().await?), ["firstName", "lastName"]);

    let res = client()
        .post(app.url("/api/authors"))
        .header("content-type", "application/json")
        .body("{\"firstName\": ")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let list: Value = client().get(app.url("/api/authors")).send().await?.json().await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_form_bodies_are_accepted() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = client()
        .post(app.url("/api/authors"))
        .form(&[("firstName", "Yuval Noah"), ("lastName", "Harari")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let author: Value = res.json().await?;
    let author_id = author["id"].as_i64().expect("id").to_string();

    let res = client()
        .post(app.url("/api/books"))
        .form(&[
            ("title", "sapien"),
            ("authorId", author_id.as_str()),
            ("datePublished", "2011-01-01"),
            ("isFiction", "false"),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let book: Value = res.json().await?;
    assert_eq!(book["isFiction"], false);
    assert_eq!(book["author"]["lastName"], "Harari");
    Ok(())
}

#[tokio::test]
async fn e2e_book_embeds_its_author() -> anyhow::Result<()> {
    let app = start_server().await?;
    let author = create_author(&app, "Yuval Noah", "Harari").await?;
    let author_id = author["id"].as_i64().expect("id");

    let res = create_book(&app, author_id, "sapien", "2023-01-02").await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_i64().expect("id");
    assert_eq!(
        created,
        json!({
            "id": id,
            "title": "sapien",
            "datePublished": "2023-01-02",
            "isFiction": false,
            "author": {"id": author_id, "firstName": "Yuval Noah", "lastName": "Harari"}
        })
    );

    let fetched: Value = client().get(app.url(&format!("/api/books/{id}"))).send().await?.json().await?;
    assert_eq!(fetched, created);

    let list: Value = client().get(app.url("/api/books")).send().await?.json().await?;
    assert_eq!(list, json!([created]));
    Ok(())
}

#[tokio::test]
async fn e2e_date_round_trips_whatever_the_input_format() -> anyhow::Result<()> {
    let app = start_server().await?;
    let author = create_author(&app, "jon", "doe").await?;
    let author_id = author["id"].as_i64().expect("id");

    for date in ["2023-01-02", "1/2/2023", "2023-01-02T00:00:00.000Z", "2023-01-02T08:30:00"] {
        let created: Value = create_book(&app, author_id, "dated", date).await?.json().await?;
        assert_eq!(created["datePublished"], "2023-01-02", "input {date}");
    }

    let res = create_book(&app, author_id, "undated", "last tuesday").await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Bad Request");
    Ok(())
}

#[tokio::test]
async fn e2e_book_update_and_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let jon = create_author(&app, "jon", "doe").await?;
    let will = create_author(&app, "william", "shakes").await?;
    let created: Value = create_book(&app, jon["id"].as_i64().expect("id"), "the ugly duckling", "1843-11-11")
        .await?
        .json()
        .await?;
    let id = created["id"].as_i64().expect("id");

    let res = client()
        .put(app.url(&format!("/api/books/{id}")))
        .json(&json!({"title": "hamlet", "authorId": will["id"], "datePublished": "1603-01-01", "isFiction": true}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["title"], "hamlet");
    assert_eq!(updated["isFiction"], true);
    assert_eq!(updated["author"]["firstName"], "william");

    let res = client().delete(app.url(&format!("/api/books/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!("book was deleted"));

    let res = client().get(app.url(&format!("/api/books/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_records_are_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let author_body = json!({"firstName": "a", "lastName": "b"});
    let book_body = json!({"title": "t", "authorId": 1, "datePublished": "2023-01-02", "isFiction": false});

    for path in ["/api/authors/999", "/api/books/999", "/api/books/abc", "/api/authors/not-a-number"] {
        let res = client().get(app.url(path)).send().await?;
        assert_eq!(res.status(), HttpStatusCode::NOT_FOUND, "GET {path}");
        let body: Value = res.json().await?;
        assert_eq!(body["error"], "Not Found");
    }

    let res = client().put(app.url("/api/authors/999")).json(&author_body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = client().put(app.url("/api/books/999")).json(&book_body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = client().delete(app.url("/api/authors/999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = client().delete(app.url("/api/books/999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_path_id_uses_leading_digits() -> anyhow::Result<()> {
    let app = start_server().await?;
    let author = create_author(&app, "jon", "doe").await?;
    let id = author["id"].as_i64().expect("id");

    let res = client().get(app.url(&format!("/api/authors/{id}abc"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, author);
    Ok(())
}

#[tokio::test]
async fn e2e_referential_integrity_is_a_conflict() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = create_book(&app, 4242, "orphan", "2023-01-02").await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Conflict");

    let owner = create_author(&app, "Yuval Noah", "Harari").await?;
    let owner_id = owner["id"].as_i64().expect("id");
    let book: Value = create_book(&app, owner_id, "homo deus", "2016-09-08").await?.json().await?;

    let res = client().delete(app.url(&format!("/api/authors/{owner_id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // the author and the book are both still there
    let res = client().get(app.url(&format!("/api/authors/{owner_id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = client().get(app.url(&format!("/api/books/{}", book["id"]))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_book_body_lists_each_field() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(app.url("/api/books"))
        .json(&json!({"title": "sapien", "authorId": "three", "isFiction": "sometimes"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(error_paths(&body), ["authorId", "datePublished", "isFiction"]);
    assert_eq!(body["errors"][0]["value"], "three");

    let list: Value = client().get(app.url("/api/books")).send().await?.json().await?;
    assert_eq!(list, json!([]));
    Ok(())
}
