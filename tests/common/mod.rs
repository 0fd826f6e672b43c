//! Shared utilities for integration tests: a seeded site on an ephemeral port.
#![allow(dead_code)]

use std::path::Path;

use cdroot::config::{AppMode, SiteConfig};
use cdroot::http::Envelope;
use cdroot::lifecycle::{startup, Shutdown};
use cdroot::store::catalog::Catalog;
use cdroot::store::RecordStore;
use tempfile::TempDir;

pub const BLOG_FRAME: &str = "<table id=\"blog-entries\"></table>";
pub const INDEX_HTML: &str = "<!doctype html><title>cdroot</title>";

/// A running server plus the temporary tree it serves.
pub struct TestSite {
    pub base_url: String,
    pub client: reqwest::Client,
    pub shutdown: Shutdown,
    pub dir: TempDir,
}

impl TestSite {
    /// GET `/request?<query>` and decode the envelope. The endpoint always answers 200.
    pub async fn request(&self, query: &str) -> Envelope {
        let res = self
            .client
            .get(format!("{}/request?{}", self.base_url, query))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "query {query}");
        res.json().await.unwrap()
    }

    /// Names of the entries in a blog-entries envelope.
    pub async fn entry_names(&self, query: &str) -> Vec<String> {
        let envelope = self.request(query).await;
        assert_eq!(envelope.state, 200, "query {query}");
        envelope.body.unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect()
    }
}

impl Drop for TestSite {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Twenty articles post-1..post-20; post-i is tagged tech/news/life by i % 3 (0/1/2).
pub fn catalog_toml() -> String {
    let mut toml = String::from(
        "[[categories]]\nname = \"tech\"\ncolor = \"#3366ff\"\n\n\
         [[categories]]\nname = \"news\"\ncolor = \"#ff6633\"\n\n\
         [[categories]]\nname = \"life\"\ncolor = \"#33cc66\"\n",
    );
    for i in 1..=20 {
        let category = ["tech", "news", "life"][i % 3];
        toml.push_str(&format!(
            "\n[[articles]]\nname = \"post-{i}\"\ncategories = [\"{category}\"]\n"
        ));
    }
    toml
}

fn write_documents(documents: &Path) {
    std::fs::create_dir_all(documents).unwrap();
    for i in 1..=20 {
        std::fs::write(
            documents.join(format!("post-{i}.html")),
            format!("<h2 id=\"title\">Post {i}</h2><p id=\"intro\">Intro {i}</p><p>Body</p>"),
        )
        .unwrap();
    }
    std::fs::write(documents.join("about.html"), "<p>About</p>").unwrap();
    std::fs::write(documents.join("blog.html"), BLOG_FRAME).unwrap();
}

/// Seed a temporary tree and serve it.
pub async fn start_site(mode: AppMode) -> TestSite {
    let dir = tempfile::tempdir().unwrap();
    let documents = dir.path().join("public").join("html");
    write_documents(&documents);
    std::fs::write(dir.path().join("public").join("index.html"), INDEX_HTML).unwrap();

    let mut config = SiteConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.site.mode = mode;
    config.site.documents_dir = documents;
    config.site.public_dir = Some(dir.path().join("public"));
    config.store.path = dir.path().join("site.db");

    let store = RecordStore::open(&config.store.path, 16).unwrap();
    Catalog::parse(&catalog_toml()).unwrap().import(&store).unwrap();
    drop(store);

    let (server, listener) = startup::start(config).await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestSite {
        base_url,
        client: reqwest::Client::new(),
        shutdown,
        dir,
    }
}
