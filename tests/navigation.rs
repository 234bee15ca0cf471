use axum::http::StatusCode;
use mealplanner_shared::testing::MemoryBackend;

mod helpers;

use helpers::BASE;

#[tokio::test]
async fn test_root_redirects_to_recipes() -> anyhow::Result<()> {
    let backend = MemoryBackend::new();

    for path in ["/", BASE, "/static/react_app/"] {
        let page = helpers::get(&backend, path).await?;

        assert_eq!(page.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(page.location, Some(format!("{BASE}/recipes")), "{path}");
    }

    Ok(())
}

#[tokio::test]
async fn test_trailing_slash_redirects() -> anyhow::Result<()> {
    let backend = MemoryBackend::new();

    let page = helpers::get(&backend, &format!("{BASE}/meal-plans/42/")).await?;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(format!("{BASE}/meal-plans/42")));

    Ok(())
}

#[tokio::test]
async fn test_unknown_path_is_not_found() -> anyhow::Result<()> {
    let backend = MemoryBackend::new();

    for path in [
        "/nope",
        "/static/react_app/pantry",
        "/static/react_app/recipes/1/2/3",
        "/static/react_app/recipes/%FF/",
    ] {
        let page = helpers::get(&backend, path).await?;

        assert_eq!(page.status, StatusCode::NOT_FOUND, "{path}");
        assert!(page.body.contains("Not found"));
    }

    assert!(backend.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_active_section() -> anyhow::Result<()> {
    let backend = MemoryBackend::new();

    let page = helpers::get(&backend, &format!("{BASE}/recipes/new")).await?;

    assert!(page.body.contains("aria-current=\"page\">Recipes"));
    assert!(!page.body.contains("aria-current=\"page\">Meal Plans"));
    assert!(page.body.contains("Create New Recipe"));
    assert!(backend.requests().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_readiness_follows_backend() -> anyhow::Result<()> {
    let backend = MemoryBackend::new();

    let page = helpers::get(&backend, "/health").await?;
    assert_eq!(page.status, StatusCode::OK);

    let page = helpers::get(&backend, "/ready").await?;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("\"ready\""));

    backend.fail_with(502, None);
    let page = helpers::get(&backend, "/ready").await?;
    assert_eq!(page.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(page.body.contains("backend_unavailable"));

    Ok(())
}
