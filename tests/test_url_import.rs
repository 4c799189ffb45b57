use recipe_import::{ImportConfig, ImportError, ImportPipeline, ImportState, RecipeImporter};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {json_ld}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#
    )
}

fn pipeline_without_image() -> ImportPipeline {
    RecipeImporter::builder()
        .download_image(false)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_http_404_is_transport_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/missing")
        .with_status(404)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Not found</body></html>")
        .create_async()
        .await;

    let mut states = Vec::new();
    let url = format!("{}/missing", server.url());
    let result = pipeline_without_image()
        .import_with_progress(&url, |state| states.push(state))
        .await;

    match result {
        Err(ImportError::HttpStatus(404)) => {}
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
    assert_eq!(states, vec![ImportState::Fetching, ImportState::Failed]);
}

#[tokio::test]
async fn test_non_html_content_type_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"@type": "Recipe", "name": "Not a page"}"#)
        .create_async()
        .await;

    let url = format!("{}/recipe.json", server.url());
    let err = pipeline_without_image().import(&url).await.unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedContentType(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_page_without_json_ld() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/plain")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body("<html><body><h1>Grandma's Cookies</h1><p>Mix and bake.</p></body></html>")
        .create_async()
        .await;

    let url = format!("{}/plain", server.url());
    let err = pipeline_without_image().import(&url).await.unwrap_err();
    assert!(matches!(err, ImportError::NoRecipeJson));
    assert_eq!(err.to_string(), "no recipe JSON found");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_missing_name_fails_normalization() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/nameless")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(
            r#"{"@type": "Recipe", "recipeIngredient": ["1 egg"]}"#,
        ))
        .create_async()
        .await;

    let url = format!("{}/nameless", server.url());
    let err = pipeline_without_image().import(&url).await.unwrap_err();
    assert!(matches!(err, ImportError::MissingField("name")));
}

#[tokio::test]
async fn test_full_import_with_image() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org/",
        "@type": "Recipe",
        "name": "Test Recipe",
        "description": "A test recipe",
        "image": ["/images/test.png", "/images/test-large.png"],
        "author": {"@type": "Person", "name": "Test Author"},
        "prepTime": "PT15M",
        "cookTime": "PT30M",
        "totalTime": "PT45M",
        "recipeYield": "4 servings",
        "keywords": "test, recipe, metadata",
        "recipeIngredient": [
            "1 cup flour",
            "2 eggs",
            "1/2 cup milk"
        ],
        "recipeInstructions": "Mix all ingredients and cook."
    }
    "#;
    let page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;
    let image = server
        .mock("GET", "/images/test.png")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body([0x89, b'P', b'N', b'G'])
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let outcome = RecipeImporter::builder()
        .build()
        .unwrap()
        .import(&url)
        .await
        .unwrap();

    page.assert_async().await;
    image.assert_async().await;

    let recipe = &outcome.recipe;
    assert_eq!(recipe.title, "Test Recipe");
    assert_eq!(recipe.summary.as_deref(), Some("A test recipe"));
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.instructions, vec!["Mix all ingredients and cook."]);
    assert_eq!(recipe.prep_minutes, Some(15));
    assert_eq!(recipe.cook_minutes, Some(30));
    assert_eq!(recipe.total_minutes, Some(45));
    assert_eq!(recipe.servings, Some(4));
    assert_eq!(recipe.image_url.as_deref(), Some("/images/test.png"));
    assert_eq!(recipe.author.as_deref(), Some("Test Author"));
    assert_eq!(recipe.keywords, vec!["test", "recipe", "metadata"]);
    assert_eq!(recipe.source_url.as_deref(), Some(url.as_str()));

    let downloaded = outcome.image.expect("image should be downloaded");
    assert_eq!(downloaded.url, format!("{}/images/test.png", server.url()));
    assert_eq!(downloaded.content_type.as_deref(), Some("image/png"));
    assert_eq!(downloaded.bytes, vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_broken_image_does_not_fail_import() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(
            r#"{"@type": "Recipe", "name": "Pictureless", "image": "/gone.jpg"}"#,
        ))
        .create_async()
        .await;
    let _image = server
        .mock("GET", "/gone.jpg")
        .with_status(500)
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let mut states = Vec::new();
    let outcome = RecipeImporter::builder()
        .build()
        .unwrap()
        .import_with_progress(&url, |state| states.push(state))
        .await
        .unwrap();

    assert_eq!(outcome.recipe.title, "Pictureless");
    assert!(outcome.image.is_none());
    assert_eq!(states.last(), Some(&ImportState::Done));
}

#[tokio::test]
async fn test_latin1_page() {
    let mut server = mockito::Server::new_async().await;
    let mut body = Vec::new();
    body.extend_from_slice(
        b"<html><head><script type=\"application/ld+json\">{\"@type\": \"Recipe\", \"name\": \"Cr",
    );
    // "è" in ISO-8859-1
    body.push(0xE8);
    body.extend_from_slice(b"me br\xFBl\xE9e\"}</script></head></html>");

    let _m = server
        .mock("GET", "/latin1")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(body)
        .create_async()
        .await;

    let url = format!("{}/latin1", server.url());
    let recipe = pipeline_without_image().import(&url).await.unwrap().recipe;
    assert_eq!(recipe.title, "Crème brûlée");
}

#[tokio::test]
async fn test_malformed_block_then_valid_block() {
    let mut server = mockito::Server::new_async().await;
    let html = format!(
        "{}{}",
        create_recipe_html(r#"{"@type": "Recipe", "name": "Broken",,}"#),
        create_recipe_html(r#"{"@type": "Recipe", "name": "Second Block"}"#)
    );
    let _m = server
        .mock("GET", "/two-blocks")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(html)
        .create_async()
        .await;

    let url = format!("{}/two-blocks", server.url());
    let recipe = pipeline_without_image().import(&url).await.unwrap().recipe;
    assert_eq!(recipe.title, "Second Block");
}

#[tokio::test]
async fn test_body_over_limit() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/huge")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("x".repeat(2048))
        .create_async()
        .await;

    let config = ImportConfig {
        max_body_bytes: 1024,
        download_image: false,
        ..ImportConfig::default()
    };
    let url = format!("{}/huge", server.url());
    let err = ImportPipeline::from_config(config)
        .unwrap()
        .import(&url)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::BodyTooLarge {
            limit: 1024,
            actual: 2048
        }
    ));
}

#[tokio::test]
async fn test_fetch_recipe_convenience() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/recipe")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(
            r#"{"@graph": [{"@type": "WebPage"}, {"@type": "Recipe", "name": "Graph Soup"}]}"#,
        ))
        .create_async()
        .await;

    let url = format!("{}/recipe", server.url());
    let recipe = recipe_import::fetch_recipe(&url).await.unwrap();
    assert_eq!(recipe.title, "Graph Soup");
}

#[tokio::test]
async fn test_unsupported_scheme() {
    let err = recipe_import::fetch_recipe("file:///etc/passwd")
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedScheme(ref s) if s == "file"));
}

/// Requires network access
#[tokio::test]
#[ignore]
async fn test_real_world_import() {
    let outcome = RecipeImporter::builder()
        .build()
        .unwrap()
        .import("https://www.bbcgoodfood.com/recipes/classic-cottage-pie")
        .await
        .unwrap();

    assert!(!outcome.recipe.ingredients.is_empty());
    assert!(!outcome.recipe.instructions.is_empty());
}
