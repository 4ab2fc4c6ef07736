// tests/catalog_commands.rs
use quill_core::application::ApplicationError;
use quill_core::application::commands::categories::CategoryCommand;
use quill_core::domain::errors::DomainError;
use quill_core::domain::pagination::PageRequest;
use quill_core::domain::post::PostQuery;

mod support;
use support::{PostBuilder, author_command, category_command, tag_command, test_app};

fn is_conflict(err: &ApplicationError) -> bool {
    matches!(
        err,
        ApplicationError::Conflict(_) | ApplicationError::Domain(DomainError::Conflict(_))
    )
}

#[tokio::test]
async fn deleting_a_category_uncategorizes_its_posts() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let category = app.category("Type Theory").await;
    let post = app
        .post(PostBuilder::new("Substitution", author.id).category(category.id))
        .await;
    assert_eq!(post.category.as_ref().map(|c| c.id), Some(category.id));

    app.services
        .category_commands
        .delete_category(category.id)
        .await
        .unwrap();

    let reloaded = app
        .services
        .post_queries
        .get_post_by_id(post.id)
        .await
        .unwrap();
    assert!(reloaded.category.is_none());
    let err = app
        .services
        .category_queries
        .get_category_by_id(category.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn authors_with_posts_cannot_be_deleted() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let post = app.post(PostBuilder::new("CLU", author.id)).await;

    let err = app
        .services
        .author_commands
        .delete_author(author.id)
        .await
        .unwrap_err();
    assert!(is_conflict(&err), "{err:?}");

    app.services.post_commands.delete_post(post.id).await.unwrap();
    app.services
        .author_commands
        .delete_author(author.id)
        .await
        .unwrap();
    let err = app
        .services
        .author_queries
        .get_author_by_id(author.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn category_slugs_are_unique() {
    let app = test_app();
    app.category("Databases").await;

    let err = app
        .services
        .category_commands
        .create_category(category_command("databases"))
        .await
        .unwrap_err();
    assert!(is_conflict(&err), "{err:?}");

    let available = app
        .services
        .category_queries
        .category_slug_available("databases", None)
        .await
        .unwrap();
    assert!(!available);
}

#[tokio::test]
async fn renaming_a_category_refreshes_slug_lookups() {
    let app = test_app();
    let category = app.category("Networking").await;
    let queries = &app.services.category_queries;
    queries.get_category_by_slug("networking").await.unwrap();

    app.services
        .category_commands
        .update_category(
            category.id,
            CategoryCommand {
                name: "Distributed Systems".into(),
                slug: Some("distributed-systems".into()),
                description: Some("Consensus and friends".into()),
                show_on_menu: false,
            },
        )
        .await
        .unwrap();

    let err = queries.get_category_by_slug("networking").await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
    let renamed = queries
        .get_category_by_slug("distributed-systems")
        .await
        .unwrap();
    assert_eq!(renamed.id, category.id);
    assert_eq!(renamed.description, "Consensus and friends");
}

#[tokio::test]
async fn menu_listing_follows_the_toggle() {
    let app = test_app();
    let category = app.category("News").await;
    app.category("Releases").await;
    let queries = &app.services.category_queries;
    assert_eq!(queries.list_categories(true).await.unwrap().len(), 2);

    let toggled = app
        .services
        .category_commands
        .toggle_show_on_menu(category.id)
        .await
        .unwrap();
    assert!(!toggled.show_on_menu);

    let menu = queries.list_categories(true).await.unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].name, "Releases");
    assert_eq!(queries.list_categories(false).await.unwrap().len(), 2);
}

#[tokio::test]
async fn listings_carry_published_post_counts() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let category = app.category("Languages").await;
    app.post(
        PostBuilder::new("Live", author.id)
            .category(category.id)
            .tag("Abstraction")
            .published(),
    )
    .await;
    app.post(
        PostBuilder::new("Draft", author.id)
            .category(category.id)
            .tag("Abstraction"),
    )
    .await;

    let categories = app
        .services
        .category_queries
        .list_categories(false)
        .await
        .unwrap();
    assert_eq!(categories[0].post_count, Some(1));

    let tags = app.services.tag_queries.list_tags().await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].slug, "abstraction");
    assert_eq!(tags[0].post_count, Some(1));

    let authors = app.services.author_queries.popular_authors(5).await.unwrap();
    assert_eq!(authors[0].post_count, Some(1));
}

#[tokio::test]
async fn deleting_a_tag_detaches_it_from_posts() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let post = app
        .post(PostBuilder::new("Tagged", author.id).tag("Temporary").tag("Keep"))
        .await;
    let tag = app
        .services
        .tag_queries
        .get_tag_by_slug("temporary")
        .await
        .unwrap();

    app.services.tag_commands.delete_tag(tag.id).await.unwrap();

    let reloaded = app
        .services
        .post_queries
        .get_post_by_id(post.id)
        .await
        .unwrap();
    let slugs: Vec<&str> = reloaded.tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["keep"]);
    let count = app
        .services
        .post_queries
        .count_posts(&PostQuery::new().with_tag_slug("temporary"))
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn tags_and_authors_page_by_name() {
    let app = test_app();
    for name in ["Rust", "Rustdoc", "Go", "Zig"] {
        app.services
            .tag_commands
            .create_tag(tag_command(name))
            .await
            .unwrap();
    }
    let page = app
        .services
        .tag_queries
        .page_tags(Some("rust"), PageRequest::new(1, 1))
        .await
        .unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 1);

    for name in ["Alan Kay", "Alan Turing", "Edsger Dijkstra"] {
        app.services
            .author_commands
            .create_author(author_command(name))
            .await
            .unwrap();
    }
    let authors = app
        .services
        .author_queries
        .page_authors(Some("alan"), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(authors.total_count, 2);
}

#[tokio::test]
async fn author_email_is_validated() {
    let app = test_app();
    let mut command = author_command("Nobody");
    command.email = "not-an-email".into();
    let err = app
        .services
        .author_commands
        .create_author(command)
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            ApplicationError::Validation(_) | ApplicationError::Domain(DomainError::Validation(_))
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn deleting_a_category_refreshes_cached_posts() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let category = app.category("Type Theory").await;
    let post = app
        .post(PostBuilder::new("Abstraction", author.id).category(category.id))
        .await;
    let queries = &app.services.post_queries;
    let cached = queries.get_post_by_id(post.id).await.unwrap();
    assert_eq!(cached.category.map(|c| c.name), Some("Type Theory".to_string()));

    app.services
        .category_commands
        .delete_category(category.id)
        .await
        .unwrap();

    let reloaded = queries.get_post_by_id(post.id).await.unwrap();
    assert!(reloaded.category.is_none());
}

#[tokio::test]
async fn deleting_a_tag_refreshes_cached_posts() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let post = app
        .post(PostBuilder::new("Iterators", author.id).tag("Clu"))
        .await;
    let queries = &app.services.post_queries;
    assert_eq!(queries.get_post_by_id(post.id).await.unwrap().tags.len(), 1);
    let tag = app
        .services
        .tag_queries
        .get_tag_by_slug("clu")
        .await
        .unwrap();

    app.services.tag_commands.delete_tag(tag.id).await.unwrap();

    let reloaded = queries.get_post_by_id(post.id).await.unwrap();
    assert!(reloaded.tags.is_empty());
}

#[tokio::test]
async fn renaming_an_author_refreshes_cached_posts() {
    let app = test_app();
    let author = app.author("Barbara Liskov").await;
    let post = app.post(PostBuilder::new("Data Abstraction", author.id)).await;
    let queries = &app.services.post_queries;
    queries.get_post_by_id(post.id).await.unwrap();

    let mut command = author_command("Barbara H. Liskov");
    command.email = author.email.clone();
    command.slug = Some("barbara-h-liskov".into());
    app.services
        .author_commands
        .update_author(author.id, command)
        .await
        .unwrap();

    let reloaded = queries.get_post_by_id(post.id).await.unwrap();
    assert_eq!(reloaded.author.name, "Barbara H. Liskov");
    assert_eq!(reloaded.author.slug, "barbara-h-liskov");
}
