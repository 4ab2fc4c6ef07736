// tests/post_commands.rs
use std::sync::Arc;

use bytes::Bytes;
use quill_core::application::ApplicationError;
use quill_core::application::commands::posts::UpdatePostCommand;
use quill_core::domain::errors::DomainError;

mod support;
use support::{PostBuilder, date, test_app};

#[tokio::test]
async fn toggling_twice_restores_the_original_state() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    let post = app.post(PostBuilder::new("Compilers", author.id)).await;
    assert!(!post.published);

    let commands = &app.services.post_commands;
    let first = commands.toggle_published(post.id).await.unwrap();
    assert!(first.published);
    let second = commands.toggle_published(post.id).await.unwrap();
    assert!(!second.published);

    let reloaded = app
        .services
        .post_queries
        .get_post_by_id(post.id)
        .await
        .unwrap();
    assert_eq!(reloaded.published, post.published);
    assert!(reloaded.modified_date.is_some());
}

#[tokio::test]
async fn toggling_stamps_the_clock_time() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    let post = app.post(PostBuilder::new("Timestamps", author.id)).await;

    let toggled_at = date(2024, 3, 2);
    app.clock.set(toggled_at);
    app.services
        .post_commands
        .toggle_published(post.id)
        .await
        .unwrap();

    let reloaded = app
        .services
        .post_queries
        .get_post_by_id(post.id)
        .await
        .unwrap();
    assert!(reloaded.published);
    assert_eq!(reloaded.modified_date, Some(toggled_at));
}

#[tokio::test]
async fn concurrent_views_are_all_counted() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    let post = app
        .post(PostBuilder::new("Popular", author.id).published())
        .await;

    let services = Arc::clone(&app.services);
    let id = post.id;
    let handles: Vec<_> = (0..50)
        .map(|_| {
            let services = Arc::clone(&services);
            tokio::spawn(async move { services.post_commands.record_view(id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let reloaded = app
        .services
        .post_queries
        .get_post_by_id(post.id)
        .await
        .unwrap();
    assert_eq!(reloaded.view_count, 50);
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    app.post(PostBuilder::new("Hello World", author.id)).await;

    let err = app
        .services
        .post_commands
        .create_post(PostBuilder::new("Hello, world!", author.id).build())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Conflict(_)), "{err:?}");

    let available = app
        .services
        .post_queries
        .post_slug_available("hello-world", None)
        .await
        .unwrap();
    assert!(!available);
}

#[tokio::test]
async fn a_post_may_keep_its_own_slug_on_update() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    let post = app
        .post(PostBuilder::new("Original", author.id).slug("keep-me"))
        .await;

    let updated = app
        .services
        .post_commands
        .update_post(UpdatePostCommand {
            id: post.id,
            title: "Renamed".into(),
            short_description: post.short_description.clone(),
            description: post.description.clone(),
            slug: None,
            meta: None,
            published: true,
            author_id: author.id,
            category_id: None,
            tags: vec!["Rust".into()],
        })
        .await
        .unwrap();
    assert_eq!(updated.slug, "keep-me");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.tags.len(), 1);
    assert!(
        app.services
            .post_queries
            .post_slug_available("keep-me", Some(post.id))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn unknown_references_are_not_found() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;

    let err = app
        .services
        .post_commands
        .create_post(PostBuilder::new("Orphan", 9_999).build())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)), "{err:?}");

    let err = app
        .services
        .post_commands
        .create_post(PostBuilder::new("Lost", author.id).category(9_999).build())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)), "{err:?}");

    let err = app.services.post_commands.record_view(9_999).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;

    let err = app
        .services
        .post_commands
        .create_post(PostBuilder::new("   ", author.id).build())
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            ApplicationError::Validation(_) | ApplicationError::Domain(DomainError::Validation(_))
        ),
        "{err:?}"
    );

    let err = app
        .services
        .post_commands
        .create_post(PostBuilder::new("Bad slug", author.id).slug("Not A Slug").build())
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
async fn writes_invalidate_cached_lookups() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    let post = app.post(PostBuilder::new("Cached", author.id)).await;
    let queries = &app.services.post_queries;

    queries.get_post_by_id(post.id).await.unwrap();
    assert!(!app.cache.is_empty().await);

    app.services.post_commands.record_view(post.id).await.unwrap();
    let reloaded = queries.get_post_by_id(post.id).await.unwrap();
    assert_eq!(reloaded.view_count, 1);

    app.services
        .post_commands
        .toggle_published(post.id)
        .await
        .unwrap();
    assert!(queries.get_post_by_id(post.id).await.unwrap().published);

    app.services.post_commands.delete_post(post.id).await.unwrap();
    let err = queries.get_post_by_id(post.id).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn replacing_a_cover_image_removes_the_old_file() {
    let app = test_app();
    let author = app.author("Grace Hopper").await;
    let post = app.post(PostBuilder::new("Pictures", author.id)).await;
    let commands = &app.services.post_commands;

    let first = commands
        .set_post_image(
            post.id,
            Bytes::from_static(b"\x89PNG\r\n\x1a\n one"),
            "a.png",
            "image/png",
        )
        .await
        .unwrap();
    let first_url = first.image_url.clone().unwrap();
    let first_file = app
        .media_root
        .join(first_url.trim_start_matches("/media/"));
    assert!(first_file.exists());

    let second = commands
        .set_post_image(
            post.id,
            Bytes::from_static(b"\x89PNG\r\n\x1a\n two"),
            "b.png",
            "image/png",
        )
        .await
        .unwrap();
    assert_ne!(second.image_url, first.image_url);
    assert!(!first_file.exists());

    let err = commands
        .set_post_image(post.id, Bytes::from_static(b"text"), "c.txt", "text/plain")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Validation(_)));

    let _ = tokio::fs::remove_dir_all(&app.media_root).await;
}
