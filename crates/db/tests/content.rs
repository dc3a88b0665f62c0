//! Integration tests for projects, likes, comments and update logs.

use applifarm_db::models::comment::CreateComment;
use applifarm_db::models::profile::{UpdateProfile, UpsertProfile};
use applifarm_db::models::project::{CreateProject, ProjectListFilter, UpdateProject};
use applifarm_db::models::project_update::CreateProjectUpdate;
use applifarm_db::models::user::CreateUser;
use applifarm_db::repositories::{
    CommentRepo, LikeRepo, ProfileRepo, ProjectRepo, ProjectUpdateRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "x".to_string(),
            confirmed: true,
        },
    )
    .await
    .unwrap();
    ProfileRepo::upsert(
        pool,
        &UpsertProfile {
            id: user.id,
            email: email.to_string(),
            full_name: Some(name.to_string()),
            avatar_url: None,
        },
    )
    .await
    .unwrap();
    user.id
}

fn new_project(user_id: i64, title: &str, categories: &[&str]) -> CreateProject {
    CreateProject {
        user_id,
        title: title.to_string(),
        description: format!("{title} の説明"),
        url: "https://example.com".to_string(),
        image_url: None,
        categories: categories.iter().map(|c| c.to_string()).collect(),
        tags: vec!["rust".to_string()],
    }
}

fn filter() -> ProjectListFilter {
    ProjectListFilter {
        limit: 24,
        ..Default::default()
    }
}

async fn like_rows(pool: &PgPool, project_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_upsert_keeps_existing_name(pool: PgPool) {
    let id = seed_user(&pool, "p@example.com", "はなこ").await;
    let profile = ProfileRepo::upsert(
        &pool,
        &UpsertProfile {
            id,
            email: "p@example.com".into(),
            full_name: None,
            avatar_url: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("はなこ"));

    let updated = ProfileRepo::update(
        &pool,
        id,
        &UpdateProfile {
            full_name: None,
            avatar_url: Some(Some("https://img.example.com/a.png".into())),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.avatar_url.as_deref(), Some("https://img.example.com/a.png"));

    let cleared = ProfileRepo::update(
        &pool,
        id,
        &UpdateProfile {
            full_name: None,
            avatar_url: Some(None),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.avatar_url.is_none());
    assert_eq!(cleared.full_name.as_deref(), Some("はなこ"));
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_detail_includes_author(pool: PgPool) {
    let owner = seed_user(&pool, "o@example.com", "オーナー").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "畑ログ", &["Webアプリ"]))
        .await
        .unwrap();
    assert_eq!(project.likes_count, 0);

    let detail = ProjectRepo::find_detail(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.project.title, "畑ログ");
    assert_eq!(detail.author.full_name.as_deref(), Some("オーナー"));
    assert_eq!(ProjectRepo::owner_of(&pool, project.id).await.unwrap(), Some(owner));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_list_filters(pool: PgPool) {
    let owner = seed_user(&pool, "l@example.com", "L").await;
    ProjectRepo::create(&pool, &new_project(owner, "Todo Game", &["ゲーム"]))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project(owner, "Weather", &["Webアプリ", "ツール・ユーティリティ"]))
        .await
        .unwrap();
    ProjectRepo::create(&pool, &new_project(owner, "100% Done", &["その他"]))
        .await
        .unwrap();

    let all = ProjectRepo::list(&pool, &filter()).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].project.title, "100% Done", "newest first");

    let games = ProjectRepo::list(
        &pool,
        &ProjectListFilter {
            category: Some("ゲーム".into()),
            ..filter()
        },
    )
    .await
    .unwrap();
    assert_eq!(games.len(), 1);

    let search = ProjectListFilter {
        search: Some("weather".into()),
        ..filter()
    };
    assert_eq!(ProjectRepo::list(&pool, &search).await.unwrap().len(), 1);
    assert_eq!(ProjectRepo::count(&pool, &search).await.unwrap(), 1);

    // `%` is matched literally.
    let percent = ProjectListFilter {
        search: Some("%".into()),
        ..filter()
    };
    assert_eq!(ProjectRepo::count(&pool, &percent).await.unwrap(), 1);

    let paged = ProjectListFilter {
        limit: 2,
        offset: 2,
        ..filter()
    };
    assert_eq!(ProjectRepo::list(&pool, &paged).await.unwrap().len(), 1);

    assert_eq!(ProjectRepo::recent(&pool, 2).await.unwrap().len(), 2);
    let mut categories = ProjectRepo::distinct_categories(&pool).await.unwrap();
    categories.sort();
    let mut expected = vec!["Webアプリ", "ゲーム", "その他", "ツール・ユーティリティ"];
    expected.sort();
    assert_eq!(categories, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_are_owner_scoped(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com", "O").await;
    let other = seed_user(&pool, "other@example.com", "X").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Mine", &[]))
        .await
        .unwrap();

    let patch = UpdateProject {
        title: Some("Renamed".into()),
        image_url: Some(Some("https://example.com/i.png".into())),
        ..Default::default()
    };
    assert!(ProjectRepo::update(&pool, project.id, other, &patch)
        .await
        .unwrap()
        .is_none());

    let updated = ProjectRepo::update(&pool, project.id, owner, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, project.description);
    assert_eq!(updated.image_url.as_deref(), Some("https://example.com/i.png"));

    assert!(!ProjectRepo::delete(&pool, project.id, other).await.unwrap());
    assert!(ProjectRepo::delete(&pool, project.id, owner).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, project.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Likes: counter always equals the number of like rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_is_idempotent_and_counted(pool: PgPool) {
    let owner = seed_user(&pool, "lo@example.com", "O").await;
    let fan = seed_user(&pool, "fan@example.com", "F").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Liked", &[]))
        .await
        .unwrap();

    let state = LikeRepo::like(&pool, fan, project.id).await.unwrap().unwrap();
    assert!(state.liked);
    assert_eq!(state.likes_count, 1);

    let again = LikeRepo::like(&pool, fan, project.id).await.unwrap().unwrap();
    assert_eq!(again.likes_count, 1);
    assert_eq!(like_rows(&pool, project.id).await, 1);
    assert!(LikeRepo::is_liked(&pool, fan, project.id).await.unwrap());

    let state = LikeRepo::unlike(&pool, fan, project.id).await.unwrap().unwrap();
    assert!(!state.liked);
    assert_eq!(state.likes_count, 0);

    let again = LikeRepo::unlike(&pool, fan, project.id).await.unwrap().unwrap();
    assert_eq!(again.likes_count, 0);
    assert_eq!(like_rows(&pool, project.id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_likes_keep_counter_consistent(pool: PgPool) {
    let owner = seed_user(&pool, "co@example.com", "O").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Popular", &[]))
        .await
        .unwrap();

    let mut fans = Vec::new();
    for i in 0..5 {
        fans.push(seed_user(&pool, &format!("fan{i}@example.com"), "F").await);
    }

    let mut handles = Vec::new();
    for fan in fans.iter().copied() {
        for _ in 0..2 {
            let pool = pool.clone();
            let project_id = project.id;
            handles.push(tokio::spawn(async move {
                LikeRepo::like(&pool, fan, project_id).await.unwrap()
            }));
        }
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let project = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(project.likes_count, 5);
    assert_eq!(like_rows(&pool, project.id).await, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_missing_project(pool: PgPool) {
    let fan = seed_user(&pool, "nf@example.com", "F").await;
    assert!(LikeRepo::like(&pool, fan, 999_999).await.unwrap().is_none());
    assert!(LikeRepo::unlike(&pool, fan, 999_999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Comments and update logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comments_with_author_oldest_first(pool: PgPool) {
    let owner = seed_user(&pool, "co2@example.com", "O").await;
    let commenter = seed_user(&pool, "c@example.com", "コメンター").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Talk", &[]))
        .await
        .unwrap();

    let first = CommentRepo::create(
        &pool,
        &CreateComment {
            project_id: project.id,
            user_id: commenter,
            content: "いいですね".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.author.full_name.as_deref(), Some("コメンター"));

    CommentRepo::create(
        &pool,
        &CreateComment {
            project_id: project.id,
            user_id: owner,
            content: "ありがとう".into(),
        },
    )
    .await
    .unwrap();

    let list = CommentRepo::list_by_project(&pool, project.id).await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].comment.id, first.comment.id);

    assert!(CommentRepo::delete(&pool, first.comment.id).await.unwrap());
    assert!(CommentRepo::find_by_id(&pool, first.comment.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_length_enforced_by_schema(pool: PgPool) {
    let owner = seed_user(&pool, "len@example.com", "O").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Len", &[]))
        .await
        .unwrap();
    let result = CommentRepo::create(
        &pool,
        &CreateComment {
            project_id: project.id,
            user_id: owner,
            content: "あ".repeat(101),
        },
    )
    .await;
    assert!(result.is_err(), "101-character comment should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updates_newest_first_and_cascade(pool: PgPool) {
    let owner = seed_user(&pool, "u@example.com", "O").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Log", &[]))
        .await
        .unwrap();

    for content in ["v1", "v2"] {
        ProjectUpdateRepo::create(
            &pool,
            &CreateProjectUpdate {
                project_id: project.id,
                content: content.into(),
            },
        )
        .await
        .unwrap();
    }
    let list = ProjectUpdateRepo::list_by_project(&pool, project.id)
        .await
        .unwrap();
    assert_eq!(list[0].content, "v2");

    ProjectRepo::delete(&pool, project.id, owner).await.unwrap();
    assert!(ProjectUpdateRepo::find_by_id(&pool, list[0].id)
        .await
        .unwrap()
        .is_none());
}
