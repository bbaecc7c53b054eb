use sqlx::PgPool;
use std::sync::Arc;

use movie_ratings::domain::entities::{NewMovie, RatingUpsert};
use movie_ratings::domain::repositories::{MovieRepository, RatingRepository};
use movie_ratings::infrastructure::persistence::{PgMovieRepository, PgRatingRepository};

async fn create_test_user(pool: &PgPool) -> i64 {
    sqlx::query_scalar("INSERT INTO users (age) VALUES (30) RETURNING id")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn create_test_movie(pool: &PgPool, title: &str) -> i64 {
    PgMovieRepository::new(Arc::new(pool.clone()))
        .create(NewMovie {
            title: title.to_string(),
            released_at: None,
            imdb_url: None,
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_upsert_creates_then_updates(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let movie = create_test_movie(&pool, "Heat").await;
    let repo = PgRatingRepository::new(Arc::new(pool));

    let first = repo.upsert(user, movie, 3).await.unwrap();
    assert!(matches!(first, RatingUpsert::Created(r) if r.score == 3));

    let second = repo.upsert(user, movie, 5).await.unwrap();
    assert!(!second.is_created());
    assert_eq!(second.rating().id, first.rating().id);
    assert_eq!(second.rating().score, 5);

    let all = repo.list_for_movie(movie).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_find_rating(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let movie = create_test_movie(&pool, "Heat").await;
    let repo = PgRatingRepository::new(Arc::new(pool));

    assert!(repo.find(user, movie).await.unwrap().is_none());

    repo.upsert(user, movie, 4).await.unwrap();

    let found = repo.find(user, movie).await.unwrap().unwrap();
    assert_eq!(found.score, 4);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_score_out_of_range_rejected_by_database(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let movie = create_test_movie(&pool, "Heat").await;
    let repo = PgRatingRepository::new(Arc::new(pool));

    assert!(repo.upsert(user, movie, 6).await.is_err());
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_list_for_users_filters(pool: PgPool) {
    let a = create_test_user(&pool).await;
    let b = create_test_user(&pool).await;
    let c = create_test_user(&pool).await;
    let heat = create_test_movie(&pool, "Heat").await;
    let alien = create_test_movie(&pool, "Alien").await;
    let repo = PgRatingRepository::new(Arc::new(pool));

    for user in [a, b, c] {
        repo.upsert(user, heat, 4).await.unwrap();
    }
    repo.upsert(a, alien, 2).await.unwrap();

    let selected = repo.list_for_users(&[a, c]).await.unwrap();
    assert_eq!(selected.len(), 3);
    assert!(selected.iter().all(|r| r.user_id == a || r.user_id == c));

    assert!(repo.list_for_users(&[]).await.unwrap().is_empty());
    assert_eq!(repo.list_for_user(a).await.unwrap().len(), 2);
}

#[sqlx::test]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_movies_listed_by_title(pool: PgPool) {
    create_test_movie(&pool, "Toy Story").await;
    create_test_movie(&pool, "Babe").await;
    let repo = PgMovieRepository::new(Arc::new(pool));

    let movies = repo.list(0, 10).await.unwrap();

    assert_eq!(movies[0].title, "Babe");
    assert_eq!(movies[1].title, "Toy Story");
    assert_eq!(repo.count().await.unwrap(), 2);
}
