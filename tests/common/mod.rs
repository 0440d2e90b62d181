//! Shared catalog fixture for integration tests
//!
//! Seeds a small but complete catalog:
//!
//! | Book | Author | Publisher (country) | Year | Stores | Ratings |
//! |---|---|---|---|---|---|
//! | Septology | Fosse | Samlaget (Norway) | 2021 | Norli, Eymundsson | 8, 9, 7 |
//! | Morning Star | Knausgård | Samlaget (Norway) | 2009 | Norli, Tronsmo | 6, 7, 7 |
//! | Independent People | Laxness | Forlagid (Iceland) | 1946 | Eymundsson | none |
//! | Melancholy | Fosse | Samlaget (Norway) | 1995 | none | 10 |
//! | Boyhood Island | Knausgård | Samlaget (Norway) | 2013 | Tronsmo | 8 |
//!
//! Stores: Norli (Oslo), Tronsmo (Oslo), Eymundsson (Reykjavik),
//! Ark (Bergen, stocks nothing).

use bookyard::storage::models::{NewAuthor, NewBook, NewPublisher, NewReview, NewStore};
use bookyard::storage::{queries, Database};
use chrono::NaiveDate;

pub struct CatalogFixture {
    pub user_id: i64,
    pub septology: i64,
    pub morning_star: i64,
    pub independent_people: i64,
    pub melancholy: i64,
    pub boyhood_island: i64,
    pub norli: i64,
    pub tronsmo: i64,
    pub eymundsson: i64,
    pub ark: i64,
}

pub async fn seed(db: &Database) -> CatalogFixture {
    let pool = db.pool();
    let user_id = queries::insert_user(pool, "librarian").await.expect("user");

    let fosse = queries::insert_author(pool, &NewAuthor::new("Jon Fosse".to_string(), user_id))
        .await
        .expect("author");
    let knausgard = queries::insert_author(
        pool,
        &NewAuthor::new("Karl Ove Knausgård".to_string(), user_id),
    )
    .await
    .expect("author");
    let laxness = queries::insert_author(
        pool,
        &NewAuthor::new("Halldór Laxness".to_string(), user_id),
    )
    .await
    .expect("author");

    let samlaget = queries::insert_publisher(
        pool,
        &NewPublisher::new("Samlaget".to_string(), "Norway".to_string(), user_id),
    )
    .await
    .expect("publisher");
    let forlagid = queries::insert_publisher(
        pool,
        &NewPublisher::new("Forlagid".to_string(), "Iceland".to_string(), user_id),
    )
    .await
    .expect("publisher");

    let norli = queries::insert_store(
        pool,
        &NewStore::new("Norli".to_string(), "Oslo".to_string()),
    )
    .await
    .expect("store");
    let tronsmo = queries::insert_store(
        pool,
        &NewStore::new("Tronsmo".to_string(), "Oslo".to_string()),
    )
    .await
    .expect("store");
    let eymundsson = queries::insert_store(
        pool,
        &NewStore::new("Eymundsson".to_string(), "Reykjavik".to_string()),
    )
    .await
    .expect("store");
    let ark = queries::insert_store(
        pool,
        &NewStore::new("Ark".to_string(), "Bergen".to_string()),
    )
    .await
    .expect("store");

    let septology = insert_book(db, "Septology", 2021, fosse, samlaget, user_id).await;
    let morning_star = insert_book(db, "Morning Star", 2009, knausgard, samlaget, user_id).await;
    let independent_people =
        insert_book(db, "Independent People", 1946, laxness, forlagid, user_id).await;
    let melancholy = insert_book(db, "Melancholy", 1995, fosse, samlaget, user_id).await;
    let boyhood_island =
        insert_book(db, "Boyhood Island", 2013, knausgard, samlaget, user_id).await;

    for (book, store) in [
        (septology, norli),
        (septology, eymundsson),
        (morning_star, norli),
        (morning_star, tronsmo),
        (independent_people, eymundsson),
        (boyhood_island, tronsmo),
    ] {
        queries::stock_book(pool, book, store).await.expect("stock");
    }

    let mut reviews = Vec::new();
    for rating in [8, 9, 7] {
        reviews.push(NewReview::new(septology, rating, String::new(), user_id));
    }
    for rating in [6, 7, 7] {
        reviews.push(NewReview::new(morning_star, rating, String::new(), user_id));
    }
    reviews.push(NewReview::new(melancholy, 10, String::new(), user_id));
    reviews.push(NewReview::new(boyhood_island, 8, String::new(), user_id));
    queries::insert_reviews(pool, &reviews).await.expect("reviews");

    CatalogFixture {
        user_id,
        septology,
        morning_star,
        independent_people,
        melancholy,
        boyhood_island,
        norli,
        tronsmo,
        eymundsson,
        ark,
    }
}

async fn insert_book(
    db: &Database,
    title: &str,
    year: i32,
    author_id: i64,
    publisher_id: i64,
    creator_id: i64,
) -> i64 {
    let date = NaiveDate::from_ymd_opt(year, 6, 15).expect("date");
    queries::insert_book(
        db.pool(),
        &NewBook::new(title.to_string(), date, author_id, publisher_id, creator_id),
    )
    .await
    .expect("book")
}
