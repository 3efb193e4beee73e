use mealplanner_rating::{Command, Query, RatingUpdate};
use mealplanner_shared::Error;
use temp_dir::TempDir;
use time::macros::date;

mod helpers;

#[tokio::test]
async fn test_create_replaces_previous_rating() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.pool.clone());
    let query = Query(state.pool.clone());

    let meal = helpers::create_meal(&state.pool, "Paella").await?;
    let ana = helpers::create_person(&state.pool, "Ana").await?;

    let first = command
        .create_on(helpers::input(&meal, &ana, 2), date!(2024 - 01 - 01))
        .await?;

    let mut input = helpers::input(&meal, &ana, 5);
    input.comment = Some("much better".to_owned());
    let second = command.create_on(input, date!(2024 - 02 - 01)).await?;
    assert_eq!(first, second);

    let ratings = query.find_by_meal(&meal).await?;
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].id, first);
    assert_eq!(ratings[0].rating, 5);
    assert_eq!(ratings[0].comment.as_deref(), Some("much better"));
    assert_eq!(ratings[0].rated_date, date!(2024 - 02 - 01));
    assert_eq!(ratings[0].person.name, "Ana");

    Ok(())
}

#[tokio::test]
async fn test_create_requires_meal_and_person() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.pool.clone());

    let meal = helpers::create_meal(&state.pool, "Paella").await?;
    let ana = helpers::create_person(&state.pool, "Ana").await?;

    let result = command.create(helpers::input("missing", &ana, 3)).await;
    assert!(matches!(result, Err(Error::NotFound(msg)) if msg.contains("Meal")));

    let result = command.create(helpers::input(&meal, "missing", 3)).await;
    assert!(matches!(result, Err(Error::NotFound(msg)) if msg.contains("Person")));

    for score in [0, 6] {
        let result = command.create(helpers::input(&meal, &ana, score)).await;
        assert!(matches!(result, Err(Error::Validate(_))), "{score}");
    }

    assert!(Query(state.pool.clone()).find_by_meal(&meal).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_keeps_rated_date() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.pool.clone());
    let query = Query(state.pool.clone());

    let meal = helpers::create_meal(&state.pool, "Paella").await?;
    let ana = helpers::create_person(&state.pool, "Ana").await?;
    let id = command
        .create_on(helpers::input(&meal, &ana, 2), date!(2024 - 01 - 01))
        .await?;

    command
        .update(
            &id,
            RatingUpdate {
                rating: 4,
                comment: Some("grew on me".to_owned()),
            },
        )
        .await?;

    let rating = query.find(&id).await?.unwrap();
    assert_eq!(rating.rating, 4);
    assert_eq!(rating.comment.as_deref(), Some("grew on me"));
    assert_eq!(rating.rated_date, date!(2024 - 01 - 01));

    let result = command
        .update(
            "missing",
            RatingUpdate {
                rating: 4,
                comment: None,
            },
        )
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    let result = command
        .update(
            &id,
            RatingUpdate {
                rating: 9,
                comment: None,
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Validate(_))));

    Ok(())
}

#[tokio::test]
async fn test_find_by_meal_keeps_latest_per_person() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let query = Query(state.pool.clone());

    let meal = helpers::create_meal(&state.pool, "Paella").await?;
    let ana = helpers::create_person(&state.pool, "Ana").await?;
    let ben = helpers::create_person(&state.pool, "Ben").await?;

    // Duplicate rows for one person, as left behind by concurrent writers
    let rows = [
        ("r1", &ana, 2, date!(2024 - 01 - 01)),
        ("r2", &ben, 4, date!(2024 - 01 - 03)),
        ("r3", &ana, 5, date!(2024 - 01 - 10)),
        ("r4", &ana, 1, date!(2024 - 01 - 05)),
    ];
    for (id, person, rating, rated_date) in rows {
        sqlx::query(
            "INSERT INTO meal_rating (id, meal_id, person_id, rating, comment, rated_date) VALUES (?, ?, ?, ?, NULL, ?)",
        )
        .bind(id)
        .bind(&meal)
        .bind(person)
        .bind(rating)
        .bind(rated_date.to_julian_day())
        .execute(&state.pool)
        .await?;
    }

    let ratings = query.find_by_meal(&meal).await?;
    let ids = ratings.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["r3", "r2"]);

    // The average covers every stored row
    assert_eq!(query.average_rating(&meal).await?, Some(3.0));

    Ok(())
}

#[tokio::test]
async fn test_average_rating() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.pool.clone());
    let query = Query(state.pool.clone());

    let meal = helpers::create_meal(&state.pool, "Paella").await?;
    let ana = helpers::create_person(&state.pool, "Ana").await?;
    let ben = helpers::create_person(&state.pool, "Ben").await?;

    assert_eq!(query.average_rating(&meal).await?, None);

    command.create(helpers::input(&meal, &ana, 4)).await?;
    command.create(helpers::input(&meal, &ben, 5)).await?;

    assert_eq!(query.average_rating(&meal).await?, Some(4.5));
    assert_eq!(query.average_rating("other").await?, None);

    Ok(())
}

#[tokio::test]
async fn test_delete_rating_person_and_meal() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.pool.clone());
    let query = Query(state.pool.clone());

    let paella = helpers::create_meal(&state.pool, "Paella").await?;
    let soup = helpers::create_meal(&state.pool, "Soup").await?;
    let ana = helpers::create_person(&state.pool, "Ana").await?;
    let ben = helpers::create_person(&state.pool, "Ben").await?;

    let id = command.create(helpers::input(&paella, &ana, 4)).await?;
    command.delete(&id).await?;
    assert!(query.find(&id).await?.is_none());
    assert!(matches!(command.delete(&id).await, Err(Error::NotFound(_))));

    command.create(helpers::input(&paella, &ana, 4)).await?;
    command.create(helpers::input(&paella, &ben, 2)).await?;
    command.create(helpers::input(&soup, &ben, 5)).await?;

    mealplanner_person::Command(state.pool.clone()).delete(&ben).await?;
    let ratings = query.find_by_meal(&paella).await?;
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].person.id, ana);
    assert!(query.find_by_meal(&soup).await?.is_empty());

    mealplanner_meal::Command(state.pool.clone()).delete(&paella).await?;
    assert!(query.find_by_meal(&paella).await?.is_empty());
    assert_eq!(query.average_rating(&paella).await?, None);

    Ok(())
}
