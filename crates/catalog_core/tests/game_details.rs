use catalog_core::{AggregateError, Game, GameDetailsAggregate, Genre, UserRating};
use chrono::Utc;
use uuid::Uuid;

fn empty_details() -> GameDetailsAggregate {
    let genre = Genre::new("Roguelike").unwrap();
    let game = Game::new("Hades", "escape the underworld", Utc::now(), genre.id()).unwrap();
    GameDetailsAggregate::new(game, genre, Vec::new()).unwrap()
}

fn details_with(values: &[i32]) -> GameDetailsAggregate {
    let genre = Genre::new("Roguelike").unwrap();
    let game = Game::new("Spelunky", "", Utc::now(), genre.id()).unwrap();
    let ratings = values
        .iter()
        .map(|value| UserRating::new(Uuid::new_v4(), game.id(), *value).unwrap())
        .collect();
    GameDetailsAggregate::new(game, genre, ratings).unwrap()
}

#[test]
fn average_of_no_ratings_is_zero() {
    let details = empty_details();

    assert_eq!(details.calculate_average_rating(), 0.0);
    assert_eq!(details.average_rating(), 0.0);
    assert_eq!(details.rating_count(), 0);
}

#[test]
fn stats_are_derived_on_construction() {
    let details = details_with(&[3, 4, 5]);

    assert_eq!(details.rating_count(), 3);
    assert_eq!(details.average_rating(), 4.0);
    assert_eq!(details.calculate_average_rating(), 4.0);
}

#[test]
fn add_rating_updates_stats() {
    let mut details = empty_details();
    let first_user = Uuid::new_v4();
    let second_user = Uuid::new_v4();

    let added = details.add_rating(first_user, 5).unwrap().clone();
    assert_eq!(added.user_id(), first_user);
    assert_eq!(added.game_id(), details.game().id());
    assert_eq!(added.rating(), 5);

    details.add_rating(second_user, 2).unwrap();
    assert_eq!(details.rating_count(), 2);
    assert_eq!(details.average_rating(), 3.5);
    assert_eq!(details.rating_by(first_user), Some(&added));
}

#[test]
fn second_rating_from_same_user_is_rejected() {
    let mut details = empty_details();
    let user_id = Uuid::new_v4();
    details.add_rating(user_id, 4).unwrap();

    let err = details.add_rating(user_id, 1).unwrap_err();

    assert_eq!(err, AggregateError::DuplicateRating(user_id));
    assert_eq!(details.rating_count(), 1);
    assert_eq!(details.average_rating(), 4.0);
}

#[test]
fn out_of_range_rating_leaves_state_unchanged() {
    let mut details = details_with(&[2]);

    for value in [0, 6] {
        let err = details.add_rating(Uuid::new_v4(), value).unwrap_err();
        assert_eq!(err, AggregateError::InvalidRating(value));
    }

    assert_eq!(details.rating_count(), 1);
    assert_eq!(details.average_rating(), 2.0);
}

#[test]
fn update_rating_replaces_existing_score() {
    let mut details = details_with(&[5]);
    let user_id = Uuid::new_v4();
    details.add_rating(user_id, 1).unwrap();
    assert_eq!(details.average_rating(), 3.0);

    let updated = details.update_rating(user_id, 5).unwrap();
    assert_eq!(updated.rating(), 5);
    assert_eq!(details.rating_count(), 2);
    assert_eq!(details.average_rating(), 5.0);
}

#[test]
fn update_rating_without_prior_rating_fails() {
    let mut details = details_with(&[3]);
    let stranger = Uuid::new_v4();

    let err = details.update_rating(stranger, 4).unwrap_err();

    assert_eq!(err, AggregateError::RatingNotFound(stranger));
    assert_eq!(details.average_rating(), 3.0);
}

#[test]
fn update_rating_enforces_the_same_bound_as_add() {
    let mut details = empty_details();
    let user_id = Uuid::new_v4();
    details.add_rating(user_id, 3).unwrap();

    let err = details.update_rating(user_id, 7).unwrap_err();

    assert_eq!(err, AggregateError::InvalidRating(7));
    assert_eq!(details.rating_by(user_id).unwrap().rating(), 3);
    assert_eq!(details.average_rating(), 3.0);
}
