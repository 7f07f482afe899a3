use catalog_core::model::game::release_horizon;
use catalog_core::model::validation::{
    DESCRIPTION_MAX_CHARS, PASSWORD_MAX_CHARS, TITLE_MAX_CHARS, USERNAME_MAX_CHARS,
};
use catalog_core::{Game, Genre, User, UserRating, UserRole, ValidationError};
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

#[test]
fn game_with_id_keeps_every_field_as_given() {
    let id = Uuid::new_v4();
    let genre_id = Uuid::new_v4();
    let release = Utc.with_ymd_and_hms(2004, 11, 16, 0, 0, 0).unwrap();

    let game = Game::with_id(id, "Half-Life 2", "gravity gun", release, genre_id).unwrap();

    assert_eq!(game.id(), id);
    assert_eq!(game.title(), "Half-Life 2");
    assert_eq!(game.description(), "gravity gun");
    assert_eq!(game.release_date(), release);
    assert_eq!(game.genre_id(), genre_id);
}

#[test]
fn game_title_and_description_limits_count_characters() {
    let genre_id = Uuid::new_v4();
    let now = Utc::now();

    let longest = "é".repeat(TITLE_MAX_CHARS);
    assert!(Game::new(longest, "", now, genre_id).is_ok());

    let err = Game::new("x".repeat(TITLE_MAX_CHARS + 1), "", now, genre_id).unwrap_err();
    assert_eq!(err, ValidationError::TitleTooLong { actual: 201 });

    let err = Game::new("ok", "d".repeat(DESCRIPTION_MAX_CHARS + 1), now, genre_id).unwrap_err();
    assert_eq!(err, ValidationError::DescriptionTooLong { actual: 2001 });
    assert_eq!(err.field(), "description");

    let err = Game::new("   ", "", now, genre_id).unwrap_err();
    assert_eq!(err, ValidationError::TitleEmpty);
}

#[test]
fn game_release_date_must_stay_within_horizon() {
    let genre_id = Uuid::new_v4();

    let past = Utc.with_ymd_and_hms(1980, 5, 22, 0, 0, 0).unwrap();
    assert!(Game::new("Pac-Man", "", past, genre_id).is_ok());

    let near = release_horizon() - Duration::days(1);
    assert!(Game::new("Soon", "", near, genre_id).is_ok());

    let far = release_horizon() + Duration::days(1);
    let err = Game::new("Someday", "", far, genre_id).unwrap_err();
    assert_eq!(err, ValidationError::ReleaseDateTooFar);
}

#[test]
fn game_release_date_has_a_lower_bound() {
    let genre_id = Uuid::new_v4();

    let earliest = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
    assert!(Game::new("Mehen", "", earliest, genre_id).is_ok());

    let year_zero = Utc.with_ymd_and_hms(0, 12, 31, 23, 59, 59).unwrap();
    let err = Game::new("Too old", "", year_zero, genre_id).unwrap_err();
    assert_eq!(err, ValidationError::ReleaseDateTooEarly);
    assert_eq!(err.field(), "release_date");

    let negative = Utc.with_ymd_and_hms(-1, 1, 1, 0, 0, 0).unwrap();
    let mut game = Game::new("Ur", "", earliest, genre_id).unwrap();
    let err = game.update("Ur", "", negative, genre_id).unwrap_err();
    assert_eq!(err, ValidationError::ReleaseDateTooEarly);
    assert_eq!(game.release_date(), earliest);
}

#[test]
fn nil_identities_are_rejected() {
    let now = Utc::now();

    let err = Game::with_id(Uuid::nil(), "t", "", now, Uuid::new_v4()).unwrap_err();
    assert_eq!(err, ValidationError::NilId("game_id"));
    let err = Game::new("t", "", now, Uuid::nil()).unwrap_err();
    assert_eq!(err, ValidationError::NilId("genre_id"));
    let err = Genre::with_id(Uuid::nil(), "Action").unwrap_err();
    assert_eq!(err, ValidationError::NilId("genre_id"));
    let err = User::with_id(Uuid::nil(), "name", "pw", UserRole::User).unwrap_err();
    assert_eq!(err, ValidationError::NilId("user_id"));
    let err = UserRating::new(Uuid::nil(), Uuid::new_v4(), 3).unwrap_err();
    assert_eq!(err, ValidationError::NilId("user_id"));
}

#[test]
fn failed_game_update_leaves_game_unchanged() {
    let genre_id = Uuid::new_v4();
    let mut game = Game::new("Quake", "", Utc::now(), genre_id).unwrap();
    let before = game.clone();

    let err = game
        .update("Quake II", "", release_horizon() + Duration::days(30), genre_id)
        .unwrap_err();

    assert_eq!(err, ValidationError::ReleaseDateTooFar);
    assert_eq!(game, before);
}

#[test]
fn genre_title_is_trimmed_and_validated() {
    let mut genre = Genre::new("  Strategy  ").unwrap();
    assert_eq!(genre.title(), "Strategy");

    assert_eq!(genre.update_title("").unwrap_err(), ValidationError::TitleEmpty);
    assert_eq!(genre.title(), "Strategy");

    genre.update_title(" 4X ").unwrap();
    assert_eq!(genre.title(), "4X");
}

#[test]
fn user_fields_are_validated() {
    let user = User::new("  gabe ", "hunter2", UserRole::Admin).unwrap();
    assert_eq!(user.username(), "gabe");
    assert_eq!(user.role(), UserRole::Admin);
    assert!(user.password_matches("hunter2"));
    assert!(!user.password_matches("hunter3"));

    let err = User::new(" ", "pw", UserRole::User).unwrap_err();
    assert_eq!(err, ValidationError::UsernameEmpty);
    let err = User::new("u".repeat(USERNAME_MAX_CHARS + 1), "pw", UserRole::User).unwrap_err();
    assert_eq!(err, ValidationError::UsernameTooLong { actual: 201 });
    let err = User::new("name", "", UserRole::User).unwrap_err();
    assert_eq!(err, ValidationError::PasswordEmpty);
    let err = User::new("name", "p".repeat(PASSWORD_MAX_CHARS + 1), UserRole::User).unwrap_err();
    assert_eq!(err, ValidationError::PasswordTooLong { actual: 201 });
}

#[test]
fn user_role_parses_only_known_values() {
    assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
    assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
    assert_eq!(UserRole::Admin.to_string(), "admin");

    let err = "root".parse::<UserRole>().unwrap_err();
    assert_eq!(err, ValidationError::InvalidRole("root".to_string()));
    assert_eq!(err.field(), "user_role");
}

#[test]
fn rating_value_is_bounded() {
    let user_id = Uuid::new_v4();
    let game_id = Uuid::new_v4();

    for value in 1..=5 {
        assert_eq!(UserRating::new(user_id, game_id, value).unwrap().rating(), value);
    }
    for value in [0, 6, -1] {
        let err = UserRating::new(user_id, game_id, value).unwrap_err();
        assert_eq!(err, ValidationError::RatingOutOfRange(value));
    }

    let mut rating = UserRating::new(user_id, game_id, 2).unwrap();
    assert!(rating.change(9).is_err());
    assert_eq!(rating.rating(), 2);
}

#[test]
fn entities_serialize_to_camel_case_without_password() {
    let genre = Genre::new("Adventure").unwrap();
    let release = Utc.with_ymd_and_hms(1990, 10, 1, 0, 0, 0).unwrap();
    let game = Game::new("Monkey Island", "grog", release, genre.id()).unwrap();
    let user = User::new("guybrush", "threepwood", UserRole::User).unwrap();

    let game_json = serde_json::to_value(&game).unwrap();
    assert_eq!(game_json["title"], "Monkey Island");
    assert_eq!(game_json["genreId"], genre.id().to_string());
    assert!(game_json.get("releaseDate").is_some());

    let user_json = serde_json::to_value(&user).unwrap();
    assert_eq!(user_json["username"], "guybrush");
    assert_eq!(user_json["role"], "user");
    assert!(user_json.get("password").is_none());
}
