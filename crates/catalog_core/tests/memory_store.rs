use catalog_core::{
    Game, GameRepository, Genre, GenreRepository, ListQuery, MemoryGameRepository,
    MemoryGenreRepository, MemoryStore, StoreCounts,
};
use chrono::Utc;
use std::thread;

#[test]
fn concurrent_writers_through_cloned_repositories_all_land() {
    let store = MemoryStore::new();
    let genre = MemoryGenreRepository::new(store.clone())
        .create(&Genre::new("Arcade").unwrap())
        .unwrap();
    let games = MemoryGameRepository::new(store.clone());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let games = games.clone();
            let genre_id = genre.id();
            thread::spawn(move || {
                (0..25)
                    .map(|index| {
                        let title = format!("game-{worker}-{index}");
                        let game = Game::new(title, "", Utc::now(), genre_id).unwrap();
                        games.create(&game).unwrap().id()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(ids.len(), 200);
    for id in ids {
        assert!(games.exists(id).unwrap());
    }
    assert_eq!(games.find_all(ListQuery::all()).unwrap().len(), 200);
}

#[test]
fn returned_entities_are_copies() {
    let store = MemoryStore::new();
    let genres = MemoryGenreRepository::new(store.clone());
    let genre = genres.create(&Genre::new("Metroidvania").unwrap()).unwrap();

    let mut loaded = genres.find_by_id(genre.id()).unwrap();
    loaded.update_title("Changed locally").unwrap();

    assert_eq!(genres.find_by_id(genre.id()).unwrap().title(), "Metroidvania");
}

#[test]
fn clear_empties_every_table() {
    let store = MemoryStore::new();
    let genre = MemoryGenreRepository::new(store.clone())
        .create(&Genre::new("Puzzle").unwrap())
        .unwrap();
    MemoryGameRepository::new(store.clone())
        .create(&Game::new("Lumines", "", Utc::now(), genre.id()).unwrap())
        .unwrap();
    assert_eq!(store.counts().unwrap().games, 1);
    assert_eq!(store.counts().unwrap().genres, 1);

    store.clear().unwrap();

    assert_eq!(store.counts().unwrap(), StoreCounts::default());
}
