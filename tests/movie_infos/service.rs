//! `MovieInfoService` behaviour over an in-memory store.

use futures::TryStreamExt;
use movies_info_service::{
    Document, FileStore, InMemoryStore, MovieInfo, MovieInfoService, RecordStore, ServiceError,
    StoreError,
};

use crate::support::{movie, seeded_store, FailingStore};

async fn seeded_service() -> MovieInfoService<InMemoryStore> {
    MovieInfoService::new(seeded_store().await)
}

async fn all<S: RecordStore>(service: &MovieInfoService<S>) -> Vec<MovieInfo> {
    service.get_all().await.unwrap().try_collect().await.unwrap()
}

#[tokio::test]
async fn add_assigns_new_id_and_is_retrievable() {
    let service = seeded_service().await;
    let input = movie(
        "Batman Begins1",
        2005,
        &["Christian Bale", "Michael Cane"],
        "2005-06-15",
    );

    let saved = service.add_movie_info(input.clone()).await.unwrap();
    let id = saved.id.clone().unwrap();
    assert_eq!(saved.clone().without_id(), input);

    let loaded = service.get_movie_info_by_id(&id).await.unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(all(&service).await.len(), 4);
}

#[tokio::test]
async fn add_ignores_client_supplied_id() {
    let service = seeded_service().await;
    let input = movie("Batman Begins", 2005, &[], "2005-06-15").with_id("abc".to_string());

    let saved = service.add_movie_info(input).await.unwrap();
    assert_ne!(saved.id.as_deref(), Some("abc"));

    // the seeded "abc" record is untouched
    let seeded = service.get_movie_info_by_id("abc").await.unwrap().unwrap();
    assert_eq!(seeded.name, "Dark Knight Rises");
}

#[tokio::test]
async fn add_invalid_record_reports_sorted_messages() {
    let service = seeded_service().await;
    let input = movie(
        "",
        -2005,
        &["Christian Bale", "Michael Cane"],
        "2005-06-15",
    );

    let err = service.add_movie_info(input).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "movieInfo.name must be present,movieInfo.year must be positive"
    );
    assert_eq!(all(&service).await.len(), 3);
}

#[tokio::test]
async fn add_invalid_record_never_reaches_the_store() {
    let service = MovieInfoService::new(FailingStore);
    let err = service
        .add_movie_info(movie("", 0, &[], "2005-06-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn get_missing_id_is_none() {
    let service = seeded_service().await;
    assert!(service.get_movie_info_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let service = seeded_service().await;
    let patch = movie(
        "Dark Knight Rises",
        2022,
        &["Christian Bale", "Tom Hardy"],
        "2012-07-20",
    );

    let updated = service.update_movie_info("abc", patch.clone()).await.unwrap();
    assert_eq!(updated.id.as_deref(), Some("abc"));
    assert_eq!(updated.year, 2022);
    assert_eq!(updated.clone().without_id(), patch);

    let loaded = service.get_movie_info_by_id("abc").await.unwrap().unwrap();
    assert_eq!(loaded, updated);
}

#[tokio::test]
async fn update_does_not_validate() {
    let service = seeded_service().await;
    let updated = service
        .update_movie_info("abc", movie("", 0, &[], "2012-07-20"))
        .await
        .unwrap();
    assert_eq!(updated.name, "");
    assert_eq!(updated.year, 0);
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let service = seeded_service().await;
    let err = service
        .update_movie_info("nope", movie("Batman Ends", 2005, &[], "2005-06-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref id) if id == "nope"));
    assert_eq!(all(&service).await.len(), 3);
}

#[tokio::test]
async fn delete_removes_one_and_is_idempotent() {
    let service = seeded_service().await;

    service.delete_movie_info("abc").await.unwrap();
    assert_eq!(all(&service).await.len(), 2);

    service.delete_movie_info("abc").await.unwrap();
    assert_eq!(all(&service).await.len(), 2);
    assert_eq!(service.count().await.unwrap(), 2);
}

#[tokio::test]
async fn seeded_scenario() {
    let service = seeded_service().await;
    assert_eq!(all(&service).await.len(), 3);

    let found = service.get_movie_info_by_id("abc").await.unwrap().unwrap();
    assert_eq!(found.name, "Dark Knight Rises");

    let patch = MovieInfo {
        year: 2022,
        ..found.clone()
    };
    let updated = service.update_movie_info("abc", patch).await.unwrap();
    assert_eq!(updated.year, 2022);

    service.delete_movie_info("abc").await.unwrap();
    assert_eq!(all(&service).await.len(), 2);
}

#[tokio::test]
async fn store_failures_propagate() {
    let service = MovieInfoService::new(FailingStore);

    let err = service
        .add_movie_info(movie("Batman Begins", 2005, &[], "2005-06-15"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "store error: store I/O error: connection refused"
    );
    assert!(matches!(
        service.get_all().await.err().unwrap(),
        ServiceError::Store(StoreError::Io(_))
    ));
    assert!(matches!(
        service.delete_movie_info("abc").await.unwrap_err(),
        ServiceError::Store(_)
    ));
}

#[tokio::test]
async fn works_over_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie_infos.bin");

    let id = {
        let service = MovieInfoService::new(FileStore::open(&path).await.unwrap());
        let saved = service
            .add_movie_info(movie("Batman Begins", 2005, &["Christian Bale"], "2005-06-15"))
            .await
            .unwrap();
        saved.id.unwrap()
    };

    let service = MovieInfoService::new(FileStore::open(&path).await.unwrap());
    let loaded = service.get_movie_info_by_id(&id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Batman Begins");
    assert_eq!(loaded.cast, vec!["Christian Bale".to_string()]);
}

#[tokio::test]
async fn failed_add_over_the_file_store_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movie_infos.bin");
    let service = MovieInfoService::new(FileStore::open(&path).await.unwrap());

    std::fs::create_dir(service.store().path().with_extension("tmp")).unwrap();

    let err = service
        .add_movie_info(movie("Batman Begins", 2005, &["Christian Bale"], "2005-06-15"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(StoreError::Io(_))));
    assert_eq!(service.count().await.unwrap(), 0);
    assert!(all(&service).await.is_empty());

    let reopened = MovieInfoService::new(FileStore::open(&path).await.unwrap());
    assert_eq!(reopened.count().await.unwrap(), 0);
}
