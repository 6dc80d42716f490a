mod support;

use moviedb_explorer::poster::{load_poster, POSTER_HEIGHT, POSTER_WIDTH};
use moviedb_explorer::{HttpPosterSource, PosterError, PosterSource};
use support::{FakeServer, Route};

#[test]
fn downloads_and_scales_poster() {
    let server = FakeServer::start(vec![Route::png("/t/p/w200/inception.jpg", 200, 300)]);
    let source = HttpPosterSource::new(server.config()).unwrap();

    assert_eq!(
        source.url_for("/inception.jpg"),
        format!("{}/t/p/w200/inception.jpg", server.url())
    );

    let poster = load_poster(&source, "/inception.jpg").unwrap();
    assert_eq!((poster.width(), poster.height()), (POSTER_WIDTH, POSTER_HEIGHT));
    assert_eq!(server.requests(), ["/t/p/w200/inception.jpg"]);
}

#[test]
fn missing_poster_is_fetch_error() {
    let server = FakeServer::start(Vec::new());
    let source = HttpPosterSource::new(server.config()).unwrap();

    let err = load_poster(&source, "/gone.jpg").unwrap_err();
    match err {
        PosterError::Fetch { url, .. } => assert!(url.ends_with("/t/p/w200/gone.jpg")),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn garbage_bytes_are_decode_error() {
    let server = FakeServer::start(vec![Route::raw(
        "/t/p/w200/",
        200,
        "image/jpeg",
        b"definitely not an image",
    )]);
    let source = HttpPosterSource::new(server.config()).unwrap();

    let err = load_poster(&source, "/broken.jpg").unwrap_err();
    assert!(matches!(err, PosterError::Decode(_)), "{err:?}");
}
