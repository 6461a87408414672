//! Tests for BookmarkService against the packed Firefox fixture

use std::path::PathBuf;
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use foxmarks::application::services::BookmarkService;
use foxmarks::application::ApplicationError;
use foxmarks::domain::{diff_bookmarks, BookmarkRecord, DomainError, FormatError, LengthCheck, RootSelection};
use foxmarks::infrastructure::traits::RealFileSystem;
use foxmarks::util::testing;

const FIXTURE: &str = "tests/resources/firefox-bookmarks.json";

struct Store {
    _dir: TempDir,
    path: PathBuf,
}

fn service() -> BookmarkService {
    BookmarkService::new(Arc::new(RealFileSystem), LengthCheck::Strict)
}

/// Fixture JSON packed into a temporary `.jsonlz4` store.
#[fixture]
fn store() -> Store {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarkbackups").join("bookmarks.jsonlz4");
    service()
        .pack_file(&PathBuf::from(FIXTURE), &path)
        .expect("pack fixture");
    Store { _dir: dir, path }
}

fn record(folder: &str, title: &str, domain: &str, uri: &str) -> BookmarkRecord {
    BookmarkRecord {
        folder: folder.to_string(),
        title: title.to_string(),
        domain: domain.to_string(),
        uri: uri.to_string(),
    }
}

fn expected_menu() -> Vec<BookmarkRecord> {
    vec![
        record("/Bookmark Menu", "Google", "www.google.com", "https://www.google.com/"),
        record("/Bookmark Menu/1-hierarchy-a", "GitHub", "github.com", "https://github.com/"),
        record(
            "/Bookmark Menu/1-hierarchy-a/2-hierarchy-a/3-hierarchy-a",
            "Stack Overflow",
            "stackoverflow.com",
            "https://stackoverflow.com/",
        ),
        record(
            "/Bookmark Menu/1-hierarchy-a/2-hierarchy-a/3-hierarchy-a",
            "Amazon Web Services",
            "aws.amazon.com",
            "https://aws.amazon.com/?nc1=h_ls",
        ),
        record("/Bookmark Menu/1-hierarchy-b", "Yahoo", "www.yahoo.com", "https://www.yahoo.com/"),
        record(
            "/Bookmark Menu/1-hierarchy-b/2-hierarchy-a",
            "Facebook",
            "www.facebook.com",
            "https://www.facebook.com/",
        ),
        record(
            "/Bookmark Menu/1-hierarchy-b/2-hierarchy-a",
            "Twitter",
            "twitter.com",
            "https://twitter.com/login",
        ),
        record(
            "/Bookmark Menu/1-hierarchy-b/2-hierarchy-b",
            "Amazon.com",
            "www.amazon.com",
            "https://www.amazon.com/",
        ),
    ]
}

#[rstest]
fn given_packed_fixture_when_reading_menu_then_matches_golden_records(store: Store) {
    let got = service()
        .read_file(&store.path, &RootSelection::default())
        .unwrap();

    assert_eq!(got.len(), 8);
    assert_eq!(
        got[2],
        record(
            "/Bookmark Menu/1-hierarchy-a/2-hierarchy-a/3-hierarchy-a",
            "Stack Overflow",
            "stackoverflow.com",
            "https://stackoverflow.com/",
        )
    );
    let diff = diff_bookmarks(&got, &expected_menu());
    assert!(diff.is_empty(), "unexpected response: (-got +want)\n{diff}");
}

#[rstest]
fn given_root_marker_when_reading_then_same_as_title(store: Store) {
    let by_marker = service()
        .read_file(&store.path, &RootSelection::new(["bookmarksMenuFolder"]))
        .unwrap();
    assert_eq!(diff_bookmarks(&by_marker, &expected_menu()), "");
}

#[rstest]
fn given_all_roots_when_reading_then_other_roots_follow_in_order(store: Store) {
    let got = service().read_file(&store.path, &RootSelection::all()).unwrap();

    assert_eq!(got.len(), 11);
    assert_eq!(&got[..8], expected_menu().as_slice());
    assert_eq!(
        got[8],
        record("/Bookmarks Toolbar", "Most Visited", "", "place:sort=8&maxResults=10")
    );
    assert_eq!(got[9].domain, "www.rust-lang.org");
    assert_eq!(got[10].folder, "/Other Bookmarks");
}

#[rstest]
fn given_store_when_reading_from_stream_then_same_records(store: Store) {
    let file = std::fs::File::open(&store.path).unwrap();
    let got = service().read_from(file, &RootSelection::default()).unwrap();
    assert_eq!(got, expected_menu());
}

#[rstest]
fn given_store_when_unpacking_then_original_json(store: Store) {
    let raw = service().unpack_file(&store.path).unwrap();
    let original = std::fs::read(FIXTURE).unwrap();
    assert_eq!(raw, original);
}

#[test]
fn given_plain_text_file_when_reading_then_bad_magic_and_no_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test");
    std::fs::write(&path, "test").unwrap();

    let result = service().read_file(&path, &RootSelection::default());

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Format(FormatError::BadMagic { .. })))
    ));
}

#[test]
fn given_missing_file_when_reading_then_operation_failed() {
    let dir = TempDir::new().unwrap();
    let result = service().read_file(&dir.path().join("absent.jsonlz4"), &RootSelection::default());
    assert!(matches!(result, Err(ApplicationError::OperationFailed { .. })));
}

#[test]
fn given_packed_non_json_when_reading_then_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.jsonlz4");
    let packed = foxmarks::domain::container::encode_exact(b"{ not json").unwrap();
    std::fs::write(&path, packed).unwrap();

    let result = service().read_file(&path, &RootSelection::default());
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::Format(FormatError::InvalidJson(_))))
    ));
}

#[test]
fn given_non_json_input_when_packing_then_refused() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("in.json");
    std::fs::write(&json, "not json").unwrap();

    let result = service().pack_file(&json, &dir.path().join("out.jsonlz4"));
    assert!(result.is_err());
    assert!(!dir.path().join("out.jsonlz4").exists());
}
