//! Element-wise comparison of bookmark sequences for golden-file checks.

use std::fmt::Write;

use crate::domain::entities::BookmarkRecord;

/// Describe how `got` differs from `want`, one line per difference.
///
/// Returns an empty string when both sequences are equal. Lines read
/// `-got +want`:
///
/// ```text
/// [2].title: -"Stack" +"Stack Overflow"
/// [8]: +{folder: "/x", title: "y", domain: "z", uri: "https://z/"}
/// ```
pub fn diff_bookmarks(got: &[BookmarkRecord], want: &[BookmarkRecord]) -> String {
    let mut report = String::new();

    for i in 0..got.len().max(want.len()) {
        match (got.get(i), want.get(i)) {
            (Some(g), Some(w)) => {
                for (field, gv, wv) in [
                    ("folder", &g.folder, &w.folder),
                    ("title", &g.title, &w.title),
                    ("domain", &g.domain, &w.domain),
                    ("uri", &g.uri, &w.uri),
                ] {
                    if gv != wv {
                        let _ = writeln!(report, "[{i}].{field}: -{gv:?} +{wv:?}");
                    }
                }
            }
            (Some(g), None) => {
                let _ = writeln!(report, "[{i}]: -{}", describe(g));
            }
            (None, Some(w)) => {
                let _ = writeln!(report, "[{i}]: +{}", describe(w));
            }
            (None, None) => {}
        }
    }
    report
}

fn describe(record: &BookmarkRecord) -> String {
    format!(
        "{{folder: {:?}, title: {:?}, domain: {:?}, uri: {:?}}}",
        record.folder, record.title, record.domain, record.uri
    )
}
