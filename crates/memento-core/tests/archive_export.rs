use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use flate2::read::GzDecoder;
use url::Url;

use memento_core::export::{ArchiveExporter, DateRange, ExportOptions, ImageFetcher, MANIFEST_NAME};
use memento_core::{DiaryEntry, EntryMap, ImageSlot, MementoError, Mood};

/// Fetcher serving canned responses and recording request order.
#[derive(Default)]
struct CannedFetcher {
    responses: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl CannedFetcher {
    fn with(mut self, url: &str, bytes: &[u8]) -> Self {
        self.responses.insert(url.to_string(), bytes.to_vec());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for CannedFetcher {
    async fn fetch(&self, url: &Url) -> memento_core::Result<Vec<u8>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.responses
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| MementoError::Fetch(format!("{} returned 404 Not Found", url)))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn export_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap()
}

fn options() -> ExportOptions {
    ExportOptions::new()
        .origin(Url::parse("https://diary.example.com").unwrap())
        .seed(42)
}

fn journal() -> EntryMap {
    let mut entries = EntryMap::new();
    entries.insert(
        date(2025, 1, 5),
        DiaryEntry::new(date(2025, 1, 5))
            .with_title("Snow: day/1")
            .with_content("Built a snowman.")
            .with_mood(Mood::Happy)
            .with_image(
                ImageSlot::new("/static/thumbnails/a_thumb.jpg")
                    .with_original("/static/originals/a.png"),
            )
            .with_image(ImageSlot::new("https://cdn.example.net/missing.jpg"))
            .with_image(ImageSlot::new("data:image/webp;base64,aGVsbG8=")),
    );
    entries.insert(
        date(2025, 1, 2),
        DiaryEntry::new(date(2025, 1, 2)).with_mood(Mood::Sad),
    );
    entries.insert(
        date(2024, 12, 31),
        DiaryEntry::new(date(2024, 12, 31)).with_title("Outside range"),
    );
    entries
}

fn unpack(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().to_string();
            let mut body = Vec::new();
            entry.read_to_end(&mut body).unwrap();
            (path, body)
        })
        .collect()
}

#[tokio::test]
async fn test_one_failed_image_does_not_fail_export() {
    let fetcher = CannedFetcher::default()
        .with("https://diary.example.com/static/originals/a.png", b"png-bytes");
    let exporter = ArchiveExporter::new(fetcher, options());
    let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();

    let archive = exporter
        .export(&journal(), range, export_time())
        .await
        .expect("export should succeed");

    assert_eq!(archive.file_name, "memento_export_2025-03-01.tar.gz");
    assert_eq!(archive.report.dates, vec![date(2025, 1, 2), date(2025, 1, 5)]);
    assert_eq!(archive.report.images_resolved, 2);
    assert_eq!(archive.report.images_skipped, 1);

    let files = unpack(&archive.bytes);
    let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names[0], "2025-01-02_Untitled.md");
    assert_eq!(names[1], "2025-01-05_Snow_ day_1.md");
    assert!(names[2].starts_with("images/2025-01-05_Snow_ day_1_") && names[2].ends_with(".png"));
    assert!(names[3].starts_with("images/2025-01-05_Snow_ day_1_") && names[3].ends_with(".webp"));
    assert_eq!(names[4], MANIFEST_NAME);
    assert_eq!(files.len(), 5);
    assert_eq!(files[2].1, b"png-bytes");
    assert_eq!(files[3].1, b"hello");

    let document = String::from_utf8(files[1].1.clone()).unwrap();
    assert!(document.starts_with("# Snow: day/1\n"));
    assert!(document.contains("Built a snowman."));
    assert!(document.contains(&format!("![Image 1](<{}>)", names[2])));
    assert!(document.contains("- Image 2 skipped (`https://cdn.example.net/missing.jpg`):"));
    assert!(document.contains(&format!("![Image 3](<{}>)", names[3])));

    let manifest: serde_json::Value = serde_json::from_slice(&files[4].1).unwrap();
    let dates: Vec<&str> = manifest["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-01-02", "2025-01-05"]);
}

#[tokio::test]
async fn test_empty_range_fails_without_archive() {
    let exporter = ArchiveExporter::new(CannedFetcher::default(), options());
    let range = DateRange::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap();

    let result = exporter.export(&journal(), range, export_time()).await;

    assert!(matches!(result, Err(MementoError::EmptyExport { .. })));
}

#[tokio::test]
async fn test_images_fetched_in_order_one_at_a_time() {
    let mut entries = EntryMap::new();
    for day in [3, 1, 2] {
        let d = date(2025, 2, day);
        entries.insert(
            d,
            DiaryEntry::new(d)
                .with_image(ImageSlot::new(format!("/img/{}-a.jpg", day)))
                .with_image(ImageSlot::new(format!("/img/{}-b.jpg", day))),
        );
    }
    let fetcher = Arc::new(CannedFetcher::default().with("https://diary.example.com/img/2-b.jpg", b"b"));
    let exporter = ArchiveExporter::new(Arc::clone(&fetcher), options());
    let range = DateRange::new(date(2025, 2, 1), date(2025, 2, 28)).unwrap();

    let archive = exporter.export(&entries, range, export_time()).await.unwrap();

    assert_eq!(archive.report.images_resolved, 1);
    assert_eq!(archive.report.images_skipped, 5);
    assert_eq!(
        fetcher.requests(),
        vec![
            "https://diary.example.com/img/1-a.jpg",
            "https://diary.example.com/img/1-b.jpg",
            "https://diary.example.com/img/2-a.jpg",
            "https://diary.example.com/img/2-b.jpg",
            "https://diary.example.com/img/3-a.jpg",
            "https://diary.example.com/img/3-b.jpg",
        ]
    );
    assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_same_seed_gives_identical_archives() {
    let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
    let first = ArchiveExporter::new(CannedFetcher::default(), options())
        .export(&journal(), range, export_time())
        .await
        .unwrap();
    let second = ArchiveExporter::new(CannedFetcher::default(), options())
        .export(&journal(), range, export_time())
        .await
        .unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[tokio::test]
async fn test_cancel_flag_stops_export() {
    let flag = Arc::new(AtomicBool::new(true));
    let exporter = ArchiveExporter::new(CannedFetcher::default(), options().cancel_flag(flag));
    let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();

    let result = exporter.export(&journal(), range, export_time()).await;

    assert!(matches!(result, Err(MementoError::Cancelled)));
}

#[tokio::test]
async fn test_server_images_skipped_without_origin() {
    let exporter = ArchiveExporter::new(CannedFetcher::default(), ExportOptions::new().seed(1));
    let range = DateRange::new(date(2025, 1, 5), date(2025, 1, 5)).unwrap();

    let archive = exporter.export(&journal(), range, export_time()).await.unwrap();

    assert_eq!(archive.report.images_resolved, 1);
    assert_eq!(archive.report.images_skipped, 2);
}

#[tokio::test]
async fn test_write_to_dir_places_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = ArchiveExporter::new(CannedFetcher::default(), options());
    let range = DateRange::new(date(2024, 12, 1), date(2025, 1, 31)).unwrap();

    let archive = exporter.export(&journal(), range, export_time()).await.unwrap();
    let path = archive.write_to_dir(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("memento_export_2025-03-01.tar.gz"));
    assert_eq!(std::fs::read(&path).unwrap(), archive.bytes);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
