use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::song::domain::{CreateParams, FilterValues, SearchFilters};
use service::song::metadata::StaticMetadataClient;
use service::song::query::{SearchQuery, SEARCH_FIELDS, SELECT_SONGS};
use service::song::repository::mock::MockSongRepository;
use service::song::service::split_verses;
use service::song::CatalogService;

fn bench_query_build(c: &mut Criterion) {
    let filters: SearchFilters = [
        ("group_name", "Muse"),
        ("release_date", "16.07.2006"),
        ("link", "https://www.youtube.com/watch?v=Xsp3_a-PMTw"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    c.bench_function("search_query_build", |b| {
        b.iter(|| SearchQuery::build(&SEARCH_FIELDS, SELECT_SONGS, 20, 100, &filters).unwrap());
    });
}

fn bench_verse_split(c: &mut Criterion) {
    let text = (1..=40).map(|i| format!("verse {i} line one\nverse {i} line two")).collect::<Vec<_>>().join("\n\n");
    c.bench_function("split_verses_40", |b| {
        b.iter(|| split_verses(&text).len());
    });
}

fn bench_search(c: &mut Criterion) {
    let svc = CatalogService::new(Arc::new(MockSongRepository::default()), Arc::new(StaticMetadataClient::default()));
    let rt = tokio::runtime::Runtime::new().unwrap();
    for i in 0..200 {
        let params = CreateParams {
            group: format!("group {}", i % 10),
            name: format!("song {i}"),
            release_date: "16.07.2006".into(),
            text: "A\n\nB".into(),
            link: format!("https://example.org/{i}"),
        };
        rt.block_on(svc.create(params)).unwrap();
    }
    let values: FilterValues = [("group_name".to_string(), vec!["group 3".to_string()])].into_iter().collect();

    c.bench_function("catalog_search_in_memory", |b| {
        b.iter(|| rt.block_on(svc.search(&values, 0, 10)).unwrap());
    });
}

criterion_group!(benches, bench_query_build, bench_verse_split, bench_search);
criterion_main!(benches);
