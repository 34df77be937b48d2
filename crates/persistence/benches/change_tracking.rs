use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use serde_json::{Value as JsonValue, json};

use unitwork_core::{
    DomainError, DomainResult, EntityKey, OwnedObject, PropertyMap, PropertyPath, TrackedEntity,
    ValueObject, flatten_owned,
};
use unitwork_tracker::ChangeTracker;

fn path(raw: &str) -> PropertyPath {
    PropertyPath::parse(raw).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LoyaltyCard {
    code: Option<String>,
}

impl ValueObject for LoyaltyCard {}

impl OwnedObject for LoyaltyCard {
    fn value_properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(
            path("code"),
            self.code.clone().map(JsonValue::String).unwrap_or(JsonValue::Null),
        );
        map
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Customer {
    key: Option<EntityKey>,
    name: String,
    loyalty: Option<LoyaltyCard>,
}

impl TrackedEntity for Customer {
    fn kind() -> &'static str {
        "customers"
    }

    fn key(&self) -> Option<EntityKey> {
        self.key
    }

    fn assign_key(&mut self, key: EntityKey) {
        self.key = Some(key);
    }

    fn tracked_properties(&self) -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert(path("name"), JsonValue::String(self.name.clone()));
        flatten_owned(&mut map, &path("loyalty"), self.loyalty.as_ref());
        map
    }

    fn write_property(&mut self, p: &PropertyPath, value: JsonValue) -> DomainResult<()> {
        match p.as_str() {
            "name" => {
                self.name = value.as_str().unwrap_or_default().to_string();
                Ok(())
            }
            "loyalty.code" => {
                let card = self.loyalty.get_or_insert_with(|| LoyaltyCard { code: None });
                card.code = value.as_str().map(str::to_string);
                Ok(())
            }
            other => Err(DomainError::invalid_path(other)),
        }
    }
}

fn tracker_with(n: usize) -> ChangeTracker<Customer> {
    let mut tracker = ChangeTracker::new();
    for i in 0..n {
        let customer = Customer {
            key: Some(EntityKey::new(i as i64 + 1).unwrap()),
            name: format!("customer-{i}"),
            loyalty: Some(LoyaltyCard { code: None }),
        };
        tracker.load(customer).unwrap();
    }
    tracker
}

fn bench_detect_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_changes");
    for &n in &[100usize, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("clean_sweep", n), &n, |b, &n| {
            let mut tracker = tracker_with(n);
            b.iter(|| {
                tracker.detect_changes();
                black_box(tracker.entries().count())
            });
        });
    }
    group.finish();
}

fn bench_mutate_property(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate_property");
    group.bench_function("owned_code_write", |b| {
        let mut tracker = tracker_with(1);
        let id = tracker.entries().next().unwrap().id();
        let code_path = path("loyalty.code");
        b.iter(|| {
            tracker
                .mutate_property(id, &code_path, json!("bench"))
                .unwrap();
        });
    });
    group.finish();
}

criterion_group!(benches, bench_detect_changes, bench_mutate_property);
criterion_main!(benches);
