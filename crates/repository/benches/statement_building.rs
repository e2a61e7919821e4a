//! Statement building benchmarks
//!
//! Measures filter folding and SQL rendering for typical list endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use elif_repository::{
    BuildSql, DefaultBuildSql, DatesTypeFilter, EqFilter, Filter, InFilter, LimitOffset, Model,
    DatabaseValue, OrderBy, SearchFilter,
};
use std::collections::HashMap;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Order {
    id: i64,
    customer: String,
    state: String,
    placed_at: DateTime<Utc>,
}

impl Model for Order {
    type PrimaryKey = i64;

    fn table_name() -> &'static str {
        "orders"
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "customer", "state", "placed_at"]
    }

    fn primary_key(&self) -> Option<Self::PrimaryKey> {
        Some(self.id)
    }

    fn to_fields(&self) -> HashMap<String, DatabaseValue> {
        HashMap::from([
            ("id".to_string(), DatabaseValue::from(self.id)),
            ("customer".to_string(), DatabaseValue::from(self.customer.clone())),
            ("state".to_string(), DatabaseValue::from(self.state.clone())),
            ("placed_at".to_string(), DatabaseValue::from(self.placed_at)),
        ])
    }
}

fn list_filters() -> Vec<Filter> {
    vec![
        EqFilter::new("state", "shipped").into(),
        InFilter::values("id", 1..=50i64).into(),
        SearchFilter::new("customer", Some("acme")).into(),
        DatesTypeFilter::between(
            "placed_at",
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 3, 31),
        )
        .into(),
        OrderBy::desc("placed_at").into(),
        LimitOffset::page(3, 30).into(),
    ]
}

fn bench_statement_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_building");
    let builder = DefaultBuildSql::for_model::<Order>();
    let filters = list_filters();

    group.bench_function("base_statement", |b| b.iter(|| black_box(builder.build(&[]))));

    group.bench_function("fold_filters", |b| {
        b.iter(|| black_box(builder.build(black_box(&filters))))
    });

    group.bench_function("absent_filters", |b| {
        let absent: Vec<Filter> = vec![
            EqFilter::new("state", "").into(),
            InFilter::new("id", None::<Vec<i64>>).into(),
            SearchFilter::new("customer", None::<String>).into(),
            OrderBy::new(None::<String>, Default::default()).into(),
        ];
        b.iter(|| black_box(builder.build(black_box(&absent))))
    });

    group.finish();
}

fn bench_sql_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_rendering");
    let statement = match DefaultBuildSql::for_model::<Order>().build(&list_filters()) {
        Ok(statement) => statement,
        Err(err) => panic!("benchmark filters must resolve: {}", err),
    };

    group.bench_function("parameterised", |b| {
        b.iter(|| black_box(statement.to_sql_with_params()))
    });

    group.bench_function("inline", |b| b.iter(|| black_box(statement.to_sql())));

    group.bench_function("count_variant", |b| {
        let key = Order::descriptor().primary_key();
        b.iter(|| black_box(statement.clone().into_count(&key).to_sql_with_params()))
    });

    group.finish();
}

criterion_group!(benches, bench_statement_building, bench_sql_rendering);
criterion_main!(benches);
