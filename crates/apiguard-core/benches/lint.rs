//! Lint benchmarks for the operation rule engine.
//!
//! Run with: cargo bench -p apiguard-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Map, Value};

use apiguard_core::{lint, resolve, Rule, RuleConfig, Severity};

/// Build a document with `path_count` paths, each carrying a mix of clean
/// and offending operations.
fn create_document(path_count: usize) -> Value {
    let mut paths = Map::new();
    for i in 0..path_count {
        paths.insert(
            format!("/resources{i}/{{id}}"),
            json!({
                "get": {
                    "operationId": format!("getResource{i}"),
                    "summary": "Fetch a resource",
                    "produces": ["application/json"],
                    "parameters": [
                        { "$ref": "#/parameters/Id" },
                        { "name": "expand", "in": "query", "type": "string" },
                        { "name": "tenant", "in": "header", "required": true, "type": "string" }
                    ],
                    "responses": {
                        "200": { "schema": { "$ref": "#/definitions/ResourceList" } },
                        "404": { "schema": { "$ref": "#/definitions/Error" } }
                    }
                },
                "put": {
                    "summary": "",
                    "parameters": [{ "$ref": "#/parameters/Id" }],
                    "responses": {
                        "204": { "description": "updated" }
                    }
                },
                "head": {
                    "operationId": format!("headResource{i}"),
                    "summary": "Check a resource"
                },
                "x-owner": "platform"
            }),
        );
    }

    json!({
        "swagger": "2.0",
        "info": { "title": "Bench", "version": "1.0.0" },
        "parameters": {
            "Id": { "name": "id", "in": "path", "required": true, "type": "string" }
        },
        "definitions": {
            "ResourceList": { "type": "array", "items": { "$ref": "#/definitions/Resource" } },
            "Resource": { "type": "object" },
            "Error": { "type": "object" }
        },
        "paths": paths
    })
}

fn bench_lint(c: &mut Criterion) {
    let config = RuleConfig::recommended();
    let mut group = c.benchmark_group("lint");

    for path_count in [10usize, 100, 1000] {
        let document = create_document(path_count);
        group.bench_with_input(
            BenchmarkId::new("recommended", path_count),
            &document,
            |b, document| {
                b.iter(|| black_box(lint(document, &config)));
            },
        );
    }

    group.finish();
}

fn bench_single_rule(c: &mut Criterion) {
    let document = create_document(100);
    let mut group = c.benchmark_group("single_rule");

    for rule in [Rule::NoArrayResponses, Rule::ParameterOrder] {
        let config = RuleConfig::new().with(rule, Severity::Error);
        group.bench_with_input(BenchmarkId::new("rule", rule), &config, |b, config| {
            b.iter(|| black_box(lint(&document, config)));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let document = create_document(10);
    let pointer = json!({ "$ref": "#/definitions/ResourceList" });

    c.bench_function("resolve_local_ref", |b| {
        b.iter(|| black_box(resolve(&pointer, &document)));
    });
}

criterion_group!(benches, bench_lint, bench_single_rule, bench_resolve);
criterion_main!(benches);
