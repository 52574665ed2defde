//! Tests for the page-fetch contract as served by `MemoryTable`.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use datagrid::{CellValue, DataType, MemoryTable, PageRequest, PageResponse, SortDirection};

const TABLE_JSON: &str = r#"{
    "columnModel": [
        {"label": "ID", "dataType": "number", "dataField": "id", "width": 50, "sortable": true},
        {"label": "Joined", "dataType": "date", "dataField": "joined", "width": 90, "sortable": true},
        {"label": "Name", "width": 120}
    ],
    "rows": [
        {"index": 0, "cells": [{"data": 3}, {"data": "2019/05/01"}, {"data": "carol"}]},
        {"index": 1, "cells": [{"data": 1}, {"data": "2018-01-15"}, {"data": "alice"}]},
        {"index": 2, "cells": [{"data": 2}, {"data": "2017/07/04"}, {"data": "bob"}]}
    ]
}"#;

fn indices(page: &PageResponse) -> Vec<usize> {
    page.result_set.iter().map(|r| r.index).collect()
}

#[test]
fn table_parses_from_camel_case_json() {
    let table = MemoryTable::from_json(TABLE_JSON).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.column_model[1].data_type, DataType::Date);
    assert_eq!(table.column_model[0].data_field.as_deref(), Some("id"));
    // Omitted keys take descriptor defaults.
    assert_eq!(table.column_model[2].data_type, DataType::String);
    assert!(!table.column_model[2].sortable);
}

#[test]
fn malformed_table_is_a_json_error() {
    assert!(matches!(
        MemoryTable::from_json("{\"rows\": 3}"),
        Err(datagrid::DatagridError::Json(_))
    ));
}

#[test]
fn pages_walk_the_whole_table() {
    let source = table(45);
    let mut offset = 0;
    let mut seen = Vec::new();
    loop {
        let page = source.page(&PageRequest::new(20, offset)).unwrap();
        assert_eq!(page.result_set_info.start, offset == 0);
        seen.extend(indices(&page));
        offset += page.result_set.len();
        if page.result_set_info.end {
            break;
        }
    }
    assert_eq!(seen, (0..45).collect::<Vec<_>>());
}

#[test]
fn offset_past_the_end_is_an_empty_last_page() {
    let page = table(10).page(&PageRequest::new(20, 50)).unwrap();
    assert!(page.result_set.is_empty());
    assert!(page.result_set_info.end);
    assert!(!page.result_set_info.start);
}

#[test]
fn dates_sort_across_formats() {
    let table = MemoryTable::from_json(TABLE_JSON).unwrap();
    let request = PageRequest::new(10, 0).with_sort("joined", SortDirection::Ascending);
    assert_eq!(indices(&table.page(&request).unwrap()), vec![2, 1, 0]);
}

#[test]
fn sort_field_falls_back_to_the_label() {
    let table = MemoryTable::from_json(TABLE_JSON).unwrap();
    let request = PageRequest::new(10, 0).with_sort("Name", SortDirection::Descending);
    let page = table.page(&request).unwrap();
    assert_eq!(indices(&page), vec![0, 2, 1]);
    assert_eq!(page.result_set[0].cells[2].data, CellValue::from("carol"));
}

#[test]
fn request_parses_with_defaults() {
    let request: PageRequest =
        serde_json::from_str(r#"{"rowOffset": 40, "sortField": "id", "sortDirection": 2}"#)
            .unwrap();
    assert_eq!(request.page_size, 50);
    assert_eq!(request.row_offset, 40);
    assert_eq!(request.direction(), SortDirection::Descending);
    assert!(!request.include_column_model);
}

#[test]
fn form_body_escapes_values() {
    let request = PageRequest::new(50, 100).with_sort("a&b=c", SortDirection::Descending);
    assert_eq!(request.to_form_body(), "r=50&rs=100&sd=2&sc=a%26b%3Dc");
    assert_eq!(PageRequest::new(5, 0).to_form_body(), "r=5&rs=0&sd=1");
}

#[test]
fn response_serializes_for_the_grid() {
    let page = table(3)
        .page(&PageRequest::new(2, 0).with_column_model(true))
        .unwrap();
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["resultSetInfo"]["start"], true);
    assert_eq!(json["resultSetInfo"]["end"], false);
    assert_eq!(json["resultSet"].as_array().unwrap().len(), 2);
    assert_eq!(json["columnModel"].as_array().unwrap().len(), 3);

    let back: PageResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, page);
}
