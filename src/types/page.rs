use serde::{Deserialize, Serialize};

use super::{ColumnDescriptor, Row, SortDirection};

/// A request for one page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageRequest {
    pub page_size: usize,
    pub row_offset: usize,
    /// Empty when unsorted.
    pub sort_field: String,
    /// `1` ascending, anything else descending.
    pub sort_direction: i32,
    pub include_column_model: bool,
}

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            row_offset: 0,
            sort_field: String::new(),
            sort_direction: 1,
            include_column_model: false,
        }
    }
}

impl PageRequest {
    pub fn new(page_size: usize, row_offset: usize) -> Self {
        Self {
            page_size,
            row_offset,
            ..Self::default()
        }
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = field.into();
        self.sort_direction = direction.to_wire();
        self
    }

    pub fn with_column_model(mut self, include: bool) -> Self {
        self.include_column_model = include;
        self
    }

    pub fn direction(&self) -> SortDirection {
        SortDirection::from_wire(self.sort_direction)
    }

    /// Short form-field encoding understood by the page endpoint
    /// (`r`, `rs`, `sc`, `sd`, `cm`).
    pub fn to_form_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("r", self.page_size.to_string()),
            ("rs", self.row_offset.to_string()),
            ("sd", self.sort_direction.to_string()),
        ];
        if !self.sort_field.is_empty() {
            pairs.push(("sc", self.sort_field.clone()));
        }
        if self.include_column_model {
            pairs.push(("cm", "1".to_string()));
        }
        pairs
    }

    /// `application/x-www-form-urlencoded` body for [`Self::to_form_pairs`].
    pub fn to_form_body(&self) -> String {
        self.to_form_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Paging flags for a returned page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultSetInfo {
    /// The page begins at offset 0: nothing exists above it.
    pub start: bool,
    /// The page reaches the last row: nothing exists below it.
    pub end: bool,
}

/// One page of rows as returned by the page endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    #[serde(default)]
    pub result_set: Vec<Row>,
    #[serde(default)]
    pub result_set_info: ResultSetInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_model: Option<Vec<ColumnDescriptor>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_keys() {
        let req = PageRequest::new(50, 100).with_sort("Date", SortDirection::Descending);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["pageSize"], 50);
        assert_eq!(v["rowOffset"], 100);
        assert_eq!(v["sortField"], "Date");
        assert_eq!(v["sortDirection"], 2);
        assert_eq!(v["includeColumnModel"], false);
    }

    #[test]
    fn form_body_uses_short_keys() {
        let req = PageRequest::new(20, 0)
            .with_sort("End User", SortDirection::Ascending)
            .with_column_model(true);
        assert_eq!(req.to_form_body(), "r=20&rs=0&sd=1&sc=End%20User&cm=1");
    }

    #[test]
    fn response_without_column_model() {
        let resp: PageResponse = serde_json::from_str(
            r#"{"resultSet": [{"index": 0, "cells": [{"data": 1, "edit": ""}]}],
                "resultSetInfo": {"start": true, "end": false}}"#,
        )
        .unwrap();
        assert_eq!(resp.result_set.len(), 1);
        assert!(resp.result_set_info.start);
        assert!(!resp.result_set_info.end);
        assert!(resp.column_model.is_none());
    }
}
