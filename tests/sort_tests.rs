//! Tests for client-side sorting: header clicks, menu sorts, pre-sorted
//! columns and restoring load order.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use datagrid::interaction::{GridEvent, HitTarget, MenuAction};
use datagrid::model::compare_values;
use datagrid::{CellValue, DataType, GridOptions, Refresh, SortDirection};
use std::cmp::Ordering;
use test_case::test_case;

fn sortable_people() -> GridOptions {
    GridOptions {
        sortable: true,
        ..inline_options(people_columns(), people_rows())
    }
}

fn click_header(grid: &mut datagrid::Datagrid, column: usize) -> datagrid::Outcome {
    grid.handle(GridEvent::Click {
        target: HitTarget::HeaderLabel(column),
    })
}

// ============================================================================
// Header clicks
// ============================================================================

#[test]
fn first_click_sorts_ascending() {
    let mut g = grid(sortable_people(), 400.0, 200.0);
    let out = click_header(&mut g, 2);
    assert_eq!(out.refresh, Refresh::Body);
    assert_eq!(row_order(&g), vec![1, 3, 0, 4, 2]);
    assert_eq!(g.sort().column, Some(2));
    assert_eq!(g.sort().direction, SortDirection::Ascending);
    assert_eq!(g.sort().field, "name");
}

#[test]
fn second_click_flips_direction() {
    let mut g = grid(sortable_people(), 400.0, 200.0);
    click_header(&mut g, 2);
    click_header(&mut g, 2);
    assert_eq!(g.sort().direction, SortDirection::Descending);
    assert_eq!(row_order(&g), vec![2, 4, 0, 3, 1]);
}

#[test]
fn switching_column_keeps_direction() {
    let mut g = grid(sortable_people(), 400.0, 200.0);
    click_header(&mut g, 2);
    click_header(&mut g, 2);
    click_header(&mut g, 0);
    assert_eq!(g.sort().column, Some(0));
    assert_eq!(g.sort().direction, SortDirection::Descending);
    assert_eq!(row_order(&g), vec![2, 4, 0, 3, 1]);
}

#[test]
fn dates_sort_chronologically() {
    let mut g = grid(sortable_people(), 400.0, 200.0);
    click_header(&mut g, 1);
    assert_eq!(row_order(&g), vec![3, 1, 4, 0, 2]);
}

#[test]
fn clicks_are_ignored_when_sorting_is_off() {
    let mut g = grid(inline_options(people_columns(), people_rows()), 400.0, 200.0);
    let out = click_header(&mut g, 2);
    assert_eq!(out.refresh, Refresh::None);
    assert_eq!(row_order(&g), vec![0, 1, 2, 3, 4]);
    assert!(!g.sort().is_active());
}

#[test]
fn unsortable_column_is_ignored() {
    let mut columns = people_columns();
    columns[2].sortable = false;
    let options = GridOptions {
        sortable: true,
        ..inline_options(columns, people_rows())
    };
    let mut g = grid(options, 400.0, 200.0);
    assert_eq!(click_header(&mut g, 2).refresh, Refresh::None);
    assert!(!g.sort().is_active());
}

// ============================================================================
// Menu sorting and restore
// ============================================================================

#[test]
fn menu_sort_then_clear_restores_load_order() {
    let options = GridOptions {
        column_menus: true,
        ..sortable_people()
    };
    let mut g = grid(options, 400.0, 200.0);
    g.handle(GridEvent::Click {
        target: HitTarget::MenuArrow(2),
    });
    g.handle(GridEvent::Menu(MenuAction::SortDescending));
    assert_eq!(row_order(&g), vec![2, 4, 0, 3, 1]);

    let out = g.handle(GridEvent::Menu(MenuAction::ClearSort));
    assert_eq!(out.refresh, Refresh::Body);
    assert_eq!(row_order(&g), vec![0, 1, 2, 3, 4]);
    assert!(!g.sort().is_active());
}

#[test]
fn clearing_an_unsorted_grid_changes_nothing() {
    let options = GridOptions {
        column_menus: true,
        ..sortable_people()
    };
    let mut g = grid(options, 400.0, 200.0);
    g.handle(GridEvent::Click {
        target: HitTarget::MenuArrow(0),
    });
    let out = g.handle(GridEvent::Menu(MenuAction::ClearSort));
    assert_eq!(out.refresh, Refresh::None);
}

#[test]
fn presorted_column_is_applied_on_load() {
    let mut columns = people_columns();
    columns[0].sorted = Some(SortDirection::Descending);
    let options = GridOptions {
        sortable: true,
        ..inline_options(columns, people_rows())
    };
    let g = grid(options, 400.0, 200.0);
    assert_eq!(g.sort().column, Some(0));
    assert_eq!(row_order(&g), vec![2, 4, 0, 3, 1]);
    // Load order is still available for a later clear.
    let pristine: Vec<usize> = g.data().pristine().iter().map(|r| r.index).collect();
    assert_eq!(pristine, vec![0, 1, 2, 3, 4]);
}

#[test]
fn only_first_presorted_column_counts() {
    let mut columns = people_columns();
    columns[1].sorted = Some(SortDirection::Ascending);
    columns[2].sorted = Some(SortDirection::Descending);
    let options = GridOptions {
        sortable: true,
        ..inline_options(columns, people_rows())
    };
    let g = grid(options, 400.0, 200.0);
    assert_eq!(g.sort().column, Some(1));
    assert!(g.columns().column(2).unwrap().sorted.is_none());
}

// ============================================================================
// Comparator
// ============================================================================

#[test_case("$1,200", "300", Ordering::Greater ; "currency and separators")]
#[test_case("abc", "1", Ordering::Less ; "unparseable first")]
#[test_case("2.5", "2.50", Ordering::Equal ; "same value")]
fn number_comparison(a: &str, b: &str, expected: Ordering) {
    assert_eq!(
        compare_values(&CellValue::from(a), &CellValue::from(b), DataType::Number),
        expected
    );
}

#[test]
fn string_comparison_ignores_case() {
    assert_eq!(
        compare_values(
            &CellValue::from("Apple"),
            &CellValue::from("banana"),
            DataType::String
        ),
        Ordering::Less
    );
}

#[test]
fn non_dates_sort_as_epoch() {
    assert_eq!(
        compare_values(
            &CellValue::from("not a date"),
            &CellValue::from("1971/01/01"),
            DataType::Date
        ),
        Ordering::Less
    );
}
