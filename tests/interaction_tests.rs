//! Tests for pointer gestures and the column menu, driven through
//! `Datagrid::handle` the way the browser binding drives them.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::*;
use datagrid::config::HoverOptions;
use datagrid::interaction::{
    Gesture, GridEvent, HighlightTarget, HitTarget, HoverTarget, MenuAction, MenuItem,
};
use datagrid::layout::Axis;
use datagrid::render::Edge;
use datagrid::{Datagrid, Effect, GridOptions, Outcome, Refresh};

fn down(g: &mut Datagrid, x: f32, y: f32, target: HitTarget) -> Outcome {
    g.handle(GridEvent::PointerDown { x, y, target })
}

fn drag_to(g: &mut Datagrid, x: f32, y: f32) -> Outcome {
    g.handle(GridEvent::PointerMove { x, y })
}

fn release(g: &mut Datagrid, x: f32, y: f32) -> Outcome {
    g.handle(GridEvent::PointerUp { x, y })
}

fn menu_grid() -> Datagrid {
    let options = GridOptions {
        column_menus: true,
        sortable: true,
        freezable: true,
        ..inline_options(people_columns(), people_rows())
    };
    grid(options, 400.0, 200.0)
}

fn open_menu(g: &mut Datagrid, column: usize) -> Outcome {
    g.handle(GridEvent::Click {
        target: HitTarget::MenuArrow(column),
    })
}

// ============================================================================
// Column resize
// ============================================================================

fn resize_grid() -> Datagrid {
    let options = GridOptions {
        column_resize: true,
        ..inline_options(uniform_columns(4, 100.0), numbered_rows(5, 4))
    };
    // 4 x 109px of content in a 300px wide container.
    grid(options, 300.0, 200.0)
}

#[test]
fn resize_previews_each_valid_tick() {
    let mut g = resize_grid();
    down(&mut g, 200.0, 10.0, HitTarget::ResizeHandle(1));
    let out = drag_to(&mut g, 150.0, 10.0);
    assert_eq!(
        out.effects,
        vec![Effect::ResizePreview {
            column: 1,
            width: 50.0,
            scroll_width: 386.0,
        }]
    );
    assert_eq!(g.columns().column(1).unwrap().width, 50.0);
}

#[test]
fn resize_below_minimum_width_is_ignored() {
    let mut g = resize_grid();
    down(&mut g, 200.0, 10.0, HitTarget::ResizeHandle(1));
    drag_to(&mut g, 150.0, 10.0);
    let out = drag_to(&mut g, 140.0, 10.0);
    assert!(out.effects.is_empty());
    assert_eq!(g.columns().column(1).unwrap().width, 50.0);
}

#[test]
fn resize_release_relayouts_without_reset() {
    let mut g = resize_grid();
    g.scroll_to_start();
    down(&mut g, 200.0, 10.0, HitTarget::ResizeHandle(1));
    drag_to(&mut g, 260.0, 10.0);
    let out = release(&mut g, 260.0, 10.0);
    assert_eq!(out.refresh, Refresh::Full { reset: false });
    assert_eq!(g.metrics().panes.scroll, 109.0 * 3.0 + 169.0);
    assert_eq!(*g.interaction().gesture(), Gesture::Idle);
}

#[test]
fn narrow_content_refuses_every_resize_tick() {
    // 307px of content in a 400px viewport is already inside the pane margin.
    let options = GridOptions {
        column_resize: true,
        ..inline_options(people_columns(), people_rows())
    };
    let mut g = grid(options, 400.0, 200.0);
    down(&mut g, 300.0, 10.0, HitTarget::ResizeHandle(2));
    assert!(drag_to(&mut g, 290.0, 10.0).effects.is_empty());
    assert!(drag_to(&mut g, 320.0, 10.0).effects.is_empty());
    assert_eq!(g.columns().column(2).unwrap().width, 120.0);
}

#[test]
fn growing_stops_short_of_the_pane_margin() {
    // 307 + 98 = 405 still falls inside the 10px margin of a 400px pane.
    let options = GridOptions {
        column_resize: true,
        ..inline_options(people_columns(), people_rows())
    };
    let mut g = grid(options, 400.0, 200.0);
    down(&mut g, 300.0, 10.0, HitTarget::ResizeHandle(2));
    assert!(drag_to(&mut g, 398.0, 10.0).effects.is_empty());
    let out = drag_to(&mut g, 405.0, 10.0);
    assert_eq!(
        out.effects,
        vec![Effect::ResizePreview {
            column: 2,
            width: 225.0,
            scroll_width: 412.0,
        }]
    );
}

#[test]
fn resize_needs_the_option() {
    let mut g = grid(inline_options(people_columns(), people_rows()), 400.0, 200.0);
    down(&mut g, 300.0, 10.0, HitTarget::ResizeHandle(2));
    assert_eq!(*g.interaction().gesture(), Gesture::Idle);
}

// ============================================================================
// Column move
// ============================================================================

fn move_grid() -> Datagrid {
    let options = GridOptions {
        column_move: true,
        ..inline_options(people_columns(), people_rows())
    };
    grid(options, 400.0, 200.0)
}

#[test]
fn drag_column_past_the_last_one() {
    let mut g = move_grid();
    let start = down(&mut g, 30.0, 10.0, HitTarget::MoveHandle(0));
    assert_eq!(start.effects, vec![Effect::MoveMarker { left: -2.0 }]);

    let tick = drag_to(&mut g, 300.0, 10.0);
    assert_eq!(tick.effects, vec![Effect::MoveMarker { left: 305.0 }]);

    let out = release(&mut g, 300.0, 10.0);
    assert!(out.effects.contains(&Effect::RemoveMarker));
    assert_eq!(out.refresh, Refresh::Full { reset: false });
    assert_eq!(g.columns().order(), &[1, 2, 0]);
    // Cells stay in storage order.
    assert_eq!(g.data().rows()[0].cells.len(), 3);
    assert_eq!(g.metrics().loose_spans[2].index, 0);
}

#[test]
fn dropping_in_place_changes_nothing() {
    let mut g = move_grid();
    down(&mut g, 100.0, 10.0, HitTarget::MoveHandle(1));
    drag_to(&mut g, 170.0, 10.0);
    let out = release(&mut g, 170.0, 10.0);
    assert_eq!(out.effects, vec![Effect::RemoveMarker]);
    assert_eq!(out.refresh, Refresh::None);
    assert_eq!(g.columns().order(), &[0, 1, 2]);
}

#[test]
fn frozen_columns_do_not_move() {
    let mut columns = people_columns();
    columns[0].frozen = true;
    let options = GridOptions {
        column_move: true,
        freezable: true,
        ..inline_options(columns, people_rows())
    };
    let mut g = grid(options, 400.0, 200.0);
    let out = down(&mut g, 10.0, 10.0, HitTarget::MoveHandle(0));
    assert!(out.effects.is_empty());
    assert_eq!(*g.interaction().gesture(), Gesture::Idle);
}

// ============================================================================
// Column menu
// ============================================================================

#[test]
fn menu_lists_sort_and_freeze_items() {
    let mut g = menu_grid();
    let out = open_menu(&mut g, 1);
    let Some(Effect::ShowMenu(view)) = out.effects.last() else {
        panic!("menu not shown: {out:?}");
    };
    assert_eq!(view.column, 1);
    assert_eq!(view.items.len(), 5);
    assert_eq!(view.items[3], MenuItem::Separator);
    assert!(matches!(
        view.items[4],
        MenuItem::Action {
            action: MenuAction::Freeze,
            ..
        }
    ));
    assert!(g.interaction().menu().is_open());
}

#[test]
fn clicking_the_open_arrow_closes_the_menu() {
    let mut g = menu_grid();
    open_menu(&mut g, 1);
    let out = open_menu(&mut g, 1);
    assert!(out.effects.contains(&Effect::HideMenu));
    assert!(!g.interaction().menu().is_open());
}

#[test]
fn freeze_from_menu_moves_column_to_frozen_pane() {
    let mut g = menu_grid();
    open_menu(&mut g, 1);
    let out = g.handle(GridEvent::Menu(MenuAction::Freeze));
    assert_eq!(out.refresh, Refresh::Full { reset: true });
    assert!(out.effects.contains(&Effect::HideMenu));
    assert!(g.columns().column(1).unwrap().frozen);
    assert_eq!(g.metrics().frozen_spans.len(), 1);
    assert_eq!(g.metrics().frozen_spans[0].index, 1);
    assert_eq!(g.metrics().panes.freeze, 109.0);
    assert_eq!(g.metrics().panes.loose, 291.0);

    // Reopened, the menu offers the way back.
    let out = open_menu(&mut g, 1);
    let Some(Effect::ShowMenu(view)) = out.effects.last() else {
        panic!("menu not shown");
    };
    assert!(matches!(
        view.items.last(),
        Some(MenuItem::Action {
            action: MenuAction::Unfreeze,
            ..
        })
    ));
    g.handle(GridEvent::Menu(MenuAction::Unfreeze));
    assert!(g.metrics().frozen_spans.is_empty());
}

#[test]
fn pointer_down_elsewhere_closes_the_menu() {
    let mut g = menu_grid();
    open_menu(&mut g, 0);
    let out = down(&mut g, 500.0, 500.0, HitTarget::Outside);
    assert_eq!(out.effects, vec![Effect::HideMenu]);
}

#[test]
fn menu_hides_after_idle_timer() {
    let mut g = menu_grid();
    open_menu(&mut g, 2);
    assert!(g.handle(GridEvent::Enter(HoverTarget::Menu)).effects.is_empty());
    let out = g.handle(GridEvent::Leave(HoverTarget::Menu));
    let token = match out.effects.as_slice() {
        [Effect::ScheduleTimer { token, delay_ms }] => {
            assert_eq!(*delay_ms, 1000);
            *token
        }
        other => panic!("expected a timer, got {other:?}"),
    };
    let out = g.handle(GridEvent::Timer(token));
    assert_eq!(out.effects, vec![Effect::HideMenu]);
    assert!(!g.interaction().menu().is_open());
}

#[test]
fn reentering_the_menu_cancels_the_timer() {
    let mut g = menu_grid();
    open_menu(&mut g, 2);
    g.handle(GridEvent::Enter(HoverTarget::Menu));
    let out = g.handle(GridEvent::Leave(HoverTarget::Menu));
    let Some(Effect::ScheduleTimer { token, .. }) = out.effects.first().cloned() else {
        panic!("expected a timer");
    };
    let out = g.handle(GridEvent::Enter(HoverTarget::Menu));
    assert_eq!(out.effects, vec![Effect::CancelTimer(token)]);
    // A late firing of the cancelled timer is ignored.
    assert!(g.handle(GridEvent::Timer(token)).effects.is_empty());
    assert!(g.interaction().menu().is_open());
}

#[test]
fn menus_need_sort_or_freeze() {
    let options = GridOptions {
        column_menus: true,
        ..inline_options(people_columns(), people_rows())
    };
    let mut g = grid(options, 400.0, 200.0);
    assert!(open_menu(&mut g, 0).effects.is_empty());
}

// ============================================================================
// Scrolling
// ============================================================================

fn tall_grid(options: GridOptions) -> Datagrid {
    grid(
        GridOptions {
            column_model: Some(uniform_columns(3, 80.0)),
            data_source: Some(datagrid::config::DataSourceSpec::Rows(numbered_rows(100, 3))),
            ..options
        },
        400.0,
        200.0,
    )
}

#[test]
fn wheel_scrolls_down_one_step() {
    let mut g = tall_grid(GridOptions::default());
    let before = g.scrollbars().vertical.position;
    let out = g.handle(GridEvent::Wheel { delta: -1.0 });
    assert!(!out.propagate);
    assert_eq!(out.refresh, Refresh::Scroll);
    assert_eq!(g.scrollbars().vertical.position, before + 10.0);
    assert!(g.viewport().scroll_top > 0.0);
    assert!(out
        .effects
        .iter()
        .any(|e| matches!(e, Effect::Scrolled { axis: Axis::Vertical, .. })));
}

#[test]
fn wheel_without_overflow_goes_to_the_page() {
    let mut g = grid(inline_options(people_columns(), people_rows()), 400.0, 200.0);
    assert!(!g.scrollbars().vertical.display);
    assert!(g.handle(GridEvent::Wheel { delta: -1.0 }).propagate);
}

#[test]
fn thumb_drag_to_the_end_shows_the_last_rows() {
    let mut g = tall_grid(GridOptions::default());
    let thumb = g.scrollbars().vertical;
    down(&mut g, 395.0, thumb.position + 2.0, HitTarget::Thumb(Axis::Vertical));
    drag_to(&mut g, 395.0, 10_000.0);
    assert_eq!(g.scrollbars().vertical.position, thumb.stop);
    assert_eq!(g.viewport().scroll_top, g.metrics().max_scroll_top());
    let out = release(&mut g, 395.0, 10_000.0);
    assert_eq!(out, Outcome::none());
}

#[test]
fn sentinel_cancel_scrolls_past_the_sentinel() {
    let mut g = tall_grid(GridOptions {
        lazy_load_south: true,
        ..GridOptions::default()
    });
    g.handle(GridEvent::Click {
        target: HitTarget::SentinelCancel(Edge::South),
    });
    // Last data row at the bottom of the 174px body.
    assert_eq!(g.viewport().scroll_top, 2200.0 - 174.0);
    let out = g.handle(GridEvent::Click {
        target: HitTarget::SentinelCancel(Edge::North),
    });
    assert_eq!(out, Outcome::none());
}

// ============================================================================
// Hover feedback
// ============================================================================

#[test]
fn hovering_a_cell_highlights_its_row() {
    let options = GridOptions {
        hover: HoverOptions {
            rows: true,
            ..HoverOptions::default()
        },
        ..inline_options(people_columns(), people_rows())
    };
    let mut g = grid(options, 400.0, 200.0);
    let cell = HoverTarget::BodyCell { row: 3, column: 1 };
    let on = g.handle(GridEvent::Enter(cell));
    assert_eq!(
        on.effects,
        vec![Effect::Highlight {
            target: HighlightTarget::Row(3),
            class: "hover-row".to_string(),
            on: true,
        }]
    );
    let off = g.handle(GridEvent::Leave(cell));
    assert!(has_effect(&off, |e| matches!(e, Effect::Highlight { on: false, .. })));
}

#[test]
fn entering_the_container_shows_the_thumbs_faintly() {
    let mut g = grid(inline_options(people_columns(), people_rows()), 400.0, 200.0);
    let out = g.handle(GridEvent::Enter(HoverTarget::Container));
    assert_eq!(
        out.effects,
        vec![
            Effect::ThumbOpacity {
                axis: Axis::Vertical,
                opacity: 0.3
            },
            Effect::ThumbOpacity {
                axis: Axis::Horizontal,
                opacity: 0.3
            },
        ]
    );
}

#[test]
fn events_before_the_first_page_are_ignored() {
    let mut g = grid(ajax_options(20), 400.0, 200.0);
    let out = g.handle(GridEvent::Click {
        target: HitTarget::HeaderLabel(0),
    });
    assert_eq!(out, Outcome::none());
}
