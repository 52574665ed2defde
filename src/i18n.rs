//! Translation lookup for user-visible strings.
//!
//! The embedding page supplies its own table; [`DevTranslations`] is the
//! built-in English fallback.

/// Maps a translation key to display text.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Prefix for the two construction errors.
const DEV_ERROR_PREFIX: &str = "datagrid Developer Error: ";

/// Built-in English strings. Unknown keys translate to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevTranslations;

impl DevTranslations {
    fn lookup(key: &str) -> Option<&'static str> {
        Some(match key {
            "loading.title" => "Please wait,",
            "loading.datagrid" => "Loading Datagrid...",
            "column.sort" => "Sort",
            "column.resize" => "Resize",
            "column.move" => "Reorder",
            "column.menu" => "More",
            "column.menu.items.sort-asc" => "Sort Ascending",
            "column.menu.items.sort-desc" => "Sort Descending",
            "column.menu.items.sort-clear" => "Clear Sort",
            "column.menu.items.freeze" => "Freeze Column",
            "column.menu.items.unfreeze" => "Unfreeze Column",
            "lazyloader.north.message.title" | "lazyloader.south.message.title" => {
                "Loading more results.."
            }
            "lazyloader.north.message.body" | "lazyloader.south.message.body" => "cancel",
            "lazyloader.north.none.title" | "lazyloader.south.none.title" => "No more results.",
            "lazyloader.north.none.body" | "lazyloader.south.none.body" => "refresh",
            _ => return None,
        })
    }
}

impl Translate for DevTranslations {
    fn translate(&self, key: &str) -> String {
        match key {
            "error.invalid-ds-json" => format!(
                "{DEV_ERROR_PREFIX}initialize() -> Invalid Column Model supplied for Datagrid with Data Source Type = JSON."
            ),
            "error.invalid-ds" => {
                format!("{DEV_ERROR_PREFIX}initialize() -> Invalid Data Source supplied for Datagrid.")
            }
            _ => Self::lookup(key).map_or_else(|| key.to_string(), str::to_string),
        }
    }
}
