// SocialGaze - app/state.rs
//
// Application state: the validated settings plus the load lifecycle
// (Unloaded -> Loaded | Failed). Aggregation is only reachable from Loaded.
// A reload discards the previous dataset entirely.

use crate::app::source::DataSource;
use crate::core::dashboard::{build_report, DashboardConfig, DashboardReport, RegionSlice};
use crate::core::loader::{self, Delimiter, LoadOptions, LoadReport, MalformedRowPolicy};
use crate::core::model::Dataset;
use crate::platform::config::AppConfig;
use crate::util::error::LoadError;

/// A successfully loaded snapshot of the data source.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub origin: String,
    pub dataset: Dataset,
    pub report: LoadReport,
}

/// Load lifecycle of the single dataset.
#[derive(Debug, Default)]
pub enum DataState {
    #[default]
    Unloaded,
    Loaded(LoadedData),
    Failed(LoadError),
}

/// What the presentation layer should show.
#[derive(Debug)]
pub enum View<'a> {
    /// Nothing has been loaded yet.
    Loading,
    /// The last load failed; show the error instead of partial aggregates.
    Failed(&'a LoadError),
    /// Loaded, but the dataset has no records.
    NoData { origin: &'a str },
    /// Loaded with data; the finished report.
    Ready {
        origin: &'a str,
        report: DashboardReport,
    },
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Where the dataset is read from.
    pub source: DataSource,

    /// Loader settings.
    pub load_options: LoadOptions,

    /// Dashboard settings.
    pub dashboard: DashboardConfig,

    /// Current lifecycle state.
    pub data: DataState,
}

impl AppState {
    /// Create unloaded state for a source with explicit settings.
    pub fn new(source: DataSource, load_options: LoadOptions, dashboard: DashboardConfig) -> Self {
        Self {
            source,
            load_options,
            dashboard,
            data: DataState::Unloaded,
        }
    }

    /// Create unloaded state from validated config.
    pub fn from_config(source: DataSource, config: &AppConfig) -> Self {
        let load_options = LoadOptions {
            delimiter: config.delimiter.map_or(Delimiter::Auto, Delimiter::Fixed),
            malformed_rows: if config.drop_malformed_rows {
                MalformedRowPolicy::Drop
            } else {
                MalformedRowPolicy::Pad
            },
        };
        let dashboard = DashboardConfig {
            regions: config
                .regions
                .iter()
                .map(|(code, label)| RegionSlice {
                    code: code.clone(),
                    label: label.clone(),
                })
                .collect(),
        };
        Self::new(source, load_options, dashboard)
    }

    /// Fetch and parse the source, replacing any previous state.
    pub fn load(&mut self) {
        let origin = self.source.origin();
        tracing::info!(origin = %origin, "Loading data source");
        let outcome = self.source.fetch();
        self.data = match outcome {
            Ok(content) => Self::parse(origin, &content, &self.load_options),
            Err(e) => {
                tracing::error!(error = %e, "Data source could not be loaded");
                DataState::Failed(e)
            }
        };
    }

    /// Parse already-acquired text, replacing any previous state.
    pub fn load_text(&mut self, origin: &str, content: &str) {
        self.data = Self::parse(origin.to_string(), content, &self.load_options);
    }

    fn parse(origin: String, content: &str, options: &LoadOptions) -> DataState {
        match loader::parse_dataset(content, options) {
            Ok((dataset, report)) => DataState::Loaded(LoadedData {
                origin,
                dataset,
                report,
            }),
            Err(e) => {
                tracing::error!(origin = %origin, error = %e, "Data source could not be parsed");
                DataState::Failed(e)
            }
        }
    }

    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.data {
            DataState::Loaded(loaded) => Some(&loaded.dataset),
            _ => None,
        }
    }

    /// Compute the view for the current state. Aggregation runs only when a
    /// non-empty dataset is loaded.
    pub fn view(&self) -> View<'_> {
        match &self.data {
            DataState::Unloaded => View::Loading,
            DataState::Failed(e) => View::Failed(e),
            DataState::Loaded(loaded) if loaded.dataset.is_empty() => View::NoData {
                origin: &loaded.origin,
            },
            DataState::Loaded(loaded) => View::Ready {
                origin: &loaded.origin,
                report: build_report(&loaded.dataset, &self.dashboard),
            },
        }
    }
}
