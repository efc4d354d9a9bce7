// SocialGaze - core/dashboard.rs
//
// The concrete dashboard: summary cards, chart series, and the per-account
// follower listing, all built from the generic aggregator.
// Core layer: pure logic, no I/O.

use crate::core::aggregate::{self, to_signed, Category, Criterion};
use crate::core::matcher::{Conditions, Matcher};
use crate::core::model::{AggregateResult, Dataset, Series, Value};
use crate::util::constants;
use serde::Serialize;

pub const CARD_ACTIVE: &str = "Active Accounts";
pub const CARD_INACTIVE: &str = "Inactive Accounts";
pub const CARD_PROFILE_PICTURE: &str = "Accounts with Profile Picture";

pub const CHART_REGIONS: &str = "Region wise accounts";
pub const CHART_ACTIVITY: &str = "Active vs inactive accounts";
pub const CHART_ACCOUNT_TYPES: &str = "Real vs fake accounts";
pub const CHART_INFLUENCERS: &str = "Number of influencers in each region";

/// One region slice: the code stored in the data and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSlice {
    pub code: String,
    pub label: String,
}

/// Dashboard parameters that vary between deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Regions in chart order.
    pub regions: Vec<RegionSlice>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            regions: constants::DEFAULT_REGIONS
                .iter()
                .map(|(code, label)| RegionSlice {
                    code: (*code).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
        }
    }
}

/// How the renderer should draw a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub series: Series,
}

/// One account's follower count, in input order. Either side may be absent.
/// A non-numeric count is carried as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowerPoint {
    pub name: Option<String>,
    pub followers: Option<Value>,
}

/// Everything the presentation layer needs for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub total_accounts: i64,
    pub active_accounts: i64,
    /// `total - active`. Counts every account outside the active levels,
    /// including ones with an unknown or missing activity level.
    pub inactive_accounts: i64,
    pub profile_picture_count: i64,
    pub charts: Vec<Chart>,
    pub followers: Vec<FollowerPoint>,
}

impl DashboardReport {
    /// Flatten into named aggregate results (cards first, then charts).
    pub fn results(&self) -> Vec<AggregateResult> {
        let mut results = vec![
            AggregateResult::scalar(CARD_ACTIVE, self.active_accounts),
            AggregateResult::scalar(CARD_INACTIVE, self.inactive_accounts),
            AggregateResult::scalar(CARD_PROFILE_PICTURE, self.profile_picture_count),
        ];
        results.extend(
            self.charts
                .iter()
                .map(|c| AggregateResult::series(c.title.clone(), c.series.clone())),
        );
        results
    }

    pub fn chart(&self, title: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.title == title)
    }
}

/// Compute the full dashboard for a dataset.
///
/// Callers must check `dataset.is_empty()` first if they need to tell "no
/// data" apart from "zero matches"; an empty dataset yields all-zero values.
pub fn build_report(dataset: &Dataset, config: &DashboardConfig) -> DashboardReport {
    let total = dataset.len();
    let active_matcher = Matcher::any_of(constants::ACTIVE_LEVELS.iter().copied());

    let active =
        aggregate::count_by_field(dataset, constants::FIELD_ACTIVITY_LEVEL, &active_matcher);
    let inactive = aggregate::complement(total, active);
    let profile_pictures = aggregate::count_by_field(
        dataset,
        constants::FIELD_PROFILE_PIC,
        &Matcher::exact(constants::PROFILE_PIC_PRESENT),
    );

    let region_categories: Vec<Category> = config
        .regions
        .iter()
        .map(|r| {
            Category::new(
                r.label.clone(),
                Criterion::field(constants::FIELD_REGION, Matcher::exact(r.code.as_str())),
            )
        })
        .collect();

    let influencer_categories: Vec<Category> = config
        .regions
        .iter()
        .map(|r| {
            let conditions = Conditions::new()
                .with(constants::FIELD_REGION, Matcher::exact(r.code.as_str()))
                .with(
                    constants::FIELD_REAL_ACCOUNT_TYPE,
                    Matcher::exact(constants::INFLUENCER_TYPE),
                );
            Category::new(r.label.clone(), Criterion::All(conditions))
        })
        .collect();

    let account_type_categories: Vec<Category> = constants::ACCOUNT_TYPES
        .iter()
        .map(|t| {
            Category::new(
                *t,
                Criterion::field(constants::FIELD_ACCOUNT_TYPE, Matcher::exact(*t)),
            )
        })
        .collect();

    let mut activity = Series::default();
    activity.push("Active", to_signed(active));
    activity.push("Inactive", inactive);

    let charts = vec![
        Chart {
            title: CHART_REGIONS.to_string(),
            kind: ChartKind::Pie,
            series: aggregate::build_series(dataset, &region_categories),
        },
        Chart {
            title: CHART_ACTIVITY.to_string(),
            kind: ChartKind::Bar,
            series: activity,
        },
        Chart {
            title: CHART_ACCOUNT_TYPES.to_string(),
            kind: ChartKind::Pie,
            series: aggregate::build_series(dataset, &account_type_categories),
        },
        Chart {
            title: CHART_INFLUENCERS.to_string(),
            kind: ChartKind::Bar,
            series: aggregate::build_series(dataset, &influencer_categories),
        },
    ];

    let followers = dataset
        .iter()
        .map(|r| FollowerPoint {
            name: r.username(),
            followers: r.follower_count().cloned(),
        })
        .collect();

    tracing::debug!(
        total,
        active,
        inactive,
        profile_pictures,
        regions = config.regions.len(),
        "Dashboard report built"
    );

    DashboardReport {
        total_accounts: to_signed(total),
        active_accounts: to_signed(active),
        inactive_accounts: inactive,
        profile_picture_count: to_signed(profile_pictures),
        charts,
        followers,
    }
}
