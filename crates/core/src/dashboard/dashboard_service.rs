use std::sync::Arc;

use log::{debug, warn};

use super::{
    expense_record, harvest_record, income_record, select_window, Aggregation, Aggregator,
    Category, DashboardView, DatedRecord, Window,
};
use crate::cache::TtlCache;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::expenses::ExpenseRepositoryTrait;
use crate::harvests::HarvestRepositoryTrait;
use crate::incomes::IncomeRepositoryTrait;
use crate::utils::Clock;

/// Per-user day-level aggregations, keyed by user id.
pub type DashboardCache = TtlCache<String, Aggregation>;

pub trait DashboardServiceTrait: Send + Sync {
    /// Chart series and totals for the trailing `window`.
    fn get_dashboard(&self, user_id: &str, window: Window) -> Result<DashboardView>;

    /// Day buckets over the user's whole history.
    fn get_aggregation(&self, user_id: &str) -> Result<Aggregation>;
}

pub struct DashboardService {
    harvest_repository: Arc<dyn HarvestRepositoryTrait>,
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    clock: Arc<dyn Clock>,
    cache: Arc<DashboardCache>,
    aggregator: Aggregator,
}

impl DashboardService {
    pub fn new(
        harvest_repository: Arc<dyn HarvestRepositoryTrait>,
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        clock: Arc<dyn Clock>,
        cache: Arc<DashboardCache>,
        aggregator: Aggregator,
    ) -> Self {
        Self {
            harvest_repository,
            income_repository,
            expense_repository,
            clock,
            cache,
            aggregator,
        }
    }

    /// Loads one category. A failed fetch marks the category unavailable
    /// and yields no records.
    fn fetch<T>(
        category: Category,
        fetched: Result<Vec<T>>,
        to_record: fn(&T) -> DatedRecord,
        unavailable: &mut Vec<Category>,
    ) -> Vec<DatedRecord> {
        match fetched {
            Ok(rows) => rows.iter().map(to_record).collect(),
            Err(e) => {
                warn!("Could not load {} records for the dashboard: {}", category, e);
                unavailable.push(category);
                Vec::new()
            }
        }
    }

    fn compute(&self, user_id: &str) -> Result<Aggregation> {
        let mut unavailable = Vec::new();
        let harvests = Self::fetch(
            Category::Harvest,
            self.harvest_repository.list(user_id),
            harvest_record,
            &mut unavailable,
        );
        let incomes = Self::fetch(
            Category::Income,
            self.income_repository.list(user_id),
            income_record,
            &mut unavailable,
        );
        let expenses = Self::fetch(
            Category::Expense,
            self.expense_repository.list(user_id),
            expense_record,
            &mut unavailable,
        );

        let mut aggregation = self.aggregator.aggregate(&harvests, &incomes, &expenses)?;
        aggregation.diagnostics.unavailable = unavailable;
        Ok(aggregation)
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_dashboard(&self, user_id: &str, window: Window) -> Result<DashboardView> {
        let aggregation = self.get_aggregation(user_id)?;
        let selection = select_window(&aggregation.buckets, window, self.clock.now());
        Ok(DashboardView {
            window: selection.window,
            series: selection.series,
            totals: selection.totals,
            diagnostics: aggregation.diagnostics,
        })
    }

    fn get_aggregation(&self, user_id: &str) -> Result<Aggregation> {
        let key = user_id.to_string();
        if let Some(cached) = self.cache.get(&key) {
            debug!("Dashboard cache hit for user {}", user_id);
            return Ok(cached);
        }

        // Taken before reading, so a write that lands mid-compute wins.
        let generation = self.cache.generation(&key);
        let aggregation = self.compute(user_id)?;
        // A partial result is served once but never cached.
        if aggregation.diagnostics.unavailable.is_empty()
            && !self
                .cache
                .insert_if_generation(key, aggregation.clone(), generation)
        {
            debug!("Dashboard inputs of user {} changed while computing", user_id);
        }
        Ok(aggregation)
    }
}

/// Drops a user's cached aggregation whenever their dashboard inputs change.
pub struct DashboardCacheInvalidator {
    cache: Arc<DashboardCache>,
}

impl DashboardCacheInvalidator {
    pub fn new(cache: Arc<DashboardCache>) -> Self {
        Self { cache }
    }
}

impl DomainEventSink for DashboardCacheInvalidator {
    fn emit(&self, event: DomainEvent) {
        if self.cache.invalidate(&event.user_id().to_string()) {
            debug!("Invalidated dashboard cache for user {}", event.user_id());
        }
    }
}
