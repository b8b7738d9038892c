use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use hivebook_core::{
    dashboard::{
        Aggregator, DashboardCache, DashboardCacheInvalidator, DashboardService,
        DashboardServiceTrait,
    },
    events::DomainEventSink,
    expenses::{ExpenseService, ExpenseServiceTrait},
    harvests::{HarvestService, HarvestServiceTrait},
    hives::{HiveService, HiveServiceTrait},
    incomes::{IncomeService, IncomeServiceTrait},
    inspections::{InspectionService, InspectionServiceTrait},
    inventory::{InventoryService, InventoryServiceTrait},
    invoices::{InvoiceService, InvoiceServiceTrait},
    swarm_traps::{SwarmTrapService, SwarmTrapServiceTrait},
    users::{UserService, UserServiceTrait},
    utils::{Clock, SystemClock},
};
use hivebook_storage_sqlite::{
    expenses::ExpenseRepository, harvests::HarvestRepository, hives::HiveRepository,
    incomes::IncomeRepository, inspections::InspectionRepository, inventory::InventoryRepository,
    invoices::InvoiceRepository, swarm_traps::SwarmTrapRepository, users::UserRepository, DbPool,
};

use crate::{
    auth::AuthManager,
    config::{Config, LogFormat},
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub hive_service: Arc<dyn HiveServiceTrait>,
    pub inspection_service: Arc<dyn InspectionServiceTrait>,
    pub harvest_service: Arc<dyn HarvestServiceTrait>,
    pub swarm_trap_service: Arc<dyn SwarmTrapServiceTrait>,
    pub inventory_service: Arc<dyn InventoryServiceTrait>,
    pub income_service: Arc<dyn IncomeServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub invoice_service: Arc<dyn InvoiceServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub dashboard_cache: Arc<DashboardCache>,
    pub pool: Arc<DbPool>,
    pub auth: Option<Arc<AuthManager>>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = hivebook_storage_sqlite::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache_ttl = chrono::Duration::from_std(config.dashboard_cache_ttl)?;
    let dashboard_cache = Arc::new(DashboardCache::new(cache_ttl, clock.clone()));
    let event_sink: Arc<dyn DomainEventSink> =
        Arc::new(DashboardCacheInvalidator::new(dashboard_cache.clone()));

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let hive_repository = Arc::new(HiveRepository::new(pool.clone(), writer.clone()));
    let inspection_repository = Arc::new(InspectionRepository::new(pool.clone(), writer.clone()));
    let harvest_repository = Arc::new(HarvestRepository::new(pool.clone(), writer.clone()));
    let swarm_trap_repository = Arc::new(SwarmTrapRepository::new(pool.clone(), writer.clone()));
    let inventory_repository = Arc::new(InventoryRepository::new(pool.clone(), writer.clone()));
    let income_repository = Arc::new(IncomeRepository::new(pool.clone(), writer.clone()));
    let expense_repository = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let invoice_repository = Arc::new(InvoiceRepository::new(pool.clone(), writer));

    let user_service = Arc::new(UserService::new(user_repository));
    let hive_service = Arc::new(HiveService::new(hive_repository.clone()));
    let inspection_service = Arc::new(InspectionService::new(
        inspection_repository,
        hive_repository.clone(),
    ));
    let harvest_service = Arc::new(HarvestService::new(
        harvest_repository.clone(),
        hive_repository,
        event_sink.clone(),
    ));
    let swarm_trap_service = Arc::new(SwarmTrapService::new(swarm_trap_repository));
    let inventory_service = Arc::new(InventoryService::new(inventory_repository));
    let income_service = Arc::new(IncomeService::new(
        income_repository.clone(),
        event_sink.clone(),
    ));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repository.clone(),
        event_sink.clone(),
    ));
    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repository,
        income_repository.clone(),
        event_sink,
        config.invoice_income_policy,
    ));
    tracing::info!(
        "Invoice income policy: {}, aggregation mode: {:?}",
        config.invoice_income_policy,
        config.aggregation_mode
    );

    let dashboard_service = Arc::new(DashboardService::new(
        harvest_repository,
        income_repository,
        expense_repository,
        clock,
        dashboard_cache.clone(),
        Aggregator::new(config.aggregation_mode),
    ));

    let auth = config.auth.as_ref().map(AuthManager::new).map(Arc::new);
    if auth.is_none() {
        tracing::warn!("HB_AUTH_SECRET is not set, serving a single local user without tokens");
    }

    Ok(Arc::new(AppState {
        user_service,
        hive_service,
        inspection_service,
        harvest_service,
        swarm_trap_service,
        inventory_service,
        income_service,
        expense_service,
        invoice_service,
        dashboard_service,
        dashboard_cache,
        pool,
        auth,
    }))
}
