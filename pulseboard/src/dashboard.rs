//! Dashboard controller: owns the filter state, the three data domains,
//! and the chat session, and sequences loads against the upstream API.

use serde_json::Value;
use tracing::debug;

use crate::backend::{FetchResult, HealthApiClient, RecordQuery};
use crate::chat::{build_context, ActiveTab, ChatSession, ContextLimits, LlmProvider};
use crate::config::Config;
use crate::error::Result;
use crate::models::{Record, SleepSession, VitalSeries};
use crate::sleep::SleepStats;
use crate::vitals::aggregate_vitals;

/// Load state for one data domain.
#[derive(Debug, Clone)]
pub struct DomainState<T> {
    pub rows: Vec<T>,
    pub total: Option<u64>,
    pub loading: bool,
    pub error: Option<String>,
}

// Not derived: a derived impl would bound T: Default.
impl<T> Default for DomainState<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> DomainState<T> {
    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish_ok(&mut self, rows: Vec<T>, total: Option<u64>) {
        self.rows = rows;
        self.total = total;
        self.loading = false;
        self.error = None;
    }

    fn finish_err(&mut self, message: String) {
        self.rows = Vec::new();
        self.total = None;
        self.loading = false;
        self.error = Some(message);
    }
}

/// User-editable filter inputs, kept as raw strings the way the form
/// holds them; converted to a [`RecordQuery`] at request time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub file_path: String,
    pub types_csv: String,
    pub start: String,
    pub end: String,
}

impl FilterState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            file_path: config.backend.default_file_path.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> RecordQuery {
        RecordQuery::new(self.file_path.clone())
            .with_types_csv(&self.types_csv)
            .with_range(
                Some(self.start.clone()).filter(|s| !s.is_empty()),
                Some(self.end.clone()).filter(|s| !s.is_empty()),
            )
    }
}

pub struct Dashboard {
    config: Config,
    client: HealthApiClient,
    pub filters: FilterState,
    pub tab: ActiveTab,
    pub records: DomainState<Record>,
    pub sleep: DomainState<SleepSession>,
    pub vitals: DomainState<VitalSeries>,
    pub chat: ChatSession,
}

impl Dashboard {
    pub fn new(config: Config, llm: LlmProvider) -> Result<Self> {
        let client = HealthApiClient::new(&config.backend)?;
        let filters = FilterState::from_config(&config);
        let chat = ChatSession::new(llm, &config.chat.required_suggestion);
        Ok(Self {
            config,
            client,
            filters,
            tab: ActiveTab::default(),
            records: DomainState::default(),
            sleep: DomainState::default(),
            vitals: DomainState::default(),
            chat,
        })
    }

    pub async fn load_records(&mut self) {
        self.records.start();
        let query = self.filters.to_query();
        if let Err(error) = query.validate() {
            self.records.finish_err(error.display_message());
            return;
        }
        let result = self.client.fetch_records(&query).await;
        self.apply_records(result);
    }

    pub async fn load_sleep(&mut self) {
        self.sleep.start();
        let query = self.filters.to_query();
        if let Err(error) = query.validate() {
            self.sleep.finish_err(error.display_message());
            return;
        }
        let result = self.client.fetch_sessions(&query).await;
        self.apply_sleep(result);
    }

    pub async fn load_vitals(&mut self) {
        self.vitals.start();
        let query = self.filters.to_query();
        if let Err(error) = query.validate() {
            self.vitals.finish_err(error.display_message());
            return;
        }
        let result = self.client.fetch_vitals(&query).await;
        self.apply_vitals(result);
    }

    /// Bulk load: records first, then sleep and vitals concurrently, then
    /// the opening suggestion batch. Each domain fails independently.
    pub async fn load_all(&mut self) {
        self.load_records().await;

        let query = self.filters.to_query();
        match query.validate() {
            Ok(()) => {
                self.sleep.start();
                self.vitals.start();
                let (sessions, vitals) = tokio::join!(
                    self.client.fetch_sessions(&query),
                    self.client.fetch_vitals(&query),
                );
                self.apply_sleep(sessions);
                self.apply_vitals(vitals);
            }
            Err(error) => {
                self.sleep.finish_err(error.display_message());
                self.vitals.finish_err(error.display_message());
            }
        }

        let context = self.context_block();
        self.chat.load_suggestions(&context, true).await;
    }

    /// Fetch a fresh suggestion batch for the current tab's data.
    pub async fn refresh_suggestions(&mut self) {
        let context = self.context_block();
        self.chat.load_suggestions(&context, false).await;
    }

    /// Send one chat message grounded in the current data, then refresh
    /// the suggestion strip for the next exchange.
    pub async fn send_chat(&mut self, text: &str) -> Result<String> {
        let context = self.context_block();
        let reply = self.chat.send(text, Some(&context)).await?;
        self.refresh_suggestions().await;
        Ok(reply)
    }

    /// Summary of the active tab's loaded data, bounded by the configured
    /// context limits.
    pub fn context_block(&self) -> String {
        build_context(
            self.tab,
            &self.records.rows,
            &self.sleep.rows,
            &self.vitals.rows,
            ContextLimits::from(&self.config.chat),
        )
    }

    pub fn sleep_stats(&self) -> Option<SleepStats> {
        SleepStats::from_sessions(&self.sleep.rows)
    }

    /// Back to the configured defaults: filters reset, loaded data and
    /// errors cleared. The chat transcript survives a reset.
    pub fn reset(&mut self) {
        self.filters = FilterState::from_config(&self.config);
        self.records = DomainState::default();
        self.sleep = DomainState::default();
        self.vitals = DomainState::default();
    }

    fn apply_records(&mut self, result: Result<FetchResult>) {
        match result {
            Ok(fetched) => {
                let total = fetched.total;
                self.records.finish_ok(to_records(fetched.rows), total);
            }
            Err(error) => self.records.finish_err(error.display_message()),
        }
    }

    fn apply_sleep(&mut self, result: Result<FetchResult>) {
        match result {
            Ok(fetched) => {
                let total = fetched.total;
                let sessions = fetched
                    .rows
                    .into_iter()
                    .filter_map(|row| match serde_json::from_value::<SleepSession>(row) {
                        Ok(session) => Some(session),
                        Err(error) => {
                            debug!(%error, "dropping malformed sleep session row");
                            None
                        }
                    })
                    .collect();
                self.sleep.finish_ok(sessions, total);
            }
            Err(error) => self.sleep.finish_err(error.display_message()),
        }
    }

    fn apply_vitals(&mut self, result: Result<FetchResult>) {
        match result {
            Ok(fetched) => {
                let total = fetched.total;
                let series = aggregate_vitals(&to_records(fetched.rows));
                self.vitals.finish_ok(series, total);
            }
            Err(error) => self.vitals.finish_err(error.display_message()),
        }
    }
}

fn to_records(rows: Vec<Value>) -> Vec<Record> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<Record>(row) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(%error, "dropping non-object record row");
                None
            }
        })
        .collect()
}
