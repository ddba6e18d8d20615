//! The orchestrator.
//!
//! Owns the caller-facing API surface. Built around a dependency-injected
//! [`AdapterRegistry`]; no global registration state.

use crate::aggregate::{aggregate, select_strategy};
use crate::planner::ExecutionPlanner;
use crate::stream::{
    ResponseChunk, ORCHESTRATION_ERROR, STREAM_ERROR, STREAM_INTENT_CONFIDENCE,
    STREAM_PHASE_CONFIDENCE,
};
use async_stream::stream;
use futures_util::future::join_all;
use futures_util::Stream;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use switchboard_actions::{ActionOrchestrator, AuditSink, TracingAuditSink};
use switchboard_adapters::{AdapterRegistry, DomainAdapter};
use switchboard_context::{Clock, ContextSnapshot, SystemClock};
use switchboard_core::{
    Action, ActionResult, AdapterError, Domain, DomainQuery, EntityId, HealthCheck, Intent,
    OrchestratorConfig, Phase, PhaseFailurePolicy, ProcessingStats, SwitchboardError,
    SwitchboardResult, UnifiedResponse, UnifiedResult,
};
use switchboard_intent::QueryProcessor;

/// Routes operator requests through planning, adapter dispatch, and
/// aggregation, and delegates governed actions.
pub struct Orchestrator {
    registry: Arc<AdapterRegistry>,
    processor: QueryProcessor,
    planner: ExecutionPlanner,
    actions: ActionOrchestrator,
    config: OrchestratorConfig,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    /// Construct with the default audit sink (structured logs) and the
    /// system clock.
    pub fn new(registry: Arc<AdapterRegistry>, config: OrchestratorConfig) -> Self {
        Self::with_parts(
            registry,
            Arc::new(TracingAuditSink),
            config,
            Arc::new(SystemClock),
        )
    }

    /// Construct with explicit audit sink and clock, for tests and hosts
    /// with their own audit pipeline.
    pub fn with_parts(
        registry: Arc<AdapterRegistry>,
        audit: Arc<dyn AuditSink>,
        config: OrchestratorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let actions = ActionOrchestrator::new(
            Arc::clone(&registry),
            audit,
            config.clone(),
            Arc::clone(&clock),
        );
        Self {
            registry,
            processor: QueryProcessor::new(),
            planner: ExecutionPlanner::new(),
            actions,
            config,
            clock,
        }
    }

    /// Register an adapter under its declared domain.
    pub fn register_adapter(&self, adapter: Arc<dyn DomainAdapter>) {
        self.registry.register(adapter);
    }

    /// Remove the adapter for a domain.
    pub fn unregister_adapter(&self, domain: Domain) -> Option<Arc<dyn DomainAdapter>> {
        self.registry.unregister(domain)
    }

    /// The action orchestrator, for history inspection.
    pub fn actions(&self) -> &ActionOrchestrator {
        &self.actions
    }

    /// Process one natural-language request end to end.
    pub async fn process_query(
        &self,
        natural_query: &str,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<UnifiedResponse> {
        let started = Instant::now();
        let intent = self.processor.process(natural_query, context)?;
        tracing::debug!(
            intent_id = %intent.intent_id,
            kind = ?intent.kind,
            operation = %intent.operation,
            domain = ?intent.domain,
            "intent classified"
        );

        let plan = self.planner.build(&intent);
        plan.validate_dependencies()?;

        let mut results = Vec::new();
        for phase in &plan.phases {
            let phase_results = self.run_phase(phase, context).await?;
            tracing::debug!(
                phase_id = %phase.phase_id,
                results = phase_results.len(),
                "phase completed"
            );
            results.extend(phase_results);
        }

        Ok(self.finish_response(&intent, context, results, started))
    }

    /// Process one request as an ordered, finite stream of partial
    /// responses. Any failure yields a single error chunk and ends the
    /// stream; abandoning the stream abandons the remaining work.
    pub fn stream_query(
        &self,
        natural_query: String,
        context: Arc<ContextSnapshot>,
    ) -> impl Stream<Item = ResponseChunk> + '_ {
        stream! {
            yield ResponseChunk::Processing {
                stats: ProcessingStats::default(),
            };

            let started = Instant::now();
            let intent = match self.processor.process(&natural_query, &context) {
                Ok(intent) => intent,
                Err(err) => {
                    yield stream_error(err.into());
                    return;
                }
            };
            yield ResponseChunk::Intent {
                kind: intent.kind,
                confidence: STREAM_INTENT_CONFIDENCE,
            };

            let plan = self.planner.build(&intent);
            if let Err(err) = plan.validate_dependencies() {
                yield stream_error(err.into());
                return;
            }

            let mut results = Vec::new();
            for phase in &plan.phases {
                match self.run_phase(phase, &context).await {
                    Ok(phase_results) => {
                        yield ResponseChunk::Phase {
                            phase_id: phase.phase_id.clone(),
                            results: phase_results.clone(),
                            confidence: STREAM_PHASE_CONFIDENCE,
                        };
                        results.extend(phase_results);
                    }
                    Err(err) => {
                        yield stream_error(err);
                        return;
                    }
                }
            }

            let response = self.finish_response(&intent, &context, results, started);
            yield ResponseChunk::Complete { response };
        }
    }

    /// Execute a governed action. Delegates to the action orchestrator.
    pub async fn execute_action(
        &self,
        action: &Action,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<ActionResult> {
        self.actions.execute_action(action, context).await
    }

    /// Roll back a previously executed action.
    pub async fn rollback_action(&self, action_id: EntityId) -> SwitchboardResult<ActionResult> {
        self.actions.rollback_action(action_id).await
    }

    /// Probe every registered adapter concurrently. A failing probe
    /// becomes an unhealthy status carrying the error message.
    pub async fn adapter_health(&self) -> HashMap<Domain, HealthCheck> {
        let probes = self.registry.all().into_iter().map(|adapter| async move {
            let domain = adapter.domain();
            let started = Instant::now();
            match adapter.health_check().await {
                Ok(check) => (domain, check.with_response_time(elapsed_ms(started))),
                Err(err) => (domain, HealthCheck::unhealthy(domain, err.to_string())),
            }
        });
        join_all(probes).await.into_iter().collect()
    }

    /// The user-visible envelope for a failed query: null primary result,
    /// zero confidence, follow-up suggestions.
    pub fn failure_response(&self, query_id: EntityId, error: &SwitchboardError) -> UnifiedResponse {
        let result = UnifiedResult::failure(
            Domain::Search,
            "error",
            format!("{ORCHESTRATION_ERROR}: {error}"),
            vec![
                "Try rephrasing the request".to_string(),
                "Name a customer, ticket, or work order".to_string(),
            ],
            self.clock.now(),
        );
        let mut response = UnifiedResponse::new(query_id, result, Vec::new(), 0, self.clock.now());
        response.conversation_id = None;
        response
    }

    /// Run one phase. Adapters for every query are resolved before any
    /// dispatch, so a missing adapter aborts the phase without partial
    /// work.
    async fn run_phase(
        &self,
        phase: &Phase,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<Vec<UnifiedResult>> {
        let mut resolved = Vec::with_capacity(phase.queries.len());
        for query in &phase.queries {
            resolved.push((query, self.registry.get(query.domain)?));
        }

        if phase.parallel {
            let dispatches = resolved
                .iter()
                .map(|(query, adapter)| self.dispatch(Arc::clone(adapter), query, context));
            let outcomes = join_all(dispatches).await;
            match self.config.failure_policy {
                PhaseFailurePolicy::FailFast => outcomes.into_iter().collect(),
                PhaseFailurePolicy::CollectPartial => Ok(outcomes
                    .into_iter()
                    .zip(phase.queries.iter())
                    .map(|(outcome, query)| {
                        outcome.unwrap_or_else(|err| self.failure_envelope(query, &err))
                    })
                    .collect()),
            }
        } else {
            let mut results = Vec::with_capacity(resolved.len());
            for (query, adapter) in resolved {
                match self.dispatch(adapter, query, context).await {
                    Ok(result) => results.push(result),
                    Err(err) => match self.config.failure_policy {
                        PhaseFailurePolicy::FailFast => return Err(err),
                        PhaseFailurePolicy::CollectPartial => {
                            results.push(self.failure_envelope(query, &err));
                        }
                    },
                }
            }
            Ok(results)
        }
    }

    /// Dispatch one domain query: structural validation, then the adapter
    /// call under the configured timeout, if any.
    async fn dispatch(
        &self,
        adapter: Arc<dyn DomainAdapter>,
        query: &DomainQuery,
        context: &ContextSnapshot,
    ) -> SwitchboardResult<UnifiedResult> {
        let validation = adapter.validate(query);
        if !validation.is_valid() {
            return Err(AdapterError::MalformedRequest {
                domain: query.domain,
                message: validation.errors.join("; "),
            }
            .into());
        }

        match self.config.query_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, adapter.query(query, context))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(AdapterError::Timeout {
                    domain: query.domain,
                    timeout_ms: timeout.as_millis() as i64,
                }
                .into()),
            },
            None => adapter.query(query, context).await,
        }
    }

    fn failure_envelope(&self, query: &DomainQuery, error: &SwitchboardError) -> UnifiedResult {
        UnifiedResult::failure(
            query.domain,
            query.operation.clone(),
            error.to_string(),
            vec!["Try rephrasing the request".to_string()],
            self.clock.now(),
        )
    }

    /// Fold collected results into the final response.
    fn finish_response(
        &self,
        intent: &Intent,
        context: &ContextSnapshot,
        mut results: Vec<UnifiedResult>,
        started: Instant,
    ) -> UnifiedResponse {
        if results.is_empty() {
            return self.unroutable_response(intent, context, started);
        }

        self.apply_freshness(&mut results);

        let mut domains = Vec::new();
        for result in &results {
            if !domains.contains(&result.domain) {
                domains.push(result.domain);
            }
        }

        let strategy = select_strategy(intent);
        let aggregated = aggregate(results, strategy, None).expect("results are non-empty");

        let mut response = UnifiedResponse::new(
            intent.intent_id,
            aggregated,
            domains,
            elapsed_ms(started),
            self.clock.now(),
        );
        response.conversation_id = Some(context.session.session_id.clone());
        response
    }

    /// Response for an intent no domain work could be planned for.
    fn unroutable_response(
        &self,
        intent: &Intent,
        context: &ContextSnapshot,
        started: Instant,
    ) -> UnifiedResponse {
        let result = UnifiedResult::failure(
            intent.domain.unwrap_or(Domain::Search),
            intent.operation.clone(),
            "No domain could be resolved for this request",
            vec![
                "Name a customer, ticket, or work order".to_string(),
                "Ask for help to see what this assistant can do".to_string(),
            ],
            self.clock.now(),
        );
        let mut response = UnifiedResponse::new(
            intent.intent_id,
            result,
            Vec::new(),
            elapsed_ms(started),
            self.clock.now(),
        );
        response.conversation_id = Some(context.session.session_id.clone());
        response
    }

    /// Linear freshness decay from 1.0 at generation to 0.0 at the
    /// configured horizon.
    fn apply_freshness(&self, results: &mut [UnifiedResult]) {
        let horizon = self.config.freshness_horizon.as_secs_f32();
        let now = self.clock.now();
        for result in results {
            let age = (now - result.payload.metadata.generated_at)
                .num_milliseconds()
                .max(0) as f32
                / 1000.0;
            result.freshness = (1.0 - age / horizon).clamp(0.0, 1.0);
        }
    }
}

fn stream_error(error: SwitchboardError) -> ResponseChunk {
    ResponseChunk::Error {
        code: STREAM_ERROR.to_string(),
        message: error.to_string(),
        recoverable: error.recoverable(),
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}
