//! Run Deliberation use case
//!
//! Orchestrates one council deliberation:
//!
//! ```text
//! request ─▶ sanitize ─▶ intent ─▶ [delegate?] ─▶ debate (4 turns) ─▶ synthesis ─▶ outcome
//! ```
//!
//! The debate is strictly sequential: each persona sees the transcript of
//! every persona before it. Backend failures never abort a run; each failed
//! step is replaced by a fallback and the run moves on.

use crate::config::BehaviorConfig;
use crate::ports::clock::Clock;
use crate::ports::delegate::DelegateGateway;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use council_domain::validation::fields::validate_text;
use council_domain::{
    AgentPersona, ClerkSynthesis, CouncilMessage, CouncilPromptTemplate, DeliberationContext,
    DeliberationOutcome, DeliberationPhase, DeliberationRequest, DeliberationResult, DomainError,
    EXTERNAL_DELEGATE, Opinion, OutcomeSource, PersonaRegistry, PersonaReply, Proposal,
    ProposalKind, Strategy, detect_intent, has_veto, map_hook_parameters,
    normalize_delegate_proposal, sanitize_prompt,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Confidence recorded on the synthetic message wrapping a delegate proposal
pub const DELEGATE_CONFIDENCE: u8 = 80;

/// Errors that can occur during a deliberation
///
/// Only caller contract violations are reported. Backend and delegate
/// failures are absorbed.
#[derive(Error, Debug)]
pub enum RunDeliberationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),
}

/// Use case for running a council deliberation
pub struct RunDeliberationUseCase<G: LlmGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    delegate: Option<Arc<dyn DelegateGateway>>,
    clock: Arc<dyn Clock>,
    config: BehaviorConfig,
}

impl<G: LlmGateway + ?Sized + 'static> RunDeliberationUseCase<G> {
    pub fn new(gateway: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            delegate: None,
            clock,
            config: BehaviorConfig::default(),
        }
    }

    pub fn with_delegate(mut self, delegate: Arc<dyn DelegateGateway>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        request: DeliberationRequest,
    ) -> Result<DeliberationOutcome, RunDeliberationError> {
        self.execute_with_progress(request, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        request: DeliberationRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, RunDeliberationError> {
        request.context.validate()?;

        let prompt = sanitize_prompt(&request.prompt);
        if prompt.is_empty() {
            return Err(DomainError::EmptyPrompt.into());
        }

        let intent = detect_intent(&prompt);
        if let Some(m) = intent {
            if m.is_redirected() {
                info!("Liquidity request redirected to swap");
            }
            debug!("Detected intent: {} ({:?})", m.strategy, m.family);
        }
        let forced = intent.map(|m| m.strategy);
        let kind = request.kind.unwrap_or_else(|| {
            forced
                .map(|s| s.proposal_kind())
                .unwrap_or(ProposalKind::Trade)
        });

        if let Some(endpoint) = request.delegate_endpoint.as_deref()
            && let Some(outcome) = self
                .try_delegate(endpoint, &prompt, &request.context, kind, progress)
                .await
        {
            return Ok(outcome);
        }

        info!("Starting council deliberation ({} proposal)", kind);

        let transcript = self
            .phase_debate(&prompt, &request.context, forced, progress)
            .await;

        let vetoed = has_veto(&transcript);
        if vetoed {
            info!("Risk Sentinel issued a veto");
        }

        let mut synthesis = self
            .phase_synthesis(
                &prompt,
                &request.context,
                &transcript,
                forced,
                kind,
                vetoed,
                progress,
            )
            .await;

        if let Some(strategy) = forced
            && !vetoed
            && synthesis.action != Some(strategy)
        {
            info!(
                "Overriding clerk action {:?} with detected intent {}",
                synthesis.action.map(|a| a.to_string()),
                strategy
            );
            synthesis.action = Some(strategy);
        }
        // A veto voids the detected intent, so the clerk's action picks the variant
        let kind = match request.kind {
            None if vetoed => synthesis.implied_kind(),
            _ => kind,
        };
        if synthesis.implied_kind() != kind {
            debug!(
                "Clerk action implies {} but {} was expected",
                synthesis.implied_kind(),
                kind
            );
        }

        let clerk = PersonaRegistry::clerk();
        let clerk_message = CouncilMessage::new(
            clerk,
            Opinion::Support,
            synthesis.reasoning.clone(),
            synthesis.confidence,
            self.clock.now_millis(),
        );

        let mut messages = transcript;
        messages.push(clerk_message);
        let deliberation = DeliberationResult::from_messages(messages);
        let proposal =
            synthesis.into_proposal(kind, deliberation.clone(), &request.context.user_address);

        info!(
            "Deliberation complete: {} {}",
            deliberation.consensus,
            deliberation.vote_tally.summary()
        );

        Ok(Self::finish(deliberation, proposal, OutcomeSource::Local))
    }

    fn finish(
        deliberation: DeliberationResult,
        proposal: Proposal,
        source: OutcomeSource,
    ) -> DeliberationOutcome {
        let hook_parameters = map_hook_parameters(
            deliberation.consensus,
            &deliberation.vote_tally,
            proposal.risk_level(),
        );
        DeliberationOutcome {
            deliberation,
            proposal,
            hook_parameters,
            source,
        }
    }

    /// Try the external delegate; `None` means "fall through to the council"
    async fn try_delegate(
        &self,
        endpoint: &str,
        prompt: &str,
        context: &DeliberationContext,
        kind: ProposalKind,
        progress: &dyn ProgressNotifier,
    ) -> Option<DeliberationOutcome> {
        let Some(delegate) = self.delegate.as_ref() else {
            warn!("Delegate endpoint given but no delegate gateway is configured");
            return None;
        };

        info!("Phase 0: External Delegation");
        let phase = DeliberationPhase::Delegating;
        progress.on_phase_start(&phase, 1);

        let response = match delegate.delegate(endpoint, prompt, context).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Delegate unavailable, using local council: {}", e);
                progress.on_persona_complete(&phase, &EXTERNAL_DELEGATE, false);
                progress.on_phase_complete(&phase);
                return None;
            }
        };

        let raw = match (response.success, response.proposal) {
            (true, Some(raw)) => raw,
            (success, _) => {
                warn!(
                    "Delegate returned no proposal (success: {}, error: {}), using local council",
                    success,
                    response.error.as_deref().unwrap_or("none")
                );
                progress.on_persona_complete(&phase, &EXTERNAL_DELEGATE, false);
                progress.on_phase_complete(&phase);
                return None;
            }
        };

        let reasoning = validate_text(raw.get("reasoning"), 1_000)
            .unwrap_or_else(|| "Proposal supplied by an external agent.".to_string());
        let message = CouncilMessage::new(
            &EXTERNAL_DELEGATE,
            Opinion::Support,
            reasoning,
            DELEGATE_CONFIDENCE,
            self.clock.now_millis(),
        );
        let deliberation = DeliberationResult::from_messages(vec![message]);

        let proposal = normalize_delegate_proposal(
            &raw,
            kind,
            deliberation.clone(),
            &context.user_address,
        )
        .unwrap_or_else(|| {
            warn!(
                "Delegate proposal does not match expected {} variant, substituting a safe default",
                kind
            );
            Proposal::safe_default(kind, deliberation.clone(), &context.user_address)
        });

        progress.on_persona_complete(&phase, &EXTERNAL_DELEGATE, true);
        progress.on_phase_complete(&phase);
        info!("Delegate {} produced the proposal", endpoint);

        Some(Self::finish(
            deliberation,
            proposal,
            OutcomeSource::Delegate {
                endpoint: endpoint.to_string(),
                payment_ref: response.payment_ref,
            },
        ))
    }

    /// Phase 1: each debating persona speaks once, in order
    async fn phase_debate(
        &self,
        prompt: &str,
        context: &DeliberationContext,
        intent: Option<Strategy>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<CouncilMessage> {
        info!("Phase 1: Council Debate");
        let phase = DeliberationPhase::Debating;
        let debaters: Vec<&AgentPersona> = PersonaRegistry::debaters().collect();
        progress.on_phase_start(&phase, debaters.len());

        let mut transcript = Vec::with_capacity(debaters.len() + 1);
        for persona in debaters {
            let (message, success) = self
                .persona_turn(persona, prompt, context, &transcript, intent)
                .await;
            progress.on_persona_complete(&phase, persona, success);
            transcript.push(message);
        }

        progress.on_phase_complete(&phase);
        transcript
    }

    async fn persona_turn(
        &self,
        persona: &AgentPersona,
        prompt: &str,
        context: &DeliberationContext,
        transcript: &[CouncilMessage],
        intent: Option<Strategy>,
    ) -> (CouncilMessage, bool) {
        let turn =
            CouncilPromptTemplate::persona_turn(persona, prompt, context, transcript, intent);

        let reply = match self.complete(persona, &turn).await {
            Ok(response) => PersonaReply::from_response(&response),
            Err(e) => {
                warn!("{} failed: {}", persona.display_name, e);
                return (
                    CouncilMessage::fallback(persona, self.clock.now_millis()),
                    false,
                );
            }
        };

        match reply {
            Some(reply) => {
                debug!(
                    "{}: {} ({}%), suggests {:?}",
                    persona.display_name, reply.opinion, reply.confidence, reply.suggested_strategy
                );
                let message = CouncilMessage::new(
                    persona,
                    reply.opinion,
                    reply.reasoning,
                    reply.confidence,
                    self.clock.now_millis(),
                );
                (message, true)
            }
            None => {
                warn!("{} returned no JSON object", persona.display_name);
                (
                    CouncilMessage::fallback(persona, self.clock.now_millis()),
                    false,
                )
            }
        }
    }

    /// Phase 2: the clerk records the decision
    async fn phase_synthesis(
        &self,
        prompt: &str,
        context: &DeliberationContext,
        transcript: &[CouncilMessage],
        intent: Option<Strategy>,
        kind: ProposalKind,
        vetoed: bool,
        progress: &dyn ProgressNotifier,
    ) -> ClerkSynthesis {
        info!("Phase 2: Clerk Synthesis");
        let phase = DeliberationPhase::Synthesizing;
        let clerk = PersonaRegistry::clerk();
        progress.on_phase_start(&phase, 1);

        let request = CouncilPromptTemplate::synthesis(prompt, context, transcript, intent, kind);
        let synthesis = match self.complete(clerk, &request).await {
            Ok(response) => ClerkSynthesis::from_response(&response),
            Err(e) => {
                warn!("Synthesis failed: {}", e);
                None
            }
        };

        let success = synthesis.is_some();
        let synthesis = synthesis.unwrap_or_else(|| {
            warn!("Using canned synthesis");
            ClerkSynthesis::canned(intent.filter(|_| !vetoed))
        });

        progress.on_persona_complete(&phase, clerk, success);
        progress.on_phase_complete(&phase);
        synthesis
    }

    /// One bounded completion call
    async fn complete(
        &self,
        persona: &AgentPersona,
        content: &str,
    ) -> Result<String, GatewayError> {
        let call = async {
            let session = self.gateway.create_session(persona).await?;
            session.send(content).await
        };
        match tokio::time::timeout(self.config.completion_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::delegate::DelegateError;
    use crate::ports::llm_gateway::LlmSession;
    use async_trait::async_trait;
    use council_domain::{Consensus, ExternalAgentResponse, RiskLevel, RoleTag, TokenPair};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Mocks ====================

    #[derive(Clone)]
    enum Scripted {
        Text(String),
        Error(String),
        Stall,
    }

    fn reply(opinion: &str, reasoning: &str, confidence: u8) -> Scripted {
        Scripted::Text(
            json!({"opinion": opinion, "reasoning": reasoning, "confidence": confidence})
                .to_string(),
        )
    }

    struct ScriptedSession {
        persona_id: String,
        response: Scripted,
    }

    #[async_trait]
    impl LlmSession for ScriptedSession {
        fn persona_id(&self) -> &str {
            &self.persona_id
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            match &self.response {
                Scripted::Text(text) => Ok(text.clone()),
                Scripted::Error(e) => Err(GatewayError::RequestFailed(e.clone())),
                Scripted::Stall => {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Ok(String::new())
                }
            }
        }
    }

    /// Persona id → scripted response; unscripted personas support
    struct ScriptedGateway {
        responses: HashMap<&'static str, Scripted>,
        sessions: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                sessions: Mutex::new(Vec::new()),
            }
        }

        fn script(mut self, persona_id: &'static str, response: Scripted) -> Self {
            self.responses.insert(persona_id, response);
            self
        }

        fn session_count(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn create_session(
            &self,
            persona: &AgentPersona,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            self.sessions.lock().unwrap().push(persona.id.to_string());
            let response = self
                .responses
                .get(persona.id)
                .cloned()
                .unwrap_or_else(|| reply("SUPPORT", "Looks reasonable.", 70));
            Ok(Box::new(ScriptedSession {
                persona_id: persona.id.to_string(),
                response,
            }))
        }

        fn backend_name(&self) -> &str {
            "scripted"
        }
    }

    struct SharedRecordingSession {
        inner: Box<dyn LlmSession>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LlmSession for SharedRecordingSession {
        fn persona_id(&self) -> &str {
            self.inner.persona_id()
        }

        async fn send(&self, content: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(content.to_string());
            self.inner.send(content).await
        }
    }

    /// Records every prompt sent, so transcript threading can be checked
    struct PromptLog {
        inner: ScriptedGateway,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LlmGateway for PromptLog {
        async fn create_session(
            &self,
            persona: &AgentPersona,
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            let inner = self.inner.create_session(persona).await?;
            Ok(Box::new(SharedRecordingSession {
                inner,
                prompts: Arc::clone(&self.prompts),
            }))
        }

        fn backend_name(&self) -> &str {
            "prompt-log"
        }
    }

    enum DelegateScript {
        Respond(ExternalAgentResponse),
        Fail,
    }

    struct MockDelegate {
        script: DelegateScript,
        calls: Mutex<Vec<String>>,
    }

    impl MockDelegate {
        fn new(script: DelegateScript) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl DelegateGateway for MockDelegate {
        async fn delegate(
            &self,
            endpoint: &str,
            _prompt: &str,
            _context: &DeliberationContext,
        ) -> Result<ExternalAgentResponse, DelegateError> {
            self.calls.lock().unwrap().push(endpoint.to_string());
            match &self.script {
                DelegateScript::Respond(response) => Ok(response.clone()),
                DelegateScript::Fail => Err(DelegateError::Timeout(10)),
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_phase_start(&self, phase: &DeliberationPhase, total_steps: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{}:{}", phase.as_str(), total_steps));
        }

        fn on_persona_complete(
            &self,
            _phase: &DeliberationPhase,
            persona: &AgentPersona,
            success: bool,
        ) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}:{}", persona.id, success));
        }

        fn on_phase_complete(&self, phase: &DeliberationPhase) {
            self.events
                .lock()
                .unwrap()
                .push(format!("end:{}", phase.as_str()));
        }
    }

    // ==================== Helpers ====================

    const CLERK_SWAP: &str = r#"{"action":"swap","tokenIn":"USDC","tokenOut":"ETH","amountIn":"100",
        "expectedAmountOut":"0.03","maxSlippageBps":30,"reasoning":"Council favours the swap.",
        "confidence":75,"riskLevel":"low"}"#;

    fn use_case<G: LlmGateway + 'static>(gateway: G) -> RunDeliberationUseCase<G> {
        RunDeliberationUseCase::new(Arc::new(gateway), Arc::new(FixedClock(1_000)))
            .with_config(BehaviorConfig::with_timeout(Duration::from_millis(200)))
    }

    fn request(prompt: &str) -> DeliberationRequest {
        DeliberationRequest::new(prompt, DeliberationContext::new("0xuser"))
    }

    fn trade(proposal: &Proposal) -> &council_domain::TradeProposal {
        match proposal {
            Proposal::Trade(trade) => trade,
            other => panic!("expected trade, got {:?}", other),
        }
    }

    // ==================== Local council ====================

    #[tokio::test]
    async fn test_unanimous_local_run() {
        let gateway =
            ScriptedGateway::new().script("council-clerk", Scripted::Text(CLERK_SWAP.into()));
        let outcome = use_case(gateway)
            .execute(request("swap 100 USDC to ETH"))
            .await
            .unwrap();

        let deliberation = &outcome.deliberation;
        assert_eq!(deliberation.messages.len(), 5);
        assert_eq!(deliberation.rounds, 4);
        assert_eq!(deliberation.consensus, Consensus::Unanimous);
        assert_eq!(deliberation.vote_tally.support, 4);
        assert_eq!(deliberation.messages[4].role, RoleTag::Clerk);
        assert_eq!(deliberation.messages[4].opinion, Opinion::Support);

        let trade = trade(&outcome.proposal);
        assert_eq!(trade.strategy, Strategy::Swap);
        assert_eq!(trade.pair, TokenPair::new("USDC", "ETH"));
        assert_eq!(trade.amount_in, "100");
        assert_eq!(trade.risk_level, RiskLevel::Low);

        assert_eq!(outcome.hook_parameters.fee_bps, 500);
        assert_eq!(outcome.hook_parameters.sentiment_score, 100);
        assert_eq!(outcome.source, OutcomeSource::Local);
    }

    #[tokio::test]
    async fn test_debate_order_and_transcript_threading() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let gateway = PromptLog {
            inner: ScriptedGateway::new()
                .script("alpha-hunter", reply("SUPPORT", "First mover edge.", 90)),
            prompts: Arc::clone(&prompts),
        };
        let outcome = use_case(gateway).execute(request("swap 5 DAI")).await.unwrap();

        let ids: Vec<_> = outcome
            .deliberation
            .messages
            .iter()
            .map(|m| m.agent_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "alpha-hunter",
                "risk-sentinel",
                "macro-oracle",
                "devils-advocate",
                "council-clerk"
            ]
        );

        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 5);
        assert!(prompts[0].contains("You speak first."));
        assert!(prompts[1].contains("[Alpha Hunter] SUPPORT (90% confidence): First mover edge."));
        assert!(prompts[4].contains("Expected proposal type: `trade`"));
    }

    #[tokio::test]
    async fn test_veto_overrides_unanimous_support() {
        let gateway = ScriptedGateway::new()
            .script(
                "risk-sentinel",
                reply("SUPPORT", "Fine, but I VETO anything above 1k.", 60),
            )
            .script(
                "council-clerk",
                Scripted::Text(r#"{"action":"hold","riskLevel":"medium"}"#.into()),
            );
        let outcome = use_case(gateway)
            .execute(request("swap 100 USDC to ETH"))
            .await
            .unwrap();

        assert_eq!(outcome.deliberation.vote_tally.support, 4);
        assert_eq!(outcome.deliberation.consensus, Consensus::Vetoed);
        // Forced intent is not applied under veto
        assert_eq!(trade(&outcome.proposal).strategy, Strategy::Hold);
        assert_eq!(outcome.hook_parameters.fee_bps, 10_000);
        assert_eq!(outcome.hook_parameters.max_swap_size, "100");
    }

    #[tokio::test]
    async fn test_forced_intent_overrides_clerk() {
        let gateway = ScriptedGateway::new()
            .script("council-clerk", Scripted::Text(r#"{"action":"hold"}"#.into()));
        let outcome = use_case(gateway)
            .execute(request("please dca into ETH every week"))
            .await
            .unwrap();
        assert_eq!(trade(&outcome.proposal).strategy, Strategy::Dca);
    }

    #[tokio::test]
    async fn test_token_launch_scenario() {
        let gateway = ScriptedGateway::new()
            .script(
                "alpha-hunter",
                Scripted::Text(
                    json!({"opinion":"SUPPORT","reasoning":"Swap instead.","confidence":70,
                           "suggestedStrategy":"swap"})
                    .to_string(),
                ),
            )
            .script("council-clerk", Scripted::Text(CLERK_SWAP.into()));
        let outcome = use_case(gateway)
            .execute(request("launch a token for dog lovers"))
            .await
            .unwrap();

        match &outcome.proposal {
            Proposal::TokenLaunch(launch) => {
                assert_eq!(launch.reward_recipient, "0xuser");
                assert_eq!(launch.token_symbol, "CNCL");
                assert_eq!(launch.vault_pct, 10);
            }
            other => panic!("expected token launch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_vetoed_launch_becomes_hold_trade() {
        let gateway = ScriptedGateway::new()
            .script(
                "risk-sentinel",
                reply("OPPOSE", "VETO. Never commit the entire balance.", 90),
            )
            .script(
                "council-clerk",
                Scripted::Text(r#"{"action":"hold","riskLevel":"high"}"#.into()),
            );
        let outcome = use_case(gateway)
            .execute(request("launch a token with my entire balance"))
            .await
            .unwrap();

        assert_eq!(outcome.deliberation.consensus, Consensus::Vetoed);
        let trade = trade(&outcome.proposal);
        assert_eq!(trade.strategy, Strategy::Hold);
        assert_eq!(trade.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn test_vetoed_launch_with_failed_clerk_holds() {
        let gateway = ScriptedGateway::new()
            .script("risk-sentinel", reply("OPPOSE", "VETO.", 90))
            .script("council-clerk", Scripted::Error("down".into()));
        let outcome = use_case(gateway)
            .execute(request("launch a token with my entire balance"))
            .await
            .unwrap();

        assert_eq!(trade(&outcome.proposal).strategy, Strategy::Hold);
    }

    #[tokio::test]
    async fn test_requested_kind_survives_veto() {
        let gateway = ScriptedGateway::new()
            .script("risk-sentinel", reply("OPPOSE", "VETO.", 90))
            .script("council-clerk", Scripted::Text(r#"{"action":"hold"}"#.into()));
        let outcome = use_case(gateway)
            .execute(
                request("launch a token with my entire balance")
                    .with_kind(ProposalKind::TokenLaunch),
            )
            .await
            .unwrap();

        assert!(matches!(outcome.proposal, Proposal::TokenLaunch(_)));
    }

    #[tokio::test]
    async fn test_persona_failures_degrade_to_neutral() {
        let gateway = ScriptedGateway::new()
            .script("alpha-hunter", Scripted::Error("503".into()))
            .script("macro-oracle", Scripted::Text("I refuse to answer in JSON.".into()))
            .script(
                "devils-advocate",
                Scripted::Text(r#"{"opinion":"MAYBE","confidence":400}"#.into()),
            );
        let progress = RecordingProgress::default();
        let outcome = use_case(gateway)
            .execute_with_progress(request("swap 1 ETH"), &progress)
            .await
            .unwrap();

        let messages = &outcome.deliberation.messages;
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].opinion, Opinion::Neutral);
        assert_eq!(messages[0].confidence, 50);
        assert!(messages[0].reasoning.contains("abstains"));
        assert_eq!(messages[2].opinion, Opinion::Neutral);
        // Parsed but invalid fields are repaired, not replaced
        assert_eq!(messages[3].opinion, Opinion::Neutral);
        assert_eq!(messages[3].confidence, 50);
        assert!(messages.iter().all(|m| m.confidence <= 100));

        assert_eq!(outcome.deliberation.vote_tally.support, 1);
        assert_eq!(outcome.deliberation.vote_tally.abstain, 3);
        assert_eq!(outcome.deliberation.consensus, Consensus::Contested);

        let events = progress.events();
        assert!(events.contains(&"done:alpha-hunter:false".to_string()));
        assert!(events.contains(&"done:risk-sentinel:true".to_string()));
        assert!(events.contains(&"done:macro-oracle:false".to_string()));
        assert!(events.contains(&"done:devils-advocate:true".to_string()));
    }

    #[tokio::test]
    async fn test_stalled_backend_times_out() {
        let gateway = ScriptedGateway::new().script("risk-sentinel", Scripted::Stall);
        let outcome = use_case(gateway).execute(request("swap 1 ETH")).await.unwrap();
        let risk = &outcome.deliberation.messages[1];
        assert_eq!(risk.role, RoleTag::Risk);
        assert_eq!(risk.opinion, Opinion::Neutral);
        assert_eq!(outcome.deliberation.messages.len(), 5);
    }

    #[tokio::test]
    async fn test_clerk_failure_uses_canned_synthesis() {
        let gateway =
            ScriptedGateway::new().script("council-clerk", Scripted::Error("down".into()));
        let progress = RecordingProgress::default();
        let outcome = use_case(gateway)
            .execute_with_progress(request("what should I do?"), &progress)
            .await
            .unwrap();

        let trade = trade(&outcome.proposal);
        assert_eq!(trade.strategy, Strategy::Hold);
        assert_eq!(trade.amount_in, "0");
        assert_eq!(trade.expected_amount_out, "0");
        assert_eq!(outcome.deliberation.messages[4].opinion, Opinion::Support);
        assert!(progress.events().contains(&"done:council-clerk:false".to_string()));
    }

    #[tokio::test]
    async fn test_clerk_amounts_are_clamped() {
        let gateway = ScriptedGateway::new().script(
            "council-clerk",
            Scripted::Text(
                r#"{"action":"swap","tokenIn":"USDC","tokenOut":"USDC","amountIn":"9999999"}"#
                    .into(),
            ),
        );
        let outcome = use_case(gateway).execute(request("swap it")).await.unwrap();
        let trade = trade(&outcome.proposal);
        assert_eq!(trade.amount_in, "0");
        assert_ne!(trade.pair.token_in, trade.pair.token_out);
    }

    #[tokio::test]
    async fn test_runs_are_deterministic() {
        let first = use_case(ScriptedGateway::new())
            .execute(request("swap 10 USDC"))
            .await
            .unwrap();
        let second = use_case(ScriptedGateway::new())
            .execute(request("swap 10 USDC"))
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    // ==================== Contract violations ====================

    #[tokio::test]
    async fn test_missing_user_address_rejected_before_backend() {
        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), Arc::new(FixedClock(0)));
        let result = use_case
            .execute(DeliberationRequest::new("swap", DeliberationContext::default()))
            .await;
        assert!(matches!(
            result,
            Err(RunDeliberationError::InvalidRequest(
                DomainError::MissingContext("user_address")
            ))
        ));
        assert_eq!(gateway.session_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let result = use_case(ScriptedGateway::new())
            .execute(request("\u{200B}\u{0000}  "))
            .await;
        assert!(matches!(
            result,
            Err(RunDeliberationError::InvalidRequest(DomainError::EmptyPrompt))
        ));
    }

    // ==================== Delegation ====================

    fn delegate_response(proposal: serde_json::Value) -> ExternalAgentResponse {
        ExternalAgentResponse {
            success: true,
            proposal: Some(proposal),
            error: None,
            payment_ref: Some("pay_42".to_string()),
        }
    }

    #[tokio::test]
    async fn test_delegate_success_skips_council() {
        let gateway = Arc::new(ScriptedGateway::new());
        let delegate = MockDelegate::new(DelegateScript::Respond(delegate_response(json!({
            "type": "trade",
            "strategy": "swap",
            "pair": {"tokenIn": "USDC", "tokenOut": "WETH"},
            "amountIn": "50",
            "reasoning": "Best route found.",
            "riskLevel": "low"
        }))));
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), Arc::new(FixedClock(5)))
            .with_delegate(delegate.clone());

        let outcome = use_case
            .execute(request("swap 50 USDC").with_delegate("https://api.fetch.ai/agent"))
            .await
            .unwrap();

        assert_eq!(gateway.session_count(), 0);
        assert_eq!(delegate.calls.lock().unwrap().len(), 1);
        assert_eq!(outcome.deliberation.messages.len(), 1);
        assert_eq!(outcome.deliberation.rounds, 1);
        let message = &outcome.deliberation.messages[0];
        assert_eq!(message.role, RoleTag::ExternalDelegate);
        assert_eq!(message.opinion, Opinion::Support);
        assert_eq!(message.confidence, DELEGATE_CONFIDENCE);
        assert_eq!(message.reasoning, "Best route found.");
        assert_eq!(outcome.deliberation.consensus, Consensus::Unanimous);

        let trade = trade(&outcome.proposal);
        assert_eq!(trade.pair, TokenPair::new("USDC", "WETH"));
        assert_eq!(trade.amount_in, "50");
        assert_eq!(
            outcome.source,
            OutcomeSource::Delegate {
                endpoint: "https://api.fetch.ai/agent".to_string(),
                payment_ref: Some("pay_42".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_delegate_variant_mismatch_yields_safe_trade() {
        let delegate = MockDelegate::new(DelegateScript::Respond(delegate_response(json!({
            "type": "token_launch",
            "tokenName": "Rug",
            "tokenSymbol": "RUG"
        }))));
        let use_case = RunDeliberationUseCase::new(
            Arc::new(ScriptedGateway::new()),
            Arc::new(FixedClock(5)),
        )
        .with_delegate(delegate);

        let outcome = use_case
            .execute(
                request("swap 50 USDC")
                    .with_kind(ProposalKind::Trade)
                    .with_delegate("https://api.fetch.ai/agent"),
            )
            .await
            .unwrap();

        assert!(outcome.source.is_delegate());
        let trade = trade(&outcome.proposal);
        assert_eq!(trade.strategy, Strategy::Hold);
        assert_eq!(trade.amount_in, "0");
        assert_eq!(trade.pair, TokenPair::default());
    }

    #[tokio::test]
    async fn test_delegate_failure_falls_back_to_council() {
        let gateway = Arc::new(ScriptedGateway::new());
        let use_case = RunDeliberationUseCase::new(Arc::clone(&gateway), Arc::new(FixedClock(5)))
            .with_delegate(MockDelegate::new(DelegateScript::Fail));
        let progress = RecordingProgress::default();

        let outcome = use_case
            .execute_with_progress(
                request("swap 50 USDC").with_delegate("https://api.fetch.ai/agent"),
                &progress,
            )
            .await
            .unwrap();

        assert_eq!(outcome.source, OutcomeSource::Local);
        assert_eq!(outcome.deliberation.messages.len(), 5);
        assert_eq!(gateway.session_count(), 5);
        let events = progress.events();
        assert_eq!(events[0], "start:delegating:1");
        assert!(events.contains(&"done:external-delegate:false".to_string()));
        assert!(events.contains(&"start:debating:4".to_string()));
    }

    #[tokio::test]
    async fn test_delegate_unsuccessful_response_falls_back() {
        let delegate = MockDelegate::new(DelegateScript::Respond(ExternalAgentResponse {
            success: false,
            proposal: Some(json!({"type": "trade"})),
            error: Some("out of credits".to_string()),
            payment_ref: None,
        }));
        let use_case = RunDeliberationUseCase::new(
            Arc::new(ScriptedGateway::new()),
            Arc::new(FixedClock(5)),
        )
        .with_delegate(delegate);

        let outcome = use_case
            .execute(request("swap").with_delegate("https://api.fetch.ai/agent"))
            .await
            .unwrap();
        assert_eq!(outcome.source, OutcomeSource::Local);
    }

    #[tokio::test]
    async fn test_endpoint_without_delegate_gateway_runs_locally() {
        let outcome = use_case(ScriptedGateway::new())
            .execute(request("swap").with_delegate("https://api.fetch.ai/agent"))
            .await
            .unwrap();
        assert_eq!(outcome.source, OutcomeSource::Local);
    }
}
