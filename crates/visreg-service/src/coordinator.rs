//! Scenario-to-session lifecycle coordinator
//!
//! One coordinator instance serves one logical worker; scenarios within it
//! run strictly sequentially. The coordinator owns the shared browser
//! handle's command surface: commands are installed once per instrumented
//! scenario, and a failed session open installs loud replacement commands
//! instead of leaving a prior scenario's handlers bound.

use crate::commands::{install_commands, install_failing_commands, CommandSurface};
use crate::registry::CommandRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use visreg_client::SessionClient;
use visreg_core::{
    should_instrument, transition, Result, RunIdentity, ScenarioContext, ScenarioEvent,
    ServiceOptions, SessionEvent, SessionParams, SessionState, VisregError,
};

/// Per-worker lifecycle coordinator.
pub struct ScenarioBridge {
    options: ServiceOptions,
    run: RunIdentity,
    client: Arc<dyn SessionClient>,
    state: SessionState,
}

impl ScenarioBridge {
    /// Build a coordinator for one worker. Fails with a configuration
    /// error when the endpoint or apikey is missing.
    pub fn new(
        options: ServiceOptions,
        run: RunIdentity,
        client: Arc<dyn SessionClient>,
    ) -> Result<Self> {
        options.validate()?;
        debug!(
            "scenario bridge ready (endpoint: {}, run: '{}')",
            options.endpoint, run.run_name
        );
        Ok(Self {
            options,
            run,
            client,
            state: SessionState::Idle,
        })
    }

    /// Current session state, mainly for embedders and tests.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    fn gate(&self, ctx: &ScenarioContext) -> bool {
        should_instrument(
            &ctx.tags,
            self.options.exclude_tag.as_deref(),
            self.options.tag.as_deref(),
        )
    }

    /// Pre-scenario hook: gate, open a remote session, install commands.
    ///
    /// On a failed open, loud replacement commands are installed and the
    /// error is returned so the scenario's setup phase fails.
    pub async fn on_scenario_start(
        &mut self,
        event: &ScenarioEvent,
        registry: &mut dyn CommandRegistry,
    ) -> Result<()> {
        let ctx = event.normalize();
        self.state = transition(self.state.clone(), SessionEvent::ScenarioStarted);

        if !self.gate(&ctx) {
            debug!(
                "scenario '{}' is not instrumented (tags: {:?})",
                ctx.scenario_name, ctx.tags
            );
            self.state = transition(self.state.clone(), SessionEvent::GateSkipped);
            return Ok(());
        }

        let params = SessionParams::build(&self.options, &self.run, &ctx);
        info!(
            "opening test session for '{}' in suite '{}' (run: '{}')",
            params.test, params.suite, params.run
        );
        self.state = transition(self.state.clone(), SessionEvent::OpenRequested);

        match self
            .client
            .open_session(&params, &self.options.apikey)
            .await
        {
            Ok(session) => {
                debug!("session '{}' open, installing commands", session.id);
                self.state = transition(self.state.clone(), SessionEvent::OpenSucceeded);
                let surface = Arc::new(CommandSurface::new(Arc::clone(&self.client)));
                install_commands(registry, surface);
                Ok(())
            }
            Err(e) => {
                error!(
                    "failed to open test session for '{}': {}",
                    ctx.scenario_name, e
                );
                let cause = e.to_string();
                self.state = transition(
                    self.state.clone(),
                    SessionEvent::OpenFailed {
                        error: cause.clone(),
                    },
                );
                install_failing_commands(registry, &cause);
                Err(VisregError::SessionOpen(format!(
                    "scenario '{}': {}",
                    ctx.scenario_name, cause
                )))
            }
        }
    }

    /// Post-scenario hook: close the session opened at start.
    ///
    /// The gate is re-evaluated with the same inputs as at start so a
    /// scenario skipped at start is also skipped here. A close failure is
    /// surfaced but the coordinator still returns to idle; the session is
    /// never reopened or retried.
    pub async fn on_scenario_end(&mut self, event: &ScenarioEvent) -> Result<()> {
        let ctx = event.normalize();

        if !self.gate(&ctx) {
            self.state = transition(self.state.clone(), SessionEvent::GateSkipped);
            return Ok(());
        }

        match self.state {
            SessionState::Open => {
                debug!("closing test session for '{}'", ctx.scenario_name);
                self.state = transition(self.state.clone(), SessionEvent::CloseRequested);
                let outcome = self.client.close_session(&self.options.apikey).await;
                self.state = transition(self.state.clone(), SessionEvent::CloseFinished);

                outcome.map_err(|e| {
                    warn!(
                        "failed to close test session for '{}': {}",
                        ctx.scenario_name, e
                    );
                    VisregError::SessionClose(format!("scenario '{}': {}", ctx.scenario_name, e))
                })
            }
            _ => {
                debug!(
                    "no open session for '{}' at scenario end (state: {:?})",
                    ctx.scenario_name, self.state
                );
                Ok(())
            }
        }
    }
}
