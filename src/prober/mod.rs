//! Timed request loop
//!
//! The prober issues GET requests against one URL until a wall-clock
//! deadline passes, timing each request and folding the outcome into a
//! [`RunResult`]. A request already in flight when the deadline passes is
//! allowed to finish and is counted.
//!
//! Sequential mode keeps exactly one request in flight. Concurrent mode runs
//! several copies of the same loop; their samples are merged back into
//! start-time order before the result is returned.

use crate::{
    client::HttpClient,
    error::Result,
    logging::ProbeLogger,
    models::{Config, ProbeOutcome, RunResult},
    output::{OutputFormatter, OutputFormatterFactory},
    types::ExecutionMode,
};
use futures::future::try_join_all;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Settings for one probe run
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Target URL
    pub url: String,
    /// Wall-clock length of the run
    pub duration: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    /// Request scheduling
    pub mode: ExecutionMode,
}

impl ProbeConfig {
    /// Sequential run against `url`
    pub fn new<S: Into<String>>(url: S, duration: Duration, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            duration,
            timeout,
            mode: ExecutionMode::Sequential,
        }
    }

    /// Use `workers` concurrent loops (one or fewer means sequential)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.mode = ExecutionMode::from_concurrency(workers);
        self
    }

    /// Derive probe settings from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.target_url.clone(),
            duration: config.duration(),
            timeout: config.timeout(),
            mode: config.execution_mode(),
        }
    }
}

/// One attempt, tagged with when it started relative to the run start
#[derive(Debug)]
struct TimedOutcome {
    started: Duration,
    request_number: u64,
    outcome: ProbeOutcome,
}

/// Drives requests against the target until the deadline
pub struct Prober<C: HttpClient> {
    client: Arc<C>,
    config: ProbeConfig,
    formatter: Box<dyn OutputFormatter>,
    show_progress: bool,
    logger: Option<ProbeLogger>,
}

impl<C: HttpClient> Prober<C> {
    /// Create a prober printing plain progress lines
    pub fn new(client: C, config: ProbeConfig) -> Self {
        Self::with_shared_client(Arc::new(client), config)
    }

    /// Create a prober around an already shared client
    pub fn with_shared_client(client: Arc<C>, config: ProbeConfig) -> Self {
        Self {
            client,
            config,
            formatter: OutputFormatterFactory::create_plain_formatter(),
            show_progress: true,
            logger: None,
        }
    }

    /// Use a different formatter for the banner and progress lines
    pub fn with_formatter(mut self, formatter: Box<dyn OutputFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Enable or disable the banner and per-request lines on stdout
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Attach a structured logger
    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Probe settings
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run until the deadline and return every sample collected.
    ///
    /// Requests that get no response are counted as errors and the loop
    /// carries on. Only non-recoverable errors (such as an unparseable URL)
    /// abort the run.
    pub async fn run(&self) -> Result<RunResult> {
        if self.show_progress {
            println!("{}", self.formatter.format_banner(&self.config.url, self.config.duration, self.config.mode));
        }
        if let Some(logger) = &self.logger {
            logger.log_run_start(&self.config.url, self.config.duration.as_secs_f64(), self.config.mode.workers());
        }

        let start = Instant::now();
        let mut result = match self.collect(start, start + self.config.duration).await {
            Ok(result) => result,
            Err(e) => {
                if let Some(logger) = &self.logger {
                    logger.log_run_aborted(&self.config.url, &e);
                }
                return Err(e);
            }
        };
        result.elapsed = start.elapsed();

        if let Some(logger) = &self.logger {
            logger.log_run_complete(&result);
        }

        Ok(result)
    }

    /// Fold every outcome observed before `deadline` into a result
    async fn collect(&self, start: Instant, deadline: Instant) -> Result<RunResult> {
        let mut result = RunResult::new();

        match self.config.mode {
            ExecutionMode::Sequential => {
                let mut request_number = 0;
                while Instant::now() < deadline {
                    request_number += 1;
                    let outcome = self.probe_once(request_number).await?;
                    result.record(&outcome);
                }
            }
            ExecutionMode::Concurrent { workers } => {
                let counter = AtomicU64::new(0);
                let loops = (0..workers).map(|_| self.worker_loop(start, deadline, &counter));
                let mut timed: Vec<TimedOutcome> = try_join_all(loops).await?.into_iter().flatten().collect();

                timed.sort_by_key(|t| (t.started, t.request_number));
                for t in &timed {
                    result.record(&t.outcome);
                }
            }
        }

        Ok(result)
    }

    /// One deadline loop sharing the request counter with its siblings
    async fn worker_loop(&self, start: Instant, deadline: Instant, counter: &AtomicU64) -> Result<Vec<TimedOutcome>> {
        let mut outcomes = Vec::new();
        while Instant::now() < deadline {
            let request_number = counter.fetch_add(1, Ordering::Relaxed) + 1;
            let started = start.elapsed();
            let outcome = self.probe_once(request_number).await?;
            outcomes.push(TimedOutcome { started, request_number, outcome });
        }
        Ok(outcomes)
    }

    /// Issue one request, time it and classify the result
    async fn probe_once(&self, request_number: u64) -> Result<ProbeOutcome> {
        let request_start = Instant::now();
        let outcome = match self.client.get(&self.config.url, self.config.timeout).await {
            Ok(response) => ProbeOutcome::from_response(response.status_code, request_start.elapsed()),
            Err(e) if e.is_recoverable() => {
                if let Some(logger) = &self.logger {
                    logger.log_transport_error(&self.config.url, request_number, &e);
                }
                ProbeOutcome::transport(e.to_string())
            }
            Err(e) => return Err(e),
        };

        if self.show_progress {
            println!("{}", self.formatter.format_progress(request_number, &outcome));
        }
        if let Some(logger) = &self.logger {
            logger.log_request(&self.config.url, request_number, &outcome);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ProbeResponse;
    use crate::error::AppError;
    use crate::logging::LoggerFactory;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Respond { status: u16, delay_ms: u64 },
        Refused { delay_ms: u64 },
        TimedOut,
        BadUrl,
    }

    /// Client that replays a script, then repeats a fallback step
    struct ScriptedClient {
        script: Mutex<VecDeque<Step>>,
        fallback: Step,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(script: Vec<Step>, fallback: Step) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: AtomicUsize::new(0),
            }
        }

        fn repeating(step: Step) -> Self {
            Self::new(Vec::new(), step)
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedClient {
        async fn get(&self, _url: &str, timeout: Duration) -> Result<ProbeResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.script.lock().unwrap().pop_front().unwrap_or(self.fallback);
            match step {
                Step::Respond { status, delay_ms } => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Ok(ProbeResponse { status_code: status, body_size: 2 })
                }
                Step::Refused { delay_ms } => {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Err(AppError::network("connection refused"))
                }
                Step::TimedOut => {
                    tokio::time::sleep(timeout).await;
                    Err(AppError::timeout("request timed out"))
                }
                Step::BadUrl => Err(AppError::parse("Invalid URL: relative URL without a base")),
            }
        }
    }

    fn quiet(client: ScriptedClient, duration_ms: u64) -> Prober<ScriptedClient> {
        let config = ProbeConfig::new("http://probe.test/albums", Duration::from_millis(duration_ms), Duration::from_millis(300));
        Prober::new(client, config).with_progress(false)
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[tokio::test(start_paused = true)]
    async fn test_classifies_each_outcome() {
        let client = ScriptedClient::new(
            vec![
                Step::Respond { status: 200, delay_ms: 10 },
                Step::Respond { status: 500, delay_ms: 20 },
                Step::Refused { delay_ms: 5 },
                Step::Respond { status: 200, delay_ms: 5 },
            ],
            Step::Respond { status: 200, delay_ms: 1_000 },
        );

        let result = quiet(client, 40).run().await.unwrap();

        assert_eq!(result.attempts, 4);
        assert_eq!(result.latencies.len(), 3);
        assert!(approx_eq(result.latencies[0], 10.0));
        assert!(approx_eq(result.latencies[1], 20.0));
        assert!(approx_eq(result.latencies[2], 5.0));
        assert_eq!(result.errors, 2);
        assert_eq!(result.transport_failures(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_sends_nothing() {
        let prober = quiet(ScriptedClient::repeating(Step::Respond { status: 200, delay_ms: 1 }), 0);
        let result = prober.run().await.unwrap();

        assert!(result.latencies.is_empty());
        assert_eq!(result.errors, 0);
        assert_eq!(result.attempts, 0);
        assert_eq!(prober.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_runs_until_deadline() {
        let prober = quiet(ScriptedClient::repeating(Step::Respond { status: 200, delay_ms: 5 }), 50);
        let result = prober.run().await.unwrap();

        assert_eq!(result.attempts, 10);
        assert_eq!(result.latencies.len(), 10);
        assert_eq!(result.errors, 0);
        assert!(result.elapsed >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_request_finishes_after_deadline() {
        let prober = quiet(ScriptedClient::repeating(Step::Respond { status: 200, delay_ms: 30 }), 50);
        let result = prober.run().await.unwrap();

        // Started at 0ms and 30ms; the second completes at 60ms
        assert_eq!(result.attempts, 2);
        assert_eq!(result.latencies.len(), 2);
        assert!(result.elapsed >= Duration::from_millis(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_timing_out_yields_no_samples() {
        let result = quiet(ScriptedClient::repeating(Step::TimedOut), 1_000).run().await.unwrap();

        assert!(result.is_empty());
        assert!(result.attempts > 0);
        assert_eq!(result.errors, result.attempts);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_recoverable_error_aborts_run() {
        let error = quiet(ScriptedClient::repeating(Step::BadUrl), 1_000).run().await.unwrap_err();
        assert_eq!(error.category(), "PARSE");

        let logger = LoggerFactory::new(Config { debug: true, ..Config::default() }).create_probe_logger();
        let logged = quiet(ScriptedClient::repeating(Step::BadUrl), 1_000).with_logger(logger);
        assert!(logged.run().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_workers_merge_in_start_order() {
        let client = ScriptedClient::new(
            vec![
                Step::Respond { status: 200, delay_ms: 10 },
                Step::Respond { status: 200, delay_ms: 20 },
            ],
            Step::Respond { status: 200, delay_ms: 10 },
        );
        let config = ProbeConfig::new("http://probe.test/albums", Duration::from_millis(30), Duration::from_millis(300))
            .with_workers(2);
        let prober = Prober::new(client, config).with_progress(false);

        let result = prober.run().await.unwrap();

        // Worker A starts at 0, 10, 20; worker B at 0, 20
        assert_eq!(result.attempts, 5);
        assert_eq!(result.latencies.len(), 5);
        assert_eq!(result.errors, 0);
        assert_eq!(prober.client.calls.load(Ordering::SeqCst), 5);
        assert!(approx_eq(result.latencies[0], 10.0) || approx_eq(result.latencies[0], 20.0));
    }

    #[test]
    fn test_probe_config_from_config() {
        let config = Config {
            target_url: "http://example.com/albums".to_string(),
            duration_seconds: 5,
            timeout_seconds: 2,
            concurrency: 3,
            ..Config::default()
        };

        let probe = ProbeConfig::from_config(&config);
        assert_eq!(probe.url, "http://example.com/albums");
        assert_eq!(probe.duration, Duration::from_secs(5));
        assert_eq!(probe.timeout, Duration::from_secs(2));
        assert_eq!(probe.mode, ExecutionMode::Concurrent { workers: 3 });
    }
}
