//! Publish entry point used by the session.

use std::path::PathBuf;
use std::sync::Arc;

use super::errors::{PipelineError, PipelineResult, StepError};
use super::pipeline::Pipeline;
use super::types::{PublishContext, PublishReceipt, PublishServices, PublishState};
use crate::capture::RecordingFinished;
use crate::logging::{LogConfig, LogObserver, PublishLogger};

/// Runs one publish attempt per finished recording.
pub struct PublishPipeline {
    pipeline: Pipeline,
    services: PublishServices,
    log_dir: Option<PathBuf>,
    log_config: LogConfig,
    observer: Option<LogObserver>,
}

impl PublishPipeline {
    /// The standard six-step pipeline.
    pub fn new(services: PublishServices) -> Self {
        Self::with_pipeline(super::create_standard_pipeline(), services)
    }

    pub fn with_pipeline(pipeline: Pipeline, services: PublishServices) -> Self {
        Self {
            pipeline,
            services,
            log_dir: None,
            log_config: LogConfig::default(),
            observer: None,
        }
    }

    /// Write one log file per attempt into `log_dir` (when set).
    pub fn with_logging(mut self, log_dir: Option<PathBuf>, config: LogConfig) -> Self {
        self.log_dir = log_dir;
        self.log_config = config;
        self
    }

    /// Forward every attempt's log lines to `observer`.
    pub fn with_observer(mut self, observer: LogObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn services(&self) -> &PublishServices {
        &self.services
    }

    /// Publish the recording. Single attempt; the first failing step ends it.
    pub async fn publish(&self, finished: &RecordingFinished) -> PipelineResult<PublishReceipt> {
        let job_name = format!(
            "publish_{}",
            finished.artifact.finished_at.format("%Y%m%d_%H%M%S")
        );

        let logger = PublishLogger::new(
            &job_name,
            self.log_dir.as_deref(),
            self.log_config.clone(),
            self.observer.clone(),
        )
        .map_err(|e| PipelineError::setup_failed(&job_name, format!("log file: {e}")))?;
        let logger = Arc::new(logger);

        let ctx = PublishContext::new(&job_name, self.services.clone(), Arc::clone(&logger));
        let mut state = PublishState::new(&job_name);

        tracing::info!(job = %job_name, steps = ?self.pipeline.step_names(), "Publish started");
        if let Err(e) = self.pipeline.run(&ctx, &mut state).await {
            logger.show_tail(&job_name);
            return Err(e);
        }

        receipt(&job_name, state)
    }
}

fn receipt(job_name: &str, state: PublishState) -> PipelineResult<PublishReceipt> {
    let (Some(meta), Some(video), Some(response)) = (state.metadata, state.video, state.response)
    else {
        return Err(PipelineError::step_failed(
            job_name,
            "Receipt",
            StepError::invalid_output("Pipeline finished without uploading"),
        ));
    };

    Ok(PublishReceipt {
        job_name: job_name.to_string(),
        style_index: meta.style_index,
        title: meta.title,
        video_bytes: video.len(),
        response_body: response,
    })
}
