// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `generate`, `prompt`, `fallback` and `platforms` subcommands.

use std::sync::Arc;

use clap::Args;
use colored::Colorize;
use postforge_config::PostforgeConfig;
use postforge_config::model::GenerationConfig;
use postforge_core::types::NewContent;
use postforge_core::{
    ContentStore, ContentType, FormatOptions, GenerationRequest, GenerationResponse, Goal,
    Platform, PlatformTarget, PostforgeError, Priority, RemoteGenerator, Tone,
};
use postforge_dispatch::{DispatchSettings, GENERATE_CONTENT, GenerationDispatcher};
use postforge_fallback::generate_fallback;
use postforge_library::JsonLibrary;
use postforge_metrics::{MetricsRegistry, PrometheusExporter};
use postforge_prompt::{PromptBuilder, SeededPicker, config_for};
use postforge_remote::HostedFunctionClient;
use postforge_resilience::RetryPolicy;
use postforge_scheduler::{RequestScheduler, SchedulerSettings};
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::console::ConsoleNotifier;
use crate::offline::OfflineGenerator;

/// Library titles are the topic, cut to this many characters.
const TITLE_CHARS: usize = 60;

/// Inputs shared by `generate` and `prompt`.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Topic or free-form prompt.
    #[arg(long)]
    pub topic: String,

    /// Target platform id (repeatable). The first one shapes the post.
    #[arg(long = "platform", value_name = "ID")]
    pub platforms: Vec<String>,

    /// Defaults to `generation.default_tone`.
    #[arg(long)]
    pub tone: Option<Tone>,

    /// Defaults to `generation.default_goal`.
    #[arg(long)]
    pub goal: Option<Goal>,

    #[arg(long, default_value_t = ContentType::Content)]
    pub content_type: ContentType,

    /// Point the post must cover (repeatable).
    #[arg(long = "key-point", value_name = "TEXT")]
    pub key_points: Vec<String>,

    #[arg(long)]
    pub no_emojis: bool,

    #[arg(long)]
    pub no_hashtags: bool,

    /// Template id recorded on the request.
    #[arg(long)]
    pub template: Option<String>,

    /// Seed for video-script hook and call-to-action selection.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RequestArgs {
    fn to_request(&self, defaults: &GenerationConfig) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.topic.clone())
            .with_content_type(self.content_type)
            .with_tone(self.tone.unwrap_or(defaults.default_tone))
            .with_goal(self.goal.unwrap_or(defaults.default_goal))
            .with_key_points(self.key_points.clone())
            .with_options(FormatOptions {
                use_emojis: defaults.use_emojis && !self.no_emojis,
                use_hashtags: defaults.use_hashtags && !self.no_hashtags,
            });
        request.platforms = self.platforms.iter().map(|p| PlatformTarget::from(p.as_str())).collect();
        request.temperature = defaults.temperature;
        request.max_tokens = defaults.max_tokens;
        if let Some(template) = &self.template {
            request = request.with_template(template.clone());
        }
        request
    }

    fn prompt_builder(&self) -> PromptBuilder {
        match self.seed {
            Some(seed) => PromptBuilder::with_picker(Arc::new(SeededPicker::new(seed))),
            None => PromptBuilder::new(),
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[arg(long, default_value_t = Priority::Normal)]
    pub priority: Priority,

    /// Store the result in the content library.
    #[arg(long)]
    pub save: bool,

    /// Print the full response as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print timing statistics afterwards.
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug)]
pub struct PromptArgs {
    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args, Debug)]
pub struct FallbackArgs {
    #[arg(long)]
    pub topic: String,

    #[arg(long, value_name = "ID")]
    pub platform: String,

    #[arg(long)]
    pub tone: Option<Tone>,

    #[arg(long)]
    pub no_emojis: bool,

    #[arg(long)]
    pub no_hashtags: bool,
}

pub(crate) fn has_endpoint(config: &PostforgeConfig) -> bool {
    config
        .remote
        .endpoint
        .as_deref()
        .is_some_and(|e| !e.trim().is_empty())
}

/// The configured remote generator, or [`OfflineGenerator`] without an endpoint.
pub(crate) fn remote_generator(config: &PostforgeConfig) -> Result<Arc<dyn RemoteGenerator>, PostforgeError> {
    if has_endpoint(config) {
        Ok(Arc::new(HostedFunctionClient::new(&config.remote)?))
    } else {
        Ok(Arc::new(OfflineGenerator))
    }
}

/// Dispatcher wired from config. Without an endpoint every call fails fast
/// and is not retried.
fn build_dispatcher(
    config: &PostforgeConfig,
    prompts: PromptBuilder,
) -> Result<GenerationDispatcher, PostforgeError> {
    let generator = remote_generator(config)?;
    let mut settings = DispatchSettings::from_config(config);
    if !has_endpoint(config) {
        warn!("remote.endpoint is not set, using offline fallback content");
        settings = settings.with_retry(RetryPolicy::none());
    }

    let scheduler = RequestScheduler::new(SchedulerSettings::from_config(&config.queue));
    let metrics = MetricsRegistry::from_config(&config.metrics);
    Ok(GenerationDispatcher::new(generator, scheduler, metrics, settings)
        .with_prompt_builder(prompts)
        .with_notifier(Arc::new(ConsoleNotifier)))
}

pub async fn run_generate(config: &PostforgeConfig, args: GenerateArgs) -> Result<(), PostforgeError> {
    let exporter = if config.metrics.prometheus {
        Some(PrometheusExporter::install()?)
    } else {
        None
    };

    let request = args
        .request
        .to_request(&config.generation)
        .with_priority(args.priority);
    let dispatcher = build_dispatcher(config, args.request.prompt_builder())?;
    let response = dispatcher.generate_content(&request).await;

    if response.content.is_empty() {
        let message = response.error.unwrap_or_else(|| "no content generated".to_string());
        return Err(PostforgeError::Validation(message));
    }

    print_response(&response, args.json)?;

    if args.save {
        let library = JsonLibrary::open(&config.app.library_path).await?;
        let entry = library
            .save_content(NewContent {
                title: title_for(&request.prompt),
                body: response.content.clone(),
                platform: response.platform.clone(),
                content_type: request.content_type,
            })
            .await?;
        info!(id = %entry.id, path = %library.path().display(), "saved to library");
        eprintln!("{} {}", "saved".green().bold(), entry.id);
    }

    if args.metrics {
        print_metrics(dispatcher.metrics());
        if let Some(exporter) = exporter {
            eprint!("{}", exporter.render());
        }
    }
    Ok(())
}

fn print_response(response: &GenerationResponse, json: bool) -> Result<(), PostforgeError> {
    if json {
        let text = serde_json::to_string_pretty(response)
            .map_err(|e| PostforgeError::Internal(format!("failed to encode response: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", response.content);
    if !response.usage.is_empty() {
        eprintln!(
            "{}",
            format!("~{} tokens (estimated)", response.usage.total_tokens).dimmed()
        );
    }
    Ok(())
}

fn print_metrics(metrics: &MetricsRegistry) {
    match metrics.summary(GENERATE_CONTENT) {
        Some(s) => eprintln!(
            "{GENERATE_CONTENT}: n={} avg={:.1}ms median={:.1}ms p95={:.1}ms min={:.1}ms max={:.1}ms",
            s.count, s.average, s.median, s.p95, s.min, s.max
        ),
        None => eprintln!("{GENERATE_CONTENT}: no samples"),
    }
}

fn title_for(topic: &str) -> String {
    let topic = topic.trim();
    match topic.char_indices().nth(TITLE_CHARS) {
        Some((cut, _)) => format!("{}...", topic[..cut].trim_end()),
        None => topic.to_string(),
    }
}

pub fn run_prompt(config: &PostforgeConfig, args: PromptArgs) -> Result<(), PostforgeError> {
    let request = args.request.to_request(&config.generation);
    if request.prompt.trim().is_empty() {
        return Err(PostforgeError::Validation("topic must not be empty".into()));
    }
    let dispatcher = build_dispatcher(config, args.request.prompt_builder())?;
    println!("{}", dispatcher.build_prompt(&request));
    Ok(())
}

pub fn run_fallback(config: &PostforgeConfig, args: FallbackArgs) {
    let platform = PlatformTarget::from(args.platform.as_str());
    let text = generate_fallback(
        &args.topic,
        &platform,
        args.tone.unwrap_or(config.generation.default_tone),
        config.generation.use_emojis && !args.no_emojis,
        config.generation.use_hashtags && !args.no_hashtags,
    );
    println!("{text}");
}

pub fn print_platforms() {
    println!(
        "{}",
        format!(
            "{:<10} {:<12} {:>6} {:>8} {:>9} {:>7}",
            "ID", "NAME", "LIMIT", "OPTIMAL", "HASHTAGS", "EMOJIS"
        )
        .bold()
    );
    for platform in Platform::iter() {
        let c = config_for(platform);
        println!(
            "{:<10} {:<12} {:>6} {:>8} {:>9} {:>7}",
            platform.to_string(),
            c.display_name,
            c.character_limit,
            c.optimal_length,
            format!("{}/{}", c.optimal_hashtags, c.max_hashtags),
            if c.supports_emojis { "yes" } else { "no" }
        );
    }
}
