use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, DetachedSubmit, FormField, FormSource, MemoryView,
    SubmissionController, UiState,
};
use tracing_subscriber::EnvFilter;

/// Ask the calculation service for dy/dx and the tangent lines through a point.
#[derive(Parser, Debug)]
#[command(name = "tangent")]
struct Args {
    /// Relation in x and y, read as `0 = <FCN>`.
    #[arg(long)]
    fcn: String,
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    x: String,
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    y: String,
    /// `exact` or `decimal`; forwarded as given.
    #[arg(long, default_value = "exact")]
    output: String,
    #[arg(long)]
    server_url: Option<String>,
    /// Config file; defaults to ./tangent.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl FormSource for Args {
    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Function => self.fcn.clone(),
            FormField::X => self.x.clone(),
            FormField::Y => self.y.clone(),
            FormField::Output => self.output.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load client settings")?;
    if let Some(server_url) = &args.server_url {
        settings
            .set_server_url(server_url)
            .context("invalid --server-url")?;
    }
    tracing::debug!(server_url = %settings.server_url, policy = ?settings.completion_policy, "settings loaded");

    let controller = SubmissionController::from_settings(&settings, MemoryView::default())
        .context("failed to build submission controller")?;
    let mut events = controller.subscribe();

    let submission = controller
        .on_submit(&mut DetachedSubmit::default(), &args)
        .await;
    eprintln!("{}", to_plain_text(&controller.rendered().await.primary));

    let state = controller
        .wait_until_settled(&mut events, submission)
        .await
        .context("submission finished without an outcome")?;
    let rendered = controller.rendered().await;
    println!("{}", to_plain_text(&rendered.primary));
    let info = to_plain_text(&rendered.secondary);
    if !info.is_empty() {
        println!("{info}");
    }

    Ok(match state {
        UiState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn to_plain_text(html: &str) -> String {
    html.replace("<br>", "\n")
        .replace("<strong>", "")
        .replace("</strong>", "")
        .trim_end()
        .to_string()
}
